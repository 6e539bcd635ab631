//! Unified error handling with Sentry integration.
//!
//! Front-ends funnel every failed action into [`AppError`]. Expected
//! shopper-facing conditions (not logged in, duplicate item, bad password)
//! become a notice via [`AppError::user_message`]; everything else is also
//! captured to Sentry by [`AppError::report`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::services::{AuthError, CartError, CheckoutError};
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation refused.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Account operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage could not be opened or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Bad input from the shopper.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this is a fault in the system rather than an expected
    /// shopper-facing condition.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Storage(_)
            | Self::Auth(AuthError::Storage(_))
            | Self::Checkout(CheckoutError::Storage(_)) => true,
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Cart(_) | Self::Auth(_) | Self::Checkout(_) | Self::BadRequest(_) => false,
        }
    }

    /// Message safe to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cart(err) => err.to_string(),
            Self::Checkout(CheckoutError::Storage(_)) | Self::Storage(_) => {
                "Something went wrong saving your data, please try again".to_string()
            }
            Self::Checkout(err) => err.to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid email or password".to_string(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AuthError::MissingName => "Please enter your name".to_string(),
                AuthError::NotLoggedIn => "Please log in first".to_string(),
                AuthError::Storage(_) => "Authentication error".to_string(),
            },
            Self::Catalog(CatalogError::NotFound(id)) => format!("No product with id {id}"),
            Self::Catalog(_) => "The product catalog is unavailable right now".to_string(),
            Self::BadRequest(msg) => msg.clone(),
        }
    }

    /// Log the error, capturing internal faults to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Action failed"
            );
        } else {
            tracing::info!(error = %self, "Action refused");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from the logged-in shopper.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_owned()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use corner_shop_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(CartError::Unauthenticated);
        assert_eq!(
            err.to_string(),
            "Cart error: please log in to add items to your cart"
        );

        let err = AppError::BadRequest("quantity must be a number".to_string());
        assert_eq!(err.to_string(), "Bad request: quantity must be a number");
    }

    #[test]
    fn test_shopper_conditions_are_not_internal() {
        assert!(!AppError::from(CartError::DuplicateItem(ProductId::new(1))).is_internal());
        assert!(!AppError::from(AuthError::InvalidCredentials).is_internal());
        assert!(!AppError::from(CheckoutError::EmptyCart).is_internal());
        assert!(!AppError::from(CatalogError::NotFound(ProductId::new(3))).is_internal());
        assert!(AppError::from(CatalogError::Status {
            status: 503,
            body: String::new()
        })
        .is_internal());
    }

    #[test]
    fn test_user_messages_hide_internals() {
        let err = AppError::from(CatalogError::Status {
            status: 500,
            body: "stack trace here".to_string(),
        });
        assert!(!err.user_message().contains("stack trace"));

        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).user_message(),
            "Invalid email or password"
        );
        assert_eq!(
            AppError::from(CatalogError::NotFound(ProductId::new(42))).user_message(),
            "No product with id 42"
        );
    }
}

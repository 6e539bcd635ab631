//! Authentication service.
//!
//! Accounts are a JSON array under [`keys::USERS`]; the logged-in shopper is
//! a copy of their account under [`keys::CURRENT_USER`]. Logging in or out
//! only touches the latter, which is what [`PrincipalSource`] reads, so cart
//! namespaces switch the moment the session changes.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use corner_shop_core::Email;

use crate::identity::PrincipalSource;
use crate::models::Principal;
use crate::models::session::keys;
use crate::storage::{KeyValueStore, codec};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// New account details.
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub address: Option<String>,
}

/// Profile changes; `None` fields are left as they are. The email cannot
/// change because it keys the shopper's cart and order history.
#[derive(Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub password: Option<SecretString>,
}

/// Authentication service.
///
/// Handles registration, login/logout and profile edits.
pub struct AuthService<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All registered accounts.
    #[must_use]
    pub fn users(&self) -> Vec<Principal> {
        codec::read_or_default(self.store, keys::USERS)
    }

    // =========================================================================
    // Registration & Login
    // =========================================================================

    /// Register a new account. Does not log it in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingName` for a blank name,
    /// `AuthError::InvalidEmail` if the email format is invalid,
    /// `AuthError::WeakPassword` if the password is too short, and
    /// `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub fn register(&self, request: RegisterRequest) -> Result<Principal, AuthError> {
        let name = validate_name(&request.name)?;
        let email = Email::parse(&request.email)?;
        validate_password(&request.password)?;

        let mut users = self.users();
        if users.iter().any(|u| u.email.matches(&email)) {
            return Err(AuthError::UserAlreadyExists);
        }

        let principal = Principal {
            name,
            email,
            password: request.password.expose_secret().to_owned(),
            address: normalize_address(request.address),
        };
        users.push(principal.clone());
        codec::write(self.store, keys::USERS, &users)?;

        tracing::info!("Registered new account");
        Ok(principal)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for malformed input and
    /// `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password))]
    pub fn login(&self, email: &str, password: &SecretString) -> Result<Principal, AuthError> {
        let email = Email::parse(email)?;

        let principal = self
            .users()
            .into_iter()
            .find(|u| u.email.matches(&email))
            .filter(|u| u.password == password.expose_secret())
            .ok_or(AuthError::InvalidCredentials)?;

        codec::write(self.store, keys::CURRENT_USER, &principal)?;
        tracing::info!("Logged in");
        Ok(principal)
    }

    /// End the session. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        self.store.remove(keys::CURRENT_USER);
        tracing::info!("Logged out");
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Apply `update` to the logged-in shopper's account and session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotLoggedIn` without a session, and the same
    /// validation errors as [`register`](Self::register) for a blank name or
    /// short password.
    #[instrument(skip(self, update))]
    pub fn update_profile(&self, update: ProfileUpdate) -> Result<Principal, AuthError> {
        let mut principal = self.current_principal().ok_or(AuthError::NotLoggedIn)?;

        if let Some(name) = update.name {
            principal.name = validate_name(&name)?;
        }
        if let Some(address) = update.address {
            principal.address = normalize_address(Some(address));
        }
        if let Some(password) = update.password {
            validate_password(&password)?;
            password.expose_secret().clone_into(&mut principal.password);
        }

        let mut users = self.users();
        match users.iter_mut().find(|u| u.email.matches(&principal.email)) {
            Some(existing) => existing.clone_from(&principal),
            // The account list was reset underneath the session; restore it
            None => users.push(principal.clone()),
        }
        codec::write(self.store, keys::USERS, &users)?;
        codec::write(self.store, keys::CURRENT_USER, &principal)?;

        tracing::info!("Updated profile");
        Ok(principal)
    }
}

impl PrincipalSource for AuthService<'_> {
    fn current_principal(&self) -> Option<Principal> {
        codec::read_or_default(self.store, keys::CURRENT_USER)
    }
}

// =============================================================================
// Validation
// =============================================================================

fn validate_name(name: &str) -> Result<String, AuthError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AuthError::MissingName);
    }
    Ok(name.to_owned())
}

fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn normalize_address(address: Option<String>) -> Option<String> {
    address
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
}

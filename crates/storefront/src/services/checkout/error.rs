//! Checkout error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that stop a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nobody is logged in; the shopper has been sent to the login page.
    #[error("please log in to check out")]
    Unauthenticated,

    /// There is nothing to buy.
    #[error("your cart is empty")]
    EmptyCart,

    /// No shipping address given and none on the profile.
    #[error("a shipping address is required")]
    MissingAddress,

    /// The order could not be recorded. The cart is left intact.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

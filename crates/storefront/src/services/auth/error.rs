//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] corner_shop_core::EmailError),

    /// Wrong password or unknown email.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too short.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Name missing on registration or profile update.
    #[error("name cannot be empty")]
    MissingName,

    /// Operation needs a logged-in shopper.
    #[error("not logged in")]
    NotLoggedIn,

    /// Account data could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

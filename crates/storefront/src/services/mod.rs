//! Business logic services.
//!
//! Each service borrows the key-value store (and whatever session seams it
//! needs) for the duration of one front-end action.

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AuthError, AuthService, ProfileUpdate, RegisterRequest};
pub use cart::{CartError, CartStore};
pub use checkout::{CheckoutError, CheckoutService, CheckoutSummary};

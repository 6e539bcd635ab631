//! Domain models for the storefront.
//!
//! All of these round-trip through JSON in the key-value store; see
//! [`session::keys`] for where each one lives.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::{Cart, LineItem};
pub use order::OrderReceipt;
pub use product::Product;
pub use user::Principal;

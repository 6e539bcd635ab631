//! Storage layout.
//!
//! Every piece of shopper state lives in the flat key-value store under one
//! of these keys. Values are JSON.

use corner_shop_core::Email;

/// Fixed keys.
pub mod keys {
    /// JSON array of every registered [`Principal`](crate::models::Principal).
    pub const USERS: &str = "users";

    /// JSON object of the logged-in [`Principal`](crate::models::Principal).
    pub const CURRENT_USER: &str = "currentUser";

    /// Prefix of per-namespace cart entries.
    pub const CART_PREFIX: &str = "cart_";

    /// Cart namespace used when nobody is logged in.
    pub const GUEST_CART: &str = "cart_guest";

    /// Prefix of per-shopper order history entries.
    pub const ORDERS_PREFIX: &str = "orders_";
}

/// Key of a shopper's order history.
#[must_use]
pub fn orders_key(email: &Email) -> String {
    format!("{}{email}", keys::ORDERS_PREFIX)
}

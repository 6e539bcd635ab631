//! Cart error types.

use thiserror::Error;

use corner_shop_core::ProductId;

/// Recoverable cart conditions, reported to the shopper as notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Nobody is logged in.
    #[error("please log in to add items to your cart")]
    Unauthenticated,

    /// The product already has a line; quantities change through
    /// `update_quantity` instead.
    #[error("product {0} is already in your cart")]
    DuplicateItem(ProductId),

    /// The stored cart could not be decoded. Readers treat it as empty.
    #[error("stored cart under {key:?} is unreadable")]
    MalformedStorage {
        /// Storage key of the cart.
        key: String,
    },
}

//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use corner_shop_core::{Email, Price};

use super::Cart;

/// Record of a completed checkout, kept in the shopper's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub email: Email,
    pub shipping_address: String,
    pub items: Cart,
    /// Sum of quantities at the time of purchase.
    pub item_count: u32,
    pub total: Price,
}

impl OrderReceipt {
    /// Build a receipt for `cart`, stamped now.
    #[must_use]
    pub fn new(email: Email, shipping_address: String, items: Cart) -> Self {
        Self {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            email,
            shipping_address,
            item_count: items.count(),
            total: items.total(),
            items,
        }
    }
}

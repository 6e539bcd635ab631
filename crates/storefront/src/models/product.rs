//! Catalog product.

use serde::{Deserialize, Serialize};

use corner_shop_core::{Price, ProductId};

/// A product as returned by the public catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
}

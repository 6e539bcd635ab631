//! Cart domain types.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s, unique by product id, in
//! which every quantity is at least one. The persisted JSON is a bare array
//! of line items:
//!
//! ```json
//! [{"id":1,"title":"Backpack","price":109.95,"image":"https://…","description":"…","qty":2}]
//! ```

use serde::{Deserialize, Serialize};

use corner_shop_core::{Price, ProductId};

use super::Product;

/// A product snapshot with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub qty: u32,
}

impl LineItem {
    /// Snapshot `product` with a quantity of one.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            image: product.image.clone(),
            description: product.description.clone(),
            qty: 1,
        }
    }

    /// `price * qty`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.line_total(self.qty)
    }
}

/// The line items of one cart namespace.
///
/// Decoding drops zero-quantity lines and later duplicates of an id, so a
/// hand-edited or stale entry still yields a cart that upholds the
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of quantities.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.qty))
    }

    /// Sum of `price * qty`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Append `item` unless its id is already present or its quantity is zero.
    /// Returns whether the item was added.
    pub fn push(&mut self, item: LineItem) -> bool {
        if item.qty == 0 || self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Shift the quantity of `id` by `delta`, removing the line when the
    /// result is zero or below. Returns `false` if `id` is absent.
    pub fn adjust(&mut self, id: ProductId, delta: i64) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        let Some(line) = self.items.get_mut(pos) else {
            return false;
        };
        let next = i64::from(line.qty).saturating_add(delta);
        if next <= 0 {
            self.items.remove(pos);
        } else {
            line.qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Drop the line for `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.push(item);
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

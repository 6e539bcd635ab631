//! Cart service.
//!
//! [`CartStore`] reads and writes the cart of whoever is logged in. It keeps
//! no copy of the cart between calls: every operation resolves the namespace
//! and reads storage afresh, so a login or logout in between is always
//! honored. All writes go through [`CartStore::save_cart`], which replaces
//! the whole entry and then refreshes the attached views.

mod error;

pub use error::CartError;

use tracing::instrument;

use corner_shop_core::ProductId;

use crate::identity::{CartNamespace, PrincipalSource, resolve_namespace};
use crate::models::{Cart, LineItem, Product};
use crate::storage::{KeyValueStore, StorageError, codec};
use crate::views::CartViews;

/// Cart operations for the current session.
pub struct CartStore<'a> {
    store: &'a dyn KeyValueStore,
    principals: &'a dyn PrincipalSource,
    views: &'a dyn CartViews,
}

impl<'a> CartStore<'a> {
    /// Create a cart store over `store`, resolving the shopper through
    /// `principals` and refreshing `views` after every write.
    #[must_use]
    pub const fn new(
        store: &'a dyn KeyValueStore,
        principals: &'a dyn PrincipalSource,
        views: &'a dyn CartViews,
    ) -> Self {
        Self {
            store,
            principals,
            views,
        }
    }

    /// The namespace the next operation would use.
    #[must_use]
    pub fn namespace(&self) -> CartNamespace {
        resolve_namespace(self.principals)
    }

    /// The current cart. Absent or unreadable entries read as empty.
    #[must_use]
    pub fn get_cart(&self) -> Cart {
        codec::read_or_default(self.store, &self.namespace().key())
    }

    /// The current cart, reporting an unreadable entry instead of hiding it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::MalformedStorage` if a stored value exists but
    /// does not decode.
    pub fn try_get_cart(&self) -> Result<Cart, CartError> {
        let key = self.namespace().key();
        match codec::decode(self.store, &key) {
            Ok(cart) => Ok(cart.unwrap_or_default()),
            Err(StorageError::Malformed { key, .. }) => Err(CartError::MalformedStorage { key }),
            Err(e) => {
                tracing::warn!(error = %e, "Unexpected storage error reading cart");
                Ok(Cart::new())
            }
        }
    }

    /// Replace the current cart with `cart`, then refresh the views.
    pub fn save_cart(&self, cart: &Cart) {
        let key = self.namespace().key();
        if let Err(e) = codec::write(self.store, &key, cart) {
            tracing::error!(error = %e, "Failed to save cart");
        }
        self.views.cart_changed(cart);
    }

    /// Check that the session may add items, without touching storage.
    /// Front-ends call this before fetching the product to add.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Unauthenticated` when nobody is logged in.
    pub fn ensure_can_add(&self) -> Result<(), CartError> {
        if self.principals.current_principal().is_none() {
            tracing::debug!("Rejected add to cart for guest");
            return Err(CartError::Unauthenticated);
        }
        Ok(())
    }

    /// Add `product` with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Unauthenticated` when nobody is logged in and
    /// `CartError::DuplicateItem` when the product already has a line.
    /// Storage is untouched in both cases.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: &Product) -> Result<(), CartError> {
        self.ensure_can_add()?;

        let mut cart = self.get_cart();
        if !cart.push(LineItem::from_product(product)) {
            return Err(CartError::DuplicateItem(product.id));
        }

        self.save_cart(&cart);
        tracing::debug!(count = cart.count(), "Added product to cart");
        Ok(())
    }

    /// Shift the quantity of `id` by `delta`; the line is dropped once its
    /// quantity reaches zero. An unknown id leaves the cart as it was. The
    /// cart is saved either way.
    #[instrument(skip(self))]
    pub fn update_quantity(&self, id: ProductId, delta: i64) {
        let mut cart = self.get_cart();
        if !cart.adjust(id, delta) {
            tracing::debug!("Quantity update for product not in cart");
        }
        self.save_cart(&cart);
    }

    /// Drop the line for `id`, if any. The cart is saved either way.
    #[instrument(skip(self))]
    pub fn remove_item(&self, id: ProductId) {
        let mut cart = self.get_cart();
        cart.remove(id);
        self.save_cart(&cart);
    }

    /// Empty the current cart.
    pub fn clear(&self) {
        self.save_cart(&Cart::new());
    }

    /// Total quantity across all lines.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.get_cart().count()
    }

    /// Sum of `price * qty`, with exactly two fractional digits.
    #[must_use]
    pub fn cart_total_amount(&self) -> String {
        self.get_cart().total().display()
    }
}

//! Checkout service.
//!
//! Checkout is only open to logged-in shoppers; a guest is redirected to
//! the login page through the [`Navigator`]. Placing an order records a
//! receipt in the shopper's history and then empties the cart through the
//! cart store, so the badge and any mounted listing refresh as usual.

mod error;

pub use error::CheckoutError;

use tracing::instrument;

use crate::identity::PrincipalSource;
use crate::models::session::orders_key;
use crate::models::{Cart, OrderReceipt, Principal};
use crate::navigation::{Destination, Navigator};
use crate::services::cart::CartStore;
use crate::storage::{KeyValueStore, codec};
use crate::views::CartViews;

/// What the checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub shopper: Principal,
    pub cart: Cart,
    pub item_count: u32,
    /// Two-decimal total.
    pub total: String,
}

/// Checkout operations for the current session.
pub struct CheckoutService<'a> {
    store: &'a dyn KeyValueStore,
    principals: &'a dyn PrincipalSource,
    navigator: &'a dyn Navigator,
    carts: CartStore<'a>,
}

impl<'a> CheckoutService<'a> {
    #[must_use]
    pub const fn new(
        store: &'a dyn KeyValueStore,
        principals: &'a dyn PrincipalSource,
        views: &'a dyn CartViews,
        navigator: &'a dyn Navigator,
    ) -> Self {
        Self {
            store,
            principals,
            navigator,
            carts: CartStore::new(store, principals, views),
        }
    }

    /// Open the checkout page.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Unauthenticated` (after redirecting to
    /// [`Destination::Login`]) when nobody is logged in.
    pub fn begin(&self) -> Result<CheckoutSummary, CheckoutError> {
        let shopper = self.require_shopper()?;
        let cart = self.carts.get_cart();
        Ok(CheckoutSummary {
            shopper,
            item_count: cart.count(),
            total: cart.total().display(),
            cart,
        })
    }

    /// Buy everything in the cart.
    ///
    /// `shipping_address` overrides the profile address when given.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Unauthenticated` (after redirecting),
    /// `CheckoutError::EmptyCart`, `CheckoutError::MissingAddress`, or
    /// `CheckoutError::Storage` if the receipt cannot be recorded; the cart
    /// is only emptied once the receipt is stored.
    #[instrument(skip(self, shipping_address))]
    pub fn place_order(
        &self,
        shipping_address: Option<&str>,
    ) -> Result<OrderReceipt, CheckoutError> {
        let shopper = self.require_shopper()?;

        let cart = self.carts.get_cart();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address = shipping_address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_owned)
            .or(shopper.address)
            .ok_or(CheckoutError::MissingAddress)?;

        let receipt = OrderReceipt::new(shopper.email, address, cart);

        let key = orders_key(&receipt.email);
        let mut history: Vec<OrderReceipt> = codec::read_or_default(self.store, &key);
        history.push(receipt.clone());
        codec::write(self.store, &key, &history)?;

        self.carts.clear();

        tracing::info!(
            order_id = %receipt.id,
            items = receipt.item_count,
            total = %receipt.total,
            "Order placed"
        );
        self.navigator
            .navigate_to(Destination::OrderConfirmation(receipt.id));
        Ok(receipt)
    }

    /// Past orders of the logged-in shopper, oldest first. Empty for guests.
    #[must_use]
    pub fn order_history(&self) -> Vec<OrderReceipt> {
        self.principals
            .current_principal()
            .map(|p| codec::read_or_default(self.store, &orders_key(&p.email)))
            .unwrap_or_default()
    }

    fn require_shopper(&self) -> Result<Principal, CheckoutError> {
        self.principals.current_principal().ok_or_else(|| {
            tracing::debug!("Checkout without login, redirecting");
            self.navigator.navigate_to(Destination::Login);
            CheckoutError::Unauthenticated
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use corner_shop_core::{Email, ProductId};

    use super::*;
    use crate::models::Product;
    use crate::storage::MemoryStore;

    fn ada(address: Option<&str>) -> Principal {
        Principal {
            name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            password: "engine42".to_owned(),
            address: address.map(str::to_owned),
        }
    }

    fn product(id: u64, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: price.parse().unwrap(),
            description: String::new(),
            category: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn test_guest_is_sent_to_login() {
        let store = MemoryStore::new();
        let visited = RefCell::new(Vec::new());
        let nav = |d: Destination| visited.borrow_mut().push(d);
        let guest = || None::<Principal>;
        let checkout = CheckoutService::new(&store, &guest, &(), &nav);

        assert!(matches!(checkout.begin(), Err(CheckoutError::Unauthenticated)));
        assert!(matches!(
            checkout.place_order(Some("1 Road")),
            Err(CheckoutError::Unauthenticated)
        ));
        assert_eq!(*visited.borrow(), vec![Destination::Login, Destination::Login]);
        assert!(checkout.order_history().is_empty());
    }

    #[test]
    fn test_empty_cart_cannot_be_ordered() {
        let store = MemoryStore::new();
        let shopper = || Some(ada(Some("1 Road")));
        let checkout = CheckoutService::new(&store, &shopper, &(), &crate::navigation::StayPut);
        assert!(matches!(
            checkout.place_order(None),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_address_falls_back_to_profile() {
        let store = MemoryStore::new();
        let shopper = || Some(ada(None));
        let checkout = CheckoutService::new(&store, &shopper, &(), &crate::navigation::StayPut);
        let carts = CartStore::new(&store, &shopper, &());
        carts.add_to_cart(&product(1, "3.50")).unwrap();

        assert!(matches!(
            checkout.place_order(Some("   ")),
            Err(CheckoutError::MissingAddress)
        ));
        assert_eq!(carts.cart_count(), 1);

        let receipt = checkout.place_order(Some("221B Baker Street")).unwrap();
        assert_eq!(receipt.shipping_address, "221B Baker Street");
    }

    #[test]
    fn test_place_order_records_receipt_and_clears_cart() {
        let store = MemoryStore::new();
        let visited = RefCell::new(Vec::new());
        let nav = |d: Destination| visited.borrow_mut().push(d);
        let shopper = || Some(ada(Some("12 St James's Square")));
        let checkout = CheckoutService::new(&store, &shopper, &(), &nav);
        let carts = CartStore::new(&store, &shopper, &());

        carts.add_to_cart(&product(1, "10.00")).unwrap();
        carts.add_to_cart(&product(2, "2.25")).unwrap();
        carts.update_quantity(ProductId::new(2), 1);

        let summary = checkout.begin().unwrap();
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total, "14.50");

        let receipt = checkout.place_order(None).unwrap();
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.total.display(), "14.50");
        assert_eq!(receipt.shipping_address, "12 St James's Square");
        assert_eq!(receipt.items.len(), 2);

        assert!(carts.get_cart().is_empty());
        assert_eq!(checkout.order_history(), vec![receipt.clone()]);
        assert_eq!(
            *visited.borrow(),
            vec![Destination::OrderConfirmation(receipt.id)]
        );
    }
}

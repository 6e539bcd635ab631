//! UI surfaces that mirror the cart.
//!
//! The cart store calls [`CartViews::cart_changed`] after every write, before
//! returning to its caller, so anything displayed is consistent with the
//! persisted cart as soon as an operation completes. The store does not know
//! how anything is drawn.
//!
//! [`ViewHub`] is the usual implementation: an optional count badge and an
//! optional mounted checkout listing, either of which may be missing.

use std::cell::Cell;

use crate::models::Cart;

/// Receiver of cart refreshes. The default does nothing.
pub trait CartViews {
    fn cart_changed(&self, _cart: &Cart) {}
}

/// No surfaces at all.
impl CartViews for () {}

/// The cart-count indicator (a navbar badge, a status line).
pub trait CountBadge {
    fn set_text(&self, value: &str);
    fn set_hidden(&self, hidden: bool);
}

/// A checkout listing that can be redrawn from a cart.
pub trait CheckoutListing {
    fn render(&self, cart: &Cart);
}

/// Dispatches cart refreshes to whichever surfaces are present.
#[derive(Default)]
pub struct ViewHub<'a> {
    badge: Option<&'a dyn CountBadge>,
    checkout: Cell<Option<&'a dyn CheckoutListing>>,
}

impl<'a> ViewHub<'a> {
    /// A hub with no surfaces.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the count badge.
    #[must_use]
    pub fn with_badge(mut self, badge: &'a dyn CountBadge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Mount a checkout listing; it is re-rendered on every cart change
    /// until [`unmount_checkout`](Self::unmount_checkout).
    pub fn mount_checkout(&self, listing: &'a dyn CheckoutListing) {
        self.checkout.set(Some(listing));
    }

    pub fn unmount_checkout(&self) {
        self.checkout.set(None);
    }

    #[must_use]
    pub fn checkout_mounted(&self) -> bool {
        self.checkout.get().is_some()
    }
}

impl CartViews for ViewHub<'_> {
    fn cart_changed(&self, cart: &Cart) {
        if let Some(badge) = self.badge {
            let count = cart.count();
            badge.set_text(&count.to_string());
            badge.set_hidden(count == 0);
        }
        if let Some(listing) = self.checkout.get() {
            listing.render(cart);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use corner_shop_core::ProductId;

    use super::*;
    use crate::models::LineItem;

    #[derive(Default)]
    struct Badge {
        text: RefCell<String>,
        hidden: Cell<bool>,
    }

    impl CountBadge for Badge {
        fn set_text(&self, value: &str) {
            value.clone_into(&mut self.text.borrow_mut());
        }

        fn set_hidden(&self, hidden: bool) {
            self.hidden.set(hidden);
        }
    }

    #[derive(Default)]
    struct Listing {
        renders: Cell<usize>,
    }

    impl CheckoutListing for Listing {
        fn render(&self, _cart: &Cart) {
            self.renders.set(self.renders.get() + 1);
        }
    }

    fn cart_with(qty: u32) -> Cart {
        Cart::from(vec![LineItem {
            id: ProductId::new(1),
            title: "Mug".to_owned(),
            price: corner_shop_core::Price::ZERO,
            image: String::new(),
            description: String::new(),
            qty,
        }])
    }

    #[test]
    fn test_badge_shows_count_and_hides_at_zero() {
        let badge = Badge::default();
        let hub = ViewHub::new().with_badge(&badge);

        hub.cart_changed(&cart_with(3));
        assert_eq!(*badge.text.borrow(), "3");
        assert!(!badge.hidden.get());

        hub.cart_changed(&Cart::new());
        assert_eq!(*badge.text.borrow(), "0");
        assert!(badge.hidden.get());
    }

    #[test]
    fn test_checkout_renders_only_while_mounted() {
        let listing = Listing::default();
        let hub = ViewHub::new();

        hub.cart_changed(&cart_with(1));
        assert_eq!(listing.renders.get(), 0);

        hub.mount_checkout(&listing);
        assert!(hub.checkout_mounted());
        hub.cart_changed(&cart_with(1));
        assert_eq!(listing.renders.get(), 1);

        hub.unmount_checkout();
        hub.cart_changed(&cart_with(1));
        assert_eq!(listing.renders.get(), 1);
    }

    #[test]
    fn test_missing_surfaces_are_noops() {
        ViewHub::new().cart_changed(&cart_with(2));
        ().cart_changed(&cart_with(2));
    }
}

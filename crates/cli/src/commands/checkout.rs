//! Checkout and order history.

use corner_shop_storefront::error::{Result, add_breadcrumb};
use corner_shop_storefront::services::{AuthService, CheckoutService};
use corner_shop_storefront::views::ViewHub;

use super::Shop;
use crate::terminal::{StatusBadge, TerminalNavigator, print_cart, print_receipt, say};

/// Show the checkout page, or place the order when `place` is set.
pub fn checkout(shop: &Shop, address: Option<&str>, place: bool) -> Result<()> {
    let auth = AuthService::new(&shop.store);
    let badge = StatusBadge::default();
    let views = ViewHub::new().with_badge(&badge);
    let checkout = CheckoutService::new(&shop.store, &auth, &views, &TerminalNavigator);

    let summary = checkout.begin()?;
    if !place {
        say(&format!("Checkout for {} <{}>", summary.shopper.name, summary.shopper.email));
        print_cart(&summary.cart);
        if !summary.cart.is_empty() {
            say("Run `shop checkout --place` to buy.");
        }
        return Ok(());
    }

    let receipt = checkout.place_order(address)?;
    let order_id = receipt.id.to_string();
    add_breadcrumb("checkout", "Placed order", Some(&[("order_id", order_id.as_str())]));
    print_receipt(&receipt);
    badge.print();
    Ok(())
}

pub fn orders(shop: &Shop) {
    let auth = AuthService::new(&shop.store);
    let checkout = CheckoutService::new(&shop.store, &auth, &(), &TerminalNavigator);

    let history = checkout.order_history();
    if history.is_empty() {
        say("No orders yet.");
    }
    for receipt in &history {
        print_receipt(receipt);
    }
}

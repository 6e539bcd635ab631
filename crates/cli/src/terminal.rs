//! Terminal renditions of the storefront UI surfaces.

#![allow(clippy::print_stdout)]

use std::cell::{Cell, RefCell};

use corner_shop_storefront::models::{Cart, OrderReceipt, Product};
use corner_shop_storefront::navigation::{Destination, Navigator};
use corner_shop_storefront::views::{CheckoutListing, CountBadge};

/// Cart-count indicator shown as a status line after a command.
#[derive(Default)]
pub struct StatusBadge {
    text: RefCell<String>,
    hidden: Cell<bool>,
    touched: Cell<bool>,
}

impl StatusBadge {
    /// Print the badge if the cart changed during this command and it is
    /// not hidden.
    pub fn print(&self) {
        if self.touched.get() && !self.hidden.get() {
            println!("[cart: {}]", self.text.borrow());
        } else if self.touched.get() {
            println!("[cart empty]");
        }
    }
}

impl CountBadge for StatusBadge {
    fn set_text(&self, value: &str) {
        value.clone_into(&mut self.text.borrow_mut());
        self.touched.set(true);
    }

    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
        self.touched.set(true);
    }
}

/// Checkout listing printed as a table.
pub struct CartTable;

impl CheckoutListing for CartTable {
    fn render(&self, cart: &Cart) {
        print_cart(cart);
    }
}

/// Prints where the shopper would have been sent.
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, destination: Destination) {
        match destination {
            Destination::Login => {
                println!("You need to log in first: shop login --email <EMAIL> --password <PASSWORD>");
            }
            Destination::OrderConfirmation(id) => println!("Order confirmed: {id}"),
            other => tracing::debug!(destination = %other, "Navigation"),
        }
    }
}

/// Print a product listing.
pub fn print_products<'p>(products: impl IntoIterator<Item = &'p Product>) {
    for p in products {
        println!("{:>4}  {:>9}  {}  ({})", p.id, p.price.display(), p.title, p.category);
    }
}

/// Print the lines and total of a cart.
pub fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    println!("{:>4}  {:>4}  {:>9}  {:>10}  Title", "Id", "Qty", "Price", "Subtotal");
    for item in cart {
        println!(
            "{:>4}  {:>4}  {:>9}  {:>10}  {}",
            item.id,
            item.qty,
            item.price.display(),
            item.line_total().display(),
            item.title
        );
    }
    println!("Total: {} ({} items)", cart.total().display(), cart.count());
}

/// Print one past order.
pub fn print_receipt(receipt: &OrderReceipt) {
    println!(
        "{}  {}  {} items  total {}  ship to {}",
        receipt.id,
        receipt.placed_at.format("%Y-%m-%d %H:%M"),
        receipt.item_count,
        receipt.total.display(),
        receipt.shipping_address
    );
}

/// Print a plain line.
pub fn say(message: &str) {
    println!("{message}");
}

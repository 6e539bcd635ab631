//! Integration tests for Corner Shop.
//!
//! These drive the storefront services end to end over a real store
//! (in-memory or on disk), with the account service acting as the session
//! source exactly as the CLI wires it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart operations, badge and checkout listing refreshes
//! - `session_flow` - Registration, login/logout and per-shopper carts
//! - `checkout_flow` - Checkout gate, orders and history
//! - `persistence` - State surviving a reopened data file

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::cell::{Cell, RefCell};

use secrecy::SecretString;

use corner_shop_core::{Price, ProductId};
use corner_shop_storefront::models::{Cart, Principal, Product};
use corner_shop_storefront::navigation::{Destination, Navigator};
use corner_shop_storefront::services::{AuthService, RegisterRequest};
use corner_shop_storefront::views::{CheckoutListing, CountBadge};

/// Catalog product with the given id and decimal price.
#[must_use]
pub fn product(id: u64, title: &str, price: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        price: price.parse::<Price>().unwrap(),
        description: format!("{title} description"),
        category: "test".to_owned(),
        image: format!("https://img.example/{id}.png"),
    }
}

/// Register an account and log it in.
pub fn sign_in(auth: &AuthService<'_>, name: &str, email: &str) -> Principal {
    let password = format!("{name}-password");
    auth.register(RegisterRequest {
        name: name.to_owned(),
        email: email.to_owned(),
        password: SecretString::from(password.clone()),
        address: Some(format!("1 {name} Street")),
    })
    .unwrap();
    auth.login(email, &SecretString::from(password)).unwrap()
}

/// Count badge that remembers its state and how often it was touched.
#[derive(Default)]
pub struct RecordingBadge {
    pub text: RefCell<String>,
    pub hidden: Cell<bool>,
    pub updates: Cell<usize>,
}

impl CountBadge for RecordingBadge {
    fn set_text(&self, value: &str) {
        value.clone_into(&mut self.text.borrow_mut());
        self.updates.set(self.updates.get() + 1);
    }

    fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }
}

/// Checkout listing that keeps every cart it was asked to draw.
#[derive(Default)]
pub struct RecordingListing {
    pub renders: RefCell<Vec<Cart>>,
}

impl RecordingListing {
    #[must_use]
    pub fn last(&self) -> Option<Cart> {
        self.renders.borrow().last().cloned()
    }
}

impl CheckoutListing for RecordingListing {
    fn render(&self, cart: &Cart) {
        self.renders.borrow_mut().push(cart.clone());
    }
}

/// Navigator that records destinations instead of going anywhere.
#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: RefCell<Vec<Destination>>,
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, destination: Destination) {
        self.visited.borrow_mut().push(destination);
    }
}

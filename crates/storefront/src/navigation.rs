//! Page navigation seam.
//!
//! Services that need to send the shopper elsewhere (checkout without a
//! login) go through a [`Navigator`], so a front-end can perform the
//! redirect and a test can just record it.

use core::fmt;

use uuid::Uuid;

/// Where a shopper can be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    OrderConfirmation(Uuid),
}

impl Destination {
    /// Path-style name of the destination.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::OrderConfirmation(id) => format!("/orders/{id}"),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs navigation.
pub trait Navigator {
    fn navigate_to(&self, destination: Destination);
}

impl<F> Navigator for F
where
    F: Fn(Destination),
{
    fn navigate_to(&self, destination: Destination) {
        self(destination);
    }
}

/// Ignores every navigation request.
#[derive(Debug, Default, Clone, Copy)]
pub struct StayPut;

impl Navigator for StayPut {
    fn navigate_to(&self, destination: Destination) {
        tracing::debug!(%destination, "Navigation ignored");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Destination::Login.to_string(), "/login");
        let id = Uuid::nil();
        assert_eq!(
            Destination::OrderConfirmation(id).path(),
            "/orders/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_closure_navigator_records() {
        let seen = RefCell::new(Vec::new());
        let nav = |d: Destination| seen.borrow_mut().push(d);
        nav.navigate_to(Destination::Login);
        StayPut.navigate_to(Destination::OrderConfirmation(Uuid::nil()));
        assert_eq!(*seen.borrow(), vec![Destination::Login]);
    }
}

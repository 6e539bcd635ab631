//! Cart namespace resolution.
//!
//! Each shopper's cart lives under its own storage key, derived from whoever
//! is logged in at the moment of the call:
//!
//! | Session | Key |
//! |---|---|
//! | nobody logged in | `cart_guest` |
//! | `ada@example.com` | `cart_ada@example.com` |
//!
//! The key is never cached. A login or logout between two cart operations
//! must move the second one to the other namespace.

use core::fmt;

use corner_shop_core::Email;

use crate::models::Principal;
use crate::models::session::keys;

/// Read access to the active session principal.
pub trait PrincipalSource {
    /// The logged-in shopper, or `None` for a guest.
    fn current_principal(&self) -> Option<Principal>;
}

impl<F> PrincipalSource for F
where
    F: Fn() -> Option<Principal>,
{
    fn current_principal(&self) -> Option<Principal> {
        self()
    }
}

/// Storage namespace of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CartNamespace {
    Guest,
    Shopper(Email),
}

impl CartNamespace {
    /// The storage key for this namespace.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Guest => keys::GUEST_CART.to_owned(),
            Self::Shopper(email) => format!("{}{email}", keys::CART_PREFIX),
        }
    }

    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }
}

impl fmt::Display for CartNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Derive the cart namespace from the current principal.
#[must_use]
pub fn resolve_namespace(principals: &dyn PrincipalSource) -> CartNamespace {
    principals
        .current_principal()
        .map_or(CartNamespace::Guest, |p| CartNamespace::Shopper(p.email))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn guest() -> Option<Principal> {
        None
    }

    fn shopper(email: &str) -> Principal {
        Principal {
            name: "Test".to_owned(),
            email: Email::parse(email).unwrap(),
            password: "secret1".to_owned(),
            address: None,
        }
    }

    #[test]
    fn test_guest_namespace() {
        let ns = resolve_namespace(&guest);
        assert_eq!(ns, CartNamespace::Guest);
        assert_eq!(ns.key(), "cart_guest");
    }

    #[test]
    fn test_shopper_namespace() {
        let ns = resolve_namespace(&|| Some(shopper("ada@example.com")));
        assert_eq!(ns.key(), "cart_ada@example.com");
        assert!(!ns.is_guest());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let source = || Some(shopper("ada@example.com"));
        assert_eq!(resolve_namespace(&source), resolve_namespace(&source));
        assert_eq!(resolve_namespace(&guest), resolve_namespace(&guest));
    }

    #[test]
    fn test_guest_key_never_collides_with_shopper_key() {
        // Even an address whose local part is "guest" keeps its domain in the key
        for email in ["guest@example.com", "g@x", "cart@guest", "a@guest"] {
            let ns = resolve_namespace(&|| Some(shopper(email)));
            assert_ne!(ns.key(), CartNamespace::Guest.key(), "{email}");
        }
    }

    #[test]
    fn test_display_matches_key() {
        let ns = CartNamespace::Shopper(Email::parse("b@c.d").unwrap());
        assert_eq!(ns.to_string(), "cart_b@c.d");
    }
}

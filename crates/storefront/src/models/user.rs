//! Shopper account types.

use serde::{Deserialize, Serialize};

use corner_shop_core::Email;

/// A registered shopper, as persisted in the account list and as the
/// active session principal.
///
/// The password is kept in plaintext; this store is a local demo surface,
/// not a credential vault. `Debug` is implemented manually to redact it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Display name.
    pub name: String,
    /// Unique identity; also keys the shopper's cart namespace.
    pub email: Email,
    /// Plaintext password.
    pub password: String,
    /// Default shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl std::fmt::Debug for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Principal")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ada() -> Principal {
        Principal {
            name: "Ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            password: "hunter22".to_owned(),
            address: None,
        }
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", ada());
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_address_is_optional_in_json() {
        let json = serde_json::to_value(ada()).unwrap();
        assert!(json.get("address").is_none());

        let parsed: Principal = serde_json::from_str(
            r#"{"name":"Ada","email":"ada@example.com","password":"hunter22"}"#,
        )
        .unwrap();
        assert_eq!(parsed, ada());
    }
}

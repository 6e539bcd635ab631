//! Accounts, sessions and per-shopper cart namespaces.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use corner_shop_core::ProductId;
use corner_shop_integration_tests::{product, sign_in};
use corner_shop_storefront::identity::{CartNamespace, PrincipalSource};
use corner_shop_storefront::services::{AuthError, AuthService, CartStore, ProfileUpdate, RegisterRequest};
use corner_shop_storefront::storage::MemoryStore;

#[test]
fn test_each_shopper_sees_only_their_cart() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    let carts = CartStore::new(&store, &auth, &());

    sign_in(&auth, "ada", "ada@example.com");
    carts.add_to_cart(&product(1, "Backpack", "109.95")).unwrap();
    carts.update_quantity(ProductId::new(1), 2);
    auth.logout();

    sign_in(&auth, "bob", "bob@example.com");
    assert!(carts.get_cart().is_empty());
    carts.add_to_cart(&product(2, "Jacket", "55.99")).unwrap();
    auth.logout();

    auth.login("ada@example.com", &SecretString::from("ada-password".to_owned()))
        .unwrap();
    let cart = carts.get_cart();
    assert_eq!(cart.count(), 3);
    assert!(!cart.contains(ProductId::new(2)));
}

#[test]
fn test_logout_switches_same_store_to_guest_namespace() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    let carts = CartStore::new(&store, &auth, &());

    let ada = sign_in(&auth, "ada", "ada@example.com");
    assert_eq!(carts.namespace(), CartNamespace::Shopper(ada.email));
    carts.add_to_cart(&product(1, "Backpack", "109.95")).unwrap();

    auth.logout();
    assert_eq!(carts.namespace(), CartNamespace::Guest);
    assert!(carts.get_cart().is_empty());
    assert_eq!(carts.cart_count(), 0);
}

#[test]
fn test_login_is_case_insensitive_on_email() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    sign_in(&auth, "ada", "ada@example.com");
    auth.logout();

    let principal = auth
        .login("  ADA@Example.com ", &SecretString::from("ada-password".to_owned()))
        .unwrap();
    assert_eq!(principal.email.as_str(), "ada@example.com");
    assert!(auth.current_principal().is_some());
}

#[test]
fn test_wrong_password_leaves_session_untouched() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    sign_in(&auth, "ada", "ada@example.com");
    auth.logout();

    let err = auth
        .login("ada@example.com", &SecretString::from("not-it".to_owned()))
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(auth.current_principal().is_none());
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    sign_in(&auth, "ada", "ada@example.com");

    let err = auth
        .register(RegisterRequest {
            name: "Imposter".to_owned(),
            email: "Ada@example.com".to_owned(),
            password: SecretString::from("hunter22".to_owned()),
            address: None,
        })
        .unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists));
    assert_eq!(auth.users().len(), 1);
}

#[test]
fn test_profile_update_keeps_cart_and_changes_password() {
    let store = MemoryStore::new();
    let auth = AuthService::new(&store);
    let carts = CartStore::new(&store, &auth, &());
    sign_in(&auth, "ada", "ada@example.com");
    carts.add_to_cart(&product(1, "Backpack", "109.95")).unwrap();

    let updated = auth
        .update_profile(ProfileUpdate {
            name: Some("Ada Lovelace".to_owned()),
            password: Some(SecretString::from("engine42".to_owned())),
            ..ProfileUpdate::default()
        })
        .unwrap();
    assert_eq!(updated.name, "Ada Lovelace");
    assert_eq!(carts.cart_count(), 1);

    auth.logout();
    assert!(
        auth.login("ada@example.com", &SecretString::from("ada-password".to_owned()))
            .is_err()
    );
    assert!(
        auth.login("ada@example.com", &SecretString::from("engine42".to_owned()))
            .is_ok()
    );
}

//! Cart commands.
//!
//! Quantity changes happen "on the checkout page", so the cart table is
//! mounted for them and redrawn by the cart store after the write.

use corner_shop_core::ProductId;
use corner_shop_storefront::error::{Result, add_breadcrumb};
use corner_shop_storefront::services::{AuthService, CartError, CartStore};
use corner_shop_storefront::views::ViewHub;

use super::Shop;
use crate::terminal::{CartTable, StatusBadge, print_cart, say};

pub fn show(shop: &Shop) {
    let auth = AuthService::new(&shop.store);
    let carts = CartStore::new(&shop.store, &auth, &());

    let cart = match carts.try_get_cart() {
        Ok(cart) => cart,
        Err(e @ CartError::MalformedStorage { .. }) => {
            tracing::warn!(error = %e, "Showing unreadable cart as empty");
            say("Your saved cart could not be read and will be replaced on the next change.");
            carts.get_cart()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Unexpected cart error");
            carts.get_cart()
        }
    };
    say(&format!("Cart {}:", carts.namespace()));
    print_cart(&cart);
}

pub async fn add(shop: &Shop, id: ProductId) -> Result<()> {
    let auth = AuthService::new(&shop.store);
    let badge = StatusBadge::default();
    let views = ViewHub::new().with_badge(&badge);
    let carts = CartStore::new(&shop.store, &auth, &views);

    carts.ensure_can_add()?;
    let product = shop.catalog.find_product(id).await?;
    carts.add_to_cart(&product)?;
    let product_id = id.to_string();
    add_breadcrumb("cart", "Added product", Some(&[("product_id", product_id.as_str())]));
    say(&format!("Added {} to your cart.", product.title));
    badge.print();
    Ok(())
}

pub fn adjust(shop: &Shop, id: ProductId, delta: i64) {
    let auth = AuthService::new(&shop.store);
    let badge = StatusBadge::default();
    let views = ViewHub::new().with_badge(&badge);
    views.mount_checkout(&CartTable);
    let carts = CartStore::new(&shop.store, &auth, &views);

    if !carts.get_cart().contains(id) {
        say(&format!("Product {id} is not in your cart."));
    }
    carts.update_quantity(id, delta);
    let (product_id, delta) = (id.to_string(), delta.to_string());
    add_breadcrumb(
        "cart",
        "Changed quantity",
        Some(&[("product_id", product_id.as_str()), ("delta", delta.as_str())]),
    );
    badge.print();
}

pub fn remove(shop: &Shop, id: ProductId) {
    let auth = AuthService::new(&shop.store);
    let badge = StatusBadge::default();
    let views = ViewHub::new().with_badge(&badge);
    views.mount_checkout(&CartTable);
    let carts = CartStore::new(&shop.store, &auth, &views);

    carts.remove_item(id);
    let product_id = id.to_string();
    add_breadcrumb("cart", "Removed product", Some(&[("product_id", product_id.as_str())]));
    badge.print();
}

//! Product browsing.

use corner_shop_storefront::catalog;
use corner_shop_storefront::error::Result;

use super::Shop;
use crate::terminal::{print_products, say};

/// List products, optionally limited to one category.
pub async fn list(shop: &Shop, category: Option<&str>) -> Result<()> {
    let products = shop.catalog.fetch_products().await?;

    match category {
        Some(category) => {
            let matching = catalog::filter_by_category(&products, category);
            if matching.is_empty() {
                say(&format!("No products in category '{category}'."));
            }
            print_products(matching);
        }
        None => print_products(&products),
    }
    Ok(())
}

/// List the catalog's categories.
pub async fn categories(shop: &Shop) -> Result<()> {
    let products = shop.catalog.fetch_products().await?;
    for category in catalog::categories(&products) {
        say(&category);
    }
    Ok(())
}

//! Public product catalog client.
//!
//! The catalog is a read-only JSON endpoint (`GET {base}/products`) that
//! returns every product in one array. Each call is a single request: no
//! caching and no retry.
//!
//! # Example
//!
//! ```rust,ignore
//! use corner_shop_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(base_url, Duration::from_secs(10))?;
//! let products = client.fetch_products().await?;
//! let backpack = client.find_product(ProductId::new(1)).await?;
//! ```

use std::collections::BTreeSet;
use std::time::Duration;

use thiserror::Error;
use tracing::instrument;
use url::Url;

use corner_shop_core::ProductId;

use crate::models::Product;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Status {
        status: u16,
        /// First part of the response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid catalog URL.
    #[error("invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// No product with this id.
    #[error("product {0} not found")]
    NotFound(ProductId),
}

/// Client for the product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the catalog rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` if the HTTP client cannot be built.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        // `Url::join` replaces the last segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("corner-shop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// URL of the product listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Url` if the path cannot be joined.
    pub fn products_url(&self) -> Result<Url, CatalogError> {
        Ok(self.base_url.join("products")?)
    }

    /// Fetch every product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Http` on transport failure,
    /// `CatalogError::Status` on a non-success response, and
    /// `CatalogError::Parse` if the body is not a product array.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.products_url()?).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let products = parse_products(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
        })?;

        tracing::debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetch the catalog and pick out one product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the catalog has no such id, or
    /// any error from [`fetch_products`](Self::fetch_products).
    pub async fn find_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch_products()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

/// Decode a catalog response body.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if `body` is not a JSON array of products.
pub fn parse_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    Ok(serde_json::from_str(body)?)
}

/// Products in `category` (case-insensitive), in catalog order.
#[must_use]
pub fn filter_by_category<'p>(products: &'p [Product], category: &str) -> Vec<&'p Product> {
    products
        .iter()
        .filter(|p| p.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Distinct non-empty categories, sorted.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .filter(|p| !p.category.is_empty())
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 5,
            "title": "John Hardy Women's Legends Naga Bracelet",
            "price": 695,
            "description": "From our Legends Collection.",
            "category": "jewelery",
            "image": "https://fakestoreapi.com/img/71pWzhdJNwL._AC_UL640_QL65_ML3_.jpg"
        },
        {
            "id": 9,
            "title": "WD 2TB Elements Portable External Hard Drive",
            "price": 64,
            "description": "USB 3.0 and USB 2.0 compatibility.",
            "category": "electronics",
            "image": "https://fakestoreapi.com/img/61IBBVJvSDL._AC_SY879_.jpg"
        }
    ]"#;

    #[test]
    fn test_parse_products() {
        let products = parse_products(SAMPLE).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[0].price.display(), "109.95");
        assert_eq!(products[1].price.display(), "695.00");
    }

    #[test]
    fn test_parse_tolerates_missing_optional_fields() {
        let products = parse_products(r#"[{"id":3,"title":"Mug","price":4.5}]"#).unwrap();
        assert_eq!(products[0].category, "");
        assert_eq!(products[0].image, "");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_products(r#"{"message":"rate limited"}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_filter_and_categories() {
        let products = parse_products(SAMPLE).unwrap();
        let jewelry = filter_by_category(&products, "JEWELERY");
        assert_eq!(jewelry.len(), 1);
        assert_eq!(jewelry[0].id, ProductId::new(5));
        assert_eq!(
            categories(&products),
            vec!["electronics", "jewelery", "men's clothing"]
        );
    }

    #[test]
    fn test_products_url_keeps_base_path() {
        let timeout = Duration::from_secs(1);
        let root = CatalogClient::new(Url::parse("https://fakestoreapi.com").unwrap(), timeout)
            .unwrap();
        assert_eq!(
            root.products_url().unwrap().as_str(),
            "https://fakestoreapi.com/products"
        );

        let nested =
            CatalogClient::new(Url::parse("http://localhost:8080/api/v1").unwrap(), timeout)
                .unwrap();
        assert_eq!(
            nested.products_url().unwrap().as_str(),
            "http://localhost:8080/api/v1/products"
        );
    }
}

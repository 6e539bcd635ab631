//! Command implementations.
//!
//! Each command builds the services it needs over the shared [`Shop`]
//! resources, the way a page handler would for one request.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;

use corner_shop_storefront::catalog::CatalogClient;
use corner_shop_storefront::storage::FileStore;

/// Resources shared by every command.
pub struct Shop {
    pub store: FileStore,
    pub catalog: CatalogClient,
}

//! Corner Shop Storefront library.
//!
//! Shopper-side state for a storefront whose only backend is a public
//! product catalog: accounts, the session, per-shopper carts, checkout and
//! order history, all persisted as JSON in a flat key-value store.
//!
//! # Architecture
//!
//! - [`identity`] - derives the cart namespace from the session principal
//! - [`services`] - cart, auth and checkout operations over a borrowed store
//! - [`storage`] - the key-value seam plus memory and file implementations
//! - [`views`] / [`navigation`] - UI seams the services call back into
//! - [`catalog`] - the one network call, fetching products
//!
//! Everything except the catalog is synchronous; an operation runs to
//! completion, persisting and refreshing views, before it returns.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod error;
pub mod identity;
pub mod models;
pub mod navigation;
pub mod services;
pub mod storage;
pub mod views;

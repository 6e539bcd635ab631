//! Corner Shop Core - Shared types library.
//!
//! This crate provides common types used across all Corner Shop components:
//! - `storefront` - Cart, session, checkout and catalog services
//! - `cli` - Terminal front-end for browsing and buying
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

//! KopiKU Core - Shared types and cart model.
//!
//! This crate provides the common types used across all KopiKU components:
//! - `storefront` - Catalog client, cart store, auth session, checkout
//! - `cli` - Command-line storefront driver
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP
//! clients, no storage access. The cart collection lives here because its
//! merge/removal semantics are pure; everything that touches storage or the
//! network lives in `kopiku-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, and catalog products
//! - [`cart`] - The cart collection and its line items

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;

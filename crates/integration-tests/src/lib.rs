//! Integration tests for KopiKU.
//!
//! These run against real file-backed storage in per-test temporary
//! directories, so they exercise the same persistence path the CLI uses.
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round trips across store instances
//! - `auth_session` - Demo session sign-in/out persistence
//! - `checkout_flow` - End-to-end browse-less checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tempfile::TempDir;

use kopiku_core::{CartProduct, Price, ProductId};
use kopiku_storefront::storage::FileStorage;

/// A file storage rooted in a temporary directory that lives as long as
/// the context.
pub struct TestContext {
    _dir: TempDir,
    storage: Arc<FileStorage>,
}

impl TestContext {
    /// Create a fresh context with its own empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp data dir");
        let storage = Arc::new(FileStorage::new(dir.path()));
        Self { _dir: dir, storage }
    }

    /// The file storage for this context.
    #[must_use]
    pub fn storage(&self) -> Arc<FileStorage> {
        Arc::clone(&self.storage)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed espresso product for cart fixtures.
#[must_use]
pub fn espresso() -> CartProduct {
    CartProduct {
        id: ProductId::new("1"),
        name: "Espresso".to_string(),
        price: Price::new(25000),
        image: "https://example.com/espresso.jpg".to_string(),
    }
}

/// A fixed latte product for cart fixtures.
#[must_use]
pub fn latte() -> CartProduct {
    CartProduct {
        id: ProductId::new("2"),
        name: "Latte".to_string(),
        price: Price::new(30000),
        image: "https://example.com/latte.jpg".to_string(),
    }
}

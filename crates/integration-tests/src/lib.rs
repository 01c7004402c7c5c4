//! Integration tests for Go Marketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart behaviour end to end against the file-backed store
//! - `cart_persistence` - Snapshots surviving a restart, and damaged storage

use std::path::Path;
use std::sync::Arc;

use go_marketplace_cart::{CartStore, DEFAULT_STORAGE_KEY, FileStore};
use go_marketplace_core::{NewProduct, Price};

/// Open the cart persisted in `dir`, as the application does at startup.
pub async fn open_cart(dir: &Path) -> CartStore {
    CartStore::load(Arc::new(FileStore::new(dir)), DEFAULT_STORAGE_KEY).await
}

/// Write a raw snapshot blob into `dir`.
///
/// # Panics
///
/// Panics if the file cannot be written.
#[allow(clippy::expect_used)]
pub fn write_snapshot(dir: &Path, blob: &str) {
    let path = FileStore::new(dir).path_for(DEFAULT_STORAGE_KEY);
    std::fs::create_dir_all(dir).expect("create snapshot dir");
    std::fs::write(path, blob).expect("write snapshot");
}

/// Read the raw snapshot blob from `dir`, if any.
#[must_use]
pub fn read_snapshot(dir: &Path) -> Option<String> {
    std::fs::read_to_string(FileStore::new(dir).path_for(DEFAULT_STORAGE_KEY)).ok()
}

/// The "Shirt" product used in the cart scenarios.
#[must_use]
pub fn shirt() -> NewProduct {
    NewProduct::new("p1", "Shirt", "u", Price::from(10))
}

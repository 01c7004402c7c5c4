//! Go Marketplace Cart - Persisted shopping cart state.
//!
//! Keeps the user's cart in memory and mirrors it to local key-value storage so
//! it survives restarts.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the line items and writes a JSON snapshot to storage
//!   after every mutation, one mutation at a time
//! - [`KeyValueStore`] is the storage port; [`MemoryStore`] and [`FileStore`]
//!   are the bundled backends
//! - [`CartProvider`] is how UI code reaches the mounted store
//!
//! # Example
//!
//! ```rust
//! # use std::sync::Arc;
//! # use go_marketplace_cart::{CartStore, MemoryStore, DEFAULT_STORAGE_KEY};
//! # use go_marketplace_core::{NewProduct, Price, ProductId};
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), go_marketplace_cart::CartError> {
//! let cart = CartStore::load(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY).await;
//!
//! cart.add_to_cart(NewProduct::new("p1", "Shirt", "u", Price::from(10))).await;
//! cart.increment(&ProductId::new("p1")).await?;
//! assert_eq!(cart.item_count(), 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError, DEFAULT_STORAGE_KEY};
pub use error::{CartError, Result};
pub use provider::CartProvider;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, LoadOutcome, QuantityChange};

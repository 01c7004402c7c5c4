//! The cart state container.
//!
//! [`CartStore`] owns the authoritative list of line items and mirrors it to a
//! [`KeyValueStore`] after every mutation.
//!
//! # Consistency
//!
//! Each mutation holds the state lock across the in-memory change *and* the
//! storage write, so overlapping calls are applied one at a time and the
//! persisted snapshot always equals the in-memory list at the time of the
//! write. Readers never take the lock: they read the last published snapshot,
//! which is replaced once a mutation has finished.
//!
//! # Storage failures
//!
//! A failed write is logged and leaves the in-memory state authoritative.
//! [`CartStore::is_synced`] turns false until a later mutation or
//! [`CartStore::flush`] writes the full state again.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use go_marketplace_core::{NewProduct, Price, Product, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::storage::{FileStore, KeyValueStore};

/// What [`CartStore::load`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot was stored; the cart starts empty.
    Empty,
    /// A snapshot was adopted.
    Restored {
        /// Line items adopted from the snapshot.
        items: usize,
    },
    /// The stored snapshot could not be decoded; the cart starts empty.
    Corrupt,
    /// Storage could not be read; the cart starts empty.
    Unavailable,
}

/// Result of a successful [`CartStore::decrement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line item remains with this quantity.
    Updated(u32),
    /// The quantity reached zero and the line item was removed.
    Removed,
}

/// Persisted shopping cart.
///
/// Cheaply cloneable via `Arc`; clones share the same state.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    products: Mutex<Vec<Product>>,
    snapshot: watch::Sender<Vec<Product>>,
    synced: AtomicBool,
    load_outcome: LoadOutcome,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("products", &*self.inner.snapshot.borrow())
            .field("synced", &self.is_synced())
            .field("load_outcome", &self.inner.load_outcome)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart snapshot stored under `key` and build a store around it.
    ///
    /// A missing, unreadable, or malformed snapshot yields an empty cart; the
    /// condition is logged and reported by [`CartStore::load_outcome`]. Inside
    /// a well-formed array, entries that fail to decode are skipped one by one.
    pub async fn load(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();

        let (products, outcome, clean) = match storage.get(&key).await {
            Ok(None) => (Vec::new(), LoadOutcome::Empty, true),
            Ok(Some(blob)) => match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
                Ok(entries) => {
                    let (decoded, skipped) = decode_entries(&key, entries);
                    let (products, normalized) = normalize(decoded);
                    if !normalized {
                        warn!(key = %key, "Cart snapshot had zero-quantity or duplicate entries");
                    }
                    let items = products.len();
                    (products, LoadOutcome::Restored { items }, normalized && skipped == 0)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding malformed cart snapshot");
                    (Vec::new(), LoadOutcome::Corrupt, false)
                }
            },
            Err(e) => {
                error!(key = %key, error = %e, "Failed to read cart snapshot");
                (Vec::new(), LoadOutcome::Unavailable, false)
            }
        };

        info!(key = %key, outcome = ?outcome, "Cart loaded");

        let (snapshot, _) = watch::channel(products.clone());
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key,
                products: Mutex::new(products),
                snapshot,
                synced: AtomicBool::new(clean),
                load_outcome: outcome,
            }),
        }
    }

    /// Load the cart from the file-backed store described by `config`.
    pub async fn open(config: &CartConfig) -> Self {
        let storage = Arc::new(FileStore::new(&config.storage_dir));
        Self::load(storage, config.storage_key.clone()).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `item` to the cart.
    ///
    /// An existing line item with the same ID gains one unit and keeps its
    /// stored title, image, and price. Otherwise `item` is appended with a
    /// quantity of 1. Returns the resulting quantity.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_to_cart(&self, item: NewProduct) -> u32 {
        let mut products = self.inner.products.lock().await;

        let quantity = if let Some(line) = products.iter_mut().find(|p| p.id == item.id) {
            line.quantity = line.quantity.saturating_add(1);
            line.quantity
        } else {
            products.push(item.into_line());
            1
        };

        debug!(quantity, "Added to cart");
        self.commit(&products).await;
        quantity
    }

    /// Add one unit to the line item `id`. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if `id` is not in the cart; nothing is
    /// changed or persisted in that case.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<u32> {
        let mut products = self.inner.products.lock().await;

        let Some(line) = products.iter_mut().find(|p| &p.id == id) else {
            warn!("Increment for product not in cart");
            return Err(CartError::NotFound(id.clone()));
        };
        line.quantity = line.quantity.saturating_add(1);
        let quantity = line.quantity;

        debug!(quantity, "Incremented");
        self.commit(&products).await;
        Ok(quantity)
    }

    /// Remove one unit from the line item `id`.
    ///
    /// The line item is dropped when its quantity reaches zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotFound` if `id` is not in the cart; nothing is
    /// changed or persisted in that case.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<QuantityChange> {
        let mut products = self.inner.products.lock().await;

        let Some(index) = products.iter().position(|p| &p.id == id) else {
            warn!("Decrement for product not in cart");
            return Err(CartError::NotFound(id.clone()));
        };

        let remaining = products
            .get(index)
            .map_or(0, |line| line.quantity.saturating_sub(1));
        let change = if remaining == 0 {
            products.remove(index);
            QuantityChange::Removed
        } else {
            if let Some(line) = products.get_mut(index) {
                line.quantity = remaining;
            }
            QuantityChange::Updated(remaining)
        };

        debug!(change = ?change, "Decremented");
        self.commit(&products).await;
        Ok(change)
    }

    /// Remove every line item and delete the stored snapshot.
    #[instrument(skip(self))]
    pub async fn clear(&self) {
        let mut products = self.inner.products.lock().await;
        let removed = products.len();
        products.clear();

        info!(removed, "Cart cleared");
        let result = self
            .inner
            .storage
            .remove(&self.inner.key)
            .await
            .map_err(CartError::from);
        self.settle(result, &products);
    }

    /// Write the current state to storage.
    ///
    /// # Errors
    ///
    /// Returns the storage or serialization error; the in-memory state is
    /// unaffected either way.
    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<()> {
        let products = self.inner.products.lock().await;
        let result = self.persist(&products).await;
        self.inner.synced.store(result.is_ok(), Ordering::Release);
        result
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current line items, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner.snapshot.borrow().clone()
    }

    /// The line item for `id`, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.inner
            .snapshot
            .borrow()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.inner
            .snapshot
            .borrow()
            .iter()
            .fold(0, |acc, p| acc.saturating_add(p.quantity))
    }

    /// Sum of `price * quantity` over all line items.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.inner
            .snapshot
            .borrow()
            .iter()
            .map(Product::line_total)
            .sum()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.snapshot.borrow().is_empty()
    }

    /// Receive a new snapshot after every completed mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.inner.snapshot.subscribe()
    }

    /// Whether storage holds the current state.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.inner.synced.load(Ordering::Acquire)
    }

    /// What was found in storage at startup.
    #[must_use]
    pub fn load_outcome(&self) -> LoadOutcome {
        self.inner.load_outcome
    }

    /// Storage key the snapshot is written under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.inner.key
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Persist `products` and publish them to readers.
    ///
    /// Must be called with the state lock held.
    async fn commit(&self, products: &[Product]) {
        let result = self.persist(products).await;
        self.settle(result, products);
    }

    /// Record the outcome of a storage write and publish `products`.
    fn settle(&self, result: Result<()>, products: &[Product]) {
        match result {
            Ok(()) => self.inner.synced.store(true, Ordering::Release),
            Err(e) => {
                self.inner.synced.store(false, Ordering::Release);
                error!(
                    key = %self.inner.key,
                    error = %e,
                    "Failed to persist cart; keeping in-memory state"
                );
            }
        }
        self.inner.snapshot.send_replace(products.to_vec());
    }

    async fn persist(&self, products: &[Product]) -> Result<()> {
        let payload = serde_json::to_string(products)?;
        self.inner.storage.set(&self.inner.key, &payload).await?;
        Ok(())
    }
}

/// Decode each snapshot entry on its own so one unreadable line item does not
/// discard the rest. Returns the decoded items and how many were skipped.
fn decode_entries(key: &str, entries: Vec<serde_json::Value>) -> (Vec<Product>, usize) {
    let mut products = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Product>(entry) {
            Ok(product) => products.push(product),
            Err(e) => {
                skipped += 1;
                warn!(key, index, error = %e, "Skipping unreadable cart entry");
            }
        }
    }

    (products, skipped)
}

/// Drop zero-quantity entries and fold duplicate IDs into their first
/// occurrence. Returns the cleaned list and whether it was already clean.
fn normalize(decoded: Vec<Product>) -> (Vec<Product>, bool) {
    let mut products: Vec<Product> = Vec::with_capacity(decoded.len());
    let mut clean = true;

    for line in decoded {
        if line.quantity == 0 {
            clean = false;
            continue;
        }
        if let Some(existing) = products.iter_mut().find(|p| p.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(line.quantity);
            clean = false;
        } else {
            products.push(line);
        }
    }

    (products, clean)
}

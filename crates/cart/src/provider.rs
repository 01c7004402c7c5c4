//! Access point for UI code that needs the cart.
//!
//! The application mounts one [`CartStore`] at startup and hands the provider
//! to whatever renders or mutates the cart. Reaching for the cart through an
//! empty provider is a wiring mistake and is reported as
//! [`CartError::MissingProvider`].

use crate::error::{CartError, Result};
use crate::store::CartStore;

/// Holder through which consumers reach the mounted cart.
#[derive(Debug, Clone, Default)]
pub struct CartProvider {
    store: Option<CartStore>,
}

impl CartProvider {
    /// Provider with `store` mounted.
    #[must_use]
    pub const fn new(store: CartStore) -> Self {
        Self { store: Some(store) }
    }

    /// Provider with nothing mounted.
    #[must_use]
    pub const fn empty() -> Self {
        Self { store: None }
    }

    /// Get a handle to the mounted cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::MissingProvider` if no store is mounted.
    pub fn use_cart(&self) -> Result<CartStore> {
        self.store.clone().ok_or(CartError::MissingProvider)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use go_marketplace_core::{NewProduct, Price};

    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_provider_is_configuration_error() {
        let provider = CartProvider::empty();
        assert!(matches!(
            provider.use_cart(),
            Err(CartError::MissingProvider)
        ));
        assert!(matches!(
            CartProvider::default().use_cart(),
            Err(CartError::MissingProvider)
        ));
    }

    #[tokio::test]
    async fn test_handles_share_state() {
        let store = CartStore::load(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY).await;
        let provider = CartProvider::new(store);

        let first = provider.use_cart().unwrap();
        let second = provider.use_cart().unwrap();
        first
            .add_to_cart(NewProduct::new("p1", "Shirt", "u", Price::from(10)))
            .await;

        assert_eq!(second.item_count(), 1);
    }
}

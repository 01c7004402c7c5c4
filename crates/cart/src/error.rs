//! Cart error types.

use go_marketplace_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No line item with this ID is in the cart.
    #[error("product not in cart: {0}")]
    NotFound(ProductId),

    /// The cart was accessed through a provider with no mounted store.
    #[error("cart must be used within a CartProvider")]
    MissingProvider,

    /// Storage backend operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NotFound(ProductId::new("p9"));
        assert_eq!(err.to_string(), "product not in cart: p9");

        let err = CartError::MissingProvider;
        assert_eq!(err.to_string(), "cart must be used within a CartProvider");

        let err = CartError::from(StorageError::Backend("offline".to_string()));
        assert_eq!(err.to_string(), "storage error: storage backend error: offline");
    }
}

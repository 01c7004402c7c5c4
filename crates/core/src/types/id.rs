//! Product identifiers.
//!
//! Product IDs come from the catalog service as opaque strings and are stable
//! across sessions, so the cart uses them as its merge and lookup key.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, catalog-assigned product identifier.
///
/// Serialized transparently as a JSON string.
///
/// # Example
///
/// ```rust
/// # use go_marketplace_core::ProductId;
/// let id = ProductId::new("p1");
/// assert_eq!(id.as_str(), "p1");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        assert_eq!(ProductId::new("sku-42").to_string(), "sku-42");
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let id: ProductId = serde_json::from_str("\"p2\"").unwrap();
        assert_eq!(id, ProductId::from("p2"));
    }

    #[test]
    fn test_rejects_numeric_json() {
        assert!(serde_json::from_str::<ProductId>("42").is_err());
    }
}

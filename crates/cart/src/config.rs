//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Storage key for the cart snapshot (default: `@GoMarketplace:products`)
//! - `CART_STORAGE_DIR` - Directory used by the file-backed store (default: `.go-marketplace`)

use std::path::PathBuf;

use thiserror::Error;

/// Storage key under which the cart snapshot is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Directory used by the file-backed store when none is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".go-marketplace";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// Directory for the file-backed store
    pub storage_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_key = get_or_default(&lookup, "CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let storage_dir = get_or_default(&lookup, "CART_STORAGE_DIR", DEFAULT_STORAGE_DIR);
        if storage_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_DIR".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            storage_key,
            storage_dir: PathBuf::from(storage_dir),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CartConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CartConfig::default());
        assert_eq!(config.storage_key, "@GoMarketplace:products");
    }

    #[test]
    fn test_overrides() {
        let config = CartConfig::from_lookup(lookup_from(&[
            ("CART_STORAGE_KEY", "@Other:cart"),
            ("CART_STORAGE_DIR", "/tmp/cart"),
        ]))
        .unwrap();

        assert_eq!(config.storage_key, "@Other:cart");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/cart"));
    }

    #[test]
    fn test_empty_storage_key_rejected() {
        let result = CartConfig::from_lookup(lookup_from(&[("CART_STORAGE_KEY", "")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "CART_STORAGE_KEY"));
    }

    #[test]
    fn test_blank_storage_dir_rejected() {
        let result = CartConfig::from_lookup(lookup_from(&[("CART_STORAGE_DIR", "  ")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(name, _)) if name == "CART_STORAGE_DIR"));
    }
}

//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_cart::CART_STORAGE_KEY;
use turbo_store::store_key;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// The full store key, including the namespace if one is set.
    pub fn storage_key(&self) -> String {
        match &self.store.namespace {
            Some(namespace) if !namespace.is_empty() => store_key!(namespace.as_str(), self.store.key),
            _ => self.store.key.clone(),
        }
    }

    /// The configured log level.
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid log level: {}", self.logging.level))
    }
}

/// Where the cart is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the store file, relative to the config file's directory.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Key the cart is stored under.
    #[serde(default = "default_key")]
    pub key: String,

    /// Optional prefix, giving `namespace:key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

fn default_store_path() -> String {
    ".cart/store.json".to_string()
}

fn default_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            key: default_key(),
            namespace: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level written to stderr.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cart configuration

[store]
path = "{path}"
key = "{key}"
# namespace = "demo"

[logging]
level = "{level}"
"#,
        path = default_store_path(),
        key = default_key(),
        level = default_level(),
    )
}

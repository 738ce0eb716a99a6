//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use turbo_cart::ShoppingCart;
use turbo_store::FileStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Path the configuration was loaded from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Resolved path of the store file.
    pub fn store_path(&self) -> PathBuf {
        resolve(self.base_dir(), &self.config.store.path)
    }

    /// Open the store and load the cart from it.
    pub fn open_cart(&self) -> ShoppingCart<FileStore> {
        let store = FileStore::open(self.store_path());
        ShoppingCart::with_key(store, self.config.storage_key())
    }
}

/// Find a config file in `start` or any of its parents.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cart.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(dir.path().join("cart.toml")));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("cart.toml"), "").unwrap();
        std::fs::write(nested.join(".cart.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(nested.join(".cart.toml")));
    }

    #[test]
    fn test_store_path_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: Some(dir.path().join("cart.toml")),
            output: Output::new(false, false),
            cwd: PathBuf::from("/somewhere/else"),
        };

        assert_eq!(ctx.store_path(), dir.path().join(".cart/store.json"));
    }

    #[test]
    fn test_open_cart_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.store.namespace = Some("test".to_string());
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, false),
            cwd: dir.path().to_path_buf(),
        };

        let mut cart = ctx.open_cart();
        cart.increase_cart_quantity(1);
        assert_eq!(cart.storage_key(), "test:Shopping-cart");

        let reopened = ctx.open_cart();
        assert_eq!(reopened.get_item_quantity(1), 1);
    }

    #[test]
    fn test_open_cart_recovers_from_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, false),
            cwd: dir.path().to_path_buf(),
        };
        let path = ctx.store_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ truncated").unwrap();

        let mut cart = ctx.open_cart();
        assert!(cart.is_empty());
        assert!(cart.increase_cart_quantity(4).error().is_none());

        assert_eq!(ctx.open_cart().get_item_quantity(4), 1);
    }
}

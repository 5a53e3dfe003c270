//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use doce_cache::{Cache, FileStore};
use doce_commerce::catalog::Catalog;
use doce_commerce::cart::CartStore;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names looked up from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["doce.toml", ".doce.toml", "doce.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart snapshot passed on the command line.
    pub carried_cart: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        output: Output,
        carried_cart: Option<String>,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            carried_cart,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some(config),
                        Err(e) => tracing::warn!(path = %config_path.display(), "{:#}", e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Load the catalog named in the config, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog {
            Some(path) => {
                let path = self.resolve_path(path);
                let json = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
                Catalog::from_json(&json)
                    .with_context(|| format!("Failed to parse catalog: {}", path.display()))
            }
            None => Catalog::builtin().context("Built-in catalog is invalid"),
        }
    }

    /// Open the persisted cart, falling back to the carried snapshot.
    pub fn cart_store(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage: {}", dir.display()))?;
        let cart = CartStore::restore(
            Cache::new(store),
            self.config.storefront.storage_key.clone(),
            self.carried_cart.as_deref(),
        );
        self.output
            .debug(&format!("Cart restored from {:?}", cart.source()));
        Ok(cart)
    }

    /// Get the storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use vitrine_cache::FileStore;
use vitrine_commerce::CartStore;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
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

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        tracing::debug!(config = ?config_path, "loaded cli config");
        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding cart records.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.data_dir {
            Some(dir) => {
                // Relative paths are relative to the config file, else the cwd.
                let base = self
                    .config_path
                    .as_deref()
                    .and_then(Path::parent)
                    .unwrap_or(self.cwd.as_path());
                resolve(base, dir)
            }
            None => dirs_path().join("vitrine"),
        }
    }

    /// Open the file-backed cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.data_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        self.output
            .debug(&format!("Cart storage: {}", storage.root().display()));
        Ok(CartStore::open_with(storage, self.config.cart.clone()))
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
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
        std::fs::write(dir.path().join(".vitrine.toml"), "").unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".vitrine.toml"));
    }

    #[test]
    fn test_data_dir_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.data_dir = Some("carts".to_string());
        let ctx = Context {
            config,
            config_path: Some(dir.path().join("vitrine.toml")),
            output: Output::new(false, true),
            cwd: PathBuf::from("/elsewhere"),
        };

        assert_eq!(ctx.data_dir(), dir.path().join("carts"));
    }

    #[test]
    fn test_open_cart_uses_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storage.data_dir = Some(dir.path().to_string_lossy().to_string());
        config.cart.storage_key = "perfil-a".to_string();
        let ctx = Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.path().to_path_buf(),
        };

        let mut cart = ctx.open_cart().unwrap();
        cart.clear_cart();
        assert!(dir.path().join("perfil-a.json").is_file());
    }
}

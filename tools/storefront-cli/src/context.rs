//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_store::{Cache, SessionId, SnapshotStore};

use crate::catalog::Catalog;
use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Key remembering the generated session id between runs.
const SESSION_KEY: &str = "meta:session";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
            (StorefrontConfig::load(&path)?, root)
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some(path) => {
                    let root = path.parent().map(Path::to_path_buf).unwrap_or_else(|| cwd.clone());
                    (StorefrontConfig::load(&path)?, root)
                }
                None => (StorefrontConfig::default(), cwd.clone()),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            root,
        })
    }

    /// Find config file in directory tree.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
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

    /// Resolve a config path against the config file's directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.root, path)
    }

    /// Open the snapshot store.
    pub fn store(&self) -> Result<SnapshotStore> {
        Ok(SnapshotStore::new(self.cache()?))
    }

    /// The session to read and write, generating one on first use.
    pub fn session(&self) -> Result<SessionId> {
        if let Some(ref id) = self.config.store.session {
            return Ok(SessionId::new(id.clone()));
        }

        let cache = self.cache()?;
        if let Some(id) = cache.get::<SessionId>(SESSION_KEY)? {
            return Ok(id);
        }
        let id = SessionId::generate();
        cache.set(SESSION_KEY, &id)?;
        self.output.debug(&format!("Started new session {id}"));
        Ok(id)
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::load(&self.resolve_path(&self.config.catalog.products))
    }

    pub fn events_path(&self) -> PathBuf {
        self.resolve_path(&self.config.catalog.events)
    }

    pub fn orders_path(&self) -> PathBuf {
        self.resolve_path(&self.config.catalog.orders)
    }

    fn cache(&self) -> Result<Cache> {
        let dir = self.resolve_path(&self.config.store.data_dir);
        Cache::open(&dir).with_context(|| format!("Failed to open data directory: {}", dir.display()))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storefront.toml"), "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Context::find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join("storefront.toml"));
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let base = Path::new("/srv/shop");
        assert_eq!(resolve(base, "products.json"), base.join("products.json"));
        assert_eq!(resolve(base, "/tmp/x.json"), PathBuf::from("/tmp/x.json"));
    }
}

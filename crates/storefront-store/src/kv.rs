//! Key-Value store wrapper with automatic serialization.

use crate::CacheError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

const FILE_EXTENSION: &str = "json";

enum Backend {
    Memory(RwLock<HashMap<String, Vec<u8>>>),
    /// One JSON file per key. File names are the base64url-encoded key, so
    /// any key is a valid file name.
    Directory(PathBuf),
}

/// Type-safe cache.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Clones share the same backend.
#[derive(Clone)]
pub struct Cache {
    backend: Arc<Backend>,
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.backend {
            Backend::Memory(_) => f.write_str("Cache(memory)"),
            Backend::Directory(dir) => write!(f, "Cache({})", dir.display()),
        }
    }
}

impl Cache {
    /// Open a process-local store that lives as long as the cache.
    pub fn in_memory() -> Self {
        Self {
            backend: Arc::new(Backend::Memory(RwLock::new(HashMap::new()))),
        }
    }

    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cache = Cache::open(".storefront/data")?;
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .map_err(|e| CacheError::OpenError(format!("{}: {e}", dir.display())))?;
        tracing::debug!(dir = %dir.display(), "opened directory store");
        Ok(Self {
            backend: Arc::new(Backend::Directory(dir.to_path_buf())),
        })
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<CartSnapshot> = cache.get("cart:sess_abc")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.get_raw(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec_pretty(value)?;
        match &*self.backend {
            Backend::Memory(map) => {
                map.write().map_err(poisoned)?.insert(key.to_string(), bytes);
            }
            Backend::Directory(dir) => {
                let path = key_path(dir, key);
                let tmp = path.with_extension("tmp");
                fs::write(&tmp, &bytes)?;
                fs::rename(&tmp, &path)?;
            }
        }
        Ok(())
    }

    /// Delete a value from the cache. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        match &*self.backend {
            Backend::Memory(map) => {
                map.write().map_err(poisoned)?.remove(key);
            }
            Backend::Directory(dir) => match fs::remove_file(key_path(dir, key)) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match &*self.backend {
            Backend::Memory(map) => Ok(map.read().map_err(poisoned)?.contains_key(key)),
            Backend::Directory(dir) => Ok(key_path(dir, key).is_file()),
        }
    }

    /// Get all keys in the cache, sorted.
    pub fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys: Vec<String> = match &*self.backend {
            Backend::Memory(map) => map.read().map_err(poisoned)?.keys().cloned().collect(),
            Backend::Directory(dir) => {
                let mut keys = Vec::new();
                for entry in fs::read_dir(dir)? {
                    let path = entry?.path();
                    if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                        continue;
                    }
                    if let Some(key) = path.file_stem().and_then(|s| s.to_str()).and_then(decode_key) {
                        keys.push(key);
                    }
                }
                keys
            }
        };
        keys.sort();
        Ok(keys)
    }

    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match &*self.backend {
            Backend::Memory(map) => Ok(map.read().map_err(poisoned)?.get(key).cloned()),
            Backend::Directory(dir) => match fs::read(key_path(dir, key)) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            },
        }
    }
}

fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.{FILE_EXTENSION}", URL_SAFE_NO_PAD.encode(key)))
}

fn decode_key(stem: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(stem).ok()?;
    String::from_utf8(bytes).ok()
}

fn poisoned<E>(_: E) -> CacheError {
    CacheError::StoreError("store lock poisoned".to_string())
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use storefront_store::cache_key;
///
/// let key = cache_key!("cart", "sess_abc");
/// assert_eq!(key, "cart:sess_abc");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Item {
        name: String,
        qty: u32,
    }

    fn item() -> Item {
        Item {
            name: "widget".into(),
            qty: 2,
        }
    }

    fn exercise(cache: &Cache) {
        assert_eq!(cache.get::<Item>("cart:a").unwrap(), None);
        assert!(!cache.exists("cart:a").unwrap());

        cache.set("cart:a", &item()).unwrap();
        cache.set("wishlist:a", &item()).unwrap();
        assert_eq!(cache.get::<Item>("cart:a").unwrap(), Some(item()));
        assert!(cache.exists("cart:a").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["cart:a", "wishlist:a"]);

        cache.delete("cart:a").unwrap();
        cache.delete("cart:a").unwrap();
        assert!(!cache.exists("cart:a").unwrap());
        assert_eq!(cache.keys().unwrap(), vec!["wishlist:a"]);
    }

    #[test]
    fn test_memory_backend() {
        exercise(&Cache::in_memory());
    }

    #[test]
    fn test_directory_backend() {
        let dir = tempfile::tempdir().unwrap();
        exercise(&Cache::open(dir.path().join("data")).unwrap());
    }

    #[test]
    fn test_directory_backend_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        Cache::open(dir.path()).unwrap().set("cart:a", &item()).unwrap();

        let reopened = Cache::open(dir.path()).unwrap();
        assert_eq!(reopened.get::<Item>("cart:a").unwrap(), Some(item()));
    }

    #[test]
    fn test_clones_share_backend() {
        let cache = Cache::in_memory();
        let other = cache.clone();
        cache.set("k", &1u32).unwrap();
        assert_eq!(other.get::<u32>("k").unwrap(), Some(1));
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::open(dir.path()).unwrap();
        fs::write(key_path(dir.path(), "cart:a"), b"not json").unwrap();
        assert!(matches!(
            cache.get::<Item>("cart:a"),
            Err(CacheError::SerializeError(_))
        ));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("cart", "abc"), "cart:abc");
        assert_eq!(cache_key!("event", 1, "x"), "event:1:x");
    }
}

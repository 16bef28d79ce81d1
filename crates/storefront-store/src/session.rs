//! Session-scoped, versioned records on top of [`Cache`].

use crate::{cache_key, Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A stored record with its write version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData<T> {
    /// The session ID.
    pub id: SessionId,
    /// The stored value.
    pub data: T,
    /// Incremented on every write, starting at 1.
    pub version: u64,
    /// When the record was first written (Unix timestamp).
    pub created_at: u64,
    /// When the record was last written (Unix timestamp).
    pub updated_at: u64,
}

/// One namespace of per-session records, e.g. every cart.
///
/// Records live under `<namespace>:<session id>`.
pub struct SessionStore<T> {
    cache: Cache,
    namespace: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> SessionStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(cache: Cache, namespace: &'static str) -> Self {
        Self {
            cache,
            namespace,
            _phantom: PhantomData,
        }
    }

    /// Get the stored value, or the default if nothing was written yet.
    pub fn get_or_default(&self, id: &SessionId) -> Result<T, CacheError> {
        Ok(self.get(id)?.unwrap_or_default())
    }

    /// Get the stored value if it exists.
    pub fn get(&self, id: &SessionId) -> Result<Option<T>, CacheError> {
        Ok(self.get_versioned(id)?.map(|s| s.data))
    }

    /// Get the full record including version.
    pub fn get_versioned(&self, id: &SessionId) -> Result<Option<SessionData<T>>, CacheError> {
        self.cache.get::<SessionData<T>>(&self.key(id))
    }

    /// Unconditional write. Returns the new version.
    pub fn set(&self, id: &SessionId, data: T) -> Result<u64, CacheError> {
        let current = self.get_versioned(id)?;
        self.write(id, data, current.as_ref())
    }

    /// Write only if the stored version is still `expected`.
    ///
    /// Use the version from a previous read; 0 means "nothing stored yet".
    pub fn set_if_version(&self, id: &SessionId, data: T, expected: u64) -> Result<u64, CacheError> {
        let current = self.get_versioned(id)?;
        let found = current.as_ref().map(|s| s.version).unwrap_or(0);
        if found != expected {
            return Err(CacheError::ConcurrentModification {
                key: self.key(id),
                expected,
                found,
            });
        }
        self.write(id, data, current.as_ref())
    }

    /// Delete the record.
    pub fn delete(&self, id: &SessionId) -> Result<(), CacheError> {
        self.cache.delete(&self.key(id))
    }

    fn write(
        &self,
        id: &SessionId,
        data: T,
        previous: Option<&SessionData<T>>,
    ) -> Result<u64, CacheError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let version = previous.map(|s| s.version + 1).unwrap_or(1);

        let record = SessionData {
            id: id.clone(),
            data,
            version,
            created_at: previous.map(|s| s.created_at).unwrap_or(now),
            updated_at: now,
        };
        self.cache.set(&self.key(id), &record)?;
        tracing::debug!(key = %self.key(id), version, "stored session record");
        Ok(version)
    }

    fn key(&self, id: &SessionId) -> String {
        cache_key!(self.namespace, id)
    }
}

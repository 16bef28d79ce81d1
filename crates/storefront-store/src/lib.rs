//! Persistence for the storefront engine.
//!
//! Provides a small JSON key-value cache (in memory or one file per key in a
//! directory) and, on top of it, versioned per-session records for cart and
//! wishlist snapshots.
//!
//! # Example
//!
//! ```rust
//! use storefront_store::{Cache, SessionId, SnapshotStore};
//!
//! let store = SnapshotStore::new(Cache::in_memory());
//! let session = SessionId::generate();
//!
//! let cart = store.load_cart(&session).unwrap();
//! assert!(cart.is_empty());
//!
//! let version = store.save_cart(&session, cart).unwrap();
//! assert_eq!(version, 1);
//! ```

mod error;
mod kv;
mod session;
mod snapshots;

pub use error::CacheError;
pub use kv::Cache;
pub use session::{SessionData, SessionId, SessionStore};
pub use snapshots::{SnapshotStore, CART_NAMESPACE, WISHLIST_NAMESPACE};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, SessionId, SessionStore, SnapshotStore};
}

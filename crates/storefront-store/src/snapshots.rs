//! Cart and wishlist persistence.

use crate::{Cache, CacheError, SessionId, SessionStore};
use storefront_engine::cart::CartSnapshot;
use storefront_engine::wishlist::WishlistSnapshot;

/// Namespace for cart snapshots.
pub const CART_NAMESPACE: &str = "cart";
/// Namespace for wishlist snapshots.
pub const WISHLIST_NAMESPACE: &str = "wishlist";

/// Persists ledger snapshots per session.
///
/// Carts live under `cart:<session>` and wishlists under
/// `wishlist:<session>`. Every save bumps the record's version.
pub struct SnapshotStore {
    carts: SessionStore<CartSnapshot>,
    wishlists: SessionStore<WishlistSnapshot>,
}

impl SnapshotStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            carts: SessionStore::new(cache.clone(), CART_NAMESPACE),
            wishlists: SessionStore::new(cache, WISHLIST_NAMESPACE),
        }
    }

    /// Load the cart, or an empty snapshot for a new session.
    pub fn load_cart(&self, session: &SessionId) -> Result<CartSnapshot, CacheError> {
        self.carts.get_or_default(session)
    }

    /// Load the cart with the version to pass to [`Self::save_cart_if_version`].
    pub fn load_cart_versioned(&self, session: &SessionId) -> Result<(CartSnapshot, u64), CacheError> {
        Ok(match self.carts.get_versioned(session)? {
            Some(record) => (record.data, record.version),
            None => (CartSnapshot::default(), 0),
        })
    }

    pub fn save_cart(&self, session: &SessionId, snapshot: CartSnapshot) -> Result<u64, CacheError> {
        self.carts.set(session, snapshot)
    }

    pub fn save_cart_if_version(
        &self,
        session: &SessionId,
        snapshot: CartSnapshot,
        expected: u64,
    ) -> Result<u64, CacheError> {
        self.carts.set_if_version(session, snapshot, expected)
    }

    pub fn load_wishlist(&self, session: &SessionId) -> Result<WishlistSnapshot, CacheError> {
        self.wishlists.get_or_default(session)
    }

    pub fn load_wishlist_versioned(
        &self,
        session: &SessionId,
    ) -> Result<(WishlistSnapshot, u64), CacheError> {
        Ok(match self.wishlists.get_versioned(session)? {
            Some(record) => (record.data, record.version),
            None => (WishlistSnapshot::default(), 0),
        })
    }

    pub fn save_wishlist(
        &self,
        session: &SessionId,
        snapshot: WishlistSnapshot,
    ) -> Result<u64, CacheError> {
        self.wishlists.set(session, snapshot)
    }

    pub fn save_wishlist_if_version(
        &self,
        session: &SessionId,
        snapshot: WishlistSnapshot,
        expected: u64,
    ) -> Result<u64, CacheError> {
        self.wishlists.set_if_version(session, snapshot, expected)
    }

    /// Drop the cart, e.g. after a successful order.
    pub fn clear_cart(&self, session: &SessionId) -> Result<(), CacheError> {
        self.carts.delete(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_engine::cart::CartLedger;
    use storefront_engine::catalog::Product;
    use storefront_engine::money::{Currency, Money};
    use storefront_engine::notify::RecordingSink;
    use storefront_engine::wishlist::WishlistLedger;

    fn product(id: &str, stock: u32) -> Product {
        Product::new(id, "Test Product", Money::from_major(50, Currency::USD), stock)
    }

    #[test]
    fn test_new_session_is_empty() {
        let store = SnapshotStore::new(Cache::in_memory());
        let session = SessionId::generate();
        assert!(store.load_cart(&session).unwrap().is_empty());
        assert!(store.load_wishlist(&session).unwrap().lines.is_empty());
    }

    #[test]
    fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionId::new("sess_test");
        let sink = RecordingSink::new();

        let mut cart = CartLedger::new(Currency::USD);
        cart.add_item(&product("1", 5), 2, &sink).unwrap();
        SnapshotStore::new(Cache::open(dir.path()).unwrap())
            .save_cart(&session, cart.snapshot())
            .unwrap();

        let store = SnapshotStore::new(Cache::open(dir.path()).unwrap());
        let restored = CartLedger::rehydrate(store.load_cart(&session).unwrap()).unwrap();
        assert_eq!(restored.total_items(), 1);
        assert_eq!(
            restored.total_price().unwrap(),
            Money::from_major(100, Currency::USD)
        );
    }

    #[test]
    fn test_cart_and_wishlist_are_independent() {
        let cache = Cache::in_memory();
        let store = SnapshotStore::new(cache.clone());
        let session = SessionId::new("s");

        let mut wishlist = WishlistLedger::new();
        wishlist.add(&product("1", 5));
        store.save_wishlist(&session, wishlist.snapshot()).unwrap();

        assert!(store.load_cart(&session).unwrap().is_empty());
        assert_eq!(cache.keys().unwrap(), vec!["wishlist:s"]);

        store.clear_cart(&session).unwrap();
        assert_eq!(cache.keys().unwrap(), vec!["wishlist:s"]);
    }

    #[test]
    fn test_stale_cart_write_is_rejected() {
        let store = SnapshotStore::new(Cache::in_memory());
        let session = SessionId::new("s");

        let (snapshot, version) = store.load_cart_versioned(&session).unwrap();
        assert_eq!(version, 0);
        store.save_cart(&session, snapshot.clone()).unwrap();

        assert!(matches!(
            store.save_cart_if_version(&session, snapshot, version),
            Err(CacheError::ConcurrentModification { .. })
        ));
    }
}

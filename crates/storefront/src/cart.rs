//! The cart store: in-memory cart state mirrored to durable storage.
//!
//! # Lifecycle
//!
//! A store is constructed empty in the `loading` state, then [`load`]ed
//! exactly once: the persisted blob (if any) becomes the initial cart, and
//! the store becomes `ready`. Absent, unreadable, or malformed blobs all
//! recover to the empty cart - there is no fatal failure here, only a
//! possibly-empty cart. `ready` is terminal for the lifetime of the store.
//!
//! # Persistence
//!
//! After `ready`, every mutation publishes the full cart to a background
//! writer task that serializes it to the storage key. The writer handles
//! one snapshot at a time and always takes the newest one, so bursts of
//! mutations coalesce and writes can never land out of order. Write
//! failures are logged and swallowed; in-memory state never rolls back and
//! nothing is retried. No write is ever issued before `ready`, so an
//! unread blob cannot be clobbered by the empty seed.
//!
//! Mutating a store that is still `loading` updates in-memory state but
//! persists nothing; callers are expected to gate interaction on
//! [`CartStore::is_ready`] (or a [`CartStore::subscribe`] snapshot).
//!
//! [`load`]: CartStore::load

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use kopiku_core::{Cart, CartProduct, LineItem, Price, ProductId};

use crate::storage::KeyValueStorage;

/// Storage key the cart blob lives under.
pub const CART_STORAGE_KEY: &str = "KopiKU_Cart";

/// A point-in-time view of the store, for observers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartSnapshot {
    /// The cart contents at the time of the snapshot.
    pub cart: Cart,
    /// Whether the initial load has completed.
    pub ready: bool,
}

/// One unit of work for the background writer.
#[derive(Debug, Clone)]
struct PersistJob {
    seq: u64,
    cart: Cart,
}

/// Owns the cart and keeps it in sync with a storage key.
pub struct CartStore {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    cart: Cart,
    ready: bool,
    /// Count of mutations published since `ready`.
    seq: u64,
    snapshot_tx: watch::Sender<CartSnapshot>,
    persist_tx: watch::Sender<PersistJob>,
    /// Handed to the writer task when it starts.
    writer_parts: Option<(watch::Receiver<PersistJob>, watch::Sender<u64>)>,
    persisted_rx: watch::Receiver<u64>,
}

impl CartStore {
    /// Create a store in the `loading` state with an empty cart.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    /// Like [`CartStore::new`] with a custom storage key.
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        let (snapshot_tx, _) = watch::channel(CartSnapshot::default());
        let (persist_tx, persist_rx) = watch::channel(PersistJob {
            seq: 0,
            cart: Cart::new(),
        });
        let (persisted_tx, persisted_rx) = watch::channel(0);

        Self {
            storage,
            key: key.into(),
            cart: Cart::new(),
            ready: false,
            seq: 0,
            snapshot_tx,
            persist_tx,
            writer_parts: Some((persist_rx, persisted_tx)),
            persisted_rx,
        }
    }

    /// Construct and immediately load: the store is `ready` on return.
    pub async fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut store = Self::new(storage);
        store.load().await;
        store
    }

    /// Perform the one-time `loading -> ready` transition.
    ///
    /// Reads the persisted blob and adopts it as the initial cart. A
    /// missing blob, a read failure, or a malformed blob all leave the
    /// cart empty; failures are logged, never surfaced. Calling `load` on
    /// a `ready` store is a no-op.
    pub async fn load(&mut self) {
        if self.ready {
            return;
        }

        match self.storage.get(&self.key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Cart>(&bytes) {
                Ok(cart) => self.cart = cart,
                Err(e) => {
                    warn!(error = %e, key = %self.key, "Stored cart is malformed, starting empty");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, key = %self.key, "Failed to read cart from storage, starting empty");
            }
        }

        self.ready = true;
        self.spawn_writer();
        self.snapshot_tx.send_replace(self.snapshot());
    }

    /// Add one unit of a product (merge-or-append semantics of
    /// [`Cart::add`]). Total over any valid product; schedules a persist.
    pub fn add_item(&mut self, product: CartProduct) {
        self.cart.add(product);
        self.publish();
    }

    /// Adjust a product's quantity by `delta`, clamping at zero and
    /// removing the line when it gets there. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        self.cart.update_quantity(id, delta);
        self.publish();
    }

    /// Empty the cart. The storage key stays; the empty collection is
    /// persisted to it.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.publish();
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of (unit price x quantity) over the cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Quantity of the given product, or `None` if it is not in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> Option<u32> {
        self.cart.quantity_of(id)
    }

    /// Whether the initial load has completed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Watch the store: receivers get a fresh [`CartSnapshot`] after the
    /// load completes and after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Wait until every persist scheduled so far has been attempted.
    ///
    /// Short-lived consumers call this before exiting so the last write is
    /// not lost with the process. A no-op before `ready` or when nothing
    /// was mutated. Failed writes count as attempted - flush does not
    /// retry them.
    pub async fn flush(&self) {
        if !self.ready || self.seq == 0 {
            return;
        }
        let target = self.seq;
        let mut rx = self.persisted_rx.clone();
        // Err means the writer is gone; nothing further will be written.
        let _ = rx.wait_for(|&done| done >= target).await;
    }

    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            cart: self.cart.clone(),
            ready: self.ready,
        }
    }

    fn publish(&mut self) {
        self.snapshot_tx.send_replace(self.snapshot());
        if self.ready {
            self.seq += 1;
            self.persist_tx.send_replace(PersistJob {
                seq: self.seq,
                cart: self.cart.clone(),
            });
        }
    }

    fn spawn_writer(&mut self) {
        let Some((mut jobs, done)) = self.writer_parts.take() else {
            return;
        };
        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();

        tokio::spawn(async move {
            // Exits when the store (and its persist_tx) is dropped.
            while jobs.changed().await.is_ok() {
                let job = {
                    let current = jobs.borrow_and_update();
                    current.clone()
                };
                match serde_json::to_vec(&job.cart) {
                    Ok(bytes) => {
                        if let Err(e) = storage.set(&key, bytes).await {
                            warn!(error = %e, key = %key, "Failed to persist cart, keeping in-memory state");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, key = %key, "Failed to serialize cart for persistence");
                    }
                }
                let _ = done.send(job.seq);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    use async_trait::async_trait;
    use kopiku_core::Price;

    fn espresso() -> CartProduct {
        CartProduct {
            id: ProductId::new("1"),
            name: "Espresso".to_string(),
            price: Price::new(25000),
            image: "https://example.com/espresso.jpg".to_string(),
        }
    }

    fn latte() -> CartProduct {
        CartProduct {
            id: ProductId::new("2"),
            name: "Latte".to_string(),
            price: Price::new(30000),
            image: "https://example.com/latte.jpg".to_string(),
        }
    }

    /// Storage whose every operation fails.
    struct BrokenStorage;

    #[async_trait]
    impl KeyValueStorage for BrokenStorage {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::io(key, std::io::Error::other("disk on fire")))
        }

        async fn set(&self, key: &str, _value: Vec<u8>) -> Result<(), StorageError> {
            Err(StorageError::io(key, std::io::Error::other("disk on fire")))
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::io(key, std::io::Error::other("disk on fire")))
        }
    }

    #[tokio::test]
    async fn fresh_store_is_loading_until_load_completes() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::new(storage);

        assert!(!store.is_ready());
        store.load().await;
        assert!(store.is_ready());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn load_adopts_the_persisted_blob() {
        let storage = Arc::new(MemoryStorage::new());

        let mut seeded = Cart::new();
        seeded.add(espresso());
        seeded.add(espresso());
        seeded.add(latte());
        let blob = serde_json::to_vec(&seeded).expect("serialize");
        storage
            .set(CART_STORAGE_KEY, blob)
            .await
            .expect("seed storage");

        let store = CartStore::open(storage).await;
        assert!(store.is_ready());
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total(), Price::new(80000));
    }

    #[tokio::test]
    async fn malformed_blob_recovers_to_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(CART_STORAGE_KEY, b"not json at all".to_vec())
            .await
            .expect("seed storage");

        let store = CartStore::open(storage).await;
        assert!(store.is_ready());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn read_failure_recovers_to_empty() {
        let store = CartStore::open(Arc::new(BrokenStorage)).await;
        assert!(store.is_ready());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn mutations_persist_after_flush() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;

        store.add_item(espresso());
        store.add_item(espresso());
        store.flush().await;

        let blob = storage
            .get(CART_STORAGE_KEY)
            .await
            .expect("get")
            .expect("blob present");
        let persisted: Cart = serde_json::from_slice(&blob).expect("parse");
        assert_eq!(persisted.quantity_of(&ProductId::new("1")), Some(2));
    }

    #[tokio::test]
    async fn burst_of_mutations_persists_the_final_state() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;

        for _ in 0..10 {
            store.add_item(espresso());
        }
        store.add_item(latte());
        store.update_quantity(&ProductId::new("1"), -3);
        store.flush().await;

        let blob = storage
            .get(CART_STORAGE_KEY)
            .await
            .expect("get")
            .expect("blob present");
        let persisted: Cart = serde_json::from_slice(&blob).expect("parse");
        assert_eq!(persisted.quantity_of(&ProductId::new("1")), Some(7));
        assert_eq!(persisted.quantity_of(&ProductId::new("2")), Some(1));
    }

    #[tokio::test]
    async fn clear_persists_the_empty_collection_without_removing_the_key() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;

        store.add_item(espresso());
        store.clear();
        store.flush().await;

        let blob = storage
            .get(CART_STORAGE_KEY)
            .await
            .expect("get")
            .expect("key still present");
        assert_eq!(blob, b"[]");
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn no_write_happens_before_ready() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStorage>);

        // Undefined behavior territory per the UI contract, but the store
        // must never clobber the unread blob.
        store.add_item(espresso());
        store.flush().await;

        assert!(
            storage
                .get(CART_STORAGE_KEY)
                .await
                .expect("get")
                .is_none()
        );
    }

    #[tokio::test]
    async fn write_failure_keeps_in_memory_state() {
        let mut store = CartStore::open(Arc::new(BrokenStorage)).await;

        store.add_item(espresso());
        store.flush().await;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), Price::new(25000));
    }

    #[tokio::test]
    async fn subscribers_observe_load_and_mutations() {
        let storage = Arc::new(MemoryStorage::new());
        let mut store = CartStore::new(storage);
        let mut rx = store.subscribe();

        assert!(!rx.borrow().ready);

        store.load().await;
        rx.changed().await.expect("load notification");
        assert!(rx.borrow_and_update().ready);

        store.add_item(espresso());
        rx.changed().await.expect("mutation notification");
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.cart.items().len(), 1);
        assert_eq!(snapshot.cart.total(), Price::new(25000));
    }

    #[tokio::test]
    async fn round_trip_across_store_instances() {
        let storage = Arc::new(MemoryStorage::new());

        let mut first = CartStore::open(Arc::clone(&storage) as Arc<dyn KeyValueStorage>).await;
        first.add_item(espresso());
        first.add_item(latte());
        first.add_item(espresso());
        first.flush().await;
        let expected: Vec<LineItem> = first.items().to_vec();
        drop(first);

        let second = CartStore::open(storage).await;
        assert_eq!(second.items(), expected.as_slice());
        assert_eq!(second.total(), Price::new(80000));
    }
}

// ── Resource store ──
//
// Holds the last acknowledged state of one collection. Populated once at
// construction, then mutated only by the outcome of successful create,
// update and delete calls. No background refresh, no TTL.

mod collection;
mod observer;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::ResourceBackend;
use crate::error::CoreError;
use crate::model::{Resource, ResourceId};
use crate::stream::ResourceStream;

pub use collection::Snapshot;
pub use observer::Subscription;

use collection::ResourceCollection;
use observer::ObserverRegistry;

/// Single source of truth for one resource collection.
///
/// Concurrent mutations on the same id are not serialized against each
/// other: whichever backend response is applied last wins.
pub struct ResourceStore<R: Resource> {
    backend: Arc<dyn ResourceBackend<R>>,
    collection: ResourceCollection<R>,
    observers: ObserverRegistry<R>,
}

impl<R: Resource> ResourceStore<R> {
    /// Build a store and eagerly load it from `backend`.
    ///
    /// A failed load is logged and leaves the store empty; it is never
    /// returned to the caller.
    pub async fn load(backend: Arc<dyn ResourceBackend<R>>) -> Self {
        let store = Self::unloaded(backend);
        match store.backend.list().await {
            Ok(items) => {
                info!(kind = %R::KIND, count = items.len(), backend = %store.backend.describe(), "initial load complete");
                store.collection.replace_all(items);
            }
            Err(e) => {
                warn!(kind = %R::KIND, backend = %store.backend.describe(), error = %e, "initial load failed, starting empty");
                store.collection.replace_all(Vec::new());
            }
        }
        store
    }

    fn unloaded(backend: Arc<dyn ResourceBackend<R>>) -> Self {
        Self {
            backend,
            collection: ResourceCollection::new(),
            observers: ObserverRegistry::new(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn ResourceBackend<R>> {
        &self.backend
    }

    // ── Observation ──────────────────────────────────────────────────

    /// Current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Snapshot<R> {
        self.collection.snapshot()
    }

    /// Live view of the collection that follows every mutation.
    pub fn observe(&self) -> ResourceStream<R> {
        ResourceStream::new(self.collection.subscribe())
    }

    /// Register `callback`; it runs immediately with the current snapshot
    /// and again, synchronously, after every mutation.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Snapshot<R>) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        callback(&self.snapshot());
        self.observers.register(callback)
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    // ── Cache reads ──────────────────────────────────────────────────

    pub fn by_id(&self, id: ResourceId) -> Option<Arc<R>> {
        self.collection.get(id)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mutation counter, starting at 1 after the initial load.
    pub fn version(&self) -> u64 {
        self.collection.version()
    }

    // ── Backend operations ───────────────────────────────────────────

    /// Fetch one record from the backend. The cache is not touched.
    pub async fn get(&self, id: ResourceId) -> Result<R, CoreError> {
        self.backend.get(id).await
    }

    /// Create a record and append it to the collection.
    pub async fn create(&self, draft: &R::Draft) -> Result<Arc<R>, CoreError> {
        let created = self.backend.create(draft).await?;
        info!(kind = %R::KIND, id = %created.id(), "created");
        let created = self.collection.append(created);
        self.notify();
        Ok(created)
    }

    /// Update a record and replace its cached entry in place.
    ///
    /// `Ok(None)` when the backend has no such record. When the backend
    /// knows the id but the cache does not, the cache is left alone.
    pub async fn update(&self, id: ResourceId, draft: &R::Draft) -> Result<Option<Arc<R>>, CoreError> {
        let Some(mut updated) = self.backend.update(id, draft).await? else {
            debug!(kind = %R::KIND, %id, "update target not found");
            return Ok(None);
        };
        info!(kind = %R::KIND, %id, "updated");

        let Some(previous) = self.collection.get(id) else {
            return Ok(Some(Arc::new(updated)));
        };
        updated.keep_immutable_fields(&previous);
        let stored = self
            .collection
            .replace(id, updated.clone())
            .unwrap_or_else(|| Arc::new(updated));
        self.notify();
        Ok(Some(stored))
    }

    /// Delete a record and drop it from the collection.
    ///
    /// `Ok(false)` when the backend has no such record.
    pub async fn delete(&self, id: ResourceId) -> Result<bool, CoreError> {
        if !self.backend.delete(id).await? {
            debug!(kind = %R::KIND, %id, "delete target not found");
            return Ok(false);
        }
        info!(kind = %R::KIND, %id, "deleted");
        if self.collection.remove(id).is_some() {
            self.notify();
        }
        Ok(true)
    }

    fn notify(&self) {
        self.observers.notify(&self.snapshot());
    }
}

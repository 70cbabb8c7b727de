// ── Reactive resource collection ──
//
// Ordered storage with O(1) id lookups and push-based change notification
// via `watch` channels. Insertion order is the display order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use tokio::sync::watch;

use crate::model::{Resource, ResourceId};

/// Shared, immutable view of a collection at one point in time.
pub type Snapshot<R> = Arc<Vec<Arc<R>>>;

/// An ordered, reactive collection for a single resource type.
///
/// Every mutation bumps a version counter and rebuilds the snapshot that
/// subscribers receive. The lock is never held across an await.
pub(crate) struct ResourceCollection<R: Resource> {
    items: Mutex<IndexMap<ResourceId, Arc<R>>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot, rebuilt on mutation for cheap subscription.
    snapshot: watch::Sender<Snapshot<R>>,
}

impl<R: Resource> ResourceCollection<R> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            items: Mutex::new(IndexMap::new()),
            version,
            snapshot,
        }
    }

    /// Replace the whole collection (initial load).
    pub(crate) fn replace_all(&self, items: Vec<R>) {
        let mut map = self.lock();
        map.clear();
        for item in items {
            map.insert(item.id(), Arc::new(item));
        }
        self.publish(&map);
    }

    /// Append a record. An existing entry with the same id is replaced in
    /// place rather than duplicated.
    pub(crate) fn append(&self, item: R) -> Arc<R> {
        let item = Arc::new(item);
        let mut map = self.lock();
        map.insert(item.id(), Arc::clone(&item));
        self.publish(&map);
        item
    }

    /// Replace the entry for `id` in place. Returns `None` (and publishes
    /// nothing) when there is no such entry.
    pub(crate) fn replace(&self, id: ResourceId, item: R) -> Option<Arc<R>> {
        let mut map = self.lock();
        let slot = map.get_mut(&id)?;
        let item = Arc::new(item);
        *slot = Arc::clone(&item);
        self.publish(&map);
        Some(item)
    }

    /// Remove the entry for `id`, keeping the order of the rest.
    pub(crate) fn remove(&self, id: ResourceId) -> Option<Arc<R>> {
        let mut map = self.lock();
        let removed = map.shift_remove(&id)?;
        self.publish(&map);
        Some(removed)
    }

    pub(crate) fn get(&self, id: ResourceId) -> Option<Arc<R>> {
        self.lock().get(&id).cloned()
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Snapshot<R> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot<R>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, IndexMap<ResourceId, Arc<R>>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the snapshot from `map`, broadcast it and bump the version.
    fn publish(&self, map: &IndexMap<ResourceId, Arc<R>>) {
        let values: Vec<Arc<R>> = map.values().cloned().collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Product, ProductDraft};
    use chrono::Utc;

    fn product(id: i64, name: &str) -> Product {
        Product::from_draft(
            ResourceId::new(id),
            ProductDraft::new(name, "desc", 10.0),
            Utc::now(),
        )
    }

    fn names(col: &ResourceCollection<Product>) -> Vec<String> {
        col.snapshot().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn append_never_duplicates_ids() {
        let col = ResourceCollection::new();
        col.append(product(1, "a"));
        col.append(product(2, "b"));
        col.append(product(1, "a2"));
        assert_eq!(names(&col), vec!["a2", "b"]);
    }

    #[test]
    fn replace_keeps_position() {
        let col = ResourceCollection::new();
        col.replace_all(vec![product(1, "a"), product(2, "b"), product(3, "c")]);
        col.replace(ResourceId::new(2), product(2, "B")).unwrap();
        assert_eq!(names(&col), vec!["a", "B", "c"]);
    }

    #[test]
    fn replace_missing_is_inert() {
        let col = ResourceCollection::new();
        col.replace_all(vec![product(1, "a")]);
        let version = col.version();
        assert!(col.replace(ResourceId::new(9), product(9, "z")).is_none());
        assert_eq!(col.version(), version);
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn remove_keeps_order() {
        let col = ResourceCollection::new();
        col.replace_all(vec![product(1, "a"), product(2, "b"), product(3, "c")]);
        assert_eq!(col.remove(ResourceId::new(2)).unwrap().name, "b");
        assert!(col.remove(ResourceId::new(2)).is_none());
        assert_eq!(names(&col), vec!["a", "c"]);
    }

    #[test]
    fn subscribers_see_new_snapshot() {
        let col = ResourceCollection::new();
        let mut rx = col.subscribe();
        col.append(product(1, "a"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
        assert_eq!(col.version(), 1);
    }
}

// ── Observed collections ──
//
// `ResourceStore::observe()` hands out a `ResourceStream`: a live view of
// one collection that a screen binds its rows to. Reads never block and
// never await; only `changed()` and the `Stream` adapter wait.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::{Resource, ResourceId};
use crate::store::Snapshot;

/// Live view of one resource collection.
pub struct ResourceStream<R: Resource> {
    seen: Snapshot<R>,
    receiver: watch::Receiver<Snapshot<R>>,
}

impl<R: Resource> ResourceStream<R> {
    pub(crate) fn new(mut receiver: watch::Receiver<Snapshot<R>>) -> Self {
        let seen = receiver.borrow_and_update().clone();
        Self { seen, receiver }
    }

    /// The collection as the store holds it right now.
    pub fn latest(&self) -> Snapshot<R> {
        self.receiver.borrow().clone()
    }

    /// The collection as of the last `mark_seen()` or `changed()`.
    pub fn seen(&self) -> &Snapshot<R> {
        &self.seen
    }

    /// True once the store has mutated since the last `mark_seen()`.
    /// A dropped store counts as unchanged.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Catch `seen()` up with the store.
    pub fn mark_seen(&mut self) -> &Snapshot<R> {
        self.seen = self.receiver.borrow_and_update().clone();
        &self.seen
    }

    /// Look up `id` in the latest collection.
    pub fn find(&self, id: ResourceId) -> Option<Arc<R>> {
        self.receiver.borrow().iter().find(|r| r.id() == id).cloned()
    }

    /// Wait for the next mutation. `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<R>> {
        self.receiver.changed().await.ok()?;
        Some(self.mark_seen().clone())
    }

    /// Every collection state from now on, starting with the current one.
    pub fn into_stream(self) -> SnapshotStream<R> {
        SnapshotStream(WatchStream::new(self.receiver))
    }
}

/// `Stream` of collection snapshots.
pub struct SnapshotStream<R: Resource>(WatchStream<Snapshot<R>>);

impl<R: Resource> Stream for SnapshotStream<R> {
    type Item = Snapshot<R>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.0).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use futures_util::StreamExt;

    use crate::backend::MemoryBackend;
    use crate::model::{Category, CategoryDraft, ResourceId};
    use crate::store::ResourceStore;

    async fn store() -> ResourceStore<Category> {
        ResourceStore::load(Arc::new(MemoryBackend::<Category>::seeded())).await
    }

    #[tokio::test]
    async fn changed_yields_post_mutation_snapshot() {
        let store = store().await;
        let mut rows = store.observe();
        assert_eq!(rows.seen().len(), 6);

        store
            .create(&CategoryDraft::new("Books", None))
            .await
            .unwrap();

        let snap = rows.changed().await.unwrap();
        assert_eq!(snap.len(), 7);
        assert_eq!(rows.seen().len(), 7);
    }

    #[tokio::test]
    async fn latest_moves_before_mark_seen() {
        let store = store().await;
        let mut rows = store.observe();
        assert!(!rows.has_changed());

        store.delete(ResourceId::new(1)).await.unwrap();
        assert!(rows.has_changed());
        assert_eq!(rows.seen().len(), 6);
        assert_eq!(rows.latest().len(), 5);
        assert!(rows.find(ResourceId::new(1)).is_none());

        assert_eq!(rows.mark_seen().len(), 5);
        assert!(!rows.has_changed());
    }

    #[tokio::test]
    async fn find_reads_latest_collection() {
        let store = store().await;
        let rows = store.observe();
        let books = store
            .create(&CategoryDraft::new("Books", None))
            .await
            .unwrap();
        assert_eq!(rows.find(books.id).unwrap().name, "Books");
    }

    #[tokio::test]
    async fn into_stream_starts_with_current() {
        let store = store().await;
        let mut stream = store.observe().into_stream();
        let first = stream.next().await.unwrap();
        assert_eq!(first.len(), 6);

        store.delete(ResourceId::new(6)).await.unwrap();
        let second = stream.next().await.unwrap();
        assert_eq!(second.len(), 5);
    }

    #[tokio::test]
    async fn changed_ends_when_store_dropped() {
        let store = store().await;
        let mut rows = store.observe();
        drop(store);
        assert!(rows.changed().await.is_none());
        assert!(!rows.has_changed());
    }
}

// In-memory resource backend, used when no service is running.
//
// Ids are allocated max+1 over the current contents, so deleting the
// highest record makes its id available again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use smartstore_api::ErrorKind;
use tracing::debug;

use super::ResourceBackend;
use crate::error::CoreError;
use crate::model::{Resource, ResourceId};

pub struct MemoryBackend<R> {
    items: Mutex<Vec<R>>,
    offline: AtomicBool,
}

impl<R: Resource> MemoryBackend<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self {
            items: Mutex::new(items),
            offline: AtomicBool::new(false),
        }
    }

    /// Start from the resource's seed records.
    pub fn seeded() -> Self {
        Self::new(R::seed())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// While set, every call fails as if the server were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Copy of the backend's current contents.
    pub fn contents(&self) -> Vec<R> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<R>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_online(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(CoreError::Api {
                kind: ErrorKind::NetworkUnreachable,
                message: "Cannot connect to the server. Check your connection.".into(),
                status: Some(0),
                detail: "in-memory backend is offline".into(),
            });
        }
        Ok(())
    }

    fn next_id(items: &[R]) -> ResourceId {
        items
            .iter()
            .map(Resource::id)
            .max()
            .map_or(ResourceId::new(1), ResourceId::next)
    }
}

impl<R: Resource> Default for MemoryBackend<R> {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl<R: Resource> ResourceBackend<R> for MemoryBackend<R> {
    fn describe(&self) -> String {
        format!("memory:{}", R::KIND.plural())
    }

    async fn list(&self) -> Result<Vec<R>, CoreError> {
        self.check_online()?;
        Ok(self.contents())
    }

    async fn get(&self, id: ResourceId) -> Result<R, CoreError> {
        self.check_online()?;
        self.lock()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(CoreError::NotFound { kind: R::KIND, id })
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, CoreError> {
        self.check_online()?;
        let mut items = self.lock();
        let id = Self::next_id(&items);
        let created = R::from_draft(id, draft.clone(), Utc::now());
        items.push(created.clone());
        debug!(kind = %R::KIND, %id, "memory backend created record");
        Ok(created)
    }

    async fn update(&self, id: ResourceId, draft: &R::Draft) -> Result<Option<R>, CoreError> {
        self.check_online()?;
        let mut items = self.lock();
        Ok(items.iter_mut().find(|r| r.id() == id).map(|existing| {
            existing.apply_draft(draft.clone());
            existing.clone()
        }))
    }

    async fn delete(&self, id: ResourceId) -> Result<bool, CoreError> {
        self.check_online()?;
        let mut items = self.lock();
        let before = items.len();
        items.retain(|r| r.id() != id);
        Ok(items.len() != before)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryDraft, Product, ProductDraft};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_allocates_max_plus_one() {
        let backend = MemoryBackend::<Product>::seeded();
        let created = backend
            .create(&ProductDraft::new("Webcam", "HD webcam", 49.99))
            .await
            .unwrap();
        assert_eq!(created.id, ResourceId::new(7));

        assert!(backend.delete(ResourceId::new(7)).await.unwrap());
        let again = backend
            .create(&ProductDraft::new("Webcam", "HD webcam", 49.99))
            .await
            .unwrap();
        assert_eq!(again.id, ResourceId::new(7));
    }

    #[tokio::test]
    async fn empty_backend_starts_at_one() {
        let backend = MemoryBackend::<Category>::empty();
        let created = backend
            .create(&CategoryDraft::new("Books", None))
            .await
            .unwrap();
        assert_eq!(created.id, ResourceId::new(1));
    }

    #[tokio::test]
    async fn update_preserves_id_and_created_at() {
        let backend = MemoryBackend::<Category>::seeded();
        let before = backend.get(ResourceId::new(2)).await.unwrap();

        let updated = backend
            .update(
                ResourceId::new(2),
                &CategoryDraft::new("Cables", Some("All the cables".into())),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, before.id);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(updated.name, "Cables");
    }

    #[tokio::test]
    async fn unknown_ids() {
        let backend = MemoryBackend::<Product>::seeded();
        let draft = ProductDraft::new("x", "y", 1.0);
        assert!(backend.update(ResourceId::new(99), &draft).await.unwrap().is_none());
        assert!(!backend.delete(ResourceId::new(99)).await.unwrap());
        assert!(backend.get(ResourceId::new(99)).await.unwrap_err().is_not_found());
        assert_eq!(backend.contents().len(), 6);
    }

    #[tokio::test]
    async fn offline_backend_is_unreachable() {
        let backend = MemoryBackend::<Product>::seeded();
        backend.set_offline(true);
        let err = backend.list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkUnreachable);
        assert_eq!(err.status(), Some(0));
    }
}

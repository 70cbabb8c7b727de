// ── Resource backends ──
//
// The seam between the store and wherever records live: a REST service
// (`RemoteBackend`) or an in-process mock (`MemoryBackend`).

mod memory;
mod remote;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::model::{Resource, ResourceId};

pub use memory::MemoryBackend;
pub use remote::RemoteBackend;

/// CRUD operations against one resource collection.
#[async_trait]
pub trait ResourceBackend<R: Resource>: Send + Sync {
    /// Where this backend points, for logs and diagnostics.
    fn describe(&self) -> String;

    async fn list(&self) -> Result<Vec<R>, CoreError>;

    async fn get(&self, id: ResourceId) -> Result<R, CoreError>;

    async fn create(&self, draft: &R::Draft) -> Result<R, CoreError>;

    /// `Ok(None)` when the backend has no record with this id.
    async fn update(&self, id: ResourceId, draft: &R::Draft) -> Result<Option<R>, CoreError>;

    /// `Ok(false)` when the backend has no record with this id.
    async fn delete(&self, id: ResourceId) -> Result<bool, CoreError>;
}

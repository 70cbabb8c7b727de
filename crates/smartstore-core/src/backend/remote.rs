// HTTP-backed resource backend.

use std::marker::PhantomData;

use async_trait::async_trait;
use smartstore_api::{ResourceClient, TransportConfig};

use super::ResourceBackend;
use crate::error::CoreError;
use crate::model::{Resource, ResourceId};

/// Talks to `{base}` / `{base}/{id}` through a [`ResourceClient`].
pub struct RemoteBackend<R> {
    client: ResourceClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RemoteBackend<R> {
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, CoreError> {
        Ok(Self::from_client(ResourceClient::new(base_url, transport)?))
    }

    pub fn from_client(client: ResourceClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }
}

#[async_trait]
impl<R: Resource> ResourceBackend<R> for RemoteBackend<R> {
    fn describe(&self) -> String {
        self.client.base_url().to_string()
    }

    async fn list(&self) -> Result<Vec<R>, CoreError> {
        Ok(self.client.list().await?)
    }

    async fn get(&self, id: ResourceId) -> Result<R, CoreError> {
        match self.client.get(id.get()).await {
            Ok(item) => Ok(item),
            Err(e) if e.is_not_found() && e.server_message().is_none() => {
                Err(CoreError::NotFound { kind: R::KIND, id })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, CoreError> {
        Ok(self.client.create(draft).await?)
    }

    async fn update(&self, id: ResourceId, draft: &R::Draft) -> Result<Option<R>, CoreError> {
        Ok(self.client.update(id.get(), draft).await?)
    }

    async fn delete(&self, id: ResourceId) -> Result<bool, CoreError> {
        Ok(self.client.delete(id.get()).await?)
    }
}

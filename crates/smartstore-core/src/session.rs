// ── Session ──
//
// Opens both resource stores from one `BackendConfig` and vends list
// controllers bound to them.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::backend::{MemoryBackend, RemoteBackend, ResourceBackend};
use crate::config::{BackendConfig, BackendMode};
use crate::controller::{Confirm, ListController};
use crate::error::CoreError;
use crate::model::{Category, Product, Resource};
use crate::notifier::Notifier;
use crate::store::ResourceStore;

/// Record counts shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub products: usize,
    pub categories: usize,
}

pub struct Session {
    config: BackendConfig,
    products: Arc<ResourceStore<Product>>,
    categories: Arc<ResourceStore<Category>>,
}

impl Session {
    /// Build both backends and load both stores concurrently.
    ///
    /// Load failures leave the affected store empty; only an unusable
    /// configuration is an error.
    pub async fn open(config: BackendConfig) -> Result<Self, CoreError> {
        let products = backend_for::<Product>(&config)?;
        let categories = backend_for::<Category>(&config)?;

        let (products, categories) = tokio::join!(
            ResourceStore::load(products),
            ResourceStore::load(categories)
        );
        info!(
            mode = %config.mode,
            products = products.len(),
            categories = categories.len(),
            "session opened"
        );

        Ok(Self {
            config,
            products: Arc::new(products),
            categories: Arc::new(categories),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn products(&self) -> &Arc<ResourceStore<Product>> {
        &self.products
    }

    pub fn categories(&self) -> &Arc<ResourceStore<Category>> {
        &self.categories
    }

    pub fn summary(&self) -> Summary {
        Summary {
            products: self.products.len(),
            categories: self.categories.len(),
        }
    }

    pub fn product_controller(
        &self,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> ListController<Product> {
        ListController::new(Arc::clone(&self.products), notifier, confirm)
    }

    pub fn category_controller(
        &self,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn Confirm>,
    ) -> ListController<Category> {
        ListController::new(Arc::clone(&self.categories), notifier, confirm)
    }
}

/// Backend for `R` according to the configured mode.
pub fn backend_for<R: Resource>(
    config: &BackendConfig,
) -> Result<Arc<dyn ResourceBackend<R>>, CoreError> {
    Ok(match config.mode {
        BackendMode::Memory => Arc::new(MemoryBackend::<R>::seeded()),
        BackendMode::Remote => Arc::new(RemoteBackend::<R>::new(
            config.url_for(R::KIND).as_str(),
            &config.transport(),
        )?),
    })
}

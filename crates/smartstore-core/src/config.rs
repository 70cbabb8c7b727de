// ── Runtime backend configuration ──
//
// Describes where the two collections live and how to talk to them.
// Never touches disk: the CLI builds a `BackendConfig` from its profile and
// hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smartstore_api::{RetryPolicy, TransportConfig};
use strum::{Display, EnumString};
use url::Url;

use crate::error::CoreError;
use crate::model::ResourceKind;

/// Which backend implementation serves the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// REST services at the configured URLs.
    #[default]
    Remote,
    /// In-process mock seeded with sample data.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub mode: BackendMode,
    pub products_url: Url,
    pub categories_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl BackendConfig {
    /// Remote backends at explicit URLs with default transport settings.
    pub fn remote(products_url: &str, categories_url: &str) -> Result<Self, CoreError> {
        Ok(Self {
            products_url: parse_url(products_url)?,
            categories_url: parse_url(categories_url)?,
            ..Self::default()
        })
    }

    /// In-memory backends.
    pub fn memory() -> Self {
        Self {
            mode: BackendMode::Memory,
            ..Self::default()
        }
    }

    pub fn url_for(&self, kind: ResourceKind) -> &Url {
        match kind {
            ResourceKind::Product => &self.products_url,
            ResourceKind::Category => &self.categories_url,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        TransportConfig::default()
            .with_timeout(self.timeout)
            .with_retry(self.retry)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Remote,
            products_url: default_url(ResourceKind::Product),
            categories_url: default_url(ResourceKind::Category),
            timeout: TransportConfig::default().timeout,
            retry: RetryPolicy::default(),
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, CoreError> {
    Url::parse(raw).map_err(|e| CoreError::Config {
        message: format!("invalid URL '{raw}': {e}"),
    })
}

fn default_url(kind: ResourceKind) -> Url {
    // The defaults are constant and well-formed.
    Url::parse(&kind.default_base_url()).unwrap_or_else(|_| unreachable!())
}

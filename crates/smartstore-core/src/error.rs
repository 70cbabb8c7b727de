// ── Core error types ──
//
// User-facing errors from smartstore-core. Transport failures arrive as
// `smartstore_api::Error` and are flattened into `CoreError::Api`, which
// keeps the classification and the toast text but not the raw response.

use smartstore_api::ErrorKind;
use thiserror::Error;

use crate::model::{ResourceId, ResourceKind};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Backend errors ───────────────────────────────────────────────
    /// A classified backend failure. `message` is the user-facing text.
    #[error("{message}")]
    Api {
        kind: ErrorKind,
        message: String,
        /// HTTP status, `0` when the server was unreachable.
        status: Option<u16>,
        /// Technical description of the underlying failure.
        detail: String,
    },

    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: ResourceId },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    // ── Output errors ────────────────────────────────────────────────
    #[error("Export failed: {message}")]
    Export { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Classification used for notifications and exit codes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { kind, .. } => *kind,
            Self::NotFound { .. } | Self::Validation { .. } => ErrorKind::ClientError,
            Self::Export { .. } | Self::Config { .. } => ErrorKind::UnknownError,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Text suitable for an error toast.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::NotFound { kind, .. } => format!("{} not found", kind.title()),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<smartstore_api::Error> for CoreError {
    fn from(err: smartstore_api::Error) -> Self {
        match err {
            smartstore_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            smartstore_api::Error::InvalidBase(url) => Self::Config {
                message: format!("URL cannot be used as a resource base: {url}"),
            },
            smartstore_api::Error::ClientBuild(message) => Self::Config { message },
            other => Self::Api {
                kind: other.kind(),
                message: other.user_message(),
                status: other.status(),
                detail: other.to_string(),
            },
        }
    }
}

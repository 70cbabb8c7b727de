//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use smartstore_config::ConfigError;
use smartstore_core::{CoreError, ErrorKind, ResourceKind};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(dead_code, unused_assignments)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the {resource_type} service")]
    #[diagnostic(
        code(smartstore::connection_failed),
        help(
            "Check that the service is running and the URL is correct.\n\
             Override it with --products-url / --categories-url, or try --mock.\n\
             Detail: {detail}"
        )
    )]
    ConnectionFailed {
        resource_type: String,
        detail: String,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(smartstore::not_found),
        help("Run: smartstore {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(smartstore::api_error))]
    ApiError {
        code: String,
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(smartstore::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(smartstore::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: smartstore config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(smartstore::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(smartstore::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(smartstore::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Export ───────────────────────────────────────────────────────
    #[error("Export failed: {message}")]
    #[diagnostic(code(smartstore::export))]
    Export { message: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(smartstore::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("YAML output failed: {0}")]
    #[diagnostic(code(smartstore::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Not-found error pointing at the list command of `kind`.
    pub fn not_found(kind: ResourceKind, identifier: impl ToString) -> Self {
        Self::NotFound {
            resource_type: kind.to_string(),
            identifier: identifier.to_string(),
            list_command: format!("{} list", kind.plural()),
        }
    }

    /// Attach the resource that was being worked on to a core error.
    pub fn from_core(kind: ResourceKind, err: CoreError) -> Self {
        match err {
            CoreError::Api {
                kind: ErrorKind::NetworkUnreachable,
                detail,
                ..
            } => Self::ConnectionFailed {
                resource_type: kind.to_string(),
                detail,
            },
            CoreError::NotFound { kind, id } => Self::not_found(kind, id),
            other => other.into(),
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api {
                kind: ErrorKind::NetworkUnreachable,
                detail,
                ..
            } => Self::ConnectionFailed {
                resource_type: "backend".into(),
                detail,
            },

            CoreError::Api {
                kind,
                message,
                status,
                ..
            } => Self::ApiError {
                code: kind.to_string(),
                message,
                status,
            },

            CoreError::NotFound { kind, id } => Self::not_found(kind, id),

            CoreError::Validation { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Export { message } => Self::Export { message },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

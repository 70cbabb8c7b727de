use strum::{Display, IntoStaticStr};
use thiserror::Error;

/// Top-level error type for the `smartstore-api` crate.
///
/// Every failure carries enough information to be classified into an
/// [`ErrorKind`]; `smartstore-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL cannot carry path segments (e.g. `mailto:`).
    #[error("URL cannot be used as a resource base: {0}")]
    InvalidBase(String),

    /// The underlying `reqwest::Client` could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Server responses ────────────────────────────────────────────
    /// Non-success HTTP status. `message` is lifted from the error body
    /// (`{"message": "..."}`) when the server sent one.
    #[error("Server responded with HTTP {status}")]
    Http {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// A success status arrived but its body could not be read.
    #[error("Failed to read response body (HTTP {status}): {message}")]
    ResponseBody { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

/// Uniform classification of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Status 0: the server could not be reached at all.
    NetworkUnreachable,
    /// 4xx response.
    ClientError,
    /// 5xx response.
    ServerError,
    /// Anything else (malformed bodies, unexpected statuses, ...).
    UnknownError,
}

impl Error {
    /// HTTP status of the failure, using `0` for requests that never got a
    /// response (connection refused, DNS, timeout).
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => Some(e.status().map_or(0, |s| s.as_u16())),
            Self::Http { status, .. } => Some(*status),
            Self::InvalidUrl(_)
            | Self::InvalidBase(_)
            | Self::ResponseBody { .. }
            | Self::ClientBuild(_)
            | Self::Deserialization { .. } => None,
        }
    }

    /// Classify this error by status.
    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(0) => ErrorKind::NetworkUnreachable,
            Some(400..=499) => ErrorKind::ClientError,
            Some(500..=599) => ErrorKind::ServerError,
            _ => ErrorKind::UnknownError,
        }
    }

    /// Message lifted from the server's error payload, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Human-readable text suitable for an error toast.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::NetworkUnreachable => {
                "Cannot connect to the server. Check your connection.".into()
            }
            ErrorKind::ClientError => match self.server_message() {
                Some(msg) => msg.to_owned(),
                None if self.is_not_found() => "Resource not found".into(),
                None => "The request was rejected by the server".into(),
            },
            ErrorKind::ServerError => "Internal server error. Please try again later.".into(),
            ErrorKind::UnknownError => "An unexpected error occurred".into(),
        }
    }

    /// Returns `true` if the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

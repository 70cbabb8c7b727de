//! Async REST client for the SmartStore resource services.
//!
//! - **[`ResourceClient`]**: `list` / `get` / `create` / `update` / `delete`
//!   against one collection endpoint (`{base}` and `{base}/{id}`).
//! - **[`RetryPolicy`]**: fixed-count retry applied uniformly to every verb.
//! - **[`TransportConfig`]**: timeout, JSON default headers, retry settings.
//! - **[`Error`]** / **[`ErrorKind`]**: transport and HTTP failures, classified
//!   as network-unreachable, client, server or unknown errors.

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;

pub use client::ResourceClient;
pub use error::{Error, ErrorKind};
pub use retry::RetryPolicy;
pub use transport::TransportConfig;

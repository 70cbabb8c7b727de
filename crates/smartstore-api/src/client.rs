// REST client for a single resource collection.
//
// Wraps `reqwest::Client` with collection/item URL construction, JSON
// decoding, error-body parsing and the shared retry policy. The client is
// generic over the serde types it moves; it knows nothing about products or
// categories.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::transport::TransportConfig;

/// Spring-style error payload: `{"status":404,"error":"Not Found","message":"..."}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Async client for one `{base}` collection endpoint.
///
/// `base_url` is the collection root (e.g. `http://localhost:8081/api/products`);
/// items live at `{base}/{id}`.
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl ResourceClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            retry: transport.retry,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages default headers).
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        retry: RetryPolicy,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            retry,
        })
    }

    /// Parse the base URL and strip any trailing slash so item URLs are
    /// built by appending one segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let url = Url::parse(raw.trim_end_matches('/'))?;
        if url.cannot_be_a_base() {
            return Err(Error::InvalidBase(raw.to_owned()));
        }
        Ok(url)
    }

    /// The collection URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{id}`
    fn item_url(&self, id: i64) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `normalize_base_url`: the base always carries segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET {base}`
    pub async fn list<T: DeserializeOwned>(&self) -> Result<Vec<T>, Error> {
        let url = &self.base_url;
        self.retry.run("list", || self.get_json(url)).await
    }

    /// `GET {base}/{id}`
    pub async fn get<T: DeserializeOwned>(&self, id: i64) -> Result<T, Error> {
        let url = self.item_url(id);
        self.retry.run("get", || self.get_json(&url)).await
    }

    /// `POST {base}` with the draft body; returns the created entity.
    pub async fn create<T, B>(&self, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = &self.base_url;
        self.retry.run("create", || self.post_json(url, body)).await
    }

    /// `PUT {base}/{id}`; returns `None` when the server has no such entity
    /// (404) or answered without a body.
    pub async fn update<T, B>(&self, id: i64, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.item_url(id);
        match self.retry.run("update", || self.put_json(&url, body)).await {
            Err(err) if err.is_not_found() => {
                debug!(id, "update target not found");
                Ok(None)
            }
            other => other,
        }
    }

    /// `DELETE {base}/{id}`; returns `false` when the server has no such
    /// entity (404).
    pub async fn delete(&self, id: i64) -> Result<bool, Error> {
        let url = self.item_url(id);
        match self.retry.run("delete", || self.delete_empty(&url)).await {
            Ok(()) => Ok(true),
            Err(err) if err.is_not_found() => {
                debug!(id, "delete target not found");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, Error> {
        debug!("GET {url}");
        let resp = self.http.get(url.clone()).send().await?;
        let body = read_body(resp).await?;
        decode(body)
    }

    async fn post_json<T, B>(&self, url: &Url, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!("POST {url}");
        let resp = self.http.post(url.clone()).json(body).send().await?;
        let body = read_body(resp).await?;
        decode(body)
    }

    async fn put_json<T, B>(&self, url: &Url, body: &B) -> Result<Option<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        debug!("PUT {url}");
        let resp = self.http.put(url.clone()).json(body).send().await?;
        let body = read_body(resp).await?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }
        decode(body).map(Some)
    }

    async fn delete_empty(&self, url: &Url) -> Result<(), Error> {
        debug!("DELETE {url}");
        let resp = self.http.delete(url.clone()).send().await?;
        read_body(resp).await.map(|_| ())
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Return the body of a 2xx response, or the parsed error otherwise.
async fn read_body(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    trace!(%status, "response received");
    if status.is_success() {
        resp.text().await.map_err(|e| Error::ResponseBody {
            status: status.as_u16(),
            message: e.to_string(),
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: StatusCode, resp: reqwest::Response) -> Error {
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty());

    Error::Http {
        status: status.as_u16(),
        message,
        body,
    }
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            let preview: String = body.chars().take(200).collect();
            Err(Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            })
        }
    }
}

//! HTTP backend implementation over the integration service's REST API.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::{Backend, BackendError, CountResponse, FilterOptions, ListPage, ListQuery, RecordPage};
use crate::entities::EntityKind;

/// HTTP backend talking to `<base_url>/api/...`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    /// Create a new HTTP backend for the given base URL.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            return Err(BackendError::Other("base URL must not be empty".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Response, BackendError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, params);
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| connection_error(&url, e))?;
        ensure_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(String, String)]) -> Result<T, BackendError> {
        let response = self.get(path, params).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(format!("{}: {}", path, e)))
    }

    async fn list_page<T: DeserializeOwned>(&self, kind: EntityKind, query: &ListQuery) -> Result<ListPage<T>, BackendError> {
        self.get_json(kind.slug(), &query.params()).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn backend_type(&self) -> &str {
        "http"
    }

    async fn list(&self, kind: EntityKind, query: &ListQuery) -> Result<RecordPage, BackendError> {
        Ok(match kind {
            EntityKind::Projects => RecordPage::Projects(self.list_page(kind, query).await?),
            EntityKind::Issues => RecordPage::Issues(self.list_page(kind, query).await?),
            EntityKind::Audit => RecordPage::Audit(self.list_page(kind, query).await?),
        })
    }

    async fn filter_options(&self, kind: EntityKind) -> Result<FilterOptions, BackendError> {
        self.get_json(&format!("{}/filteroptions", kind.slug()), &[]).await
    }

    async fn count(&self, kind: EntityKind) -> Result<u64, BackendError> {
        let response: CountResponse = self.get_json(&format!("{}/count", kind.slug()), &[]).await?;
        Ok(response.count)
    }

    async fn sync(&self, kind: EntityKind) -> Result<(), BackendError> {
        let url = self.url(&format!("sync/{}", kind.slug()));
        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| connection_error(&url, e))?;
        // The success payload is opaque; only the status matters.
        ensure_success(response).await?;
        Ok(())
    }

    async fn export(&self, kind: EntityKind) -> Result<Vec<u8>, BackendError> {
        let response = self.get(&format!("{}/export", kind.slug()), &[]).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(format!("failed to read export body: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    error: Option<String>,
}

fn connection_error(url: &str, error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Network(format!("request to {} timed out", url))
    } else {
        BackendError::Network(format!("cannot reach {} ({})", url, error))
    }
}

/// Turn any non-2xx response into [`BackendError::Status`] with a readable body.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned {} : {}", status.as_u16(), body);
    Err(BackendError::Status {
        status: status.as_u16(),
        body: clean_error_body(status, &body),
    })
}

fn clean_error_body(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = parsed.message.or(parsed.error).filter(|m| !m.is_empty()) {
            return message;
        }
    }

    if !body.is_empty() && body.len() < 100 && !body.contains('{') {
        return body.to_string();
    }

    status.canonical_reason().unwrap_or("request failed").to_string()
}

//! Object store REST client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use vitrine_error::{ConfigError, StorageError, StorageErrorKind, VitrineResult};

/// One object as described by the store's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    /// Public URL of the object
    pub url: String,
    /// Key of the object within the store, e.g. `brands/logo.png`
    pub pathname: String,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    /// Upload timestamp
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// One page of a prefix listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobPage {
    /// Objects in this page
    #[serde(default)]
    pub blobs: Vec<BlobObject>,
    /// Cursor for the next page, if any
    #[serde(default)]
    pub cursor: Option<String>,
    /// Whether more objects follow
    #[serde(default)]
    pub has_more: bool,
}

/// Minimal object store API needed by the scanner.
#[async_trait::async_trait]
pub trait BlobClient: Send + Sync {
    /// List up to `limit` objects under `prefix`, continuing from `cursor`.
    async fn list(
        &self,
        prefix: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> VitrineResult<BlobPage>;

    /// Delete the object at `url`. Returns `false` if the store reports it absent.
    async fn delete(&self, url: &str) -> VitrineResult<bool>;

    /// Upload `data` under `pathname`.
    async fn put(&self, pathname: &str, data: &[u8]) -> VitrineResult<BlobObject>;
}

/// [`BlobClient`] over the blob store's HTTP API.
///
/// - `GET {api_url}?prefix=..&limit=..&cursor=..` lists
/// - `POST {api_url}/delete` with `{"urls": [...]}` deletes
/// - `PUT {api_url}/{pathname}` uploads
///
/// Every request carries the bearer token and a bounded timeout.
#[derive(Debug, Clone)]
pub struct HttpBlobClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    urls: [&'a str; 1],
}

impl HttpBlobClient {
    /// Create a client for `api_url` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty or the HTTP client
    /// cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> VitrineResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::new("Object store token is empty").into());
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn check(response: reqwest::Response) -> VitrineResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let kind = match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                StorageErrorKind::PermissionDenied(format!("{}: {}", status, body))
            }
            reqwest::StatusCode::NOT_FOUND => StorageErrorKind::NotFound(body),
            _ => StorageErrorKind::Http(format!("{}: {}", status, body)),
        };
        Err(StorageError::new(kind).into())
    }
}

fn transport_error(e: reqwest::Error) -> StorageError {
    if e.is_timeout() {
        StorageError::new(StorageErrorKind::ScanTimeout(e.to_string()))
    } else {
        StorageError::new(StorageErrorKind::Http(e.to_string()))
    }
}

#[async_trait::async_trait]
impl BlobClient for HttpBlobClient {
    #[tracing::instrument(skip(self))]
    async fn list(
        &self,
        prefix: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> VitrineResult<BlobPage> {
        let mut query = vec![
            ("prefix", prefix.to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }

        let response = self
            .http
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await
            .map_err(transport_error)?;

        let page = Self::check(response)
            .await?
            .json::<BlobPage>()
            .await
            .map_err(transport_error)?;

        tracing::debug!(
            count = page.blobs.len(),
            has_more = page.has_more,
            "Listed object store page"
        );
        Ok(page)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> VitrineResult<bool> {
        let response = self
            .http
            .post(format!("{}/delete", self.api_url))
            .bearer_auth(&self.token)
            .json(&DeleteRequest { urls: [url] })
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check(response).await?;
        Ok(true)
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn put(&self, pathname: &str, data: &[u8]) -> VitrineResult<BlobObject> {
        let response = self
            .http
            .put(format!("{}/{}", self.api_url, pathname))
            .bearer_auth(&self.token)
            .body(data.to_vec())
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response)
            .await?
            .json::<BlobObject>()
            .await
            .map_err(|e| transport_error(e).into())
    }
}

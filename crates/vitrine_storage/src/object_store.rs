//! Object store scanner.

use crate::url::{host_matches, url_host, url_key};
use crate::{AssetBackend, BlobClient, BlobObject, CategoryPaths, ScanOptions};
use chrono::Utc;
use std::sync::Arc;
use vitrine_core::{Backend, Category, RawAssetRecord, VersionedName, is_media_file};
use vitrine_error::{StorageError, StorageErrorKind, VitrineResult};

/// Listing ceiling applied when a scan does not specify one.
pub const DEFAULT_SCAN_CEILING: usize = 1000;

/// Object store storage backend.
///
/// Lists `{category path}/` prefixes page by page through a [`BlobClient`].
/// Pages for one category are fetched sequentially and the listing stops at
/// the scan's `max_records` ceiling, so a category never costs an unbounded
/// listing.
pub struct ObjectStoreScanner {
    client: Arc<dyn BlobClient>,
    paths: CategoryPaths,
    public_domain: String,
    list_page_size: usize,
}

impl std::fmt::Debug for ObjectStoreScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStoreScanner")
            .field("public_domain", &self.public_domain)
            .field("list_page_size", &self.list_page_size)
            .finish_non_exhaustive()
    }
}

impl ObjectStoreScanner {
    /// Create a scanner.
    ///
    /// # Arguments
    ///
    /// * `client` - Object store API client
    /// * `paths` - Category key prefixes
    /// * `public_domain` - Host suffix of URLs served by this store
    /// * `list_page_size` - Maximum objects requested per list call
    pub fn new(
        client: Arc<dyn BlobClient>,
        paths: CategoryPaths,
        public_domain: impl Into<String>,
        list_page_size: usize,
    ) -> Self {
        Self {
            client,
            paths,
            public_domain: public_domain.into().trim().to_ascii_lowercase(),
            list_page_size: list_page_size.max(1),
        }
    }

    fn prefix(&self, category: Category) -> String {
        format!("{}/", self.paths.path(category))
    }

    fn record_from(
        &self,
        category: Category,
        prefix: &str,
        blob: BlobObject,
    ) -> Option<RawAssetRecord> {
        let name = blob.pathname.strip_prefix(prefix)?;
        if name.is_empty() || name.contains('/') || !is_media_file(name) {
            return None;
        }
        let Some(uploaded_at) = blob.uploaded_at else {
            tracing::debug!(pathname = %blob.pathname, "Object has no upload timestamp, skipping");
            return None;
        };
        Some(RawAssetRecord {
            category,
            raw_name: name.to_string(),
            url: blob.url,
            size_bytes: blob.size,
            uploaded_at,
        })
    }

    /// Category of a URL served by this store, if it sits in a managed prefix.
    pub fn category_of(&self, url: &str) -> Option<Category> {
        if !self.owns_url(url) {
            return None;
        }
        url_key(url)
            .and_then(|key| self.paths.locate(key))
            .map(|(category, _)| category)
    }
}

#[async_trait::async_trait]
impl AssetBackend for ObjectStoreScanner {
    fn backend(&self) -> Backend {
        Backend::ObjectStore
    }

    fn owns_url(&self, url: &str) -> bool {
        url_host(url)
            .map(|host| host_matches(&host, &self.public_domain))
            .unwrap_or(false)
    }

    #[tracing::instrument(skip(self, options))]
    async fn scan(
        &self,
        category: Category,
        options: &ScanOptions,
    ) -> VitrineResult<Vec<RawAssetRecord>> {
        let prefix = self.prefix(category);
        let ceiling = options.max_records().unwrap_or(DEFAULT_SCAN_CEILING);

        let mut records = Vec::new();
        let mut listed = 0usize;
        let mut cursor: Option<String> = None;

        while listed < ceiling {
            let limit = self.list_page_size.min(ceiling - listed);
            let page = self.client.list(&prefix, limit, cursor.as_deref()).await?;

            listed += page.blobs.len();
            records.extend(
                page.blobs
                    .into_iter()
                    .filter_map(|blob| self.record_from(category, &prefix, blob))
                    .filter(|record| options.admits(&record.uploaded_at)),
            );

            match page.cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }

        if listed >= ceiling {
            tracing::debug!(ceiling, "Listing ceiling reached");
        }
        tracing::debug!(prefix = %prefix, count = records.len(), "Scanned object store category");
        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, url: &str) -> VitrineResult<bool> {
        if self.category_of(url).is_none() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} is not a managed object store URL",
                url
            )))
            .into());
        }

        let removed = self.client.delete(url).await?;
        if removed {
            tracing::info!(url, "Deleted object");
        } else {
            tracing::debug!(url, "Object already absent");
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn store(
        &self,
        category: Category,
        display_name: &str,
        data: &[u8],
    ) -> VitrineResult<RawAssetRecord> {
        if display_name.contains('/') || !is_media_file(display_name) {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} is not a storable media filename",
                display_name
            )))
            .into());
        }

        let now = Utc::now();
        let raw_name = VersionedName::generate(display_name, now).to_raw();
        let pathname = format!("{}{}", self.prefix(category), raw_name);
        let blob = self.client.put(&pathname, data).await?;

        tracing::info!(pathname = %pathname, "Stored object");

        Ok(RawAssetRecord {
            category,
            raw_name,
            url: blob.url,
            size_bytes: if blob.size > 0 { blob.size } else { data.len() as u64 },
            uploaded_at: blob.uploaded_at.unwrap_or(now),
        })
    }
}

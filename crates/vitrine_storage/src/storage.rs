//! Backend trait definition.

use chrono::{DateTime, Utc};
use vitrine_core::{Backend, Category, RawAssetRecord};
use vitrine_error::VitrineResult;

/// Options narrowing a single category scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct ScanOptions {
    /// Upper bound on objects listed for the category
    max_records: Option<usize>,
    /// Skip records uploaded before this instant
    since: Option<DateTime<Utc>>,
}

impl ScanOptions {
    /// Options with a listing ceiling.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = Some(max_records);
        self
    }

    /// Options that skip older records.
    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Whether a record uploaded at `uploaded_at` passes the `since` hint.
    pub fn admits(&self, uploaded_at: &DateTime<Utc>) -> bool {
        self.since.map(|since| *uploaded_at >= since).unwrap_or(true)
    }
}

/// Trait for interchangeable media storage backends.
///
/// Implementations list category contents as raw physical records and remove
/// objects by URL. Version resolution happens above this layer.
#[async_trait::async_trait]
pub trait AssetBackend: Send + Sync {
    /// Which backend this is.
    fn backend(&self) -> Backend;

    /// Whether `url` points into storage managed by this backend.
    fn owns_url(&self, url: &str) -> bool;

    /// List the media objects of one category.
    ///
    /// A category whose directory or prefix does not exist yields an empty list.
    async fn scan(
        &self,
        category: Category,
        options: &ScanOptions,
    ) -> VitrineResult<Vec<RawAssetRecord>>;

    /// Delete the object behind `url`.
    ///
    /// # Returns
    ///
    /// `true` if an object was removed, `false` if there was nothing to remove.
    /// Both are success.
    async fn delete(&self, url: &str) -> VitrineResult<bool>;

    /// Store a new version of `display_name` under a freshly versioned physical name.
    async fn store(
        &self,
        category: Category,
        display_name: &str,
        data: &[u8],
    ) -> VitrineResult<RawAssetRecord>;
}

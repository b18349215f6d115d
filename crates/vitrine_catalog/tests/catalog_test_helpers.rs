//! Test helpers for catalog tests.
//!
//! Provides an in-memory backend with controllable timestamps and failures.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};
use vitrine_catalog::{CapabilityResolver, CatalogConfig, CatalogEngine, EnvironmentSignals};
use vitrine_core::{Backend, Category, RawAssetRecord};
use vitrine_error::VitrineResult;
use vitrine_storage::{AssetBackend, BackendSet, ScanOptions, StorageError, StorageErrorKind};

/// Blob domain used by object store fixtures.
pub const BLOB_DOMAIN: &str = "public.blob.example.com";

/// Timestamp `secs` seconds after a fixed epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// In-memory backend recording deletions.
pub struct MemoryBackend {
    kind: Backend,
    base_url: String,
    records: Mutex<Vec<RawAssetRecord>>,
    deleted: Mutex<Vec<String>>,
    fail_categories: Vec<Category>,
    fail_urls: Vec<String>,
}

impl MemoryBackend {
    /// Backend posing as the local filesystem under `/media`.
    pub fn local() -> Self {
        Self::new(Backend::Local, "/media")
    }

    /// Backend posing as the object store.
    pub fn object_store() -> Self {
        Self::new(Backend::ObjectStore, &format!("https://s1.{}", BLOB_DOMAIN))
    }

    fn new(kind: Backend, base_url: &str) -> Self {
        Self {
            kind,
            base_url: base_url.to_string(),
            records: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            fail_categories: Vec::new(),
            fail_urls: Vec::new(),
        }
    }

    /// Make scans of `category` fail.
    pub fn failing_category(mut self, category: Category) -> Self {
        self.fail_categories.push(category);
        self
    }

    /// Make deletion of `url` fail.
    pub fn failing_url(mut self, url: impl Into<String>) -> Self {
        self.fail_urls.push(url.into());
        self
    }

    /// URL this backend publishes `raw_name` under.
    pub fn url(&self, category: Category, raw_name: &str) -> String {
        format!("{}/{}/{}", self.base_url, category, raw_name)
    }

    /// Add an object uploaded `secs` after the fixture epoch.
    pub fn add(&self, category: Category, raw_name: &str, secs: i64) -> String {
        let url = self.url(category, raw_name);
        self.records.lock().unwrap().push(RawAssetRecord {
            category,
            raw_name: raw_name.to_string(),
            url: url.clone(),
            size_bytes: 1000 + secs.unsigned_abs(),
            uploaded_at: at(secs),
        });
        url
    }

    /// Every URL a delete was attempted for, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    /// Raw names still stored.
    pub fn remaining(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.raw_name.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl AssetBackend for MemoryBackend {
    fn backend(&self) -> Backend {
        self.kind
    }

    fn owns_url(&self, url: &str) -> bool {
        url.starts_with(&format!("{}/", self.base_url))
    }

    async fn scan(
        &self,
        category: Category,
        options: &ScanOptions,
    ) -> VitrineResult<Vec<RawAssetRecord>> {
        if self.fail_categories.contains(&category) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied(
                category.to_string(),
            ))
            .into());
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.category == category && options.admits(&r.uploaded_at))
            .cloned()
            .collect())
    }

    async fn delete(&self, url: &str) -> VitrineResult<bool> {
        self.deleted.lock().unwrap().push(url.to_string());
        if self.fail_urls.iter().any(|u| u == url) {
            return Err(
                StorageError::new(StorageErrorKind::PermissionDenied(url.to_string())).into(),
            );
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.url != url);
        Ok(records.len() < before)
    }

    async fn store(
        &self,
        _category: Category,
        _display_name: &str,
        _data: &[u8],
    ) -> VitrineResult<RawAssetRecord> {
        Err(StorageError::new(StorageErrorKind::Unavailable("memory".to_string())).into())
    }
}

/// Signals under which both backends are usable.
pub fn all_available() -> EnvironmentSignals {
    EnvironmentSignals::default()
        .with_local_root_configured(true)
        .with_local_root_writable(true)
        .with_object_store_credential(true)
}

/// Signals under which only the local backend is usable.
pub fn local_only() -> EnvironmentSignals {
    EnvironmentSignals::default()
        .with_local_root_configured(true)
        .with_local_root_writable(true)
}

/// Engine serving from `backend` with default settings.
pub fn engine_with(backend: Arc<MemoryBackend>, signals: EnvironmentSignals) -> CatalogEngine {
    CatalogEngine::new(
        CatalogConfig::default(),
        CapabilityResolver::new(signals),
        BackendSet::new().with(backend),
    )
}

//! Catalog query engine.

use crate::{
    AppliedFilters, CapabilityResolver, CatalogConfig, CatalogRequest, CatalogResponse,
    CatalogStats, CleanupItem, CleanupReport, EnvironmentSignals, Pagination, StatsBlock,
    VitrineConfig, apply_search, resolve_versions, sort_newest_first, superseded_of,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vitrine_core::{Backend, BackendHint, CapabilityDescriptor, Category, RawAssetRecord};
use vitrine_error::{StorageError, StorageErrorKind, VitrineResult};
use vitrine_storage::{
    AssetBackend, BackendSet, HttpBlobClient, LocalFileScanner, ObjectStoreScanner, ScanOptions,
    scan_categories,
};

/// Per-item outcome of the deletion interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionResult {
    /// URL that was asked for
    pub url: String,
    /// The call succeeded (including "already absent")
    pub success: bool,
    /// An object was actually removed
    pub removed: bool,
    /// Failure reason
    pub error: Option<String>,
}

/// Answers catalog queries by re-scanning the selected backend every time.
///
/// Holds no catalog state between requests.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    settings: CatalogConfig,
    capabilities: CapabilityResolver,
    backends: BackendSet,
}

impl CatalogEngine {
    /// Engine over explicitly constructed parts.
    pub fn new(settings: CatalogConfig, capabilities: CapabilityResolver, backends: BackendSet) -> Self {
        Self {
            settings,
            capabilities,
            backends,
        }
    }

    /// Build backends from configuration and decide availability from `signals`.
    ///
    /// The local backend is installed when a media root is configured, the
    /// object store when its credential is present.
    ///
    /// # Errors
    ///
    /// Fails on an inconsistent category mapping or an unusable HTTP client.
    #[tracing::instrument(skip_all)]
    pub fn from_config(config: &VitrineConfig, signals: EnvironmentSignals) -> VitrineResult<Self> {
        let paths = config.category_paths()?;
        let mut backends = BackendSet::new();

        if let Some(root) = config.local().media_root() {
            backends = backends.with(Arc::new(LocalFileScanner::new(
                root.clone(),
                config.local().public_prefix().clone(),
                paths.clone(),
            )));
        }

        let store = config.object_store();
        if let Some(token) = store.token_from_env() {
            let client = HttpBlobClient::new(store.api_url().clone(), token, store.request_timeout())?;
            backends = backends.with(Arc::new(ObjectStoreScanner::new(
                Arc::new(client),
                paths,
                store.public_domain().clone(),
                *store.list_page_size(),
            )));
        }

        tracing::info!(?backends, "Catalog engine configured");
        Ok(Self::new(
            config.catalog().clone(),
            CapabilityResolver::new(signals),
            backends,
        ))
    }

    /// Query bounds and scan budget.
    pub fn settings(&self) -> &CatalogConfig {
        &self.settings
    }

    /// Configured backends.
    pub fn backends(&self) -> &BackendSet {
        &self.backends
    }

    /// Availability of both backends.
    pub fn capabilities(&self) -> Vec<CapabilityDescriptor> {
        self.capabilities.resolve()
    }

    /// Pick the backend for `hint`, or explain why none can serve.
    fn select(&self, hint: BackendHint) -> Result<(Backend, &Arc<dyn AssetBackend>), (Backend, String)> {
        if let Some(requested) = hint.backend() {
            let descriptor = self.capabilities.descriptor(requested);
            if !descriptor.available {
                return Err((requested, unavailable_message(&descriptor)));
            }
        }

        let backend = self.capabilities.effective_backend(hint);
        let descriptor = self.capabilities.descriptor(backend);
        if !descriptor.available {
            return Err((backend, unavailable_message(&descriptor)));
        }

        match self.backends.get(backend) {
            Some(instance) => Ok((backend, instance)),
            None => Err((
                backend,
                format!("Storage backend {} is not configured in this deployment", backend),
            )),
        }
    }

    /// Answer one catalog query.
    ///
    /// Never fails: an unavailable backend yields an empty catalog with a
    /// message, and failing categories contribute nothing.
    #[tracing::instrument(skip(self), fields(page = request.page, category = ?request.category))]
    pub async fn query(&self, request: &CatalogRequest) -> CatalogResponse {
        let request = request.normalized(&self.settings);
        let limit = request.page_size();

        let (platform, backend) = match self.select(request.platform) {
            Ok(selected) => selected,
            Err((platform, message)) => {
                tracing::warn!(%platform, %message, "No usable backend, returning empty catalog");
                return CatalogResponse::empty(&request, platform, message);
            }
        };

        let categories = request
            .category
            .map(|category| vec![category])
            .unwrap_or_else(Category::all);
        let options =
            ScanOptions::default().with_max_records(self.settings.scan_ceiling(request.page, limit));

        let summary = scan_categories(
            backend.as_ref(),
            &categories,
            &options,
            self.settings.scan_limits(),
        )
        .await;

        let mut universe = resolve_versions(&summary.records);
        sort_newest_first(&mut universe);
        let all = CatalogStats::from_assets(&universe);

        let matching = apply_search(universe, request.search.as_deref());
        let filtered = CatalogStats::from_assets(&matching);
        let pagination = Pagination::new(request.page, limit, matching.len());
        let assets = pagination.slice(&matching).to_vec();

        tracing::info!(
            %platform,
            raw = summary.records.len(),
            total = all.total_assets,
            matching = filtered.total_assets,
            returned = assets.len(),
            "Catalog query answered"
        );

        CatalogResponse {
            assets,
            pagination,
            stats: StatsBlock { all, filtered },
            platform,
            filters: AppliedFilters {
                category: request.category,
                search: request.search.clone(),
            },
            message: None,
            timestamp: Utc::now(),
        }
    }

    /// Delete each URL independently, routed by URL shape.
    ///
    /// One failure never stops the rest; there is no all-or-nothing mode.
    #[tracing::instrument(skip(self, urls), fields(count = urls.len()))]
    pub async fn delete_assets(&self, urls: &[String]) -> Vec<DeletionResult> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            let result = match self.backends.delete_url(url).await {
                Ok(removed) => DeletionResult {
                    url: url.clone(),
                    success: true,
                    removed,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(%url, error = %e, "Asset deletion failed");
                    DeletionResult {
                        url: url.clone(),
                        success: false,
                        removed: false,
                        error: Some(e.to_string()),
                    }
                }
            };
            results.push(result);
        }
        results
    }

    /// Raw records hidden behind a newer version, optionally in one category.
    ///
    /// # Errors
    ///
    /// Unlike [`Self::query`], an unavailable backend is an error here.
    #[tracing::instrument(skip(self))]
    pub async fn superseded(
        &self,
        hint: BackendHint,
        category: Option<Category>,
    ) -> VitrineResult<Vec<RawAssetRecord>> {
        let (_, backend) = self
            .select(hint)
            .map_err(|(_, message)| StorageError::new(StorageErrorKind::Unavailable(message)))?;

        let categories = category.map(|c| vec![c]).unwrap_or_else(Category::all);
        let options = ScanOptions::default().with_max_records(*self.settings.scan_ceiling_max());
        let summary = scan_categories(
            backend.as_ref(),
            &categories,
            &options,
            self.settings.scan_limits(),
        )
        .await;

        Ok(superseded_of(&summary.records))
    }

    /// Delete superseded records. With `dry_run` every item stays pending.
    #[tracing::instrument(skip(self))]
    pub async fn prune_superseded(
        &self,
        hint: BackendHint,
        category: Option<Category>,
        dry_run: bool,
    ) -> VitrineResult<CleanupReport> {
        let superseded = self.superseded(hint, category).await?;
        let mut report = CleanupReport::default();
        for record in superseded {
            let item = CleanupItem::pending(record.url);
            let item = if dry_run {
                item
            } else {
                item.attempt(&self.backends).await
            };
            report.items.push(item);
        }

        tracing::info!(
            dry_run,
            candidates = report.items.len(),
            deleted = report.deleted().len(),
            failed = report.failed().len(),
            "Superseded prune finished"
        );
        Ok(report)
    }
}

fn unavailable_message(descriptor: &CapabilityDescriptor) -> String {
    format!(
        "Storage backend {} is unavailable: {}",
        descriptor.backend,
        descriptor.reason.as_deref().unwrap_or("unknown reason")
    )
}

//! Catalog request and response types.

use crate::CatalogConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use vitrine_core::{Backend, BackendHint, Category, MediaAsset};
use vitrine_error::VitrineResult;

/// Page size used when neither the request nor the configuration gives one.
pub const DEFAULT_LIMIT: usize = 50;

/// Parameters of one catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRequest {
    /// Backend preference
    pub platform: BackendHint,
    /// 1-indexed page number
    pub page: usize,
    /// Page size; unset uses the configured default, and the engine clamps it
    pub limit: Option<usize>,
    /// Restrict to one category
    pub category: Option<Category>,
    /// Case-insensitive substring of the display filename
    pub search: Option<String>,
}

impl Default for CatalogRequest {
    fn default() -> Self {
        Self {
            platform: BackendHint::Auto,
            page: 1,
            limit: None,
            category: None,
            search: None,
        }
    }
}

impl CatalogRequest {
    /// Build a request from raw query-string parameters.
    ///
    /// Recognizes `platform`, `page`, `limit`, `category`, and `search`.
    /// Unparsable numbers fall back to their defaults and blank values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` for a category outside the fixed set and
    /// `InvalidParameter` for an unknown platform.
    pub fn from_params(params: &HashMap<String, String>) -> VitrineResult<Self> {
        let defaults = Self::default();
        let value = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let platform = match value("platform") {
            Some(platform) => platform.parse::<BackendHint>()?,
            None => BackendHint::Auto,
        };
        let category = value("category")
            .map(|category| category.parse::<Category>())
            .transpose()?;

        Ok(Self {
            platform,
            page: value("page")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.page),
            limit: value("limit").and_then(|l| l.parse().ok()),
            category,
            search: value("search").map(str::to_string),
        })
    }

    /// Copy with page at least 1, limit clamped, and blank search dropped.
    pub fn normalized(&self, settings: &CatalogConfig) -> Self {
        Self {
            platform: self.platform,
            page: self.page.max(1),
            limit: Some(settings.clamp_limit(
                self.limit.unwrap_or(*settings.default_limit()),
            )),
            category: self.category,
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// Page size, falling back to [`DEFAULT_LIMIT`].
    pub fn page_size(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Position of one page within the filtered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-indexed page number
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Items in the filtered set
    pub total: usize,
    /// `ceil(total / limit)`
    pub total_pages: usize,
    /// A later page exists
    pub has_next: bool,
    /// An earlier page exists
    pub has_prev: bool,
}

impl Pagination {
    /// Pagination for `total` items; `page` below 1 is treated as 1.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index range of this page within the full set.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.limit).min(self.total);
        let end = start.saturating_add(self.limit).min(self.total);
        start..end
    }

    /// The items of this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}

/// Aggregate counts over a set of assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of assets
    pub total_assets: usize,
    /// Sum of asset sizes in bytes
    pub total_size: u64,
    /// Asset count per category
    pub by_category: BTreeMap<Category, usize>,
    /// Asset count per lower-cased extension
    pub by_type: BTreeMap<String, usize>,
}

impl CatalogStats {
    /// Compute statistics over `assets`.
    pub fn from_assets(assets: &[MediaAsset]) -> Self {
        let mut stats = Self::default();
        for asset in assets {
            stats.total_assets += 1;
            stats.total_size += asset.size_bytes;
            *stats.by_category.entry(asset.category).or_default() += 1;
            *stats.by_type.entry(asset.file_type.clone()).or_default() += 1;
        }
        stats
    }
}

/// "How much exists" next to "how much matches".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBlock {
    /// Over every resolved asset scanned for the request, before search
    pub all: CatalogStats,
    /// Over the filtered result set
    pub filtered: CatalogStats,
}

/// Filters echoed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    /// Category filter, if any
    pub category: Option<Category>,
    /// Search filter, if any
    pub search: Option<String>,
}

/// Result of a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// Assets on the requested page, newest first
    pub assets: Vec<MediaAsset>,
    /// Page position
    pub pagination: Pagination,
    /// Unfiltered and filtered statistics
    pub stats: StatsBlock,
    /// Backend that served (or would have served) the request
    pub platform: Backend,
    /// Filters that were applied
    pub filters: AppliedFilters,
    /// Explanation when the catalog is empty for a configuration reason
    pub message: Option<String>,
    /// When the response was produced
    pub timestamp: DateTime<Utc>,
}

impl CatalogResponse {
    /// Empty catalog carrying an explanation.
    pub fn empty(request: &CatalogRequest, platform: Backend, message: impl Into<String>) -> Self {
        Self {
            assets: Vec::new(),
            pagination: Pagination::new(request.page, request.page_size(), 0),
            stats: StatsBlock::default(),
            platform,
            filters: AppliedFilters {
                category: request.category,
                search: request.search.clone(),
            },
            message: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

/// Keep assets whose display filename contains `search`, ignoring case.
pub fn apply_search(assets: Vec<MediaAsset>, search: Option<&str>) -> Vec<MediaAsset> {
    match search {
        None => assets,
        Some(needle) => {
            let needle = needle.to_lowercase();
            assets
                .into_iter()
                .filter(|asset| asset.display_filename.to_lowercase().contains(&needle))
                .collect()
        }
    }
}

/// Newest first, then category, then display filename.
pub fn sort_newest_first(assets: &mut [MediaAsset]) {
    assets.sort_by(|a, b| {
        b.uploaded_at
            .cmp(&a.uploaded_at)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.display_filename.cmp(&b.display_filename))
    });
}

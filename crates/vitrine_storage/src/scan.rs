//! Bounded concurrent scanning across categories.

use crate::{AssetBackend, ScanOptions};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use vitrine_core::{Category, RawAssetRecord};

/// Parallelism and time budget for a multi-category scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters)]
pub struct ScanLimits {
    concurrency: usize,
    timeout: Duration,
}

impl ScanLimits {
    /// Limits with at least one scan in flight.
    pub fn new(concurrency: usize, timeout: Duration) -> Self {
        Self {
            concurrency: concurrency.max(1),
            timeout,
        }
    }
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self::new(4, Duration::from_secs(20))
    }
}

/// Outcome of a multi-category scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records from every category that scanned successfully
    pub records: Vec<RawAssetRecord>,
    /// Categories whose scan failed or timed out
    pub failed: Vec<Category>,
}

/// Scan `categories` on `backend`, at most `limits.concurrency` at a time.
///
/// A category that errors or exceeds `limits.timeout` is logged and
/// contributes no records; the others are unaffected. Record order across
/// categories is unspecified.
#[tracing::instrument(skip(backend, categories, options), fields(backend = %backend.backend(), categories = categories.len()))]
pub async fn scan_categories(
    backend: &dyn AssetBackend,
    categories: &[Category],
    options: &ScanOptions,
    limits: ScanLimits,
) -> ScanSummary {
    let timeout = limits.timeout;
    let outcomes: Vec<_> = stream::iter(categories.iter().copied())
        .map(|category| async move {
            let outcome = tokio::time::timeout(timeout, backend.scan(category, options)).await;
            (category, outcome)
        })
        .buffer_unordered(limits.concurrency)
        .collect()
        .await;

    let mut summary = ScanSummary::default();
    for (category, outcome) in outcomes {
        match outcome {
            Ok(Ok(records)) => summary.records.extend(records),
            Ok(Err(e)) => {
                tracing::warn!(%category, error = %e, "Category scan failed, continuing without it");
                summary.failed.push(category);
            }
            Err(_) => {
                tracing::warn!(%category, timeout_secs = timeout.as_secs_f64(), "Category scan timed out, continuing without it");
                summary.failed.push(category);
            }
        }
    }
    summary.failed.sort();

    tracing::info!(
        records = summary.records.len(),
        failed = summary.failed.len(),
        "Scan complete"
    );
    summary
}

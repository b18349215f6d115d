//! Content reference extraction and best-effort asset cleanup.
//!
//! When a page, product, or brand is edited or deleted, the managed asset
//! URLs it no longer references are deleted from storage. Cleanup runs after
//! the content write has committed and never reports back into it: each
//! deletion is attempted once, and a failure is logged and left terminal.

use crate::VitrineConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;
use vitrine_core::{Backend, Category, ContentImageReference};
use vitrine_error::VitrineResult;
use vitrine_storage::{
    BackendSet, CategoryPaths, decode_segment, host_matches, strip_query, url_host, url_key,
};

static ATTRIBUTE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:src|href|poster|data-src)\s*=\s*["']([^"']+)["']"#)
        .expect("Valid attribute URL regex")
});

static CSS_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*['"]?([^'")\s]+)['"]?\s*\)"#)
        .expect("Valid CSS URL regex")
});

static BARE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s"'<>()]+|/[A-Za-z0-9_\-./]+\.[A-Za-z0-9]+"#)
        .expect("Valid bare URL regex")
});

/// Decides whether a URL points at storage this engine manages.
///
/// Managed means either `<local prefix>/<category path>/<file>` or a URL on
/// the object store domain whose key is `<category path>/<file>`. Anything
/// else, including other hosts and unknown paths, is left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatcher {
    local_prefix: String,
    object_domain: String,
    paths: CategoryPaths,
}

impl ReferenceMatcher {
    /// Matcher for the given prefix, domain, and category layout.
    pub fn new(
        local_prefix: impl Into<String>,
        object_domain: impl Into<String>,
        paths: CategoryPaths,
    ) -> Self {
        let local_prefix = local_prefix.into();
        Self {
            local_prefix: format!("/{}", local_prefix.trim_matches('/')),
            object_domain: object_domain.into().trim().to_ascii_lowercase(),
            paths,
        }
    }

    /// Matcher for the configured local prefix, object store domain, and layout.
    ///
    /// # Errors
    ///
    /// Fails when the category mapping is inconsistent.
    pub fn from_config(config: &VitrineConfig) -> VitrineResult<Self> {
        Ok(Self::new(
            config.local().public_prefix().clone(),
            config.object_store().public_domain().clone(),
            config.category_paths()?,
        ))
    }

    /// Whether `url` is a managed asset URL.
    pub fn is_managed(&self, url: &str) -> bool {
        self.asset_key(url).is_some()
    }

    /// Stored object a managed URL points at, or `None` for unmanaged URLs.
    ///
    /// Query strings, fragments, host case, and percent-encoding of the file
    /// name do not change the key.
    pub fn asset_key(&self, url: &str) -> Option<AssetKey> {
        if let Some(host) = url_host(url) {
            if !host_matches(&host, &self.object_domain) {
                return None;
            }
            let (category, file) = self.paths.locate(url_key(url)?)?;
            return Some(AssetKey::new(Backend::ObjectStore, category, &file));
        }

        let rest = strip_query(url)
            .strip_prefix(self.local_prefix.as_str())?
            .strip_prefix('/')?;
        let (category, file) = self.paths.locate(rest)?;
        Some(AssetKey::new(Backend::Local, category, &file))
    }
}

/// Identity of one stored object, independent of how its URL was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    /// Backend holding the object
    pub backend: Backend,
    /// Category the object lives in
    pub category: Category,
    /// Decoded file name
    pub file: String,
}

impl AssetKey {
    fn new(backend: Backend, category: Category, file: &str) -> Self {
        Self {
            backend,
            category,
            file: decode_segment(file),
        }
    }
}

/// Rich-text and image fields of one content record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFields {
    /// `(field name, html or plain value)` pairs
    pub fields: Vec<(String, String)>,
    /// Dedicated featured image URL, if populated
    pub featured_image: Option<String>,
}

impl ContentFields {
    /// No fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rich-text field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Set the featured image.
    pub fn with_featured_image(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.featured_image = (!url.trim().is_empty()).then_some(url);
        self
    }
}

/// Candidate URLs in one field value, in order of appearance.
fn candidates(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let mut found: Vec<(usize, String)> = Vec::new();

    for pattern in [&*ATTRIBUTE_URL, &*CSS_URL] {
        for captures in pattern.captures_iter(value) {
            if let Some(m) = captures.get(1) {
                found.push((m.start(), m.as_str().to_string()));
            }
        }
    }
    for m in BARE_URL.find_iter(value) {
        found.push((m.start(), m.as_str().to_string()));
    }
    if !trimmed.is_empty() && !trimmed.contains(char::is_whitespace) && !trimmed.contains('<') {
        found.push((0, trimmed.to_string()));
    }

    found.sort_by_key(|(start, _)| *start);
    found
        .into_iter()
        .map(|(_, url)| url.trim().replace("&amp;", "&"))
        .collect()
}

/// Managed asset references in `content`, one per stored object, first occurrence wins.
pub fn extract_references(
    content: &ContentFields,
    matcher: &ReferenceMatcher,
) -> Vec<ContentImageReference> {
    let mut seen: HashSet<AssetKey> = HashSet::new();
    let featured = content
        .featured_image
        .iter()
        .map(|url| ("featuredImage".to_string(), url.trim().to_string()));
    let embedded = content.fields.iter().flat_map(|(field, value)| {
        candidates(value)
            .into_iter()
            .map(move |url| (field.clone(), url))
    });

    embedded
        .chain(featured)
        .filter(|(_, url)| {
            matcher
                .asset_key(url)
                .is_some_and(|key| seen.insert(key))
        })
        .map(|(owner_field, url)| ContentImageReference { url, owner_field })
        .collect()
}

/// Managed URLs in `content`, one per stored object, in order of first appearance.
pub fn extract_urls(content: &ContentFields, matcher: &ReferenceMatcher) -> Vec<String> {
    extract_references(content, matcher)
        .into_iter()
        .map(|reference| reference.url)
        .collect()
}

/// URLs referenced by `before` whose stored object `after` no longer references.
pub fn removed_urls(
    before: &ContentFields,
    after: &ContentFields,
    matcher: &ReferenceMatcher,
) -> Vec<String> {
    let kept: HashSet<AssetKey> = extract_urls(after, matcher)
        .iter()
        .filter_map(|url| matcher.asset_key(url))
        .collect();
    extract_urls(before, matcher)
        .into_iter()
        .filter(|url| {
            matcher
                .asset_key(url)
                .is_some_and(|key| !kept.contains(&key))
        })
        .collect()
}

/// Lifecycle of one cleanup deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "camelCase")]
pub enum CleanupState {
    /// Not yet attempted
    #[display("pending")]
    Pending,
    /// Deletion in progress
    #[display("attempting")]
    Attempting,
    /// Removed, or already absent
    #[display("deleted")]
    Deleted,
    /// Attempt failed; logged and not retried
    #[display("failed: {}", _0)]
    Failed(String),
}

/// One URL moving through cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupItem {
    /// URL being deleted
    pub url: String,
    /// Where the item is in its lifecycle
    pub state: CleanupState,
}

impl CleanupItem {
    /// A pending item.
    pub fn pending(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: CleanupState::Pending,
        }
    }

    /// Attempt the deletion once. Only pending items are attempted.
    pub async fn attempt(mut self, backends: &BackendSet) -> Self {
        if self.state != CleanupState::Pending {
            return self;
        }
        self.state = CleanupState::Attempting;

        self.state = match backends.delete_url(&self.url).await {
            Ok(_) => CleanupState::Deleted,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "Asset cleanup failed");
                CleanupState::Failed(e.to_string())
            }
        };
        self
    }
}

/// Outcome of a cleanup batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    /// Every item, in request order
    pub items: Vec<CleanupItem>,
}

impl CleanupReport {
    /// URLs that were deleted (or already gone).
    pub fn deleted(&self) -> Vec<&str> {
        self.urls_where(|state| *state == CleanupState::Deleted)
    }

    /// URLs whose deletion failed.
    pub fn failed(&self) -> Vec<&str> {
        self.urls_where(|state| matches!(state, CleanupState::Failed(_)))
    }

    /// URLs never attempted (dry runs).
    pub fn pending(&self) -> Vec<&str> {
        self.urls_where(|state| *state == CleanupState::Pending)
    }

    fn urls_where(&self, predicate: impl Fn(&CleanupState) -> bool) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| predicate(&item.state))
            .map(|item| item.url.as_str())
            .collect()
    }
}

/// Deletes assets that content no longer references.
#[derive(Debug, Clone)]
pub struct CleanupCoordinator {
    backends: BackendSet,
    matcher: ReferenceMatcher,
}

impl CleanupCoordinator {
    /// Coordinator deleting through `backends`, touching only URLs `matcher` accepts.
    pub fn new(backends: BackendSet, matcher: ReferenceMatcher) -> Self {
        Self { backends, matcher }
    }

    /// Matcher deciding which URLs are managed.
    pub fn matcher(&self) -> &ReferenceMatcher {
        &self.matcher
    }

    /// Managed URLs in `content`.
    pub fn extract_references(&self, content: &ContentFields) -> Vec<ContentImageReference> {
        extract_references(content, &self.matcher)
    }

    /// Delete every URL `old` references that `new` does not.
    #[tracing::instrument(skip_all)]
    pub async fn diff_and_cleanup(&self, old: &ContentFields, new: &ContentFields) -> CleanupReport {
        let removed = removed_urls(old, new, &self.matcher);
        tracing::debug!(removed = removed.len(), "Computed orphaned asset references");
        self.run(removed).await
    }

    /// Delete every URL `content` references, featured image included.
    #[tracing::instrument(skip_all)]
    pub async fn cleanup_all(&self, content: &ContentFields) -> CleanupReport {
        self.run(extract_urls(content, &self.matcher)).await
    }

    /// Attempt each URL once, independently and in order.
    pub async fn run(&self, urls: Vec<String>) -> CleanupReport {
        let mut report = CleanupReport::default();
        for url in urls {
            report
                .items
                .push(CleanupItem::pending(url).attempt(&self.backends).await);
        }

        if !report.items.is_empty() {
            tracing::info!(
                deleted = report.deleted().len(),
                failed = report.failed().len(),
                "Asset cleanup finished"
            );
        }
        report
    }

    /// Hand [`Self::diff_and_cleanup`] to the runtime after a content update committed.
    ///
    /// The handle may be dropped; the cleanup still runs to completion.
    pub fn schedule_diff_and_cleanup(
        &self,
        old: ContentFields,
        new: ContentFields,
    ) -> tokio::task::JoinHandle<CleanupReport> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.diff_and_cleanup(&old, &new).await })
    }

    /// Hand [`Self::cleanup_all`] to the runtime after a content delete committed.
    pub fn schedule_cleanup_all(
        &self,
        content: ContentFields,
    ) -> tokio::task::JoinHandle<CleanupReport> {
        let coordinator = self.clone();
        tokio::spawn(async move { coordinator.cleanup_all(&content).await })
    }
}

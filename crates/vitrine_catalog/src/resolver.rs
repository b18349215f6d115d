//! Version resolution.
//!
//! Groups raw records by `(category, display filename)` and keeps only the
//! newest member of each group visible.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use vitrine_core::{Category, MediaAsset, RawAssetRecord, display_name};

/// Raw records sharing one display identity within a category.
///
/// Built fresh on every scan. Records are held newest first, so the first one
/// is the current version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGroup {
    category: Category,
    display_filename: String,
    records: Vec<RawAssetRecord>,
}

/// Newest first; equal timestamps fall back to descending raw name.
fn newest_first(a: &RawAssetRecord, b: &RawAssetRecord) -> Ordering {
    b.uploaded_at
        .cmp(&a.uploaded_at)
        .then_with(|| b.raw_name.cmp(&a.raw_name))
}

impl VersionGroup {
    fn new(category: Category, display_filename: String, mut records: Vec<RawAssetRecord>) -> Self {
        records.sort_by(newest_first);
        Self {
            category,
            display_filename,
            records,
        }
    }

    /// Category of the group.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Version-stripped name shared by the group.
    pub fn display_filename(&self) -> &str {
        &self.display_filename
    }

    /// The record callers see.
    pub fn current(&self) -> &RawAssetRecord {
        &self.records[0]
    }

    /// Every record except the current one, newest first.
    pub fn superseded(&self) -> &[RawAssetRecord] {
        &self.records[1..]
    }

    /// Number of physical records in the group.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; groups are never empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The exposed asset: the current record under the display name.
    pub fn to_asset(&self) -> MediaAsset {
        MediaAsset::from_current(self.current(), self.display_filename.clone())
    }
}

/// Group raw records by identity, in `(category, display filename)` order.
pub fn group_versions(records: &[RawAssetRecord]) -> Vec<VersionGroup> {
    let mut groups: BTreeMap<(Category, String), Vec<RawAssetRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry((record.category, display_name(&record.raw_name)))
            .or_default()
            .push(record.clone());
    }

    groups
        .into_iter()
        .map(|((category, display), records)| VersionGroup::new(category, display, records))
        .collect()
}

/// Current version of every identity.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vitrine_catalog::resolve_versions;
/// use vitrine_core::{Category, RawAssetRecord};
///
/// let record = |name: &str, secs| RawAssetRecord {
///     category: Category::Brands,
///     raw_name: name.to_string(),
///     url: format!("/media/brands/{}", name),
///     size_bytes: 1,
///     uploaded_at: Utc.timestamp_opt(secs, 0).unwrap(),
/// };
/// let assets = resolve_versions(&[
///     record("logo_v100_ab12.png", 100),
///     record("logo_v200_cd34.png", 200),
/// ]);
/// assert_eq!(assets.len(), 1);
/// assert_eq!(assets[0].display_filename, "logo.png");
/// assert_eq!(assets[0].raw_name, "logo_v200_cd34.png");
/// ```
pub fn resolve_versions(records: &[RawAssetRecord]) -> Vec<MediaAsset> {
    group_versions(records)
        .iter()
        .map(VersionGroup::to_asset)
        .collect()
}

/// Records hidden behind a newer version of the same identity.
pub fn superseded_of(records: &[RawAssetRecord]) -> Vec<RawAssetRecord> {
    group_versions(records)
        .into_iter()
        .flat_map(|group| group.records.into_iter().skip(1))
        .collect()
}

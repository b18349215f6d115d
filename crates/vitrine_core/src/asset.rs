//! Raw storage records and resolved catalog assets.

use crate::{Category, extension_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One physical object as listed by a backend scanner.
///
/// The name may embed a version suffix; see [`crate::VersionedName`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssetRecord {
    /// Category the object was found under
    pub category: Category,
    /// Physical name as stored
    pub raw_name: String,
    /// Fully resolved, fetchable address
    pub url: String,
    /// Stored size in bytes
    pub size_bytes: u64,
    /// Upload or modification time reported by the backend
    pub uploaded_at: DateTime<Utc>,
}

impl RawAssetRecord {
    /// Lower-cased file extension, or an empty string when there is none.
    pub fn file_type(&self) -> String {
        extension_of(&self.raw_name).unwrap_or_default()
    }
}

/// The catalog's unit of truth: the current version of one logical asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Category half of the identity
    pub category: Category,
    /// Version-stripped name, the other half of the identity
    pub display_filename: String,
    /// Physical name of the current version
    pub raw_name: String,
    /// Fetchable address of the current version
    pub url: String,
    /// Lower-cased extension
    #[serde(rename = "type")]
    pub file_type: String,
    /// Stored size of the current version
    pub size_bytes: u64,
    /// Upload time of the current version
    pub uploaded_at: DateTime<Utc>,
}

impl MediaAsset {
    /// Build the exposed asset from the winning record of a version group.
    pub fn from_current(record: &RawAssetRecord, display_filename: impl Into<String>) -> Self {
        Self {
            category: record.category,
            display_filename: display_filename.into(),
            raw_name: record.raw_name.clone(),
            url: record.url.clone(),
            file_type: record.file_type(),
            size_bytes: record.size_bytes,
            uploaded_at: record.uploaded_at,
        }
    }

    /// `(category, display filename)` identity.
    pub fn identity(&self) -> (Category, &str) {
        (self.category, &self.display_filename)
    }
}

//! References to managed assets found inside content.

use serde::{Deserialize, Serialize};

/// A managed asset URL extracted from one field of a content record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentImageReference {
    /// The asset URL exactly as it appeared in the content
    pub url: String,
    /// Name of the field the URL was found in
    pub owner_field: String,
}

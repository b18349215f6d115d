//! Storage backend identifiers.

use serde::{Deserialize, Serialize};
use vitrine_error::{CatalogError, CatalogErrorKind};

/// One of the two interchangeable storage systems.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Local filesystem tree under the media root
    #[display("local")]
    Local,
    /// Cloud object store reached over its REST API
    #[display("object-store")]
    ObjectStore,
}

impl Backend {
    /// Both backends, in resolution order.
    pub fn all() -> [Backend; 2] {
        [Backend::Local, Backend::ObjectStore]
    }
}

/// Caller preference for which backend should serve a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum BackendHint {
    /// Let the capability resolver pick
    #[default]
    #[display("auto")]
    Auto,
    /// Prefer the local filesystem
    #[display("local")]
    Local,
    /// Prefer the object store
    #[display("object-store")]
    ObjectStore,
}

impl BackendHint {
    /// The backend explicitly asked for, if any.
    pub fn backend(&self) -> Option<Backend> {
        match self {
            BackendHint::Auto => None,
            BackendHint::Local => Some(Backend::Local),
            BackendHint::ObjectStore => Some(Backend::ObjectStore),
        }
    }
}

impl From<Backend> for BackendHint {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Local => BackendHint::Local,
            Backend::ObjectStore => BackendHint::ObjectStore,
        }
    }
}

impl std::str::FromStr for BackendHint {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(BackendHint::Auto),
            "local" | "filesystem" | "fs" => Ok(BackendHint::Local),
            "object-store" | "blob" | "vercel" | "cloud" => Ok(BackendHint::ObjectStore),
            other => Err(CatalogError::new(CatalogErrorKind::InvalidParameter {
                name: "platform".to_string(),
                reason: format!("unknown platform '{}'", other),
            })),
        }
    }
}

//! Top-level error wrapper types.

use crate::{CatalogError, ConfigError, JsonError, StorageError};

/// Every error a Vitrine crate can surface.
///
/// # Examples
///
/// ```
/// use vitrine_error::{VitrineError, JsonError};
///
/// let json_err = JsonError::new("Unexpected end of input");
/// let err: VitrineError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VitrineErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
    /// Catalog request or mapping error
    #[from(CatalogError)]
    Catalog(CatalogError),
}

/// Vitrine error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vitrine_error::{VitrineResult, ConfigError};
///
/// fn might_fail() -> VitrineResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vitrine Error: {}", _0)]
pub struct VitrineError(Box<VitrineErrorKind>);

impl VitrineError {
    /// Create a new error from a kind.
    pub fn new(kind: VitrineErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VitrineErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to VitrineErrorKind
impl<T> From<T> for VitrineError
where
    T: Into<VitrineErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vitrine operations.
pub type VitrineResult<T> = std::result::Result<T, VitrineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogErrorKind, StorageErrorKind};

    #[test]
    fn test_transport_failures_surface_as_storage_errors() {
        let err: VitrineError =
            StorageError::new(StorageErrorKind::Http("503: unavailable".to_string())).into();
        assert!(matches!(err.kind(), VitrineErrorKind::Storage(_)));
        assert!(err.to_string().contains("Object store request failed"));
    }

    #[test]
    fn test_each_source_maps_to_its_kind() {
        let config: VitrineError = ConfigError::new("bad").into();
        let json: VitrineError = JsonError::new("bad").into();
        let catalog: VitrineError =
            CatalogError::new(CatalogErrorKind::InvalidCategory("videos".to_string())).into();

        assert!(matches!(config.kind(), VitrineErrorKind::Config(_)));
        assert!(matches!(json.kind(), VitrineErrorKind::Json(_)));
        assert!(matches!(catalog.kind(), VitrineErrorKind::Catalog(_)));
    }
}

//! Catalog request and mapping errors.

/// Specific catalog error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CatalogErrorKind {
    /// Category is not part of the fixed enumeration
    #[display("Unknown category: {}", _0)]
    InvalidCategory(String),

    /// Request parameter could not be interpreted
    #[display("Invalid parameter '{}': {}", name, reason)]
    InvalidParameter {
        /// The parameter name
        name: String,
        /// Reason for rejection
        reason: String,
    },

    /// Category-to-path mapping contradicts itself
    #[display("Inconsistent category mapping: {}", _0)]
    InconsistentMapping(String),
}

/// Catalog error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Catalog Error: {} at line {} in {}", kind, line, file)]
pub struct CatalogError {
    kind: CatalogErrorKind,
    line: u32,
    file: &'static str,
}

impl CatalogError {
    /// Create a new catalog error with caller location tracking.
    #[track_caller]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CatalogErrorKind {
        &self.kind
    }
}

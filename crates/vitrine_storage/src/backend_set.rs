//! Configured backends and URL routing.

use crate::AssetBackend;
use std::sync::Arc;
use vitrine_core::Backend;
use vitrine_error::{StorageError, StorageErrorKind, VitrineResult};

/// The backends configured in this process.
///
/// Either slot may be empty when the deployment cannot provide it.
#[derive(Clone, Default)]
pub struct BackendSet {
    local: Option<Arc<dyn AssetBackend>>,
    object_store: Option<Arc<dyn AssetBackend>>,
}

impl std::fmt::Debug for BackendSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSet")
            .field("local", &self.local.is_some())
            .field("object_store", &self.object_store.is_some())
            .finish()
    }
}

impl BackendSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `backend` in the slot matching its [`Backend`] kind.
    pub fn with(mut self, backend: Arc<dyn AssetBackend>) -> Self {
        match backend.backend() {
            Backend::Local => self.local = Some(backend),
            Backend::ObjectStore => self.object_store = Some(backend),
        }
        self
    }

    /// The backend of the given kind, if configured.
    pub fn get(&self, backend: Backend) -> Option<&Arc<dyn AssetBackend>> {
        match backend {
            Backend::Local => self.local.as_ref(),
            Backend::ObjectStore => self.object_store.as_ref(),
        }
    }

    /// The configured backend that owns `url`, decided by URL shape.
    pub fn route(&self, url: &str) -> Option<&Arc<dyn AssetBackend>> {
        [self.object_store.as_ref(), self.local.as_ref()]
            .into_iter()
            .flatten()
            .find(|backend| backend.owns_url(url))
    }

    /// Delete `url` through whichever backend owns it.
    ///
    /// # Errors
    ///
    /// `Unavailable` when no configured backend recognizes the URL, otherwise
    /// whatever the owning backend reports.
    #[tracing::instrument(skip(self))]
    pub async fn delete_url(&self, url: &str) -> VitrineResult<bool> {
        let backend = self.route(url).ok_or_else(|| {
            StorageError::new(StorageErrorKind::Unavailable(format!(
                "no configured backend manages {}",
                url
            )))
        })?;
        backend.delete(url).await
    }
}

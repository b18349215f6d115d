//! Platform capability resolution.
//!
//! Decides from environment signals which backends this deployment can use,
//! and which one serves a request. Signals are plain values passed in; nothing
//! here reads process-wide state after construction.

use crate::VitrineConfig;
use derive_getters::Getters;
use std::path::Path;
use vitrine_core::{Backend, BackendHint, CapabilityDescriptor};

/// Environment variable that forces a backend (`local` or `object-store`).
pub const PLATFORM_OVERRIDE_VAR: &str = "VITRINE_PLATFORM";

/// Environment variable naming the hosting platform.
pub const PLATFORM_NAME_VAR: &str = "VITRINE_HOST";

/// Facts about the hosting environment, as opaque values.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct EnvironmentSignals {
    /// An object store access credential is present
    object_store_credential: bool,
    /// Name of the credential variable, for diagnostics
    #[setters(into)]
    credential_name: String,
    /// A local media root is configured
    local_root_configured: bool,
    /// The configured local media root can be written
    local_root_writable: bool,
    /// Explicit backend override
    #[setters(strip_option, into)]
    platform_override: Option<String>,
    /// Hosting platform name
    #[setters(into)]
    platform_name: String,
}

impl Default for EnvironmentSignals {
    fn default() -> Self {
        Self {
            object_store_credential: false,
            credential_name: "BLOB_READ_WRITE_TOKEN".to_string(),
            local_root_configured: false,
            local_root_writable: false,
            platform_override: None,
            platform_name: "local".to_string(),
        }
    }
}

impl EnvironmentSignals {
    /// Read signals from the process environment and probe the media root.
    #[tracing::instrument(skip(config))]
    pub fn from_env(config: &VitrineConfig) -> Self {
        let object_store_credential = config.object_store().token_from_env().is_some();

        let platform_name = if std::env::var_os("VERCEL").is_some() {
            "vercel".to_string()
        } else {
            std::env::var(PLATFORM_NAME_VAR)
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "local".to_string())
        };

        let platform_override = std::env::var(PLATFORM_OVERRIDE_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());

        let media_root = config.local().media_root().as_deref();
        let signals = Self {
            object_store_credential,
            credential_name: config.object_store().token_env().clone(),
            local_root_configured: media_root.is_some(),
            local_root_writable: media_root.map(probe_writable).unwrap_or(false),
            platform_override,
            platform_name,
        };

        tracing::debug!(?signals, "Read environment signals");
        signals
    }
}

/// Whether `root`, or the nearest existing ancestor it would be created in, is writable.
fn probe_writable(root: &Path) -> bool {
    let mut candidate = Some(root);
    while let Some(path) = candidate {
        if let Ok(metadata) = std::fs::metadata(path) {
            return metadata.is_dir() && !metadata.permissions().readonly();
        }
        candidate = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    }
    false
}

/// Resolves backend availability and selection from [`EnvironmentSignals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityResolver {
    signals: EnvironmentSignals,
}

impl CapabilityResolver {
    /// Resolver over the given signals.
    pub fn new(signals: EnvironmentSignals) -> Self {
        Self { signals }
    }

    /// Signals this resolver decides from.
    pub fn signals(&self) -> &EnvironmentSignals {
        &self.signals
    }

    /// Descriptors for both backends.
    pub fn resolve(&self) -> Vec<CapabilityDescriptor> {
        Backend::all()
            .into_iter()
            .map(|backend| self.descriptor(backend))
            .collect()
    }

    /// Descriptor for one backend.
    pub fn descriptor(&self, backend: Backend) -> CapabilityDescriptor {
        let platform = self.signals.platform_name.as_str();
        match backend {
            Backend::Local if !self.signals.local_root_configured => {
                CapabilityDescriptor::unavailable(
                    backend,
                    platform,
                    "local media root is not configured",
                )
            }
            Backend::Local if !self.signals.local_root_writable => {
                CapabilityDescriptor::unavailable(
                    backend,
                    platform,
                    format!("local media root is not writable on {}", platform),
                )
            }
            Backend::ObjectStore if !self.signals.object_store_credential => {
                CapabilityDescriptor::unavailable(
                    backend,
                    platform,
                    format!(
                        "object store credential ({}) is not set",
                        self.signals.credential_name
                    ),
                )
            }
            _ => CapabilityDescriptor::available(backend, platform),
        }
    }

    /// Whether a backend is usable.
    pub fn is_available(&self, backend: Backend) -> bool {
        self.descriptor(backend).available
    }

    /// Backend that should serve a request carrying `hint`.
    ///
    /// An available hinted backend wins. Otherwise: an available override,
    /// then the object store if a credential is present, then a writable local
    /// root. With nothing available this returns [`Backend::Local`], whose
    /// descriptor explains why it cannot serve.
    pub fn effective_backend(&self, hint: BackendHint) -> Backend {
        if let Some(requested) = hint.backend().filter(|b| self.is_available(*b)) {
            return requested;
        }

        let overridden = self
            .signals
            .platform_override
            .as_deref()
            .and_then(|value| value.parse::<BackendHint>().ok())
            .and_then(|hint| hint.backend())
            .filter(|b| self.is_available(*b));
        if let Some(backend) = overridden {
            return backend;
        }

        if self.is_available(Backend::ObjectStore) {
            Backend::ObjectStore
        } else {
            Backend::Local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_walks_up_to_existing_ancestor() {
        let dir = std::env::temp_dir();
        assert!(probe_writable(&dir.join("vitrine-probe-missing/deeper")));
    }
}

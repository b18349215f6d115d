//! Backend capability descriptors.

use crate::Backend;
use serde::{Deserialize, Serialize};

/// Whether a backend is usable in the current deployment, and why not if not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityDescriptor {
    /// Backend being described
    pub backend: Backend,
    /// Whether the backend can serve requests
    pub available: bool,
    /// Populated only when unavailable
    pub reason: Option<String>,
    /// Hosting platform name reported by the environment
    pub platform_name: String,
}

impl CapabilityDescriptor {
    /// Descriptor for a usable backend.
    pub fn available(backend: Backend, platform_name: impl Into<String>) -> Self {
        Self {
            backend,
            available: true,
            reason: None,
            platform_name: platform_name.into(),
        }
    }

    /// Descriptor for a backend that cannot be used, with the reason.
    pub fn unavailable(
        backend: Backend,
        platform_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            available: false,
            reason: Some(reason.into()),
            platform_name: platform_name.into(),
        }
    }
}

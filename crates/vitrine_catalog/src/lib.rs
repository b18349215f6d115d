//! Catalog engine for the Vitrine media library.
//!
//! Sits on top of the storage backends and turns raw listings into the
//! catalog callers see:
//!
//! - [`CapabilityResolver`] decides which backend can serve a request
//! - [`resolve_versions`] collapses version-suffixed objects to one asset per identity
//! - [`CatalogEngine`] filters, sorts, paginates, and summarizes
//! - [`CleanupCoordinator`] deletes assets content no longer references

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capability;
mod cleanup;
mod config;
mod engine;
mod query;
mod resolver;

pub use capability::{
    CapabilityResolver, EnvironmentSignals, PLATFORM_NAME_VAR, PLATFORM_OVERRIDE_VAR,
};
pub use cleanup::{
    AssetKey, CleanupCoordinator, CleanupItem, CleanupReport, CleanupState, ContentFields,
    ReferenceMatcher, extract_references, extract_urls, removed_urls,
};
pub use config::{CatalogConfig, LocalConfig, ObjectStoreConfig, VitrineConfig};
pub use engine::{CatalogEngine, DeletionResult};
pub use query::{
    AppliedFilters, CatalogRequest, CatalogResponse, CatalogStats, DEFAULT_LIMIT, Pagination,
    StatsBlock, apply_search, sort_newest_first,
};
pub use resolver::{VersionGroup, group_versions, resolve_versions, superseded_of};

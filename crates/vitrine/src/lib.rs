//! Vitrine - media asset catalog and versioning engine
//!
//! Vitrine lists the images a storefront has uploaded, across a local
//! filesystem and a cloud object store, and shows only the newest version of
//! each file. It also deletes assets that edited or removed content no longer
//! references.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use vitrine::{CatalogEngine, CatalogRequest, EnvironmentSignals, VitrineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = VitrineConfig::load()?;
//!     let engine = CatalogEngine::from_config(&config, EnvironmentSignals::from_env(&config))?;
//!
//!     let response = engine.query(&CatalogRequest::default()).await;
//!     println!("{} assets", response.stats.all.total_assets);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `vitrine_error` - Error types
//! - `vitrine_core` - Categories, backends, assets, versioned names
//! - `vitrine_storage` - Local and object store backends, concurrent scanning
//! - `vitrine_catalog` - Configuration, capability resolution, queries, cleanup
//!
//! This crate (`vitrine`) re-exports everything for convenience.

pub use vitrine_catalog::*;
pub use vitrine_core::*;
pub use vitrine_error::*;
pub use vitrine_storage::{
    AssetBackend, BackendSet, BlobClient, BlobObject, BlobPage, CategoryPaths, HttpBlobClient,
    LocalFileScanner, ObjectStoreScanner, ScanLimits, ScanOptions, ScanSummary,
    scan_categories,
};

mod logging;

pub use logging::{LoggingConfig, init_logging};

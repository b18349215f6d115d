//! Storage backends for the Vitrine media catalog.
//!
//! Two implementations of one [`AssetBackend`] contract produce raw asset
//! records per category and delete objects by URL:
//!
//! - [`LocalFileScanner`] walks category directories under a media root
//! - [`ObjectStoreScanner`] lists category prefixes of a blob store in bounded pages
//!
//! [`scan_categories`] fans out over categories with bounded parallelism and a
//! per-call timeout, containing each category's failure.
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::Category;
//! use vitrine_storage::{AssetBackend, CategoryPaths, LocalFileScanner, ScanOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = LocalFileScanner::new("/srv/media", "/media", CategoryPaths::default());
//! let records = scanner.scan(Category::Brands, &ScanOptions::default()).await?;
//! for record in records {
//!     println!("{} ({} bytes)", record.url, record.size_bytes);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend_set;
mod blob_client;
mod filesystem;
mod layout;
mod object_store;
mod scan;
mod storage;
mod url;

pub use backend_set::BackendSet;
pub use blob_client::{BlobClient, BlobObject, BlobPage, HttpBlobClient};
pub use filesystem::LocalFileScanner;
pub use layout::CategoryPaths;
pub use object_store::{DEFAULT_SCAN_CEILING, ObjectStoreScanner};
pub use scan::{ScanLimits, ScanSummary, scan_categories};
pub use storage::{AssetBackend, ScanOptions};
pub use url::{
    decode_segment, encode_segment, host_matches, strip_query, url_host, url_key,
};
pub use vitrine_error::{StorageError, StorageErrorKind};

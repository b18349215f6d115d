//! Error types for the Vitrine media catalog.
//!
//! This crate provides the foundation error types used throughout the Vitrine workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use vitrine_error::{StorageError, StorageErrorKind, VitrineResult};
//!
//! fn list_blobs() -> VitrineResult<String> {
//!     Err(StorageError::new(StorageErrorKind::Http("Connection refused".to_string())))?
//! }
//!
//! match list_blobs() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod json;
mod storage;

pub use catalog::{CatalogError, CatalogErrorKind};
pub use config::ConfigError;
pub use error::{VitrineError, VitrineErrorKind, VitrineResult};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};

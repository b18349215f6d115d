//! Core data types for the Vitrine media catalog.
//!
//! This crate provides the value types shared by the storage backends and the
//! catalog engine: categories, backends, raw records, resolved assets, and the
//! codec for version-suffixed filenames.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod backend;
mod capability;
mod category;
mod extension;
mod reference;
mod version_name;

pub use asset::{MediaAsset, RawAssetRecord};
pub use backend::{Backend, BackendHint};
pub use capability::CapabilityDescriptor;
pub use category::Category;
pub use extension::{MEDIA_EXTENSIONS, extension_of, is_media_file};
pub use reference::ContentImageReference;
pub use version_name::{VersionedName, display_name};

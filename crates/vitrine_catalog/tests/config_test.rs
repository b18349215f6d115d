//! Tests for configuration loading and category mapping validation.

use std::io::Write;
use vitrine_catalog::{CatalogConfig, VitrineConfig};
use vitrine_core::Category;
use vitrine_error::{CatalogErrorKind, VitrineErrorKind};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_bundled_defaults_fill_missing_sections() {
    let file = write_config("[local]\nmedia_root = \"/srv/media\"\n");

    let config = VitrineConfig::from_file(file.path()).unwrap();

    assert_eq!(
        config.local().media_root().as_deref(),
        Some(std::path::Path::new("/srv/media"))
    );
    assert_eq!(config.local().public_prefix(), "/media");
    assert_eq!(config.object_store().token_env(), "BLOB_READ_WRITE_TOKEN");
    assert_eq!(config.catalog(), &CatalogConfig::default());
}

#[test]
fn test_catalog_bounds_clamp_limits() {
    let catalog = CatalogConfig::default();

    assert_eq!(catalog.clamp_limit(0), 10);
    assert_eq!(catalog.clamp_limit(25), 25);
    assert_eq!(catalog.clamp_limit(500), 100);
}

#[test]
fn test_scan_ceiling_covers_the_requested_page() {
    let catalog = CatalogConfig::default();

    assert_eq!(catalog.scan_ceiling(1, 50), 500);
    assert_eq!(catalog.scan_ceiling(20, 40), 800);
    assert_eq!(catalog.scan_ceiling(1, 100), 1000);
    assert_eq!(catalog.scan_ceiling(50, 100), 1000);
}

#[test]
fn test_category_overrides_are_applied() {
    let file = write_config("[categories]\nproducts = \"shop/items\"\n");

    let config = VitrineConfig::from_file(file.path()).unwrap();
    let paths = config.category_paths().unwrap();

    assert_eq!(paths.path(Category::Products), "shop/items");
    assert_eq!(paths.path(Category::Brands), "brands");
}

#[test]
fn test_overlapping_paths_are_inconsistent() {
    let file = write_config("[categories]\nproducts = \"brands\"\n");

    let config = VitrineConfig::from_file(file.path()).unwrap();
    let err = config.category_paths().unwrap_err();

    assert!(matches!(
        err.kind(),
        VitrineErrorKind::Catalog(e) if matches!(e.kind(), CatalogErrorKind::InconsistentMapping(_))
    ));
}

#[test]
fn test_unknown_category_slug_is_rejected() {
    let file = write_config("[categories]\nvideos = \"clips\"\n");

    let config = VitrineConfig::from_file(file.path()).unwrap();
    let err = config.category_paths().unwrap_err();

    assert!(matches!(
        err.kind(),
        VitrineErrorKind::Catalog(e) if matches!(e.kind(), CatalogErrorKind::InvalidCategory(_))
    ));
}

#[test]
fn test_missing_file_is_a_config_error() {
    let err = VitrineConfig::from_file("/definitely/not/here/vitrine.toml").unwrap_err();

    assert!(matches!(err.kind(), VitrineErrorKind::Config(_)));
}

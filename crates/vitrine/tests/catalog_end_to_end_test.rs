//! End-to-end tests through the facade: store files, query, prune, clean up.

use std::sync::Arc;
use vitrine::{
    AssetBackend, BackendHint, BackendSet, CapabilityResolver, CatalogConfig, CatalogEngine,
    CatalogRequest, Category, CategoryPaths, CleanupCoordinator, ContentFields,
    EnvironmentSignals, LocalFileScanner, LoggingConfig, ReferenceMatcher,
};

fn local_signals() -> EnvironmentSignals {
    EnvironmentSignals::default()
        .with_local_root_configured(true)
        .with_local_root_writable(true)
}

#[tokio::test]
async fn test_stored_versions_resolve_to_the_latest_upload() {
    let dir = tempfile::TempDir::new().unwrap();
    let scanner = Arc::new(LocalFileScanner::new(
        dir.path(),
        "/media",
        CategoryPaths::default(),
    ));

    let first = scanner
        .store(Category::Products, "hero.jpg", b"first")
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second = scanner
        .store(Category::Products, "hero.jpg", b"second version")
        .await
        .unwrap();
    assert_ne!(first.raw_name, second.raw_name);

    let engine = CatalogEngine::new(
        CatalogConfig::default(),
        CapabilityResolver::new(local_signals()),
        BackendSet::new().with(scanner.clone()),
    );

    let response = engine.query(&CatalogRequest::default()).await;
    assert_eq!(response.stats.all.total_assets, 1);
    assert_eq!(response.assets[0].display_filename, "hero.jpg");

    let report = engine
        .prune_superseded(BackendHint::Local, None, false)
        .await
        .unwrap();
    assert_eq!(report.items.len(), 1);
    assert!(report.failed().is_empty());

    let current = response.assets[0].url.clone();
    let coordinator = CleanupCoordinator::new(
        engine.backends().clone(),
        ReferenceMatcher::new("/media", "public.blob.example.com", CategoryPaths::default()),
    );
    let content = ContentFields::new().with_featured_image(current.clone());
    let cleaned = coordinator.cleanup_all(&content).await;
    assert_eq!(cleaned.deleted(), vec![current.as_str()]);

    let after = engine.query(&CatalogRequest::default()).await;
    assert_eq!(after.stats.all.total_assets, 0);
}

#[test]
fn test_verbosity_selects_log_level() {
    assert_eq!(LoggingConfig::from_verbosity(true).log_level, "debug");
    let config = LoggingConfig::from_verbosity(false).with_json_logs(true);
    assert_eq!(config.log_level, "info");
    assert!(config.json_logs);
}

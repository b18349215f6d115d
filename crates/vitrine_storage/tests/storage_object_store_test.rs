//! Tests for the object store scanner against an in-memory blob client.

use chrono::{TimeZone, Utc};
use std::sync::{Arc, Mutex};
use vitrine_core::Category;
use vitrine_error::VitrineResult;
use vitrine_storage::{
    AssetBackend, BlobClient, BlobObject, BlobPage, CategoryPaths, ObjectStoreScanner,
    ScanOptions, StorageError, StorageErrorKind,
};

const DOMAIN: &str = "public.blob.example.com";

/// Paged in-memory store that records every list call.
#[derive(Default)]
struct MemoryBlobs {
    objects: Mutex<Vec<BlobObject>>,
    list_calls: Mutex<Vec<(String, usize, Option<String>)>>,
    deleted: Mutex<Vec<String>>,
    fail_prefix: Option<String>,
}

impl MemoryBlobs {
    fn with_objects(pathnames: &[&str]) -> Self {
        let objects = pathnames
            .iter()
            .enumerate()
            .map(|(i, pathname)| BlobObject {
                url: format!("https://store1.{}/{}", DOMAIN, pathname),
                pathname: pathname.to_string(),
                size: 100 + i as u64,
                uploaded_at: Some(Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap()),
            })
            .collect();
        Self {
            objects: Mutex::new(objects),
            ..Self::default()
        }
    }
}

#[async_trait::async_trait]
impl BlobClient for MemoryBlobs {
    async fn list(
        &self,
        prefix: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> VitrineResult<BlobPage> {
        self.list_calls
            .lock()
            .unwrap()
            .push((prefix.to_string(), limit, cursor.map(str::to_string)));
        if self.fail_prefix.as_deref() == Some(prefix) {
            return Err(StorageError::new(StorageErrorKind::Http("503".to_string())).into());
        }

        let matching: Vec<_> = self
            .objects
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.pathname.starts_with(prefix))
            .cloned()
            .collect();
        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (start + limit).min(matching.len());
        let has_more = end < matching.len();
        Ok(BlobPage {
            blobs: matching[start..end].to_vec(),
            cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }

    async fn delete(&self, url: &str) -> VitrineResult<bool> {
        self.deleted.lock().unwrap().push(url.to_string());
        let mut objects = self.objects.lock().unwrap();
        let before = objects.len();
        objects.retain(|o| o.url != url);
        Ok(objects.len() < before)
    }

    async fn put(&self, pathname: &str, data: &[u8]) -> VitrineResult<BlobObject> {
        let object = BlobObject {
            url: format!("https://store1.{}/{}", DOMAIN, pathname),
            pathname: pathname.to_string(),
            size: data.len() as u64,
            uploaded_at: Some(Utc::now()),
        };
        self.objects.lock().unwrap().push(object.clone());
        Ok(object)
    }
}

fn scanner(client: Arc<MemoryBlobs>, page_size: usize) -> ObjectStoreScanner {
    ObjectStoreScanner::new(client, CategoryPaths::default(), DOMAIN, page_size)
}

#[tokio::test]
async fn test_scan_follows_cursor_sequentially() {
    let client = Arc::new(MemoryBlobs::with_objects(&[
        "brands/a.png",
        "brands/b.png",
        "brands/c.png",
        "brands/d.png",
        "brands/e.png",
        "products/x.png",
    ]));
    let records = scanner(client.clone(), 2)
        .scan(Category::Brands, &ScanOptions::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 5);
    assert!(records.iter().all(|r| r.category == Category::Brands));
    assert_eq!(records[0].raw_name, "a.png");
    assert_eq!(records[0].size_bytes, 100);

    let calls = client.list_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], ("brands/".to_string(), 2, None));
    assert_eq!(calls[1].2.as_deref(), Some("2"));
    assert_eq!(calls[2].2.as_deref(), Some("4"));
}

#[tokio::test]
async fn test_scan_stops_at_ceiling() {
    let pathnames: Vec<String> = (0..50).map(|i| format!("products/p{:02}.jpg", i)).collect();
    let refs: Vec<&str> = pathnames.iter().map(String::as_str).collect();
    let client = Arc::new(MemoryBlobs::with_objects(&refs));

    let records = scanner(client.clone(), 8)
        .scan(
            Category::Products,
            &ScanOptions::default().with_max_records(20),
        )
        .await
        .unwrap();

    assert_eq!(records.len(), 20);
    let calls = client.list_calls.lock().unwrap().clone();
    let requested: usize = calls.iter().map(|(_, limit, _)| limit).sum();
    assert_eq!(requested, 20);
    assert_eq!(calls.last().unwrap().1, 4);
}

#[tokio::test]
async fn test_scan_skips_non_media_and_nested_objects() {
    let client = Arc::new(MemoryBlobs::with_objects(&[
        "pages/a.png",
        "pages/readme.md",
        "pages/archive/b.png",
        "pages/",
    ]));
    let records = scanner(client, 10)
        .scan(Category::Pages, &ScanOptions::default())
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.raw_name.as_str()).collect();
    assert_eq!(names, vec!["a.png"]);
}

#[tokio::test]
async fn test_missing_prefix_scans_empty() {
    let client = Arc::new(MemoryBlobs::with_objects(&["brands/a.png"]));
    let records = scanner(client, 10)
        .scan(Category::Users, &ScanOptions::default())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_list_failure_propagates_from_single_category_scan() {
    let client = Arc::new(MemoryBlobs {
        fail_prefix: Some("brands/".to_string()),
        ..MemoryBlobs::default()
    });
    let result = scanner(client, 10)
        .scan(Category::Brands, &ScanOptions::default())
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_owns_url_by_domain() {
    let scanner = scanner(Arc::new(MemoryBlobs::default()), 10);

    assert!(scanner.owns_url(&format!("https://store1.{}/pages/a.png", DOMAIN)));
    assert!(scanner.owns_url(&format!("https://{}/pages/a.png", DOMAIN)));
    assert!(!scanner.owns_url("https://evil.example.com/pages/a.png"));
    assert!(!scanner.owns_url(&format!("https://{}.evil.com/pages/a.png", DOMAIN)));
    assert!(!scanner.owns_url("/media/pages/a.png"));
    assert_eq!(
        scanner.category_of(&format!("https://store1.{}/pages/a.png?download=1", DOMAIN)),
        Some(Category::Pages)
    );
    assert_eq!(
        scanner.category_of(&format!("https://store1.{}/misc/a.png", DOMAIN)),
        None
    );
}

#[tokio::test]
async fn test_delete_only_managed_category_urls() {
    let client = Arc::new(MemoryBlobs::with_objects(&["pages/a.png"]));
    let scanner = scanner(client.clone(), 10);
    let url = format!("https://store1.{}/pages/a.png", DOMAIN);

    assert!(scanner.delete(&url).await.unwrap());
    assert!(!scanner.delete(&url).await.unwrap());
    assert!(
        scanner
            .delete(&format!("https://store1.{}/other/a.png", DOMAIN))
            .await
            .is_err()
    );
    assert_eq!(client.deleted.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_uploads_versioned_pathname() {
    let client = Arc::new(MemoryBlobs::default());
    let scanner = scanner(client.clone(), 10);

    let stored = scanner
        .store(Category::Brands, "logo.png", b"logo")
        .await
        .unwrap();

    assert!(stored.raw_name.starts_with("logo_v"));
    assert!(stored.url.contains("/brands/logo_v"));
    assert_eq!(stored.size_bytes, 4);

    let records = scanner
        .scan(Category::Brands, &ScanOptions::default())
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].raw_name, stored.raw_name);
}

//! Tests for asset value types.

use chrono::{TimeZone, Utc};
use vitrine_core::{Category, MediaAsset, RawAssetRecord, display_name};

fn record(raw_name: &str) -> RawAssetRecord {
    RawAssetRecord {
        category: Category::Brands,
        raw_name: raw_name.to_string(),
        url: format!("/media/brands/{}", raw_name),
        size_bytes: 2048,
        uploaded_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_file_type_is_lower_cased_extension() {
    assert_eq!(record("Logo_v1_ab.PNG").file_type(), "png");
    assert_eq!(record("README").file_type(), "");
}

#[test]
fn test_asset_carries_display_name_not_raw_name() {
    let raw = record("logo_v200_cd34.png");
    let asset = MediaAsset::from_current(&raw, display_name(&raw.raw_name));

    assert_eq!(asset.display_filename, "logo.png");
    assert_eq!(asset.raw_name, "logo_v200_cd34.png");
    assert_eq!(asset.identity(), (Category::Brands, "logo.png"));
    assert_eq!(asset.file_type, "png");
}

#[test]
fn test_asset_serializes_camel_case() {
    let raw = record("logo.png");
    let asset = MediaAsset::from_current(&raw, "logo.png");
    let json = serde_json::to_value(&asset).unwrap();

    assert_eq!(json["displayFilename"], "logo.png");
    assert_eq!(json["category"], "brands");
    assert_eq!(json["type"], "png");
    assert_eq!(json["sizeBytes"], 2048);
    assert!(json.get("uploadedAt").is_some());
}

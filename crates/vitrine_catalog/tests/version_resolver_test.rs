//! Tests for version grouping and resolution.

use chrono::{TimeZone, Utc};
use vitrine_catalog::{group_versions, resolve_versions, superseded_of};
use vitrine_core::{Category, RawAssetRecord};

fn record(category: Category, raw_name: &str, secs: i64) -> RawAssetRecord {
    RawAssetRecord {
        category,
        raw_name: raw_name.to_string(),
        url: format!("/media/{}/{}", category, raw_name),
        size_bytes: 10,
        uploaded_at: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
    }
}

#[test]
fn test_newest_version_is_exposed_under_display_name() {
    let records = vec![
        record(Category::Products, "hero_v1_aaa.jpg", 1),
        record(Category::Products, "hero_v2_bbb.jpg", 2),
    ];

    let assets = resolve_versions(&records);

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].display_filename, "hero.jpg");
    assert_eq!(assets[0].raw_name, "hero_v2_bbb.jpg");
    assert_eq!(assets[0].url, "/media/products/hero_v2_bbb.jpg");
}

#[test]
fn test_recency_wins_over_version_number() {
    let records = vec![
        record(Category::Brands, "logo_v900_aaa.png", 10),
        record(Category::Brands, "logo_v100_bbb.png", 20),
    ];

    let assets = resolve_versions(&records);
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].raw_name, "logo_v100_bbb.png");
}

#[test]
fn test_equal_timestamps_resolve_to_greatest_raw_name() {
    let forward = vec![
        record(Category::Site, "icon_v1_aaa.png", 5),
        record(Category::Site, "icon_v2_bbb.png", 5),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(resolve_versions(&forward)[0].raw_name, "icon_v2_bbb.png");
    assert_eq!(resolve_versions(&backward)[0].raw_name, "icon_v2_bbb.png");
}

#[test]
fn test_legacy_names_form_their_own_identity() {
    let records = vec![
        record(Category::Pages, "about.png", 1),
        record(Category::Pages, "about_v3_c0ffee.png", 2),
        record(Category::Pages, "team_photo.png", 3),
    ];

    let groups = group_versions(&records);

    assert_eq!(groups.len(), 2);
    let about = groups
        .iter()
        .find(|g| g.display_filename() == "about.png")
        .unwrap();
    assert_eq!(about.len(), 2);
    assert_eq!(about.current().raw_name, "about_v3_c0ffee.png");
    assert_eq!(about.superseded()[0].raw_name, "about.png");
}

#[test]
fn test_same_display_name_in_different_categories_stays_separate() {
    let records = vec![
        record(Category::Products, "logo_v1_aaa.png", 1),
        record(Category::Brands, "logo_v2_bbb.png", 2),
    ];

    let assets = resolve_versions(&records);
    assert_eq!(assets.len(), 2);
    assert!(assets.iter().all(|a| a.display_filename == "logo.png"));
}

#[test]
fn test_superseded_records_exclude_every_current_version() {
    let records = vec![
        record(Category::Products, "mug_v1_aaa.jpg", 1),
        record(Category::Products, "mug_v2_bbb.jpg", 2),
        record(Category::Products, "mug_v3_ccc.jpg", 3),
        record(Category::Products, "cup.jpg", 4),
    ];

    let superseded = superseded_of(&records);
    let current = resolve_versions(&records);

    let mut names: Vec<_> = superseded.iter().map(|r| r.raw_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["mug_v1_aaa.jpg", "mug_v2_bbb.jpg"]);
    assert_eq!(current.len() + superseded.len(), records.len());
    assert!(
        current
            .iter()
            .all(|asset| superseded.iter().all(|r| r.raw_name != asset.raw_name))
    );
}

#[test]
fn test_no_records_resolve_to_nothing() {
    assert!(resolve_versions(&[]).is_empty());
    assert!(superseded_of(&[]).is_empty());
}

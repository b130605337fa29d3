//! Settings migration integration tests
//!
//! Blobs written by older versions, or by other features sharing the plugin
//! data, load into the current settings and survive a save.

use app_state::manager::SettingsManager;
use serde_json::json;
use std::sync::Arc;
use storage::persistence::{MemoryStorage, SettingsStorage};
use storage::settings::{HeadingLevel, SettingsUpdate};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An old blob without themes is seeded and its other keys kept
#[tokio::test]
async fn test_legacy_blob_is_merged() {
    init_tracing();
    let storage = Arc::new(MemoryStorage::with_data(json!({
        "themeId": "sakura",
        "fontSize": 17,
        "userName": "Reader",
        "headingLevel": "h1",
        "donateCount": 2,
        "customThemes": [
            {"id": "old", "name": "Old", "styles": {"paragraph": "color: #123456;"}}
        ]
    })));

    let manager = SettingsManager::new(storage.clone());
    manager.load().await.unwrap();

    let settings = manager.settings().await;
    assert_eq!(settings.theme_id, "sakura");
    assert_eq!(settings.font_size, 17);
    assert_eq!(settings.user_name, "Reader");
    assert_eq!(settings.heading_level, HeadingLevel::H1);
    assert_eq!(settings.themes.len(), 4);
    assert_eq!(settings.custom_fonts.len(), 5);

    let old = manager.theme("old").await.unwrap();
    assert!(old.is_visible);
    assert_eq!(old.styles.paragraph, "color: #123456;");
    assert_eq!(manager.active_theme().await.unwrap().id, "sakura");
}

/// Keys unknown to this version are written back unchanged
#[tokio::test]
async fn test_unknown_keys_survive_save() {
    init_tracing();
    let storage = Arc::new(MemoryStorage::with_data(json!({
        "donateCount": 5,
        "lastDonatePrompt": 1_700_000_000_000_i64,
        "futureFlag": {"enabled": true}
    })));

    let manager = SettingsManager::new(storage.clone());
    manager.load().await.unwrap();
    manager
        .update_settings(SettingsUpdate { show_time: Some(false), ..Default::default() })
        .await
        .unwrap();

    let saved = storage.load().await.unwrap().unwrap();
    assert_eq!(saved["donateCount"], json!(5));
    assert_eq!(saved["lastDonatePrompt"], json!(1_700_000_000_000_i64));
    assert_eq!(saved["futureFlag"], json!({"enabled": true}));
    assert_eq!(saved["showTime"], json!(false));
    assert_eq!(saved["themes"].as_array().unwrap().len(), 4);
}

/// Garbage values fall back to defaults instead of failing the load
#[tokio::test]
async fn test_malformed_values_fall_back() {
    init_tracing();
    let storage = Arc::new(MemoryStorage::with_data(json!({
        "fontSize": "huge",
        "themes": "not a list",
        "customThemes": null,
        "backgroundSettings": {"scale": 2}
    })));

    let manager = SettingsManager::new(storage);
    manager.load().await.unwrap();

    let settings = manager.settings().await;
    assert_eq!(settings.font_size, 16);
    assert_eq!(settings.themes.len(), 4);
    assert!(settings.custom_themes.is_empty());
    assert_eq!(settings.background_settings.scale, 2.0);
    assert_eq!(settings.background_settings.image_url, "");
}

/// A broken custom theme is dropped alone and the rest survive the next save
#[tokio::test]
async fn test_bad_custom_theme_does_not_lose_others() {
    init_tracing();
    let storage = Arc::new(MemoryStorage::with_data(json!({
        "customThemes": [
            {"id": "a", "name": "A"},
            {"id": "b", "name": "B", "description": null},
            {"id": "broken"}
        ]
    })));

    let manager = SettingsManager::new(storage.clone());
    manager.load().await.unwrap();
    assert_eq!(manager.settings().await.custom_themes.len(), 2);

    manager
        .update_settings(SettingsUpdate { font_size: Some(18), ..Default::default() })
        .await
        .unwrap();

    let saved = storage.load().await.unwrap().unwrap();
    let ids: Vec<&str> = saved["customThemes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|theme| theme["id"].as_str())
        .collect();
    assert_eq!(ids, ["a", "b"]);
}

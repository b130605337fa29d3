//! Theme lifecycle integration tests
//!
//! Drafts are edited, saved through the settings manager, persisted to a
//! JSON file and reloaded by a fresh manager.

use app_state::editor::ThemeEditor;
use app_state::events::SettingsEvent;
use app_state::manager::SettingsManager;
use card_theme::edit::{LinkUnderline, StyleEdit};
use card_theme::model::{ThemeUpdate, TitleLevel};
use card_theme::section::Section;
use card_theme::value::HexColor;
use std::sync::Arc;
use storage::persistence::{JsonFileStorage, PersistenceConfig};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn file_manager(dir: &TempDir) -> SettingsManager {
    let config = PersistenceConfig::new(dir.path().join("data.json")).backups(true, 2);
    SettingsManager::new(Arc::new(JsonFileStorage::new(config)))
}

/// A theme created in the editor survives a restart
#[tokio::test]
async fn test_create_theme_and_reload() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();

    let id = {
        let manager = file_manager(&temp_dir);
        manager.load().await.unwrap();
        let mut events = manager.subscribe();

        let mut editor = ThemeEditor::create();
        editor.set_name("Night Ink");
        editor.apply(StyleEdit::GlobalColor(HexColor::parse("#1f2a44").unwrap()));
        editor.apply(StyleEdit::BackgroundColor(HexColor::parse("#f4f1ea").unwrap()));
        editor.apply(StyleEdit::TitleFontSize(TitleLevel::H2, 1.8));
        editor.apply(StyleEdit::LinkUnderline(LinkUnderline::Underline));

        let id = editor.save(&manager).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), SettingsEvent::ThemesChanged);
        id
    };

    let manager = file_manager(&temp_dir);
    manager.load().await.unwrap();

    let theme = manager.theme(id.as_str()).await.unwrap();
    assert_eq!(theme.name, "Night Ink");
    assert!(!theme.is_preset);
    assert_eq!(theme.styles.global_color().to_string(), "#1f2a44");
    assert!(theme.styles.image_preview.starts_with("background-color: #f4f1ea;"));
    assert!(theme.styles.title.h2.base.contains("font-size: 1.8em;"));
    assert_eq!(LinkUnderline::detect(&theme.styles.link), LinkUnderline::Underline);
    assert_eq!(manager.all_themes().await.len(), 5);
}

/// Preset visibility persists while preset content stays read-only
#[tokio::test]
async fn test_preset_visibility_round_trip() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();

    {
        let manager = file_manager(&temp_dir);
        manager.load().await.unwrap();
        assert!(manager.update_theme("forest", ThemeUpdate::visibility(false)).await.unwrap());
        assert!(!manager.remove_theme("forest").await.unwrap());
    }

    let manager = file_manager(&temp_dir);
    manager.load().await.unwrap();

    let forest = manager.theme("forest").await.unwrap();
    assert!(forest.is_preset);
    assert!(!forest.is_visible);
    assert_eq!(manager.visible_themes().await.len(), 3);
}

/// Editing, resetting and re-saving a custom theme in one session
#[tokio::test]
async fn test_edit_reset_and_remove() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let manager = file_manager(&temp_dir);
    manager.load().await.unwrap();

    let mut editor = ThemeEditor::create();
    editor.set_name("Scratch");
    editor.apply(StyleEdit::QuoteBorderColor(HexColor::parse("#336699").unwrap()));
    editor.apply(StyleEdit::HrWidth(5));
    let id = editor.save(&manager).await.unwrap();

    let stored = manager.theme(id.as_str()).await.unwrap();
    let mut editor = ThemeEditor::edit(&stored);
    editor.reset_section(Section::Quote);
    editor.save(&manager).await.unwrap();

    let stored = manager.theme(id.as_str()).await.unwrap();
    assert!(stored.styles.quote.contains("#deb887"));
    assert!(stored.styles.hr.contains("border-top: 5px solid"));

    assert!(manager.remove_theme(id.as_str()).await.unwrap());
    assert!(manager.theme(id.as_str()).await.is_none());
}

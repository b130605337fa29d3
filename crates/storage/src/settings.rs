//! Plugin settings schema and load merge
//!
//! [`CardSettings`] is the whole persisted blob. Saved data from any earlier
//! version is folded onto the defaults with [`merge_with_defaults`]; keys this
//! version does not know are carried along in [`CardSettings::extra`] so a
//! save never drops them.

use card_theme::catalog::{builtin_templates, DEFAULT_TEMPLATE_ID};
use card_theme::model::{default_fonts, FontOption, Theme, ThemeId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Heading level used for the card title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Split the note at first level headings
    H1,
    /// Split the note at second level headings
    #[default]
    H2,
}

/// Position of the background image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Position {
    /// Horizontal offset
    pub x: f64,
    /// Vertical offset
    pub y: f64,
}

/// Background image placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundSettings {
    /// Image URL, empty for none
    pub image_url: String,
    /// Zoom factor
    pub scale: f64,
    /// Offset of the image
    pub position: Position,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self { image_url: String::new(), scale: 1.0, position: Position::default() }
    }
}

/// Persisted plugin settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardSettings {
    /// Selected template
    pub template_id: String,
    /// Active theme
    pub theme_id: ThemeId,
    /// Card font family
    pub font_family: String,
    /// Base font size in pixels
    pub font_size: u32,
    /// Selected background
    pub background_id: String,
    /// Built-in themes
    pub themes: Vec<Theme>,
    /// User themes
    pub custom_themes: Vec<Theme>,
    /// Avatar image, empty until the user picks one
    pub user_avatar: String,
    /// Display name in the card header
    pub user_name: String,
    /// Title shown above the cards
    pub notes_title: String,
    /// Handle in the card header
    pub user_id: String,
    /// Show the post time in the header
    pub show_time: bool,
    /// Locale used to format the post time
    pub time_format: String,
    /// Show the footer bar, unset until the user decides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_footer: Option<bool>,
    /// Footer text on the left
    pub footer_left_text: String,
    /// Footer text on the right
    pub footer_right_text: String,
    /// Heading level used to split the note into cards
    pub heading_level: HeadingLevel,
    /// Font catalog
    pub custom_fonts: Vec<FontOption>,
    /// Background image placement
    pub background_settings: BackgroundSettings,
    /// Keys not known to this version, kept as saved
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            theme_id: ThemeId::new(DEFAULT_TEMPLATE_ID),
            font_family: "Optima-Regular, Optima, PingFangSC-light, PingFangTC-light, \"PingFang SC\"".to_string(),
            font_size: 16,
            background_id: String::new(),
            themes: Vec::new(),
            custom_themes: Vec::new(),
            user_avatar: String::new(),
            user_name: "夜半".to_string(),
            notes_title: "备忘录".to_string(),
            user_id: "@Yeban".to_string(),
            show_time: true,
            time_format: "zh-CN".to_string(),
            show_footer: None,
            footer_left_text: "夜半过后，光明便启程".to_string(),
            footer_right_text: "欢迎关注公众号：夜半".to_string(),
            heading_level: HeadingLevel::H2,
            custom_fonts: default_fonts(),
            background_settings: BackgroundSettings::default(),
            extra: Map::new(),
        }
    }
}

impl CardSettings {
    /// Serialize to the host blob
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Fold a saved blob onto the default settings
///
/// A saved key overrides its default when it decodes into the field type;
/// `null` counts as absent and an undecodable value is dropped. Theme lists
/// are checked one entry at a time, so a bad entry only loses itself. Missing
/// or empty `themes` are seeded with the built-in templates and missing or
/// empty `customFonts` fall back to the built-in fonts.
pub fn merge_with_defaults(saved: Option<Value>) -> CardSettings {
    let saved = match saved {
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::warn!("Ignoring saved settings that are not an object: {}", other);
            Map::new()
        }
        None => Map::new(),
    };

    let mut accepted = Map::new();
    for (key, value) in saved {
        if value.is_null() {
            continue;
        }

        let value = match (key.as_str(), value) {
            ("themes" | "customThemes", Value::Array(entries)) => {
                Value::Array(decodable_themes(&key, entries))
            }
            (_, value) => value,
        };

        let single = Map::from_iter([(key.clone(), value.clone())]);
        match serde_json::from_value::<CardSettings>(Value::Object(single)) {
            Ok(_) => {
                accepted.insert(key, value);
            }
            Err(e) => tracing::warn!("Dropping saved setting {}: {}", key, e),
        }
    }

    let mut settings = serde_json::from_value::<CardSettings>(Value::Object(accepted))
        .unwrap_or_else(|e| {
            tracing::warn!("Saved settings could not be merged, using defaults: {}", e);
            CardSettings::default()
        });

    if settings.themes.is_empty() {
        tracing::info!("Seeding built-in themes");
        settings.themes = builtin_templates()
            .into_iter()
            .map(|mut theme| {
                theme.is_preset = true;
                theme
            })
            .collect();
    }

    if settings.custom_fonts.is_empty() {
        settings.custom_fonts = default_fonts();
    }

    settings
}

fn decodable_themes(key: &str, entries: Vec<Value>) -> Vec<Value> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, mut entry)| {
            drop_nulls(&mut entry);
            match serde_json::from_value::<Theme>(entry.clone()) {
                Ok(_) => Some(entry),
                Err(e) => {
                    tracing::warn!("Dropping saved theme {} of {}: {}", index, key, e);
                    None
                }
            }
        })
        .collect()
}

fn drop_nulls(value: &mut Value) {
    if let Value::Object(map) = value {
        map.retain(|_, v| !v.is_null());
        map.values_mut().for_each(drop_nulls);
    }
}

/// Partial update of the scalar settings
///
/// Themes and fonts change through the settings manager's catalog
/// operations instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsUpdate {
    /// Selected template
    pub template_id: Option<String>,
    /// Active theme
    pub theme_id: Option<ThemeId>,
    /// Card font family
    pub font_family: Option<String>,
    /// Base font size
    pub font_size: Option<u32>,
    /// Selected background
    pub background_id: Option<String>,
    /// Avatar image
    pub user_avatar: Option<String>,
    /// Display name
    pub user_name: Option<String>,
    /// Notes title
    pub notes_title: Option<String>,
    /// Handle
    pub user_id: Option<String>,
    /// Show the post time
    pub show_time: Option<bool>,
    /// Time locale
    pub time_format: Option<String>,
    /// Show the footer
    pub show_footer: Option<bool>,
    /// Footer text on the left
    pub footer_left_text: Option<String>,
    /// Footer text on the right
    pub footer_right_text: Option<String>,
    /// Heading level
    pub heading_level: Option<HeadingLevel>,
    /// Background image placement
    pub background_settings: Option<BackgroundSettings>,
}

impl SettingsUpdate {
    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the update into `settings`
    pub fn apply_to(&self, settings: &mut CardSettings) {
        fn assign<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        assign(&mut settings.template_id, &self.template_id);
        assign(&mut settings.theme_id, &self.theme_id);
        assign(&mut settings.font_family, &self.font_family);
        assign(&mut settings.font_size, &self.font_size);
        assign(&mut settings.background_id, &self.background_id);
        assign(&mut settings.user_avatar, &self.user_avatar);
        assign(&mut settings.user_name, &self.user_name);
        assign(&mut settings.notes_title, &self.notes_title);
        assign(&mut settings.user_id, &self.user_id);
        assign(&mut settings.show_time, &self.show_time);
        assign(&mut settings.time_format, &self.time_format);
        assign(&mut settings.footer_left_text, &self.footer_left_text);
        assign(&mut settings.footer_right_text, &self.footer_right_text);
        assign(&mut settings.heading_level, &self.heading_level);
        assign(&mut settings.background_settings, &self.background_settings);

        if self.show_footer.is_some() {
            settings.show_footer = self.show_footer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_theme::model::StyleSet;
    use serde_json::json;

    #[test]
    fn test_merge_without_saved_data() {
        let settings = merge_with_defaults(None);
        assert_eq!(settings.theme_id, "default");
        assert_eq!(settings.font_size, 16);
        assert_eq!(settings.themes.len(), 4);
        assert!(settings.themes.iter().all(|theme| theme.is_preset));
        assert!(settings.custom_themes.is_empty());
        assert_eq!(settings.custom_fonts, default_fonts());
    }

    #[test]
    fn test_merge_non_object() {
        let settings = merge_with_defaults(Some(json!([1, 2, 3])));
        assert_eq!(settings.themes.len(), 4);
        assert_eq!(settings.user_name, "夜半");
    }

    #[test]
    fn test_saved_keys_override_defaults() {
        let settings = merge_with_defaults(Some(json!({
            "themeId": "ink",
            "fontSize": 18,
            "showFooter": false,
            "headingLevel": "h1",
            "backgroundSettings": {"imageUrl": "bg.png", "scale": 1.5}
        })));

        assert_eq!(settings.theme_id, "ink");
        assert_eq!(settings.font_size, 18);
        assert_eq!(settings.show_footer, Some(false));
        assert_eq!(settings.heading_level, HeadingLevel::H1);
        assert_eq!(settings.background_settings.image_url, "bg.png");
        assert_eq!(settings.background_settings.position, Position::default());
        assert_eq!(settings.user_id, "@Yeban");
    }

    #[test]
    fn test_null_and_undecodable_values_keep_defaults() {
        let settings = merge_with_defaults(Some(json!({
            "userName": null,
            "fontSize": "large",
            "customThemes": null,
            "showTime": false
        })));

        assert_eq!(settings.user_name, "夜半");
        assert_eq!(settings.font_size, 16);
        assert!(settings.custom_themes.is_empty());
        assert!(!settings.show_time);
    }

    #[test]
    fn test_saved_themes_are_kept() {
        let settings = merge_with_defaults(Some(json!({
            "themes": [{"id": "only", "name": "Only", "isPreset": true}],
            "customThemes": [{"id": "mine", "name": "Mine"}]
        })));

        assert_eq!(settings.themes.len(), 1);
        assert_eq!(settings.themes[0].id, "only");
        assert_eq!(settings.custom_themes[0].id, "mine");
        assert!(settings.custom_themes[0].is_visible);
    }

    #[test]
    fn test_bad_theme_entry_only_drops_itself() {
        let settings = merge_with_defaults(Some(json!({
            "customThemes": [
                {"id": "a", "name": "A"},
                {"id": "b", "name": "B", "description": null, "styles": {"paragraph": null}},
                {"id": "c"},
                {"id": "d", "name": "D", "isVisible": "yes"}
            ]
        })));

        let ids: Vec<&str> = settings.custom_themes.iter().map(|theme| theme.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(settings.custom_themes[1].description, "");
        assert_eq!(settings.custom_themes[1].styles.paragraph, StyleSet::default().paragraph);
    }

    #[test]
    fn test_all_bad_preset_entries_reseed() {
        let settings = merge_with_defaults(Some(json!({"themes": [{"name": "no id"}]})));
        assert_eq!(settings.themes.len(), 4);
        assert!(settings.themes.iter().all(|theme| theme.is_preset));
    }

    #[test]
    fn test_empty_lists_are_seeded() {
        let settings = merge_with_defaults(Some(json!({"themes": [], "customFonts": []})));
        assert_eq!(settings.themes.len(), 4);
        assert_eq!(settings.custom_fonts.len(), 5);
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let settings = merge_with_defaults(Some(json!({"donateCount": 3, "lastDonatePrompt": 1700})));
        assert_eq!(settings.extra.get("donateCount"), Some(&json!(3)));

        let value = settings.to_value().unwrap();
        assert_eq!(value["donateCount"], json!(3));
        assert_eq!(value["lastDonatePrompt"], json!(1700));
        assert!(value.get("showFooter").is_none());

        let reloaded = merge_with_defaults(Some(value));
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_settings_update() {
        let mut settings = CardSettings::default();
        let update = SettingsUpdate {
            user_name: Some("Night".to_string()),
            show_footer: Some(true),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(SettingsUpdate::default().is_empty());

        update.apply_to(&mut settings);
        assert_eq!(settings.user_name, "Night");
        assert_eq!(settings.show_footer, Some(true));
        assert_eq!(settings.font_size, 16);
    }
}

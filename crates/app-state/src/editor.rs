//! Theme editor controller
//!
//! A [`ThemeEditor`] holds one draft theme outside the settings store. Style
//! edits and section resets only touch the draft; nothing is persisted until
//! [`ThemeEditor::save`] validates the draft and hands it to the
//! [`SettingsManager`].

use card_theme::edit::StyleEdit;
use card_theme::model::{StyleSet, Theme, ThemeId, ThemeUpdate};
use card_theme::section::Section;
use thiserror::Error;

use crate::manager::{SettingsManager, StoreError};

/// Reasons a draft cannot be saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The theme name is empty after trimming
    #[error("Theme name must not be empty")]
    EmptyName,

    /// Reference templates are enabled but none was selected
    #[error("A reference template must be selected")]
    MissingReference,
}

/// Theme editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    /// The draft failed validation and is still editable
    #[error("Invalid theme: {0}")]
    Validation(#[from] ValidationError),

    /// The theme being edited no longer exists
    #[error("Theme not found: {0}")]
    NotFound(ThemeId),

    /// The settings store rejected the save
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    /// The draft has unsaved changes
    Draft,
    /// A save is validating the draft
    Validating,
    /// The draft was saved under this id
    Persisted(ThemeId),
    /// The last save was rejected; the draft is unchanged
    Rejected(ValidationError),
}

/// Controller for creating or editing one custom theme
#[derive(Debug, Clone)]
pub struct ThemeEditor {
    draft: Theme,
    /// Id of the stored theme this draft updates, `None` for a new theme
    target: Option<ThemeId>,
    use_reference: bool,
    reference: Option<ThemeId>,
    state: EditorState,
}

impl ThemeEditor {
    /// Start a new theme from the default styles
    pub fn create() -> Self {
        Self::new_draft(Theme::new(ThemeId::default(), "", StyleSet::default()))
    }

    /// Start editing a copy of an existing theme
    ///
    /// Presets are read-only, so editing one starts a new custom theme
    /// from its styles.
    pub fn edit(theme: &Theme) -> Self {
        if theme.is_preset {
            let mut draft = theme.clone();
            draft.id = ThemeId::default();
            draft.is_preset = false;
            return Self::new_draft(draft);
        }

        Self {
            draft: theme.clone(),
            target: Some(theme.id.clone()),
            use_reference: false,
            reference: None,
            state: EditorState::Draft,
        }
    }

    fn new_draft(draft: Theme) -> Self {
        Self { draft, target: None, use_reference: false, reference: None, state: EditorState::Draft }
    }

    /// The draft theme
    pub fn draft(&self) -> &Theme {
        &self.draft
    }

    /// The session state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Whether saving creates a new theme
    pub fn is_new(&self) -> bool {
        self.target.is_none()
    }

    /// Enable or disable starting from a reference template
    pub fn use_reference_template(&mut self, enabled: bool) {
        self.use_reference = enabled;
        if !enabled {
            self.reference = None;
        }
        self.touch();
    }

    /// Copy a template's styles into the draft
    ///
    /// The draft's name and description are cleared and it stays a custom
    /// theme.
    pub fn select_reference(&mut self, template: &Theme) {
        let mut draft = template.clone();
        draft.id = self.target.clone().unwrap_or_default();
        draft.name = String::new();
        draft.description = String::new();
        draft.is_preset = false;
        draft.is_visible = true;

        self.draft = draft;
        self.reference = Some(template.id.clone());
        self.use_reference = true;
        self.touch();
    }

    /// Set the theme name, trimmed
    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.trim().to_string();
        self.touch();
    }

    /// Set the description, trimmed
    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.trim().to_string();
        self.touch();
    }

    /// Apply a style edit to the draft
    pub fn apply(&mut self, edit: StyleEdit) -> bool {
        let changed = edit.apply(&mut self.draft.styles);
        if changed {
            self.touch();
        }
        changed
    }

    /// Restore one section of the draft to the default styles
    pub fn reset_section(&mut self, section: Section) {
        section.reset(&mut self.draft.styles);
        self.touch();
    }

    /// Check the draft without saving it
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.draft.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.use_reference && self.reference.is_none() {
            return Err(ValidationError::MissingReference);
        }
        Ok(())
    }

    /// Validate and persist the draft
    ///
    /// A new draft gets an id derived from its name and is added as a custom
    /// theme; later saves of the same session update it. On any error the
    /// draft is kept unchanged for another attempt.
    pub async fn save(&mut self, manager: &SettingsManager) -> Result<ThemeId> {
        self.state = EditorState::Validating;

        if let Err(e) = self.validate() {
            tracing::debug!("Theme draft rejected: {}", e);
            self.state = EditorState::Rejected(e);
            return Err(e.into());
        }

        let result = match self.target.clone() {
            Some(id) => self.update_existing(manager, id).await,
            None => self.add_new(manager).await,
        };

        self.state = match &result {
            Ok(id) => EditorState::Persisted(id.clone()),
            Err(_) => EditorState::Draft,
        };
        result
    }

    async fn add_new(&mut self, manager: &SettingsManager) -> Result<ThemeId> {
        let existing = manager.all_themes().await;
        let id = ThemeId::unique_from_name(&self.draft.name, |candidate| {
            existing.iter().any(|theme| theme.id == *candidate)
        });

        let mut theme = self.draft.clone();
        theme.id = id.clone();
        manager.add_custom_theme(&theme).await?;

        tracing::info!("Created theme {}", id);
        self.draft.id = id.clone();
        self.draft.is_visible = true;
        self.target = Some(id.clone());
        Ok(id)
    }

    async fn update_existing(&mut self, manager: &SettingsManager, id: ThemeId) -> Result<ThemeId> {
        if !manager.update_theme(id.as_str(), ThemeUpdate::from_theme(&self.draft)).await? {
            return Err(EditorError::NotFound(id));
        }

        tracing::info!("Updated theme {}", id);
        Ok(id)
    }

    fn touch(&mut self) {
        self.state = EditorState::Draft;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_theme::value::HexColor;
    use std::sync::Arc;
    use storage::persistence::MemoryStorage;

    async fn manager() -> SettingsManager {
        let manager = SettingsManager::new(Arc::new(MemoryStorage::new()));
        manager.load().await.unwrap();
        manager
    }

    #[tokio::test]
    async fn test_create_and_save() {
        let manager = manager().await;
        let mut editor = ThemeEditor::create();
        editor.set_name("  Warm Night ");
        editor.apply(StyleEdit::GlobalColor(HexColor::parse("#2c3e50").unwrap()));

        let id = editor.save(&manager).await.unwrap();
        assert!(id.as_str().starts_with("warm-night-"));
        assert_eq!(editor.state(), &EditorState::Persisted(id.clone()));

        let stored = manager.theme(id.as_str()).await.unwrap();
        assert_eq!(stored.name, "Warm Night");
        assert!(!stored.is_preset);
        assert_eq!(stored.styles.global_color().to_string(), "#2c3e50");
    }

    #[tokio::test]
    async fn test_second_save_updates() {
        let manager = manager().await;
        let mut editor = ThemeEditor::create();
        editor.set_name("Warm");
        let id = editor.save(&manager).await.unwrap();

        editor.set_description("evening");
        assert_eq!(editor.state(), &EditorState::Draft);
        assert_eq!(editor.save(&manager).await.unwrap(), id);

        assert_eq!(manager.settings().await.custom_themes.len(), 1);
        assert_eq!(manager.theme(id.as_str()).await.unwrap().description, "evening");
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let manager = manager().await;
        let mut editor = ThemeEditor::create();
        editor.set_name("   ");
        editor.apply(StyleEdit::ParagraphFontSize(18));

        let result = editor.save(&manager).await;
        assert!(matches!(result, Err(EditorError::Validation(ValidationError::EmptyName))));
        assert_eq!(editor.state(), &EditorState::Rejected(ValidationError::EmptyName));
        assert!(editor.draft().styles.paragraph.contains("font-size: 18px;"));
        assert!(manager.settings().await.custom_themes.is_empty());

        editor.set_name("Fixed");
        assert!(editor.save(&manager).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_reference_rejected() {
        let manager = manager().await;
        let mut editor = ThemeEditor::create();
        editor.set_name("Copy");
        editor.use_reference_template(true);

        let result = editor.save(&manager).await;
        assert!(matches!(
            result,
            Err(EditorError::Validation(ValidationError::MissingReference))
        ));

        let ink = manager.theme("ink").await.unwrap();
        editor.select_reference(&ink);
        assert_eq!(editor.draft().name, "");
        assert!(!editor.draft().is_preset);
        assert_eq!(editor.draft().styles, ink.styles);

        editor.set_name("Copy");
        let id = editor.save(&manager).await.unwrap();
        assert_eq!(manager.theme(id.as_str()).await.unwrap().styles, ink.styles);
    }

    #[tokio::test]
    async fn test_edit_existing_custom_theme() {
        let manager = manager().await;
        let mut creator = ThemeEditor::create();
        creator.set_name("Mine");
        let id = creator.save(&manager).await.unwrap();

        let stored = manager.theme(id.as_str()).await.unwrap();
        let mut editor = ThemeEditor::edit(&stored);
        assert!(!editor.is_new());
        editor.apply(StyleEdit::AvatarRadius(-1));
        editor.reset_section(Section::Paragraph);
        assert_eq!(editor.save(&manager).await.unwrap(), id);

        let updated = manager.theme(id.as_str()).await.unwrap();
        assert!(updated.styles.header.avatar.container.contains("border-radius: 50%;"));
    }

    #[tokio::test]
    async fn test_editing_preset_creates_custom_theme() {
        let manager = manager().await;
        let preset = manager.theme("sakura").await.unwrap();

        let mut editor = ThemeEditor::edit(&preset);
        assert!(editor.is_new());
        editor.set_name("My Sakura");
        let id = editor.save(&manager).await.unwrap();

        assert_ne!(id, preset.id);
        assert_eq!(manager.theme("sakura").await.unwrap(), preset);
    }

    #[tokio::test]
    async fn test_deleted_target_reports_not_found() {
        let manager = manager().await;
        let mut editor = ThemeEditor::create();
        editor.set_name("Gone");
        let id = editor.save(&manager).await.unwrap();

        manager.remove_theme(id.as_str()).await.unwrap();
        editor.set_name("Gone again");
        assert!(matches!(editor.save(&manager).await, Err(EditorError::NotFound(_))));
        assert_eq!(editor.state(), &EditorState::Draft);
    }
}

//! Settings manager
//!
//! Owns the live [`CardSettings`], the theme repository and the font
//! catalog. Every mutation is applied to a copy, persisted through the host
//! [`SettingsStorage`], and only then swapped in and announced, so a failed
//! save leaves the live settings and subscribers untouched.
//!
//! # Example
//!
//! ```no_run
//! use app_state::manager::SettingsManager;
//! use card_theme::model::ThemeUpdate;
//! use std::sync::Arc;
//! use storage::persistence::MemoryStorage;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = SettingsManager::new(Arc::new(MemoryStorage::new()));
//!     manager.load().await?;
//!
//!     let mut events = manager.subscribe();
//!     manager.update_theme("ink", ThemeUpdate::visibility(false)).await?;
//!     println!("{}", events.recv().await?);
//!     Ok(())
//! }
//! ```

use card_theme::model::{FontOption, Theme, ThemeId, ThemeUpdate};
use std::sync::Arc;
use storage::persistence::{PersistenceError, SettingsStorage};
use storage::settings::{merge_with_defaults, CardSettings, SettingsUpdate};
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

use crate::events::SettingsEvent;

/// Settings manager errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisting or loading the settings failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Settings could not be converted to the host blob
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A theme with the same id already exists
    #[error("Theme already exists: {0}")]
    DuplicateTheme(ThemeId),

    /// A font with the same value already exists
    #[error("Font already exists: {0}")]
    DuplicateFont(String),

    /// Another write landed after the transaction began
    #[error("Settings changed since the transaction began")]
    Conflict,
}

/// Result type for settings manager operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Settings manager configuration
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Capacity of the change event channel
    pub event_buffer: usize,
    /// Theme selected when the active theme is removed
    pub fallback_theme_id: ThemeId,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { event_buffer: 16, fallback_theme_id: ThemeId::new("default") }
    }
}

impl ManagerConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event channel capacity
    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    /// Set the fallback theme
    pub fn fallback_theme_id(mut self, id: impl Into<ThemeId>) -> Self {
        self.fallback_theme_id = id.into();
        self
    }
}

#[derive(Debug, Default)]
struct ManagerState {
    settings: CardSettings,
    /// Bumped on every successful write
    revision: u64,
}

/// Theme repository and settings store
pub struct SettingsManager {
    storage: Arc<dyn SettingsStorage>,
    config: ManagerConfig,
    state: RwLock<ManagerState>,
    events_tx: broadcast::Sender<SettingsEvent>,
}

impl SettingsManager {
    /// Create a manager holding the default settings until [`load`](Self::load)
    pub fn new(storage: Arc<dyn SettingsStorage>) -> Self {
        Self::with_config(storage, ManagerConfig::default())
    }

    /// Create a manager with a custom configuration
    pub fn with_config(storage: Arc<dyn SettingsStorage>, config: ManagerConfig) -> Self {
        let (events_tx, _) = broadcast::channel(config.event_buffer.max(1));

        Self {
            storage,
            config,
            state: RwLock::new(ManagerState::default()),
            events_tx,
        }
    }

    /// Load the saved blob and merge it onto the defaults
    pub async fn load(&self) -> Result<()> {
        let saved = self.storage.load().await?;
        let settings = merge_with_defaults(saved);

        tracing::info!(
            "Loaded settings with {} preset and {} custom themes",
            settings.themes.len(),
            settings.custom_themes.len()
        );

        let mut state = self.state.write().await;
        state.settings = settings;
        state.revision += 1;
        Ok(())
    }

    /// Subscribe to change events
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.events_tx.subscribe()
    }

    /// The manager configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Snapshot of the current settings
    pub async fn settings(&self) -> CardSettings {
        self.state.read().await.settings.clone()
    }

    /// Revision of the live settings, bumped on every write
    pub async fn revision(&self) -> u64 {
        self.state.read().await.revision
    }

    /// Merge a partial update into the settings
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<()> {
        self.mutate(SettingsEvent::SettingsChanged, |settings| {
            if update.is_empty() {
                return Ok(false);
            }
            update.apply_to(settings);
            Ok(true)
        })
        .await?;
        Ok(())
    }

    // =========================================================================
    // Themes
    // =========================================================================

    /// Preset themes followed by custom themes
    pub async fn all_themes(&self) -> Vec<Theme> {
        all_themes(&self.state.read().await.settings)
    }

    /// Themes offered in the theme picker
    pub async fn visible_themes(&self) -> Vec<Theme> {
        self.all_themes().await.into_iter().filter(|theme| theme.is_visible).collect()
    }

    /// Look up a theme, presets first
    pub async fn theme(&self, id: &str) -> Option<Theme> {
        find_theme(&self.state.read().await.settings, id).cloned()
    }

    /// The selected theme, or the fallback theme if the selection is gone
    pub async fn active_theme(&self) -> Option<Theme> {
        let state = self.state.read().await;
        let settings = &state.settings;

        find_theme(settings, settings.theme_id.as_str())
            .or_else(|| find_theme(settings, self.config.fallback_theme_id.as_str()))
            .or_else(|| settings.themes.first())
            .cloned()
    }

    /// Add a custom theme
    ///
    /// The stored copy is always a visible, non-preset theme.
    pub async fn add_custom_theme(&self, theme: &Theme) -> Result<()> {
        self.mutate(SettingsEvent::ThemesChanged, |settings| {
            add_custom_theme(settings, theme)?;
            Ok(true)
        })
        .await?;
        Ok(())
    }

    /// Update a theme
    ///
    /// Presets only accept a visibility change. Returns `false` if the theme
    /// does not exist or the update has nothing a preset accepts.
    pub async fn update_theme(&self, id: &str, update: ThemeUpdate) -> Result<bool> {
        self.mutate(SettingsEvent::ThemesChanged, |settings| Ok(update_theme(settings, id, &update)))
            .await
    }

    /// Remove a custom theme
    ///
    /// Returns `false` for presets and unknown ids. Removing the active theme
    /// selects the fallback theme.
    pub async fn remove_theme(&self, id: &str) -> Result<bool> {
        let fallback = self.config.fallback_theme_id.clone();
        self.mutate(SettingsEvent::ThemesChanged, |settings| {
            Ok(remove_theme(settings, id, &fallback))
        })
        .await
    }

    // =========================================================================
    // Fonts
    // =========================================================================

    /// The font catalog
    pub async fn font_options(&self) -> Vec<FontOption> {
        self.state.read().await.settings.custom_fonts.clone()
    }

    /// Add a custom font
    pub async fn add_custom_font(&self, font: FontOption) -> Result<()> {
        self.mutate(SettingsEvent::FontsChanged, |settings| {
            add_custom_font(settings, font)?;
            Ok(true)
        })
        .await?;
        Ok(())
    }

    /// Replace a custom font
    ///
    /// Returns `false` if `old_value` is unknown or names a preset font.
    pub async fn update_font(&self, old_value: &str, font: FontOption) -> Result<bool> {
        self.mutate(SettingsEvent::FontsChanged, |settings| update_font(settings, old_value, font))
            .await
    }

    /// Remove a custom font
    ///
    /// Returns `false` if `value` is unknown or names a preset font.
    pub async fn remove_font(&self, value: &str) -> Result<bool> {
        self.mutate(SettingsEvent::FontsChanged, |settings| Ok(remove_font(settings, value)))
            .await
    }

    // =========================================================================
    // Batches
    // =========================================================================

    /// Start a batch of changes that is persisted once on commit
    pub async fn begin(&self) -> SettingsTransaction<'_> {
        let state = self.state.read().await;

        SettingsTransaction {
            manager: self,
            base_revision: state.revision,
            settings: state.settings.clone(),
            events: Vec::new(),
        }
    }

    /// Apply `op` to a copy of the settings, persist it and swap it in
    ///
    /// `op` returns whether it changed anything. Nothing is persisted or
    /// announced for a no-op or a failure.
    async fn mutate<F>(&self, event: SettingsEvent, op: F) -> Result<bool>
    where
        F: FnOnce(&mut CardSettings) -> Result<bool>,
    {
        let mut state = self.state.write().await;
        let mut next = state.settings.clone();

        if !op(&mut next)? {
            return Ok(false);
        }

        self.persist(&next).await?;
        state.settings = next;
        state.revision += 1;
        drop(state);

        let _ = self.events_tx.send(event);
        Ok(true)
    }

    async fn persist(&self, settings: &CardSettings) -> Result<()> {
        let blob = settings.to_value()?;

        if let Err(e) = self.storage.save(&blob).await {
            tracing::error!("Failed to persist settings, change discarded: {}", e);
            return Err(e.into());
        }

        tracing::debug!("Persisted settings");
        Ok(())
    }
}

/// A batch of changes applied to a private copy of the settings
///
/// Nothing is visible to the manager until [`commit`](Self::commit).
/// Dropping the transaction discards it.
pub struct SettingsTransaction<'a> {
    manager: &'a SettingsManager,
    base_revision: u64,
    settings: CardSettings,
    events: Vec<SettingsEvent>,
}

impl SettingsTransaction<'_> {
    /// The transaction's view of the settings
    pub fn settings(&self) -> &CardSettings {
        &self.settings
    }

    /// Merge a partial update into the settings
    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        if !update.is_empty() {
            update.apply_to(&mut self.settings);
            self.record(SettingsEvent::SettingsChanged);
        }
    }

    /// Add a custom theme
    pub fn add_custom_theme(&mut self, theme: &Theme) -> Result<()> {
        add_custom_theme(&mut self.settings, theme)?;
        self.record(SettingsEvent::ThemesChanged);
        Ok(())
    }

    /// Update a theme
    pub fn update_theme(&mut self, id: &str, update: &ThemeUpdate) -> bool {
        let changed = update_theme(&mut self.settings, id, update);
        if changed {
            self.record(SettingsEvent::ThemesChanged);
        }
        changed
    }

    /// Remove a custom theme
    pub fn remove_theme(&mut self, id: &str) -> bool {
        let changed = remove_theme(&mut self.settings, id, &self.manager.config.fallback_theme_id);
        if changed {
            self.record(SettingsEvent::ThemesChanged);
        }
        changed
    }

    /// Add a custom font
    pub fn add_custom_font(&mut self, font: FontOption) -> Result<()> {
        add_custom_font(&mut self.settings, font)?;
        self.record(SettingsEvent::FontsChanged);
        Ok(())
    }

    /// Replace a custom font
    pub fn update_font(&mut self, old_value: &str, font: FontOption) -> Result<bool> {
        let changed = update_font(&mut self.settings, old_value, font)?;
        if changed {
            self.record(SettingsEvent::FontsChanged);
        }
        Ok(changed)
    }

    /// Remove a custom font
    pub fn remove_font(&mut self, value: &str) -> bool {
        let changed = remove_font(&mut self.settings, value);
        if changed {
            self.record(SettingsEvent::FontsChanged);
        }
        changed
    }

    /// Persist the batch with one save
    ///
    /// Fails with [`StoreError::Conflict`] if the manager was written to
    /// after the transaction began.
    pub async fn commit(self) -> Result<()> {
        let manager = self.manager;
        let mut state = manager.state.write().await;

        if state.revision != self.base_revision {
            tracing::warn!(
                "Rejecting settings batch begun at revision {}, now {}",
                self.base_revision,
                state.revision
            );
            return Err(StoreError::Conflict);
        }

        if self.events.is_empty() {
            return Ok(());
        }

        manager.persist(&self.settings).await?;
        state.settings = self.settings;
        state.revision += 1;
        drop(state);

        for event in self.events {
            let _ = manager.events_tx.send(event);
        }
        Ok(())
    }

    fn record(&mut self, event: SettingsEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }
}

// =============================================================================
// Operations on a settings value
// =============================================================================

fn all_themes(settings: &CardSettings) -> Vec<Theme> {
    settings.themes.iter().chain(&settings.custom_themes).cloned().collect()
}

fn find_theme<'a>(settings: &'a CardSettings, id: &str) -> Option<&'a Theme> {
    settings
        .themes
        .iter()
        .find(|theme| theme.id == *id)
        .or_else(|| settings.custom_themes.iter().find(|theme| theme.id == *id))
}

fn add_custom_theme(settings: &mut CardSettings, theme: &Theme) -> Result<()> {
    if find_theme(settings, theme.id.as_str()).is_some() {
        return Err(StoreError::DuplicateTheme(theme.id.clone()));
    }

    let mut stored = theme.clone();
    stored.is_preset = false;
    stored.is_visible = true;

    tracing::info!("Adding custom theme {}", stored.id);
    settings.custom_themes.push(stored);
    Ok(())
}

fn update_theme(settings: &mut CardSettings, id: &str, update: &ThemeUpdate) -> bool {
    if let Some(preset) = settings.themes.iter_mut().find(|theme| theme.id == *id) {
        return match update.is_visible {
            Some(visible) => {
                if update.touches_content() {
                    tracing::warn!("Ignoring content changes to preset theme {}", id);
                }
                preset.is_visible = visible;
                true
            }
            None => false,
        };
    }

    match settings.custom_themes.iter_mut().find(|theme| theme.id == *id) {
        Some(custom) => {
            update.apply_to(custom);
            true
        }
        None => false,
    }
}

fn remove_theme(settings: &mut CardSettings, id: &str, fallback: &ThemeId) -> bool {
    let Some(index) = settings.custom_themes.iter().position(|theme| theme.id == *id) else {
        return false;
    };

    // A custom theme shadowed by a preset with the same id is not removable
    if settings.themes.iter().any(|theme| theme.id == *id) {
        return false;
    }

    settings.custom_themes.remove(index);
    if settings.theme_id == *id {
        tracing::info!("Active theme {} removed, selecting {}", id, fallback);
        settings.theme_id = fallback.clone();
    }
    true
}

fn add_custom_font(settings: &mut CardSettings, mut font: FontOption) -> Result<()> {
    if settings.custom_fonts.iter().any(|existing| existing.value == font.value) {
        return Err(StoreError::DuplicateFont(font.value));
    }

    font.is_preset = false;
    settings.custom_fonts.push(font);
    Ok(())
}

fn update_font(settings: &mut CardSettings, old_value: &str, mut font: FontOption) -> Result<bool> {
    let Some(index) = settings
        .custom_fonts
        .iter()
        .position(|existing| existing.value == old_value && !existing.is_preset)
    else {
        return Ok(false);
    };

    if font.value != old_value && settings.custom_fonts.iter().any(|f| f.value == font.value) {
        return Err(StoreError::DuplicateFont(font.value));
    }

    font.is_preset = false;
    settings.custom_fonts[index] = font;
    Ok(true)
}

fn remove_font(settings: &mut CardSettings, value: &str) -> bool {
    let before = settings.custom_fonts.len();
    settings.custom_fonts.retain(|font| font.value != value || font.is_preset);
    settings.custom_fonts.len() != before
}

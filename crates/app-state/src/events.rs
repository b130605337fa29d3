//! Settings change events

/// Events broadcast after a settings change has been persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsEvent {
    /// A theme was added, updated, removed or had its visibility toggled
    ThemesChanged,
    /// The font catalog changed
    FontsChanged,
    /// Scalar settings changed
    SettingsChanged,
}

impl SettingsEvent {
    /// Event name used by the host's event emitter
    pub fn name(&self) -> &'static str {
        match self {
            SettingsEvent::ThemesChanged => "theme-visibility-changed",
            SettingsEvent::FontsChanged => "fonts-changed",
            SettingsEvent::SettingsChanged => "settings-changed",
        }
    }
}

impl std::fmt::Display for SettingsEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(SettingsEvent::ThemesChanged.name(), "theme-visibility-changed");
        assert_eq!(SettingsEvent::FontsChanged.to_string(), "fonts-changed");
    }
}

//! Card background declarations
//!
//! The background fragment accepts arbitrary user-authored CSS, so unlike the
//! other regions it is handled as an ordered `property -> value` map that is
//! rebuilt on every edit.

use crate::fragment::is_declaration_value;

/// Background color used when the fragment declares none
pub const DEFAULT_BACKGROUND_COLOR: &str = "#fffaf5";

const BACKGROUND_COLOR: &str = "background-color";

/// Ordered map of the background declarations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BackgroundStyle {
    entries: Vec<(String, String)>,
}

impl BackgroundStyle {
    /// Parse a background fragment
    ///
    /// Declarations with an empty property or value are dropped, except
    /// `background-color`, which is kept even when empty. A repeated property
    /// keeps its first position and its last value.
    pub fn parse(style: &str) -> Self {
        let mut background = Self::default();
        background.insert_all(style);
        background
    }

    /// Declarations in insertion order
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Value of a declared property
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set a property in place, or append it if missing
    ///
    /// Both sides are trimmed. An empty value removes the property, except
    /// for `background-color`. Returns `false` without changing the map when
    /// the property is empty or contains `:` or `;`, or the value contains
    /// `;` or unbalanced parentheses or quotes.
    pub fn set(&mut self, property: &str, value: &str) -> bool {
        let (property, value) = (property.trim(), value.trim());
        if property.is_empty()
            || property.contains([':', ';'])
            || !is_declaration_value(property)
            || value.contains(';')
            || !is_declaration_value(value)
        {
            return false;
        }

        if value.is_empty() && property != BACKGROUND_COLOR {
            self.entries.retain(|(name, _)| name != property);
            return true;
        }

        match self.entries.iter_mut().find(|(name, _)| name == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((property.to_string(), value.to_string())),
        }
        true
    }

    /// Declared background color, or the default
    pub fn background_color(&self) -> &str {
        self.get(BACKGROUND_COLOR)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BACKGROUND_COLOR)
    }

    /// Set the background color
    pub fn set_background_color(&mut self, color: &str) {
        self.set(BACKGROUND_COLOR, color);
    }

    /// Every declaration except the background color, joined by `; `
    pub fn custom_css(&self) -> String {
        self.entries
            .iter()
            .filter(|(name, _)| name != BACKGROUND_COLOR)
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Replace every declaration except the background color with `css`
    pub fn set_custom_css(&mut self, css: &str) {
        self.entries.retain(|(name, _)| name == BACKGROUND_COLOR);
        self.insert_all(css);
    }

    /// Rebuild the fragment text: `prop: value` joined by `; `, with a
    /// trailing `;`
    pub fn to_style_string(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let joined = self
            .entries
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ");

        format!("{};", joined)
    }

    fn insert_all(&mut self, css: &str) {
        for declaration in css.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            self.set(name, value);
        }
    }
}

//! Typed values found inside style declarations
//!
//! Colors and lengths are parsed out of declaration values so an edit can
//! replace a single token (the color of a `border`, the width of an `hr`)
//! and leave the rest of the value untouched.

use regex::Regex;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Value parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Not a `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` color
    #[error("Invalid hex color: {0}")]
    InvalidColor(String),

    /// Not a number followed by `px`, `em`, `rem` or `%`
    #[error("Invalid length: {0}")]
    InvalidLength(String),
}

/// Result type for value parsing
pub type Result<T> = std::result::Result<T, ValueError>;

// =============================================================================
// Colors
// =============================================================================

/// An opaque hex color, stored in its six digit form
///
/// Short forms are expanded and a trailing alpha channel is dropped, so
/// derived colors like `#11223380` can always be produced with
/// [`HexColor::with_alpha`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    digits: String,
}

impl HexColor {
    /// Parse a hex color string (e.g., "#8b4513", "#fff", "#8b4513cc")
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || ValueError::InvalidColor(input.to_string());
        let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digits = match hex.len() {
            3 | 4 => hex.chars().take(3).flat_map(|c| [c, c]).collect(),
            6 | 8 => hex[..6].to_string(),
            _ => return Err(invalid()),
        };

        Ok(Self { digits })
    }

    /// Parse a color known to be valid, falling back to black
    pub(crate) fn trusted(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|_| Self { digits: "000000".to_string() })
    }

    /// The color followed by a two digit alpha channel (e.g., `#112233BB`)
    pub fn with_alpha(&self, alpha: u8) -> String {
        format!("#{}{:02X}", self.digits, alpha)
    }

    /// Red, green and blue components
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: Range<usize>| u8::from_str_radix(&self.digits[range], 16).unwrap_or(0);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// The color as a CSS `rgba()` function with the given opacity
    pub fn to_rgba(&self, alpha: f32) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({},{},{},{})", r, g, b, alpha)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.digits)
    }
}

impl FromStr for HexColor {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// =============================================================================
// Lengths
// =============================================================================

/// Unit of a [`Length`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Pixels
    Px,
    /// Relative to the element font size
    Em,
    /// Relative to the root font size
    Rem,
    /// Percentage of the containing block
    Percent,
}

impl LengthUnit {
    /// CSS suffix for the unit
    pub fn suffix(&self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Rem => "rem",
            LengthUnit::Percent => "%",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(LengthUnit::Px),
            "em" => Some(LengthUnit::Em),
            "rem" => Some(LengthUnit::Rem),
            "%" => Some(LengthUnit::Percent),
            _ => None,
        }
    }
}

/// A numeric CSS length such as `16px` or `1.15em`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// Numeric part
    pub value: f64,
    /// Unit part
    pub unit: LengthUnit,
}

impl Length {
    /// Length in pixels
    pub fn px(value: impl Into<f64>) -> Self {
        Self { value: value.into(), unit: LengthUnit::Px }
    }

    /// Length in em
    pub fn em(value: impl Into<f64>) -> Self {
        Self { value: value.into(), unit: LengthUnit::Em }
    }

    /// Percentage length
    pub fn percent(value: impl Into<f64>) -> Self {
        Self { value: value.into(), unit: LengthUnit::Percent }
    }

    /// Parse a single length token
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let caps = length_regex()
            .captures(trimmed)
            .filter(|caps| caps.get(0).map(|m| m.as_str().len()) == Some(trimmed.len()))
            .ok_or_else(|| ValueError::InvalidLength(input.to_string()))?;

        let value = caps[1]
            .parse::<f64>()
            .map_err(|_| ValueError::InvalidLength(input.to_string()))?;
        let unit = LengthUnit::from_suffix(&caps[2])
            .ok_or_else(|| ValueError::InvalidLength(input.to_string()))?;

        Ok(Self { value, unit })
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit.suffix())
    }
}

impl FromStr for Length {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Format a number without trailing zeros (`16`, `1.15`, `0.8`)
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.4}", value);
    formatted.trim_end_matches('0').trim_end_matches('.').to_string()
}

// =============================================================================
// Token helpers
// =============================================================================

fn color_regex() -> &'static Regex {
    static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    COLOR_REGEX.get_or_init(|| {
        // Matches #hex colors and rgb()/rgba() functions
        Regex::new(r"#[0-9a-fA-F]{3,8}\b|rgba?\([^)]*\)").unwrap()
    })
}

fn rgba_regex() -> &'static Regex {
    static RGBA_REGEX: OnceLock<Regex> = OnceLock::new();
    RGBA_REGEX.get_or_init(|| Regex::new(r"rgba\([^)]*\)").unwrap())
}

fn length_regex() -> &'static Regex {
    static LENGTH_REGEX: OnceLock<Regex> = OnceLock::new();
    LENGTH_REGEX.get_or_init(|| Regex::new(r"(-?(?:\d+\.?\d*|\.\d+))(px|em|rem|%)").unwrap())
}

fn replace_range(value: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(value.len() + replacement.len());
    out.push_str(&value[..range.start]);
    out.push_str(replacement);
    out.push_str(&value[range.end..]);
    out
}

/// First color token (`#hex` or `rgb()`/`rgba()`) in a value
pub fn first_color(value: &str) -> Option<&str> {
    color_regex().find(value).map(|m| m.as_str())
}

/// Replace the first color token in a value
///
/// Returns `None` if the value holds no color.
pub fn replace_first_color(value: &str, replacement: &str) -> Option<String> {
    color_regex()
        .find(value)
        .map(|m| replace_range(value, m.range(), replacement))
}

/// Replace the first `rgba()` function in a value
pub fn replace_first_rgba(value: &str, replacement: &str) -> Option<String> {
    rgba_regex()
        .find(value)
        .map(|m| replace_range(value, m.range(), replacement))
}

/// First length token in a value
pub fn first_length(value: &str) -> Option<Length> {
    length_regex()
        .find(value)
        .and_then(|m| Length::parse(m.as_str()).ok())
}

/// Replace the first length token in a value
pub fn replace_first_length(value: &str, replacement: Length) -> Option<String> {
    length_regex()
        .find(value)
        .map(|m| replace_range(value, m.range(), &replacement.to_string()))
}

/// Byte range of the first `name(...)` call in a value, parentheses balanced
pub fn find_function(value: &str, name: &str) -> Option<Range<usize>> {
    let start = value.find(&format!("{}(", name))?;
    let mut depth = 0usize;

    for (offset, c) in value[start..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start..start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Replace the first `name(...)` call in a value
pub fn replace_function(value: &str, name: &str, replacement: &str) -> Option<String> {
    find_function(value, name).map(|range| replace_range(value, range, replacement))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parse() {
        let color = HexColor::parse("#8b4513").unwrap();
        assert_eq!(color.to_string(), "#8b4513");
        assert_eq!(HexColor::parse("#abc").unwrap().to_string(), "#aabbcc");
        assert_eq!(HexColor::parse("#8b4513cc").unwrap().to_string(), "#8b4513");
        assert!(HexColor::parse("8b4513").is_err());
        assert!(HexColor::parse("#8b45").is_ok());
        assert!(HexColor::parse("#zzzzzz").is_err());
        assert!(HexColor::parse("#12345").is_err());
    }

    #[test]
    fn test_hex_color_alpha_and_rgba() {
        let color = HexColor::parse("#112233").unwrap();
        assert_eq!(color.with_alpha(0xBB), "#112233BB");
        assert_eq!(color.with_alpha(0x08), "#11223308");
        assert_eq!(color.rgb(), (0x11, 0x22, 0x33));
        assert_eq!(color.to_rgba(0.1), "rgba(17,34,51,0.1)");
    }

    #[test]
    fn test_length_parse_and_display() {
        assert_eq!(Length::parse("16px").unwrap(), Length::px(16));
        assert_eq!(Length::parse("1.15em").unwrap(), Length::em(1.15));
        assert_eq!(Length::parse("50%").unwrap(), Length::percent(50));
        assert_eq!(Length::parse("-5px").unwrap(), Length::px(-5));
        assert!(Length::parse("16").is_err());
        assert!(Length::parse("16px solid").is_err());

        assert_eq!(Length::em(1.3).to_string(), "1.3em");
        assert_eq!(Length::px(28).to_string(), "28px");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(0.8), "0.8");
        assert_eq!(format_number(1.15), "1.15");
    }

    #[test]
    fn test_color_tokens() {
        assert_eq!(first_color("1px solid #b8733380"), Some("#b8733380"));
        assert_eq!(
            first_color("0 4px 16px rgba(184,115,51,0.1)"),
            Some("rgba(184,115,51,0.1)")
        );
        assert_eq!(
            replace_first_color("1px solid #b8733380", "#11223380").as_deref(),
            Some("1px solid #11223380")
        );
        assert!(replace_first_color("none", "#000").is_none());
    }

    #[test]
    fn test_length_tokens() {
        assert_eq!(first_length("2px solid #b8733380"), Some(Length::px(2)));
        assert_eq!(
            replace_first_length("28px 0", Length::px(12)).as_deref(),
            Some("12px 0")
        );
        assert_eq!(
            replace_first_length("1.5em auto", Length::em(2)).as_deref(),
            Some("2em auto")
        );
    }

    #[test]
    fn test_function_tokens() {
        let value = "linear-gradient(to right, rgba(222,184,135,0.1), transparent)";
        assert_eq!(find_function(value, "linear-gradient"), Some(0..value.len()));

        let replaced = replace_function(
            "#fff linear-gradient(to right, #a, #b) no-repeat",
            "linear-gradient",
            "none",
        );
        assert_eq!(replaced.as_deref(), Some("#fff none no-repeat"));
        assert!(find_function("red", "linear-gradient").is_none());
    }
}

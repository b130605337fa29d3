//! Declaration-list view over a style fragment
//!
//! A fragment is the text of one style region, e.g.
//! `"font-size: 15px; color: #5a4a42;"`. [`Fragment`] splits it into
//! declarations without normalizing it: edits splice new value bytes into
//! the original text, so whitespace, ordering and foreign tokens survive.
//!
//! # Example
//!
//! ```
//! use card_theme::fragment::{Absent, Fragment};
//!
//! let mut fragment = Fragment::new("font-weight: 600; color: #8b4513;");
//! fragment.set("color", "#112233", Absent::Skip);
//! fragment.set("font-style", "italic", Absent::Append);
//! assert_eq!(
//!     fragment.as_str(),
//!     "font-weight: 600; color: #112233; font-style: italic;"
//! );
//! ```

use std::ops::Range;

/// What an edit does when the targeted property is not declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absent {
    /// Add a new declaration at the end of the fragment
    Append,
    /// Leave the fragment unchanged
    Skip,
}

/// One `;`-terminated piece of a fragment
#[derive(Debug, Clone)]
struct Segment {
    /// Text of the segment, excluding the terminator
    range: Range<usize>,
    /// Index of the terminating `;`, if any
    terminator: Option<usize>,
    /// Property name and value ranges, if the segment is a declaration
    declaration: Option<(Range<usize>, Range<usize>)>,
}

/// A style fragment addressed as an ordered list of declarations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    source: String,
}

impl Fragment {
    /// Wrap a fragment string
    pub fn new(source: impl Into<String>) -> Self {
        Self { source: source.into() }
    }

    /// The fragment text
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Consume the view and return the fragment text
    pub fn into_string(self) -> String {
        self.source
    }

    /// All declarations in order, as `(property, value)` pairs
    ///
    /// Stray tokens without a `:` are not declarations and are skipped.
    pub fn declarations(&self) -> Vec<(&str, &str)> {
        self.segments()
            .into_iter()
            .filter_map(|segment| segment.declaration)
            .map(|(name, value)| (&self.source[name], &self.source[value]))
            .collect()
    }

    /// Value of the first declaration of `property`
    pub fn get(&self, property: &str) -> Option<&str> {
        self.locate(property)
            .and_then(|segment| segment.declaration)
            .map(|(_, value)| &self.source[value])
    }

    /// Whether `property` is declared
    pub fn contains(&self, property: &str) -> bool {
        self.locate(property).is_some()
    }

    /// Replace the value of the first declaration of `property`
    ///
    /// Only the value bytes change. Returns `false` if the property is not
    /// declared or already has this value.
    pub fn replace(&mut self, property: &str, value: &str) -> bool {
        self.replace_with(property, |_| Some(value.to_string()))
    }

    /// Rewrite the value of the first declaration of `property`
    ///
    /// `rewrite` receives the current value and returns the new one, or
    /// `None` if the value does not have the expected shape. A new value
    /// that fails [`is_declaration_value`] is not written. Returns whether
    /// the fragment changed.
    pub fn replace_with<F>(&mut self, property: &str, rewrite: F) -> bool
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let Some((_, value_range)) = self.locate(property).and_then(|s| s.declaration) else {
            return false;
        };

        match rewrite(&self.source[value_range.clone()]) {
            Some(new_value)
                if is_declaration_value(&new_value)
                    && new_value != self.source[value_range.clone()] =>
            {
                self.source.replace_range(value_range, &new_value);
                true
            }
            _ => false,
        }
    }

    /// Append a `property: value;` declaration
    pub fn append(&mut self, property: &str, value: &str) {
        let trimmed = self.source.trim_end();

        self.source = if trimmed.is_empty() {
            format!("{}: {};", property, value)
        } else if trimmed.ends_with(';') {
            format!("{} {}: {};", trimmed, property, value)
        } else {
            format!("{}; {}: {};", trimmed, property, value)
        };
    }

    /// Replace the value of `property`, or follow `absent` if it is missing
    ///
    /// Returns whether the fragment changed.
    pub fn set(&mut self, property: &str, value: &str, absent: Absent) -> bool {
        if self.get(property).is_some() {
            return self.replace(property, value);
        }

        match absent {
            Absent::Append if is_declaration_value(value) => {
                self.append(property, value);
                true
            }
            _ => false,
        }
    }

    /// Remove the first declaration of `property` and its terminator
    pub fn remove(&mut self, property: &str) -> bool {
        let Some(segment) = self.locate(property) else {
            return false;
        };

        let end = segment.terminator.map(|t| t + 1).unwrap_or(self.source.len());
        self.source.replace_range(segment.range.start..end, "");

        if segment.range.start == 0 {
            self.source = self.source.trim_start().to_string();
        }
        if segment.terminator.is_none() {
            self.source = self.source.trim_end().to_string();
        }

        true
    }

    fn locate(&self, property: &str) -> Option<Segment> {
        self.segments().into_iter().find(|segment| {
            segment
                .declaration
                .as_ref()
                .is_some_and(|(name, _)| self.source[name.clone()].eq_ignore_ascii_case(property))
        })
    }

    /// Split on `;` outside parentheses and quotes
    fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut start = 0;

        for (idx, c) in self.source.char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '(') => depth += 1,
                (None, ')') => depth = depth.saturating_sub(1),
                (None, ';') if depth == 0 => {
                    segments.push(self.segment(start..idx, Some(idx)));
                    start = idx + 1;
                }
                _ => {}
            }
        }

        if start < self.source.len() {
            segments.push(self.segment(start..self.source.len(), None));
        }

        segments
    }

    fn segment(&self, range: Range<usize>, terminator: Option<usize>) -> Segment {
        let text = &self.source[range.clone()];
        let declaration = split_declaration(text).and_then(|(name, value)| {
            let name = offset(trim_range(text, name), range.start);
            let value = offset(trim_range(text, value), range.start);
            (!name.is_empty()).then_some((name, value))
        });

        Segment { range, terminator, declaration }
    }
}

/// Edit a stored fragment string in place through a [`Fragment`] view
pub fn edit<R, F>(leaf: &mut String, f: F) -> R
where
    F: FnOnce(&mut Fragment) -> R,
{
    let mut fragment = Fragment::new(std::mem::take(leaf));
    let result = f(&mut fragment);
    *leaf = fragment.into_string();
    result
}

impl From<&str> for Fragment {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Fragment {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

/// Whether `value` can sit inside a declaration without changing how the
/// rest of the fragment splits
///
/// Parentheses and quotes must be balanced and there must be no top-level
/// `;`.
pub fn is_declaration_value(value: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in value.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            (None, ';') if depth == 0 => return false,
            _ => {}
        }
    }

    depth == 0 && quote.is_none()
}

/// Split a segment at its first top-level `:`
fn split_declaration(text: &str) -> Option<(Range<usize>, Range<usize>)> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (idx, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ':') if depth == 0 => return Some((0..idx, idx + 1..text.len())),
            _ => {}
        }
    }

    None
}

fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    let start = range.start + leading;
    let end = (range.end - trailing).max(start);
    start..end
}

fn offset(range: Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declarations() {
        let fragment = Fragment::new("font-size: 17px; color: #8b4513; serif; text-shadow: 0 2px 4px rgba(139,69,19,0.1);");
        let declarations = fragment.declarations();
        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0], ("font-size", "17px"));
        assert_eq!(declarations[1], ("color", "#8b4513"));
        assert_eq!(declarations[2], ("text-shadow", "0 2px 4px rgba(139,69,19,0.1)"));
    }

    #[test]
    fn test_get_matches_exact_property() {
        let fragment = Fragment::new("background-color: #fff; color: #333;");
        assert_eq!(fragment.get("color"), Some("#333"));
        assert_eq!(fragment.get("background-color"), Some("#fff"));
        assert_eq!(fragment.get("COLOR"), Some("#333"));
        assert_eq!(fragment.get("border"), None);
    }

    #[test]
    fn test_replace_preserves_surrounding_bytes() {
        let mut fragment = Fragment::new("font-weight: 600;   color:#8b4513 ;padding:0");
        assert!(fragment.replace("color", "#112233"));
        assert_eq!(fragment.as_str(), "font-weight: 600;   color:#112233 ;padding:0");
    }

    #[test]
    fn test_semicolons_inside_parentheses_and_quotes() {
        let fragment = Fragment::new(
            "background: url(data:image/png;base64,AAAA); font-family: 'a;b', serif; color: red",
        );
        assert_eq!(fragment.get("background"), Some("url(data:image/png;base64,AAAA)"));
        assert_eq!(fragment.get("font-family"), Some("'a;b', serif"));
        assert_eq!(fragment.get("color"), Some("red"));
    }

    #[test]
    fn test_append_forms() {
        let mut empty = Fragment::new("");
        empty.append("color", "#000");
        assert_eq!(empty.as_str(), "color: #000;");

        let mut terminated = Fragment::new("font-weight: 600; ");
        terminated.append("color", "#000");
        assert_eq!(terminated.as_str(), "font-weight: 600; color: #000;");

        let mut open = Fragment::new("width: 20px");
        open.append("fill", "#1DA1F2");
        assert_eq!(open.as_str(), "width: 20px; fill: #1DA1F2;");
    }

    #[test]
    fn test_set_absent_policy() {
        let mut fragment = Fragment::new("font-size: 15px;");
        assert!(!fragment.set("color", "#000", Absent::Skip));
        assert_eq!(fragment.as_str(), "font-size: 15px;");

        assert!(fragment.set("color", "#000", Absent::Append));
        assert_eq!(fragment.as_str(), "font-size: 15px; color: #000;");

        assert!(!fragment.set("color", "#000", Absent::Append));
        assert_eq!(fragment.as_str(), "font-size: 15px; color: #000;");
    }

    #[test]
    fn test_unbalanced_values_are_rejected() {
        let mut fragment = Fragment::new("background: #fff; backdrop-filter: blur(10px);");
        assert!(!fragment.set("background", "url(x", Absent::Append));
        assert!(!fragment.set("background", "'open", Absent::Append));
        assert!(!fragment.set("background", "red; color: blue", Absent::Append));
        assert!(!fragment.set("border", "a)", Absent::Append));
        assert_eq!(fragment.as_str(), "background: #fff; backdrop-filter: blur(10px);");

        assert!(fragment.set("background", "url('a;b')", Absent::Append));
        assert_eq!(fragment.get("backdrop-filter"), Some("blur(10px)"));
    }

    #[test]
    fn test_replace_with_rejects_unexpected_shape() {
        let mut fragment = Fragment::new("border: none;");
        let changed = fragment.replace_with("border", |_| None);
        assert!(!changed);
        assert_eq!(fragment.as_str(), "border: none;");
    }

    #[test]
    fn test_remove() {
        let mut fragment = Fragment::new(
            "color: #d2691e; text-decoration: none; background-image: linear-gradient(to right, #a, #b); background-size: 0% 1px;",
        );
        assert!(fragment.remove("background-image"));
        assert_eq!(
            fragment.as_str(),
            "color: #d2691e; text-decoration: none; background-size: 0% 1px;"
        );

        assert!(fragment.remove("color"));
        assert_eq!(fragment.as_str(), "text-decoration: none; background-size: 0% 1px;");

        let mut open = Fragment::new("color: red; width: 2px");
        assert!(open.remove("width"));
        assert_eq!(open.as_str(), "color: red;");

        assert!(!open.remove("height"));
    }
}

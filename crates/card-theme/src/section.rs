//! Editor sections and per-section reset

use crate::model::StyleSet;

/// A group of fragments edited together in the theme editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Every section
    All,
    /// Card background
    Background,
    /// Author header and avatar
    Header,
    /// Footer bar
    Footer,
    /// Headings
    Title,
    /// Paragraphs and inline emphasis
    Paragraph,
    /// Lists
    List,
    /// Block quotes
    Quote,
    /// Code blocks and inline code
    Code,
    /// Links
    Link,
    /// Tables
    Table,
    /// Horizontal rules
    Hr,
    /// Footnote markers
    Footnote,
    /// Images
    Image,
}

impl Section {
    /// Every section except [`Section::All`], in editor order
    pub const EACH: [Section; 13] = [
        Section::Background,
        Section::Header,
        Section::Footer,
        Section::Title,
        Section::Paragraph,
        Section::List,
        Section::Quote,
        Section::Code,
        Section::Link,
        Section::Table,
        Section::Hr,
        Section::Footnote,
        Section::Image,
    ];

    /// Restore this section of `styles` to the built-in defaults
    ///
    /// Other sections are left untouched.
    pub fn reset(&self, styles: &mut StyleSet) {
        let defaults = StyleSet::default();

        match self {
            Section::All => *styles = defaults,
            Section::Background => styles.image_preview = defaults.image_preview,
            Section::Header => styles.header = defaults.header,
            Section::Footer => styles.footer = defaults.footer,
            Section::Title => styles.title = defaults.title,
            Section::Paragraph => {
                styles.paragraph = defaults.paragraph;
                styles.emphasis = defaults.emphasis;
            }
            Section::List => styles.list = defaults.list,
            Section::Quote => styles.quote = defaults.quote,
            Section::Code => styles.code = defaults.code,
            Section::Link => styles.link = defaults.link,
            Section::Table => styles.table = defaults.table,
            Section::Hr => styles.hr = defaults.hr,
            Section::Footnote => styles.footnote = defaults.footnote,
            Section::Image => styles.image = defaults.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::StyleEdit;
    use crate::value::HexColor;

    fn tinted() -> StyleSet {
        let mut styles = StyleSet::default();
        StyleEdit::GlobalColor(HexColor::parse("#112233").unwrap()).apply(&mut styles);
        StyleEdit::BackgroundColor(HexColor::parse("#000000").unwrap()).apply(&mut styles);
        styles
    }

    #[test]
    fn test_reset_one_section_leaves_others() {
        let tinted = tinted();
        let defaults = StyleSet::default();

        for section in Section::EACH {
            let mut styles = tinted.clone();
            section.reset(&mut styles);

            let mut expected = tinted.clone();
            match section {
                Section::Background => expected.image_preview = defaults.image_preview.clone(),
                Section::Header => expected.header = defaults.header.clone(),
                Section::Footer => expected.footer = defaults.footer.clone(),
                Section::Title => expected.title = defaults.title.clone(),
                Section::Paragraph => {
                    expected.paragraph = defaults.paragraph.clone();
                    expected.emphasis = defaults.emphasis.clone();
                }
                Section::List => expected.list = defaults.list.clone(),
                Section::Quote => expected.quote = defaults.quote.clone(),
                Section::Code => expected.code = defaults.code.clone(),
                Section::Link => expected.link = defaults.link.clone(),
                Section::Table => expected.table = defaults.table.clone(),
                Section::Hr => expected.hr = defaults.hr.clone(),
                Section::Footnote => expected.footnote = defaults.footnote.clone(),
                Section::Image => expected.image = defaults.image.clone(),
                Section::All => unreachable!(),
            }

            assert_eq!(styles, expected, "{:?}", section);
        }
    }

    #[test]
    fn test_reset_all() {
        let mut styles = tinted();
        Section::All.reset(&mut styles);
        assert_eq!(styles, StyleSet::default());
    }

    #[test]
    fn test_reset_paragraph_includes_emphasis() {
        let mut styles = tinted();
        Section::Paragraph.reset(&mut styles);
        assert_eq!(styles.emphasis, StyleSet::default().emphasis);
        assert_ne!(styles.list, StyleSet::default().list);
    }
}

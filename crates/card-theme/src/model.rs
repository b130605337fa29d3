//! Theme data model
//!
//! A [`Theme`] is a named [`StyleSet`]: a fixed tree of style fragments, one
//! per region of the rendered card. Fragments are stored as the declaration
//! text the renderer consumes; [`crate::fragment::Fragment`] is the editing
//! view over them.
//!
//! Every level of the tree deserializes leniently: a missing field takes the
//! built-in default fragment for that position, so themes saved by older
//! versions keep loading after new regions are added.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Stable theme identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    /// Wrap an existing identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (unsaved draft)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive an identifier from a theme name and the current time
    pub fn from_name(name: &str) -> Self {
        Self::from_name_at(name, Utc::now().timestamp_millis())
    }

    /// Derive an identifier from a theme name and a Unix timestamp in
    /// milliseconds
    ///
    /// The name is slugged (lowercase ASCII letters, digits and CJK
    /// ideographs kept, every other run collapsed to `-`) and suffixed with
    /// the last four base-36 digits of the timestamp.
    ///
    /// ```
    /// use card_theme::model::ThemeId;
    ///
    /// let id = ThemeId::from_name_at("My Warm  Theme!", 1_700_000_000_000);
    /// assert_eq!(id.as_str(), "my-warm-theme-3v28");
    /// ```
    pub fn from_name_at(name: &str, unix_millis: i64) -> Self {
        let base36 = to_base36(unix_millis.unsigned_abs());
        let suffix = &base36[base36.len().saturating_sub(4)..];
        Self(format!("{}-{}", slugify(name), suffix))
    }

    /// Derive an identifier from a theme name that `taken` does not reject
    ///
    /// Starts from the current time and moves the timestamp forward until
    /// the suffix no longer collides.
    pub fn unique_from_name<F>(name: &str, taken: F) -> Self
    where
        F: Fn(&ThemeId) -> bool,
    {
        let mut millis = Utc::now().timestamp_millis();
        loop {
            let id = Self::from_name_at(name, millis);
            if !taken(&id) {
                return id;
            }
            millis += 1;
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ThemeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ThemeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ThemeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());

    for c in name.to_lowercase().chars() {
        let keep = c.is_ascii_lowercase() || c.is_ascii_digit() || is_cjk(c);
        if keep {
            slug.push(c);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "theme".to_string()
    } else {
        slug.to_string()
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

// =============================================================================
// Theme
// =============================================================================

/// A named, selectable card theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Unique, stable identifier
    pub id: ThemeId,

    /// User-facing name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Built-in themes are read-only except for visibility
    #[serde(default)]
    pub is_preset: bool,

    /// Whether the theme is offered in the theme picker
    #[serde(default = "default_true")]
    pub is_visible: bool,

    /// Style fragments for every card region
    #[serde(default)]
    pub styles: StyleSet,
}

impl Theme {
    /// Create a visible custom theme
    pub fn new(id: impl Into<ThemeId>, name: impl Into<String>, styles: StyleSet) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            is_preset: false,
            is_visible: true,
            styles,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Partial theme update
///
/// `id` and `is_preset` are never updatable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New visibility
    pub is_visible: Option<bool>,
    /// New style set
    pub styles: Option<StyleSet>,
}

impl ThemeUpdate {
    /// An update that only changes visibility
    pub fn visibility(visible: bool) -> Self {
        Self { is_visible: Some(visible), ..Default::default() }
    }

    /// An update that replaces every editable field from `theme`
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            name: Some(theme.name.clone()),
            description: Some(theme.description.clone()),
            is_visible: Some(theme.is_visible),
            styles: Some(theme.styles.clone()),
        }
    }

    /// Whether the update changes anything besides visibility
    pub fn touches_content(&self) -> bool {
        self.name.is_some() || self.description.is_some() || self.styles.is_some()
    }

    /// Merge the update into a theme
    pub fn apply_to(&self, theme: &mut Theme) {
        if let Some(name) = &self.name {
            theme.name = name.clone();
        }
        if let Some(description) = &self.description {
            theme.description = description.clone();
        }
        if let Some(visible) = self.is_visible {
            theme.is_visible = visible;
        }
        if let Some(styles) = &self.styles {
            theme.styles = styles.clone();
        }
    }
}

/// A selectable font family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontOption {
    /// CSS `font-family` value, used as the catalog key
    pub value: String,

    /// Display label
    pub label: String,

    /// Built-in fonts cannot be edited or removed
    #[serde(default)]
    pub is_preset: bool,
}

impl FontOption {
    /// Create a custom font option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), is_preset: false }
    }

    fn preset(value: &str, label: &str) -> Self {
        Self { value: value.to_string(), label: label.to_string(), is_preset: true }
    }
}

/// Built-in font catalog
pub fn default_fonts() -> Vec<FontOption> {
    vec![
        FontOption::preset(
            "Optima-Regular, Optima, PingFangSC-light, PingFangTC-light, \"PingFang SC\", Cambria, Cochin, Georgia, Times, \"Times New Roman\", serif",
            "默认字体",
        ),
        FontOption::preset("SimSun, \"宋体\", serif", "宋体"),
        FontOption::preset("SimHei, \"黑体\", sans-serif", "黑体"),
        FontOption::preset("KaiTi, \"楷体\", serif", "楷体"),
        FontOption::preset("\"Microsoft YaHei\", \"微软雅黑\", sans-serif", "雅黑"),
    ]
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Style tree
// =============================================================================

/// Style fragments for every region of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSet {
    /// Card background
    pub image_preview: String,
    /// Author header
    pub header: HeaderStyles,
    /// Footer bar
    pub footer: FooterStyles,
    /// Headings
    pub title: TitleStyles,
    /// Body paragraphs
    pub paragraph: String,
    /// Inline emphasis
    pub emphasis: EmphasisStyles,
    /// Ordered, unordered and task lists
    pub list: ListStyles,
    /// Code blocks and inline code
    pub code: CodeStyles,
    /// Block quotes
    pub quote: String,
    /// Images
    pub image: String,
    /// Links
    pub link: String,
    /// Tables
    pub table: TableStyles,
    /// Horizontal rules
    pub hr: String,
    /// Footnote markers
    pub footnote: FootnoteStyles,
}

/// Author avatar fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvatarStyles {
    /// Avatar frame
    pub container: String,
    /// Placeholder shown without an avatar image
    pub placeholder: String,
    /// Avatar image
    pub image: String,
}

/// Author header fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderStyles {
    /// Avatar
    pub avatar: AvatarStyles,
    /// Row holding the name and verified badge
    pub name_container: String,
    /// Display name
    pub user_name: String,
    /// Handle
    pub user_id: String,
    /// Post timestamp
    pub post_time: String,
    /// Verified badge
    pub verified_icon: String,
}

/// Footer fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterStyles {
    /// Footer bar
    pub container: String,
    /// Footer text
    pub text: String,
    /// Separator between the two footer texts
    pub separator: String,
}

/// Fragments for one heading level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HeadingStyles {
    /// Heading box
    pub base: String,
    /// Heading text
    pub content: String,
    /// Decoration after the heading
    pub after: String,
}

/// Heading level addressed by title edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleLevel {
    /// Second level headings
    H2,
    /// Third level headings
    H3,
    /// Every other heading level
    Base,
}

impl TitleLevel {
    /// All levels, in display order
    pub const ALL: [TitleLevel; 3] = [TitleLevel::H2, TitleLevel::H3, TitleLevel::Base];
}

/// Heading fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleStyles {
    /// Second level headings
    pub h2: HeadingStyles,
    /// Third level headings
    pub h3: HeadingStyles,
    /// Every other heading level
    pub base: HeadingStyles,
}

impl TitleStyles {
    /// Fragments for a level
    pub fn level(&self, level: TitleLevel) -> &HeadingStyles {
        match level {
            TitleLevel::H2 => &self.h2,
            TitleLevel::H3 => &self.h3,
            TitleLevel::Base => &self.base,
        }
    }

    /// Mutable fragments for a level
    pub fn level_mut(&mut self, level: TitleLevel) -> &mut HeadingStyles {
        match level {
            TitleLevel::H2 => &mut self.h2,
            TitleLevel::H3 => &mut self.h3,
            TitleLevel::Base => &mut self.base,
        }
    }
}

/// Inline emphasis fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmphasisStyles {
    /// Bold text
    pub strong: String,
    /// Italic text
    pub em: String,
    /// Struck-through text
    pub del: String,
}

/// List fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListStyles {
    /// List element
    pub container: String,
    /// List item
    pub item: String,
    /// Task list item
    pub task_list: String,
}

/// Code fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeStyles {
    /// Fenced code block
    pub block: String,
    /// Inline code span
    pub inline: String,
}

/// Table fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyles {
    /// Table element
    pub container: String,
    /// Header cells
    pub header: String,
    /// Body cells
    pub cell: String,
}

/// Footnote fragments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootnoteStyles {
    /// Reference marker in the text
    #[serde(rename = "ref")]
    pub reference: String,
    /// Link back from the footnote to the text
    pub backref: String,
}

// =============================================================================
// Leaf addressing
// =============================================================================

/// Every leaf fragment of a [`StyleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum StyleField {
    ImagePreview,
    AvatarContainer,
    AvatarPlaceholder,
    AvatarImage,
    NameContainer,
    UserName,
    UserId,
    PostTime,
    VerifiedIcon,
    FooterContainer,
    FooterText,
    FooterSeparator,
    TitleBase(TitleLevel),
    TitleContent(TitleLevel),
    TitleAfter(TitleLevel),
    Paragraph,
    Strong,
    Em,
    Del,
    ListContainer,
    ListItem,
    TaskList,
    CodeBlock,
    CodeInline,
    Quote,
    Image,
    Link,
    TableContainer,
    TableHeader,
    TableCell,
    Hr,
    FootnoteRef,
    FootnoteBackref,
}

impl StyleField {
    /// Every leaf, in tree order
    pub const ALL: [StyleField; 39] = [
        StyleField::ImagePreview,
        StyleField::AvatarContainer,
        StyleField::AvatarPlaceholder,
        StyleField::AvatarImage,
        StyleField::NameContainer,
        StyleField::UserName,
        StyleField::UserId,
        StyleField::PostTime,
        StyleField::VerifiedIcon,
        StyleField::FooterContainer,
        StyleField::FooterText,
        StyleField::FooterSeparator,
        StyleField::TitleBase(TitleLevel::H2),
        StyleField::TitleContent(TitleLevel::H2),
        StyleField::TitleAfter(TitleLevel::H2),
        StyleField::TitleBase(TitleLevel::H3),
        StyleField::TitleContent(TitleLevel::H3),
        StyleField::TitleAfter(TitleLevel::H3),
        StyleField::TitleBase(TitleLevel::Base),
        StyleField::TitleContent(TitleLevel::Base),
        StyleField::TitleAfter(TitleLevel::Base),
        StyleField::Paragraph,
        StyleField::Strong,
        StyleField::Em,
        StyleField::Del,
        StyleField::ListContainer,
        StyleField::ListItem,
        StyleField::TaskList,
        StyleField::CodeBlock,
        StyleField::CodeInline,
        StyleField::Quote,
        StyleField::Image,
        StyleField::Link,
        StyleField::TableContainer,
        StyleField::TableHeader,
        StyleField::TableCell,
        StyleField::Hr,
        StyleField::FootnoteRef,
        StyleField::FootnoteBackref,
    ];
}

impl StyleSet {
    /// Fragment at a leaf
    pub fn get(&self, field: StyleField) -> &str {
        match field {
            StyleField::ImagePreview => &self.image_preview,
            StyleField::AvatarContainer => &self.header.avatar.container,
            StyleField::AvatarPlaceholder => &self.header.avatar.placeholder,
            StyleField::AvatarImage => &self.header.avatar.image,
            StyleField::NameContainer => &self.header.name_container,
            StyleField::UserName => &self.header.user_name,
            StyleField::UserId => &self.header.user_id,
            StyleField::PostTime => &self.header.post_time,
            StyleField::VerifiedIcon => &self.header.verified_icon,
            StyleField::FooterContainer => &self.footer.container,
            StyleField::FooterText => &self.footer.text,
            StyleField::FooterSeparator => &self.footer.separator,
            StyleField::TitleBase(level) => &self.title.level(level).base,
            StyleField::TitleContent(level) => &self.title.level(level).content,
            StyleField::TitleAfter(level) => &self.title.level(level).after,
            StyleField::Paragraph => &self.paragraph,
            StyleField::Strong => &self.emphasis.strong,
            StyleField::Em => &self.emphasis.em,
            StyleField::Del => &self.emphasis.del,
            StyleField::ListContainer => &self.list.container,
            StyleField::ListItem => &self.list.item,
            StyleField::TaskList => &self.list.task_list,
            StyleField::CodeBlock => &self.code.block,
            StyleField::CodeInline => &self.code.inline,
            StyleField::Quote => &self.quote,
            StyleField::Image => &self.image,
            StyleField::Link => &self.link,
            StyleField::TableContainer => &self.table.container,
            StyleField::TableHeader => &self.table.header,
            StyleField::TableCell => &self.table.cell,
            StyleField::Hr => &self.hr,
            StyleField::FootnoteRef => &self.footnote.reference,
            StyleField::FootnoteBackref => &self.footnote.backref,
        }
    }

    /// Mutable fragment at a leaf
    pub fn get_mut(&mut self, field: StyleField) -> &mut String {
        match field {
            StyleField::ImagePreview => &mut self.image_preview,
            StyleField::AvatarContainer => &mut self.header.avatar.container,
            StyleField::AvatarPlaceholder => &mut self.header.avatar.placeholder,
            StyleField::AvatarImage => &mut self.header.avatar.image,
            StyleField::NameContainer => &mut self.header.name_container,
            StyleField::UserName => &mut self.header.user_name,
            StyleField::UserId => &mut self.header.user_id,
            StyleField::PostTime => &mut self.header.post_time,
            StyleField::VerifiedIcon => &mut self.header.verified_icon,
            StyleField::FooterContainer => &mut self.footer.container,
            StyleField::FooterText => &mut self.footer.text,
            StyleField::FooterSeparator => &mut self.footer.separator,
            StyleField::TitleBase(level) => &mut self.title.level_mut(level).base,
            StyleField::TitleContent(level) => &mut self.title.level_mut(level).content,
            StyleField::TitleAfter(level) => &mut self.title.level_mut(level).after,
            StyleField::Paragraph => &mut self.paragraph,
            StyleField::Strong => &mut self.emphasis.strong,
            StyleField::Em => &mut self.emphasis.em,
            StyleField::Del => &mut self.emphasis.del,
            StyleField::ListContainer => &mut self.list.container,
            StyleField::ListItem => &mut self.list.item,
            StyleField::TaskList => &mut self.list.task_list,
            StyleField::CodeBlock => &mut self.code.block,
            StyleField::CodeInline => &mut self.code.inline,
            StyleField::Quote => &mut self.quote,
            StyleField::Image => &mut self.image,
            StyleField::Link => &mut self.link,
            StyleField::TableContainer => &mut self.table.container,
            StyleField::TableHeader => &mut self.table.header,
            StyleField::TableCell => &mut self.table.cell,
            StyleField::Hr => &mut self.hr,
            StyleField::FootnoteRef => &mut self.footnote.reference,
            StyleField::FootnoteBackref => &mut self.footnote.backref,
        }
    }
}

// =============================================================================
// Built-in default styles
// =============================================================================

/// Base text color of the default style set
pub const DEFAULT_BASE_COLOR: &str = "#8b4513";

impl Default for StyleSet {
    fn default() -> Self {
        Self {
            image_preview: "background-color: #fffaf5; padding: 32px 28px;".to_string(),
            header: HeaderStyles::default(),
            footer: FooterStyles::default(),
            title: TitleStyles::default(),
            paragraph: "line-height: 1.75; margin-bottom: 1.1em; font-size: 15px; color: #5a4a42;".to_string(),
            emphasis: EmphasisStyles::default(),
            list: ListStyles::default(),
            code: CodeStyles::default(),
            quote: "border-left: 3px solid #deb887; padding: 0 0 0 20px; margin: 1.3em 0; color: #b87333; font-style: italic; font-size: 15px; line-height: 1.85; font-family: 'Noto Serif SC', serif; background: linear-gradient(to right, rgba(222,184,135,0.1), transparent);".to_string(),
            image: "max-width: 100%; height: auto; margin: 1.5em auto; border-radius: 12px; box-shadow: 0 4px 16px rgba(184,115,51,0.1); border: 1px solid #b8733380;".to_string(),
            link: "color: #d2691e; text-decoration: none; background-image: linear-gradient(to right, #d2691e80, #b8733380); background-size: 0% 1px; background-repeat: no-repeat; background-position: 0 100%; transition: all 0.3s ease; font-family: 'Noto Serif SC', serif;".to_string(),
            table: TableStyles::default(),
            hr: "border: none; border-top: 2px solid #b8733380; margin: 28px 0; box-shadow: 0 2px 8px rgba(184,115,51,0.05);".to_string(),
            footnote: FootnoteStyles::default(),
        }
    }
}

impl Default for AvatarStyles {
    fn default() -> Self {
        Self {
            container: "width: 42px; height: 42px; border-radius: 14px; overflow: hidden; box-shadow: 0 4px 16px rgba(184,115,51,0.1);".to_string(),
            placeholder: "transition: all 0.3s ease;".to_string(),
            image: "object-fit: cover; transition: transform 0.3s ease; filter: brightness(1.05) contrast(1.02);".to_string(),
        }
    }
}

impl Default for HeaderStyles {
    fn default() -> Self {
        Self {
            avatar: AvatarStyles::default(),
            name_container: "display: flex; align-items: center; gap: 8px;".to_string(),
            user_name: "font-size: 17px; font-weight: 600; color: #8b4513; font-family: 'Noto Serif SC', serif; text-shadow: 0 2px 4px rgba(139,69,19,0.1);".to_string(),
            user_id: "font-size: 14px; color: #b87333; font-family: 'Noto Serif SC', serif;".to_string(),
            post_time: "font-size: 13px; color: #d2691e; font-style: italic;".to_string(),
            verified_icon: "width: 20px; height: 20px; margin-left: -5px; fill: #1DA1F2;".to_string(),
        }
    }
}

impl Default for FooterStyles {
    fn default() -> Self {
        Self {
            container: "position: absolute; bottom: 0; left: 0; right: 0; display: flex; align-items: center; justify-content: center; gap: 14px; padding: 16px; color: #b87333; font-size: 13px; border-top: 1px solid #b8733380; background: rgba(255,250,245,0.95); backdrop-filter: blur(8px);".to_string(),
            text: "color: inherit; transition: color 0.2s ease; font-style: italic; white-space: nowrap;".to_string(),
            separator: "color: #deb887;".to_string(),
        }
    }
}

impl Default for TitleStyles {
    fn default() -> Self {
        let heading = |base: &str| HeadingStyles {
            base: base.to_string(),
            content: format!("font-weight: 600; color: {};", DEFAULT_BASE_COLOR),
            after: String::new(),
        };

        Self {
            h2: heading("margin: 10px 0 0; font-size: 1.6em; letter-spacing: 0.01em; line-height: 1.5;"),
            h3: heading("margin: 8px 0 0; font-size: 1.3em; line-height: 1.5;"),
            base: heading("margin: 6px 0 0; font-size: 1.15em; line-height: 1.5;"),
        }
    }
}

impl Default for EmphasisStyles {
    fn default() -> Self {
        Self {
            strong: "font-weight: 600; color: #d2691e;".to_string(),
            em: "font-style: normal; color: #b87333; background: rgba(184,115,51,0.1); padding: 0 4px; border-left: 2px solid #b8733380;".to_string(),
            del: "text-decoration: line-through; color: #8b4513; opacity: 0.8;".to_string(),
        }
    }
}

impl Default for ListStyles {
    fn default() -> Self {
        Self {
            container: "padding-left: 26px; margin-bottom: 1.2em; color: #6b4423;".to_string(),
            item: "margin-bottom: 0.8em; font-size: 15px; color: #6b4423; line-height: 1.85; font-family: 'Noto Serif SC', serif;".to_string(),
            task_list: "list-style: none; margin-left: -22px; font-size: 15px; color: #6b4423; line-height: 1.85; font-family: 'Noto Serif SC', serif;".to_string(),
        }
    }
}

impl Default for CodeStyles {
    fn default() -> Self {
        Self {
            block: "background: #fff6e9; padding: 1.2em; border-radius: 8px; font-size: 14px; font-family: 'Fira Code', monospace; line-height: 1.6; white-space: pre-wrap; word-wrap: break-word; color: #8b4513; margin: 1.3em 0; border: 1px solid #b8733380; box-shadow: inset 0 4px 12px rgba(184,115,51,0.05), 0 2px 8px rgba(184,115,51,0.05);".to_string(),
            inline: "background: #fff6e9; padding: 4px 10px; border-radius: 4px; color: #8b4513; font-size: 14px; font-family: 'Fira Code', monospace; border: 1px solid #b8733380;".to_string(),
        }
    }
}

impl Default for TableStyles {
    fn default() -> Self {
        Self {
            container: "width: 100%; margin: 1.4em 0; border-collapse: separate; border-spacing: 0; border: 1px solid #b8733380; border-radius: 12px; overflow: hidden; box-shadow: 0 2px 12px rgba(184,115,51,0.05);".to_string(),
            header: "background: linear-gradient(135deg, #fff6e9, #fffaf5); font-weight: 600; color: #8b4513; padding: 14px; font-family: 'Noto Serif SC', serif; border-bottom: 2px solid #b8733380;".to_string(),
            cell: "padding: 14px; color: #6b4423; border-top: 1px solid #b8733380; font-family: 'Noto Serif SC', serif;".to_string(),
        }
    }
}

impl Default for FootnoteStyles {
    fn default() -> Self {
        let marker = "color: #b87333; text-decoration: none; font-size: 0.9em; font-style: italic;";
        Self { reference: marker.to_string(), backref: marker.to_string() }
    }
}

//! Semantic style edits
//!
//! Every control of the theme editor maps to one [`StyleEdit`]. Applying an
//! edit rewrites only the declarations it names; all other text of the
//! touched fragments is preserved. When a targeted declaration is missing,
//! the edit either appends it or leaves the fragment alone, depending on the
//! field (see [`Absent`]).

use crate::background::{BackgroundStyle, DEFAULT_BACKGROUND_COLOR};
use crate::cascade::apply_global_color;
use crate::fragment::{edit, Absent, Fragment};
use crate::model::{StyleSet, TitleLevel};
use crate::value::{
    replace_first_color, replace_first_length, replace_first_rgba, replace_function, HexColor,
    Length, LengthUnit,
};

/// Link color used for a gradient underline when the link declares none
pub const DEFAULT_LINK_COLOR: &str = "#d2691e";

/// Alpha suffix for the avatar shadow
const AVATAR_SHADOW_ALPHA: u8 = 0x1A;
/// Alpha suffix for borders derived from a text color
const BORDER_ALPHA: u8 = 0x80;

const UNDERLINE_DECLARATIONS: [&str; 4] = [
    "background-image",
    "background-size",
    "background-repeat",
    "background-position",
];

/// Link underline appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkUnderline {
    /// No underline
    None,
    /// Plain `text-decoration: underline`
    Underline,
    /// Animated gradient underline drawn with a background image
    Gradient,
}

impl LinkUnderline {
    /// Detect the underline style of a link fragment
    pub fn detect(link: &str) -> Self {
        let fragment = Fragment::new(link);
        let decoration = fragment.get("text-decoration").unwrap_or_default();

        if decoration.starts_with("underline") {
            LinkUnderline::Underline
        } else if fragment.contains("background-image") {
            LinkUnderline::Gradient
        } else {
            LinkUnderline::None
        }
    }
}

/// Footnote marker font style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    /// Upright
    Normal,
    /// Italic
    Italic,
}

impl FontStyle {
    /// CSS keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// A single semantic edit of a [`StyleSet`]
///
/// Numeric arguments are in the unit the editor control shows: pixels for
/// sizes and radii, em for heading sizes, spacings and margins.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEdit {
    /// Propagate one base color to every text-bearing fragment
    GlobalColor(HexColor),
    /// Card background color
    BackgroundColor(HexColor),
    /// Free-form background declarations besides the color
    BackgroundCustomCss(String),
    /// Author name, handle, time and avatar accents
    HeaderColor(HexColor),
    /// Avatar corner radius in px, `-1` for a circle
    AvatarRadius(i32),
    /// Verified badge fill
    VerifiedIconColor(HexColor),
    /// Verified badge width and height
    VerifiedIconSize(u32),
    /// Gap between the name and the verified badge
    VerifiedIconMargin(i32),
    /// Footer text and border; footer text and separator inherit it
    FooterColor(HexColor),
    /// Footer `background` value, skipped unless it is a well-formed
    /// declaration value
    FooterBackground(String),
    /// Footer vertical padding, horizontal padding kept
    FooterPaddingVertical(u32),
    /// Heading font size in em
    TitleFontSize(TitleLevel, f64),
    /// Heading text color
    TitleColor(TitleLevel, HexColor),
    /// Paragraph bottom margin in em
    ParagraphMarginBottom(f64),
    /// Paragraph font size
    ParagraphFontSize(u32),
    /// Paragraph text color
    ParagraphColor(HexColor),
    /// Bold text color
    StrongColor(HexColor),
    /// Italic text color
    EmColor(HexColor),
    /// Struck-through text color
    DelColor(HexColor),
    /// List left padding
    ListIndent(u32),
    /// Space below list items in em
    ListItemSpacing(f64),
    /// List text color
    ListColor(HexColor),
    /// Quote bar color, also tints a gradient quote background
    QuoteBorderColor(HexColor),
    /// Quote text color
    QuoteColor(HexColor),
    /// Quote left padding
    QuotePaddingLeft(u32),
    /// Code block text color
    CodeBlockColor(HexColor),
    /// Code block corner radius
    CodeBlockRadius(u32),
    /// Inline code background
    CodeInlineBackground(HexColor),
    /// Inline code text color
    CodeInlineColor(HexColor),
    /// Link color, also recolors a gradient underline
    LinkColor(HexColor),
    /// Link underline style
    LinkUnderline(LinkUnderline),
    /// Table outer and cell border colors
    TableBorderColor(HexColor),
    /// Table header background
    TableHeaderBackground(HexColor),
    /// Table corner radius
    TableRadius(u32),
    /// Horizontal rule color
    HrColor(HexColor),
    /// Horizontal rule thickness
    HrWidth(u32),
    /// Horizontal rule vertical margin
    HrMargin(u32),
    /// Footnote marker color
    FootnoteColor(HexColor),
    /// Footnote marker font style
    FootnoteStyle(FontStyle),
    /// Image `max-width`, a `<n>%` or `<n>px` length
    ImageMaxWidth(String),
    /// Image vertical margin in em
    ImageMargin(f64),
    /// Image corner radius
    ImageRadius(u32),
    /// Image border color
    ImageBorderColor(HexColor),
}

impl StyleEdit {
    /// Apply the edit, returning whether any fragment changed
    pub fn apply(&self, styles: &mut StyleSet) -> bool {
        match self {
            StyleEdit::GlobalColor(color) => apply_global_color(styles, color) > 0,

            StyleEdit::BackgroundColor(color) => {
                edit_background(styles, |bg| bg.set_background_color(&color.to_string()))
            }
            StyleEdit::BackgroundCustomCss(css) => {
                edit_background(styles, |bg| bg.set_custom_css(css))
            }

            StyleEdit::HeaderColor(color) => {
                let c = color.to_string();
                let header = &mut styles.header;
                let mut changed = set(&mut header.user_name, "color", &c, Absent::Skip);
                changed |= set(&mut header.user_id, "color", &c, Absent::Skip);
                changed |= set(&mut header.post_time, "color", &c, Absent::Skip);
                changed |= edit(&mut header.avatar.container, |f| {
                    let shadow = recolor(f, "box-shadow", &color.with_alpha(AVATAR_SHADOW_ALPHA));
                    let border = recolor(f, "border", &color.with_alpha(BORDER_ALPHA));
                    shadow | border
                });
                changed
            }
            StyleEdit::AvatarRadius(radius) => {
                let value = if *radius == -1 {
                    Length::percent(50)
                } else {
                    Length::px(*radius)
                };
                set_length(&mut styles.header.avatar.container, "border-radius", value)
            }
            StyleEdit::VerifiedIconColor(color) => {
                set(&mut styles.header.verified_icon, "fill", &color.to_string(), Absent::Append)
            }
            StyleEdit::VerifiedIconSize(size) => edit(&mut styles.header.verified_icon, |f| {
                let size = Length::px(*size).to_string();
                let width = f.set("width", &size, Absent::Append);
                let height = f.set("height", &size, Absent::Append);
                width | height
            }),
            StyleEdit::VerifiedIconMargin(margin) => {
                set_length(&mut styles.header.verified_icon, "margin-left", Length::px(*margin))
            }

            StyleEdit::FooterColor(color) => {
                let container = edit(&mut styles.footer.container, |f| {
                    let text = f.set("color", &color.to_string(), Absent::Skip);
                    let border = recolor(f, "border-top", &color.with_alpha(BORDER_ALPHA));
                    text | border
                });
                let text = set(&mut styles.footer.text, "color", "inherit", Absent::Append);
                let separator = set(&mut styles.footer.separator, "color", "inherit", Absent::Append);
                container | text | separator
            }
            StyleEdit::FooterBackground(background) => {
                set(&mut styles.footer.container, "background", background, Absent::Append)
            }
            StyleEdit::FooterPaddingVertical(vertical) => {
                edit(&mut styles.footer.container, |f| {
                    if !f.contains("padding") {
                        f.append("padding", &format!("{} 16px", Length::px(*vertical)));
                        return true;
                    }
                    f.replace_with("padding", |value| vertical_padding(value, *vertical))
                })
            }

            StyleEdit::TitleFontSize(level, size) => set_length(
                &mut styles.title.level_mut(*level).base,
                "font-size",
                Length::em(*size),
            ),
            StyleEdit::TitleColor(level, color) => set(
                &mut styles.title.level_mut(*level).content,
                "color",
                &color.to_string(),
                Absent::Append,
            ),

            StyleEdit::ParagraphMarginBottom(margin) => {
                set_length(&mut styles.paragraph, "margin-bottom", Length::em(*margin))
            }
            StyleEdit::ParagraphFontSize(size) => {
                set_length(&mut styles.paragraph, "font-size", Length::px(*size))
            }
            StyleEdit::ParagraphColor(color) => {
                set(&mut styles.paragraph, "color", &color.to_string(), Absent::Append)
            }
            StyleEdit::StrongColor(color) => {
                set(&mut styles.emphasis.strong, "color", &color.to_string(), Absent::Append)
            }
            StyleEdit::EmColor(color) => {
                set(&mut styles.emphasis.em, "color", &color.to_string(), Absent::Append)
            }
            StyleEdit::DelColor(color) => {
                set(&mut styles.emphasis.del, "color", &color.to_string(), Absent::Append)
            }

            StyleEdit::ListIndent(indent) => {
                set_length(&mut styles.list.container, "padding-left", Length::px(*indent))
            }
            StyleEdit::ListItemSpacing(spacing) => {
                set_length(&mut styles.list.item, "margin-bottom", Length::em(*spacing))
            }
            StyleEdit::ListColor(color) => {
                let c = color.to_string();
                let list = &mut styles.list;
                let mut changed = set(&mut list.container, "color", &c, Absent::Skip);
                changed |= set(&mut list.item, "color", &c, Absent::Skip);
                changed |= set(&mut list.task_list, "color", &c, Absent::Skip);
                changed
            }

            StyleEdit::QuoteBorderColor(color) => edit(&mut styles.quote, |f| {
                let border = recolor_or_append(f, "border-left", color, "3px solid");
                let tint = f.replace_with("background", |value| {
                    if value.contains("linear-gradient") {
                        replace_first_rgba(value, &color.to_rgba(0.1))
                    } else {
                        None
                    }
                });
                border | tint
            }),
            StyleEdit::QuoteColor(color) => {
                set(&mut styles.quote, "color", &color.to_string(), Absent::Append)
            }
            StyleEdit::QuotePaddingLeft(padding) => set(
                &mut styles.quote,
                "padding",
                &format!("0 0 0 {}", Length::px(*padding)),
                Absent::Append,
            ),

            StyleEdit::CodeBlockColor(color) => {
                set(&mut styles.code.block, "color", &color.to_string(), Absent::Append)
            }
            StyleEdit::CodeBlockRadius(radius) => {
                set_length(&mut styles.code.block, "border-radius", Length::px(*radius))
            }
            StyleEdit::CodeInlineBackground(color) => {
                set(&mut styles.code.inline, "background", &color.to_string(), Absent::Append)
            }
            StyleEdit::CodeInlineColor(color) => {
                set(&mut styles.code.inline, "color", &color.to_string(), Absent::Append)
            }

            StyleEdit::LinkColor(color) => edit(&mut styles.link, |f| {
                let text = f.set("color", &color.to_string(), Absent::Append);
                let accent = color.with_alpha(BORDER_ALPHA);
                let underline = f.replace_with("background-image", |value| {
                    replace_function(
                        value,
                        "linear-gradient",
                        &format!("linear-gradient(to right, {}, {})", accent, accent),
                    )
                });
                text | underline
            }),
            StyleEdit::LinkUnderline(style) => edit(&mut styles.link, |f| set_underline(f, *style)),

            StyleEdit::TableBorderColor(color) => {
                let c = color.to_string();
                let table = &mut styles.table;
                let mut changed = edit(&mut table.container, |f| recolor(f, "border", &c));
                changed |= edit(&mut table.header, |f| recolor(f, "border-bottom", &c));
                changed |= edit(&mut table.cell, |f| recolor(f, "border-top", &c));
                changed
            }
            StyleEdit::TableHeaderBackground(color) => edit(&mut styles.table.header, |f| {
                let gradient = f.get("background").is_some_and(|v| v.contains("linear-gradient"));
                let value = if gradient {
                    format!("linear-gradient(135deg, {}, {})", color, DEFAULT_BACKGROUND_COLOR)
                } else {
                    color.to_string()
                };
                f.set("background", &value, Absent::Append)
            }),
            StyleEdit::TableRadius(radius) => {
                set_length(&mut styles.table.container, "border-radius", Length::px(*radius))
            }

            StyleEdit::HrColor(color) => {
                edit(&mut styles.hr, |f| recolor_or_append(f, "border-top", color, "2px solid"))
            }
            StyleEdit::HrWidth(width) => edit(&mut styles.hr, |f| {
                f.replace_with("border-top", |value| replace_first_length(value, Length::px(*width)))
            }),
            StyleEdit::HrMargin(margin) => edit(&mut styles.hr, |f| {
                first_length_or_append(f, "margin", Length::px(*margin), "0")
            }),

            StyleEdit::FootnoteColor(color) => {
                let c = color.to_string();
                let footnote = &mut styles.footnote;
                let reference = set(&mut footnote.reference, "color", &c, Absent::Append);
                let backref = set(&mut footnote.backref, "color", &c, Absent::Append);
                reference | backref
            }
            StyleEdit::FootnoteStyle(style) => {
                let footnote = &mut styles.footnote;
                let reference =
                    set(&mut footnote.reference, "font-style", style.as_css(), Absent::Append);
                let backref = set(&mut footnote.backref, "font-style", style.as_css(), Absent::Append);
                reference | backref
            }

            StyleEdit::ImageMaxWidth(width) => {
                set(&mut styles.image, "max-width", &image_max_width(width), Absent::Append)
            }
            StyleEdit::ImageMargin(margin) => edit(&mut styles.image, |f| {
                first_length_or_append(f, "margin", Length::em(*margin), "auto")
            }),
            StyleEdit::ImageRadius(radius) => {
                set_length(&mut styles.image, "border-radius", Length::px(*radius))
            }
            StyleEdit::ImageBorderColor(color) => {
                edit(&mut styles.image, |f| recolor(f, "border", &color.with_alpha(BORDER_ALPHA)))
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn set(leaf: &mut String, property: &str, value: &str, absent: Absent) -> bool {
    edit(leaf, |f| f.set(property, value, absent))
}

fn set_length(leaf: &mut String, property: &str, length: Length) -> bool {
    set(leaf, property, &length.to_string(), Absent::Append)
}

fn edit_background<F: FnOnce(&mut BackgroundStyle)>(styles: &mut StyleSet, f: F) -> bool {
    let mut background = BackgroundStyle::parse(&styles.image_preview);
    f(&mut background);

    let rebuilt = background.to_style_string();
    let changed = rebuilt != styles.image_preview;
    styles.image_preview = rebuilt;
    changed
}

/// Replace the color token inside a declaration value
fn recolor(fragment: &mut Fragment, property: &str, color: &str) -> bool {
    fragment.replace_with(property, |value| replace_first_color(value, color))
}

/// Replace the color token of a border declaration, or append `<prefix> c`
fn recolor_or_append(fragment: &mut Fragment, property: &str, color: &HexColor, prefix: &str) -> bool {
    if fragment.contains(property) {
        recolor(fragment, property, &color.to_string())
    } else {
        fragment.append(property, &format!("{} {}", prefix, color));
        true
    }
}

/// Replace the first length of a shorthand, or append `<length> <rest>`
fn first_length_or_append(fragment: &mut Fragment, property: &str, length: Length, rest: &str) -> bool {
    if fragment.contains(property) {
        fragment.replace_with(property, |value| replace_first_length(value, length))
    } else {
        fragment.append(property, &format!("{} {}", length, rest));
        true
    }
}

/// Replace the top value of a padding shorthand, keeping the rest as written
///
/// A single value padding also becomes the horizontal value.
fn vertical_padding(value: &str, vertical: u32) -> Option<String> {
    let value = value.trim_start();
    let end = value.find(char::is_whitespace).unwrap_or(value.len());
    let (top, rest) = value.split_at(end);
    if !is_padding_length(top) {
        return None;
    }

    let vertical = Length::px(vertical);
    if rest.trim().is_empty() {
        Some(format!("{} {}", vertical, top))
    } else {
        Some(format!("{}{}", vertical, rest))
    }
}

fn is_padding_length(token: &str) -> bool {
    token == "0" || Length::parse(token).is_ok()
}

fn image_max_width(input: &str) -> String {
    match Length::parse(input) {
        Ok(length) if matches!(length.unit, LengthUnit::Percent | LengthUnit::Px) => {
            length.to_string()
        }
        _ => "100%".to_string(),
    }
}

fn set_underline(fragment: &mut Fragment, style: LinkUnderline) -> bool {
    let mut changed = false;

    match style {
        LinkUnderline::None | LinkUnderline::Underline => {
            let decoration = if style == LinkUnderline::None { "none" } else { "underline" };
            changed |= fragment.set("text-decoration", decoration, Absent::Append);
            for property in UNDERLINE_DECLARATIONS {
                changed |= fragment.remove(property);
            }
        }
        LinkUnderline::Gradient => {
            let color = fragment
                .get("color")
                .and_then(|value| HexColor::parse(value).ok())
                .unwrap_or_else(|| HexColor::trusted(DEFAULT_LINK_COLOR));
            let accent = color.with_alpha(BORDER_ALPHA);
            let gradient = format!("linear-gradient(to right, {}, {})", accent, accent);

            changed |= fragment.set("text-decoration", "none", Absent::Append);
            for (property, value) in [
                ("background-image", gradient.as_str()),
                ("background-size", "0% 1px"),
                ("background-repeat", "no-repeat"),
                ("background-position", "0 100%"),
                ("transition", "all 0.3s ease"),
            ] {
                if fragment.get(property) != Some(value) {
                    changed |= fragment.set(property, value, Absent::Append);
                }
            }
        }
    }

    changed
}

//! Global theme color cascade
//!
//! One base color is propagated to every text-bearing fragment of a style
//! set. Some fields take the color with a fixed alpha suffix so secondary
//! text stays visually subordinate. A fragment that does not declare the
//! targeted property is left as it is.

use crate::fragment::{edit, Absent};
use crate::model::{StyleField, StyleSet, TitleLevel, DEFAULT_BASE_COLOR};
use crate::value::{replace_first_color, replace_function, HexColor};

/// Alpha suffix for the author handle
pub const USER_ID_ALPHA: u8 = 0xBB;
/// Alpha suffix for the post time
pub const POST_TIME_ALPHA: u8 = 0x99;
/// Alpha suffix for footer text
pub const FOOTER_TEXT_ALPHA: u8 = 0xCC;
/// Alpha suffix for the footer top border
pub const FOOTER_BORDER_ALPHA: u8 = 0x40;
/// Alpha suffix for the footer background gradient
pub const FOOTER_BACKGROUND_ALPHA: u8 = 0x08;
/// Alpha suffix for link underline gradients and image borders
pub const ACCENT_ALPHA: u8 = 0x80;

/// Every fragment rewritten by [`apply_global_color`]
pub const CASCADE_FIELDS: [StyleField; 23] = [
    StyleField::UserName,
    StyleField::UserId,
    StyleField::PostTime,
    StyleField::FooterContainer,
    StyleField::Paragraph,
    StyleField::Strong,
    StyleField::Em,
    StyleField::Del,
    StyleField::TitleContent(TitleLevel::H2),
    StyleField::TitleContent(TitleLevel::H3),
    StyleField::TitleContent(TitleLevel::Base),
    StyleField::ListContainer,
    StyleField::ListItem,
    StyleField::TaskList,
    StyleField::Quote,
    StyleField::CodeBlock,
    StyleField::CodeInline,
    StyleField::Link,
    StyleField::TableHeader,
    StyleField::TableCell,
    StyleField::FootnoteRef,
    StyleField::FootnoteBackref,
    StyleField::Image,
];

/// Fields whose `color` declaration takes the base color unchanged
const PLAIN_COLOR_FIELDS: [StyleField; 19] = [
    StyleField::UserName,
    StyleField::Paragraph,
    StyleField::Strong,
    StyleField::Em,
    StyleField::Del,
    StyleField::TitleContent(TitleLevel::H2),
    StyleField::TitleContent(TitleLevel::H3),
    StyleField::TitleContent(TitleLevel::Base),
    StyleField::ListContainer,
    StyleField::ListItem,
    StyleField::TaskList,
    StyleField::Quote,
    StyleField::CodeBlock,
    StyleField::CodeInline,
    StyleField::Link,
    StyleField::TableHeader,
    StyleField::TableCell,
    StyleField::FootnoteRef,
    StyleField::FootnoteBackref,
];

/// Rewrite every cascade field of `styles` from one base color
///
/// Returns the number of fragments that changed.
pub fn apply_global_color(styles: &mut StyleSet, color: &HexColor) -> usize {
    let base = color.to_string();
    let mut changed = 0;

    for field in PLAIN_COLOR_FIELDS {
        changed += usize::from(edit(styles.get_mut(field), |f| f.set("color", &base, Absent::Skip)));
    }

    changed += usize::from(edit(&mut styles.header.user_id, |f| {
        f.set("color", &color.with_alpha(USER_ID_ALPHA), Absent::Skip)
    }));
    changed += usize::from(edit(&mut styles.header.post_time, |f| {
        f.set("color", &color.with_alpha(POST_TIME_ALPHA), Absent::Skip)
    }));

    changed += usize::from(edit(&mut styles.footer.container, |f| {
        let text = f.set("color", &color.with_alpha(FOOTER_TEXT_ALPHA), Absent::Skip);
        let border = f.replace_with("border-top", |value| {
            replace_first_color(value, &color.with_alpha(FOOTER_BORDER_ALPHA))
        });
        let background = f.replace(
            "background",
            &format!(
                "linear-gradient(to top, {}, transparent)",
                color.with_alpha(FOOTER_BACKGROUND_ALPHA)
            ),
        );
        text | border | background
    }));

    let accent = color.with_alpha(ACCENT_ALPHA);

    // The link color itself is handled above; only the underline gradient remains
    edit(&mut styles.link, |f| {
        f.replace_with("background-image", |value| {
            replace_function(
                value,
                "linear-gradient",
                &format!("linear-gradient(to right, {}, {})", accent, accent),
            )
        })
    });

    changed += usize::from(edit(&mut styles.image, |f| {
        f.replace_with("border", |value| replace_first_color(value, &accent))
    }));

    changed
}

impl StyleSet {
    /// The base color the cascade was last applied with
    ///
    /// Read from the second level heading text, falling back to the default
    /// base color when it is missing or not a hex color.
    pub fn global_color(&self) -> HexColor {
        crate::fragment::Fragment::new(self.title.h2.content.as_str())
            .get("color")
            .and_then(|value| HexColor::parse(value).ok())
            .unwrap_or_else(|| HexColor::trusted(DEFAULT_BASE_COLOR))
    }
}

//! Built-in theme templates

use crate::cascade::apply_global_color;
use crate::edit::StyleEdit;
use crate::model::{StyleSet, Theme, ThemeId};
use crate::value::HexColor;

/// Identifier of the template every installation starts with
pub const DEFAULT_TEMPLATE_ID: &str = "default";

struct TemplateSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    base_color: Option<&'static str>,
    background: Option<&'static str>,
}

const TEMPLATES: [TemplateSeed; 4] = [
    TemplateSeed {
        id: DEFAULT_TEMPLATE_ID,
        name: "默认主题",
        description: "Warm brown text on a cream card",
        base_color: None,
        background: None,
    },
    TemplateSeed {
        id: "ink",
        name: "水墨",
        description: "Charcoal text on rice paper",
        base_color: Some("#2f2f2f"),
        background: Some("#f7f5f0"),
    },
    TemplateSeed {
        id: "sakura",
        name: "樱花",
        description: "Rose text on a pale pink card",
        base_color: Some("#b03a5b"),
        background: Some("#fff5f7"),
    },
    TemplateSeed {
        id: "forest",
        name: "森林",
        description: "Deep green text on a mint card",
        base_color: Some("#2e5d3a"),
        background: Some("#f3f8f1"),
    },
];

/// The built-in theme templates, all marked as presets
///
/// Each template is the default style set recolored through the global
/// color cascade, with its own card background.
pub fn builtin_templates() -> Vec<Theme> {
    TEMPLATES.iter().map(build).collect()
}

fn build(seed: &TemplateSeed) -> Theme {
    let mut styles = StyleSet::default();

    if let Some(base) = seed.base_color.and_then(|hex| HexColor::parse(hex).ok()) {
        apply_global_color(&mut styles, &base);
    }
    if let Some(background) = seed.background.and_then(|hex| HexColor::parse(hex).ok()) {
        StyleEdit::BackgroundColor(background).apply(&mut styles);
    }

    let mut theme = Theme::new(ThemeId::new(seed.id), seed.name, styles)
        .with_description(seed.description);
    theme.is_preset = true;
    theme
}

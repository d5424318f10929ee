//! Keyword-based palette inference used when direct sampling is inconclusive.
//!
//! Two tiers, tried in order:
//! 1. Material names: kitchen-domain categories first, then general color words.
//! 2. Asset name: general color words, then style words, then a fixed default.

use crate::color::Rgb;
use crate::config::{NAME_FALLBACK_CAP, PALETTE_CAP};
use crate::model::Material;

const RED: Rgb = Rgb::new(0xDC, 0x14, 0x3C);
const BLUE: Rgb = Rgb::new(0x00, 0x66, 0xCC);
const GREEN: Rgb = Rgb::new(0x22, 0x8B, 0x22);
const BROWN: Rgb = Rgb::new(0x8B, 0x45, 0x13);
const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
const GRAY: Rgb = Rgb::new(0x80, 0x80, 0x80);
const YELLOW: Rgb = Rgb::new(0xFF, 0xD7, 0x00);
const ORANGE: Rgb = Rgb::new(0xFF, 0x8C, 0x00);
const BEIGE: Rgb = Rgb::new(0xF5, 0xF5, 0xDC);
const SILVER: Rgb = Rgb::new(0xC0, 0xC0, 0xC0);
const BURLYWOOD: Rgb = Rgb::new(0xDE, 0xB8, 0x87);
const DIM_GRAY: Rgb = Rgb::new(0x69, 0x69, 0x69);
const TAN: Rgb = Rgb::new(0xD2, 0xB4, 0x8C);

/// A keyword group mapped to one or more colors.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub colors: &'static [Rgb],
}

const fn rule(
    label: &'static str,
    keywords: &'static [&'static str],
    colors: &'static [Rgb],
) -> KeywordRule {
    KeywordRule {
        label,
        keywords,
        colors,
    }
}

/// Kitchen-domain material categories. Checked before general color words.
pub const DOMAIN_RULES: &[KeywordRule] = &[
    rule("appliance", &["appliance"], &[SILVER, WHITE]),
    rule(
        "wooden_furniture",
        &["woodenfurniture", "wooden_furniture", "wooden-furniture", "wooden furniture"],
        &[BROWN, BURLYWOOD],
    ),
    rule("cabinet", &["cabinet"], &[BROWN, BEIGE]),
    rule("counter", &["counter"], &[DIM_GRAY, WHITE]),
    rule("floor", &["floor"], &[BROWN, TAN]),
    rule("wall", &["wall"], &[BEIGE, WHITE]),
];

/// General color words, in priority order.
pub const COLOR_RULES: &[KeywordRule] = &[
    rule(
        "red",
        &["red", "burgundy", "maroon", "crimson", "cherry", "rose", "scarlet"],
        &[RED],
    ),
    rule(
        "blue",
        &["blue", "navy", "teal", "aqua", "cobalt", "cerulean", "azure"],
        &[BLUE],
    ),
    rule(
        "green",
        &["green", "olive", "forest", "sage", "mint", "emerald", "jade"],
        &[GREEN],
    ),
    rule(
        "brown",
        &["brown", "wood", "wooden", "oak", "walnut", "mahogany", "teak", "rustic", "chocolate"],
        &[BROWN],
    ),
    rule("white", &["white", "ivory", "cream", "pearl", "alabaster"], &[WHITE]),
    rule("black", &["black", "dark", "charcoal", "ebony", "midnight"], &[BLACK]),
    rule("gray", &["gray", "grey", "silver", "slate", "ash", "stone"], &[GRAY]),
    rule("yellow", &["yellow", "gold", "golden", "amber", "lemon"], &[YELLOW]),
    rule("orange", &["orange", "coral", "peach", "apricot", "rust"], &[ORANGE]),
    rule("beige", &["beige", "tan", "khaki", "sand", "camel", "nude"], &[BEIGE]),
    rule(
        "metal",
        &["metal", "steel", "aluminum", "chrome", "brass", "copper", "bronze", "iron"],
        &[SILVER],
    ),
];

/// Style words applied to the asset name when no color word matched.
pub const STYLE_RULES: &[KeywordRule] = &[
    rule("modern", &["modern", "contemporary", "minimalist"], &[WHITE, GRAY, BLACK]),
    rule(
        "rustic",
        &["rustic", "vintage", "antique", "farmhouse"],
        &[
            Rgb::new(0xA0, 0x52, 0x2D),
            Rgb::new(0x9C, 0xAF, 0x88),
            Rgb::new(0x8B, 0x86, 0x80),
        ],
    ),
    rule(
        "classic",
        &["classic", "traditional"],
        &[BROWN, BEIGE, Rgb::new(0xB8, 0x86, 0x0B)],
    ),
];

/// Used when nothing else matches: brown, beige, gray.
pub const DEFAULT_PALETTE: [Rgb; 3] = [BROWN, BEIGE, GRAY];

/// Fallback tier that produced a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTier {
    MaterialNames,
    AssetName,
}

fn matches(rule: &KeywordRule, name: &str) -> bool {
    rule.keywords.iter().any(|k| name.contains(k))
}

fn push_unique(out: &mut Vec<Rgb>, colors: &[Rgb]) {
    for color in colors {
        if !out.contains(color) {
            out.push(*color);
        }
    }
}

/// Colors for one lower-cased name: first matching domain category, or else
/// one color per matching general color word.
fn material_name_colors(name: &str) -> Vec<Rgb> {
    if let Some(rule) = DOMAIN_RULES.iter().find(|r| matches(r, name)) {
        tracing::debug!("Material '{}' matched category '{}'", name, rule.label);
        return rule.colors.to_vec();
    }

    COLOR_RULES
        .iter()
        .filter(|r| matches(r, name))
        .flat_map(|r| r.colors.iter().copied())
        .collect()
}

/// Tier 1: infer colors from material names.
pub fn infer_from_material_names(materials: &[Material]) -> Vec<Rgb> {
    let mut colors = Vec::new();
    for material in materials {
        let Some(name) = material.name.as_deref() else {
            continue;
        };
        push_unique(&mut colors, &material_name_colors(&name.to_lowercase()));
    }
    colors.truncate(PALETTE_CAP);
    colors
}

/// Tier 2: infer colors from the asset's display name. Never empty.
pub fn infer_from_asset_name(name: &str) -> Vec<Rgb> {
    let name = name.to_lowercase();

    let mut colors = Vec::new();
    for rule in COLOR_RULES.iter().filter(|r| matches(r, &name)) {
        push_unique(&mut colors, rule.colors);
    }
    if !colors.is_empty() {
        colors.truncate(NAME_FALLBACK_CAP);
        return colors;
    }

    if let Some(rule) = STYLE_RULES.iter().find(|r| matches(r, &name)) {
        tracing::debug!("Asset name matched style '{}'", rule.label);
        return rule.colors.to_vec();
    }

    DEFAULT_PALETTE.to_vec()
}

/// Run the tiers in order, keeping at most `cap` colors. The returned
/// palette is never empty.
pub fn resolve(materials: &[Material], asset_name: &str, cap: usize) -> (Vec<Rgb>, FallbackTier) {
    let cap = cap.max(1);
    let mut colors = infer_from_material_names(materials);
    if !colors.is_empty() {
        colors.truncate(cap);
        return (colors, FallbackTier::MaterialNames);
    }
    let mut colors = infer_from_asset_name(asset_name);
    colors.truncate(cap);
    (colors, FallbackTier::AssetName)
}

use serde::{Deserialize, Serialize};

/// Directory that holds one KanjiVG-style SVG per character.
pub const SVG_DIR: &str = "resources/kanji_svg";

/// Canonical record for one character.
///
/// Produced by [`crate::normalize`] and handed to the rest of the crate by shared reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// The character grapheme.
    pub chu: String,
    /// Romanized reading label.
    pub han_viet: String,
    /// Meaning gloss.
    pub nghia: String,
    /// Kun readings, in pronunciation-category order.
    pub kun: Vec<Reading>,
    /// On readings, in pronunciation-category order.
    pub on: Vec<Reading>,
    /// Free-text radical annotation.
    pub bo: Option<String>,
    /// Locator of the stroke-order asset.
    pub svg: SvgLocator,
    /// Timestamp of the last normalize-and-commit.
    pub updated_at: String,
}

/// One pronunciation variant with optional gloss and usages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Pronunciation token.
    pub am: String,
    /// Optional gloss for this reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nghia: Option<String>,
    /// Example words, unique by `(tu, hiragana, nghia)`.
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Reading {
    /// A bare reading without gloss or examples.
    pub fn plain(am: impl Into<String>) -> Self {
        Self {
            am: am.into(),
            nghia: None,
            examples: Vec::new(),
        }
    }
}

/// Example usage of a reading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Example {
    /// Headword.
    pub tu: String,
    /// Reading annotation.
    #[serde(default)]
    pub hiragana: String,
    /// Gloss.
    #[serde(default)]
    pub nghia: String,
}

impl Example {
    /// Build an example from its three parts.
    pub fn new(tu: impl Into<String>, hiragana: impl Into<String>, nghia: impl Into<String>) -> Self {
        Self {
            tu: tu.into(),
            hiragana: hiragana.into(),
            nghia: nghia.into(),
        }
    }
}

/// Where the stroke-order SVG for an entry lives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgLocator {
    /// Lowercase code point of `chu`, zero-padded to 5 digits.
    pub codepoint_hex: String,
    /// Asset path relative to the asset root.
    pub path: String,
    /// Whether the asset is expected to exist.
    pub exists: bool,
}

impl SvgLocator {
    /// Locator derived from a character with the default path convention.
    pub fn for_char(chu: &str) -> Option<Self> {
        let codepoint_hex = codepoint_hex(chu)?;
        Some(Self {
            path: default_svg_path(&codepoint_hex),
            codepoint_hex,
            exists: true,
        })
    }
}

/// Lowercase hexadecimal code point of the first scalar in `chu`, zero-padded to 5 digits.
///
/// Code points above `0xfffff` simply produce a longer string.
pub fn codepoint_hex(chu: &str) -> Option<String> {
    let c = chu.trim().chars().next()?;
    Some(format!("{:05x}", u32::from(c)))
}

/// Default asset path for a code point key: `resources/kanji_svg/<hex>.svg`.
pub fn default_svg_path(codepoint_hex: &str) -> String {
    format!("{SVG_DIR}/{codepoint_hex}.svg")
}

#[cfg(test)]
#[path = "../../tests/unit/entry/model.rs"]
mod tests;

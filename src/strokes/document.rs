use std::sync::atomic::{AtomicU64, Ordering};

use crate::assets::sanitize::sanitize_svg_markup;
use crate::foundation::error::{HitsujunError, HitsujunResult};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one loaded document; stroke handles carry it so they cannot outlive a character
/// change unnoticed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sanitized SVG markup for one character.
#[derive(Clone, Debug)]
pub struct SvgDocument {
    id: DocumentId,
    markup: String,
}

impl SvgDocument {
    /// Sanitize `raw` markup into a document.
    pub fn from_markup(raw: &str) -> Self {
        Self {
            id: DocumentId::next(),
            markup: sanitize_svg_markup(raw),
        }
    }

    /// Decode and sanitize a fetched body.
    ///
    /// Empty bodies and non-UTF-8 bytes are [`HitsujunError::Parse`].
    pub fn parse(bytes: &[u8]) -> HitsujunResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| HitsujunError::parse(format!("svg body is not utf-8: {e}")))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.trim().is_empty() {
            return Err(HitsujunError::parse("svg body is empty"));
        }
        Ok(Self::from_markup(text))
    }

    /// Document with no markup; extracts to zero strokes.
    pub fn empty() -> Self {
        Self {
            id: DocumentId::next(),
            markup: String::new(),
        }
    }

    /// Identity of this document.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Sanitized markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Whether the document carries no markup.
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }
}

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::animation::host::{RevealTransition, StrokeHost};
use crate::strokes::document::SvgDocument;
use crate::strokes::extract::StrokePath;

static DASH_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s+stroke-dash(?:array|offset)\s*=\s*(?:"[^"]*"|'[^']*')"#)
        .expect("valid dash attribute regex")
});

#[derive(Clone, Copy, Debug)]
struct DashState {
    length: f64,
    insert_at: usize,
    reveal: Option<RevealTransition>,
}

/// [`StrokeHost`] over a sanitized document.
///
/// Dash state lives beside the markup; the document itself is never modified. A snapshot at
/// any instant is produced by [`DocumentSurface::render_markup`].
#[derive(Debug)]
pub struct DocumentSurface {
    document: SvgDocument,
    dashes: BTreeMap<usize, DashState>,
    layout_flushes: u64,
}

impl DocumentSurface {
    /// Surface showing `document` with every stroke fully drawn.
    pub fn new(document: SvgDocument) -> Self {
        Self {
            document,
            dashes: BTreeMap::new(),
            layout_flushes: 0,
        }
    }

    /// The untouched source document.
    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    /// Number of layout flushes requested so far.
    pub fn layout_flushes(&self) -> u64 {
        self.layout_flushes
    }

    /// Drop every dash override, showing all strokes fully drawn again.
    pub fn reset(&mut self) {
        self.dashes.clear();
    }

    /// Dash offset of stroke `index` at `now`; `None` when the stroke has no dash override.
    pub fn dash_offset(&self, index: usize, now: Duration) -> Option<f64> {
        let dash = self.dashes.get(&index)?;
        Some(match dash.reveal {
            Some(t) => t.offset_at(dash.length, now),
            None => dash.length,
        })
    }

    /// Whether every started reveal has finished by `now`.
    pub fn is_settled(&self, now: Duration) -> bool {
        self.dashes
            .values()
            .all(|d| d.reveal.is_none_or(|t| now >= t.end()))
    }

    /// Markup with each stroke's dash state at `now` applied as presentation attributes.
    pub fn render_markup(&self, now: Duration) -> String {
        let src = self.document.markup();
        let mut ordered: Vec<&DashState> = self.dashes.values().collect();
        ordered.sort_by_key(|d| d.insert_at);

        let mut out = String::with_capacity(src.len() + ordered.len() * 64);
        let mut cursor = 0;
        for dash in ordered {
            if dash.insert_at < cursor || dash.insert_at > src.len() {
                continue;
            }
            out.push_str(&src[cursor..dash.insert_at]);
            let offset = match dash.reveal {
                Some(t) => t.offset_at(dash.length, now),
                None => dash.length,
            };
            let _ = write!(
                out,
                " stroke-dasharray=\"{:.3}\" stroke-dashoffset=\"{:.3}\"",
                dash.length, offset
            );
            // The element's own dash attributes are replaced, not repeated.
            let tag_end = start_tag_end(src, dash.insert_at);
            out.push_str(&DASH_ATTR.replace_all(&src[dash.insert_at..tag_end], ""));
            cursor = tag_end;
        }
        out.push_str(&src[cursor..]);
        out
    }

    fn slot(&mut self, stroke: &StrokePath) -> Option<&mut DashState> {
        if stroke.document_id() != self.document.id() {
            tracing::warn!(
                index = stroke.index(),
                "ignoring stroke handle from another document"
            );
            return None;
        }
        Some(self.dashes.entry(stroke.index()).or_insert(DashState {
            length: stroke.length(),
            insert_at: stroke.attr_insert_at(),
            reveal: None,
        }))
    }
}

/// Byte offset of the `>` closing the start tag that contains `from`, skipping quoted values.
fn start_tag_end(src: &str, from: usize) -> usize {
    let mut quote = None;
    for (i, c) in src[from..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '>') => return from + i,
            (None, _) => {}
        }
    }
    src.len()
}

impl StrokeHost for DocumentSurface {
    fn hide(&mut self, stroke: &StrokePath) {
        if let Some(dash) = self.slot(stroke) {
            dash.reveal = None;
        }
    }

    fn flush_layout(&mut self) {
        self.layout_flushes += 1;
    }

    fn begin_reveal(&mut self, stroke: &StrokePath, transition: RevealTransition) {
        if let Some(dash) = self.slot(stroke) {
            dash.reveal = Some(transition);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

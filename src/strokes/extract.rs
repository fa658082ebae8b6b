//! Stroke extraction.
//!
//! Every `<path>` element in document order is a stroke candidate. Guide lines (stroke color equal
//! to the guide color, case-insensitive) and elements without path data are skipped; the rest
//! keep their source order, which in KanjiVG files is the stroke-number order.

use kurbo::{BezPath, Shape};

use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::strokes::document::{DocumentId, SvgDocument};

/// Stroke color of the decorative grid lines drawn into the diagrams.
pub const DEFAULT_GUIDE_COLOR: &str = "#ddd";

const ARCLEN_ACCURACY: f64 = 1e-3;

/// Handle to one stroke of a loaded [`SvgDocument`].
///
/// Only meaningful together with the document it was extracted from; see
/// [`StrokePath::document_id`].
#[derive(Clone, Debug)]
pub struct StrokePath {
    document: DocumentId,
    index: usize,
    id: Option<String>,
    attr_insert_at: usize,
    path: BezPath,
    length: f64,
}

impl StrokePath {
    /// Document this handle belongs to.
    pub fn document_id(&self) -> DocumentId {
        self.document
    }

    /// Draw-order position in the extracted list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Element `id`, if any (KanjiVG uses `kvg:<hex>-s<n>`).
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Parsed path geometry in document user units.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Measured path length in document user units.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Byte offset in the sanitized markup just past the element's tag name.
    pub(crate) fn attr_insert_at(&self) -> usize {
        self.attr_insert_at
    }
}

/// Extracts ordered strokes, skipping guide lines of a configured color.
#[derive(Clone, Debug)]
pub struct StrokeExtractor {
    guide_color: String,
}

impl Default for StrokeExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_GUIDE_COLOR)
    }
}

impl StrokeExtractor {
    /// Extractor that treats `guide_color` strokes as guide lines.
    pub fn new(guide_color: impl Into<String>) -> Self {
        Self {
            guide_color: guide_color.into().trim().to_owned(),
        }
    }

    /// Guide-line color compared against each element's stroke.
    pub fn guide_color(&self) -> &str {
        &self.guide_color
    }

    /// Extract strokes, reporting malformed markup as [`HitsujunError::Parse`].
    pub fn try_extract(&self, doc: &SvgDocument) -> HitsujunResult<Vec<StrokePath>> {
        if doc.is_empty() {
            return Ok(Vec::new());
        }
        let markup = doc.markup();
        let xml = roxmltree::Document::parse(markup)
            .map_err(|e| HitsujunError::parse(format!("parse svg markup: {e}")))?;

        let mut out = Vec::new();
        for node in xml
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "path")
        {
            if self.is_guide(node) {
                continue;
            }
            let Some(d) = node.attribute("d").map(str::trim).filter(|d| !d.is_empty()) else {
                continue;
            };
            let path = match BezPath::from_svg(d) {
                Ok(p) if !p.elements().is_empty() => p,
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(id = node.attribute("id"), "skipping path with bad data: {e}");
                    continue;
                }
            };

            let length = path.perimeter(ARCLEN_ACCURACY);
            out.push(StrokePath {
                document: doc.id(),
                index: out.len(),
                id: node.attribute("id").map(str::to_owned),
                attr_insert_at: tag_name_end(markup, node.range().start),
                path,
                length,
            });
        }
        Ok(out)
    }

    /// Extract strokes; malformed markup degrades to an empty list.
    #[tracing::instrument(skip(self, doc))]
    pub fn extract(&self, doc: &SvgDocument) -> Vec<StrokePath> {
        match self.try_extract(doc) {
            Ok(strokes) => strokes,
            Err(e) => {
                tracing::warn!("no strokes extracted: {e}");
                Vec::new()
            }
        }
    }

    fn is_guide(&self, node: roxmltree::Node<'_, '_>) -> bool {
        stroke_color(node).is_some_and(|c| c.eq_ignore_ascii_case(&self.guide_color))
    }
}

/// Extract strokes with the default guide color, reporting malformed markup.
pub fn try_extract_strokes(doc: &SvgDocument) -> HitsujunResult<Vec<StrokePath>> {
    StrokeExtractor::default().try_extract(doc)
}

/// Extract strokes with the default guide color.
pub fn extract_strokes(doc: &SvgDocument) -> Vec<StrokePath> {
    StrokeExtractor::default().extract(doc)
}

/// The element's own stroke color; an inline `style` wins over the presentation attribute.
fn stroke_color<'a>(node: roxmltree::Node<'a, '_>) -> Option<&'a str> {
    let from_style = node.attribute("style").and_then(|style| {
        style.split(';').find_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            (k.trim() == "stroke").then(|| v.trim())
        })
    });
    from_style.or_else(|| node.attribute("stroke").map(str::trim))
}

fn tag_name_end(markup: &str, tag_start: usize) -> usize {
    let rest = &markup[tag_start..];
    let name_len = rest
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c.is_whitespace() || c == '/' || c == '>')
        .map_or(rest.len(), |(i, _)| i);
    tag_start + name_len
}

#[cfg(test)]
#[path = "../../tests/unit/strokes/extract.rs"]
mod tests;

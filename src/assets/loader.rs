use crate::assets::source::AssetSource;
use crate::entry::model::{Entry, codepoint_hex, default_svg_path};
use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::strokes::document::SvgDocument;
use crate::strokes::extract::{StrokeExtractor, StrokePath};

/// Stamp for one in-flight load; results of superseded tickets are discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    path: String,
}

impl LoadTicket {
    /// Resolved asset path this ticket loads.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A loaded document together with the strokes extracted from it.
#[derive(Clone, Debug)]
pub struct LoadedStrokes {
    /// Sanitized document the strokes point into.
    pub document: SvgDocument,
    /// Strokes in draw order.
    pub strokes: Vec<StrokePath>,
}

/// Resolves, fetches and sanitizes per-character SVG assets.
pub struct AssetLoader<S> {
    source: S,
    extractor: StrokeExtractor,
    generation: u64,
}

impl<S: AssetSource> AssetLoader<S> {
    /// Loader over `source` with the default guide color.
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: StrokeExtractor::default(),
            generation: 0,
        }
    }

    /// Replace the stroke extractor (e.g. for a different guide color).
    pub fn with_extractor(mut self, extractor: StrokeExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Stroke extractor used by [`AssetLoader::load_strokes`].
    pub fn extractor(&self) -> &StrokeExtractor {
        &self.extractor
    }

    /// Asset path for `entry`: explicit `svg.path`, else derived from the code point.
    pub fn resolve_path(entry: &Entry) -> HitsujunResult<String> {
        let explicit = entry.svg.path.trim();
        if !explicit.is_empty() {
            return Ok(explicit.to_owned());
        }
        let hex = Some(entry.svg.codepoint_hex.trim())
            .filter(|h| !h.is_empty())
            .map(str::to_lowercase)
            .or_else(|| codepoint_hex(&entry.chu))
            .ok_or_else(|| {
                HitsujunError::configuration("entry has neither a character nor an asset path")
            })?;
        Ok(default_svg_path(&hex))
    }

    /// Fetch and sanitize the asset at `path`.
    ///
    /// Network failures are returned; an empty or undecodable body degrades to an empty
    /// document.
    pub fn load_asset(&self, path: &str) -> HitsujunResult<SvgDocument> {
        let bytes = self.source.fetch(path)?;
        match SvgDocument::parse(&bytes) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                tracing::warn!(path, "degrading to empty document: {e}");
                Ok(SvgDocument::empty())
            }
        }
    }

    /// Resolve, fetch, sanitize and extract in one call.
    #[tracing::instrument(skip(self, entry), fields(chu = %entry.chu))]
    pub fn load_strokes(&self, entry: &Entry) -> HitsujunResult<LoadedStrokes> {
        let path = Self::resolve_path(entry)?;
        let document = self.load_asset(&path)?;
        let strokes = self.extractor.extract(&document);
        tracing::debug!(path, strokes = strokes.len(), "loaded strokes");
        Ok(LoadedStrokes { document, strokes })
    }

    /// Start a load for `entry`, superseding every earlier ticket.
    pub fn begin(&mut self, entry: &Entry) -> HitsujunResult<LoadTicket> {
        self.generation = self.generation.wrapping_add(1);
        let path = Self::resolve_path(entry)?;
        Ok(LoadTicket {
            generation: self.generation,
            path,
        })
    }

    /// Supersede every outstanding ticket without starting a new load.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Whether `ticket` is still the most recent one.
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Perform the fetch for `ticket`.
    pub fn fetch(&self, ticket: &LoadTicket) -> HitsujunResult<LoadedStrokes> {
        let document = self.load_asset(&ticket.path)?;
        let strokes = self.extractor.extract(&document);
        Ok(LoadedStrokes { document, strokes })
    }

    /// Pass `result` through only when `ticket` is still current.
    pub fn accept<T>(&self, ticket: &LoadTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            tracing::debug!(path = ticket.path(), "discarding stale load result");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;

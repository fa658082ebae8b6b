use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::timing::AnimationTiming;
use crate::assets::source::{AssetSource, DirSource};
use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::overlay::freehand::InkStyle;
use crate::strokes::extract::{DEFAULT_GUIDE_COLOR, StrokeExtractor};

/// Viewer settings, usually read from a JSON file. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Directory holding `resources/kanji_svg/`, or a base URL with the `http` feature.
    pub asset_root: String,
    /// Stroke reveal pacing.
    pub timing: AnimationTiming,
    /// Color of the guide line excluded from extraction.
    pub guide_color: String,
    /// Freehand ink.
    pub ink: InkStyle,
    /// Edge length in pixels for rendered diagrams.
    pub diagram_size: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_root: ".".to_owned(),
            timing: AnimationTiming::default(),
            guide_color: DEFAULT_GUIDE_COLOR.to_owned(),
            ink: InkStyle::default(),
            diagram_size: 109,
        }
    }
}

impl ViewerConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> HitsujunResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| HitsujunError::serde(format!("parse viewer config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> HitsujunResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HitsujunError::configuration(format!("open viewer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings no viewer can work with.
    pub fn validate(&self) -> HitsujunResult<()> {
        if self.diagram_size == 0 {
            return Err(HitsujunError::configuration("diagram_size must be non-zero"));
        }
        if !(self.ink.width.is_finite() && self.ink.width > 0.0) {
            return Err(HitsujunError::configuration("ink width must be positive"));
        }
        if self.guide_color.trim().is_empty() {
            return Err(HitsujunError::configuration("guide_color must not be empty"));
        }
        Ok(())
    }

    /// Extractor honoring the configured guide color.
    pub fn extractor(&self) -> StrokeExtractor {
        StrokeExtractor::new(self.guide_color.trim())
    }

    /// Asset source for `asset_root`.
    pub fn source(&self) -> HitsujunResult<Box<dyn AssetSource>> {
        let root = self.asset_root.trim();
        if root.starts_with("http://") || root.starts_with("https://") {
            #[cfg(feature = "http")]
            {
                return Ok(Box::new(crate::assets::source::HttpSource::new(root)));
            }
            #[cfg(not(feature = "http"))]
            {
                return Err(HitsujunError::configuration(format!(
                    "asset_root '{root}' is a URL but the `http` feature is disabled"
                )));
            }
        }
        Ok(Box::new(DirSource::new(root)))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

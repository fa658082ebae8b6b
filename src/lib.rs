//! Hitsujun draws stroke-order diagrams for kanji and other logographic characters.
//!
//! The pipeline:
//!
//! - [`normalize`] heterogeneous dictionary records into a canonical [`Entry`]
//! - load the character's KanjiVG asset with an [`AssetLoader`] and pull out its
//!   [`StrokePath`]s
//! - reveal the strokes one at a time with a [`StrokeAnimator`] driving a [`StrokeHost`]
//!   such as [`DocumentSurface`]
//! - let the learner trace over the diagram on a [`FreehandOverlay`]
//!
//! [`StrokeViewer`] composes all of these for a single character.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Reveal animation.
pub mod animation;
/// Asset loading.
pub mod assets;
/// Viewer configuration.
pub mod config;
/// Dictionary entries.
pub mod entry;
mod foundation;
/// Freehand overlay.
pub mod overlay;
/// Markup and raster output.
pub mod render;
/// Composed viewer.
pub mod session;
/// Stroke extraction.
pub mod strokes;

pub use crate::foundation::core::{BezPath, PixelSize, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{HitsujunError, HitsujunResult, NormalizationReject};

pub use crate::animation::animator::{AnimatorState, StrokeAnimator};
pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::ease::Ease;
pub use crate::animation::host::{RevealTransition, StrokeHost};
pub use crate::animation::timing::AnimationTiming;
pub use crate::assets::color::Rgba8;
pub use crate::assets::loader::{AssetLoader, LoadTicket, LoadedStrokes};
pub use crate::assets::sanitize::sanitize_svg_markup;
#[cfg(feature = "http")]
pub use crate::assets::source::HttpSource;
pub use crate::assets::source::{AssetSource, DirSource, MemorySource};
pub use crate::config::ViewerConfig;
pub use crate::entry::examples::{ExampleSet, collect_examples, parse_example};
pub use crate::entry::model::{
    Entry, Example, Reading, SVG_DIR, SvgLocator, codepoint_hex, default_svg_path,
};
pub use crate::entry::normalize::{
    normalize, normalize_all, normalize_at, tokenize_readings, try_normalize, try_normalize_at,
};
pub use crate::overlay::events::{EventChannel, EventHub, HostEvent, ListenerId};
pub use crate::overlay::freehand::{FreehandOverlay, InkStyle};
pub use crate::overlay::host::{HostBoxProvider, SharedHostBox};
pub use crate::render::raster::{FrameRGBA, SvgRasterizer, render_svg_markup};
pub use crate::render::surface::DocumentSurface;
pub use crate::session::viewer::{StrokeViewer, ViewState};
pub use crate::strokes::document::{DocumentId, SvgDocument};
pub use crate::strokes::extract::{
    DEFAULT_GUIDE_COLOR, StrokeExtractor, StrokePath, extract_strokes, try_extract_strokes,
};

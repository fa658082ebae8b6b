//! Turning a document plus its animation state into markup and pixels.

/// Rasterization via `resvg`.
pub mod raster;
/// Dash-state surface over a document.
pub mod surface;

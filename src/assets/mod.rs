//! Per-character SVG assets: where they live, how they are fetched and cleaned up.

/// Colour values used in configuration.
pub mod color;
/// Stale-safe asset loading.
pub mod loader;
/// Markup sanitizer.
pub mod sanitize;
/// Byte sources for assets.
pub mod source;

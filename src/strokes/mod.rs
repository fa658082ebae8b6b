/// Sanitized SVG documents.
pub mod document;
/// Stroke extraction.
pub mod extract;

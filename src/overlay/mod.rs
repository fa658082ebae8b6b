//! Freehand practice layer.

/// Host event registry.
pub mod events;
/// The drawing overlay.
pub mod freehand;
/// Host box geometry.
pub mod host;

//! Stroke-by-stroke reveal.

/// The reveal state machine.
pub mod animator;
/// Time sources.
pub mod clock;
/// Easing curves.
pub mod ease;
/// Animator-to-surface seam.
pub mod host;
/// Reveal pacing.
pub mod timing;

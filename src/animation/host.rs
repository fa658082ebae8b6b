use std::time::Duration;

use crate::animation::ease::Ease;
use crate::strokes::extract::StrokePath;

/// A timed reveal of one stroke: its dash offset runs from the full length to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealTransition {
    /// Scheduled start, on the animator's clock.
    pub start: Duration,
    /// Transition length.
    pub duration: Duration,
    /// Progress curve.
    pub ease: Ease,
}

impl RevealTransition {
    /// Eased progress in `[0, 1]` at `now`.
    pub fn progress_at(&self, now: Duration) -> f64 {
        if now <= self.start {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = (now - self.start).as_secs_f64() / self.duration.as_secs_f64();
        self.ease.apply(t)
    }

    /// Dash offset of a stroke of `length` at `now`.
    pub fn offset_at(&self, length: f64, now: Duration) -> f64 {
        length * (1.0 - self.progress_at(now))
    }

    /// When the stroke is fully drawn.
    pub fn end(&self) -> Duration {
        self.start.saturating_add(self.duration)
    }
}

/// Visual surface the stroke animator drives.
///
/// Implementations own the rendered document while an animation runs.
pub trait StrokeHost {
    /// Make `stroke` fully hidden: dash length and dash offset both equal its length. Cancels any
    /// transition in progress on it.
    fn hide(&mut self, stroke: &StrokePath);

    /// Commit pending style changes so the hidden state is observable before any reveal starts.
    fn flush_layout(&mut self);

    /// Start revealing `stroke`.
    fn begin_reveal(&mut self, stroke: &StrokePath, transition: RevealTransition);
}

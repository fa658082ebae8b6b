use std::time::Duration;

use crate::animation::ease::Ease;

/// Per-stroke reveal duration, inter-stroke gap and reveal curve.
///
/// Stroke `i` starts `i * (stroke_ms + gap_ms)` after `play`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationTiming {
    /// Reveal duration of one stroke, in milliseconds.
    pub stroke_ms: u64,
    /// Pause after a stroke finishes before the next one starts, in milliseconds.
    pub gap_ms: u64,
    /// Reveal curve.
    #[serde(default)]
    pub ease: Ease,
}

impl AnimationTiming {
    /// Pacing of the stroke-order diagram on the detail view.
    pub const DIAGRAM: Self = Self {
        stroke_ms: 900,
        gap_ms: 180,
        ease: Ease::Linear,
    };

    /// Slower pacing with longer pauses, used on the practice view.
    pub const PRACTICE: Self = Self {
        stroke_ms: 800,
        gap_ms: 500,
        ease: Ease::Linear,
    };

    /// Look up a named preset (`diagram` or `practice`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "diagram" => Some(Self::DIAGRAM),
            "practice" => Some(Self::PRACTICE),
            _ => None,
        }
    }

    /// Reveal duration of one stroke.
    pub fn stroke_duration(self) -> Duration {
        Duration::from_millis(self.stroke_ms)
    }

    /// Gap between strokes.
    pub fn gap(self) -> Duration {
        Duration::from_millis(self.gap_ms)
    }

    /// Offset between the starts of consecutive strokes.
    pub fn step(self) -> Duration {
        Duration::from_millis(self.stroke_ms.saturating_add(self.gap_ms))
    }

    /// Time from `play` until the animation of `strokes` strokes returns to idle.
    pub fn total(self, strokes: usize) -> Duration {
        self.step().saturating_mul(u32::try_from(strokes).unwrap_or(u32::MAX))
    }
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self::DIAGRAM
    }
}

//! Sequential stroke reveal.
//!
//! The animator is a state machine over one timer: `play` hides every stroke, flushes, and
//! starts stroke 0; each later stroke starts one `timing.step()` after the previous one. `tick`
//! is called whenever the timer fires (see [`StrokeAnimator::next_deadline`]). Cancellation is
//! cooperative: `stop` raises an abort flag that is only looked at when the pending step
//! elapses, so no stroke is ever cut off mid-reveal.

use std::time::Duration;

use crate::animation::host::{RevealTransition, StrokeHost};
use crate::animation::timing::AnimationTiming;
use crate::strokes::extract::StrokePath;

/// Caller-visible animator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorState {
    /// Nothing playing; `play` will start a new run.
    Idle,
    /// A run is revealing strokes.
    Animating,
}

#[derive(Clone, Copy, Debug)]
struct Run {
    next: usize,
    deadline: Duration,
    abort: bool,
}

/// Plays strokes back in order, one at a time.
#[derive(Debug)]
pub struct StrokeAnimator {
    strokes: Vec<StrokePath>,
    timing: AnimationTiming,
    run: Option<Run>,
}

impl StrokeAnimator {
    /// Animator over `strokes` (draw order) with the given pacing.
    pub fn new(strokes: Vec<StrokePath>, timing: AnimationTiming) -> Self {
        Self {
            strokes,
            timing,
            run: None,
        }
    }

    /// Strokes in draw order.
    pub fn strokes(&self) -> &[StrokePath] {
        &self.strokes
    }

    /// Pacing in use.
    pub fn timing(&self) -> AnimationTiming {
        self.timing
    }

    /// Change pacing; takes effect on the next `play`.
    pub fn set_timing(&mut self, timing: AnimationTiming) {
        self.timing = timing;
    }

    /// Current state. A stopped run reads as idle straight away, even while its last wait is
    /// still pending.
    pub fn state(&self) -> AnimatorState {
        match self.run {
            Some(run) if !run.abort => AnimatorState::Animating,
            _ => AnimatorState::Idle,
        }
    }

    /// Whether a stopped run is still waiting out its last scheduled interval.
    pub fn is_draining(&self) -> bool {
        self.run.is_some_and(|r| r.abort)
    }

    /// When the next `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.run.map(|r| r.deadline)
    }

    /// Start a run at `now`.
    ///
    /// Ignored (returns `false`) while animating or when there are no strokes. A run that was
    /// stopped but is still draining is discarded and replaced.
    pub fn play(&mut self, now: Duration, host: &mut dyn StrokeHost) -> bool {
        if self.state() == AnimatorState::Animating {
            tracing::debug!("play ignored: already animating");
            return false;
        }
        if self.strokes.is_empty() {
            return false;
        }
        if self.is_draining() {
            tracing::debug!("replacing stopped run");
        }

        for stroke in &self.strokes {
            host.hide(stroke);
        }
        host.flush_layout();

        self.run = Some(Run {
            next: 0,
            deadline: now,
            abort: false,
        });
        self.tick(now, host);
        true
    }

    /// Request the current run to end. Strokes already revealing finish; no new stroke starts.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.as_mut() {
            run.abort = true;
        }
    }

    /// Advance to `now`, starting every stroke whose scheduled start has passed.
    ///
    /// Late ticks catch up: each started stroke keeps its scheduled start time.
    pub fn tick(&mut self, now: Duration, host: &mut dyn StrokeHost) -> AnimatorState {
        let step = self.timing.step();
        while let Some(run) = self.run.as_mut() {
            if now < run.deadline {
                break;
            }
            if run.abort || run.next >= self.strokes.len() {
                self.run = None;
                break;
            }
            host.begin_reveal(
                &self.strokes[run.next],
                RevealTransition {
                    start: run.deadline,
                    duration: self.timing.stroke_duration(),
                    ease: self.timing.ease,
                },
            );
            run.next += 1;
            run.deadline = run.deadline.saturating_add(step);
        }
        self.state()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/animator.rs"]
mod tests;

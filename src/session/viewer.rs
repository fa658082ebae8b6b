//! One-character stroke viewer.
//!
//! Composes the loader, the document surface, the animator and the freehand overlay. The
//! viewer owns the policy the components leave to their caller: freehand drawing and stroke
//! animation never run at the same time, and switching characters drops every stroke handle
//! of the previous document and wipes the ink.

use std::rc::Rc;
use std::time::Duration;

use crate::animation::animator::{AnimatorState, StrokeAnimator};
use crate::animation::clock::Clock;
use crate::animation::timing::AnimationTiming;
use crate::assets::loader::{AssetLoader, LoadTicket, LoadedStrokes};
use crate::assets::source::AssetSource;
use crate::config::ViewerConfig;
use crate::entry::model::Entry;
use crate::foundation::error::HitsujunResult;
use crate::overlay::events::EventHub;
use crate::overlay::freehand::{FreehandOverlay, InkStyle};
use crate::overlay::host::HostBoxProvider;
use crate::render::surface::DocumentSurface;
use crate::strokes::extract::StrokePath;

/// What the viewer currently shows where the diagram goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// No character selected.
    Empty,
    /// Waiting for the asset of the selected character.
    Loading,
    /// Diagram loaded.
    Ready,
    /// The asset could not be loaded; shown in place of the diagram.
    Failed(String),
}

#[derive(Debug)]
struct Shown {
    surface: DocumentSurface,
    animator: StrokeAnimator,
}

/// Stroke-order viewer for one character at a time.
pub struct StrokeViewer<S, C> {
    loader: AssetLoader<S>,
    clock: C,
    timing: AnimationTiming,
    entry: Option<Entry>,
    shown: Option<Shown>,
    state: ViewState,
    overlay: Option<FreehandOverlay>,
}

impl<S: AssetSource, C: Clock> StrokeViewer<S, C> {
    /// Viewer over `loader`, pacing reveals with `timing` on `clock`.
    pub fn new(loader: AssetLoader<S>, timing: AnimationTiming, clock: C) -> Self {
        Self {
            loader,
            clock,
            timing,
            entry: None,
            shown: None,
            state: ViewState::Empty,
            overlay: None,
        }
    }

    /// Viewer with the guide color and timing from `config`.
    pub fn from_config(config: &ViewerConfig, source: S, clock: C) -> HitsujunResult<Self> {
        config.validate()?;
        let loader = AssetLoader::new(source).with_extractor(config.extractor());
        Ok(Self::new(loader, config.timing, clock))
    }

    /// Lay a freehand overlay over `host`. A previously attached overlay is disposed.
    pub fn attach_overlay(
        &mut self,
        host: Rc<dyn HostBoxProvider>,
        hub: &EventHub,
        style: InkStyle,
    ) -> &FreehandOverlay {
        self.detach_overlay();
        self.overlay.insert(FreehandOverlay::attach(host, hub, style))
    }

    /// Dispose the overlay, if any.
    pub fn detach_overlay(&mut self) {
        if let Some(mut overlay) = self.overlay.take() {
            overlay.dispose();
        }
    }

    /// Attached overlay.
    pub fn overlay(&self) -> Option<&FreehandOverlay> {
        self.overlay.as_ref()
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Selected character.
    pub fn entry(&self) -> Option<&Entry> {
        self.entry.as_ref()
    }

    /// Clock driving the animation.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Strokes of the loaded document; empty unless `Ready`.
    pub fn strokes(&self) -> &[StrokePath] {
        self.shown
            .as_ref()
            .map(|s| s.animator.strokes())
            .unwrap_or_default()
    }

    /// Select `entry`. Returns the ticket to fetch with, or `None` when no asset path could be
    /// resolved (the view is then `Failed`).
    pub fn show(&mut self, entry: Entry) -> Option<LoadTicket> {
        self.shown = None;
        if let Some(overlay) = &self.overlay {
            overlay.clear();
        }
        let ticket = self.loader.begin(&entry);
        self.entry = Some(entry);
        match ticket {
            Ok(ticket) => {
                self.state = ViewState::Loading;
                Some(ticket)
            }
            Err(e) => {
                tracing::warn!("cannot load diagram: {e}");
                self.state = ViewState::Failed(e.to_string());
                None
            }
        }
    }

    /// Perform the fetch for `ticket`.
    pub fn fetch(&self, ticket: &LoadTicket) -> HitsujunResult<LoadedStrokes> {
        self.loader.fetch(ticket)
    }

    /// Apply a finished load. Returns `false` when the ticket was superseded and the result
    /// dropped.
    pub fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: HitsujunResult<LoadedStrokes>,
    ) -> bool {
        let Some(result) = self.loader.accept(ticket, result) else {
            return false;
        };
        match result {
            Ok(loaded) => {
                self.shown = Some(Shown {
                    surface: DocumentSurface::new(loaded.document),
                    animator: StrokeAnimator::new(loaded.strokes, self.timing),
                });
                self.state = ViewState::Ready;
            }
            Err(e) => {
                tracing::warn!(path = ticket.path(), "diagram load failed: {e}");
                self.state = ViewState::Failed(e.to_string());
            }
        }
        true
    }

    /// `show`, `fetch` and `finish_load` in one call.
    pub fn load(&mut self, entry: Entry) -> &ViewState {
        if let Some(ticket) = self.show(entry) {
            let result = self.fetch(&ticket);
            self.finish_load(&ticket, result);
        }
        &self.state
    }

    /// Start the stroke animation. Freehand drawing is switched off first.
    pub fn play(&mut self) -> bool {
        self.set_overlay_enabled(false);
        let now = self.clock.now();
        match self.shown.as_mut() {
            Some(shown) => shown.animator.play(now, &mut shown.surface),
            None => false,
        }
    }

    /// Request the animation to stop.
    pub fn stop(&mut self) {
        if let Some(shown) = self.shown.as_mut() {
            shown.animator.stop();
        }
    }

    /// Advance the animation to the clock's current time.
    pub fn tick(&mut self) -> AnimatorState {
        let now = self.clock.now();
        match self.shown.as_mut() {
            Some(shown) => shown.animator.tick(now, &mut shown.surface),
            None => AnimatorState::Idle,
        }
    }

    /// When [`StrokeViewer::tick`] next has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.shown.as_ref().and_then(|s| s.animator.next_deadline())
    }

    /// Animator state; idle when nothing is loaded.
    pub fn animator_state(&self) -> AnimatorState {
        self.shown
            .as_ref()
            .map_or(AnimatorState::Idle, |s| s.animator.state())
    }

    /// Pacing used for the next `play`.
    pub fn set_timing(&mut self, timing: AnimationTiming) {
        self.timing = timing;
        if let Some(shown) = self.shown.as_mut() {
            shown.animator.set_timing(timing);
        }
    }

    /// Switch freehand drawing. Turning it on stops the animation first.
    pub fn set_freehand(&mut self, enabled: bool) {
        if enabled {
            self.stop();
        }
        self.set_overlay_enabled(enabled);
    }

    /// Whether freehand drawing is on.
    pub fn is_freehand(&self) -> bool {
        self.overlay.as_ref().is_some_and(FreehandOverlay::is_enabled)
    }

    /// Wipe the freehand ink.
    pub fn clear_ink(&self) {
        if let Some(overlay) = &self.overlay {
            overlay.clear();
        }
    }

    /// Diagram markup as it looks right now.
    pub fn render_markup(&self) -> Option<String> {
        let now = self.clock.now();
        self.shown.as_ref().map(|s| s.surface.render_markup(now))
    }

    fn set_overlay_enabled(&self, enabled: bool) {
        if let Some(overlay) = &self.overlay {
            overlay.set_enabled(enabled);
        }
    }
}

impl<S, C> std::fmt::Debug for StrokeViewer<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeViewer")
            .field("entry", &self.entry.as_ref().map(|e| e.chu.as_str()))
            .field("state", &self.state)
            .field("overlay", &self.overlay)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/viewer.rs"]
mod tests;

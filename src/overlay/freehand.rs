//! Freehand practice overlay.
//!
//! A raster layer laid over the host box. Ink is kept as polylines in box-local CSS pixels and
//! rasterized at the host's pixel density, so it stays crisp when the box or the density
//! changes. Segments are straight lines between sampled pointer positions.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use resvg::tiny_skia;

use crate::assets::color::Rgba8;
use crate::foundation::core::{PixelSize, Point};
use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::overlay::events::{EventChannel, EventHub, HostEvent, ListenerId};
use crate::overlay::host::HostBoxProvider;
use crate::render::raster::FrameRGBA;

/// Ink appearance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InkStyle {
    /// Ink color.
    pub color: Rgba8,
    /// Line width in CSS pixels.
    pub width: f64,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            color: Rgba8::rgb(0x22, 0x22, 0x22),
            width: 6.0,
        }
    }
}

struct OverlayState {
    host: Rc<dyn HostBoxProvider>,
    style: InkStyle,
    enabled: bool,
    size: Option<PixelSize>,
    dpr: f64,
    pixmap: Option<tiny_skia::Pixmap>,
    ink: Vec<Vec<Point>>,
    pen_down: bool,
}

impl OverlayState {
    fn resize(&mut self) {
        if let Err(e) = self.try_resize() {
            tracing::warn!("overlay resize failed: {e}");
        }
    }

    fn try_resize(&mut self) -> HitsujunResult<()> {
        let rect = self.host.bounding_box();
        let dpr = self.host.device_pixel_ratio();
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let size = PixelSize::from_css(rect.size(), dpr)?;
        if self.size == Some(size) && self.dpr == dpr {
            return Ok(());
        }
        let pixmap = tiny_skia::Pixmap::new(size.width, size.height)
            .ok_or_else(|| HitsujunError::configuration("failed to allocate overlay pixmap"))?;
        tracing::debug!(width = size.width, height = size.height, dpr, "overlay resized");
        self.pixmap = Some(pixmap);
        self.size = Some(size);
        self.dpr = dpr;
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        pixmap.fill(tiny_skia::Color::TRANSPARENT);
        for line in &self.ink {
            for pair in line.windows(2) {
                draw_segment(pixmap, self.style, self.dpr, pair[0], pair[1]);
            }
        }
    }

    fn local(&self, client: Point) -> Point {
        let origin = self.host.bounding_box().origin();
        Point::new(client.x - origin.x, client.y - origin.y)
    }

    fn on_pointer(&mut self, event: &HostEvent) {
        if !self.enabled {
            return;
        }
        match *event {
            HostEvent::PointerDown(p) => {
                let p = self.local(p);
                self.ink.push(vec![p]);
                self.pen_down = true;
            }
            HostEvent::PointerMove(p) if self.pen_down => {
                let p = self.local(p);
                let Some(line) = self.ink.last_mut() else {
                    return;
                };
                let Some(&last) = line.last() else {
                    return;
                };
                line.push(p);
                if let Some(pixmap) = self.pixmap.as_mut() {
                    draw_segment(pixmap, self.style, self.dpr, last, p);
                }
            }
            HostEvent::PointerUp(_) | HostEvent::PointerCancel => self.pen_down = false,
            _ => {}
        }
    }
}

fn draw_segment(pixmap: &mut tiny_skia::Pixmap, style: InkStyle, dpr: f64, a: Point, b: Point) {
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to((a.x * dpr) as f32, (a.y * dpr) as f32);
    pb.line_to((b.x * dpr) as f32, (b.y * dpr) as f32);
    let Some(path) = pb.finish() else {
        return;
    };

    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(style.color.r, style.color.g, style.color.b, style.color.a);
    paint.anti_alias = true;
    let stroke = tiny_skia::Stroke {
        width: (style.width * dpr).max(0.0) as f32,
        line_cap: tiny_skia::LineCap::Round,
        line_join: tiny_skia::LineJoin::Round,
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, tiny_skia::Transform::identity(), None);
}

/// Drawing layer owned by one host box.
///
/// Created with [`FreehandOverlay::attach`]; all observers are released by
/// [`FreehandOverlay::dispose`] or on drop. Operations never fail towards the caller.
pub struct FreehandOverlay {
    state: Rc<RefCell<OverlayState>>,
    hub: EventHub,
    listeners: Vec<ListenerId>,
}

impl std::fmt::Debug for FreehandOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FreehandOverlay")
            .field("attached", &self.is_attached())
            .field("enabled", &self.is_enabled())
            .field("size", &self.surface_size())
            .finish()
    }
}

impl FreehandOverlay {
    /// Attach to `host`, sizing the surface and registering resize and pointer observers on `hub`.
    /// The overlay starts disabled.
    pub fn attach(host: Rc<dyn HostBoxProvider>, hub: &EventHub, style: InkStyle) -> Self {
        let state = Rc::new(RefCell::new(OverlayState {
            host,
            style,
            enabled: false,
            size: None,
            dpr: 1.0,
            pixmap: None,
            ink: Vec::new(),
            pen_down: false,
        }));
        state.borrow_mut().resize();

        let listeners = vec![
            hub.subscribe(EventChannel::HostResize, resize_listener(&state)),
            hub.subscribe(EventChannel::WindowResize, resize_listener(&state)),
            hub.subscribe(EventChannel::Pointer, {
                let weak = Rc::downgrade(&state);
                move |event: &HostEvent| with_state(&weak, |s| s.on_pointer(event))
            }),
        ];

        Self {
            state,
            hub: hub.clone(),
            listeners,
        }
    }

    /// Whether observers are still registered.
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Whether pointer input draws.
    pub fn is_enabled(&self) -> bool {
        self.state.borrow().enabled
    }

    /// Turn drawing on or off. Turning it off ends any path in progress.
    pub fn set_enabled(&self, enabled: bool) {
        let mut s = self.state.borrow_mut();
        s.enabled = enabled;
        if !enabled {
            s.pen_down = false;
        }
    }

    /// Ink appearance.
    pub fn style(&self) -> InkStyle {
        self.state.borrow().style
    }

    /// Re-measure the host box now.
    pub fn refresh_size(&self) {
        self.state.borrow_mut().resize();
    }

    /// Current raster size in device pixels.
    pub fn surface_size(&self) -> Option<PixelSize> {
        self.state.borrow().size
    }

    /// Number of ink paths drawn since the last clear.
    pub fn ink_path_count(&self) -> usize {
        self.state.borrow().ink.len()
    }

    /// Wipe all ink.
    pub fn clear(&self) {
        let mut s = self.state.borrow_mut();
        s.ink.clear();
        s.pen_down = false;
        if let Some(pixmap) = s.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::TRANSPARENT);
        }
    }

    /// The ink layer as a premultiplied frame.
    pub fn frame(&self) -> Option<FrameRGBA> {
        let s = self.state.borrow();
        let pixmap = s.pixmap.as_ref()?;
        Some(FrameRGBA {
            width: pixmap.width(),
            height: pixmap.height(),
            data: pixmap.data().to_vec(),
            premultiplied: true,
        })
    }

    /// The ink layer as a straight-alpha image.
    pub fn snapshot(&self) -> Option<image::RgbaImage> {
        match self.frame()?.to_image() {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!("overlay snapshot failed: {e}");
                None
            }
        }
    }

    /// Unregister every observer and release the surface. Idempotent.
    pub fn dispose(&mut self) {
        for id in self.listeners.drain(..) {
            self.hub.unsubscribe(id);
        }
        let mut s = self.state.borrow_mut();
        s.enabled = false;
        s.pen_down = false;
        s.ink.clear();
        s.pixmap = None;
        s.size = None;
    }
}

impl Drop for FreehandOverlay {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn resize_listener(state: &Rc<RefCell<OverlayState>>) -> impl Fn(&HostEvent) + 'static {
    let weak = Rc::downgrade(state);
    move |_| with_state(&weak, OverlayState::resize)
}

fn with_state(weak: &Weak<RefCell<OverlayState>>, f: impl FnOnce(&mut OverlayState)) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    match state.try_borrow_mut() {
        Ok(mut s) => f(&mut s),
        Err(_) => tracing::warn!("overlay busy; event dropped"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/freehand.rs"]
mod tests;

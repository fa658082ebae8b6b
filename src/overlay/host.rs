use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::core::{Point, Rect, Size};

/// Supplies the on-screen box the overlay is laid over.
pub trait HostBoxProvider {
    /// Bounding box in client CSS pixels.
    fn bounding_box(&self) -> Rect;

    /// Device pixels per CSS pixel.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }
}

impl<H: HostBoxProvider + ?Sized> HostBoxProvider for Rc<H> {
    fn bounding_box(&self) -> Rect {
        (**self).bounding_box()
    }

    fn device_pixel_ratio(&self) -> f64 {
        (**self).device_pixel_ratio()
    }
}

/// A host box whose geometry is set by the embedder, e.g. from a layout pass.
#[derive(Debug)]
pub struct SharedHostBox {
    rect: Cell<Rect>,
    dpr: Cell<f64>,
}

impl SharedHostBox {
    /// Box at `origin` with `size`, at the given pixel density.
    pub fn new(origin: Point, size: Size, device_pixel_ratio: f64) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(Rect::from_origin_size(origin, size)),
            dpr: Cell::new(device_pixel_ratio),
        })
    }

    /// Move or resize the box.
    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }

    /// Change the pixel density.
    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        self.dpr.set(dpr);
    }
}

impl HostBoxProvider for SharedHostBox {
    fn bounding_box(&self) -> Rect {
        self.rect.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr.get()
    }
}

use crate::foundation::error::{HitsujunError, HitsujunResult};

pub use kurbo::{BezPath, Point, Rect, Size, Vec2};

/// Raster dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Largest raster edge we are willing to allocate.
    pub const MAX_DIM: u32 = 16_384;

    /// Create a validated, non-empty pixel size.
    pub fn new(width: u32, height: u32) -> HitsujunResult<Self> {
        if width == 0 || height == 0 {
            return Err(HitsujunError::configuration("pixel size must be non-zero"));
        }
        if width > Self::MAX_DIM || height > Self::MAX_DIM {
            return Err(HitsujunError::configuration(format!(
                "pixel size too large: {width}x{height} (max {m}x{m})",
                m = Self::MAX_DIM
            )));
        }
        Ok(Self { width, height })
    }

    /// Device-pixel size of a CSS box at the given pixel density.
    ///
    /// Each edge rounds to the nearest pixel and never drops below one.
    pub fn from_css(css: Size, device_pixel_ratio: f64) -> HitsujunResult<Self> {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        if !css.width.is_finite() || !css.height.is_finite() {
            return Err(HitsujunError::configuration("host box has non-finite size"));
        }
        let to_px = |v: f64| (v.max(0.0) * dpr).round().max(1.0).min(u32::MAX as f64) as u32;
        Self::new(to_px(css.width), to_px(css.height))
    }

    /// Bytes needed for a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

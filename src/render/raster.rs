use std::sync::Arc;

use crate::assets::color::Rgba8;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{HitsujunError, HitsujunResult};
use crate::foundation::math::{mul_div255_u8, unpremul_u8};

/// A rendered frame as RGBA8 pixels.
///
/// Frames produced here are premultiplied; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(size: PixelSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.rgba_len()],
            premultiplied: true,
        }
    }

    /// Frame filled with one colour.
    pub fn solid(size: PixelSize, color: Rgba8) -> Self {
        let px = premul(color);
        let mut data = Vec::with_capacity(size.rgba_len());
        for _ in 0..(size.width as usize * size.height as usize) {
            data.extend_from_slice(&px);
        }
        Self {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        }
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.data.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Source-over `top` onto this frame. Both frames must be premultiplied and the same size.
    pub fn composite_over(&mut self, top: &FrameRGBA) -> HitsujunResult<()> {
        if top.width != self.width || top.height != self.height {
            return Err(HitsujunError::configuration(format!(
                "cannot composite {}x{} over {}x{}",
                top.width, top.height, self.width, self.height
            )));
        }
        if !self.premultiplied || !top.premultiplied {
            return Err(HitsujunError::configuration(
                "composite expects premultiplied frames",
            ));
        }
        for (d, s) in self.data.chunks_exact_mut(4).zip(top.data.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
        Ok(())
    }

    /// Straight-alpha image, ready for encoding.
    pub fn to_image(&self) -> HitsujunResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = px[3];
                for c in &mut px[..3] {
                    *c = unpremul_u8(*c, a);
                }
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| HitsujunError::configuration("frame buffer does not match its size"))
    }
}

fn premul(c: Rgba8) -> [u8; 4] {
    let a = u16::from(c.a);
    [
        mul_div255_u8(u16::from(c.r), a),
        mul_div255_u8(u16::from(c.g), a),
        mul_div255_u8(u16::from(c.b), a),
        c.a,
    ]
}

fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Rasterizes SVG markup with `resvg`.
///
/// Font discovery is done once per rasterizer; stroke-number labels in KanjiVG files are text.
pub struct SvgRasterizer {
    options: usvg::Options<'static>,
}

impl std::fmt::Debug for SvgRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SvgRasterizer")
            .field("faces", &self.options.fontdb.len())
            .finish()
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgRasterizer {
    /// Rasterizer using the system fonts.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::with_fontdb(db)
    }

    /// Rasterizer without any fonts; text is skipped.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(usvg::fontdb::Database::new())
    }

    fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        Self {
            options: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Render `markup` scaled to fill `size`.
    pub fn render(&self, markup: &str, size: PixelSize) -> HitsujunResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(markup, &self.options)
            .map_err(|e| HitsujunError::parse(format!("svg parse failed: {e}")))?;
        let data = rasterize_to_premul_rgba8(&tree, size)?;
        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        })
    }
}

/// One-off render with a fresh [`SvgRasterizer`].
pub fn render_svg_markup(markup: &str, size: PixelSize) -> HitsujunResult<FrameRGBA> {
    SvgRasterizer::new().render(markup, size)
}

fn rasterize_to_premul_rgba8(tree: &usvg::Tree, size: PixelSize) -> HitsujunResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| HitsujunError::configuration("failed to allocate svg pixmap"))?;

    let tree_size = tree.size();
    if !(tree_size.width() > 0.0 && tree_size.height() > 0.0) {
        return Err(HitsujunError::parse("svg has invalid width/height"));
    }
    let sx = (size.width as f32) / tree_size.width();
    let sy = (size.height as f32) / tree_size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

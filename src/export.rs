//! Raster export of a particle field frame.
//!
//! Notes:
//! - Rendering goes through the same [`Surface`] trait as the canvas, backed
//!   by a `tiny_skia::Pixmap`.
//! - Native targets only.

use crate::color::Rgba;
use crate::error::{FxError, Result};
use crate::particles::{ParticleField, Surface};
use tiny_skia::{Color, GradientStop, Paint, Pixmap, Point, RadialGradient, Rect, SpreadMode, Transform};

/// A surface that rasterizes into a pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocates a transparent pixmap. Zero sizes are bumped to one pixel.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width.max(1), height.max(1))
            .ok_or_else(|| FxError::Export(format!("cannot allocate {width}x{height} pixmap")))?;
        Ok(Self { pixmap })
    }

    /// The rendered pixels.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Encodes the pixels as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| FxError::Export(e.to_string()))
    }
}

fn to_color(rgba: Rgba) -> Color {
    Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

impl Surface for PixmapSurface {
    fn set_size(&mut self, width: f32, height: f32) {
        let (w, h) = (width.ceil().max(1.0) as u32, height.ceil().max(1.0) as u32);
        if (w, h) != (self.pixmap.width(), self.pixmap.height()) {
            if let Some(pixmap) = Pixmap::new(w, h) {
                self.pixmap = pixmap;
            }
        }
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        let (Some(rgba), Some(rect)) = (Rgba::parse_css(color), Rect::from_xywh(x, y, w, h)) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner_color: &str, width: f32, height: f32) {
        let Some(inner) = Rgba::parse_css(inner_color) else {
            return;
        };
        let center = Point::from_xy(cx, cy);
        let Some(shader) = RadialGradient::new(
            center,
            center,
            radius,
            vec![
                GradientStop::new(0.0, to_color(inner)),
                GradientStop::new(1.0, to_color(inner.with_alpha(0))),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            return;
        };
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width.max(1.0), height.max(1.0)) else {
            return;
        };
        let paint = Paint {
            shader,
            ..Paint::default()
        };
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

/// Renders the field's current frame to PNG bytes.
pub fn render_png(field: &ParticleField) -> Result<Vec<u8>> {
    let (width, height) = field.size();
    let mut surface = PixmapSurface::new(width.ceil() as u32, height.ceil() as u32)?;
    field.render(&mut surface);
    surface.encode_png()
}

//! egui-backed drawing and palette for the preview window.

use crate::color::Rgba;
use crate::particles::Surface;
use crate::types::{Palette, PaletteSource, Theme};
use eframe::egui;
use std::cell::Cell;
use std::rc::Rc;

/// Number of rings used to approximate a radial gradient.
const GLOW_RINGS: usize = 24;

/// Draws a field into an egui painter, offset by the panel's top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterSurface<'a> {
    /// Wraps `painter`; field coordinates are relative to `origin`.
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }
}

fn to_color32(rgba: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, rgba.a)
}

impl Surface for PainterSurface<'_> {
    // egui repaints from scratch every frame.
    fn clear(&mut self, _width: f32, _height: f32) {}

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        let Some(rgba) = Rgba::parse_css(color) else {
            return;
        };
        let rect = egui::Rect::from_min_size(self.origin + egui::vec2(x, y), egui::vec2(w, h));
        self.painter.rect_filled(rect, 0.0, to_color32(rgba));
    }

    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner_color: &str, _width: f32, _height: f32) {
        let Some(inner) = Rgba::parse_css(inner_color) else {
            return;
        };
        if radius <= 0.0 || inner.a == 0 {
            return;
        }
        // Stacked translucent discs: coverage at distance d grows with the
        // number of rings wider than d, approximating a linear falloff.
        let step = (inner.a as usize).div_ceil(GLOW_RINGS).max(1) as u8;
        let center = self.origin + egui::vec2(cx, cy);
        for ring in 0..GLOW_RINGS {
            let r = radius * (GLOW_RINGS - ring) as f32 / GLOW_RINGS as f32;
            self.painter.circle_filled(center, r, to_color32(inner.with_alpha(step)));
        }
    }
}

/// Fixed palettes per theme, standing in for the page's style sheet.
#[derive(Debug, Clone)]
pub struct ThemePalette {
    theme: Rc<Cell<Theme>>,
}

impl ThemePalette {
    /// Creates a source that follows `theme`.
    pub fn new(theme: Rc<Cell<Theme>>) -> Self {
        Self { theme }
    }
}

impl PaletteSource for ThemePalette {
    fn read_palette(&self) -> Palette {
        match self.theme.get() {
            Theme::Dark => Palette::default(),
            Theme::Light => Palette::new("#d0d7de", "#0969da"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_follows_shared_theme() {
        let theme = Rc::new(Cell::new(Theme::Dark));
        let source = ThemePalette::new(theme.clone());
        assert_eq!(source.read_palette(), Palette::default());

        theme.set(Theme::Light);
        assert_eq!(source.read_palette().point_color, "#d0d7de");
    }
}

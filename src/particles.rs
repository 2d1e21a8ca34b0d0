//! Pointer-reactive particle field.
//!
//! A [`ParticleField`] owns a rectangular grid of [`Point`]s, the latest
//! [`PointerState`] and the [`Palette`] it paints with. Each frame every point
//! is pulled toward the pointer with a quintic falloff and sprung back toward
//! its grid position. Drawing goes through the [`Surface`] trait so the same
//! field renders to a browser canvas, an egui painter or a raster pixmap.

use crate::config::FieldConfig;
use crate::constants::MAX_FRAME_STEP;
use crate::scheduler::Animated;
use crate::theme::ThemeSignal;
use crate::types::{Palette, PaletteSource, Point, PointerState};

/// A drawable 2D target.
pub trait Surface {
    /// Resizes the backing store. Hosts whose size is managed elsewhere can
    /// ignore this.
    fn set_size(&mut self, _width: f32, _height: f32) {}

    /// Clears the whole surface to transparent.
    fn clear(&mut self, width: f32, height: f32);

    /// Fills an axis-aligned rectangle with a CSS color.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);

    /// Fills the surface with a radial gradient from `inner_color` at
    /// `(cx, cy)` to transparent at `radius`.
    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner_color: &str, width: f32, height: f32);
}

/// When the pointer glow is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowMode {
    /// Every frame (full-page background)
    Always,
    /// Only while the pointer is over the surface (section backgrounds)
    WhileHovered,
}

/// Grid of points animated toward the pointer.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    glow: GlowMode,
    width: f32,
    height: f32,
    points: Vec<Point>,
    pointer: PointerState,
    palette: Palette,
    palette_version: u64,
}

impl ParticleField {
    /// Creates a field covering `width` x `height` pixels.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Surface size in pixels
    /// * `config` - Grid spacing, physics and glow settings
    /// * `glow` - Whether the glow follows hover state
    /// * `palette` - Colors read from the styling contract
    pub fn create(width: f32, height: f32, config: FieldConfig, glow: GlowMode, palette: Palette) -> Self {
        let points = build_grid(width, height, config.spacing);
        Self {
            config,
            glow,
            width,
            height,
            points,
            pointer: PointerState::AWAY,
            palette,
            palette_version: 0,
        }
    }

    /// Discards the grid and rebuilds it for the new size with a freshly
    /// read palette.
    pub fn resize(&mut self, width: f32, height: f32, palette: Palette) {
        self.width = width;
        self.height = height;
        self.points = build_grid(width, height, self.config.spacing);
        self.palette = palette;
    }

    /// Records the pointer position in surface coordinates.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = PointerState { x, y };
    }

    /// Moves the pointer to the off-surface sentinel.
    pub fn clear_pointer(&mut self) {
        self.pointer = PointerState::AWAY;
    }

    /// Re-reads the palette when the theme version moved since the last read.
    ///
    /// # Returns
    ///
    /// `true` if the palette was re-read.
    pub fn sync_palette(&mut self, version: u64, source: &dyn PaletteSource) -> bool {
        if version == self.palette_version {
            return false;
        }
        self.palette = source.read_palette();
        self.palette_version = version;
        true
    }

    /// Advances every point by `dt` reference frames (1.0 = one 60 Hz frame).
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_STEP);
        for point in &mut self.points {
            step_point(point, self.pointer, &self.config, dt);
        }
    }

    /// Paints the current frame.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.width, self.height);

        let size = self.config.point_size;
        let half = size / 2.0;
        for point in &self.points {
            let (x, y) = point.current;
            surface.fill_rect(x - half, y - half, size, size, &self.palette.point_color);
        }

        let glow = match self.glow {
            GlowMode::Always => true,
            GlowMode::WhileHovered => self.pointer.is_over(),
        };
        if glow {
            surface.radial_glow(
                self.pointer.x,
                self.pointer.y,
                self.config.glow_radius,
                &self.palette.glow_color(self.config.glow_alpha),
                self.width,
                self.height,
            );
        }
    }

    /// Points in grid order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Latest pointer position.
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Active palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Surface size the grid was built for.
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Builds points at `(i * spacing, j * spacing)` for every position strictly
/// below `size + spacing` on each axis, so the grid overhangs the right and
/// bottom edges by one cell.
fn build_grid(width: f32, height: f32, spacing: f32) -> Vec<Point> {
    if spacing <= 0.0 || !width.is_finite() || !height.is_finite() {
        return Vec::new();
    }
    let count = |extent: f32| {
        let mut n = 0usize;
        while (n as f32) * spacing < extent.max(0.0) + spacing {
            n += 1;
        }
        n
    };
    let (cols, rows) = (count(width), count(height));
    let mut points = Vec::with_capacity(cols * rows);
    for i in 0..cols {
        for j in 0..rows {
            points.push(Point::new(i as f32 * spacing, j as f32 * spacing));
        }
    }
    points
}

/// Applies one update to a single point.
///
/// `force = max(0, (R - dist) / R)`, `power = force^5`, the pull points at
/// the pointer with magnitude `power * strength`, and the point moves by
/// `(origin - current) * spring + pull * pull_gain`, both scaled by `dt`.
pub fn step_point(point: &mut Point, pointer: PointerState, config: &FieldConfig, dt: f32) {
    let dx = pointer.x - point.current.0;
    let dy = pointer.y - point.current.1;
    let dist = (dx * dx + dy * dy).sqrt();

    let force = ((config.radius - dist) / config.radius).max(0.0);
    let power = force.powi(5);

    let angle = dy.atan2(dx);
    let pull_x = angle.cos() * power * config.strength;
    let pull_y = angle.sin() * power * config.strength;

    let (ox, oy) = point.origin;
    let (cx, cy) = point.current;
    point.current.0 = cx + ((ox - cx) * config.spring + pull_x * config.pull_gain) * dt;
    point.current.1 = cy + ((oy - cy) * config.spring + pull_y * config.pull_gain) * dt;
}

/// A field bound to its surface, its palette source and the theme signal.
/// This is the unit the frame scheduler drives.
pub struct FieldRenderer<S: Surface, P: PaletteSource> {
    field: ParticleField,
    surface: S,
    source: P,
    signal: ThemeSignal,
}

impl<S: Surface, P: PaletteSource> FieldRenderer<S, P> {
    /// Creates the renderer and reads the palette once.
    pub fn new(
        mut surface: S,
        source: P,
        signal: ThemeSignal,
        width: f32,
        height: f32,
        config: FieldConfig,
        glow: GlowMode,
    ) -> Self {
        surface.set_size(width, height);
        let mut field = ParticleField::create(width, height, config, glow, source.read_palette());
        field.palette_version = signal.version();
        Self {
            field,
            surface,
            source,
            signal,
        }
    }

    /// Resizes the surface and rebuilds the grid.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.set_size(width, height);
        self.field.resize(width, height, self.source.read_palette());
    }

    /// The field being animated.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Mutable access for pointer updates.
    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    /// The surface being painted.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: Surface, P: PaletteSource> Animated for FieldRenderer<S, P> {
    fn frame(&mut self, dt: f32) {
        self.field.sync_palette(self.signal.version(), &self.source);
        self.field.update(dt);
        self.field.render(&mut self.surface);
    }
}

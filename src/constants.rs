//! Shared application-wide constants.
//! Centralizes the tuning values and markup names used across the behaviors.

// Particle field
/// Distance between neighbouring grid points, in surface pixels.
pub const GRID_SPACING: f32 = 40.0;
/// Pointer distance beyond which a point feels no attraction.
pub const INTERACTION_RADIUS: f32 = 500.0;
/// Peak attraction displacement applied when the pointer sits on a point.
pub const PULL_STRENGTH: f32 = 60.0;
/// Fraction of the attraction displacement applied per frame.
pub const PULL_GAIN: f32 = 0.3;
/// Fraction of the distance back to the origin recovered per frame.
pub const SPRING_RATE: f32 = 0.05;
/// Edge length of the square drawn for each point.
pub const POINT_SIZE: f32 = 2.0;
/// Radius of the pointer glow gradient.
pub const GLOW_RADIUS: f32 = 200.0;
/// Alpha appended to the accent color at the glow center.
pub const GLOW_ALPHA: u8 = 0x22;
/// Off-surface pointer position used before the first move and after leave.
pub const POINTER_AWAY: f32 = -1000.0;
/// Upper bound for the frame step passed to the field update.
pub const MAX_FRAME_STEP: f32 = 3.0;
/// Duration of one reference frame in milliseconds (60 Hz).
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

// Carousel
/// Lowest relative left edge at which a card still counts as visible.
pub const VISIBLE_MIN_LEFT: f64 = -50.0;
/// Half-width of the band around the strip start used by the nav buttons.
pub const NAV_TOLERANCE: f64 = 10.0;
/// Extra scroll past the trailing edge of the next card.
pub const NEXT_SCROLL_PADDING: f64 = 20.0;
/// Delay before re-reading the description after a navigation scroll.
pub const SETTLE_DELAY_MS: f64 = 400.0;

// Smooth scroll
/// Duration of a tweened scroll where the host has no native smooth scroll.
pub const SCROLL_TWEEN_MS: f64 = 450.0;

// Preferences and styling
/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "theme";
/// Class set on the document body while the light theme is active.
pub const LIGHT_MODE_CLASS: &str = "light-mode";
/// Style property resolved for the point color.
pub const POINT_COLOR_PROPERTY: &str = "--border-color";
/// Style property resolved for the accent (glow) color.
pub const ACCENT_COLOR_PROPERTY: &str = "--primary-color";
/// Point color used until the styling contract is read.
pub const DEFAULT_POINT_COLOR: &str = "#30363d";
/// Accent color used until the styling contract is read.
pub const DEFAULT_ACCENT_COLOR: &str = "#3794ff";
/// Class applied to the last card while it is the current card.
pub const FULL_WIDTH_CLASS: &str = "full-width";

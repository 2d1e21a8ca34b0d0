//! Tunable settings for every behavior.
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON document only
//! needs the fields it overrides.

use crate::constants::*;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Particle field settings, shared by every renderer instance
    pub field: FieldConfig,
    /// Carousel heuristics and the strip/description bindings
    pub carousel: CarouselConfig,
    /// Smooth scroll settings
    pub scroll: ScrollConfig,
}

impl FxConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Particle field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Grid spacing in pixels
    pub spacing: f32,
    /// Interaction radius in pixels
    pub radius: f32,
    /// Peak attraction displacement
    pub strength: f32,
    /// Share of the attraction applied per frame
    pub pull_gain: f32,
    /// Share of the way back to the origin recovered per frame
    pub spring: f32,
    /// Edge length of a drawn point
    pub point_size: f32,
    /// Radius of the pointer glow
    pub glow_radius: f32,
    /// Alpha of the glow center
    pub glow_alpha: u8,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spacing: GRID_SPACING,
            radius: INTERACTION_RADIUS,
            strength: PULL_STRENGTH,
            pull_gain: PULL_GAIN,
            spring: SPRING_RATE,
            point_size: POINT_SIZE,
            glow_radius: GLOW_RADIUS,
            glow_alpha: GLOW_ALPHA,
        }
    }
}

/// One carousel strip and the panel that describes its current card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselBinding {
    /// Element id of the scrolling strip
    pub strip: String,
    /// Element id of the description panel
    pub description: String,
}

impl CarouselBinding {
    /// Creates a binding between a strip id and a description panel id.
    pub fn new(strip: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            strip: strip.into(),
            description: description.into(),
        }
    }
}

/// Carousel heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Lowest relative left edge counted as visible by the description update
    pub visible_min: f64,
    /// Half-width of the band the navigation buttons use to find the current card
    pub nav_tolerance: f64,
    /// Padding added past the next card's trailing edge
    pub next_padding: f64,
    /// Delay before the description is recomputed after a navigation click
    pub settle_ms: f64,
    /// Strips to bind
    pub bindings: Vec<CarouselBinding>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            visible_min: VISIBLE_MIN_LEFT,
            nav_tolerance: NAV_TOLERANCE,
            next_padding: NEXT_SCROLL_PADDING,
            settle_ms: SETTLE_DELAY_MS,
            bindings: vec![
                CarouselBinding::new("portfolio-carousel", "portfolio-description"),
                CarouselBinding::new("cert-carousel", "cert-description"),
                CarouselBinding::new("video-carousel", "video-description"),
            ],
        }
    }
}

/// Smooth scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Duration of a tweened scroll in milliseconds
    pub tween_ms: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            tween_ms: SCROLL_TWEEN_MS,
        }
    }
}

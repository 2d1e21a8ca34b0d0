//! Core data types shared by the behaviors.
//!
//! This module defines the theme preference, the palette read from the styling
//! contract, particle points and pointer state, and the card data carried by
//! the markup.

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// The visual mode of the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background, moon icon on the toggle
    Light,
    /// Dark background, sun icon on the toggle (default)
    #[default]
    Dark,
}

impl Theme {
    /// Parses a stored preference. Anything other than `"light"` or `"dark"`
    /// is treated as absent.
    pub fn from_preference(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The value written to the preference store.
    pub fn as_preference(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The opposite mode.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The icon the toggle control shows while this mode is active.
    pub fn icon(self) -> ThemeIcon {
        match self {
            Theme::Light => ThemeIcon::Moon,
            Theme::Dark => ThemeIcon::Sun,
        }
    }
}

/// Icon displayed on the theme toggle control. It names the mode a click
/// switches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeIcon {
    /// Shown in light mode
    Moon,
    /// Shown in dark mode
    Sun,
}

impl ThemeIcon {
    /// Icon-font class list for the markup.
    pub fn css_class(self) -> &'static str {
        match self {
            ThemeIcon::Moon => "fas fa-moon",
            ThemeIcon::Sun => "fas fa-sun",
        }
    }

    /// Plain glyph for hosts without the icon font.
    pub fn glyph(self) -> &'static str {
        match self {
            ThemeIcon::Moon => "🌙",
            ThemeIcon::Sun => "☀",
        }
    }
}

/// Colors a particle field paints with.
///
/// Values are CSS color strings exactly as resolved from the styling
/// contract. An empty string is accepted and draws nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Fill color of the grid points
    pub point_color: String,
    /// Color at the center of the pointer glow
    pub accent_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            point_color: DEFAULT_POINT_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
        }
    }
}

impl Palette {
    /// Creates a palette from the two resolved style values.
    pub fn new(point_color: impl Into<String>, accent_color: impl Into<String>) -> Self {
        Self {
            point_color: point_color.into().trim().to_string(),
            accent_color: accent_color.into().trim().to_string(),
        }
    }

    /// Inner glow color: the accent with a two-digit hex alpha appended.
    pub fn glow_color(&self, alpha: u8) -> String {
        format!("{}{:02x}", self.accent_color, alpha)
    }
}

/// Anything that can resolve the current palette, such as the document's
/// computed style or a fixed table per theme.
pub trait PaletteSource {
    /// Reads the palette for whatever mode is currently applied.
    fn read_palette(&self) -> Palette;
}

/// A single grid point of a particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Grid position; fixed for the lifetime of the point
    pub origin: (f32, f32),
    /// Displayed position, updated every frame
    pub current: (f32, f32),
}

impl Point {
    /// Creates a point resting at its grid position.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            origin: (x, y),
            current: (x, y),
        }
    }

    /// Distance between the displayed position and the grid position.
    pub fn displacement(&self) -> f32 {
        let dx = self.current.0 - self.origin.0;
        let dy = self.current.1 - self.origin.1;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Most recent pointer position relative to a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Horizontal position in surface pixels
    pub x: f32,
    /// Vertical position in surface pixels
    pub y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::AWAY
    }
}

impl PointerState {
    /// Sentinel used before the pointer first moves and after it leaves.
    pub const AWAY: PointerState = PointerState {
        x: POINTER_AWAY,
        y: POINTER_AWAY,
    };

    /// Whether the pointer is inside the positive quadrant of the surface.
    pub fn is_over(&self) -> bool {
        self.x > 0.0 && self.y > 0.0
    }
}

/// Media shown by a card's preview.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (default for any unrecognized type)
    #[default]
    Image,
    /// Video played in the modal
    Video,
}

impl MediaKind {
    /// Parses a `data-type` attribute value.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("video") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

/// Read-only data of one carousel card, taken from its markup attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Whether the preview is an image or a video
    #[serde(default, rename = "type")]
    pub kind: MediaKind,
    /// Media URL
    #[serde(default, rename = "src")]
    pub media_source: String,
    /// Title shown in the description panel and the modal
    #[serde(default)]
    pub title: String,
    /// Body text shown in the description panel and the modal
    #[serde(default, rename = "desc")]
    pub description: String,
}

impl Card {
    /// Builds a card from an attribute getter. `attr` receives the attribute
    /// name without the `data-` prefix. Missing attributes read as empty.
    pub fn from_attributes(attr: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            kind: MediaKind::from_attribute(attr("type").as_deref()),
            media_source: attr("src").unwrap_or_default(),
            title: attr("title").unwrap_or_default(),
            description: attr("desc").unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_theme_preference_round_trip_and_unknown() {
        assert_eq!(Theme::from_preference("light"), Some(Theme::Light));
        assert_eq!(Theme::from_preference("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_preference("sepia"), None);
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_preference(), "light");
    }

    #[test]
    fn test_icon_names_target_mode() {
        assert_eq!(Theme::Light.icon().css_class(), "fas fa-moon");
        assert_eq!(Theme::Dark.icon().css_class(), "fas fa-sun");
    }

    #[test]
    fn test_glow_color_appends_alpha() {
        let palette = Palette::new(" #30363d ", "#3794ff\n");
        assert_eq!(palette.point_color, "#30363d");
        assert_eq!(palette.glow_color(0x22), "#3794ff22");
        assert_eq!(Palette::new("", "").glow_color(0x22), "22");
    }

    #[test]
    fn test_card_from_attributes() {
        let attrs: HashMap<&str, &str> = [
            ("type", "video"),
            ("src", "media/demo.mp4"),
            ("title", "Demo"),
        ]
        .into_iter()
        .collect();
        let card = Card::from_attributes(|name| attrs.get(name).map(|v| v.to_string()));
        assert_eq!(card.kind, MediaKind::Video);
        assert_eq!(card.media_source, "media/demo.mp4");
        assert_eq!(card.title, "Demo");
        assert_eq!(card.description, "");

        let fallback = Card::from_attributes(|name| (name == "type").then(|| "gif".to_string()));
        assert_eq!(fallback.kind, MediaKind::Image);
    }

    #[test]
    fn test_pointer_away_is_not_over() {
        assert!(!PointerState::default().is_over());
        assert!(PointerState { x: 3.0, y: 4.0 }.is_over());
        assert!(!PointerState { x: 0.0, y: 4.0 }.is_over());
    }
}

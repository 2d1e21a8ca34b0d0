//! # Portfolio FX
//!
//! Client-side behaviors for a static portfolio page:
//! - **Theme**: light/dark toggle persisted under one preference key
//! - **Particle field**: pointer-reactive dot grid painted behind the page
//!   and behind each content section
//! - **Smooth scroll**: animated in-page anchor navigation
//! - **Carousels**: card strips with prev/next buttons and a description panel
//! - **Modal**: shared lightbox previewing a card's image or video
//!
//! ## Targets
//! - `wasm32`: the `web` module binds everything to the live document on load.
//! - Native: a desktop preview window ([`run_app`]) drives the same
//!   controllers with egui and can export the background to PNG.

#![warn(missing_docs)]
#![cfg_attr(not(target_arch = "wasm32"), deny(unsafe_code))]

pub mod carousel;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod modal;
pub mod particles;
pub mod scheduler;
pub mod scroll;
pub mod theme;
pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod content;
#[cfg(not(target_arch = "wasm32"))]
pub mod export;
#[cfg(not(target_arch = "wasm32"))]
mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::FxConfig;
pub use error::{FxError, Result};
pub use types::*;

#[cfg(not(target_arch = "wasm32"))]
pub use ui::PreviewApp;

/// Opens the preview window.
///
/// # Arguments
///
/// * `config` - Settings for the field, carousel and scroll animation
///
/// # Returns
///
/// Returns `Ok(())` when the window closes, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use portfolio_fx::{run_app, FxConfig};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(FxConfig::default())
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app(config: FxConfig) -> std::result::Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Portfolio FX Preview",
        options,
        Box::new(move |cc| {
            let saved = cc
                .storage
                .and_then(|storage| storage.get_string(constants::THEME_KEY));
            Ok(Box::new(PreviewApp::new(config, saved)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = FxConfig::default();
        assert_eq!(config.field.spacing, constants::GRID_SPACING);
        assert_eq!(config.carousel.settle_ms, constants::SETTLE_DELAY_MS);
        assert_eq!(config.carousel.bindings.len(), 3);
    }

    #[test]
    fn test_theme_preference_values() {
        assert_eq!(Theme::from_preference("light"), Some(Theme::Light));
        assert_eq!(Theme::default().as_preference(), "dark");
    }
}

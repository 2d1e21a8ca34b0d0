//! State structures for the preview window.

use super::painter::ThemePalette;
use crate::carousel::{Carousel, VirtualStrip};
use crate::config::FxConfig;
use crate::constants::THEME_KEY;
use crate::content::showcase_deck;
use crate::modal::{ModalController, ModalView};
use crate::particles::{GlowMode, ParticleField};
use crate::scheduler::{Animated, Scheduler};
use crate::theme::{MemoryStore, ThemeController, ThemeSignal};
use crate::types::{MediaKind, PaletteSource, Theme};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Field size until the first frame fits it to the panel.
pub const INITIAL_FIELD_SIZE: (f32, f32) = (1200.0, 800.0);
/// Width of the carousel viewport in points.
pub const STRIP_WIDTH: f64 = 640.0;
/// Width of one carousel card.
pub const CARD_WIDTH: f64 = 620.0;
/// Space after each carousel card.
pub const CARD_GAP: f64 = 20.0;

/// The particle field plus what it needs to follow the theme.
///
/// Painting happens in the panel each frame, so the scheduler only advances
/// the physics.
pub struct FieldState {
    /// The animated grid
    pub field: ParticleField,
    source: ThemePalette,
    signal: ThemeSignal,
}

impl FieldState {
    /// Creates the full-window field.
    pub fn new(config: &FxConfig, source: ThemePalette, signal: ThemeSignal) -> Self {
        let (width, height) = INITIAL_FIELD_SIZE;
        let field = ParticleField::create(width, height, config.field.clone(), GlowMode::Always, source.read_palette());
        Self { field, source, signal }
    }

    /// Rebuilds the grid when the panel size changed.
    pub fn fit(&mut self, width: f32, height: f32) {
        if self.field.size() != (width, height) {
            self.field.resize(width, height, self.source.read_palette());
        }
    }
}

impl Animated for FieldState {
    fn frame(&mut self, dt: f32) {
        self.field.sync_palette(self.signal.version(), &self.source);
        self.field.update(dt);
    }
}

/// What the modal window currently shows.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EguiModalView {
    /// Whether the window is shown
    pub visible: bool,
    /// Heading text
    pub title: String,
    /// Body text
    pub description: String,
    /// Kind and source of the previewed media
    pub media: Option<(MediaKind, String)>,
    /// Whether the previewed video is playing
    pub playing: bool,
}

impl ModalView for EguiModalView {
    fn set_text(&mut self, title: &str, description: &str) {
        self.title = title.to_owned();
        self.description = description.to_owned();
    }

    fn show_image(&mut self, src: &str) {
        self.media = Some((MediaKind::Image, src.to_owned()));
        self.playing = false;
    }

    fn show_video(&mut self, src: &str) {
        self.media = Some((MediaKind::Video, src.to_owned()));
        self.playing = true;
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn pause_video(&mut self) {
        self.playing = false;
    }
}

/// Messages sent from the async export task back to the app.
#[derive(Debug)]
pub enum ExportResult {
    /// PNG written to the given path
    Saved(String),
    /// Export failed with an error message
    Failed(String),
}

/// The preview application.
pub struct PreviewApp {
    /// Theme mode and its preference
    pub theme: ThemeController<MemoryStore>,
    /// Theme shared with the palette source
    pub active_theme: Rc<Cell<Theme>>,
    /// Full-window background
    pub field: Rc<RefCell<FieldState>>,
    /// The showcase carousel
    pub carousel: Rc<RefCell<Carousel<VirtualStrip>>>,
    /// Media lightbox
    pub modal: ModalController<EguiModalView>,
    /// Frame and timer driver
    pub scheduler: RefCell<Scheduler>,
    /// Last export outcome shown in the top bar
    pub status: Option<String>,
    /// Sender handed to export tasks
    pub export_sender: Sender<ExportResult>,
    /// Receiver polled every frame
    pub export_receiver: Receiver<ExportResult>,
}

impl PreviewApp {
    /// Builds the app, seeding the theme from a previously saved preference.
    ///
    /// # Arguments
    ///
    /// * `config` - Field, carousel and scroll settings
    /// * `saved_theme` - The `"theme"` value from eframe storage, if any
    pub fn new(config: FxConfig, saved_theme: Option<String>) -> Self {
        let store = match saved_theme {
            Some(value) => MemoryStore::with_entry(THEME_KEY, &value),
            None => MemoryStore::new(),
        };
        let signal = ThemeSignal::new();
        let theme = ThemeController::init(store, signal.clone());
        let active_theme = Rc::new(Cell::new(theme.theme()));

        let field = Rc::new(RefCell::new(FieldState::new(
            &config,
            ThemePalette::new(active_theme.clone()),
            signal,
        )));
        let mut scheduler = Scheduler::new();
        scheduler.register(field.clone());

        let strip = VirtualStrip::new(showcase_deck(), STRIP_WIDTH, CARD_WIDTH, CARD_GAP, config.scroll.tween_ms);
        let mut carousel = Carousel::new("showcase", strip, config.carousel.clone());
        carousel.update_description();

        let (export_sender, export_receiver) = channel();
        Self {
            theme,
            active_theme,
            field,
            carousel: Rc::new(RefCell::new(carousel)),
            modal: ModalController::new(EguiModalView::default()),
            scheduler: RefCell::new(scheduler),
            status: None,
            export_sender,
            export_receiver,
        }
    }

    /// Flips the theme and lets the field pick up the new palette.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggle();
        self.active_theme.set(theme);
        theme
    }
}

impl Default for PreviewApp {
    fn default() -> Self {
        Self::new(FxConfig::default(), None)
    }
}

use super::*;
use crate::content::showcase_deck;
use crate::modal::ModalState;
use crate::theme::PreferenceStore;
use crate::types::PointerState;
use eframe::egui;
use std::collections::HashMap;

/// Run a single headless egui frame with the provided input events and closure.
fn run_ui_with(ctx: &egui::Context, events: Vec<egui::Event>, mut f: impl FnMut(&egui::Context)) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));
    raw.events = events;

    ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        f(ctx);
    })
}

fn escape_event() -> egui::Event {
    egui::Event::Key {
        key: egui::Key::Escape,
        physical_key: Some(egui::Key::Escape),
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

/// In-memory stand-in for eframe's persisted key-value storage.
#[derive(Default)]
struct MapStorage(HashMap<String, String>);

impl eframe::Storage for MapStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {}
}

#[test]
fn preview_starts_dark_without_saved_preference() {
    let app = PreviewApp::default();
    assert_eq!(app.theme.theme(), Theme::Dark);
    assert_eq!(app.field.borrow().field.palette().point_color, "#30363d");
}

#[test]
fn saved_light_preference_is_restored() {
    let app = PreviewApp::new(Default::default(), Some("light".into()));
    assert_eq!(app.theme.theme(), Theme::Light);
    assert_eq!(app.field.borrow().field.palette().point_color, "#d0d7de");
}

#[test]
fn theme_toggle_recolors_field_on_next_tick() {
    let mut app = PreviewApp::default();
    app.toggle_theme();

    // Nothing is re-read until the scheduler drives the field.
    assert_eq!(app.field.borrow().field.palette().point_color, "#30363d");
    app.advance(0.0);
    assert_eq!(app.field.borrow().field.palette().point_color, "#d0d7de");
    assert_eq!(app.theme.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn save_persists_theme_for_next_launch() {
    let mut app = PreviewApp::default();
    app.toggle_theme();

    let mut storage = MapStorage::default();
    eframe::App::save(&mut app, &mut storage);
    let saved = eframe::Storage::get_string(&storage, THEME_KEY);
    assert_eq!(saved.as_deref(), Some("light"));

    let relaunched = PreviewApp::new(Default::default(), saved);
    assert_eq!(relaunched.theme.theme(), Theme::Light);
}

#[test]
fn hovering_background_moves_pointer_and_leaving_clears_it() {
    let mut app = PreviewApp::default();
    let ctx = egui::Context::default();
    let pos = egui::pos2(600.0, 400.0);

    // Two frames so hit-testing knows the background's rect.
    for _ in 0..2 {
        let _ = run_ui_with(&ctx, vec![egui::Event::PointerMoved(pos)], |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                app.draw_background(ui);
            });
        });
    }
    assert!(app.field.borrow().field.pointer().is_over());

    let _ = run_ui_with(&ctx, vec![egui::Event::PointerGone], |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_background(ui);
        });
    });
    assert_eq!(app.field.borrow().field.pointer(), PointerState::AWAY);
}

#[test]
fn background_grid_fits_panel() {
    let mut app = PreviewApp::default();
    let ctx = egui::Context::default();
    let _ = run_ui_with(&ctx, Vec::new(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_background(ui);
        });
    });

    let (width, height) = app.field.borrow().field.size();
    assert!(width > 0.0 && width <= 1200.0);
    assert!(height > 0.0 && height <= 800.0);
}

#[test]
fn next_button_scrolls_and_describes_following_card() {
    let mut app = PreviewApp::default();
    app.advance(0.0);
    assert_eq!(app.carousel.borrow().surface().description().0, "Flow Editor");

    navigate_and_settle(&app.carousel, Direction::Next, &app.scheduler, 0.0);
    app.advance(450.0);

    let carousel = app.carousel.borrow();
    assert_eq!(carousel.surface().scroll_left(), 640.0);
    assert_eq!(carousel.surface().description().0, "Terrain Generator");
}

#[test]
fn escape_closes_modal_and_pauses_video() {
    let mut app = PreviewApp::default();
    let video = showcase_deck().remove(1);
    app.modal.open(video);
    assert!(app.modal.view().playing);

    let ctx = egui::Context::default();
    let _ = run_ui_with(&ctx, vec![escape_event()], |ctx| {
        app.handle_escape(ctx);
        app.draw_modal(ctx);
    });

    assert_eq!(app.modal.state(), &ModalState::Closed);
    assert!(!app.modal.view().visible);
    assert!(!app.modal.view().playing);
}

#[test]
fn escape_with_modal_closed_changes_nothing() {
    let mut app = PreviewApp::default();
    let before = app.modal.view().clone();

    let ctx = egui::Context::default();
    let _ = run_ui_with(&ctx, vec![escape_event()], |ctx| {
        app.handle_escape(ctx);
    });

    assert_eq!(app.modal.view(), &before);
    assert!(!app.modal.is_open());
}

#[test]
fn full_update_frame_runs_headless() {
    let mut app = PreviewApp::default();
    let ctx = egui::Context::default();
    let deck = showcase_deck();
    app.modal.open(deck[0].clone());

    for _ in 0..3 {
        let _ = run_ui_with(&ctx, Vec::new(), |ctx| {
            app.handle_escape(ctx);
            app.advance(ctx.input(|i| i.time) * 1000.0);
            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| app.draw_top_bar(ui));
            egui::TopBottomPanel::bottom("carousel").show(ctx, |ui| app.draw_carousel(ui));
            egui::CentralPanel::default().show(ctx, |ui| app.draw_background(ui));
            app.draw_modal(ctx);
        });
    }

    assert!(app.modal.is_open());
    assert_eq!(app.modal.view().title, "Flow Editor");
    assert_eq!(app.scheduler.borrow().participants(), 1);
}

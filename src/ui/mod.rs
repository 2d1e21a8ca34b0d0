//! Desktop preview of the page behaviors.
//!
//! The same controllers the page mounts are driven here against egui: the
//! particle background fills the central panel, the theme toggle and frame
//! export sit in the top bar, and the showcase carousel with its description
//! sits in the bottom panel. Clicking a card opens the modal window.
//!
//! # Module Organization
//!
//! - `state` - The `PreviewApp` struct and its egui-side views
//! - `painter` - `Surface` over an egui painter and the per-theme palette
//! - `export` - PNG export of the current frame

mod export;
mod painter;
mod state;

pub use state::PreviewApp;

use self::painter::PainterSurface;
use self::state::{CARD_WIDTH, STRIP_WIDTH};
use crate::carousel::{navigate_and_settle, CarouselSurface, Direction};
use crate::constants::THEME_KEY;
use crate::modal::ESCAPE_KEY;
use crate::scheduler::run_tick;
use crate::types::{MediaKind, Theme};
use eframe::egui;

/// Height of the carousel strip.
const CARD_HEIGHT: f32 = 120.0;

impl eframe::App for PreviewApp {
    /// Persist the theme preference between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(THEME_KEY, self.theme.theme().as_preference().to_owned());
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = match self.theme.theme() {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);

        self.poll_export_results();
        self.handle_escape(ctx);
        self.advance(ctx.input(|i| i.time) * 1000.0);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.draw_top_bar(ui);
        });
        egui::TopBottomPanel::bottom("carousel").show(ctx, |ui| {
            self.draw_carousel(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_background(ui);
        });
        self.draw_modal(ctx);

        // The field animates continuously.
        ctx.request_repaint();
    }
}

impl PreviewApp {
    /// Runs due timers, steps the field and moves the carousel's smooth scroll.
    ///
    /// A strip that moved counts as a scroll event and refreshes the
    /// description, like the page's scroll listener.
    pub fn advance(&mut self, now_ms: f64) {
        run_tick(&self.scheduler, now_ms);
        let mut carousel = self.carousel.borrow_mut();
        if carousel.surface_mut().tick(now_ms) {
            carousel.update_description();
        }
    }

    fn handle_escape(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.modal.handle_key(ESCAPE_KEY);
        }
    }

    fn draw_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Portfolio preview");
            ui.separator();
            let icon = self.theme.icon();
            if ui.button(icon.glyph()).on_hover_text("Toggle theme").clicked() {
                self.toggle_theme();
            }
            if ui.button("Export frame").clicked() {
                self.export_frame();
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }

    fn draw_background(&mut self, ui: &mut egui::Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let mut state = self.field.borrow_mut();
        state.fit(rect.width(), rect.height());
        match response.hover_pos() {
            Some(pos) => state.field.set_pointer(pos.x - rect.min.x, pos.y - rect.min.y),
            None => state.field.clear_pointer(),
        }
        let painter = ui.painter_at(rect);
        state.field.render(&mut PainterSurface::new(&painter, rect.min));
    }

    fn draw_carousel(&mut self, ui: &mut egui::Ui) {
        let now_ms = ui.input(|i| i.time) * 1000.0;
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                navigate_and_settle(&self.carousel, Direction::Prev, &self.scheduler, now_ms);
            }
            self.draw_strip(ui);
            if ui.button("▶").clicked() {
                navigate_and_settle(&self.carousel, Direction::Next, &self.scheduler, now_ms);
            }
        });

        let carousel = self.carousel.borrow();
        let (title, body) = carousel.surface().description();
        ui.strong(title);
        ui.label(body);
    }

    fn draw_strip(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(STRIP_WIDTH as f32, CARD_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        let painter = ui.painter_at(rect);
        let visuals = ui.visuals().clone();

        let mut carousel = self.carousel.borrow_mut();
        if response.hovered() {
            let delta = ui.input(|i| i.smooth_scroll_delta);
            let delta = if delta.x != 0.0 { delta.x } else { delta.y };
            if delta != 0.0 {
                carousel.surface_mut().scroll_by(-delta as f64);
                carousel.update_description();
            }
        }

        let layout = carousel.surface().layout();
        let mut clicked = None;
        for (index, card) in layout.cards.iter().enumerate() {
            let card_rect = egui::Rect::from_min_size(
                egui::pos2(rect.min.x + card.left as f32, rect.min.y),
                egui::vec2(CARD_WIDTH as f32, CARD_HEIGHT),
            );
            if !card_rect.intersects(rect) {
                continue;
            }
            let Some(data) = carousel.surface().card(index) else {
                continue;
            };
            let fill = match data.kind {
                MediaKind::Image => visuals.faint_bg_color,
                MediaKind::Video => visuals.extreme_bg_color,
            };
            painter.rect_filled(card_rect, 6.0, fill);
            if carousel.surface().is_full_width(index) {
                painter.rect_stroke(card_rect, 6.0, visuals.selection.stroke, egui::StrokeKind::Inside);
            }
            painter.text(
                card_rect.center(),
                egui::Align2::CENTER_CENTER,
                &data.title,
                egui::FontId::proportional(16.0),
                visuals.text_color(),
            );
            if response.clicked()
                && response
                    .interact_pointer_pos()
                    .is_some_and(|pos| card_rect.contains(pos))
            {
                clicked = Some(data);
            }
        }
        drop(carousel);

        if let Some(card) = clicked {
            self.modal.open(card);
        }
    }

    fn draw_modal(&mut self, ctx: &egui::Context) {
        if !self.modal.is_open() {
            return;
        }
        let view = self.modal.view().clone();
        let screen = ctx.input(|i| i.screen_rect());

        let backdrop = egui::Area::new(egui::Id::new("modal_backdrop"))
            .fixed_pos(screen.min)
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                let response = ui.allocate_rect(screen, egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(180));
                response
            })
            .inner;

        let mut close = false;
        egui::Window::new(view.title.as_str())
            .id(egui::Id::new("modal_window"))
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                match &view.media {
                    Some((MediaKind::Image, src)) => {
                        ui.label(format!("🖼 {src}"));
                    }
                    Some((MediaKind::Video, src)) => {
                        let state = if view.playing { "playing" } else { "paused" };
                        ui.label(format!("🎬 {src} ({state})"));
                    }
                    None => {}
                }
                ui.label(&view.description);
                close = ui.button("Close").clicked();
            });

        if close {
            self.modal.close();
        } else if backdrop.clicked() {
            self.modal.handle_click(true);
        }
    }
}

#[cfg(test)]
mod tests;

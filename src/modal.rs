//! Shared media lightbox.
//!
//! One overlay previews the clicked card's image or video. Close button,
//! backdrop click and the escape key all funnel into [`ModalController::close`].

use crate::types::{Card, MediaKind};

/// Key that closes the modal.
pub const ESCAPE_KEY: &str = "Escape";

/// The overlay's elements.
pub trait ModalView {
    /// Writes the title and description.
    fn set_text(&mut self, title: &str, description: &str);

    /// Shows the image element with `src` and hides the video element.
    fn show_image(&mut self, src: &str);

    /// Shows the video element, sets its source to `src` and reloads it, and
    /// hides the image element.
    fn show_video(&mut self, src: &str);

    /// Shows or hides the overlay.
    fn set_overlay_visible(&mut self, visible: bool);

    /// Pauses the video element. Must be harmless when already paused.
    fn pause_video(&mut self);
}

/// Which card, if any, the modal is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    /// Overlay hidden
    #[default]
    Closed,
    /// Overlay shown for this card
    Open(Card),
}

/// Drives a [`ModalView`].
pub struct ModalController<V: ModalView> {
    view: V,
    state: ModalState,
}

impl<V: ModalView> ModalController<V> {
    /// Creates a closed modal.
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: ModalState::Closed,
        }
    }

    /// Shows `card`, replacing whatever was shown before.
    pub fn open(&mut self, card: Card) {
        // A video left playing from the previous card would keep its audio.
        if self.video_visible() {
            self.view.pause_video();
        }

        self.view.set_text(&card.title, &card.description);
        match card.kind {
            MediaKind::Video => self.view.show_video(&card.media_source),
            MediaKind::Image => self.view.show_image(&card.media_source),
        }
        self.view.set_overlay_visible(true);
        log::debug!("Modal opened: {}", card.title);
        self.state = ModalState::Open(card);
    }

    /// Hides the overlay and pauses a visible video.
    ///
    /// # Returns
    ///
    /// `false` if the modal was already closed (nothing happens).
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.view.set_overlay_visible(false);
        if self.video_visible() {
            self.view.pause_video();
        }
        self.state = ModalState::Closed;
        true
    }

    /// Handles a keydown anywhere in the document.
    pub fn handle_key(&mut self, key: &str) -> bool {
        key == ESCAPE_KEY && self.close()
    }

    /// Handles a click anywhere in the window; only clicks whose target is
    /// the overlay backdrop itself close the modal.
    pub fn handle_click(&mut self, target_is_backdrop: bool) -> bool {
        target_is_backdrop && self.close()
    }

    /// Whether the overlay is shown.
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open(_))
    }

    /// Current binding.
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// The driven view.
    pub fn view(&self) -> &V {
        &self.view
    }

    fn video_visible(&self) -> bool {
        matches!(&self.state, ModalState::Open(card) if card.kind == MediaKind::Video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Mirrors the DOM state the real view would produce.
    #[derive(Debug, Default, Clone, PartialEq)]
    struct FakeView {
        title: String,
        description: String,
        image_src: String,
        video_src: String,
        image_visible: bool,
        video_visible: bool,
        overlay_visible: bool,
        video_playing: bool,
        loads: usize,
        pauses: usize,
    }

    impl ModalView for FakeView {
        fn set_text(&mut self, title: &str, description: &str) {
            self.title = title.to_string();
            self.description = description.to_string();
        }

        fn show_image(&mut self, src: &str) {
            self.image_visible = true;
            self.video_visible = false;
            self.image_src = src.to_string();
        }

        fn show_video(&mut self, src: &str) {
            self.video_visible = true;
            self.image_visible = false;
            self.video_src = src.to_string();
            self.loads += 1;
            self.video_playing = true;
        }

        fn set_overlay_visible(&mut self, visible: bool) {
            self.overlay_visible = visible;
        }

        fn pause_video(&mut self) {
            self.video_playing = false;
            self.pauses += 1;
        }
    }

    fn card(kind: MediaKind, name: &str) -> Card {
        Card {
            kind,
            media_source: format!("media/{name}"),
            title: name.to_uppercase(),
            description: format!("about {name}"),
        }
    }

    #[test]
    fn test_open_image_shows_only_image() {
        let mut modal = ModalController::new(FakeView::default());
        modal.open(card(MediaKind::Image, "shot.png"));
        let view = modal.view();
        assert!(view.overlay_visible && view.image_visible && !view.video_visible);
        assert_eq!(view.image_src, "media/shot.png");
        assert_eq!(view.title, "SHOT.PNG");
        assert!(modal.is_open());
    }

    #[test]
    fn test_open_video_loads_source() {
        let mut modal = ModalController::new(FakeView::default());
        modal.open(card(MediaKind::Video, "demo.mp4"));
        let view = modal.view();
        assert!(view.video_visible && !view.image_visible);
        assert_eq!(view.video_src, "media/demo.mp4");
        assert_eq!(view.loads, 1);
    }

    #[test]
    fn test_reopen_leaves_only_second_card() {
        let a = card(MediaKind::Video, "a.mp4");
        let b = card(MediaKind::Image, "b.png");

        let mut modal = ModalController::new(FakeView::default());
        modal.open(a);
        modal.open(b.clone());

        let view = modal.view();
        assert_eq!(modal.state(), &ModalState::Open(b));
        assert_eq!((view.title.as_str(), view.description.as_str()), ("B.PNG", "about b.png"));
        assert!(view.image_visible && !view.video_visible);
        assert_eq!(view.image_src, "media/b.png");
        assert!(!view.video_playing, "hidden video from the first card kept playing");
    }

    #[test]
    fn test_close_pauses_visible_video() {
        let mut modal = ModalController::new(FakeView::default());
        modal.open(card(MediaKind::Video, "v.mp4"));
        assert!(modal.close());
        assert!(!modal.view().overlay_visible);
        assert!(!modal.view().video_playing);
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn test_close_image_does_not_touch_video() {
        let mut modal = ModalController::new(FakeView::default());
        modal.open(card(MediaKind::Image, "i.png"));
        assert!(modal.close());
        assert_eq!(modal.view().pauses, 0);
    }

    #[test]
    fn test_escape_while_closed_is_a_no_op() {
        let mut modal = ModalController::new(FakeView::default());
        let before = modal.view().clone();
        assert!(!modal.handle_key(ESCAPE_KEY));
        assert_eq!(modal.view(), &before);

        modal.open(card(MediaKind::Video, "v.mp4"));
        assert!(modal.handle_key(ESCAPE_KEY));
        let after_first = modal.view().clone();
        assert!(!modal.handle_key(ESCAPE_KEY));
        assert_eq!(modal.view(), &after_first);
    }

    #[test]
    fn test_other_keys_and_content_clicks_keep_it_open() {
        let mut modal = ModalController::new(FakeView::default());
        modal.open(card(MediaKind::Image, "i.png"));
        assert!(!modal.handle_key("Enter"));
        assert!(!modal.handle_click(false));
        assert!(modal.is_open());
        assert!(modal.handle_click(true));
        assert!(!modal.is_open());
    }
}

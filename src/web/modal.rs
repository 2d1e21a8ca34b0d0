//! Media lightbox bound to `#modal`.

use super::{document, element_by_id, listen, query_document};
use crate::error::{FxError, Result};
use crate::modal::{ModalController, ModalView};
use crate::types::Card;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

const CARD_SELECTOR: &str = ".carousel-card";
const CLOSE_SELECTOR: &str = ".close";

/// The overlay's elements.
pub struct DomModalView {
    overlay: web_sys::HtmlElement,
    image: web_sys::HtmlImageElement,
    video: web_sys::HtmlVideoElement,
    title: web_sys::Element,
    description: web_sys::Element,
}

fn set_display(element: &web_sys::HtmlElement, value: &str) {
    if let Err(err) = element.style().set_property("display", value) {
        log::warn!("Could not set display: {err:?}");
    }
}

impl ModalView for DomModalView {
    fn set_text(&mut self, title: &str, description: &str) {
        self.title.set_text_content(Some(title));
        self.description.set_text_content(Some(description));
    }

    fn show_image(&mut self, src: &str) {
        set_display(&self.image, "block");
        set_display(&self.video, "none");
        self.image.set_src(src);
    }

    fn show_video(&mut self, src: &str) {
        set_display(&self.video, "block");
        set_display(&self.image, "none");
        match self.video.query_selector("source") {
            Ok(Some(source)) => {
                if let Ok(source) = source.dyn_into::<web_sys::HtmlSourceElement>() {
                    source.set_src(src);
                }
            }
            _ => self.video.set_src(src),
        }
        self.video.load();
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        set_display(&self.overlay, if visible { "block" } else { "none" });
    }

    fn pause_video(&mut self) {
        if let Err(err) = self.video.pause() {
            log::warn!("Could not pause video: {err:?}");
        }
    }
}

/// Wires the card clicks and the three close triggers.
pub fn mount() -> Result<()> {
    let document = document()?;
    let view = DomModalView {
        overlay: element_by_id(&document, "modal")?,
        image: element_by_id(&document, "modal-img")?,
        video: element_by_id(&document, "modal-video")?,
        title: element_by_id(&document, "modal-title")?,
        description: element_by_id(&document, "modal-desc")?,
    };
    let close_button = document
        .query_selector(CLOSE_SELECTOR)?
        .ok_or_else(|| FxError::missing(CLOSE_SELECTOR))?;
    let overlay: web_sys::EventTarget = view.overlay.clone().into();
    let modal = Rc::new(RefCell::new(ModalController::new(view)));

    for card in query_document(&document, CARD_SELECTOR)? {
        let modal = modal.clone();
        let element = card.clone();
        if let Err(err) = listen(&card, "click", move |_: web_sys::Event| {
            let card = Card::from_attributes(|name| element.get_attribute(&format!("data-{name}")));
            modal.borrow_mut().open(card);
        }) {
            log::warn!("Card preview not bound: {err}");
        }
    }

    {
        let modal = modal.clone();
        listen(&close_button, "click", move |_: web_sys::Event| {
            modal.borrow_mut().close();
        })?;
    }

    {
        let modal = modal.clone();
        let window = super::window()?;
        listen(&window, "click", move |event: web_sys::Event| {
            let on_backdrop = event.target().is_some_and(|target| target == overlay);
            modal.borrow_mut().handle_click(on_backdrop);
        })?;
    }

    listen(&document, "keydown", move |event: web_sys::KeyboardEvent| {
        modal.borrow_mut().handle_key(&event.key());
    })
}

//! Card strips, their description panels and the navigation buttons.

use super::{document, element_by_id, listen, query_all, query_document};
use crate::carousel::{
    nav_target, navigate_and_settle, CardBox, Carousel, CarouselRegistry, CarouselSurface, Direction, StripLayout,
};
use crate::config::CarouselConfig;
use crate::constants::FULL_WIDTH_CLASS;
use crate::error::Result;
use crate::scheduler::Scheduler;
use crate::types::Card;
use std::cell::RefCell;
use std::rc::Rc;

const CARD_SELECTOR: &str = ".carousel-card";
const NAV_BUTTON_SELECTOR: &str = ".carousel-nav-btn";
const PREV_BUTTON_CLASS: &str = "prev-btn";

/// A strip element and its description panel, if the page has one.
pub struct DomCarousel {
    strip: web_sys::HtmlElement,
    description: Option<web_sys::Element>,
}

impl DomCarousel {
    fn cards(&self) -> Vec<web_sys::HtmlElement> {
        query_all(&self.strip, CARD_SELECTOR)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|el| wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(el).ok())
            .collect()
    }

    fn set_child_text(&self, selector: &str, text: &str) {
        let Some(panel) = &self.description else {
            return;
        };
        if let Ok(Some(child)) = panel.query_selector(selector) {
            child.set_text_content(Some(text));
        }
    }
}

impl CarouselSurface for DomCarousel {
    fn layout(&self) -> StripLayout {
        let strip_rect = self.strip.get_bounding_client_rect();
        let cards = self
            .cards()
            .iter()
            .map(|card| CardBox {
                left: card.get_bounding_client_rect().left() - strip_rect.left(),
                offset_left: card.offset_left() as f64,
                width: card.offset_width() as f64,
            })
            .collect();
        StripLayout {
            width: strip_rect.width(),
            cards,
        }
    }

    fn card(&self, index: usize) -> Option<Card> {
        let element = self.cards().into_iter().nth(index)?;
        Some(Card::from_attributes(|name| {
            element.get_attribute(&format!("data-{name}"))
        }))
    }

    fn set_full_width(&mut self, index: usize, on: bool) {
        if let Some(card) = self.cards().get(index) {
            if let Err(err) = card.class_list().toggle_with_force(FULL_WIDTH_CLASS, on) {
                log::warn!("Could not update card class: {err:?}");
            }
        }
    }

    fn set_description(&mut self, title: &str, body: &str) {
        self.set_child_text("h4", title);
        self.set_child_text("p", body);
    }

    fn scroll_to(&mut self, left: f64) {
        let options = web_sys::ScrollToOptions::new();
        options.set_left(left);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.strip.scroll_to_with_scroll_to_options(&options);
    }
}

/// Binds every configured strip and every navigation button.
///
/// A strip without its description panel still scrolls; only the panel
/// text is skipped. Buttons targeting strips outside the configuration are
/// bound to a carousel built on first use.
pub fn mount(config: &CarouselConfig, scheduler: &Rc<RefCell<Scheduler>>) -> Result<()> {
    let document = document()?;
    let mut carousels: CarouselRegistry<DomCarousel> = CarouselRegistry::new();

    for binding in &config.bindings {
        let strip = match element_by_id::<web_sys::HtmlElement>(&document, &binding.strip) {
            Ok(strip) => strip,
            Err(err) => {
                log::debug!("Carousel {} skipped: {err}", binding.strip);
                continue;
            }
        };
        let description = document.get_element_by_id(&binding.description);
        if description.is_none() {
            log::debug!("Carousel {} has no #{} panel", binding.strip, binding.description);
        }

        let carousel = Rc::new(RefCell::new(Carousel::new(
            binding.strip.clone(),
            DomCarousel {
                strip: strip.clone(),
                description,
            },
            config.clone(),
        )));
        {
            let carousel = carousel.clone();
            if let Err(err) = listen(&strip, "scroll", move |_: web_sys::Event| {
                carousel.borrow_mut().update_description();
            }) {
                log::warn!("Carousel {} not bound: {err}", binding.strip);
                continue;
            }
        }
        carousel.borrow_mut().update_description();
        carousels.insert(binding.strip.clone(), carousel);
    }

    for button in query_document(&document, NAV_BUTTON_SELECTOR)? {
        let Some(target) = button.get_attribute("data-target") else {
            continue;
        };
        let found = nav_target(&mut carousels, &target, config, |id| {
            let strip = element_by_id::<web_sys::HtmlElement>(&document, id).ok()?;
            Some(DomCarousel {
                strip,
                description: None,
            })
        });
        let Some(carousel) = found else {
            log::debug!("Nav button for missing strip #{target}");
            continue;
        };
        let direction = if button.class_list().contains(PREV_BUTTON_CLASS) {
            Direction::Prev
        } else {
            Direction::Next
        };
        let scheduler = scheduler.clone();
        if let Err(err) = listen(&button, "click", move |event: web_sys::Event| {
            navigate_and_settle(&carousel, direction, &scheduler, event.time_stamp());
        }) {
            log::warn!("Nav button for #{target} not bound: {err}");
        }
    }

    log::info!("{} carousels bound", carousels.len());
    Ok(())
}

//! Theme toggle control and the computed-style palette.

use super::storage::LocalStore;
use super::{document, listen, window};
use crate::constants::{ACCENT_COLOR_PROPERTY, LIGHT_MODE_CLASS, POINT_COLOR_PROPERTY};
use crate::error::{FxError, Result};
use crate::theme::{ThemeController, ThemeSignal};
use crate::types::{Palette, PaletteSource, Theme};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;

const TOGGLE_ID: &str = "theme-toggle";

/// Applies the stored theme and wires the toggle control.
///
/// The stored mode is applied to the body even when the toggle control is
/// missing; only the toggling is disabled then.
pub fn mount(signal: ThemeSignal) -> Result<()> {
    let document = document()?;
    let body = document.body().ok_or_else(|| FxError::missing("body"))?;
    let controller = ThemeController::init(LocalStore::open(), signal);

    let toggle = document
        .get_element_by_id(TOGGLE_ID)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    apply(&body, toggle.as_ref(), controller.theme());

    let toggle = toggle.ok_or_else(|| FxError::missing(format!("#{TOGGLE_ID}")))?;
    let controller = Rc::new(RefCell::new(controller));
    let button = toggle.clone();
    listen(&toggle, "click", move |_: web_sys::Event| {
        let theme = controller.borrow_mut().toggle();
        apply(&body, Some(&button), theme);
    })
}

/// Sets the body class and the toggle icon for `theme`.
fn apply(body: &web_sys::HtmlElement, toggle: Option<&web_sys::HtmlElement>, theme: Theme) {
    if let Err(err) = body
        .class_list()
        .toggle_with_force(LIGHT_MODE_CLASS, theme == Theme::Light)
    {
        log::warn!("Could not update body class: {err:?}");
    }
    if let Some(toggle) = toggle {
        toggle.set_inner_html(&format!("<i class=\"{}\"></i>", theme.icon().css_class()));
    }
}

/// Reads the palette from the body's computed style.
pub struct BodyPalette;

impl PaletteSource for BodyPalette {
    fn read_palette(&self) -> Palette {
        let style = window()
            .ok()
            .zip(document().ok().and_then(|d| d.body()))
            .and_then(|(w, body)| w.get_computed_style(&body).ok().flatten());
        let Some(style) = style else {
            return Palette::default();
        };
        let read = |name: &str| style.get_property_value(name).unwrap_or_default();
        Palette::new(read(POINT_COLOR_PROPERTY), read(ACCENT_COLOR_PROPERTY))
    }
}

//! Browser bindings.
//!
//! The start function mounts every behavior on the live document. Each
//! feature is mounted independently: a missing element or a failing browser
//! call is logged and only that feature stays inactive.
//!
//! # Module Organization
//!
//! - `logger` - `log` backend writing to the browser console
//! - `storage` - `localStorage` preference store
//! - `theme` - theme toggle control and computed-style palette
//! - `canvas` - canvas surface and the page/section particle backgrounds
//! - `scroll` - smooth in-page anchor scrolling
//! - `carousel` - card strips, description panels and nav buttons
//! - `modal` - media lightbox
//! - `frame_loop` - the single animation-frame loop

mod canvas;
mod carousel;
mod frame_loop;
mod logger;
mod modal;
mod scroll;
mod storage;
mod theme;

use crate::config::FxConfig;
use crate::error::{FxError, Result};
use crate::scheduler::Scheduler;
use crate::theme::ThemeSignal;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Id of the optional inline JSON configuration element.
const CONFIG_ELEMENT_ID: &str = "fx-config";

/// Page entry point, run once the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    logger::init();

    let document = document().map_err(|e| JsValue::from_str(&e.to_string()))?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once(move || mount_all());
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        mount_all();
    }
    Ok(())
}

/// Mounts every behavior in dependency order.
fn mount_all() {
    let config = load_config();
    let signal = ThemeSignal::new();
    let scheduler = Rc::new(RefCell::new(Scheduler::new()));

    report("theme", theme::mount(signal.clone()));
    report(
        "page background",
        canvas::mount_page_background(&config.field, signal.clone(), &scheduler),
    );
    report("smooth scroll", scroll::mount());
    report("carousels", carousel::mount(&config.carousel, &scheduler));
    report("modal", modal::mount());
    report(
        "section backgrounds",
        canvas::mount_section_backgrounds(&config.field, signal, &scheduler),
    );

    if let Err(err) = frame_loop::start(scheduler) {
        log::warn!("Animation loop not started: {err}");
    }
}

/// Logs a feature that could not be mounted.
fn report(feature: &str, result: Result<()>) {
    match result {
        Ok(()) => log::info!("Mounted {feature}"),
        Err(err) => log::warn!("{feature} disabled: {err}"),
    }
}

/// Reads the inline JSON configuration, falling back to defaults.
fn load_config() -> FxConfig {
    let Some(element) = document().ok().and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID)) else {
        return FxConfig::default();
    };
    let json = element.text_content().unwrap_or_default();
    match FxConfig::from_json(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring #{CONFIG_ELEMENT_ID}: {err}");
            FxConfig::default()
        }
    }
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| FxError::missing("window"))
}

fn document() -> Result<web_sys::Document> {
    window()?.document().ok_or_else(|| FxError::missing("document"))
}

/// Looks up an element by id and casts it to the expected type.
fn element_by_id<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| FxError::missing(format!("#{id}")))?
        .dyn_into::<T>()
        .map_err(|_| FxError::missing(format!("#{id} of the expected type")))
}

/// Collects every element matching `selector`.
fn query_all(root: &web_sys::Element, selector: &str) -> Result<Vec<web_sys::Element>> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect())
}

/// Collects every element in the document matching `selector`.
fn query_document(document: &web_sys::Document, selector: &str) -> Result<Vec<web_sys::Element>> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect())
}

/// Registers a listener for the page lifetime.
fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F) -> Result<()>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

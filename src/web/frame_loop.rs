//! The single `requestAnimationFrame` loop.

use super::window;
use crate::error::Result;
use crate::scheduler::{run_tick, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Starts ticking `scheduler` on every display refresh for the page lifetime.
pub fn start(scheduler: Rc<RefCell<Scheduler>>) -> Result<()> {
    let participants = scheduler.borrow().participants();
    // The callback re-registers itself, so it has to be reachable from inside.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();

    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        run_tick(&scheduler, timestamp);
        if let Some(callback) = next.borrow().as_ref() {
            if let Ok(window) = window() {
                if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    log::warn!("Animation loop stopped: {err:?}");
                }
            }
        }
    }));

    let window = window()?;
    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    log::info!("Animation loop started for {participants} renderers");
    Ok(())
}

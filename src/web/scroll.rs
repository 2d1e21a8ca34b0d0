//! Smooth scrolling for in-page anchors.

use super::{document, listen, query_document};
use crate::error::Result;
use crate::scroll::fragment_target;

const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Intercepts clicks on `#fragment` links whose target exists.
pub fn mount() -> Result<()> {
    let document = document()?;
    let anchors = query_document(&document, ANCHOR_SELECTOR)?;
    let count = anchors.len();
    for anchor in anchors {
        let href = anchor.get_attribute("href").unwrap_or_default();
        let document = document.clone();
        let bound = listen(&anchor, "click", move |event: web_sys::MouseEvent| {
            let Some(target) = fragment_target(&href).and_then(|id| document.get_element_by_id(&id)) else {
                return;
            };
            event.prevent_default();
            let options = web_sys::ScrollIntoViewOptions::new();
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            options.set_block(web_sys::ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
        if let Err(err) = bound {
            log::warn!("Anchor not bound: {err}");
        }
    }
    log::debug!("{count} in-page anchors bound");
    Ok(())
}

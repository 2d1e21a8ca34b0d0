//! Built-in showcase deck used by the preview harness.
//!
//! The entries mirror the data attributes a portfolio page puts on its
//! carousel cards, so the preview exercises the same parsing path.

use crate::types::Card;
use serde_json::json;

/// Returns the bundled cards in display order.
pub fn showcase_deck() -> Vec<Card> {
    let deck = json!([
        {
            "type": "image",
            "src": "assets/projects/flow-editor.png",
            "title": "Flow Editor",
            "desc": "Node-based pipeline editor with live simulation."
        },
        {
            "type": "video",
            "src": "assets/projects/terrain.mp4",
            "title": "Terrain Generator",
            "desc": "GPU erosion simulation rendered in real time."
        },
        {
            "type": "image",
            "src": "assets/certs/cloud-architect.png",
            "title": "Cloud Architect Certificate",
            "desc": "Design of resilient distributed systems."
        },
        {
            "type": "image",
            "src": "assets/projects/keyboard.png",
            "title": "Keyboard Firmware",
            "desc": "Custom layout tooling for split mechanical keyboards."
        },
        {
            "type": "video",
            "src": "assets/talks/rust-meetup.mp4",
            "title": "Meetup Talk",
            "desc": "Ownership patterns for event-driven UIs."
        }
    ]);
    match serde_json::from_value(deck) {
        Ok(cards) => cards,
        Err(err) => {
            log::warn!("Showcase deck is malformed: {err}");
            Vec::new()
        }
    }
}

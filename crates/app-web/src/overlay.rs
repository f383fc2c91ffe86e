//! DOM status overlay: the display side of the interaction status sink.

use app_core::StatusSink;

use crate::dom;

/// Writes status lines to the `#status` element. Fire and forget; a missing
/// element degrades to console logging only.
pub struct OverlayStatus;

impl StatusSink for OverlayStatus {
    fn show(&mut self, message: &str) {
        show_status(message);
    }
}

pub fn show_status(message: &str) {
    log::info!("[status] {message}");
    if let Some(el) = dom::window_document().and_then(|d| d.get_element_by_id("status")) {
        el.set_text_content(Some(message));
        _ = el.set_attribute("style", "");
    }
}

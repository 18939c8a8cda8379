use crate::constants::{MESSAGE_CLEAR_MS, MESSAGE_ID, STATUS_ID};
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, STATUS_ID, text);
}

/// Show a transient message under the toolbar; it clears itself.
pub fn flash_message(document: &web::Document, text: &str) {
    dom::set_text(document, MESSAGE_ID, text);
    let Some(window) = web::window() else {
        return;
    };
    let doc = document.clone();
    let expected = text.to_string();
    let closure = Closure::once(move || {
        // A newer message keeps its own timer.
        if let Some(el) = doc.get_element_by_id(MESSAGE_ID) {
            if el.text_content().as_deref() == Some(expected.as_str()) {
                el.set_text_content(None);
            }
        }
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        MESSAGE_CLEAR_MS,
    );
    closure.forget();
}

use super::with_app;
use crate::app::{App, AppHandle};
use crate::constants::KEY_PAN_STEP_PX;
use crate::dom;
use crate::input::{self, KeyAction};
use metaball_core::BallSpec;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn apply_key_action(app: &mut App, action: KeyAction) {
    let editor = &mut app.editor;
    let list_changed = match action {
        KeyAction::RemoveSelected => editor.remove_selected().is_some(),
        KeyAction::Pan { dx, dy } => {
            editor.tick_interaction();
            editor.pan(dx, dy);
            false
        }
        KeyAction::Zoom(amount) => {
            editor.tick_interaction();
            editor.zoom(amount);
            false
        }
        KeyAction::Preset(preset) => {
            editor.apply_preset(preset);
            false
        }
        KeyAction::Duplicate => editor
            .selected()
            .and_then(|i| editor.duplicate(i))
            .is_some(),
        KeyAction::Split => editor.selected().and_then(|i| editor.split(i)).is_some(),
        KeyAction::TogglePolarity => editor
            .selected()
            .and_then(|i| editor.toggle_polarity(i))
            .is_some(),
        KeyAction::Add => {
            editor.add(BallSpec::default());
            true
        }
    };
    if list_changed {
        app.mark_list_dirty();
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &AppHandle) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    if dom::is_editable_target(ev.target()) {
        return;
    }
    let key = ev.key();
    let Some(action) = input::key_action(&key, KEY_PAN_STEP_PX) else {
        return;
    };
    log::debug!("[keys] {} -> {:?}", key, action);
    with_app(app, |a| apply_key_action(a, action));
    // Arrows would scroll the page and Backspace may navigate back.
    ev.prevent_default();
}

pub fn wire_global_keydown(app: &AppHandle) {
    if let Some(window) = web::window() {
        let app = app.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &app);
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

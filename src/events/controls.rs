//! Side-panel buttons, settings inputs, the ball list and view presets.

use super::with_app;
use crate::app::{App, AppHandle};
use crate::ball_list::{self, FIELD_NAME, FIELD_RADIUS};
use crate::constants::{
    ADD_BUTTON_ID, ADD_NEGATIVE_BUTTON_ID, BALL_LIST_ID, DUPLICATE_BUTTON_ID, EXPORT_BUTTON_ID,
    IMPORT_BUTTON_ID, ISO_INPUT_ID, MODE_SELECT_ID, PRESET_BUTTON_CLASS, REMOVE_BUTTON_ID,
    RESOLUTION_INPUT_ID, SCAD_TEXT_ID, SPLIT_BUTTON_ID, TOGGLE_BUTTON_ID,
};
use crate::dom;
use metaball_core::{BallSpec, ThresholdMode};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_controls(document: &web::Document, app: &AppHandle) {
    wire_buttons(document, app);
    wire_settings(document, app);
    wire_ball_list(document, app);
    wire_presets(document, app);
    wire_resize(app);
}

/// Click handler that runs `f` on the app, then rebuilds the list.
fn on_click(document: &web::Document, app: &AppHandle, id: &str, f: fn(&mut App)) {
    let app = app.clone();
    dom::add_click_listener(document, id, move || {
        with_app(&app, |a| {
            f(a);
            a.mark_list_dirty();
        });
    });
}

fn wire_buttons(document: &web::Document, app: &AppHandle) {
    on_click(document, app, ADD_BUTTON_ID, |a| {
        a.editor.add(BallSpec::default());
    });
    on_click(document, app, ADD_NEGATIVE_BUTTON_ID, |a| {
        a.editor.add(BallSpec::default().negative());
    });
    on_click(document, app, REMOVE_BUTTON_ID, |a| {
        a.editor.remove_selected();
    });
    on_click(document, app, DUPLICATE_BUTTON_ID, |a| {
        if let Some(i) = a.editor.selected() {
            a.editor.duplicate(i);
        }
    });
    on_click(document, app, SPLIT_BUTTON_ID, |a| {
        if let Some(i) = a.editor.selected() {
            a.editor.split(i);
        }
    });
    on_click(document, app, TOGGLE_BUTTON_ID, |a| {
        if let Some(i) = a.editor.selected() {
            a.editor.toggle_polarity(i);
        }
    });

    let app_export = app.clone();
    dom::add_click_listener(document, EXPORT_BUTTON_ID, move || {
        with_app(&app_export, |a| a.export_scad());
    });

    let app_import = app.clone();
    let doc = document.clone();
    dom::add_click_listener(document, IMPORT_BUTTON_ID, move || {
        let text = doc
            .get_element_by_id(SCAD_TEXT_ID)
            .and_then(|el| dom::element_value(&el))
            .unwrap_or_default();
        with_app(&app_import, |a| a.import_scad(&text));
    });
}

fn wire_settings(document: &web::Document, app: &AppHandle) {
    let app_iso = app.clone();
    dom::add_value_listener(document, ISO_INPUT_ID, move |value| {
        with_app(&app_iso, |a| {
            a.editor.set_iso_text(&value);
            a.show_settings();
        });
    });

    let app_res = app.clone();
    dom::add_value_listener(document, RESOLUTION_INPUT_ID, move |value| {
        with_app(&app_res, |a| {
            a.editor.set_resolution_text(&value);
            a.show_settings();
        });
    });

    let app_mode = app.clone();
    dom::add_value_listener(document, MODE_SELECT_ID, move |value| {
        match ThresholdMode::parse(&value) {
            Some(mode) => with_app(&app_mode, |a| a.editor.set_threshold_mode(mode)),
            None => log::warn!("unknown threshold mode '{}'", value),
        }
    });
}

/// Delegated listeners on the list container: a row click selects, a
/// `change` in a row input renames or resizes.
fn wire_ball_list(document: &web::Document, app: &AppHandle) {
    let Some(list) = document.get_element_by_id(BALL_LIST_ID) else {
        log::warn!("no #{} to wire", BALL_LIST_ID);
        return;
    };

    let app_click = app.clone();
    let click = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let Some(index) = ball_list::index_of(&el) else {
            return;
        };
        let in_input = el.get_attribute("data-field").is_some();
        with_app(&app_click, |a| {
            if a.editor.selected() == Some(index) {
                return;
            }
            a.editor.set_selection(Some(index));
            // Rebuilding would steal focus from the input being clicked.
            if !in_input {
                a.mark_list_dirty();
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = list.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());
    click.forget();

    let app_change = app.clone();
    let change = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let (Some(index), Some(field), Some(value)) = (
            ball_list::index_of(&el),
            el.get_attribute("data-field"),
            dom::element_value(&el),
        ) else {
            return;
        };
        with_app(&app_change, |a| {
            let accepted = match field.as_str() {
                FIELD_NAME => a.editor.rename(index, &value),
                FIELD_RADIUS => a.editor.set_radius_text(index, &value),
                _ => false,
            };
            // Put the stored value back into a rejected input.
            if !accepted {
                a.mark_list_dirty();
                a.editor.request_render();
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = list.add_event_listener_with_callback("change", change.as_ref().unchecked_ref());
    change.forget();
}

/// Buttons with class `preset` and a `data-preset` name.
fn wire_presets(document: &web::Document, app: &AppHandle) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(el) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok()) else {
            return;
        };
        let selector = format!(".{}[data-preset]", PRESET_BUTTON_CLASS);
        let Some(button) = el.closest(&selector).ok().flatten() else {
            return;
        };
        if let Some(name) = button.get_attribute("data-preset") {
            with_app(&app, |a| {
                a.editor.apply_preset_named(&name);
            });
        }
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_resize(app: &AppHandle) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        with_app(&app, |a| a.sync_viewports());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

use super::with_app;
use crate::app::AppHandle;
use crate::input::{self, WheelAction};
use metaball_core::Plane;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Which canvas a listener is attached to.
#[derive(Clone, Copy)]
enum Surface {
    Slice(Plane),
    Preview,
}

pub fn wire_pointer_handlers(app: &AppHandle) {
    let (overlays, preview) = {
        let a = app.borrow();
        (a.canvases.overlays.clone(), a.canvases.preview.clone())
    };
    for overlay in &overlays {
        match input::plane_for_element(&overlay.id()) {
            Some(plane) => wire_canvas(app, overlay, Surface::Slice(plane)),
            None => log::warn!("overlay #{} names no plane", overlay.id()),
        }
    }
    wire_canvas(app, &preview, Surface::Preview);
}

fn wire_canvas(app: &AppHandle, canvas: &web::HtmlCanvasElement, surface: Surface) {
    wire_pointerdown(app, canvas, surface);
    wire_pointermove(app, canvas);
    wire_pointerup(app, canvas, "pointerup");
    wire_pointerup(app, canvas, "pointercancel");
    wire_wheel(app, canvas, surface);
}

fn wire_pointerdown(app: &AppHandle, canvas: &web::HtmlCanvasElement, surface: Surface) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &target);
        with_app(&app, |a| match surface {
            Surface::Slice(plane) => {
                let before = a.editor.selected();
                if let Some(i) = a.editor.pointer_down_slice(plane, pos) {
                    log::debug!("[pointer] grab ball {} on {}", i, plane.label());
                }
                if a.editor.selected() != before {
                    a.mark_list_dirty();
                }
            }
            Surface::Preview => a.editor.pointer_down_preview(pos),
        });
        _ = target.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(app: &AppHandle, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &target);
        with_app(&app, |a| {
            a.editor.pointer_move(pos);
        });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(app: &AppHandle, canvas: &web::HtmlCanvasElement, event: &str) {
    let app = app.clone();
    let target = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        _ = target.release_pointer_capture(ev.pointer_id());
        with_app(&app, |a| {
            // Gesture end draws now instead of waiting for the next frame.
            if a.editor.pointer_up() {
                a.render_now();
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_wheel(app: &AppHandle, canvas: &web::HtmlCanvasElement, surface: Surface) {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = ev.delta_y() as f32;
        if delta == 0.0 {
            return;
        }
        ev.prevent_default();
        with_app(&app, |a| {
            let action = input::wheel_action(
                matches!(surface, Surface::Preview),
                a.editor.selected().is_some(),
                ev.shift_key(),
            );
            a.editor.tick_interaction();
            match action {
                WheelAction::ResizeSelected => {
                    if a.editor.wheel_resize_selected(delta).is_some() {
                        a.mark_list_dirty();
                    }
                }
                WheelAction::ZoomViews => a.editor.zoom(delta),
                WheelAction::DollyPreview => a.editor.dolly_preview(delta),
            }
        });
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

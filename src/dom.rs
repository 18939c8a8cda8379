use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("#{} has an unexpected element type", id))
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("no #{} to wire", element_id);
    }
}

/// `change` listener on an input/select, handed the element's current value.
pub fn add_value_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(String) + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("no #{} to wire", element_id);
        return;
    };
    let source = el.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(value) = element_value(&source) {
            handler(value);
        }
    }) as Box<dyn FnMut()>);
    _ = el.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Value of an `<input>`, `<select>` or `<textarea>`.
pub fn element_value(el: &web::Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        return Some(input.value());
    }
    if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        return Some(select.value());
    }
    el.dyn_ref::<web::HtmlTextAreaElement>().map(|t| t.value())
}

pub fn set_input_value(document: &web::Document, id: &str, value: &str) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = el.dyn_ref::<web::HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(text) = el.dyn_ref::<web::HtmlTextAreaElement>() {
        text.set_value(value);
    }
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

/// True when keyboard input is going into a form control.
pub fn is_editable_target(target: Option<web::EventTarget>) -> bool {
    target.is_some_and(|t| {
        t.dyn_ref::<web::HtmlInputElement>().is_some()
            || t.dyn_ref::<web::HtmlTextAreaElement>().is_some()
            || t.dyn_ref::<web::HtmlSelectElement>().is_some()
    })
}

/// Match the canvas backing store to its CSS size times the device pixel
/// ratio. Returns the new size when it changed.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> Option<(u32, u32)> {
    let w = web::window()?;
    let dpr = w.device_pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    if canvas.width() == w_px && canvas.height() == h_px {
        return None;
    }
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    Some((w_px, h_px))
}

/// Swap `canvas` for a fresh copy of itself. A canvas that already handed
/// out a WebGPU context can never give a 2D one.
pub fn replace_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::HtmlCanvasElement> {
    let fresh = canvas
        .clone_node()
        .map_err(|e| anyhow::anyhow!("cloneNode failed: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("cloned #{} is not a canvas", canvas.id()))?;
    canvas
        .replace_with_with_node_1(&fresh)
        .map_err(|e| anyhow::anyhow!("replaceWith failed: {:?}", e))?;
    Ok(fresh)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("getContext('2d') failed: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("canvas #{} has no 2d context", canvas.id()))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow::anyhow!("unexpected 2d context type"))
}

#![cfg(target_arch = "wasm32")]
use crate::app::{App, AppHandle, Canvases, Renderer};
use crate::constants::{OVERLAY_CANVAS_IDS, PREVIEW_CANVAS_ID, VIEW_CANVAS_IDS};
use crate::frame::{callback_slot, fill_slot, RafHost, TimeoutHost};
use metaball_core::{BackendPreference, Editor, EditorConfig, SoftwareBackend};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod ball_list;
mod constants;
mod dom;
mod draw;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("metaball editor starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn canvases_by_id<const N: usize>(
    document: &web::Document,
    ids: [&str; N],
) -> anyhow::Result<[web::HtmlCanvasElement; N]> {
    let mut found = Vec::with_capacity(N);
    for id in ids {
        let canvas: web::HtmlCanvasElement = dom::element_by_id(document, id)?;
        dom::sync_canvas_backing_size(&canvas);
        found.push(canvas);
    }
    found
        .try_into()
        .map_err(|_| anyhow::anyhow!("canvas count mismatch"))
}

fn contexts_2d<const N: usize>(
    canvases: &[web::HtmlCanvasElement; N],
) -> anyhow::Result<[web::CanvasRenderingContext2d; N]> {
    let contexts = canvases
        .iter()
        .map(dom::context_2d)
        .collect::<anyhow::Result<Vec<_>>>()?;
    contexts
        .try_into()
        .map_err(|_| anyhow::anyhow!("context count mismatch"))
}

fn software_renderer(
    slices: &[web::HtmlCanvasElement; 3],
    preview: &web::HtmlCanvasElement,
) -> anyhow::Result<Renderer> {
    Ok(Renderer::Software {
        backend: SoftwareBackend::new(),
        slices: contexts_2d(slices)?,
        preview: dom::context_2d(preview)?,
    })
}

/// WebGPU when available, otherwise the software path. A failed GPU setup
/// may have bound some canvases already, so those are replaced by fresh
/// nodes before taking 2D contexts.
async fn pick_renderer(
    preference: BackendPreference,
    slices: &mut [web::HtmlCanvasElement; 3],
    preview: &mut web::HtmlCanvasElement,
) -> anyhow::Result<Renderer> {
    if preference == BackendPreference::Software {
        log::info!("software renderer requested");
        return software_renderer(slices, preview);
    }
    match render::GpuState::new(slices, preview).await {
        Ok(gpu) => Ok(Renderer::Gpu(gpu)),
        Err(e) => {
            log::warn!("WebGPU unavailable ({:?}); using software renderer", e);
            for canvas in slices.iter_mut().chain(std::iter::once(&mut *preview)) {
                *canvas = dom::replace_canvas(canvas)?;
            }
            software_renderer(slices, preview)
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let query = window.location().search().unwrap_or_default();
    let config = EditorConfig::from_query(&query);
    log::info!("config: {:?}", config);

    let mut slices = canvases_by_id(&document, VIEW_CANVAS_IDS)?;
    let [mut preview] = canvases_by_id(&document, [PREVIEW_CANVAS_ID])?;
    let overlays = canvases_by_id(&document, OVERLAY_CANVAS_IDS)?;
    let overlay_contexts = contexts_2d(&overlays)?;

    let renderer = pick_renderer(config.backend, &mut slices, &mut preview).await?;
    log::info!("renderer: {}", renderer.name());

    // The hosts need the callbacks and the callbacks need the app: hand the
    // hosts empty slots and fill them once the app exists.
    let frame_cb = callback_slot();
    let timer_cb = callback_slot();
    let editor = Editor::new(
        config,
        RafHost::new(window.clone(), frame_cb.clone()),
        TimeoutHost::new(window.clone(), timer_cb.clone()),
    );
    let app: AppHandle = Rc::new(RefCell::new(App::new(
        editor,
        renderer,
        Canvases {
            slices,
            preview,
            overlays,
            overlay_contexts,
        },
        document.clone(),
    )));
    let app_frame = app.clone();
    fill_slot(&frame_cb, move || {
        events::with_app(&app_frame, |a| a.on_frame());
    });
    let app_timer = app.clone();
    fill_slot(&timer_cb, move || {
        events::with_app(&app_timer, |a| a.on_quality_timer());
    });

    {
        let mut a = app.borrow_mut();
        a.sync_viewports();
        a.editor.seed_scene();
        a.show_settings();
    }

    events::wire_pointer_handlers(&app);
    events::wire_global_keydown(&app);
    events::wire_controls(&document, &app);
    Ok(())
}

//! Page-lifetime editor state shared by every event handler.

use crate::ball_list;
use crate::constants::{
    BALL_LIST_ID, IMPORT_EMPTY_MESSAGE, ISO_INPUT_ID, MODE_SELECT_ID, RESOLUTION_INPUT_ID,
    SCAD_TEXT_ID,
};
use crate::dom;
use crate::draw;
use crate::frame::{RafHost, TimeoutHost};
use crate::overlay;
use crate::render::GpuState;
use metaball_core::slice::slice_markers;
use metaball_core::{Editor, FieldBackend, Plane, SoftwareBackend, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type AppHandle = Rc<RefCell<App>>;

pub enum Renderer {
    Gpu(GpuState),
    /// Core rasterizers blitted into 2D contexts: the three slices, then the
    /// preview.
    Software {
        backend: SoftwareBackend,
        slices: [web::CanvasRenderingContext2d; 3],
        preview: web::CanvasRenderingContext2d,
    },
}

impl Renderer {
    pub fn name(&self) -> &'static str {
        match self {
            Renderer::Gpu(gpu) => gpu.name(),
            Renderer::Software { backend, .. } => backend.name(),
        }
    }
}

pub struct Canvases {
    pub slices: [web::HtmlCanvasElement; 3],
    pub preview: web::HtmlCanvasElement,
    pub overlays: [web::HtmlCanvasElement; 3],
    pub overlay_contexts: [web::CanvasRenderingContext2d; 3],
}

pub struct App {
    pub editor: Editor<RafHost, TimeoutHost>,
    pub renderer: Renderer,
    pub canvases: Canvases,
    pub document: web::Document,
    list_dirty: bool,
    /// Text last written to the SCAD box; rewritten only when the scene
    /// export changes, so pasted import text survives redraws.
    scad_text: String,
}

impl App {
    pub fn new(
        editor: Editor<RafHost, TimeoutHost>,
        renderer: Renderer,
        canvases: Canvases,
        document: web::Document,
    ) -> Self {
        Self {
            editor,
            renderer,
            canvases,
            document,
            list_dirty: true,
            scad_text: String::new(),
        }
    }

    /// The ball list is rebuilt on the next pass. Edits typed into the list
    /// itself skip this so the focused input survives.
    pub fn mark_list_dirty(&mut self) {
        self.list_dirty = true;
    }

    /// Push canvas sizes into the editor, resizing backing stores first.
    pub fn sync_viewports(&mut self) {
        for plane in Plane::ALL {
            let i = plane.index();
            let canvas = &self.canvases.slices[i];
            let resized = dom::sync_canvas_backing_size(canvas).is_some();
            let (w, h) = (canvas.width(), canvas.height());
            let overlay = &self.canvases.overlays[i];
            if overlay.width() != w || overlay.height() != h {
                overlay.set_width(w);
                overlay.set_height(h);
            }
            if resized || self.editor.views().viewport(plane).is_empty() {
                self.editor.set_viewport(plane, Viewport::new(w as f32, h as f32));
            }
        }
        let preview = &self.canvases.preview;
        let resized = dom::sync_canvas_backing_size(preview).is_some();
        if resized || self.editor.preview_viewport().is_empty() {
            let vp = Viewport::new(preview.width() as f32, preview.height() as f32);
            self.editor.set_preview_viewport(vp);
        }
    }

    /// Frame callback: runs a pass only when one is still pending.
    pub fn on_frame(&mut self) {
        if self.editor.frame_fired() {
            self.render_now();
        }
    }

    pub fn on_quality_timer(&mut self) {
        if self.editor.on_quality_timer() {
            log::debug!("full quality restored");
        }
    }

    /// Draw synchronously. Used by the frame callback and at gesture end.
    pub fn render_now(&mut self) {
        let result = match &mut self.renderer {
            Renderer::Gpu(gpu) => self.editor.render_with(gpu),
            Renderer::Software { backend, slices, preview } => {
                let report = self.editor.render_with(backend);
                if report.is_ok() {
                    for plane in Plane::ALL {
                        if let Err(e) = draw::blit(&slices[plane.index()], backend.slice(plane)) {
                            log::error!("slice blit failed: {:?}", e);
                        }
                    }
                    if let Err(e) = draw::blit(preview, backend.preview()) {
                        log::error!("preview blit failed: {:?}", e);
                    }
                }
                report
            }
        };
        match result {
            Ok(report) => log::trace!(
                "frame via {} in {:?} at res {}",
                report.backend,
                report.cost,
                report.budget.resolution
            ),
            Err(e) => {
                log::warn!("render error: {}; retrying next frame", e);
            }
        }
        self.draw_overlays();
        self.sync_scad_text();
        let status = self.editor.status_line(self.renderer.name());
        overlay::set_status(&self.document, &status);
        if self.list_dirty {
            self.list_dirty = false;
            ball_list::render(
                &self.document,
                BALL_LIST_ID,
                self.editor.balls(),
                self.editor.selected(),
            );
        }
    }

    fn draw_overlays(&self) {
        for plane in Plane::ALL {
            let i = plane.index();
            let markers = slice_markers(
                plane,
                self.editor.views().get(plane),
                self.editor.views().viewport(plane),
                self.editor.balls(),
                self.editor.selected(),
            );
            draw::markers(
                &self.canvases.overlay_contexts[i],
                &self.canvases.overlays[i],
                plane.label(),
                &markers,
            );
        }
    }

    // ---------------- Panel actions ----------------

    pub fn export_scad(&mut self) {
        self.scad_text = self.editor.export_scad();
        dom::set_input_value(&self.document, SCAD_TEXT_ID, &self.scad_text);
    }

    fn sync_scad_text(&mut self) {
        if self.editor.export_scad() != self.scad_text {
            self.export_scad();
        }
    }

    pub fn import_scad(&mut self, text: &str) {
        if self.editor.import_scad(text) == 0 {
            overlay::flash_message(&self.document, IMPORT_EMPTY_MESSAGE);
            return;
        }
        self.show_settings();
        self.mark_list_dirty();
    }

    /// Reflect the (sanitized) settings back into their inputs.
    pub fn show_settings(&self) {
        let settings = self.editor.settings();
        dom::set_input_value(&self.document, ISO_INPUT_ID, &format!("{}", settings.iso));
        dom::set_input_value(
            &self.document,
            RESOLUTION_INPUT_ID,
            &settings.base_resolution.to_string(),
        );
        dom::set_input_value(&self.document, MODE_SELECT_ID, settings.threshold_mode.name());
    }
}

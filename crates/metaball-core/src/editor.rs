//! The editor facade the UI talks to.
//!
//! Every scene, view or camera mutation goes through here and ends in one
//! `RenderScheduler::request`; nothing draws synchronously except the
//! explicit flush at the end of a gesture. Failed mutations (bad index) log
//! and request nothing.
//!
//! Outside a drag, every edit also (re)arms the quality-restore timer, so a
//! pass that came out reduced is followed by a full one once input is quiet.

use crate::backend::{FieldBackend, FrameStats, FrameView};
use crate::bounds::{compute_bounds, AxisBounds};
use crate::camera::{PreviewCamera, ViewPreset};
use crate::config::EditorConfig;
use crate::constants::{
    DEFAULT_RADIUS_VIEW_FRACTION, FALLBACK_DEFAULT_RADIUS, SEED_BALL_OFFSET_X,
};
use crate::error::{RenderError, SceneResult};
use crate::field::{Ball, Polarity, ThresholdMode};
use crate::plane::{Plane, Views, Viewport};
use crate::preview::MarchParams;
use crate::quality::{QualityController, SamplingBudget};
use crate::scad::{build_scad, parse_scad};
use crate::scene::{BallSpec, Scene};
use crate::scheduler::{DebounceTimer, FrameHost, RenderScheduler, TimerHost};
use crate::settings::RenderSettings;
use crate::slice::SliceParams;
use glam::{Vec2, Vec3};
use instant::Instant;
use std::time::Duration;

/// Relative radius change per wheel notch.
pub const WHEEL_RESIZE_STEP: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drag {
    /// Moving a ball in one plane. `grab` is ball center minus pointer, in
    /// plane coordinates.
    Ball {
        plane: Plane,
        index: usize,
        grab: Vec2,
    },
    Pan {
        last: Vec2,
    },
    Orbit {
        last: Vec2,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub backend: &'static str,
    pub cost: Duration,
    pub budget: SamplingBudget,
    pub stats: FrameStats,
}

pub struct Editor<F: FrameHost, T: TimerHost> {
    scene: Scene,
    views: Views,
    camera: PreviewCamera,
    preview_viewport: Viewport,
    config: EditorConfig,
    quality: QualityController,
    scheduler: RenderScheduler<F>,
    restore_timer: DebounceTimer<T>,
    drag: Option<Drag>,
    frames: u64,
}

impl<F: FrameHost, T: TimerHost> Editor<F, T> {
    pub fn new(config: EditorConfig, frames: F, timers: T) -> Self {
        Self {
            scene: Scene::new(),
            views: Views::default(),
            camera: PreviewCamera::default(),
            preview_viewport: Viewport::default(),
            quality: QualityController::new(config.quality),
            restore_timer: DebounceTimer::new(timers, config.quality.restore_delay),
            scheduler: RenderScheduler::new(frames),
            config,
            drag: None,
            frames: 0,
        }
    }

    // ---------------- Accessors ----------------

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn balls(&self) -> &[Ball] {
        self.scene.balls()
    }

    pub fn selected(&self) -> Option<usize> {
        self.scene.selected()
    }

    pub fn views(&self) -> &Views {
        &self.views
    }

    pub fn camera(&self) -> &PreviewCamera {
        &self.camera
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.config.settings
    }

    pub fn quality(&self) -> &QualityController {
        &self.quality
    }

    pub fn scheduler(&self) -> &RenderScheduler<F> {
        &self.scheduler
    }

    pub fn restore_timer(&self) -> &DebounceTimer<T> {
        &self.restore_timer
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn request_render(&mut self) {
        self.scheduler.request();
    }

    /// Request a frame for an edit and arm the restore timer. During a drag
    /// the restore waits for `pointer_up`.
    fn changed(&mut self) {
        self.request_render();
        if self.drag.is_none() {
            self.restore_timer.schedule();
        }
    }

    fn done<R>(&mut self, result: SceneResult<R>) -> Option<R> {
        match result {
            Ok(value) => {
                self.changed();
                Some(value)
            }
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        }
    }

    // ---------------- Scene mutations ----------------

    /// Radius for new balls: a tenth of the smaller XY view edge, in world
    /// units at the current zoom.
    pub fn default_radius(&self) -> f32 {
        let vp = self.views.viewport(Plane::Xy);
        let base = vp.width.min(vp.height) * DEFAULT_RADIUS_VIEW_FRACTION;
        let base = if base > 0.0 && base.is_finite() {
            base
        } else {
            FALLBACK_DEFAULT_RADIUS
        };
        base / self.views.get(Plane::Xy).zoom
    }

    /// Two balls either side of the origin.
    pub fn seed_scene(&mut self) {
        let r = self.default_radius();
        for x in [-SEED_BALL_OFFSET_X, SEED_BALL_OFFSET_X] {
            self.scene
                .add(BallSpec::at(Vec3::new(x, 0.0, 0.0)).with_radius(r), r);
        }
        self.changed();
    }

    pub fn add(&mut self, spec: BallSpec) -> usize {
        let index = self.scene.add(spec, self.default_radius());
        self.changed();
        index
    }

    pub fn remove(&mut self, index: usize) -> Option<Ball> {
        let result = self.scene.remove(index);
        self.done(result)
    }

    pub fn remove_selected(&mut self) -> Option<Ball> {
        let index = self.scene.selected()?;
        self.remove(index)
    }

    pub fn set_radius(&mut self, index: usize, value: f32) -> bool {
        let result = self.scene.set_radius(index, value);
        self.done(result).is_some()
    }

    /// Radius from an input field; unparsable text is ignored.
    pub fn set_radius_text(&mut self, index: usize, text: &str) -> bool {
        match text.trim().parse::<f32>() {
            Ok(value) => self.set_radius(index, value),
            Err(_) => {
                log::debug!("ignoring radius text '{}'", text);
                false
            }
        }
    }

    /// Wheel over a slice with a selection: 5% per notch, floor 5 units.
    pub fn wheel_resize_selected(&mut self, delta_y: f32) -> Option<f32> {
        let index = self.scene.selected()?;
        let factor = if delta_y > 0.0 {
            1.0 - WHEEL_RESIZE_STEP
        } else {
            1.0 + WHEEL_RESIZE_STEP
        };
        let result = self.scene.scale_radius(index, factor);
        self.done(result)
    }

    pub fn set_position(&mut self, index: usize, position: Vec3) -> bool {
        let result = self.scene.set_position(index, position);
        self.done(result).is_some()
    }

    pub fn toggle_polarity(&mut self, index: usize) -> Option<Polarity> {
        let result = self.scene.toggle_polarity(index);
        self.done(result)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> bool {
        let result = self.scene.rename(index, name);
        self.done(result).is_some()
    }

    pub fn set_selection(&mut self, index: Option<usize>) -> Option<usize> {
        let selected = self.scene.set_selection(index);
        self.changed();
        selected
    }

    pub fn duplicate(&mut self, index: usize) -> Option<usize> {
        let result = self.scene.duplicate(index);
        self.done(result)
    }

    pub fn split(&mut self, index: usize) -> Option<(usize, usize)> {
        let result = self.scene.split(index);
        self.done(result)
    }

    // ---------------- Settings ----------------

    pub fn set_iso_text(&mut self, text: &str) -> f32 {
        self.config.settings.set_iso_text(text);
        self.changed();
        self.config.settings.iso
    }

    pub fn set_resolution_text(&mut self, text: &str) -> u32 {
        self.config.settings.set_resolution_text(text);
        self.changed();
        self.config.settings.base_resolution
    }

    pub fn set_threshold_mode(&mut self, mode: ThresholdMode) {
        self.config.settings.threshold_mode = mode;
        self.changed();
    }

    // ---------------- Import / export ----------------

    pub fn export_scad(&self) -> String {
        build_scad(self.scene.balls(), self.config.settings.iso)
    }

    /// Replace the scene with the balls parsed from `text`. Returns how many
    /// were read; zero leaves the scene untouched.
    pub fn import_scad(&mut self, text: &str) -> usize {
        let imported = parse_scad(text);
        if imported.is_empty() {
            log::info!("import: no balls parsed");
            return 0;
        }
        let count = imported.balls.len();
        let balls = imported
            .balls
            .into_iter()
            .enumerate()
            .map(|(i, mut ball)| {
                if ball.name.is_empty() {
                    ball.name = format!("Ball {}", i + 1);
                }
                ball
            })
            .collect();
        self.scene.replace_all(balls);
        if let Some(iso) = imported.iso.filter(|v| v.is_finite() && *v > 0.0) {
            self.config.settings.iso = iso;
        }
        log::info!("import: {} balls", count);
        self.changed();
        count
    }

    // ---------------- Coordinates ----------------

    pub fn set_viewport(&mut self, plane: Plane, viewport: Viewport) {
        self.views.set_viewport(plane, viewport);
        self.request_render();
    }

    pub fn set_preview_viewport(&mut self, viewport: Viewport) {
        self.preview_viewport = viewport;
        self.request_render();
    }

    pub fn preview_viewport(&self) -> Viewport {
        self.preview_viewport
    }

    pub fn screen_to_world(&self, plane: Plane, px: Vec2) -> Vec2 {
        self.views.screen_to_world(plane, px)
    }

    pub fn world_to_screen(&self, plane: Plane, hv: Vec2) -> Vec2 {
        self.views.world_to_screen(plane, hv)
    }

    pub fn hit_test(&self, plane: Plane, px: Vec2) -> Option<usize> {
        self.views.hit_test(plane, self.scene.balls(), px)
    }

    // ---------------- Camera ----------------

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.views.pan(dx, dy);
        self.changed();
    }

    /// One zoom notch for all planes; positive `amount` zooms out.
    pub fn zoom(&mut self, amount: f32) {
        self.views.zoom(amount);
        self.changed();
    }

    pub fn rotate_preview(&mut self, dx: f32, dy: f32) {
        self.camera.rotate(dx, dy);
        self.changed();
    }

    pub fn dolly_preview(&mut self, amount: f32) {
        self.camera.dolly(amount);
        self.changed();
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.camera.apply_preset(preset);
        self.changed();
    }

    /// Preset by name; unknown names are ignored.
    pub fn apply_preset_named(&mut self, name: &str) -> bool {
        match ViewPreset::from_name(name) {
            Some(preset) => {
                self.apply_preset(preset);
                true
            }
            None => {
                log::debug!("unknown view preset '{}'", name);
                false
            }
        }
    }

    // ---------------- Interaction / quality ----------------

    /// Drop to fast mode; a pending restore is cancelled.
    pub fn begin_interaction(&mut self) {
        self.restore_timer.cancel();
        self.quality.begin_interaction();
    }

    /// Schedule the restore, replacing any earlier one.
    pub fn end_interaction(&mut self) {
        self.restore_timer.schedule();
    }

    /// A discrete input (wheel notch, key press) counts as a whole gesture.
    pub fn tick_interaction(&mut self) {
        self.begin_interaction();
        self.end_interaction();
    }

    /// Restore-timer callback. Returns whether full quality was restored.
    pub fn on_quality_timer(&mut self) -> bool {
        if !self.restore_timer.fired() {
            return false;
        }
        self.quality.restore();
        self.request_render();
        true
    }

    pub fn pointer_down_slice(&mut self, plane: Plane, px: Vec2) -> Option<usize> {
        self.begin_interaction();
        match self.hit_test(plane, px) {
            Some(index) => {
                let center = self
                    .scene
                    .get(index)
                    .map_or(Vec2::ZERO, |b| plane.project(b.center));
                let grab = center - self.screen_to_world(plane, px);
                self.drag = Some(Drag::Ball { plane, index, grab });
                self.set_selection(Some(index));
                Some(index)
            }
            None => {
                self.drag = Some(Drag::Pan { last: px });
                // A miss deselects.
                if self.scene.selected().is_some() {
                    self.set_selection(None);
                }
                None
            }
        }
    }

    pub fn pointer_down_preview(&mut self, px: Vec2) {
        self.begin_interaction();
        self.drag = Some(Drag::Orbit { last: px });
    }

    /// Returns whether a gesture consumed the move.
    pub fn pointer_move(&mut self, px: Vec2) -> bool {
        match self.drag {
            Some(Drag::Ball { plane, index, grab }) => {
                let hv = self.screen_to_world(plane, px) + grab;
                match self.scene.get(index) {
                    Some(ball) => {
                        let position = plane.with_in_plane(ball.center, hv);
                        self.set_position(index, position)
                    }
                    None => {
                        self.drag = None;
                        false
                    }
                }
            }
            Some(Drag::Pan { last }) => {
                let d = px - last;
                self.drag = Some(Drag::Pan { last: px });
                self.pan(d.x, d.y);
                true
            }
            Some(Drag::Orbit { last }) => {
                let d = px - last;
                self.drag = Some(Drag::Orbit { last: px });
                self.rotate_preview(d.x, d.y);
                true
            }
            None => false,
        }
    }

    /// Ends the gesture. Returns true when the caller must render
    /// immediately; any scheduled frame has been cancelled.
    pub fn pointer_up(&mut self) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        self.end_interaction();
        self.scheduler.flush();
        true
    }

    // ---------------- Frames ----------------

    /// Frame callback entry. True when a render pass should run now.
    pub fn frame_fired(&mut self) -> bool {
        self.scheduler.frame_fired()
    }

    pub fn bounds(&self) -> AxisBounds {
        compute_bounds(self.scene.balls())
    }

    pub fn budget(&self) -> SamplingBudget {
        self.quality.budget(self.config.settings.base_resolution)
    }

    /// Snapshot of the current state for one render pass.
    pub fn frame_view(&self) -> FrameView<'_> {
        let settings = &self.config.settings;
        let bounds = self.bounds();
        let budget = self.budget();
        FrameView {
            balls: self.scene.balls(),
            selected: self.scene.selected(),
            views: &self.views,
            camera: &self.camera,
            preview_viewport: self.preview_viewport,
            bounds,
            budget,
            slice: SliceParams {
                iso: settings.iso,
                mode: settings.threshold_mode,
                resolution: budget.resolution,
                samples: budget.column_samples,
            },
            march: MarchParams::new(
                settings.iso,
                settings.threshold_mode,
                budget.march_steps,
                &bounds,
            ),
        }
    }

    /// Render through `backend`, timing the pass for the quality controller.
    /// A failed pass requests another frame so the views don't stay stale.
    pub fn render_with<B: FieldBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<FrameReport, RenderError> {
        let start = Instant::now();
        let view = self.frame_view();
        let budget = view.budget;
        let stats = match backend.render(&view) {
            Ok(stats) => stats,
            Err(e) => {
                self.request_render();
                return Err(e);
            }
        };
        let cost = start.elapsed();
        self.record_frame_cost(cost);
        self.frames += 1;
        Ok(FrameReport {
            backend: backend.name(),
            cost,
            budget,
            stats,
        })
    }

    /// Only passes inside an interaction window (fast mode, a drag, or a
    /// pending restore) feed the controller; a pass at rest stays at full
    /// quality.
    pub fn record_frame_cost(&mut self, cost: Duration) {
        if self.quality.is_fast() || self.drag.is_some() || self.restore_timer.is_pending() {
            self.quality.record_frame_cost(cost);
        }
    }

    /// One-line summary for the status bar.
    pub fn status_line(&self, backend: &str) -> String {
        let negatives = self
            .scene
            .balls()
            .iter()
            .filter(|b| b.polarity.is_negative())
            .count();
        let budget = self.budget();
        format!(
            "{} balls ({} negative) | iso {:.2} | res {}{} | {}",
            self.scene.len(),
            negatives,
            self.config.settings.iso,
            budget.resolution,
            if self.quality.is_full_quality() {
                ""
            } else {
                " (fast)"
            },
            backend
        )
    }
}

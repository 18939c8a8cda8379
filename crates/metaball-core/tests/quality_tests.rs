mod common;

use common::{FakeFrames, FakeTimers};
use glam::Vec2;
use metaball_core::constants::{
    MIN_COLUMN_SAMPLES, MIN_MARCH_STEPS, MIN_RESOLUTION, PREVIEW_MARCH_STEPS,
    QUALITY_RESTORE_DELAY,
};
use metaball_core::quality::budget_for_scale;
use metaball_core::{
    BallSpec, Editor, EditorConfig, Plane, QualityConfig, QualityController, Viewport,
};
use std::time::Duration;

fn full() -> metaball_core::SamplingBudget {
    budget_for_scale(120, 1.0)
}

#[test]
fn full_quality_budget_matches_base_values() {
    let q = QualityController::new(QualityConfig::default());
    let b = q.budget(120);
    assert_eq!(b.resolution, 120);
    assert_eq!(b.column_samples, 30);
    assert_eq!(b.march_steps, PREVIEW_MARCH_STEPS);
    assert!(q.is_full_quality());
}

#[test]
fn fast_mode_scales_all_three_counts_together() {
    let mut q = QualityController::new(QualityConfig::default());
    q.begin_interaction();
    let b = q.budget(120);
    assert_eq!(b.resolution, 60);
    assert_eq!(b.column_samples, 15);
    assert_eq!(b.march_steps, 48);
    assert!(!q.is_full_quality());
}

#[test]
fn budget_never_drops_below_floors() {
    for base in [1, 10, 11, 120, 400] {
        for scale in [0.0, 0.01, 0.5, 1.0, f32::NAN] {
            let b = budget_for_scale(base, scale);
            assert!(b.resolution >= MIN_RESOLUTION);
            assert!(b.column_samples >= MIN_COLUMN_SAMPLES);
            assert!(b.march_steps >= MIN_MARCH_STEPS);
        }
    }
}

#[test]
fn slow_frames_lower_the_scale_within_limits() {
    let mut q = QualityController::new(QualityConfig::default());
    // Twice the budget: scale halves on the first sample.
    q.record_frame_cost(Duration::from_micros(33_400));
    assert!((q.scale() - 0.5).abs() < 1e-3);
    for _ in 0..20 {
        q.record_frame_cost(Duration::from_millis(200));
    }
    assert_eq!(q.scale(), QualityConfig::default().min_scale);
    assert!(q.frame_cost_ms().unwrap_or(0.0) > 100.0);
}

#[test]
fn cheap_frames_recover_gradually() {
    let mut q = QualityController::new(QualityConfig::default());
    q.record_frame_cost(Duration::from_millis(100));
    let low = q.scale();
    // The smoothed cost has to come back under budget before recovery starts.
    for _ in 0..30 {
        q.record_frame_cost(Duration::from_millis(2));
    }
    let mid = q.scale();
    assert!(mid > low);
    for _ in 0..100 {
        q.record_frame_cost(Duration::from_millis(2));
    }
    assert_eq!(q.budget(120), full());
}

#[test]
fn restore_returns_to_maximum_immediately() {
    let mut q = QualityController::new(QualityConfig::default());
    q.begin_interaction();
    q.record_frame_cost(Duration::from_millis(500));
    q.restore();
    assert!(q.is_full_quality());
    assert!(!q.is_fast());
    assert_eq!(q.frame_cost_ms(), None);
    assert_eq!(q.budget(120), full());
}

#[test]
fn burst_of_interaction_then_silence_restores_full_quality() {
    let mut editor = Editor::new(
        EditorConfig::default(),
        FakeFrames::default(),
        FakeTimers::default(),
    );
    editor.set_viewport(Plane::Xy, Viewport::new(400.0, 400.0));
    editor.add(BallSpec::at(glam::Vec3::ZERO).with_radius(40.0));

    // Drag the ball around: every move renders at reduced quality.
    editor.pointer_down_slice(Plane::Xy, Vec2::new(200.0, 200.0));
    for i in 0..50 {
        editor.pointer_move(Vec2::new(200.0 + i as f32, 200.0));
        editor.record_frame_cost(Duration::from_millis(30));
        assert!(editor.budget().resolution < 120);
        assert!(editor.budget().resolution >= MIN_RESOLUTION);
    }
    // Wheel notches during the gesture keep only one restore timer alive.
    for _ in 0..5 {
        editor.tick_interaction();
    }
    assert!(editor.pointer_up());
    assert_eq!(editor.restore_timer().host().live(), 1);
    let (_, delay) = *editor.restore_timer().host().scheduled.last().unwrap();
    assert_eq!(delay, QUALITY_RESTORE_DELAY);

    // Still reduced until the quiet period elapses.
    assert!(editor.budget().resolution < 120);
    assert!(editor.on_quality_timer());
    assert_eq!(editor.budget(), full());
    // The restore asks for one final full-quality frame.
    assert!(editor.scheduler().is_pending());
    // A stale second callback does nothing.
    assert!(!editor.on_quality_timer());
}

#[test]
fn new_interaction_cancels_pending_restore() {
    let mut editor = Editor::new(
        EditorConfig::default(),
        FakeFrames::default(),
        FakeTimers::default(),
    );
    editor.tick_interaction();
    assert!(editor.restore_timer().is_pending());
    editor.pointer_down_preview(Vec2::ZERO);
    assert!(!editor.restore_timer().is_pending());
    assert_eq!(editor.restore_timer().host().live(), 0);
    assert!(editor.quality().is_fast());
}

#[test]
fn panel_edit_after_slow_pass_comes_back_to_full_quality() {
    let mut editor = Editor::new(
        EditorConfig::default(),
        FakeFrames::default(),
        FakeTimers::default(),
    );
    editor.set_viewport(Plane::Xy, Viewport::new(400.0, 400.0));
    editor.add(BallSpec::at(glam::Vec3::ZERO).with_radius(40.0));
    assert!(editor.on_quality_timer());

    // A slow pass at rest keeps full quality.
    editor.record_frame_cost(Duration::from_millis(40));
    assert_eq!(editor.budget(), full());
    assert!(!editor.restore_timer().is_pending());

    // An edit from the side panel arms the restore; its slow pass reduces.
    assert!(editor.set_radius(0, 25.0));
    assert!(editor.restore_timer().is_pending());
    editor.record_frame_cost(Duration::from_millis(40));
    assert!(editor.budget().resolution < 120);

    assert!(editor.on_quality_timer());
    assert_eq!(editor.budget(), full());
    assert!(editor.quality().is_full_quality());

    // The final full pass is slow too; it must not knock quality down again.
    editor.record_frame_cost(Duration::from_millis(40));
    assert_eq!(editor.budget(), full());
}

#[test]
fn every_edit_rearms_a_single_restore() {
    let mut editor = Editor::new(
        EditorConfig::default(),
        FakeFrames::default(),
        FakeTimers::default(),
    );
    let i = editor.add(BallSpec::default());
    editor.toggle_polarity(i);
    editor.duplicate(i);
    editor.set_iso_text("2");
    editor.apply_preset(metaball_core::ViewPreset::Top);
    assert!(editor.restore_timer().is_pending());
    assert_eq!(editor.restore_timer().host().live(), 1);
}

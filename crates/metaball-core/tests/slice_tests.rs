use glam::{Vec2, Vec3};
use metaball_core::constants::{NEGATIVE_RGBA, POSITIVE_RGBA};
use metaball_core::raster::TRANSPARENT;
use metaball_core::slice::{
    classify_column, classify_slice, column_samples, render_slice, slice_markers, CellClass,
    MarkerStyle, SliceParams,
};
use metaball_core::{compute_bounds, Ball, Plane, Raster, ThresholdMode, ViewState, Viewport};

fn params(resolution: u32) -> SliceParams {
    SliceParams {
        iso: 1.0,
        mode: ThresholdMode::SignedTotal,
        resolution,
        samples: column_samples(resolution),
    }
}

#[test]
fn column_samples_scale_with_resolution_and_have_a_floor() {
    assert_eq!(column_samples(120), 30);
    assert_eq!(column_samples(60), 15);
    assert_eq!(column_samples(10), 5);
    assert_eq!(column_samples(1), 5);
}

#[test]
fn single_positive_ball_tints_center_not_corner() {
    let balls = [Ball::positive(Vec3::ZERO, 50.0)];
    let bounds = compute_bounds(&balls);
    let vp = Viewport::new(200.0, 200.0);
    let grid = classify_slice(Plane::Xy, &ViewState::default(), vp, &balls, &bounds, &params(20));
    assert_eq!(grid.resolution(), 20);
    assert_eq!(grid.get(10, 10), CellClass::Positive);
    assert_eq!(grid.get(0, 0), CellClass::Empty);
    assert_eq!(grid.count(CellClass::Negative), 0);
    // Out of range reads are empty, not a panic.
    assert_eq!(grid.get(20, 3), CellClass::Empty);
}

#[test]
fn ball_off_the_plane_is_found_by_column_sampling() {
    // Far along Z: the XY slice still sees it because the column spans the
    // padded Z range.
    let balls = [Ball::positive(Vec3::new(0.0, 0.0, 80.0), 30.0)];
    let bounds = compute_bounds(&balls);
    let class = classify_column(
        Plane::Xy,
        Vec2::ZERO,
        bounds.z,
        &balls,
        1.0,
        ThresholdMode::SignedTotal,
        column_samples(120),
    );
    assert_eq!(class, CellClass::Positive);
}

#[test]
fn overlapping_signs_classify_as_both() {
    let balls = [
        Ball::positive(Vec3::ZERO, 50.0),
        Ball::negative(Vec3::ZERO, 10.0),
    ];
    let bounds = compute_bounds(&balls);
    let class = classify_column(
        Plane::Xz,
        Vec2::new(0.5, 0.5),
        bounds.y,
        &balls,
        1.0,
        ThresholdMode::SignedTotal,
        31,
    );
    assert_eq!(class, CellClass::Both);
}

#[test]
fn equal_negative_ball_leaves_only_negative_tint() {
    let balls = [
        Ball::positive(Vec3::ZERO, 40.0),
        Ball::negative(Vec3::ZERO, 40.0),
    ];
    let bounds = compute_bounds(&balls);
    let grid = classify_slice(
        Plane::Yz,
        &ViewState::default(),
        Viewport::new(100.0, 100.0),
        &balls,
        &bounds,
        &params(10),
    );
    assert_eq!(grid.count(CellClass::Positive), 0);
    assert_eq!(grid.count(CellClass::Both), 0);
    assert!(grid.count(CellClass::Negative) > 0);
}

#[test]
fn positive_only_mode_keeps_positive_under_a_hole() {
    let balls = [
        Ball::positive(Vec3::ZERO, 40.0),
        Ball::negative(Vec3::ZERO, 40.0),
    ];
    let bounds = compute_bounds(&balls);
    let class = classify_column(
        Plane::Xy,
        Vec2::new(3.0, 0.0),
        bounds.z,
        &balls,
        1.0,
        ThresholdMode::PositiveOnly,
        11,
    );
    assert_eq!(class, CellClass::Both);
}

#[test]
fn both_color_is_channel_average() {
    assert_eq!(CellClass::Positive.color(), Some(POSITIVE_RGBA));
    assert_eq!(CellClass::Negative.color(), Some(NEGATIVE_RGBA));
    assert_eq!(CellClass::Both.color(), Some([137, 107, 90, 200]));
    assert_eq!(CellClass::Empty.color(), None);
}

#[test]
fn render_slice_fills_viewport_sized_raster() {
    let balls = [Ball::positive(Vec3::ZERO, 50.0)];
    let bounds = compute_bounds(&balls);
    let mut raster = Raster::new(1, 1);
    render_slice(
        Plane::Xy,
        &ViewState::default(),
        Viewport::new(120.0, 90.0),
        &balls,
        &bounds,
        &params(30),
        &mut raster,
    );
    assert_eq!((raster.width(), raster.height()), (120, 90));
    assert_eq!(raster.data().len(), 120 * 90 * 4);
    assert_eq!(raster.pixel(60, 45), Some(POSITIVE_RGBA));
    assert_eq!(raster.pixel(0, 0), Some(TRANSPARENT));
    assert_eq!(raster.pixel(119, 89), Some(TRANSPARENT));
    assert_eq!(raster.pixel(120, 0), None);
}

#[test]
fn render_slice_clears_stale_pixels() {
    let bounds = compute_bounds(&[]);
    let mut raster = Raster::new(50, 50);
    raster.clear(POSITIVE_RGBA);
    render_slice(
        Plane::Xz,
        &ViewState::default(),
        Viewport::new(50.0, 50.0),
        &[],
        &bounds,
        &params(10),
        &mut raster,
    );
    assert!(raster.data().iter().all(|&b| b == 0));
}

#[test]
fn empty_viewport_gives_empty_raster() {
    let balls = [Ball::positive(Vec3::ZERO, 50.0)];
    let bounds = compute_bounds(&balls);
    let mut raster = Raster::new(10, 10);
    render_slice(
        Plane::Xy,
        &ViewState::default(),
        Viewport::new(0.0, 0.0),
        &balls,
        &bounds,
        &params(10),
        &mut raster,
    );
    assert_eq!(raster.data().len(), 0);
}

#[test]
fn markers_follow_selection_and_polarity() {
    let balls = [
        Ball::positive(Vec3::new(10.0, 0.0, 0.0), 5.0),
        Ball::negative(Vec3::ZERO, 0.2),
        Ball::positive(Vec3::ZERO, 8.0),
    ];
    let mut view = ViewState::default();
    view.zoom_by(2.0);
    let markers = slice_markers(Plane::Xy, &view, Viewport::new(100.0, 100.0), &balls, Some(2));
    assert_eq!(markers.len(), 3);
    assert_eq!(markers[0].style, MarkerStyle::Positive);
    assert_eq!(markers[0].center, Vec2::new(70.0, 50.0));
    assert_eq!(markers[0].radius_px, 10.0);
    assert_eq!(markers[1].style, MarkerStyle::Negative);
    // Tiny balls still get a visible outline.
    assert_eq!(markers[1].radius_px, 1.0);
    assert_eq!(markers[2].style, MarkerStyle::Selected);
    assert_eq!(MarkerStyle::Selected.css(), "#cc0000");
}

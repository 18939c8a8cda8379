mod common;

use common::approx;
use glam::{Vec2, Vec3};
use metaball_core::constants::{ZOOM_MAX, ZOOM_MIN};
use metaball_core::{hit_test, Axis, Ball, Plane, ViewState, Viewport, Views};

fn views_400() -> Views {
    let mut views = Views::default();
    for plane in Plane::ALL {
        views.set_viewport(plane, Viewport::new(400.0, 300.0));
    }
    views
}

#[test]
fn planes_name_their_axes() {
    assert_eq!(
        (Plane::Xy.horizontal(), Plane::Xy.vertical(), Plane::Xy.missing()),
        (Axis::X, Axis::Y, Axis::Z)
    );
    assert_eq!(
        (Plane::Xz.horizontal(), Plane::Xz.vertical(), Plane::Xz.missing()),
        (Axis::X, Axis::Z, Axis::Y)
    );
    assert_eq!(
        (Plane::Yz.horizontal(), Plane::Yz.vertical(), Plane::Yz.missing()),
        (Axis::Z, Axis::Y, Axis::X)
    );
}

#[test]
fn lift_inverts_project() {
    let p = Vec3::new(1.5, -2.0, 7.25);
    for plane in Plane::ALL {
        let hv = plane.project(p);
        let missing = plane.missing().of(p);
        assert_eq!(plane.lift(hv, missing), p);
    }
}

#[test]
fn origin_maps_to_viewport_center() {
    let views = views_400();
    for plane in Plane::ALL {
        assert_eq!(views.world_to_screen(plane, Vec2::ZERO), Vec2::new(200.0, 150.0));
    }
}

#[test]
fn screen_y_grows_downwards() {
    let views = views_400();
    let up = views.world_to_screen(Plane::Xy, Vec2::new(0.0, 10.0));
    assert_eq!(up, Vec2::new(200.0, 140.0));
}

#[test]
fn screen_to_world_inverts_mapping_with_pan_and_zoom() {
    let mut view = ViewState::default();
    view.pan(30.0, -12.0);
    view.zoom_by(1.7);
    let vp = Viewport::new(640.0, 480.0);
    let hv = Vec2::new(-33.0, 18.5);
    let back = view.screen_to_world(vp, view.world_to_screen(vp, hv));
    assert!(approx(back.x, hv.x, 1e-3));
    assert!(approx(back.y, hv.y, 1e-3));
}

#[test]
fn pan_is_scaled_by_zoom_and_applies_to_all_planes() {
    let mut views = views_400();
    views.zoom(-1.0); // zoom in to 1.1
    views.pan(11.0, 22.0);
    for plane in Plane::ALL {
        let s = views.get(plane);
        assert!(approx(s.offset.x, 10.0, 1e-4));
        assert!(approx(s.offset.y, -20.0, 1e-4));
    }
}

#[test]
fn zoom_is_clamped() {
    let mut views = views_400();
    for _ in 0..100 {
        views.zoom(-1.0);
    }
    assert_eq!(views.get(Plane::Xz).zoom, ZOOM_MAX);
    for _ in 0..200 {
        views.zoom(1.0);
    }
    assert_eq!(views.get(Plane::Yz).zoom, ZOOM_MIN);
}

#[test]
fn hit_test_prefers_later_ball() {
    let views = views_400();
    let balls = [
        Ball::positive(Vec3::ZERO, 20.0),
        Ball::positive(Vec3::ZERO, 10.0),
    ];
    let center = views.world_to_screen(Plane::Xy, Vec2::ZERO);
    assert_eq!(views.hit_test(Plane::Xy, &balls, center), Some(1));
    // Only the bigger, earlier ball reaches 15 px out.
    assert_eq!(
        views.hit_test(Plane::Xy, &balls, center + Vec2::new(15.0, 0.0)),
        Some(0)
    );
    assert_eq!(
        views.hit_test(Plane::Xy, &balls, center + Vec2::new(25.0, 0.0)),
        None
    );
}

#[test]
fn hit_test_accounts_for_zoom() {
    let mut view = ViewState::default();
    view.zoom_by(2.0);
    let vp = Viewport::new(200.0, 200.0);
    let balls = [Ball::positive(Vec3::new(0.0, 0.0, 50.0), 10.0)];
    // Radius 10 at zoom 2 is 20 px on screen.
    assert_eq!(hit_test(Plane::Xy, &view, vp, &balls, Vec2::new(118.0, 100.0)), Some(0));
    assert_eq!(hit_test(Plane::Xy, &view, vp, &balls, Vec2::new(122.0, 100.0)), None);
}

#[test]
fn hit_test_uses_plane_projection() {
    let views = views_400();
    let balls = [Ball::positive(Vec3::new(0.0, 80.0, -60.0), 5.0)];
    // YZ plane: horizontal is Z, vertical is Y.
    let px = views.world_to_screen(Plane::Yz, Vec2::new(-60.0, 80.0));
    assert_eq!(views.hit_test(Plane::Yz, &balls, px), Some(0));
    assert_eq!(views.hit_test(Plane::Xy, &balls, px), None);
}

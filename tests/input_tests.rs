// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use metaball_core::{Plane, ViewPreset};

#[test]
fn editing_keys_map_to_actions() {
    assert_eq!(key_action("Delete", 20.0), Some(KeyAction::RemoveSelected));
    assert_eq!(key_action("Backspace", 20.0), Some(KeyAction::RemoveSelected));
    assert_eq!(key_action("d", 20.0), Some(KeyAction::Duplicate));
    assert_eq!(key_action("S", 20.0), Some(KeyAction::Split));
    assert_eq!(key_action("n", 20.0), Some(KeyAction::TogglePolarity));
    assert_eq!(key_action("a", 20.0), Some(KeyAction::Add));
    assert_eq!(key_action("q", 20.0), None);
    assert_eq!(key_action("Enter", 20.0), None);
}

#[test]
fn arrows_pan_by_step() {
    assert_eq!(
        key_action("ArrowLeft", 15.0),
        Some(KeyAction::Pan { dx: -15.0, dy: 0.0 })
    );
    assert_eq!(
        key_action("ArrowDown", 15.0),
        Some(KeyAction::Pan { dx: 0.0, dy: 15.0 })
    );
}

#[test]
fn plus_zooms_in_and_minus_zooms_out() {
    // Positive amounts zoom out, like wheel-down.
    assert_eq!(key_action("+", 20.0), Some(KeyAction::Zoom(-1.0)));
    assert_eq!(key_action("=", 20.0), Some(KeyAction::Zoom(-1.0)));
    assert_eq!(key_action("-", 20.0), Some(KeyAction::Zoom(1.0)));
}

#[test]
fn digit_keys_select_presets() {
    let presets: Vec<_> = ["1", "2", "3", "4"]
        .iter()
        .map(|k| key_action(k, 20.0))
        .collect();
    assert_eq!(
        presets,
        ViewPreset::ALL
            .iter()
            .map(|p| Some(KeyAction::Preset(*p)))
            .collect::<Vec<_>>()
    );
    assert_eq!(key_action("5", 20.0), None);
}

#[test]
fn wheel_resizes_selection_unless_shift() {
    assert_eq!(wheel_action(false, true, false), WheelAction::ResizeSelected);
    assert_eq!(wheel_action(false, true, true), WheelAction::ZoomViews);
    assert_eq!(wheel_action(false, false, false), WheelAction::ZoomViews);
    assert_eq!(wheel_action(true, true, false), WheelAction::DollyPreview);
}

#[test]
fn css_pixels_scale_to_backing_store() {
    let px = css_to_backing(
        Vec2::new(50.0, 25.0),
        Vec2::new(200.0, 100.0),
        Vec2::new(400.0, 200.0),
    );
    assert_eq!(px, Vec2::new(100.0, 50.0));
    // Collapsed element: pass through.
    let px = css_to_backing(Vec2::new(3.0, 4.0), Vec2::ZERO, Vec2::new(10.0, 10.0));
    assert_eq!(px, Vec2::new(3.0, 4.0));
}

#[test]
fn overlay_ids_name_their_plane() {
    assert_eq!(plane_for_element("overlay-xy"), Some(Plane::Xy));
    assert_eq!(plane_for_element("overlay-yz"), Some(Plane::Yz));
    assert_eq!(plane_for_element("view-3d"), None);
    assert_eq!(plane_for_element("overlay"), None);
}

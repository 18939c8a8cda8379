use glam::Vec3;
use metaball_core::constants::{MIN_RADIUS, WHEEL_MIN_RADIUS};
use metaball_core::{BallSpec, Polarity, Scene, SceneError};

fn two_balls() -> Scene {
    let mut scene = Scene::new();
    scene.add(BallSpec::at(Vec3::new(-60.0, 0.0, 0.0)), 50.0);
    scene.add(BallSpec::at(Vec3::new(60.0, 0.0, 0.0)), 50.0);
    scene
}

#[test]
fn add_appends_selects_and_names() {
    let mut scene = Scene::new();
    let i = scene.add(BallSpec::default(), 30.0);
    assert_eq!(i, 0);
    assert_eq!(scene.selected(), Some(0));
    let ball = scene.get(0).unwrap();
    assert_eq!(ball.name, "Ball 1");
    assert_eq!(ball.radius, 30.0);
    assert_eq!(ball.center, Vec3::new(-30.0, 0.0, 0.0));
    assert_eq!(ball.polarity, Polarity::Positive);
}

#[test]
fn default_position_avoids_full_overlap() {
    let mut scene = Scene::new();
    scene.add(BallSpec::default(), 40.0);
    scene.add(BallSpec::default(), 40.0);
    scene.add(BallSpec::default(), 40.0);
    let xs: Vec<f32> = scene.balls().iter().map(|b| b.center.x).collect();
    assert_eq!(xs, vec![-40.0, 0.0, 40.0]);
    assert_eq!(scene.selected(), Some(2));
}

#[test]
fn add_sanitizes_radius_and_keeps_explicit_fields() {
    let mut scene = Scene::new();
    scene.add(
        BallSpec::at(Vec3::new(1.0, 2.0, 3.0))
            .with_radius(f32::NAN)
            .negative()
            .named("Hole"),
        25.0,
    );
    scene.add(BallSpec::default().with_radius(0.2), 25.0);
    let hole = scene.get(0).unwrap();
    assert_eq!(hole.radius, 25.0);
    assert_eq!(hole.name, "Hole");
    assert!(hole.polarity.is_negative());
    assert_eq!(scene.get(1).unwrap().radius, MIN_RADIUS);
}

#[test]
fn remove_clears_selection() {
    let mut scene = two_balls();
    scene.set_selection(Some(1));
    let removed = scene.remove(0).unwrap();
    assert_eq!(removed.name, "Ball 1");
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.selected(), None);
    assert_eq!(
        scene.remove(5),
        Err(SceneError::IndexOutOfRange { index: 5, len: 1 })
    );
}

#[test]
fn remove_selected_without_selection_is_a_no_op() {
    let mut scene = two_balls();
    scene.set_selection(None);
    assert!(scene.remove_selected().is_none());
    assert_eq!(scene.len(), 2);
}

#[test]
fn set_radius_clamps_and_ignores_non_finite() {
    let mut scene = two_balls();
    assert_eq!(scene.set_radius(0, 12.0), Ok(true));
    assert_eq!(scene.set_radius(0, f32::INFINITY), Ok(false));
    assert_eq!(scene.get(0).unwrap().radius, 12.0);
    scene.set_radius(0, -4.0).unwrap();
    assert_eq!(scene.get(0).unwrap().radius, MIN_RADIUS);
    assert!(scene.set_radius(9, 1.0).is_err());
}

#[test]
fn scale_radius_respects_wheel_floor() {
    let mut scene = two_balls();
    let mut r = 0.0;
    for _ in 0..200 {
        r = scene.scale_radius(0, 0.95).unwrap();
    }
    assert_eq!(r, WHEEL_MIN_RADIUS);
    assert!((scene.scale_radius(0, 1.05).unwrap() - 5.25).abs() < 1e-5);
}

#[test]
fn set_position_keeps_non_finite_components() {
    let mut scene = two_balls();
    scene
        .set_position(1, Vec3::new(f32::NAN, 7.0, -2.0))
        .unwrap();
    assert_eq!(scene.get(1).unwrap().center, Vec3::new(60.0, 7.0, -2.0));
}

#[test]
fn toggle_polarity_round_trips() {
    let mut scene = two_balls();
    assert_eq!(scene.toggle_polarity(0), Ok(Polarity::Negative));
    assert_eq!(scene.toggle_polarity(0), Ok(Polarity::Positive));
}

#[test]
fn invalid_selection_clears() {
    let mut scene = two_balls();
    assert_eq!(scene.set_selection(Some(1)), Some(1));
    assert_eq!(scene.set_selection(Some(2)), None);
    assert_eq!(scene.selected_ball(), None);
}

#[test]
fn duplicate_offsets_and_selects_copy() {
    let mut scene = two_balls();
    let i = scene.duplicate(0).unwrap();
    assert_eq!(i, 2);
    let copy = scene.get(2).unwrap();
    assert_eq!(copy.center, Vec3::new(-35.0, 0.0, 0.0));
    assert_eq!(copy.radius, 50.0);
    assert_eq!(copy.name, "Ball 1 copy");
    assert_eq!(scene.selected(), Some(2));
}

#[test]
fn split_replaces_ball_with_two_halves() {
    let mut scene = two_balls();
    scene.toggle_polarity(1).unwrap();
    let (a, b) = scene.split(1).unwrap();
    assert_eq!((a, b), (1, 2));
    assert_eq!(scene.len(), 3);
    let first = scene.get(1).unwrap();
    let second = scene.get(2).unwrap();
    assert_eq!(first.radius, 25.0);
    assert_eq!(second.radius, 25.0);
    assert_eq!(first.center, Vec3::new(35.0, 0.0, 0.0));
    assert_eq!(second.center, Vec3::new(85.0, 0.0, 0.0));
    assert_eq!(first.name, "Ball 2A");
    assert_eq!(second.name, "Ball 2B");
    assert!(first.polarity.is_negative() && second.polarity.is_negative());
    assert_eq!(scene.selected(), Some(1));
}

#[test]
fn split_of_tiny_ball_keeps_minimum_radius() {
    let mut scene = Scene::new();
    scene.add(BallSpec::default().with_radius(1.0), 1.0);
    scene.split(0).unwrap();
    assert!(scene.balls().iter().all(|b| b.radius >= MIN_RADIUS));
}

#[test]
fn rename_and_replace_all() {
    let mut scene = two_balls();
    scene.rename(0, "Left").unwrap();
    assert_eq!(scene.get(0).unwrap().name, "Left");
    scene.replace_all(Vec::new());
    assert!(scene.is_empty());
    assert_eq!(scene.selected(), None);
}

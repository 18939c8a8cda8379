// Host-side tests for the ball list markup.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/ball_list.rs"]
mod ball_list;

use ball_list::*;
use glam::Vec3;
use metaball_core::{Ball, Polarity};

#[test]
fn names_are_escaped() {
    assert_eq!(
        escape_html("<b>\"Tom\" & 'Jerry'</b>"),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );
    assert_eq!(escape_html("Ball 1"), "Ball 1");
}

#[test]
fn rows_mark_selection_and_sign() {
    let balls = [
        Ball::new(Vec3::ZERO, 12.0, Polarity::Positive, "A"),
        Ball::new(Vec3::X, 7.25, Polarity::Negative, "<B>"),
    ];
    let html = list_html(&balls, Some(1));
    assert_eq!(html.matches("<li ").count(), 2);
    assert!(html.contains("class=\"ball-row\" data-index=\"0\""));
    assert!(html.contains("class=\"ball-row selected negative\" data-index=\"1\""));
    assert!(html.contains("value=\"&lt;B&gt;\""));
    assert!(html.contains("value=\"7.2\"") || html.contains("value=\"7.3\""));
    assert!(html.contains(&format!("data-field=\"{}\"", FIELD_RADIUS)));
}

#[test]
fn empty_scene_renders_nothing() {
    assert!(list_html(&[], None).is_empty());
}

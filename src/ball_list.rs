//! Side-panel list of balls: one row per ball with name and radius inputs.
//!
//! Rows carry `data-index`; inputs carry `data-field` so one delegated
//! listener on the container handles every row.

use metaball_core::Ball;
use web_sys as web;

pub const FIELD_NAME: &str = "name";
pub const FIELD_RADIUS: &str = "radius";

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn row_html(index: usize, ball: &Ball, selected: bool) -> String {
    let mut class = String::from("ball-row");
    if selected {
        class.push_str(" selected");
    }
    if ball.polarity.is_negative() {
        class.push_str(" negative");
    }
    format!(
        "<li class=\"{class}\" data-index=\"{index}\">\
<span class=\"sign\">{sign}</span>\
<input data-field=\"{FIELD_NAME}\" data-index=\"{index}\" value=\"{name}\">\
<input data-field=\"{FIELD_RADIUS}\" data-index=\"{index}\" type=\"number\" min=\"1\" step=\"1\" value=\"{radius:.1}\">\
</li>",
        sign = if ball.polarity.is_negative() { "−" } else { "+" },
        name = escape_html(&ball.name),
        radius = ball.radius,
    )
}

pub fn list_html(balls: &[Ball], selected: Option<usize>) -> String {
    let mut html = String::new();
    for (i, ball) in balls.iter().enumerate() {
        html.push_str(&row_html(i, ball, selected == Some(i)));
    }
    html
}

/// `data-index` of `el` or its nearest row ancestor.
pub fn index_of(el: &web::Element) -> Option<usize> {
    el.closest("[data-index]")
        .ok()
        .flatten()?
        .get_attribute("data-index")?
        .parse()
        .ok()
}

pub fn render(document: &web::Document, list_id: &str, balls: &[Ball], selected: Option<usize>) {
    if let Some(el) = document.get_element_by_id(list_id) {
        el.set_inner_html(&list_html(balls, selected));
    }
}

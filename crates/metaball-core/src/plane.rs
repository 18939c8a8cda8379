//! The three orthogonal cross-section planes and their screen mapping.
//!
//! A plane is described once by its horizontal, vertical and missing axes;
//! the slice sampler, the overlay and hit-testing are all written against
//! that description instead of three copies of the same code.
//!
//! Mapping (pan/zoom aware), identical for every plane:
//!
//! - `screen_x = (h + offset_x) * zoom + width / 2`
//! - `screen_y = height / 2 - (v + offset_y) * zoom`

use crate::bounds::Axis;
use crate::constants::{ZOOM_IN_FACTOR, ZOOM_MAX, ZOOM_MIN, ZOOM_OUT_FACTOR};
use crate::field::Ball;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Xz, Plane::Yz];

    pub fn horizontal(self) -> Axis {
        match self {
            Plane::Xy | Plane::Xz => Axis::X,
            Plane::Yz => Axis::Z,
        }
    }

    pub fn vertical(self) -> Axis {
        match self {
            Plane::Xy | Plane::Yz => Axis::Y,
            Plane::Xz => Axis::Z,
        }
    }

    /// Axis swept by the column sampler.
    pub fn missing(self) -> Axis {
        match self {
            Plane::Xy => Axis::Z,
            Plane::Xz => Axis::Y,
            Plane::Yz => Axis::X,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Plane::Xy => 0,
            Plane::Xz => 1,
            Plane::Yz => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Plane::Xy => "xy",
            Plane::Xz => "xz",
            Plane::Yz => "yz",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "xy" => Some(Plane::Xy),
            "xz" => Some(Plane::Xz),
            "yz" => Some(Plane::Yz),
            _ => None,
        }
    }

    /// In-plane coordinates `(h, v)` of a world point.
    #[inline]
    pub fn project(self, p: Vec3) -> Vec2 {
        Vec2::new(self.horizontal().of(p), self.vertical().of(p))
    }

    /// World point from in-plane coordinates and a missing-axis value.
    #[inline]
    pub fn lift(self, hv: Vec2, missing: f32) -> Vec3 {
        let mut p = Vec3::ZERO;
        self.horizontal().set(&mut p, hv.x);
        self.vertical().set(&mut p, hv.y);
        self.missing().set(&mut p, missing);
        p
    }

    /// Replace the in-plane coordinates of `p`, keeping the missing axis.
    pub fn with_in_plane(self, p: Vec3, hv: Vec2) -> Vec3 {
        self.lift(hv, self.missing().of(p))
    }
}

/// Canvas size in backing-store pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }

    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl ViewState {
    #[inline]
    pub fn world_to_screen(&self, viewport: Viewport, hv: Vec2) -> Vec2 {
        let half = viewport.half();
        Vec2::new(
            (hv.x + self.offset.x) * self.zoom + half.x,
            half.y - (hv.y + self.offset.y) * self.zoom,
        )
    }

    #[inline]
    pub fn screen_to_world(&self, viewport: Viewport, px: Vec2) -> Vec2 {
        let half = viewport.half();
        Vec2::new(
            (px.x - half.x) / self.zoom - self.offset.x,
            (half.y - px.y) / self.zoom - self.offset.y,
        )
    }

    /// Screen-space drag by `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset.x += dx / self.zoom;
        self.offset.y -= dy / self.zoom;
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }
}

/// Per-plane view state. Pan and zoom move all three in lockstep, but each
/// plane keeps its own state object.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Views {
    states: [ViewState; 3],
    viewports: [Viewport; 3],
}

impl Views {
    pub fn get(&self, plane: Plane) -> &ViewState {
        &self.states[plane.index()]
    }

    pub fn get_mut(&mut self, plane: Plane) -> &mut ViewState {
        &mut self.states[plane.index()]
    }

    pub fn viewport(&self, plane: Plane) -> Viewport {
        self.viewports[plane.index()]
    }

    pub fn set_viewport(&mut self, plane: Plane, viewport: Viewport) {
        self.viewports[plane.index()] = viewport;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        for s in &mut self.states {
            s.pan(dx, dy);
        }
    }

    /// One zoom notch; positive `amount` zooms out (wheel down).
    pub fn zoom(&mut self, amount: f32) {
        let factor = if amount > 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            ZOOM_IN_FACTOR
        };
        for s in &mut self.states {
            s.zoom_by(factor);
        }
    }

    pub fn world_to_screen(&self, plane: Plane, hv: Vec2) -> Vec2 {
        self.get(plane).world_to_screen(self.viewport(plane), hv)
    }

    pub fn screen_to_world(&self, plane: Plane, px: Vec2) -> Vec2 {
        self.get(plane).screen_to_world(self.viewport(plane), px)
    }

    /// Topmost ball whose projected circle contains `px`.
    pub fn hit_test(&self, plane: Plane, balls: &[Ball], px: Vec2) -> Option<usize> {
        hit_test(plane, self.get(plane), self.viewport(plane), balls, px)
    }
}

/// Scans from the last ball to the first so later balls win, matching paint
/// order.
pub fn hit_test(
    plane: Plane,
    view: &ViewState,
    viewport: Viewport,
    balls: &[Ball],
    px: Vec2,
) -> Option<usize> {
    balls.iter().enumerate().rev().find_map(|(i, ball)| {
        let center = view.world_to_screen(viewport, plane.project(ball.center));
        (center.distance(px) <= ball.radius * view.zoom).then_some(i)
    })
}

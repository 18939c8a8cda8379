use crate::constants::{BOUNDS_PADDING, EMPTY_SCENE_HALF_EXTENT, MIN_SCENE_EXTENT};
use crate::field::Ball;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    #[inline]
    pub fn set(self, v: &mut Vec3, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
            Axis::Z => v.z = value,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn center(&self) -> f32 {
        0.5 * (self.min + self.max)
    }

    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Padded axis-aligned region enclosing every ball.
///
/// Derived every frame from the scene; never stored across a mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl AxisBounds {
    pub fn empty_scene() -> Self {
        let r = AxisRange::new(-EMPTY_SCENE_HALF_EXTENT, EMPTY_SCENE_HALF_EXTENT);
        Self { x: r, y: r, z: r }
    }

    pub fn axis(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Radius of the sphere through the box corners, floored so a degenerate
    /// scene still frames sensibly.
    pub fn extent(&self) -> f32 {
        let half = (self.max_corner() - self.min_corner()) * 0.5;
        half.length().max(MIN_SCENE_EXTENT)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }
}

impl Default for AxisBounds {
    fn default() -> Self {
        Self::empty_scene()
    }
}

/// Per-axis min of `c - r` and max of `c + r`, padded outward.
pub fn compute_bounds(balls: &[Ball]) -> AxisBounds {
    if balls.is_empty() {
        return AxisBounds::empty_scene();
    }
    let mut lo = Vec3::splat(f32::INFINITY);
    let mut hi = Vec3::splat(f32::NEG_INFINITY);
    for ball in balls {
        lo = lo.min(ball.center - Vec3::splat(ball.radius));
        hi = hi.max(ball.center + Vec3::splat(ball.radius));
    }
    let pad = Vec3::splat(BOUNDS_PADDING);
    lo -= pad;
    hi += pad;
    AxisBounds {
        x: AxisRange::new(lo.x, hi.x),
        y: AxisRange::new(lo.y, hi.y),
        z: AxisRange::new(lo.z, hi.z),
    }
}

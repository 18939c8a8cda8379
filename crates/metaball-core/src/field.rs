//! Inverse-distance potential field of signed spheres.
//!
//! Each ball contributes `r / max(|p - c|, ε)` at point `p`. Positive balls
//! add to the signed total, negative balls subtract from it; the negative
//! magnitudes are also summed separately so the "hole" surface can be drawn
//! on its own. A single positive ball therefore crosses threshold `iso` at
//! distance `r / iso` from its center.
//!
//! This is the only place the sign convention lives. Samplers and the
//! preview renderer go through [`FieldSample::level`] instead of looking at
//! [`Polarity`] themselves.

use crate::constants::{MIN_FIELD_DISTANCE, SINGULAR_CONTRIBUTION};
use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Polarity {
    #[default]
    Positive,
    Negative,
}

impl Polarity {
    pub fn is_negative(self) -> bool {
        matches!(self, Polarity::Negative)
    }

    pub fn toggled(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }
}

/// A signed field source.
#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub center: Vec3,
    /// Always > 0; callers clamp through `Scene::sanitize_radius`.
    pub radius: f32,
    pub polarity: Polarity,
    pub name: String,
}

impl Ball {
    pub fn new(center: Vec3, radius: f32, polarity: Polarity, name: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            polarity,
            name: name.into(),
        }
    }

    pub fn positive(center: Vec3, radius: f32) -> Self {
        Self::new(center, radius, Polarity::Positive, String::new())
    }

    pub fn negative(center: Vec3, radius: f32) -> Self {
        Self::new(center, radius, Polarity::Negative, String::new())
    }

    /// Unsigned contribution magnitude at `point`.
    #[inline]
    pub fn contribution(&self, point: Vec3) -> f32 {
        let dist = point.distance(self.center);
        if dist < MIN_FIELD_DISTANCE {
            SINGULAR_CONTRIBUTION
        } else {
            self.radius / dist
        }
    }
}

/// Which rule decides "inside the positive surface".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThresholdMode {
    /// `positive - negative >= iso` (negative balls carve the solid).
    #[default]
    SignedTotal,
    /// `positive >= iso` (negative balls only draw their own surface).
    PositiveOnly,
}

impl ThresholdMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "signed" | "total" | "signed-total" => Some(ThresholdMode::SignedTotal),
            "positive" | "positive-only" => Some(ThresholdMode::PositiveOnly),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThresholdMode::SignedTotal => "signed",
            ThresholdMode::PositiveOnly => "positive",
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            ThresholdMode::SignedTotal => 0,
            ThresholdMode::PositiveOnly => 1,
        }
    }
}

/// The two isosurfaces the editor visualizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    Positive,
    Negative,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldSample {
    /// `positive - negative`.
    pub total: f32,
    pub positive: f32,
    pub negative: f32,
}

impl FieldSample {
    /// Field level compared against `iso` for the given surface.
    #[inline]
    pub fn level(&self, surface: Surface, mode: ThresholdMode) -> f32 {
        match (surface, mode) {
            (Surface::Positive, ThresholdMode::SignedTotal) => self.total,
            (Surface::Positive, ThresholdMode::PositiveOnly) => self.positive,
            (Surface::Negative, _) => self.negative,
        }
    }

    #[inline]
    pub fn exceeds(&self, surface: Surface, iso: f32, mode: ThresholdMode) -> bool {
        self.level(surface, mode) >= iso
    }
}

/// Evaluate the signed field at `point`.
pub fn field_at(point: Vec3, balls: &[Ball]) -> FieldSample {
    let mut sample = FieldSample::default();
    for ball in balls {
        let c = ball.contribution(point);
        match ball.polarity {
            Polarity::Positive => sample.positive += c,
            Polarity::Negative => sample.negative += c,
        }
    }
    sample.total = sample.positive - sample.negative;
    sample
}

/// Level of one surface at `point`; shorthand used by the marcher and the
/// normal estimator.
#[inline]
pub fn level_at(point: Vec3, balls: &[Ball], surface: Surface, mode: ThresholdMode) -> f32 {
    field_at(point, balls).level(surface, mode)
}

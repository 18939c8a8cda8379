//! Ordered ball collection plus selection.
//!
//! Insertion order is paint order and hit-test priority: the last ball wins
//! on overlap. The selection is either `None` or a valid index; every
//! operation that shrinks the sequence rebinds or clears it.

use crate::constants::{FALLBACK_DEFAULT_RADIUS, MIN_RADIUS, WHEEL_MIN_RADIUS};
use crate::error::{SceneError, SceneResult};
use crate::field::{Ball, Polarity};
use glam::Vec3;

/// Parameters for [`Scene::add`]. Anything left `None` gets a default.
#[derive(Clone, Debug, Default)]
pub struct BallSpec {
    pub position: Option<Vec3>,
    pub radius: Option<f32>,
    pub polarity: Polarity,
    pub name: Option<String>,
}

impl BallSpec {
    pub fn at(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn negative(mut self) -> Self {
        self.polarity = Polarity::Negative;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    balls: Vec<Ball>,
    selected: Option<usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ball> {
        self.balls.get(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_ball(&self) -> Option<&Ball> {
        self.selected.and_then(|i| self.balls.get(i))
    }

    /// Non-finite radii fall back to `fallback`; finite ones clamp to the
    /// minimum radius.
    pub fn sanitize_radius(value: f32, fallback: f32) -> f32 {
        let r = if value.is_finite() && value > 0.0 {
            value
        } else {
            fallback
        };
        if r.is_finite() {
            r.max(MIN_RADIUS)
        } else {
            FALLBACK_DEFAULT_RADIUS
        }
    }

    /// Append a ball and select it. Returns its index.
    pub fn add(&mut self, spec: BallSpec, default_radius: f32) -> usize {
        let radius = Self::sanitize_radius(spec.radius.unwrap_or(default_radius), default_radius);
        let position = spec
            .position
            .filter(|p| p.is_finite())
            .unwrap_or_else(|| self.free_position(radius));
        let index = self.balls.len();
        let name = spec.name.unwrap_or_else(|| format!("Ball {}", index + 1));
        self.balls
            .push(Ball::new(position, radius, spec.polarity, name));
        self.selected = Some(index);
        index
    }

    /// Starting at `(-r, 0, 0)`, step along +X until no ball sits within half
    /// a radius of the candidate.
    fn free_position(&self, radius: f32) -> Vec3 {
        let mut candidate = Vec3::new(-radius, 0.0, 0.0);
        for _ in 0..=self.balls.len() {
            let occupied = self
                .balls
                .iter()
                .any(|b| b.center.distance(candidate) < radius * 0.5);
            if !occupied {
                break;
            }
            candidate.x += radius;
        }
        candidate
    }

    fn check(&self, index: usize) -> SceneResult<()> {
        if index < self.balls.len() {
            Ok(())
        } else {
            Err(SceneError::IndexOutOfRange {
                index,
                len: self.balls.len(),
            })
        }
    }

    /// Remove a ball; the selection is cleared.
    pub fn remove(&mut self, index: usize) -> SceneResult<Ball> {
        self.check(index)?;
        let removed = self.balls.remove(index);
        self.selected = None;
        Ok(removed)
    }

    pub fn remove_selected(&mut self) -> Option<Ball> {
        let index = self.selected?;
        self.remove(index).ok()
    }

    /// Non-finite values are ignored; finite ones clamp to the minimum
    /// radius. Returns whether the radius changed.
    pub fn set_radius(&mut self, index: usize, value: f32) -> SceneResult<bool> {
        self.check(index)?;
        if !value.is_finite() {
            log::debug!("ignoring non-finite radius for ball {}", index);
            return Ok(false);
        }
        let ball = &mut self.balls[index];
        let r = value.max(MIN_RADIUS);
        let changed = ball.radius != r;
        ball.radius = r;
        Ok(changed)
    }

    /// Multiply the radius (wheel resize), never going below the wheel floor.
    pub fn scale_radius(&mut self, index: usize, factor: f32) -> SceneResult<f32> {
        self.check(index)?;
        let ball = &mut self.balls[index];
        if factor.is_finite() && factor > 0.0 {
            ball.radius = (ball.radius * factor).max(WHEEL_MIN_RADIUS);
        }
        Ok(ball.radius)
    }

    /// Non-finite components keep their previous value.
    pub fn set_position(&mut self, index: usize, position: Vec3) -> SceneResult<()> {
        self.check(index)?;
        let c = &mut self.balls[index].center;
        if position.x.is_finite() {
            c.x = position.x;
        }
        if position.y.is_finite() {
            c.y = position.y;
        }
        if position.z.is_finite() {
            c.z = position.z;
        }
        Ok(())
    }

    pub fn toggle_polarity(&mut self, index: usize) -> SceneResult<Polarity> {
        self.check(index)?;
        let ball = &mut self.balls[index];
        ball.polarity = ball.polarity.toggled();
        Ok(ball.polarity)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> SceneResult<()> {
        self.check(index)?;
        self.balls[index].name = name.to_string();
        Ok(())
    }

    /// Out-of-range indices clear the selection.
    pub fn set_selection(&mut self, index: Option<usize>) -> Option<usize> {
        self.selected = index.filter(|&i| i < self.balls.len());
        self.selected
    }

    /// Append a copy shifted half a radius along +X and select it.
    pub fn duplicate(&mut self, index: usize) -> SceneResult<usize> {
        self.check(index)?;
        let mut copy = self.balls[index].clone();
        copy.center.x += copy.radius * 0.5;
        copy.name = if copy.name.is_empty() {
            format!("Ball {}", self.balls.len() + 1)
        } else {
            format!("{} copy", copy.name)
        };
        self.balls.push(copy);
        let new_index = self.balls.len() - 1;
        self.selected = Some(new_index);
        Ok(new_index)
    }

    /// Replace one ball by two half-radius balls offset by `±r/2` along X,
    /// named with "A"/"B" suffixes. The first half keeps the original index
    /// and becomes selected.
    pub fn split(&mut self, index: usize) -> SceneResult<(usize, usize)> {
        self.check(index)?;
        let original = self.balls[index].clone();
        let half = Self::sanitize_radius(original.radius * 0.5, MIN_RADIUS);
        let offset = Vec3::new(original.radius * 0.5, 0.0, 0.0);
        let base = if original.name.is_empty() {
            format!("Ball {}", index + 1)
        } else {
            original.name.clone()
        };
        let a = Ball::new(
            original.center - offset,
            half,
            original.polarity,
            format!("{base}A"),
        );
        let b = Ball::new(
            original.center + offset,
            half,
            original.polarity,
            format!("{base}B"),
        );
        self.balls[index] = a;
        self.balls.insert(index + 1, b);
        self.selected = Some(index);
        Ok((index, index + 1))
    }

    /// Swap in a whole new ball set (import). Selection is cleared.
    pub fn replace_all(&mut self, balls: Vec<Ball>) {
        self.balls = balls;
        self.selected = None;
    }
}

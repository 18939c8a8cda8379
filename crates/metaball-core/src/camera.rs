//! Orbit camera for the 3D preview.
//!
//! Orientation is yaw/pitch around the scene center; distance is derived
//! every frame from the current scene extent so the framing follows the
//! balls, times an independent dolly factor.

use crate::bounds::AxisBounds;
use crate::constants::{
    DOLLY_MAX, DOLLY_MIN, PITCH_LIMIT, PREVIEW_DEFAULT_PITCH, PREVIEW_DEFAULT_YAW,
    PREVIEW_FOV_Y_RADIANS, PREVIEW_FRAMING_MARGIN, ROTATE_RADIANS_PER_PX, ZOOM_IN_FACTOR,
    ZOOM_OUT_FACTOR,
};
use crate::plane::Viewport;
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPreset {
    Front,
    Side,
    Top,
    Isometric,
}

impl ViewPreset {
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Front,
        ViewPreset::Side,
        ViewPreset::Top,
        ViewPreset::Isometric,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "front" => Some(ViewPreset::Front),
            "side" => Some(ViewPreset::Side),
            "top" => Some(ViewPreset::Top),
            "iso" | "isometric" => Some(ViewPreset::Isometric),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Front => "front",
            ViewPreset::Side => "side",
            ViewPreset::Top => "top",
            ViewPreset::Isometric => "isometric",
        }
    }

    /// `(yaw, pitch)` in radians. Front looks down -Z like the XY slice,
    /// side looks down +X like the YZ slice.
    pub fn angles(self) -> (f32, f32) {
        match self {
            ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Side => (-std::f32::consts::FRAC_PI_2, 0.0),
            ViewPreset::Top => (0.0, PITCH_LIMIT),
            ViewPreset::Isometric => (
                std::f32::consts::FRAC_PI_4,
                (1.0 / std::f32::consts::SQRT_2).atan(),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewCamera {
    pub yaw: f32,
    /// Positive looks from above. Clamped to ±`PITCH_LIMIT`.
    pub pitch: f32,
    pub distance_scale: f32,
}

impl Default for PreviewCamera {
    fn default() -> Self {
        Self {
            yaw: PREVIEW_DEFAULT_YAW,
            pitch: PREVIEW_DEFAULT_PITCH,
            distance_scale: 1.0,
        }
    }
}

impl PreviewCamera {
    /// Drag by `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if dx.is_finite() {
            self.yaw = (self.yaw + dx * ROTATE_RADIANS_PER_PX).rem_euclid(std::f32::consts::TAU);
        }
        if dy.is_finite() {
            self.pitch = (self.pitch + dy * ROTATE_RADIANS_PER_PX).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Orbit-distance zoom; positive `amount` moves away.
    pub fn dolly(&mut self, amount: f32) {
        let factor = if amount > 0.0 {
            1.0 / ZOOM_OUT_FACTOR
        } else {
            1.0 / ZOOM_IN_FACTOR
        };
        self.distance_scale = (self.distance_scale * factor).clamp(DOLLY_MIN, DOLLY_MAX);
    }

    pub fn apply_preset(&mut self, preset: ViewPreset) {
        let (yaw, pitch) = preset.angles();
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit vector from the target towards the eye.
    pub fn eye_direction(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * sy, sp, cp * cy)
    }

    /// Place the camera for this frame so the padded bounds fit the view.
    pub fn frame(&self, bounds: &AxisBounds, viewport: Viewport) -> CameraFrame {
        let aspect = viewport.aspect();
        let tan_half_fov = (PREVIEW_FOV_Y_RADIANS * 0.5).tan();
        // Fit against the narrower of the two field-of-view angles.
        let tan_fit = tan_half_fov * aspect.min(1.0);
        let fit_angle = tan_fit.atan();
        let distance =
            bounds.extent() / fit_angle.sin() * PREVIEW_FRAMING_MARGIN * self.distance_scale;

        let target = bounds.center();
        let eye = target + self.eye_direction() * distance;
        let forward = (target - eye).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        CameraFrame {
            eye,
            target,
            forward,
            right,
            up,
            tan_half_fov,
            aspect,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub target: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub tan_half_fov: f32,
    pub aspect: f32,
}

impl CameraFrame {
    /// World ray through screen pixel `px` of `viewport`.
    pub fn ray(&self, viewport: Viewport, px: Vec2) -> Ray {
        let ndc_x = 2.0 * px.x / viewport.width.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * px.y / viewport.height.max(1.0);
        let dir = self.forward
            + self.right * (ndc_x * self.tan_half_fov * self.aspect)
            + self.up * (ndc_y * self.tan_half_fov);
        Ray {
            origin: self.eye,
            dir: dir.normalize(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Slab test against an axis-aligned box. Returns `(t_enter, t_exit)`
    /// with `t_enter` clamped to 0 when the origin is inside.
    pub fn intersect_box(&self, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
        let mut t_enter = 0.0_f32;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.dir[axis];
            let (lo, hi) = (min[axis], max[axis]);
            if d.abs() < 1e-12 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }
        Some((t_enter, t_exit))
    }
}

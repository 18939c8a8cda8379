//! Packed structs shared with `shaders/field.wgsl`.
//!
//! Layouts follow WGSL uniform/storage alignment: every `vec4` field starts
//! on a 16-byte boundary and the structs pad to a multiple of 16.

use crate::backend::FrameView;
use crate::camera::CameraFrame;
use crate::field::{Ball, Polarity};
use crate::plane::Plane;
use bytemuck::{Pod, Zeroable};

/// `plane` value selecting the preview path in the shader.
pub const PREVIEW_TARGET: u32 = 3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuBall {
    pub center: [f32; 3],
    pub radius: f32,
    /// +1 positive, -1 negative.
    pub sign: f32,
    pub _pad: [f32; 3],
}

impl From<&Ball> for GpuBall {
    fn from(ball: &Ball) -> Self {
        Self {
            center: ball.center.to_array(),
            radius: ball.radius,
            sign: match ball.polarity {
                Polarity::Positive => 1.0,
                Polarity::Negative => -1.0,
            },
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FieldUniforms {
    pub viewport: [f32; 2],
    pub offset: [f32; 2],
    pub zoom: f32,
    pub iso: f32,
    pub resolution: f32,
    pub samples: f32,
    pub missing_min: f32,
    pub missing_max: f32,
    /// `Plane::index()` or [`PREVIEW_TARGET`].
    pub plane: u32,
    pub mode: u32,
    pub ball_count: u32,
    pub steps: u32,
    pub normal_eps: f32,
    pub tan_half_fov: f32,
    pub eye: [f32; 4],
    pub right: [f32; 4],
    pub up: [f32; 4],
    /// `w` carries the aspect ratio.
    pub forward: [f32; 4],
    pub box_min: [f32; 4],
    pub box_max: [f32; 4],
}

impl FieldUniforms {
    fn common(frame: &FrameView<'_>) -> Self {
        Self {
            iso: frame.slice.iso,
            mode: frame.slice.mode.as_u32(),
            ball_count: frame.balls.len() as u32,
            resolution: frame.budget.resolution as f32,
            box_min: frame.bounds.min_corner().extend(0.0).to_array(),
            box_max: frame.bounds.max_corner().extend(0.0).to_array(),
            ..Self::zeroed()
        }
    }

    pub fn for_slice(frame: &FrameView<'_>, plane: Plane) -> Self {
        let view = frame.views.get(plane);
        let viewport = frame.views.viewport(plane);
        let range = frame.bounds.axis(plane.missing());
        Self {
            viewport: [viewport.width, viewport.height],
            offset: view.offset.to_array(),
            zoom: view.zoom,
            samples: frame.slice.samples as f32,
            missing_min: range.min,
            missing_max: range.max,
            plane: plane.index() as u32,
            ..Self::common(frame)
        }
    }

    pub fn for_preview(frame: &FrameView<'_>, camera: &CameraFrame) -> Self {
        let viewport = frame.preview_viewport;
        Self {
            viewport: [viewport.width, viewport.height],
            zoom: 1.0,
            plane: PREVIEW_TARGET,
            steps: frame.march.steps,
            normal_eps: frame.march.normal_eps,
            tan_half_fov: camera.tan_half_fov,
            eye: camera.eye.extend(1.0).to_array(),
            right: camera.right.extend(0.0).to_array(),
            up: camera.up.extend(0.0).to_array(),
            forward: camera.forward.extend(camera.aspect).to_array(),
            ..Self::common(frame)
        }
    }
}

pub fn pack_balls(balls: &[Ball]) -> Vec<GpuBall> {
    balls.iter().map(GpuBall::from).collect()
}

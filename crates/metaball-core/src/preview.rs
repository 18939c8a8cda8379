//! Ray-marched 3D preview.
//!
//! One ray per grid cell is clipped to the padded scene box and marched in
//! equal steps. A sign change of `level - iso` between two samples brackets
//! a surface crossing, which is then refined by bisection. Positive hits are
//! opaque and end the ray; negative hits are translucent and composited
//! front-to-back, up to `MAX_SURFACE_LAYERS` per ray.

use crate::bounds::AxisBounds;
use crate::camera::{CameraFrame, PreviewCamera, Ray};
use crate::constants::{
    AMBIENT, DIFFUSE, LIGHT_DIR, MAX_SURFACE_LAYERS, MIN_GRADIENT_LENGTH, MIN_NORMAL_EPS,
    NEGATIVE_SURFACE_ALPHA, NEGATIVE_SURFACE_RGB, NORMAL_EPS_FRACTION, POSITIVE_SURFACE_RGB,
    PREVIEW_BACKGROUND_RGB, REFINE_ITERATIONS, RIM_POWER, RIM_STRENGTH,
};
use crate::field::{field_at, level_at, Ball, Surface, ThresholdMode};
use crate::plane::Viewport;
use crate::raster::{cell_span, Raster, Rgba};
use crate::slice::cell_center;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchParams {
    pub iso: f32,
    pub mode: ThresholdMode,
    pub steps: u32,
    pub refine_iterations: u32,
    pub max_layers: usize,
    /// Finite-difference step for normals.
    pub normal_eps: f32,
}

impl MarchParams {
    pub fn new(iso: f32, mode: ThresholdMode, steps: u32, bounds: &AxisBounds) -> Self {
        Self {
            iso,
            mode,
            steps: steps.max(1),
            refine_iterations: REFINE_ITERATIONS,
            max_layers: MAX_SURFACE_LAYERS,
            normal_eps: (bounds.extent() * NORMAL_EPS_FRACTION).max(MIN_NORMAL_EPS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub surface: Surface,
    pub t: f32,
    pub point: Vec3,
    /// Outward unit normal.
    pub normal: Vec3,
}

pub type Hits = SmallVec<[SurfaceHit; MAX_SURFACE_LAYERS]>;

/// Bisection between `t_lo` (outside, level < iso) and `t_hi` (inside),
/// finished with a linear interpolation of the last bracket.
pub fn refine_crossing(
    ray: &Ray,
    balls: &[Ball],
    surface: Surface,
    params: &MarchParams,
    mut t_lo: f32,
    mut t_hi: f32,
) -> f32 {
    let f = |t: f32| level_at(ray.at(t), balls, surface, params.mode) - params.iso;
    let mut f_lo = f(t_lo);
    let mut f_hi = f(t_hi);
    for _ in 0..params.refine_iterations {
        let mid = 0.5 * (t_lo + t_hi);
        let f_mid = f(mid);
        if f_mid >= 0.0 {
            t_hi = mid;
            f_hi = f_mid;
        } else {
            t_lo = mid;
            f_lo = f_mid;
        }
    }
    let denom = f_hi - f_lo;
    if denom.abs() > f32::EPSILON && denom.is_finite() {
        let t = t_lo + (t_hi - t_lo) * (-f_lo / denom);
        t.clamp(t_lo, t_hi)
    } else {
        t_hi
    }
}

/// Outward normal from central differences of the surface level. The field
/// grows towards the inside, so the normal is the negated gradient. Falls
/// back to `fallback` where the gradient vanishes.
pub fn surface_normal(
    point: Vec3,
    balls: &[Ball],
    surface: Surface,
    mode: ThresholdMode,
    eps: f32,
    fallback: Vec3,
) -> Vec3 {
    let f = |p: Vec3| level_at(p, balls, surface, mode);
    let ex = Vec3::new(eps, 0.0, 0.0);
    let ey = Vec3::new(0.0, eps, 0.0);
    let ez = Vec3::new(0.0, 0.0, eps);
    let grad = Vec3::new(
        f(point + ex) - f(point - ex),
        f(point + ey) - f(point - ey),
        f(point + ez) - f(point - ez),
    ) / (2.0 * eps);
    let len = grad.length();
    if len.is_finite() && len > MIN_GRADIENT_LENGTH {
        -grad / len
    } else {
        fallback
    }
}

fn make_hit(
    ray: &Ray,
    balls: &[Ball],
    surface: Surface,
    params: &MarchParams,
    t: f32,
) -> SurfaceHit {
    let point = ray.at(t);
    let normal = surface_normal(point, balls, surface, params.mode, params.normal_eps, -ray.dir);
    SurfaceHit {
        surface,
        t,
        point,
        normal,
    }
}

/// March one ray through the padded bounds. Hits come back nearest first;
/// an opaque positive hit is always last.
pub fn march_ray(ray: &Ray, balls: &[Ball], bounds: &AxisBounds, params: &MarchParams) -> Hits {
    let mut hits = Hits::new();
    let Some((t0, t1)) = ray.intersect_box(bounds.min_corner(), bounds.max_corner()) else {
        return hits;
    };
    if balls.is_empty() {
        return hits;
    }
    let levels = |t: f32| {
        let s = field_at(ray.at(t), balls);
        [
            s.level(Surface::Positive, params.mode) - params.iso,
            s.level(Surface::Negative, params.mode) - params.iso,
        ]
    };

    let mut prev = levels(t0);
    // Eye inside a surface: report it at the entry point.
    if prev[1] >= 0.0 {
        hits.push(make_hit(ray, balls, Surface::Negative, params, t0));
    }
    if prev[0] >= 0.0 {
        hits.push(make_hit(ray, balls, Surface::Positive, params, t0));
        return hits;
    }

    let dt = (t1 - t0) / params.steps as f32;
    let mut t_prev = t0;
    for i in 1..=params.steps {
        let t = t0 + dt * i as f32;
        let cur = levels(t);

        let mut found: SmallVec<[(f32, Surface); 2]> = SmallVec::new();
        if prev[0] < 0.0 && cur[0] >= 0.0 {
            let th = refine_crossing(ray, balls, Surface::Positive, params, t_prev, t);
            found.push((th, Surface::Positive));
        }
        if prev[1] < 0.0 && cur[1] >= 0.0 {
            let th = refine_crossing(ray, balls, Surface::Negative, params, t_prev, t);
            found.push((th, Surface::Negative));
        }
        found.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (th, surface) in found {
            hits.push(make_hit(ray, balls, surface, params, th));
            if surface == Surface::Positive || hits.len() >= params.max_layers {
                return hits;
            }
        }
        prev = cur;
        t_prev = t;
    }
    hits
}

/// Diffuse plus a fresnel-like rim, in linear 0..1 RGB.
pub fn shade(hit: &SurfaceHit, ray: &Ray) -> Vec3 {
    let base = match hit.surface {
        Surface::Positive => Vec3::from(POSITIVE_SURFACE_RGB),
        Surface::Negative => Vec3::from(NEGATIVE_SURFACE_RGB),
    };
    let light = Vec3::from(LIGHT_DIR).normalize();
    let diffuse = hit.normal.dot(light).max(0.0);
    let facing = hit.normal.dot(-ray.dir).max(0.0);
    let rim = (1.0 - facing).powi(RIM_POWER) * RIM_STRENGTH;
    (base * (AMBIENT + DIFFUSE * diffuse) + Vec3::splat(rim)).clamp(Vec3::ZERO, Vec3::ONE)
}

/// Front-to-back alpha accumulation over the background.
pub fn composite(hits: &[SurfaceHit], ray: &Ray) -> Vec3 {
    let mut color = Vec3::ZERO;
    let mut alpha = 0.0_f32;
    for hit in hits {
        let a = match hit.surface {
            Surface::Positive => 1.0,
            Surface::Negative => NEGATIVE_SURFACE_ALPHA,
        };
        color += shade(hit, ray) * ((1.0 - alpha) * a);
        alpha += (1.0 - alpha) * a;
        if alpha >= 0.999 {
            break;
        }
    }
    color + Vec3::from(PREVIEW_BACKGROUND_RGB) * (1.0 - alpha)
}

#[inline]
fn to_rgba(c: Vec3) -> Rgba {
    let q = |v: f32| {
        if v.is_finite() {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        }
    };
    [q(c.x), q(c.y), q(c.z), 255]
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PreviewStats {
    pub rays: u32,
    pub positive_hits: u32,
    pub negative_hits: u32,
}

/// Render the preview on an `R × R` cell grid into a raster the size of the
/// viewport. Each cell is shaded from the ray through its center.
pub fn render_preview(
    camera: &PreviewCamera,
    viewport: Viewport,
    balls: &[Ball],
    bounds: &AxisBounds,
    resolution: u32,
    params: &MarchParams,
    raster: &mut Raster,
) -> PreviewStats {
    raster.resize(viewport.width as u32, viewport.height as u32);
    let mut stats = PreviewStats::default();
    if viewport.is_empty() {
        return stats;
    }
    let frame: CameraFrame = camera.frame(bounds, viewport);
    let res = resolution.max(1);
    let (w, h) = (raster.width(), raster.height());
    for iy in 0..res {
        let sy = cell_center(iy, res, viewport.height);
        let (y0, y1) = cell_span(iy, res, h);
        for ix in 0..res {
            let sx = cell_center(ix, res, viewport.width);
            let ray = frame.ray(viewport, Vec2::new(sx, sy));
            let hits = march_ray(&ray, balls, bounds, params);
            stats.rays += 1;
            for hit in &hits {
                match hit.surface {
                    Surface::Positive => stats.positive_hits += 1,
                    Surface::Negative => stats.negative_hits += 1,
                }
            }
            let (x0, x1) = cell_span(ix, res, w);
            raster.fill_rect(x0, y0, x1, y1, to_rgba(composite(&hits, &ray)));
        }
    }
    stats
}

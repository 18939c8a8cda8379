//! Cross-section rasterizer.
//!
//! Each plane is split into an `R × R` grid. For every cell the field is
//! sampled `S` times across the missing axis of the padded scene bounds; the
//! cell is tinted when any sample reaches `iso` for the positive and/or the
//! negative surface. This is a presence test per column, not a surface
//! reconstruction: coarse `S` can miss thin features, which is accepted.
//!
//! The WGSL `fs_slice` entry point implements the same classification; this
//! module is the reference the tests run against.

use crate::bounds::{AxisBounds, AxisRange};
use crate::constants::{
    COLUMN_SAMPLE_FRACTION, MARKER_MIN_RADIUS_PX, MARKER_NEGATIVE_RGB, MARKER_POSITIVE_RGB,
    MARKER_SELECTED_RGB, MIN_COLUMN_SAMPLES, NEGATIVE_RGBA, POSITIVE_RGBA,
};
use crate::field::{field_at, Ball, Surface, ThresholdMode};
use crate::plane::{Plane, ViewState, Viewport};
use crate::raster::{cell_span, Raster, Rgba};
use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellClass {
    #[default]
    Empty,
    Positive,
    Negative,
    Both,
}

impl CellClass {
    pub fn from_flags(positive: bool, negative: bool) -> Self {
        match (positive, negative) {
            (false, false) => CellClass::Empty,
            (true, false) => CellClass::Positive,
            (false, true) => CellClass::Negative,
            (true, true) => CellClass::Both,
        }
    }

    /// Tint for this class; `None` leaves the background showing.
    pub fn color(self) -> Option<Rgba> {
        match self {
            CellClass::Empty => None,
            CellClass::Positive => Some(POSITIVE_RGBA),
            CellClass::Negative => Some(NEGATIVE_RGBA),
            CellClass::Both => Some(blend(POSITIVE_RGBA, NEGATIVE_RGBA)),
        }
    }
}

#[inline]
fn blend(a: Rgba, b: Rgba) -> Rgba {
    let avg = |i: usize| ((a[i] as u16 + b[i] as u16) / 2) as u8;
    [avg(0), avg(1), avg(2), avg(3)]
}

/// Per-frame sampling parameters, already scaled by the quality controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceParams {
    pub iso: f32,
    pub mode: ThresholdMode,
    /// Grid cells per side (`R`).
    pub resolution: u32,
    /// Samples across the missing axis per cell (`S`).
    pub samples: u32,
}

/// `S` derived from `R`: a quarter of the resolution, never below the floor.
pub fn column_samples(resolution: u32) -> u32 {
    ((resolution as f32 * COLUMN_SAMPLE_FRACTION).round() as u32).max(MIN_COLUMN_SAMPLES)
}

/// Classify one column through the in-plane point `hv`.
///
/// Stops sampling as soon as both surfaces have been seen.
pub fn classify_column(
    plane: Plane,
    hv: Vec2,
    range: AxisRange,
    balls: &[Ball],
    iso: f32,
    mode: ThresholdMode,
    samples: u32,
) -> CellClass {
    let samples = samples.max(1);
    let mut positive = false;
    let mut negative = false;
    for si in 0..samples {
        let t = if samples == 1 {
            0.5
        } else {
            si as f32 / (samples - 1) as f32
        };
        let sample = field_at(plane.lift(hv, range.lerp(t)), balls);
        positive |= sample.exceeds(Surface::Positive, iso, mode);
        negative |= sample.exceeds(Surface::Negative, iso, mode);
        if positive && negative {
            break;
        }
    }
    CellClass::from_flags(positive, negative)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SliceGrid {
    resolution: u32,
    cells: Vec<CellClass>,
}

impl SliceGrid {
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn get(&self, ix: u32, iy: u32) -> CellClass {
        if ix >= self.resolution || iy >= self.resolution {
            return CellClass::Empty;
        }
        self.cells[(iy * self.resolution + ix) as usize]
    }

    pub fn cells(&self) -> &[CellClass] {
        &self.cells
    }

    pub fn count(&self, class: CellClass) -> usize {
        self.cells.iter().filter(|&&c| c == class).count()
    }
}

/// Screen position of the center of cell `i` along an edge of `size` pixels.
#[inline]
pub fn cell_center(i: u32, resolution: u32, size: f32) -> f32 {
    let step = size / resolution.max(1) as f32;
    i as f32 * step + step * 0.5
}

/// Classify every cell of one plane.
pub fn classify_slice(
    plane: Plane,
    view: &ViewState,
    viewport: Viewport,
    balls: &[Ball],
    bounds: &AxisBounds,
    params: &SliceParams,
) -> SliceGrid {
    let res = params.resolution.max(1);
    let range = bounds.axis(plane.missing());
    let mut cells = Vec::with_capacity((res * res) as usize);
    for iy in 0..res {
        let sy = cell_center(iy, res, viewport.height);
        for ix in 0..res {
            let sx = cell_center(ix, res, viewport.width);
            let hv = view.screen_to_world(viewport, Vec2::new(sx, sy));
            cells.push(classify_column(
                plane,
                hv,
                range,
                balls,
                params.iso,
                params.mode,
                params.samples,
            ));
        }
    }
    SliceGrid {
        resolution: res,
        cells,
    }
}

/// Blit a classified grid into a raster the size of the viewport.
pub fn paint_slice(grid: &SliceGrid, raster: &mut Raster) {
    let res = grid.resolution();
    let (w, h) = (raster.width(), raster.height());
    for iy in 0..res {
        let (y0, y1) = cell_span(iy, res, h);
        for ix in 0..res {
            if let Some(color) = grid.get(ix, iy).color() {
                let (x0, x1) = cell_span(ix, res, w);
                raster.fill_rect(x0, y0, x1, y1, color);
            }
        }
    }
}

/// Classify and paint in one go. The raster is resized to the viewport.
pub fn render_slice(
    plane: Plane,
    view: &ViewState,
    viewport: Viewport,
    balls: &[Ball],
    bounds: &AxisBounds,
    params: &SliceParams,
    raster: &mut Raster,
) -> SliceGrid {
    raster.resize(viewport.width as u32, viewport.height as u32);
    let grid = classify_slice(plane, view, viewport, balls, bounds, params);
    paint_slice(&grid, raster);
    grid
}

// ---------------- Overlay ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    Selected,
    Positive,
    Negative,
}

impl MarkerStyle {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            MarkerStyle::Selected => MARKER_SELECTED_RGB,
            MarkerStyle::Positive => MARKER_POSITIVE_RGB,
            MarkerStyle::Negative => MARKER_NEGATIVE_RGB,
        }
    }

    pub fn css(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn line_width(self) -> f32 {
        match self {
            MarkerStyle::Selected => 2.0,
            _ => 1.0,
        }
    }
}

/// Circle outline plus center dot for one ball on one plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: Vec2,
    pub radius_px: f32,
    pub style: MarkerStyle,
}

/// Markers in paint order (first ball drawn first).
pub fn slice_markers(
    plane: Plane,
    view: &ViewState,
    viewport: Viewport,
    balls: &[Ball],
    selected: Option<usize>,
) -> Vec<Marker> {
    balls
        .iter()
        .enumerate()
        .map(|(index, ball)| {
            let style = if selected == Some(index) {
                MarkerStyle::Selected
            } else if ball.polarity.is_negative() {
                MarkerStyle::Negative
            } else {
                MarkerStyle::Positive
            };
            Marker {
                index,
                center: view.world_to_screen(viewport, plane.project(ball.center)),
                radius_px: (ball.radius * view.zoom).max(MARKER_MIN_RADIUS_PX),
                style,
            }
        })
        .collect()
}

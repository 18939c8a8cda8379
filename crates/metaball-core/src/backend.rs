//! Rendering strategy seam.
//!
//! The editor hands a [`FrameView`] to whichever [`FieldBackend`] was picked
//! at startup. [`SoftwareBackend`] is the reference path: it fills one RGBA
//! raster per view, which the host blits. Accelerated backends must produce
//! the same per-cell classification for the slices.

use crate::bounds::AxisBounds;
use crate::camera::PreviewCamera;
use crate::error::RenderError;
use crate::field::Ball;
use crate::plane::{Plane, Views, Viewport};
use crate::preview::{render_preview, MarchParams, PreviewStats};
use crate::quality::SamplingBudget;
use crate::raster::Raster;
use crate::slice::{render_slice, CellClass, SliceParams};

/// Everything a render pass reads, borrowed from the editor at frame time.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub balls: &'a [Ball],
    pub selected: Option<usize>,
    pub views: &'a Views,
    pub camera: &'a PreviewCamera,
    pub preview_viewport: Viewport,
    pub bounds: AxisBounds,
    pub budget: SamplingBudget,
    pub slice: SliceParams,
    pub march: MarchParams,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Tinted cells per plane, software path only.
    pub tinted_cells: [usize; 3],
    pub preview: PreviewStats,
}

pub trait FieldBackend {
    fn name(&self) -> &'static str;

    fn render(&mut self, frame: &FrameView<'_>) -> Result<FrameStats, RenderError>;
}

#[derive(Debug, Default)]
pub struct SoftwareBackend {
    slices: [Raster; 3],
    preview: Raster,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slice(&self, plane: Plane) -> &Raster {
        &self.slices[plane.index()]
    }

    pub fn preview(&self) -> &Raster {
        &self.preview
    }
}

impl FieldBackend for SoftwareBackend {
    fn name(&self) -> &'static str {
        "software"
    }

    fn render(&mut self, frame: &FrameView<'_>) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        for plane in Plane::ALL {
            let grid = render_slice(
                plane,
                frame.views.get(plane),
                frame.views.viewport(plane),
                frame.balls,
                &frame.bounds,
                &frame.slice,
                &mut self.slices[plane.index()],
            );
            stats.tinted_cells[plane.index()] =
                grid.cells().len() - grid.count(CellClass::Empty);
        }
        stats.preview = render_preview(
            frame.camera,
            frame.preview_viewport,
            frame.balls,
            &frame.bounds,
            frame.budget.resolution,
            &frame.march,
            &mut self.preview,
        );
        Ok(stats)
    }
}

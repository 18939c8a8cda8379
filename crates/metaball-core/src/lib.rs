//! Metaball editor core: field model, slice and preview rendering, adaptive
//! quality, render scheduling, scene state and SCAD import/export.
//!
//! Nothing here touches a platform API; the web crate supplies the frame and
//! timer hosts and blits or uploads what this crate produces.

pub mod backend;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod field;
pub mod gpu;
pub mod plane;
pub mod preview;
pub mod quality;
pub mod raster;
pub mod scad;
pub mod scene;
pub mod scheduler;
pub mod settings;
pub mod slice;

pub use backend::{FieldBackend, FrameStats, FrameView, SoftwareBackend};
pub use bounds::{compute_bounds, Axis, AxisBounds, AxisRange};
pub use camera::{PreviewCamera, ViewPreset};
pub use config::{BackendPreference, EditorConfig, QualityConfig};
pub use editor::{Drag, Editor, FrameReport};
pub use error::{RenderError, ScadError, SceneError};
pub use field::{field_at, Ball, FieldSample, Polarity, Surface, ThresholdMode};
pub use plane::{hit_test, Plane, ViewState, Views, Viewport};
pub use quality::{QualityController, SamplingBudget};
pub use raster::Raster;
pub use scad::{build_scad, parse_scad, ImportedScene};
pub use scene::{BallSpec, Scene};
pub use scheduler::{DebounceTimer, FrameHost, RenderScheduler, TimerHost};
pub use settings::{parse_iso, parse_resolution, RenderSettings};

/// Slice classification and preview marching for the GPU path.
pub static FIELD_WGSL: &str = include_str!("../shaders/field.wgsl");

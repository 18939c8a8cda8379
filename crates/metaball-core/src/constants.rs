/// Field, sampling and interaction tuning constants.
///
/// These constants express intended behavior (thresholds, clamp limits,
/// time constants) and keep magic numbers out of the algorithms.
use std::time::Duration;

// Field model
// Contribution used when a sample lands on (or numerically at) a ball center.
pub const SINGULAR_CONTRIBUTION: f32 = 1e9;
pub const MIN_FIELD_DISTANCE: f32 = 1e-6;

// Scene bounds
pub const BOUNDS_PADDING: f32 = 20.0;
pub const EMPTY_SCENE_HALF_EXTENT: f32 = 100.0;
pub const MIN_SCENE_EXTENT: f32 = 10.0;

// Threshold / resolution inputs
pub const DEFAULT_ISO: f32 = 1.0;
pub const DEFAULT_RESOLUTION: u32 = 120;
pub const MIN_RESOLUTION: u32 = 10;
pub const MAX_RESOLUTION: u32 = 400;

// Column sampling along the missing axis
pub const COLUMN_SAMPLE_FRACTION: f32 = 0.25; // samples = resolution * fraction
pub const MIN_COLUMN_SAMPLES: u32 = 5;

// Ball defaults and clamps
pub const MIN_RADIUS: f32 = 1.0;
pub const WHEEL_MIN_RADIUS: f32 = 5.0;
pub const FALLBACK_DEFAULT_RADIUS: f32 = 50.0;
pub const DEFAULT_RADIUS_VIEW_FRACTION: f32 = 0.1;
pub const SEED_BALL_OFFSET_X: f32 = 60.0;

// 2D views
pub const ZOOM_MIN: f32 = 0.2;
pub const ZOOM_MAX: f32 = 5.0;
pub const ZOOM_IN_FACTOR: f32 = 1.1;
pub const ZOOM_OUT_FACTOR: f32 = 0.9;
pub const MARKER_DOT_RADIUS_PX: f32 = 3.0;
pub const MARKER_MIN_RADIUS_PX: f32 = 1.0;

// Slice colors (RGBA, straight alpha)
pub const POSITIVE_RGBA: [u8; 4] = [70, 130, 180, 200]; // steel blue
pub const NEGATIVE_RGBA: [u8; 4] = [204, 85, 0, 200]; // burnt orange
pub const MARKER_SELECTED_RGB: [u8; 3] = [204, 0, 0];
pub const MARKER_POSITIVE_RGB: [u8; 3] = [0, 0, 0];
pub const MARKER_NEGATIVE_RGB: [u8; 3] = [170, 70, 0];

// Preview camera
pub const PREVIEW_FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const PREVIEW_FRAMING_MARGIN: f32 = 1.15; // distance multiplier over the fitted sphere
pub const PREVIEW_DEFAULT_YAW: f32 = std::f32::consts::FRAC_PI_6;
pub const PREVIEW_DEFAULT_PITCH: f32 = std::f32::consts::FRAC_PI_6;
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.1;
pub const ROTATE_RADIANS_PER_PX: f32 = 0.01;
pub const DOLLY_MIN: f32 = 0.3;
pub const DOLLY_MAX: f32 = 3.0;

// Preview ray marching
pub const PREVIEW_MARCH_STEPS: u32 = 96;
pub const MIN_MARCH_STEPS: u32 = 16;
pub const REFINE_ITERATIONS: u32 = 6;
pub const MAX_SURFACE_LAYERS: usize = 3;
pub const NORMAL_EPS_FRACTION: f32 = 1e-3; // of the scene extent
pub const MIN_NORMAL_EPS: f32 = 1e-3;
pub const MIN_GRADIENT_LENGTH: f32 = 1e-8;

// Preview shading
pub const LIGHT_DIR: [f32; 3] = [0.45, 0.75, 0.5];
pub const AMBIENT: f32 = 0.25;
pub const DIFFUSE: f32 = 0.75;
pub const RIM_STRENGTH: f32 = 0.35;
pub const RIM_POWER: i32 = 3;
pub const NEGATIVE_SURFACE_ALPHA: f32 = 0.45;
pub const POSITIVE_SURFACE_RGB: [f32; 3] = [0.35, 0.55, 0.80];
pub const NEGATIVE_SURFACE_RGB: [f32; 3] = [0.85, 0.40, 0.10];
pub const PREVIEW_BACKGROUND_RGB: [f32; 3] = [0.96, 0.97, 0.98];

// Adaptive quality
pub const QUALITY_MIN_SCALE: f32 = 0.5;
pub const QUALITY_MAX_SCALE: f32 = 1.0;
pub const FAST_MODE_SCALE: f32 = 0.5;
pub const FRAME_BUDGET_MS: f32 = 16.7;
pub const FRAME_COST_EMA_ALPHA: f32 = 0.2; // new = (1-α)*old + α*sample
pub const QUALITY_RECOVERY_ALPHA: f32 = 0.1;
pub const QUALITY_RESTORE_DELAY: Duration = Duration::from_millis(140);

// SCAD export
pub const SCAD_FRAGMENTS: u32 = 48;

/// Page element ids and input tuning for the web front end.
///
/// Field and rendering constants live in `metaball_core::constants`; this
/// file only holds what the DOM wiring needs.

// Field canvases (WebGPU or Canvas2D), one per slice plus the preview.
pub const VIEW_CANVAS_IDS: [&str; 3] = ["view-xy", "view-xz", "view-yz"];
pub const PREVIEW_CANVAS_ID: &str = "view-3d";

// 2D overlays stacked above the slice canvases; they receive pointer input.
pub const OVERLAY_CANVAS_IDS: [&str; 3] = ["overlay-xy", "overlay-xz", "overlay-yz"];

// Side panel
pub const BALL_LIST_ID: &str = "ball-list";
pub const STATUS_ID: &str = "status";
pub const MESSAGE_ID: &str = "message";
pub const ISO_INPUT_ID: &str = "iso";
pub const RESOLUTION_INPUT_ID: &str = "resolution";
pub const MODE_SELECT_ID: &str = "threshold-mode";
pub const SCAD_TEXT_ID: &str = "scad-text";

// Buttons
pub const ADD_BUTTON_ID: &str = "add-ball";
pub const ADD_NEGATIVE_BUTTON_ID: &str = "add-negative";
pub const REMOVE_BUTTON_ID: &str = "remove-ball";
pub const DUPLICATE_BUTTON_ID: &str = "duplicate-ball";
pub const SPLIT_BUTTON_ID: &str = "split-ball";
pub const TOGGLE_BUTTON_ID: &str = "toggle-polarity";
pub const EXPORT_BUTTON_ID: &str = "export-scad";
pub const IMPORT_BUTTON_ID: &str = "import-scad";
// Preset buttons carry the preset name in `data-preset`.
pub const PRESET_BUTTON_CLASS: &str = "preset";

// Keyboard
pub const KEY_PAN_STEP_PX: f32 = 20.0;

// Messages
pub const IMPORT_EMPTY_MESSAGE: &str = "No balls parsed";
pub const MESSAGE_CLEAR_MS: i32 = 3000;

// Overlay text
pub const PLANE_LABEL_FONT: &str = "12px system-ui";
pub const PLANE_LABEL_RGB: &str = "#555555";
pub const PLANE_LABEL_INSET_PX: f64 = 6.0;

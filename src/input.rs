use glam::Vec2;
use metaball_core::{Plane, ViewPreset};
use web_sys as web;

/// What a key press does to the editor. Keys typed into form fields never
/// reach this mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    RemoveSelected,
    /// Screen-space pan in pixels.
    Pan { dx: f32, dy: f32 },
    /// One zoom notch; positive zooms out.
    Zoom(f32),
    Preset(ViewPreset),
    Duplicate,
    Split,
    TogglePolarity,
    Add,
}

#[inline]
pub fn key_action(key: &str, pan_step: f32) -> Option<KeyAction> {
    let action = match key {
        "Delete" | "Backspace" => KeyAction::RemoveSelected,
        "ArrowLeft" => KeyAction::Pan {
            dx: -pan_step,
            dy: 0.0,
        },
        "ArrowRight" => KeyAction::Pan {
            dx: pan_step,
            dy: 0.0,
        },
        "ArrowUp" => KeyAction::Pan {
            dx: 0.0,
            dy: -pan_step,
        },
        "ArrowDown" => KeyAction::Pan {
            dx: 0.0,
            dy: pan_step,
        },
        "+" | "=" => KeyAction::Zoom(-1.0),
        "-" | "_" => KeyAction::Zoom(1.0),
        "1" => KeyAction::Preset(ViewPreset::Front),
        "2" => KeyAction::Preset(ViewPreset::Side),
        "3" => KeyAction::Preset(ViewPreset::Top),
        "4" => KeyAction::Preset(ViewPreset::Isometric),
        "d" | "D" => KeyAction::Duplicate,
        "s" | "S" => KeyAction::Split,
        "n" | "N" => KeyAction::TogglePolarity,
        "a" | "A" => KeyAction::Add,
        _ => return None,
    };
    Some(action)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelAction {
    ResizeSelected,
    ZoomViews,
    DollyPreview,
}

/// Over a slice the wheel resizes the selected ball; with nothing selected,
/// or with Shift held, it zooms the views.
#[inline]
pub fn wheel_action(over_preview: bool, has_selection: bool, shift: bool) -> WheelAction {
    if over_preview {
        WheelAction::DollyPreview
    } else if has_selection && !shift {
        WheelAction::ResizeSelected
    } else {
        WheelAction::ZoomViews
    }
}

/// CSS-pixel offset inside an element to backing-store pixels.
#[inline]
pub fn css_to_backing(css: Vec2, css_size: Vec2, backing: Vec2) -> Vec2 {
    if css_size.x > 0.0 && css_size.y > 0.0 {
        css * backing / css_size
    } else {
        css
    }
}

/// Plane of an overlay canvas id, e.g. `"overlay-xz"`.
#[inline]
pub fn plane_for_element(id: &str) -> Option<Plane> {
    let (_, label) = id.rsplit_once('-')?;
    Plane::from_label(label)
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let css = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    css_to_backing(
        css,
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

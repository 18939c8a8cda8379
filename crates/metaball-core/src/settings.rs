//! Threshold and resolution inputs as they arrive from text fields.
//!
//! Bad text never errors: it falls back to the documented default and the
//! result is clamped to a usable range.

use crate::constants::{DEFAULT_ISO, DEFAULT_RESOLUTION, MAX_RESOLUTION, MIN_RESOLUTION};
use crate::field::ThresholdMode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    pub iso: f32,
    /// Grid resolution at full quality.
    pub base_resolution: u32,
    pub threshold_mode: ThresholdMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            iso: DEFAULT_ISO,
            base_resolution: DEFAULT_RESOLUTION,
            threshold_mode: ThresholdMode::default(),
        }
    }
}

impl RenderSettings {
    /// Returns whether the stored value changed.
    pub fn set_iso_text(&mut self, text: &str) -> bool {
        let iso = parse_iso(text);
        let changed = iso != self.iso;
        self.iso = iso;
        changed
    }

    pub fn set_resolution_text(&mut self, text: &str) -> bool {
        let res = parse_resolution(text);
        let changed = res != self.base_resolution;
        self.base_resolution = res;
        changed
    }
}

/// Positive finite threshold, or `DEFAULT_ISO`.
pub fn parse_iso(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            log::debug!("iso '{}' rejected, using {}", text, DEFAULT_ISO);
            DEFAULT_ISO
        }
    }
}

/// Leading integer of `text` (so "64px" reads as 64), clamped to
/// `[MIN_RESOLUTION, MAX_RESOLUTION]`. Missing or zero gives the default.
pub fn parse_resolution(text: &str) -> u32 {
    match leading_integer(text) {
        Some(v) if v != 0 => {
            let clamped = v.clamp(MIN_RESOLUTION as i64, MAX_RESOLUTION as i64) as u32;
            if clamped as i64 != v {
                log::debug!("resolution {} clamped to {}", v, clamped);
            }
            clamped
        }
        _ => DEFAULT_RESOLUTION,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let s = text.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_integer_stops_at_first_non_digit() {
        assert_eq!(leading_integer("64px"), Some(64));
        assert_eq!(leading_integer("  -3 "), Some(-3));
        assert_eq!(leading_integer("px"), None);
        assert_eq!(leading_integer(""), None);
    }
}

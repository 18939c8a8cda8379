//! Editor configuration: render settings, backend choice and quality tuning.
//!
//! Everything has a default; the page can override a few values through its
//! URL query string (`?iso=2&res=80&mode=positive&backend=software`).

use crate::constants::{
    FRAME_BUDGET_MS, QUALITY_MAX_SCALE, QUALITY_MIN_SCALE, QUALITY_RESTORE_DELAY,
};
use crate::field::ThresholdMode;
use crate::settings::{parse_iso, parse_resolution, RenderSettings};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendPreference {
    /// Try the GPU path, fall back to software.
    #[default]
    Auto,
    Software,
}

impl BackendPreference {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "gpu" | "webgpu" => Some(BackendPreference::Auto),
            "software" | "cpu" => Some(BackendPreference::Software),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QualityConfig {
    /// Quiet period after the last interaction before full quality returns.
    pub restore_delay: Duration,
    /// Target cost of one render pass.
    pub frame_budget: Duration,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            restore_delay: QUALITY_RESTORE_DELAY,
            frame_budget: Duration::from_secs_f32(FRAME_BUDGET_MS / 1000.0),
            min_scale: QUALITY_MIN_SCALE,
            max_scale: QUALITY_MAX_SCALE,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EditorConfig {
    pub settings: RenderSettings,
    pub backend: BackendPreference,
    pub quality: QualityConfig,
}

impl EditorConfig {
    /// Defaults overridden by recognized `key=value` pairs. A leading `?` is
    /// accepted; unknown keys and unparsable values are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "iso" => config.settings.iso = parse_iso(value),
                "res" | "resolution" => config.settings.base_resolution = parse_resolution(value),
                "mode" => {
                    if let Some(mode) = ThresholdMode::parse(value) {
                        config.settings.threshold_mode = mode;
                    }
                }
                "backend" => {
                    if let Some(backend) = BackendPreference::parse(value) {
                        config.backend = backend;
                    }
                }
                "restore_ms" => {
                    if let Ok(ms) = value.trim().parse::<u64>() {
                        config.quality.restore_delay = Duration::from_millis(ms);
                    }
                }
                other => log::debug!("ignoring query key '{}'", other),
            }
        }
        config
    }
}

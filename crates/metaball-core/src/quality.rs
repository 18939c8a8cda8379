//! Adaptive quality.
//!
//! Two mechanisms feed one scale factor in `[min_scale, max_scale]`:
//!
//! - Fast mode: set when an interaction starts, cleared by the debounced
//!   restore timer once input has been quiet for `restore_delay`.
//! - Render cost: an exponential moving average of how long each render
//!   pass took. Over budget, the scale drops in proportion; within budget it
//!   creeps back towards the maximum.
//!
//! Rendering only happens on demand, so the time between frames says
//! nothing about load. The pass itself is timed instead.
//!
//! The scale drives grid resolution, column samples and march steps
//! together; each has a floor so no axis ever samples zero points.

use crate::config::QualityConfig;
use crate::constants::{
    FAST_MODE_SCALE, FRAME_COST_EMA_ALPHA, MIN_MARCH_STEPS, MIN_RESOLUTION, PREVIEW_MARCH_STEPS,
    QUALITY_RECOVERY_ALPHA,
};
use crate::slice::column_samples;
use std::time::Duration;

/// Sampling counts for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingBudget {
    pub resolution: u32,
    pub column_samples: u32,
    pub march_steps: u32,
}

#[derive(Clone, Debug)]
pub struct QualityController {
    config: QualityConfig,
    fast: bool,
    adaptive: f32,
    cost_ema_ms: Option<f32>,
}

impl QualityController {
    pub fn new(config: QualityConfig) -> Self {
        let max = config.max_scale;
        Self {
            config,
            fast: false,
            adaptive: max,
            cost_ema_ms: None,
        }
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    pub fn is_fast(&self) -> bool {
        self.fast
    }

    /// Smoothed render cost, once at least one pass was recorded.
    pub fn frame_cost_ms(&self) -> Option<f32> {
        self.cost_ema_ms
    }

    pub fn scale(&self) -> f32 {
        let s = if self.fast {
            self.adaptive.min(FAST_MODE_SCALE)
        } else {
            self.adaptive
        };
        s.clamp(self.config.min_scale, self.config.max_scale)
    }

    pub fn is_full_quality(&self) -> bool {
        self.scale() >= self.config.max_scale
    }

    pub fn begin_interaction(&mut self) {
        self.fast = true;
    }

    /// Quiet period elapsed: back to maximum quality, cost history dropped.
    pub fn restore(&mut self) {
        self.fast = false;
        self.adaptive = self.config.max_scale;
        self.cost_ema_ms = None;
    }

    pub fn record_frame_cost(&mut self, cost: Duration) {
        let sample = cost.as_secs_f32() * 1000.0;
        if !sample.is_finite() {
            return;
        }
        let ema = match self.cost_ema_ms {
            Some(prev) => prev + FRAME_COST_EMA_ALPHA * (sample - prev),
            None => sample,
        };
        self.cost_ema_ms = Some(ema);

        let budget = self.config.frame_budget.as_secs_f32() * 1000.0;
        if ema > budget && ema > 0.0 {
            self.adaptive *= budget / ema;
        } else {
            self.adaptive += (self.config.max_scale - self.adaptive) * QUALITY_RECOVERY_ALPHA;
        }
        self.adaptive = self
            .adaptive
            .clamp(self.config.min_scale, self.config.max_scale);
    }

    /// Counts for the current scale applied to `base_resolution`.
    pub fn budget(&self, base_resolution: u32) -> SamplingBudget {
        budget_for_scale(base_resolution, self.scale())
    }
}

pub fn budget_for_scale(base_resolution: u32, scale: f32) -> SamplingBudget {
    let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    let resolution = ((base_resolution as f32 * scale).round() as u32).max(MIN_RESOLUTION);
    SamplingBudget {
        resolution,
        column_samples: column_samples(resolution),
        march_steps: ((PREVIEW_MARCH_STEPS as f32 * scale).round() as u32).max(MIN_MARCH_STEPS),
    }
}

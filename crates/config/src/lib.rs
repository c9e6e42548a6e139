//! Shared configuration for Impasto
//!
//! This crate provides the single source of truth for brush, smoothing,
//! and pipeline settings shared by the engine and by frontends. All types
//! round-trip through serde so presets can be stored as JSON.

use serde::{Deserialize, Serialize};

/// Default brush diameter in pixels
pub const DEFAULT_BRUSH_SIZE: f32 = 100.0;

/// Default dab spacing along the resampled stroke, in pixels
pub const DEFAULT_SPACING: f32 = 1.0;

/// Default stabilizer window size (number of raw samples averaged)
pub const DEFAULT_WINDOW: usize = 10;

/// Default offset jump threshold for path-snapped strokes, in pixels of
/// arc length
pub const DEFAULT_SNAP_THRESHOLD: f32 = 100.0;

/// Default arc-length lookup resolution per Bezier segment
pub const DEFAULT_LUT_RESOLUTION: usize = 64;

/// Brush settings for dab generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushConfig {
    /// Brush diameter in pixels at full pressure
    pub size: f32,
    /// Distance between consecutive dabs along the stroke, in pixels
    pub spacing: f32,
    /// Base flow (paint transfer per dab), 0.0-1.0
    pub flow: f32,
    /// Brush color as straight-alpha RGBA
    pub color: [f32; 4],
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            spacing: DEFAULT_SPACING,
            flow: 1.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl BrushConfig {
    /// Create a brush config with the given size and spacing
    pub fn new(size: f32, spacing: f32) -> Self {
        Self {
            size,
            spacing: spacing.max(0.01),
            ..Default::default()
        }
    }
}

/// Input smoothing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Stabilizer window size; 1 disables smoothing (pass-through)
    pub window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
        }
    }
}

/// Speed-to-opacity mapping settings
///
/// Distances map inversely onto alphas: slow movement produces
/// `max_alpha`, movement of `max_distance` or more per event approaches
/// `min_alpha`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedAlphaConfig {
    /// Distance (pixels per event) mapped to `max_alpha`
    pub min_distance: f32,
    /// Distance (pixels per event) mapped to `min_alpha`
    pub max_distance: f32,
    /// Alpha produced by fast movement
    pub min_alpha: f32,
    /// Alpha produced by slow movement
    pub max_alpha: f32,
    /// Exponential smoothing factor, 0.0-1.0; higher tracks speed changes
    /// faster
    pub smoothing: f32,
}

impl Default for SpeedAlphaConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            max_distance: 100.0,
            min_alpha: 0.5,
            max_alpha: 1.0,
            smoothing: 0.35,
        }
    }
}

/// Path-snapping settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapConfig {
    /// Arc-length jump (pixels) beyond which the snap sampler treats the
    /// movement as a discontinuity and resets
    pub offset_threshold: f32,
    /// Samples per Bezier segment in the arc-length lookup table
    pub lut_resolution: usize,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            offset_threshold: DEFAULT_SNAP_THRESHOLD,
            lut_resolution: DEFAULT_LUT_RESOLUTION,
        }
    }
}

/// Aggregate engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub brush: BrushConfig,
    pub smoothing: SmoothingConfig,
    pub speed_alpha: SpeedAlphaConfig,
    pub snap: SnapConfig,
}

impl EngineConfig {
    /// Parse an engine config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize this config to a pretty-printed JSON string
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

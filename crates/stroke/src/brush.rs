//! Brush presets and dab output

use bytemuck::{Pod, Zeroable};
use impasto_config::BrushConfig;
use serde::{Deserialize, Serialize};

use crate::color::{parse_color, ColorParseError};

/// Brush preset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushPreset {
    /// Human-readable name
    pub name: String,
    /// Diameter in pixels at full pressure
    pub size: f32,
    /// Distance between dabs along the resampled stroke, in pixels
    pub spacing: f32,
    /// Paint transfer per dab, 0.0-1.0
    pub flow: f32,
    /// Straight-alpha RGBA
    pub color: [f32; 4],
}

impl Default for BrushPreset {
    fn default() -> Self {
        Self::from_config(&BrushConfig::default())
    }
}

impl BrushPreset {
    /// Build a preset from shared configuration
    pub fn from_config(config: &BrushConfig) -> Self {
        Self {
            name: "Default".to_string(),
            size: config.size,
            spacing: config.spacing.max(0.01),
            flow: config.flow.clamp(0.0, 1.0),
            color: config.color,
        }
    }

    /// Brush diameter for the given pressure
    pub fn size_for_pressure(&self, pressure: f32) -> f32 {
        self.size * pressure.clamp(0.0, 1.0)
    }

    /// Set the brush color from a `#hex` or `rgb()` string, keeping the
    /// current alpha
    pub fn set_color_str(&mut self, color: &str) -> Result<(), ColorParseError> {
        let rgb = parse_color(color)?;
        self.color = [rgb[0], rgb[1], rgb[2], self.color[3]];
        Ok(())
    }
}

/// A single dab ready for rendering
///
/// GPU-compatible with bytemuck; every field is f32 so the struct packs
/// without padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[repr(C)]
pub struct Dab {
    /// X position in surface coordinates
    pub x: f32,
    /// Y position in surface coordinates
    pub y: f32,
    /// Diameter in pixels
    pub size: f32,
    /// Orientation in radians (direction of travel)
    pub angle: f32,
    /// Paint transfer 0.0-1.0 (pressure x speed alpha x brush flow)
    pub flow: f32,
    /// Straight-alpha RGBA
    pub color: [f32; 4],
}

/// Renderer seam: draws one dab into the working surface
///
/// Implementations blend each dab against the previously accumulated
/// result; the GPU renderer ping-pongs two framebuffers to do this, the
/// CPU reference surface blends in place.
pub trait DabRenderer {
    fn draw_dab(&mut self, dab: &Dab);
}

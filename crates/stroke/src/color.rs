//! Color string parsing and helpers

use thiserror::Error;

use crate::math::clamp01;

/// Error type for color string parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
    #[error("invalid rgb() color: {0:?}")]
    InvalidRgb(String),
    #[error("unknown color format: {0:?}")]
    UnknownFormat(String),
}

/// Parse `#rgb`, `#rrggbb`, or `rgb(r, g, b)` into float RGB components
pub fn parse_color(input: &str) -> Result<[f32; 3], ColorParseError> {
    let trimmed = input.trim();
    if trimmed.starts_with('#') {
        parse_hex(trimmed)
    } else if trimmed.starts_with("rgb(") {
        parse_rgb(trimmed)
    } else {
        Err(ColorParseError::UnknownFormat(input.to_string()))
    }
}

fn parse_hex(input: &str) -> Result<[f32; 3], ColorParseError> {
    let hex = input.trim_start_matches('#');
    let full: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return Err(ColorParseError::InvalidHex(input.to_string())),
    };

    let value = u32::from_str_radix(&full, 16)
        .map_err(|_| ColorParseError::InvalidHex(input.to_string()))?;

    Ok([
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    ])
}

fn parse_rgb(input: &str) -> Result<[f32; 3], ColorParseError> {
    let inner = input
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ColorParseError::InvalidRgb(input.to_string()))?;

    let components: Vec<u8> = inner
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .map_err(|_| ColorParseError::InvalidRgb(input.to_string()))?;

    if components.len() != 3 {
        return Err(ColorParseError::InvalidRgb(input.to_string()));
    }

    Ok([
        components[0] as f32 / 255.0,
        components[1] as f32 / 255.0,
        components[2] as f32 / 255.0,
    ])
}

/// Format an RGB triple as `#rrggbb`
pub fn to_hex(rgb: [f32; 3]) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        (clamp01(rgb[0]) * 255.0).round() as u8,
        (clamp01(rgb[1]) * 255.0).round() as u8,
        (clamp01(rgb[2]) * 255.0).round() as u8,
    )
}

/// Mix a color toward white by `amount` (0..1)
pub fn lighten(rgb: [f32; 3], amount: f32) -> [f32; 3] {
    [
        rgb[0] + (1.0 - rgb[0]) * amount,
        rgb[1] + (1.0 - rgb[1]) * amount,
        rgb[2] + (1.0 - rgb[2]) * amount,
    ]
}

/// Extend an RGB triple with an alpha channel
pub fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

//! Stroke point value types
//!
//! A [`RawPoint`] is what the input layer produces; a [`Sample`] is what
//! a resampler emits. Only emitted samples carry direction data, so the
//! two are distinct types rather than one struct with optional fields.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::catmull_rom;

/// A raw sample at a moment in a stroke
///
/// Created once per pointer event, or once per interpolation step inside
/// a resampler. Transformations produce new values; points are never
/// mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Canvas x coordinate
    pub x: f32,
    /// Canvas y coordinate
    pub y: f32,
    /// Pen pressure, conceptually 0.0-1.0 (clamped by callers)
    pub pressure: f32,
    /// Stylus tilt around the x axis
    pub tilt_x: f32,
    /// Stylus tilt around the y axis
    pub tilt_y: f32,
    /// Monotonic event time in milliseconds
    pub timestamp_ms: f64,
}

impl RawPoint {
    /// Position as a vector
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Exact coordinate equality, used for duplicate-event suppression
    #[inline]
    pub fn same_position(&self, other: &RawPoint) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// An emitted sample: a point plus travel direction and the displacement
/// from the previously emitted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub point: RawPoint,
    /// Direction of travel in radians
    pub angle: f32,
    /// X displacement since the previous emitted sample
    pub dx: f32,
    /// Y displacement since the previous emitted sample
    pub dy: f32,
}

/// Evaluate a Catmull-Rom spline through four control points
///
/// Every scalar field uses the spline basis; the timestamp is linear
/// between the two middle control points.
pub fn catmull_rom_point(
    p0: &RawPoint,
    p1: &RawPoint,
    p2: &RawPoint,
    p3: &RawPoint,
    t: f32,
) -> RawPoint {
    RawPoint {
        x: catmull_rom(p0.x, p1.x, p2.x, p3.x, t),
        y: catmull_rom(p0.y, p1.y, p2.y, p3.y, t),
        pressure: catmull_rom(p0.pressure, p1.pressure, p2.pressure, p3.pressure, t),
        tilt_x: catmull_rom(p0.tilt_x, p1.tilt_x, p2.tilt_x, p3.tilt_x, t),
        tilt_y: catmull_rom(p0.tilt_y, p1.tilt_y, p2.tilt_y, p3.tilt_y, t),
        timestamp_ms: p1.timestamp_ms + (p2.timestamp_ms - p1.timestamp_ms) * t as f64,
    }
}

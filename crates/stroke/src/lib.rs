//! Impasto stroke engine - pointer input to paint dab placement
//!
//! This crate converts raw, jittery pointer samples into evenly-spaced
//! dab placements for a brush renderer:
//! - [`stabilizer`] - moving-average smoothing of raw input
//! - [`sampler`] - arc-length resamplers (free, path-snapped, ruler)
//! - [`point`] - stroke point value types and spline interpolation
//! - [`curve`] - parametric curves that strokes can snap onto
//! - [`speed_alpha`] - velocity-sensitive opacity
//! - [`brush`] - brush presets and the dab renderer seam
//! - [`surface`] - CPU reference surface for headless painting
//! - [`session`] - pointer event lifecycle orchestration
//! - [`color`] - color string parsing
//! - [`math`] - scalar interpolation helpers

pub mod brush;
pub mod color;
pub mod curve;
pub mod math;
pub mod point;
pub mod sampler;
pub mod session;
pub mod speed_alpha;
pub mod stabilizer;
pub mod surface;

pub use brush::*;
pub use color::*;
pub use curve::*;
pub use math::*;
pub use point::*;
pub use sampler::*;
pub use session::*;
pub use speed_alpha::*;
pub use stabilizer::*;
pub use surface::*;

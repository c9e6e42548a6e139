//! Stroke resamplers
//!
//! A resampler turns stabilized pointer samples into evenly-spaced
//! emitted samples ready for dab placement:
//! - [`SplineSampler`] fits a Catmull-Rom spline through the input and
//!   walks it at fixed arc-length spacing (free drawing)
//! - [`SnapSampler`] projects the input onto a fixed parametric curve
//!   and walks the curve instead (constrained drawing)
//! - [`MultiSnapSampler`] snaps to whichever of several candidate curves
//!   the stroke starts nearest to
//! - [`RulerSampler`] stamps fixed-spacing samples along a straightedge
//!   polyline

mod ruler;
mod snap;
mod spline;

pub use ruler::RulerSampler;
pub use snap::{MultiSnapSampler, SnapSampler};
pub use spline::SplineSampler;

use crate::point::{RawPoint, Sample};

/// Common contract for stroke resamplers
///
/// All implementations are total over well-formed input: `next` and
/// `close` never fail, they only vary in how many samples they emit.
pub trait Sampler {
    /// Feed one stabilized point; returns zero or more emitted samples
    fn next(&mut self, point: RawPoint) -> Vec<Sample>;

    /// Flush any trailing partial segment at the end of a stroke
    fn close(&mut self) -> Vec<Sample>;
}

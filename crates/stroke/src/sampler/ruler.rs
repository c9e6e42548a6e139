//! Straightedge resampler
//!
//! Stamps fixed-spacing samples along a polyline ruler. The pointer's
//! position only contributes pressure, tilt, and timing; sample
//! placement walks the ruler itself, consuming segments as it goes.

use glam::Vec2;

use super::Sampler;
use crate::curve::PathError;
use crate::point::{RawPoint, Sample};

#[derive(Debug)]
pub struct RulerSampler {
    /// Working copy of the ruler; the current segment start is replaced
    /// by the last emitted position as segments are consumed
    path: Vec<Vec2>,
    spacing: f32,
    segment_index: usize,
    /// Length carried over from segments too short to hold a sample
    remnant: f32,
    /// Previously emitted position, for dx/dy deltas
    last_sample: Option<Vec2>,
}

impl RulerSampler {
    /// Build a sampler over a ruler of at least two points
    pub fn new(path: &[Vec2], spacing: f32) -> Result<Self, PathError> {
        if path.len() < 2 {
            return Err(PathError::TooFewPoints(path.len()));
        }
        Ok(Self {
            path: path.to_vec(),
            spacing: spacing.max(0.01),
            segment_index: 0,
            remnant: 0.0,
            last_sample: None,
        })
    }

    /// Project a stroke point onto the ruler; position snaps, the other
    /// fields pass through
    fn project(&self, pt: &RawPoint) -> RawPoint {
        let query = pt.position();
        let mut best_dist_sq = f32::INFINITY;
        let mut projected = query;

        for i in 0..self.path.len() - 1 {
            let a = self.path[i];
            let b = self.path[i + 1];
            let v = b - a;
            let denom = v.length_squared();
            if denom == 0.0 {
                continue;
            }
            let t = ((query - a).dot(v) / denom).clamp(0.0, 1.0);
            let candidate = a + v * t;
            let dist_sq = query.distance_squared(candidate);
            if dist_sq < best_dist_sq {
                best_dist_sq = dist_sq;
                projected = candidate;
            }
        }

        RawPoint {
            x: projected.x,
            y: projected.y,
            ..*pt
        }
    }
}

impl Sampler for RulerSampler {
    fn next(&mut self, pt: RawPoint) -> Vec<Sample> {
        let projected = self.project(&pt);
        let mut samples = Vec::new();

        while self.segment_index < self.path.len() - 1 {
            let a = self.path[self.segment_index];
            let b = self.path[self.segment_index + 1];
            let v = b - a;
            let seg_len = v.length();

            if seg_len + self.remnant < self.spacing {
                self.remnant += seg_len;
                self.segment_index += 1;
                continue;
            }

            let t = (self.spacing - self.remnant) / seg_len;
            let pos = a + v * t;

            let (dx, dy) = match self.last_sample {
                Some(last) => (pos.x - last.x, pos.y - last.y),
                None => (0.0, 0.0),
            };
            let angle = v.y.atan2(v.x);

            samples.push(Sample {
                point: RawPoint {
                    x: pos.x,
                    y: pos.y,
                    pressure: projected.pressure,
                    tilt_x: projected.tilt_x,
                    tilt_y: projected.tilt_y,
                    timestamp_ms: projected.timestamp_ms,
                },
                angle,
                dx,
                dy,
            });
            self.last_sample = Some(pos);

            // restart the segment at the emitted position
            self.path[self.segment_index] = pos;
            self.remnant = 0.0;
        }

        samples
    }

    fn close(&mut self) -> Vec<Sample> {
        Vec::new()
    }
}

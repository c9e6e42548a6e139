//! Arc-length resampler for free drawing
//!
//! Fits a uniform Catmull-Rom spline through a rolling window of four
//! control points and emits samples at fixed arc-length spacing along
//! it, carrying unconsumed arc length across calls so spacing stays even
//! over segment boundaries.

use glam::Vec2;

use super::Sampler;
use crate::point::{catmull_rom_point, RawPoint, Sample};

/// Maximum subdivision steps per segment when building the arc-length
/// table
const MAX_STEPS: usize = 50;

pub struct SplineSampler {
    spacing: f32,
    /// Unconsumed arc length from the previous segment, in `[0, spacing)`
    remain_length: f32,
    /// Rolling control window; empty before the first point, then always
    /// exactly four points
    points: Vec<RawPoint>,
    /// Previously emitted sample, for dx/dy deltas
    last_sample: Option<RawPoint>,
}

impl SplineSampler {
    /// Create a sampler emitting every `spacing` pixels of arc length
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing: spacing.max(0.01),
            remain_length: 0.0,
            points: Vec::with_capacity(4),
            last_sample: None,
        }
    }

    fn add(&mut self, point: RawPoint) -> Vec<Sample> {
        if self.points.len() < 4 {
            self.points = vec![point; 4];
        } else {
            self.points.remove(0);
            self.points.push(point);
        }
        self.sample()
    }

    fn sample(&mut self) -> Vec<Sample> {
        let p0 = self.points[0];
        let p1 = self.points[1];
        let p2 = self.points[2];
        let p3 = self.points[3];

        let (u1, u2) = segment_directions(
            p2.position() - p1.position(),
            p3.position() - p2.position(),
        );

        // piecewise-linear arc-length table over the p1..p2 span
        let steps = self.adaptive_step_estimate(&p1, &p2);
        let mut arc_lengths = Vec::with_capacity(steps + 1);
        arc_lengths.push(0.0);
        let mut prev = catmull_rom_point(&p0, &p1, &p2, &p3, 0.0);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let pt = catmull_rom_point(&p0, &p1, &p2, &p3, t);
            let d = prev.position().distance(pt.position());
            arc_lengths.push(arc_lengths[i - 1] + d);
            prev = pt;
        }
        let total_length = arc_lengths[steps];

        let mut result = Vec::new();
        let mut sample_length = self.remain_length;

        while sample_length < total_length {
            let t = find_t(&arc_lengths, sample_length);
            let sample = catmull_rom_point(&p0, &p1, &p2, &p3, t);

            let (dx, dy) = match self.last_sample {
                Some(last) => (sample.x - last.x, sample.y - last.y),
                None => (0.0, 0.0),
            };

            let dir = u1.lerp(u2, t);
            let angle = dir.y.atan2(dir.x);

            result.push(Sample {
                point: sample,
                angle,
                dx,
                dy,
            });
            self.last_sample = Some(sample);

            sample_length += self.spacing;
        }

        self.remain_length = sample_length - total_length;

        result
    }

    /// Denser subdivision for longer segments, bounded to avoid runaway
    /// cost
    fn adaptive_step_estimate(&self, p1: &RawPoint, p2: &RawPoint) -> usize {
        let len = p1.position().distance(p2.position());
        let value = (len / self.spacing * 2.0).ceil() as usize;
        value.clamp(1, MAX_STEPS)
    }
}

impl Sampler for SplineSampler {
    fn next(&mut self, point: RawPoint) -> Vec<Sample> {
        if let Some(last) = self.points.last() {
            if point.same_position(last) {
                return Vec::new();
            }
        }
        self.add(point)
    }

    /// Re-feeds the final recorded point, flushing the trailing partial
    /// segment. Empty if no point was ever recorded.
    fn close(&mut self) -> Vec<Sample> {
        match self.points.last().copied() {
            Some(last) => self.add(last),
            None => Vec::new(),
        }
    }
}

/// Spline parameter for a target arc length, by linear interpolation
/// within the enclosing table segment. Falls back to the end parameter
/// when the target lies past the table.
fn find_t(lengths: &[f32], target: f32) -> f32 {
    for i in 1..lengths.len() {
        if lengths[i] >= target {
            let l0 = lengths[i - 1];
            let l1 = lengths[i];
            let ratio = if l1 > l0 { (target - l0) / (l1 - l0) } else { 0.0 };
            return (i as f32 - 1.0 + ratio) / (lengths.len() as f32 - 1.0);
        }
    }
    1.0
}

/// Unit tangents of the two inner control segments
///
/// A degenerate segment borrows the other segment's direction; if both
/// are degenerate the tangent is the zero vector (and the emitted angle
/// is `atan2(0, 0) = 0`).
fn segment_directions(d1: Vec2, d2: Vec2) -> (Vec2, Vec2) {
    let l1 = d1.length();
    let l2 = d2.length();
    match (l1 > 0.0, l2 > 0.0) {
        (true, true) => (d1 / l1, d2 / l2),
        (true, false) => (d1 / l1, d1 / l1),
        (false, true) => (d2 / l2, d2 / l2),
        (false, false) => (Vec2::ZERO, Vec2::ZERO),
    }
}

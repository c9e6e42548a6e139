//! Path-snap resampler for constrained drawing
//!
//! Projects pointer input onto a fixed parametric curve and emits
//! fixed-spacing samples along the curve's arc length instead of the
//! pointer's own trajectory.

use std::sync::Arc;

use glam::Vec2;
use tracing::debug;

use super::Sampler;
use crate::curve::ParametricCurve;
use crate::math::lerp;
use crate::point::{RawPoint, Sample};

/// Snapping state shared by the single- and multi-path samplers
struct SnapState {
    spacing: f32,
    /// Unconsumed distance until the next emission
    remainder: f32,
    last_offset: Option<f32>,
    last_point: Option<RawPoint>,
    /// Position of the previously emitted sample
    last_sample: Option<Vec2>,
    /// Arc-length jump beyond which the movement is treated as a
    /// discontinuity
    offset_threshold: f32,
}

impl SnapState {
    fn new(spacing: f32, offset_threshold: f32) -> Self {
        let spacing = spacing.max(0.01);
        Self {
            spacing,
            remainder: spacing,
            last_offset: None,
            last_point: None,
            last_sample: None,
            offset_threshold,
        }
    }

    /// Restart from a projected location: one snapped sample with zero
    /// delta and angle
    fn reset_at(&mut self, snapped: Vec2, point: &RawPoint) -> Sample {
        self.last_point = Some(*point);
        self.last_sample = Some(snapped);
        self.remainder = self.spacing;
        Sample {
            point: RawPoint {
                x: snapped.x,
                y: snapped.y,
                pressure: point.pressure,
                tilt_x: point.tilt_x,
                tilt_y: point.tilt_y,
                timestamp_ms: point.timestamp_ms,
            },
            angle: 0.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    fn next(&mut self, path: &dyn ParametricCurve, point: RawPoint) -> Vec<Sample> {
        let loc = path.nearest_location(point.position());
        let to_off = loc.offset;
        let from_off = self.last_offset;
        self.last_offset = Some(to_off);

        let (Some(from_off), Some(prev)) = (from_off, self.last_point) else {
            return vec![self.reset_at(loc.point, &point)];
        };

        // signed travel along the path; closed paths take the shorter
        // way around
        let raw_delta = to_off - from_off;
        let length = path.length();
        let mut signed = raw_delta;
        if path.is_closed() {
            let half = length / 2.0;
            if raw_delta > half {
                signed = raw_delta - length;
            }
            if raw_delta < -half {
                signed = raw_delta + length;
            }
        }
        let travel_len = signed.abs();
        let dir = signed.signum();

        if travel_len > self.offset_threshold {
            debug!(
                "snap: offset jump {:.1} exceeds threshold {:.1}, restarting",
                travel_len, self.offset_threshold
            );
            return vec![self.reset_at(loc.point, &point)];
        }

        let dt = point.timestamp_ms - prev.timestamp_ms;
        if travel_len < self.remainder {
            self.remainder -= travel_len;
            self.last_point = Some(point);
            return Vec::new();
        }

        // arc-length targets: remainder, remainder + spacing, ... up to
        // and including travel_len
        let mut samples = Vec::new();
        let mut reference = self.last_sample.unwrap_or(loc.point);
        let mut d = self.remainder;
        let mut used = self.remainder;
        while d <= travel_len {
            let mut off = from_off + dir * d;
            if path.is_closed() {
                off = off.rem_euclid(length);
            }
            let pos = path.point_at(off);
            let dx = pos.x - reference.x;
            let dy = pos.y - reference.y;
            let angle = dy.atan2(dx);
            let t = if travel_len > 0.0 { d / travel_len } else { 1.0 };

            samples.push(Sample {
                point: RawPoint {
                    x: pos.x,
                    y: pos.y,
                    pressure: lerp(prev.pressure, point.pressure, t),
                    tilt_x: lerp(prev.tilt_x, point.tilt_x, t),
                    tilt_y: lerp(prev.tilt_y, point.tilt_y, t),
                    timestamp_ms: prev.timestamp_ms + dt * t as f64,
                },
                angle,
                dx,
                dy,
            });

            reference = pos;
            self.last_sample = Some(pos);
            used = d;
            d += self.spacing;
        }

        self.remainder = self.spacing - (travel_len - used);
        self.last_point = Some(point);

        samples
    }
}

/// Snaps a stroke onto a single fixed curve
///
/// A projected movement larger than the offset threshold is treated as a
/// discontinuity and restarts the stroke at the new location instead of
/// interpolating across the jump.
pub struct SnapSampler {
    path: Arc<dyn ParametricCurve>,
    state: SnapState,
}

impl SnapSampler {
    pub fn new(path: Arc<dyn ParametricCurve>, spacing: f32, offset_threshold: f32) -> Self {
        Self {
            path,
            state: SnapState::new(spacing, offset_threshold),
        }
    }

    /// The curve this sampler snaps onto
    pub fn path(&self) -> &dyn ParametricCurve {
        &*self.path
    }
}

impl Sampler for SnapSampler {
    fn next(&mut self, point: RawPoint) -> Vec<Sample> {
        self.state.next(&*self.path, point)
    }

    /// No tail-off for snapped strokes
    fn close(&mut self) -> Vec<Sample> {
        Vec::new()
    }
}

/// Snaps a stroke onto whichever candidate curve the stroke starts
/// nearest to
///
/// The first sample locks the active curve for the remainder of the
/// stroke; there is no jump guard in this variant.
pub struct MultiSnapSampler {
    paths: Vec<Arc<dyn ParametricCurve>>,
    active: Option<usize>,
    state: SnapState,
}

impl MultiSnapSampler {
    pub fn new(paths: Vec<Arc<dyn ParametricCurve>>, spacing: f32) -> Self {
        Self {
            paths,
            active: None,
            state: SnapState::new(spacing, f32::INFINITY),
        }
    }

    /// Index of the locked curve, once the stroke has started
    pub fn active_path(&self) -> Option<usize> {
        self.active
    }
}

impl Sampler for MultiSnapSampler {
    fn next(&mut self, point: RawPoint) -> Vec<Sample> {
        let index = match self.active {
            Some(index) => index,
            None => {
                let mut best = None;
                let mut best_dist_sq = f32::INFINITY;
                for (index, path) in self.paths.iter().enumerate() {
                    let loc = path.nearest_location(point.position());
                    let dist_sq = loc.point.distance_squared(point.position());
                    if dist_sq < best_dist_sq {
                        best_dist_sq = dist_sq;
                        best = Some(index);
                    }
                }
                let Some(best) = best else {
                    return Vec::new();
                };
                debug!("snap: locked candidate path {best}");
                self.active = Some(best);
                best
            }
        };
        self.state.next(&*self.paths[index], point)
    }

    fn close(&mut self) -> Vec<Sample> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Polyline;

    fn point(x: f32, y: f32, timestamp_ms: f64) -> RawPoint {
        RawPoint {
            x,
            y,
            pressure: 0.5,
            tilt_x: 0.0,
            tilt_y: 0.0,
            timestamp_ms,
        }
    }

    fn square() -> Arc<dyn ParametricCurve> {
        Arc::new(
            Polyline::new(
                vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(100.0, 0.0),
                    Vec2::new(100.0, 100.0),
                    Vec2::new(0.0, 100.0),
                ],
                true,
            )
            .unwrap(),
        )
    }

    fn horizontal_line() -> Arc<dyn ParametricCurve> {
        Arc::new(
            Polyline::new(vec![Vec2::new(0.0, 0.0), Vec2::new(400.0, 0.0)], false).unwrap(),
        )
    }

    #[test]
    fn test_first_call_emits_snapped_sample() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        let samples = sampler.next(point(35.0, 8.0, 0.0));
        assert_eq!(samples.len(), 1);
        let first = &samples[0];
        assert!((first.point.x - 35.0).abs() < 1e-4);
        assert!((first.point.y - 0.0).abs() < 1e-4);
        assert_eq!(first.dx, 0.0);
        assert_eq!(first.dy, 0.0);
        assert_eq!(first.angle, 0.0);
    }

    #[test]
    fn test_spacing_along_path() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        sampler.next(point(0.0, 3.0, 0.0));
        let samples = sampler.next(point(35.0, 3.0, 16.0));
        // targets 10, 20, 30
        assert_eq!(samples.len(), 3);
        assert!((samples[0].point.x - 10.0).abs() < 1e-4);
        assert!((samples[1].point.x - 20.0).abs() < 1e-4);
        assert!((samples[2].point.x - 30.0).abs() < 1e-4);
        // deltas and angle follow the path
        assert!((samples[1].dx - 10.0).abs() < 1e-4);
        assert!(samples[1].angle.abs() < 1e-4);
    }

    #[test]
    fn test_sub_spacing_movement_accumulates() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        sampler.next(point(0.0, 0.0, 0.0));
        assert!(sampler.next(point(4.0, 0.0, 8.0)).is_empty());
        assert!(sampler.next(point(8.0, 0.0, 16.0)).is_empty());
        // crosses the 10 px mark
        let samples = sampler.next(point(12.0, 0.0, 24.0));
        assert_eq!(samples.len(), 1);
        assert!((samples[0].point.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_closed_path_wraps_the_short_way() {
        let mut sampler = SnapSampler::new(square(), 10.0, 100.0);
        // offset 5 on the bottom edge
        sampler.next(point(5.0, -1.0, 0.0));
        // offset 395 on the left edge: raw delta +390, shorter way is -10
        let samples = sampler.next(point(-1.0, 5.0, 16.0));
        assert_eq!(samples.len(), 1);
        assert!((samples[0].point.x - 0.0).abs() < 1e-3);
        assert!((samples[0].point.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_offset_jump_resets_state() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        sampler.next(point(0.0, 0.0, 0.0));
        // a 150 px jump along the path exceeds the threshold
        let samples = sampler.next(point(150.0, 0.0, 16.0));
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].dx, 0.0);
        assert_eq!(samples[0].dy, 0.0);
        assert_eq!(samples[0].angle, 0.0);
        assert!((samples[0].point.x - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_pressure_interpolates_between_raw_points() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        let mut start = point(0.0, 0.0, 0.0);
        start.pressure = 0.0;
        sampler.next(start);
        let mut end = point(20.0, 0.0, 16.0);
        end.pressure = 1.0;
        let samples = sampler.next(end);
        assert_eq!(samples.len(), 2);
        // targets 10 and 20 of a 20 px travel
        assert!((samples[0].point.pressure - 0.5).abs() < 1e-4);
        assert!((samples[1].point.pressure - 1.0).abs() < 1e-4);
        assert!((samples[0].point.timestamp_ms - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_multi_snap_locks_nearest_path() {
        let far: Arc<dyn ParametricCurve> = Arc::new(
            Polyline::new(vec![Vec2::new(0.0, 200.0), Vec2::new(400.0, 200.0)], false).unwrap(),
        );
        let mut sampler = MultiSnapSampler::new(vec![far, horizontal_line()], 10.0);

        let samples = sampler.next(point(50.0, 10.0, 0.0));
        assert_eq!(sampler.active_path(), Some(1));
        assert!((samples[0].point.y - 0.0).abs() < 1e-4);

        // later points nearer the other path still snap to the locked one
        let samples = sampler.next(point(80.0, 190.0, 16.0));
        for sample in &samples {
            assert!(sample.point.y.abs() < 1e-3);
        }
    }

    #[test]
    fn test_close_is_empty() {
        let mut sampler = SnapSampler::new(horizontal_line(), 10.0, 100.0);
        sampler.next(point(0.0, 0.0, 0.0));
        assert!(sampler.close().is_empty());
    }
}

//! Input stabilizer - moving-average smoothing of raw pointer samples

use std::collections::VecDeque;

use crate::math::lerp;
use crate::point::RawPoint;

/// Smooths jittery pointer input with an unweighted moving average
///
/// The window has fixed capacity and evicts oldest-first. On the very
/// first sample the window is pre-filled with copies of that sample, so
/// the first smoothed output equals the raw input instead of biasing
/// toward the origin.
pub struct Stabilizer {
    window: VecDeque<RawPoint>,
    size: usize,
}

impl Stabilizer {
    /// Create a stabilizer averaging over `size` samples; 1 is
    /// pass-through
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            window: VecDeque::with_capacity(size + 1),
            size,
        }
    }

    /// Window size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Smooth one raw sample
    ///
    /// Position, pressure, and tilt are averaged over the window; the
    /// timestamp passes through from `raw` unchanged.
    pub fn next(&mut self, raw: RawPoint) -> RawPoint {
        if self.window.len() < self.size {
            for _ in 0..self.size - 1 {
                self.window.push_back(raw);
            }
        }

        self.window.push_back(raw);
        if self.window.len() > self.size {
            self.window.pop_front();
        }

        let n = self.window.len() as f32;
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sp = 0.0;
        let mut stx = 0.0;
        let mut sty = 0.0;

        for pt in &self.window {
            sx += pt.x;
            sy += pt.y;
            sp += pt.pressure;
            stx += pt.tilt_x;
            sty += pt.tilt_y;
        }

        RawPoint {
            x: sx / n,
            y: sy / n,
            pressure: sp / n,
            tilt_x: stx / n,
            tilt_y: sty / n,
            timestamp_ms: raw.timestamp_ms,
        }
    }

    /// Tail-off sequence for the end of a stroke
    ///
    /// Feeds the last raw point back through the window once per slot,
    /// easing pressure toward the final raw value so the stroke tapers
    /// instead of cutting off. Empty if no sample was ever seen.
    pub fn close(&mut self) -> Vec<RawPoint> {
        let Some(&last) = self.window.back() else {
            return Vec::new();
        };

        let count = self.window.len();
        let mut result = Vec::with_capacity(count);
        for i in 0..count {
            // a one-point window goes straight to the final pressure
            let progress = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                1.0
            };
            let mut point = self.next(last);
            point.pressure = lerp(point.pressure, last.pressure, progress);
            result.push(point);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, pressure: f32, timestamp_ms: f64) -> RawPoint {
        RawPoint {
            x,
            y,
            pressure,
            tilt_x: 0.0,
            tilt_y: 0.0,
            timestamp_ms,
        }
    }

    #[test]
    fn test_first_output_equals_input() {
        let mut stabilizer = Stabilizer::new(8);
        let raw = point(42.0, 17.0, 0.7, 5.0);
        let smoothed = stabilizer.next(raw);
        assert!((smoothed.x - 42.0).abs() < 1e-5);
        assert!((smoothed.y - 17.0).abs() < 1e-5);
        assert!((smoothed.pressure - 0.7).abs() < 1e-5);
    }

    #[test]
    fn test_constant_input_is_identity() {
        let mut stabilizer = Stabilizer::new(5);
        let raw = point(10.0, 20.0, 0.5, 0.0);
        for _ in 0..5 {
            let smoothed = stabilizer.next(raw);
            assert!((smoothed.x - 10.0).abs() < 1e-5);
            assert!((smoothed.y - 20.0).abs() < 1e-5);
            assert!((smoothed.pressure - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_timestamp_passes_through() {
        let mut stabilizer = Stabilizer::new(4);
        stabilizer.next(point(0.0, 0.0, 0.5, 100.0));
        let smoothed = stabilizer.next(point(8.0, 0.0, 0.5, 116.0));
        assert_eq!(smoothed.timestamp_ms, 116.0);
    }

    #[test]
    fn test_output_lags_behind_moving_input() {
        let mut stabilizer = Stabilizer::new(10);
        stabilizer.next(point(0.0, 0.0, 0.5, 0.0));
        let smoothed = stabilizer.next(point(100.0, 0.0, 0.5, 16.0));
        // nine window slots still hold the first point
        assert!((smoothed.x - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_close_ends_on_raw_pressure() {
        let mut stabilizer = Stabilizer::new(6);
        stabilizer.next(point(0.0, 0.0, 0.2, 0.0));
        stabilizer.next(point(5.0, 0.0, 0.9, 16.0));

        let tail = stabilizer.close();
        assert_eq!(tail.len(), 6);
        let final_point = tail.last().unwrap();
        assert!((final_point.pressure - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_close_with_window_of_one() {
        let mut stabilizer = Stabilizer::new(1);
        stabilizer.next(point(3.0, 4.0, 0.8, 0.0));
        let tail = stabilizer.close();
        assert_eq!(tail.len(), 1);
        assert!((tail[0].pressure - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_close_before_any_input_is_empty() {
        let mut stabilizer = Stabilizer::new(4);
        assert!(stabilizer.close().is_empty());
    }
}

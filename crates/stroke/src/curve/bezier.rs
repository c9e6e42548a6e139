//! Cubic Bezier paths with an arc-length lookup table

use glam::Vec2;

use super::{nearest_on_chords, point_at_on_chords, CurveLocation, ParametricCurve, PathError};

/// One cubic Bezier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluate the Bernstein form at `t`
    pub fn point_at(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        let uu = u * u;
        let tt = t * t;
        self.p0 * (uu * u) + self.p1 * (3.0 * uu * t) + self.p2 * (3.0 * u * tt) + self.p3 * (tt * t)
    }
}

/// A chain of cubic Bezier segments flattened into a fixed-resolution
/// arc-length lookup table
///
/// Arc-length queries interpolate linearly between table samples, which
/// is accurate to well under a pixel at the default resolution for
/// brush-scale geometry.
#[derive(Debug, Clone)]
pub struct BezierPath {
    segments: Vec<CubicSegment>,
    lut_points: Vec<Vec2>,
    lut_lengths: Vec<f32>,
    closed: bool,
    total: f32,
}

impl BezierPath {
    /// Flatten `segments` into a lookup table with `resolution` samples
    /// per segment
    pub fn new(segments: Vec<CubicSegment>, closed: bool, resolution: usize) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::NoSegments);
        }
        let resolution = resolution.max(2);

        let mut lut_points = Vec::with_capacity(segments.len() * resolution + 1);
        let mut lut_lengths = Vec::with_capacity(segments.len() * resolution + 2);
        let mut total = 0.0;

        lut_points.push(segments[0].p0);
        lut_lengths.push(0.0);

        for segment in &segments {
            for i in 1..=resolution {
                let t = i as f32 / resolution as f32;
                let point = segment.point_at(t);
                total += point.distance(lut_points[lut_points.len() - 1]);
                lut_points.push(point);
                lut_lengths.push(total);
            }
        }

        if closed {
            // the closed table keeps one more length entry than points,
            // covering the chord back to the start
            if let Some(&last) = lut_points.last() {
                if last == lut_points[0] {
                    // duplicated endpoint already is the closing chord
                    lut_points.pop();
                } else {
                    total += lut_points[0].distance(last);
                    lut_lengths.push(total);
                }
            }
        }

        if total <= 0.0 {
            return Err(PathError::ZeroLength);
        }

        Ok(Self {
            segments,
            lut_points,
            lut_lengths,
            closed,
            total,
        })
    }

    /// The source segments
    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }
}

impl ParametricCurve for BezierPath {
    fn length(&self) -> f32 {
        self.total
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn nearest_location(&self, point: Vec2) -> CurveLocation {
        nearest_on_chords(&self.lut_points, &self.lut_lengths, self.closed, point)
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        point_at_on_chords(&self.lut_points, &self.lut_lengths, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_segment() -> CubicSegment {
        // a degree-elevated straight line from (0,0) to (90,0)
        CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(60.0, 0.0),
            Vec2::new(90.0, 0.0),
        )
    }

    #[test]
    fn test_no_segments() {
        assert_eq!(
            BezierPath::new(Vec::new(), false, 16).unwrap_err(),
            PathError::NoSegments
        );
    }

    #[test]
    fn test_straight_cubic_length() {
        let path = BezierPath::new(vec![straight_segment()], false, 32).unwrap();
        assert!((path.length() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_at_midpoint() {
        let path = BezierPath::new(vec![straight_segment()], false, 32).unwrap();
        let mid = path.point_at(45.0);
        assert!((mid.x - 45.0).abs() < 0.1);
        assert!(mid.y.abs() < 1e-4);
    }

    #[test]
    fn test_nearest_location() {
        let path = BezierPath::new(vec![straight_segment()], false, 32).unwrap();
        let loc = path.nearest_location(Vec2::new(30.0, 12.0));
        assert!((loc.point.x - 30.0).abs() < 0.1);
        assert!(loc.point.y.abs() < 1e-4);
        assert!((loc.offset - 30.0).abs() < 0.1);
    }

    #[test]
    fn test_curved_segment_longer_than_chord() {
        let arc = CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 55.0),
            Vec2::new(100.0, 55.0),
            Vec2::new(100.0, 0.0),
        );
        let path = BezierPath::new(vec![arc], false, 64).unwrap();
        assert!(path.length() > 100.0);
    }
}

//! Piecewise-linear curve

use glam::Vec2;

use super::{nearest_on_chords, point_at_on_chords, CurveLocation, ParametricCurve, PathError};

/// A polyline (open) or polygon (closed) with precomputed cumulative
/// segment lengths
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Vec2>,
    /// `lengths[i]` is the arc length at `points[i]`; closed polylines
    /// carry one extra entry for the closing segment
    lengths: Vec<f32>,
    closed: bool,
    total: f32,
}

impl Polyline {
    /// Build a polyline from at least two points
    pub fn new(points: Vec<Vec2>, closed: bool) -> Result<Self, PathError> {
        if points.len() < 2 {
            return Err(PathError::TooFewPoints(points.len()));
        }

        let mut lengths = Vec::with_capacity(points.len() + 1);
        lengths.push(0.0);
        let mut total = 0.0;
        for i in 1..points.len() {
            total += points[i].distance(points[i - 1]);
            lengths.push(total);
        }
        if closed {
            total += points[0].distance(points[points.len() - 1]);
            lengths.push(total);
        }

        if total <= 0.0 {
            return Err(PathError::ZeroLength);
        }

        Ok(Self {
            points,
            lengths,
            closed,
            total,
        })
    }

    /// The polyline's vertices
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }
}

impl ParametricCurve for Polyline {
    fn length(&self) -> f32 {
        self.total
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    fn nearest_location(&self, point: Vec2) -> CurveLocation {
        nearest_on_chords(&self.points, &self.lengths, self.closed, point)
    }

    fn point_at(&self, offset: f32) -> Vec2 {
        point_at_on_chords(&self.points, &self.lengths, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polyline {
        Polyline::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(100.0, 0.0),
                Vec2::new(100.0, 100.0),
                Vec2::new(0.0, 100.0),
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_too_few_points() {
        assert_eq!(
            Polyline::new(vec![Vec2::ZERO], false).unwrap_err(),
            PathError::TooFewPoints(1)
        );
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(
            Polyline::new(vec![Vec2::ZERO, Vec2::ZERO], false).unwrap_err(),
            PathError::ZeroLength
        );
    }

    #[test]
    fn test_closed_square_length() {
        assert!((square().length() - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_open_length_skips_closing_segment() {
        let line = Polyline::new(
            vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 50.0)],
            false,
        )
        .unwrap();
        assert!((line.length() - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_location_on_square() {
        let square = square();
        // just outside the bottom edge
        let loc = square.nearest_location(Vec2::new(35.0, -5.0));
        assert!((loc.point.x - 35.0).abs() < 1e-4);
        assert!((loc.point.y - 0.0).abs() < 1e-4);
        assert!((loc.offset - 35.0).abs() < 1e-4);

        // just outside the left edge, which is the closing segment
        let loc = square.nearest_location(Vec2::new(-3.0, 60.0));
        assert!((loc.point.x - 0.0).abs() < 1e-4);
        assert!((loc.point.y - 60.0).abs() < 1e-4);
        assert!((loc.offset - 340.0).abs() < 1e-4);
    }

    #[test]
    fn test_point_at_walks_edges() {
        let square = square();
        let p = square.point_at(150.0);
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!((p.y - 50.0).abs() < 1e-4);

        // closing segment runs down the left edge
        let q = square.point_at(350.0);
        assert!((q.x - 0.0).abs() < 1e-4);
        assert!((q.y - 50.0).abs() < 1e-4);
    }
}

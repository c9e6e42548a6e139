//! Speed-sensitive opacity
//!
//! Maps pointer speed (distance per event) onto a dab alpha, inverted so
//! slow deliberate movement paints denser, with exponential smoothing to
//! keep the value stable frame to frame.

use impasto_config::SpeedAlphaConfig;

use crate::math::{clamp01, lerp, map_range};

pub struct SpeedAlpha {
    config: SpeedAlphaConfig,
    prev_x: f32,
    prev_y: f32,
    time: f64,
    alpha: f32,
}

impl SpeedAlpha {
    pub fn new(config: SpeedAlphaConfig) -> Self {
        let alpha = config.max_alpha;
        Self {
            config,
            prev_x: 0.0,
            prev_y: 0.0,
            time: 0.0,
            alpha,
        }
    }

    /// Reset the reference position; alpha starts at its maximum
    pub fn down(&mut self, x: f32, y: f32, time: f64) {
        self.prev_x = x;
        self.prev_y = y;
        self.time = time;
        self.alpha = self.config.max_alpha;
    }

    /// Update with a new pointer position and return the smoothed alpha
    ///
    /// The mapping parameter is clamped so alpha stays inside
    /// `[min_alpha, max_alpha]`.
    pub fn move_to(&mut self, x: f32, y: f32, time: f64) -> f32 {
        let dx = self.prev_x - x;
        let dy = self.prev_y - y;
        let dist = (dx * dx + dy * dy).sqrt();

        let t = clamp01(map_range(
            dist,
            self.config.min_distance,
            self.config.max_distance,
            0.0,
            1.0,
        ));
        let raw = lerp(self.config.max_alpha, self.config.min_alpha, t);
        self.alpha = raw * self.config.smoothing + self.alpha * (1.0 - self.config.smoothing);

        self.prev_x = x;
        self.prev_y = y;
        self.time = time;

        self.alpha
    }

    /// Current smoothed alpha
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Timestamp of the last processed event
    pub fn last_event_ms(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_move_keeps_max_alpha() {
        let config = SpeedAlphaConfig::default();
        let max_alpha = config.max_alpha;
        let mut speed_alpha = SpeedAlpha::new(config);
        speed_alpha.down(10.0, 10.0, 0.0);
        let alpha = speed_alpha.move_to(10.0, 10.0, 16.0);
        assert!((alpha - max_alpha).abs() < 1e-6);
    }

    #[test]
    fn test_fast_move_approaches_min_alpha() {
        let config = SpeedAlphaConfig::default();
        let min_alpha = config.min_alpha;
        let mut speed_alpha = SpeedAlpha::new(config);
        speed_alpha.down(0.0, 0.0, 0.0);

        // one large move is smoothed, not an immediate jump to the floor
        let first = speed_alpha.move_to(300.0, 0.0, 16.0);
        assert!(first < 1.0);
        assert!(first > min_alpha);

        // sustained fast movement converges toward the floor
        let mut alpha = first;
        for i in 2..40 {
            alpha = speed_alpha.move_to(300.0 * i as f32, 0.0, 16.0 * i as f64);
        }
        assert!((alpha - min_alpha).abs() < 1e-3);
    }

    #[test]
    fn test_alpha_never_leaves_configured_range() {
        let config = SpeedAlphaConfig::default();
        let (lo, hi) = (config.min_alpha, config.max_alpha);
        let mut speed_alpha = SpeedAlpha::new(config);
        speed_alpha.down(0.0, 0.0, 0.0);
        for i in 1..20 {
            // far beyond max_distance
            let alpha = speed_alpha.move_to(10_000.0 * i as f32, 0.0, 16.0 * i as f64);
            assert!(alpha >= lo - 1e-6 && alpha <= hi + 1e-6);
        }
    }

    #[test]
    fn test_down_resets_alpha() {
        let mut speed_alpha = SpeedAlpha::new(SpeedAlphaConfig::default());
        speed_alpha.down(0.0, 0.0, 0.0);
        speed_alpha.move_to(500.0, 0.0, 16.0);
        assert!(speed_alpha.alpha() < 1.0);

        speed_alpha.down(500.0, 0.0, 32.0);
        assert!((speed_alpha.alpha() - 1.0).abs() < 1e-6);
        assert_eq!(speed_alpha.last_event_ms(), 32.0);
    }
}

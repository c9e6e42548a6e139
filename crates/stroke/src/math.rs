//! Scalar math helpers for stroke interpolation

use std::f32::consts::TAU;

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp to the unit interval
#[inline]
pub fn clamp01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Map `x` from `[in_min, in_max]` to `[out_min, out_max]`
///
/// An empty input range maps everything to `out_min`. The mapping is not
/// clamped; callers clamp the parameter when the output must stay in
/// range.
pub fn map_range(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max - in_min == 0.0 {
        return out_min;
    }
    let t = (x - in_min) / (in_max - in_min);
    out_min + t * (out_max - out_min)
}

/// Hermite smoothstep over a unit parameter
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Uniform Catmull-Rom basis through four scalar control values
///
/// `P(t) = 0.5 * (2*p1 + (-p0+p2)*t + (2p0-5p1+4p2-p3)*t^2 + (-p0+3p1-3p2+p3)*t^3)`
pub fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Normalize an angle into `[0, 2*PI)`
pub fn normalize_angle(a: f32) -> f32 {
    (a % TAU + TAU) % TAU
}

/// Snap an angle to the circularly-closest target within `threshold`
/// radians, or return it unchanged.
pub fn snap_angle(angle: f32, threshold: f32, targets: &[f32]) -> f32 {
    let normalized = normalize_angle(angle);

    let mut closest = None;
    let mut closest_diff = f32::INFINITY;

    for &target in targets {
        let normalized_target = normalize_angle(target);
        let diff = (normalized - normalized_target).abs();
        let circular_diff = diff.min(TAU - diff);

        if circular_diff < closest_diff {
            closest_diff = circular_diff;
            closest = Some(normalized_target);
        }
    }

    match closest {
        Some(target) if closest_diff <= threshold => target,
        _ => angle,
    }
}

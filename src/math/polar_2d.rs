use std::f64::consts::{PI, TAU};

use super::Point2;

/// Converts polar coordinates around `origin` to a cartesian point.
///
/// `angle` is measured from the x axis in radians.
#[must_use]
pub fn polar_to_cartesian(origin: &Point2, angle: f64, distance: f64) -> Point2 {
    Point2::new(
        origin.x + angle.cos() * distance,
        origin.y + angle.sin() * distance,
    )
}

/// Angle of the directed line from `a` to `b`, in radians, within `[0, 2π)`.
///
/// Computed as `π + atan2(a.y - b.y, a.x - b.x)`. Offsetting a point by
/// `angle - π/2` lands on the right-hand side of `a → b`, which is the outer
/// face of every wall.
#[must_use]
pub fn edge_angle_radians(a: &Point2, b: &Point2) -> f64 {
    (PI + (a.y - b.y).atan2(a.x - b.x)).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn polar_along_axes() {
        let origin = Point2::new(1.0, 2.0);
        let p = polar_to_cartesian(&origin, 0.0, 3.0);
        assert!((p.x - 4.0).abs() < TOLERANCE);
        assert!((p.y - 2.0).abs() < TOLERANCE);

        let q = polar_to_cartesian(&origin, FRAC_PI_2, 3.0);
        assert!((q.x - 1.0).abs() < 1e-9);
        assert!((q.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn edge_angle_follows_direction() {
        let o = Point2::new(0.0, 0.0);
        assert!(edge_angle_radians(&o, &Point2::new(4.0, 0.0)).abs() < TOLERANCE);
        assert!((edge_angle_radians(&o, &Point2::new(0.0, 4.0)) - FRAC_PI_2).abs() < TOLERANCE);
        assert!((edge_angle_radians(&o, &Point2::new(-4.0, 0.0)) - PI).abs() < TOLERANCE);
        assert!((edge_angle_radians(&o, &Point2::new(0.0, -4.0)) - 3.0 * FRAC_PI_2).abs() < TOLERANCE);
    }

    #[test]
    fn edge_angle_is_normalized() {
        let a = Point2::new(3.0, 1.0);
        for b in [
            Point2::new(-2.0, 7.0),
            Point2::new(5.0, -9.0),
            Point2::new(3.0, 0.5),
            Point2::new(10.0, 1.0),
        ] {
            let angle = edge_angle_radians(&a, &b);
            assert!((0.0..TAU).contains(&angle), "angle={angle}");
        }
    }

    #[test]
    fn offset_by_minus_quarter_turn_lands_right() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(4.0, 0.0);
        let angle = edge_angle_radians(&a, &b);
        let back = polar_to_cartesian(&a, angle - FRAC_PI_2, 0.1);
        assert!(back.x.abs() < 1e-9);
        assert!((back.y + 0.1).abs() < 1e-9);
    }
}

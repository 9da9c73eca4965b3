use super::{Point2, TOLERANCE};

/// Intersection of circle `(p1, d1)` with circle `(p2, d2)` in 2D.
///
/// Of the two candidates, returns the one to the left of the directed line
/// `p1 → p2` (positive cross product) when `prefer_left` is set, otherwise
/// the one to the right.
///
/// Never fails for separated or nested circles: when the triangle inequality
/// between `d1`, `d2` and `|p2 - p1|` is violated the discriminant is clamped to
/// zero, so both candidates collapse onto the line through the centers.
/// Coincident centers return `p1`.
#[must_use]
pub fn circle_circle_intersect_2d(
    p1: &Point2,
    d1: f64,
    p2: &Point2,
    d2: f64,
    prefer_left: bool,
) -> Point2 {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let dist_sq = dx * dx + dy * dy;
    let dist = dist_sq.sqrt();
    if dist < TOLERANCE {
        return *p1;
    }

    // Distance from p1 along p1→p2 to the radical line.
    let a = (d1 * d1 - d2 * d2 + dist_sq) / (2.0 * dist);
    let h = (d1 * d1 - a * a).max(0.0).sqrt();

    let mx = p1.x + a * dx / dist;
    let my = p1.y + a * dy / dist;

    let first = Point2::new(mx + h * dy / dist, my - h * dx / dist);
    let second = Point2::new(mx - h * dy / dist, my + h * dx / dist);

    let side = dx * (first.y - p1.y) - dy * (first.x - p1.x);
    if (side > 0.0) == prefer_left {
        first
    } else {
        second
    }
}

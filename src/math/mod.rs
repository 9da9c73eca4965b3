pub mod intersect_2d;
pub mod polar_2d;

/// 2D point type. On the ground plane, `x` is world x and `y` is world z.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type. `y` is up.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Projects a point onto the ground plane as `(x, z)`.
#[must_use]
pub fn ground(p: &Point3) -> Point2 {
    Point2::new(p.x, p.z)
}

/// Lifts a ground-plane point back to 3D at elevation `y`.
#[must_use]
pub fn lift(q: &Point2, y: f64) -> Point3 {
    Point3::new(q.x, y, q.y)
}

/// Distance between two points measured on the ground plane only.
#[must_use]
pub fn ground_distance(a: &Point3, b: &Point3) -> f64 {
    nalgebra::distance(&ground(a), &ground(b))
}

//! Linear algebra type aliases and geometric tolerances.

pub type Point2 = nalgebra::Point2<f64>;
pub type Vector2 = nalgebra::Vector2<f64>;

/// Geometric tolerance for point coincidence tests (distance in model units).
pub const TOLERANCE: f64 = 1e-9;

/// Tangent magnitudes at or below this are treated as degenerate
/// (stationary hodograph, e.g. coincident control points).
pub const TANGENT_EPS: f64 = 1e-12;

//! Cubic Bézier track centerlines with parallel bed-edge polylines.
//!
//! A [`TrackCurve`] holds the four control points of one cubic segment and
//! approximates it as a polyline at a configurable resolution, together
//! with two companion polylines offset perpendicular to the curve on
//! either side, the edges of a fixed-width track bed centered on the
//! curve. Recomputation is lazy: mutations mark the cached polylines
//! dirty, and the next read refreshes them.
//!
//! ```
//! use railbed::{Point2, TrackCurve, TrackLine};
//!
//! let mut curve = TrackCurve::from_control_points([
//!     Point2::new(0.0, 0.0),
//!     Point2::new(0.0, 10.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(10.0, 0.0),
//! ]);
//! curve.set_resolution(0.5);
//!
//! let center = curve.polyline(TrackLine::Center);
//! assert_eq!(center.len(), 3);
//! assert_eq!(center[0], Point2::new(0.0, 0.0));
//! assert_eq!(center[2], Point2::new(10.0, 0.0));
//! ```

pub mod curve;
pub mod math;

pub use curve::{polyline_length, TrackCurve, TrackLine};
pub use math::{Point2, Vector2};

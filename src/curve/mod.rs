//! Cubic Bézier track segments with parallel bed-edge polylines.
//!
//! [`TrackCurve`] owns the four control points of one cubic segment and
//! lazily maintains three index-aligned polylines: the centerline sampled
//! at a uniform parameter step, and the two bed edges displaced
//! perpendicular to the local tangent by a fixed half-width. Tangents come
//! from the hodograph (the quadratic derivative curve), so no finite
//! differencing is involved.

use log::debug;

use crate::math::{Point2, Vector2, TANGENT_EPS};

/// Default parameter step between consecutive centerline samples.
pub const DEFAULT_RESOLUTION: f64 = 0.025;

/// Default distance from the centerline to each bed edge.
pub const DEFAULT_BED_HALF_WIDTH: f64 = 4.5;

const CONTROL_POINTS: usize = 4;
const HODOGRAPH_POINTS: usize = 3;

/// Selects one of the three polylines maintained by a [`TrackCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackLine {
    /// The sampled centerline itself.
    Center,
    /// The edge at `center + half_width * (uy, -ux)` for unit tangent
    /// `(ux, uy)`: the left-hand bed edge in screen (y-down) coordinates.
    LeftEdge,
    /// The opposite edge, `center - half_width * (uy, -ux)`.
    RightEdge,
}

/// One cubic Bézier track segment with cached polyline approximations.
///
/// Sampling is uniform in the curve parameter: `floor(1/resolution) + 1`
/// samples shared by the centerline, both bed edges, and the tangent
/// sequence. Outputs are recomputed lazily on the next read after a
/// control-point, translation, or resolution change; reads therefore take
/// `&mut self`, and the returned slices borrow the curve until the next
/// mutating call.
#[derive(Debug, Clone)]
pub struct TrackCurve {
    control_points: [Point2; CONTROL_POINTS],
    hodograph: [Vector2; HODOGRAPH_POINTS],
    resolution: f64,
    bed_half_width: f64,

    center: Vec<Point2>,
    left_edge: Vec<Point2>,
    right_edge: Vec<Point2>,
    tangents: Vec<Vector2>,

    resolution_dirty: bool,
    control_points_dirty: bool,
    recompute_count: u64,
}

impl TrackCurve {
    /// A zero-length segment: all control points at the origin, default
    /// resolution and bed half-width. Position the control points before
    /// the first read.
    pub fn new() -> Self {
        Self {
            control_points: [Point2::origin(); CONTROL_POINTS],
            hodograph: [Vector2::zeros(); HODOGRAPH_POINTS],
            resolution: DEFAULT_RESOLUTION,
            bed_half_width: DEFAULT_BED_HALF_WIDTH,
            center: Vec::new(),
            left_edge: Vec::new(),
            right_edge: Vec::new(),
            tangents: Vec::new(),
            resolution_dirty: true,
            control_points_dirty: true,
            recompute_count: 0,
        }
    }

    /// A segment with its control points already placed.
    pub fn from_control_points(control_points: [Point2; CONTROL_POINTS]) -> Self {
        Self {
            control_points,
            ..Self::new()
        }
    }

    /// Fixes the bed half-width at construction. There is no
    /// post-construction setter.
    pub fn with_bed_half_width(mut self, half_width: f64) -> Self {
        self.bed_half_width = half_width;
        self
    }

    /// Parameter step between consecutive samples.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Sets the parameter step. Smaller values sample more densely.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < resolution < 1`.
    pub fn set_resolution(&mut self, resolution: f64) {
        assert!(
            resolution > 0.0 && resolution < 1.0,
            "resolution {resolution} outside the open interval (0, 1)"
        );
        if resolution != self.resolution {
            self.resolution = resolution;
            self.resolution_dirty = true;
        }
    }

    /// Distance from the centerline to each bed edge.
    pub fn bed_half_width(&self) -> f64 {
        self.bed_half_width
    }

    /// The control point at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn control_point(&self, index: usize) -> Point2 {
        assert!(index < CONTROL_POINTS, "control point index {index} out of range");
        self.control_points[index]
    }

    /// Replaces the control point at `index`. Writing a value equal to the
    /// current one is a no-op and does not invalidate the cache.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 4`.
    pub fn set_control_point(&mut self, index: usize, point: Point2) {
        assert!(index < CONTROL_POINTS, "control point index {index} out of range");
        if self.control_points[index] != point {
            self.control_points[index] = point;
            self.control_points_dirty = true;
        }
    }

    /// Coordinate-pair convenience for [`Self::set_control_point`].
    pub fn set_control_point_xy(&mut self, index: usize, x: f64, y: f64) {
        self.set_control_point(index, Point2::new(x, y));
    }

    /// Translates the whole segment. A zero translation is a no-op and
    /// does not invalidate the cache.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let delta = Vector2::new(dx, dy);
        for point in &mut self.control_points {
            *point += delta;
        }
        self.control_points_dirty = true;
    }

    /// The requested polyline, refreshed if a mutation preceded this read.
    ///
    /// All three polylines share sample indices: the same parameter value
    /// produced the entries at index `i` of every line.
    pub fn polyline(&mut self, line: TrackLine) -> &[Point2] {
        self.refresh();
        match line {
            TrackLine::Center => &self.center,
            TrackLine::LeftEdge => &self.left_edge,
            TrackLine::RightEdge => &self.right_edge,
        }
    }

    /// Unnormalized tangent (hodograph) samples, index-aligned with the
    /// polylines and refreshed by the same cache machinery.
    pub fn tangent_points(&mut self) -> &[Vector2] {
        self.refresh();
        &self.tangents
    }

    /// Chord-length sum over the centerline samples.
    ///
    /// Derived on every call rather than cached; callers that need the
    /// length repeatedly between mutations should hold on to it.
    pub fn length(&mut self) -> f64 {
        polyline_length(self.polyline(TrackLine::Center))
    }

    /// Number of full recomputes performed so far. Reads served from the
    /// cache leave it unchanged.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    fn sample_count(&self) -> usize {
        (1.0 / self.resolution) as usize + 1
    }

    fn refresh(&mut self) {
        if self.resolution_dirty {
            self.resize_buffers();
            self.recompute();
        } else if self.control_points_dirty {
            self.recompute();
        }
        self.resolution_dirty = false;
        self.control_points_dirty = false;
    }

    fn resize_buffers(&mut self) {
        let n = self.sample_count();
        debug!("resizing track buffers to {n} samples");
        self.center.resize(n, Point2::origin());
        self.left_edge.resize(n, Point2::origin());
        self.right_edge.resize(n, Point2::origin());
        self.tangents.resize(n, Vector2::zeros());
    }

    fn recompute(&mut self) {
        self.recompute_count += 1;
        debug!("recomputing track polylines ({} samples)", self.center.len());

        for i in 0..HODOGRAPH_POINTS {
            self.hodograph[i] = 3.0 * (self.control_points[i + 1] - self.control_points[i]);
        }

        // Endpoints are assigned from the control points directly, never
        // evaluated through the polynomial: segments chained end-to-end
        // must meet bit-exactly.
        let n = self.center.len();
        self.center[0] = self.control_points[0];
        for i in 1..n - 1 {
            // Interior sampling starts at t = 0, so index 1 repeats the
            // first control point.
            let t = self.resolution * (i - 1) as f64;
            self.center[i] = cubic_point(&self.control_points, t);
        }
        self.center[n - 1] = self.control_points[3];

        self.tangents[0] = self.hodograph[0];
        for i in 1..n - 1 {
            let t = self.resolution * i as f64;
            self.tangents[i] = quadratic_vector(&self.hodograph, t);
        }
        self.tangents[n - 1] = self.hodograph[2];

        for i in 0..n {
            let u = unit_tangent(self.tangents[i]);
            let offset = self.bed_half_width * Vector2::new(u.y, -u.x);
            self.left_edge[i] = self.center[i] + offset;
            self.right_edge[i] = self.center[i] - offset;
        }
    }
}

impl Default for TrackCurve {
    fn default() -> Self {
        Self::new()
    }
}

/// Chord-length sum of a polyline.
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// B(t) = (1−t)³·C0 + 3(1−t)²t·C1 + 3(1−t)t²·C2 + t³·C3
fn cubic_point(c: &[Point2; CONTROL_POINTS], t: f64) -> Point2 {
    let inv = 1.0 - t;
    let inv2 = inv * inv;
    let t2 = t * t;
    Point2::from(
        inv2 * inv * c[0].coords
            + 3.0 * inv2 * t * c[1].coords
            + 3.0 * inv * t2 * c[2].coords
            + t2 * t * c[3].coords,
    )
}

/// B(t) = (1−t)²·D0 + 2(1−t)t·D1 + t²·D2
fn quadratic_vector(d: &[Vector2; HODOGRAPH_POINTS], t: f64) -> Vector2 {
    let inv = 1.0 - t;
    inv * inv * d[0] + 2.0 * inv * t * d[1] + t * t * d[2]
}

/// Unit tangent, falling back to +x when the velocity collapses.
fn unit_tangent(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len > TANGENT_EPS {
        v / len
    } else {
        Vector2::x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_point_hits_both_endpoints() {
        let c = [
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 5.0),
            Point2::new(7.0, 5.0),
            Point2::new(9.0, 2.0),
        ];
        assert!((cubic_point(&c, 0.0) - c[0]).norm() < 1e-14);
        assert!((cubic_point(&c, 1.0) - c[3]).norm() < 1e-14);
    }

    #[test]
    fn quadratic_vector_midpoint_blend() {
        let d = [
            Vector2::new(4.0, 0.0),
            Vector2::new(0.0, 4.0),
            Vector2::new(-4.0, 0.0),
        ];
        // (D0 + 2·D1 + D2) / 4 at t = 0.5
        let mid = quadratic_vector(&d, 0.5);
        assert!((mid - Vector2::new(0.0, 2.0)).norm() < 1e-14);
    }

    #[test]
    fn unit_tangent_degenerate_fallback() {
        let u = unit_tangent(Vector2::zeros());
        assert_eq!(u, Vector2::x());
        let u = unit_tangent(Vector2::new(0.0, 2.0));
        assert!((u - Vector2::new(0.0, 1.0)).norm() < 1e-14);
    }

    #[test]
    fn polyline_length_of_open_square() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((polyline_length(&pts) - 3.0).abs() < 1e-14);
    }
}

//! Uniform Catmull-Rom curve through a list of points.

use glam::Vec3;

/// Samples taken along the curve to build the arc-length table.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parameter step used for finite-difference tangents.
const TANGENT_DELTA: f32 = 1.0e-4;

/// Smooth curve passing through every control point.
///
/// The curve parameter `t` in `0..=1` is spread uniformly over the spans
/// between control points; `u` in `0..=1` is the arc-length parameter. End
/// spans clamp the missing neighbour to the end point itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurve {
    points: Vec<Vec3>,
    arc_lengths: Vec<f32>,
}

impl SplineCurve {
    /// Fit a curve through `points`.
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.measure();
        curve
    }

    /// Fit a curve through a flattened coordinate array.
    #[must_use]
    pub fn from_flat(coordinates: &[f32]) -> Self {
        Self::new(super::points_from_flat(coordinates))
    }

    /// The control points.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Point at curve parameter `t` (clamped to `0..=1`).
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        if n == 0 {
            return Vec3::ZERO;
        }
        let last = n - 1;
        let scaled = last as f32 * t.clamp(0.0, 1.0);
        let span = (scaled.floor() as usize).min(last);
        let weight = scaled - span as f32;

        let p0 = self.points[span.saturating_sub(1)];
        let p1 = self.points[span];
        let p2 = self.points[(span + 1).min(last)];
        let p3 = self.points[(span + 2).min(last)];
        catmull_rom(p0, p1, p2, p3, weight)
    }

    /// `divisions + 1` points evenly spaced in `t`, both ends included.
    #[must_use]
    pub fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    /// Approximate total length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Map an arc-length fraction `u` to the curve parameter `t`.
    #[must_use]
    pub fn u_to_t(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let total = self.length();
        if total <= f32::EPSILON {
            return u;
        }
        let target = u * total;
        let lengths = &self.arc_lengths;
        let last = lengths.len() - 1;
        let i = lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(last - 1);
        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f32 + fraction) / last as f32
    }

    /// Point at arc-length fraction `u`.
    #[must_use]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at curve parameter `t` (zero on a degenerate curve).
    #[must_use]
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    /// Unit tangent at arc-length fraction `u`.
    #[must_use]
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Cumulative chord lengths at `ARC_LENGTH_DIVISIONS + 1` samples.
    fn measure(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut previous = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for d in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point(d as f32 / ARC_LENGTH_DIVISIONS as f32);
            sum += current.distance(previous);
            lengths.push(sum);
            previous = current;
        }
        lengths
    }
}

/// Uniform Catmull-Rom interpolation between `p1` and `p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3
        + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2
        + v0 * t
        + p1
}

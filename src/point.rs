use glam::DVec2;

use crate::function::FunctionDescriptor;

/// x-values used for every `y = ax²` table, independent of `a`.
pub const QUADRATIC_SAMPLE_XS: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

#[derive(Copy, Clone, Debug, PartialEq)]
/// A point in data space.
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point on the curve of `descriptor` above `x`.
    pub fn on_curve(descriptor: &FunctionDescriptor, x: f64) -> Self {
        Self::new(x, descriptor.evaluate(x))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Larger of `|x|` and `|y|`.
    pub fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }

    /// True when the point lies on the x- or y-axis.
    pub fn on_axis(&self) -> bool {
        self.x == 0.0 || self.y == 0.0
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// A straight segment in data space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// The sample points of one calculation, in table order.
///
/// Built only through the per-family constructors, so it is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// `y = ax`: the origin plus the point above `x1`.
    pub fn origin(descriptor: &FunctionDescriptor, x1: f64) -> Self {
        Self {
            points: vec![Point::new(0.0, 0.0), Point::on_curve(descriptor, x1)],
        }
    }

    /// `y = ax + b`: the points above `x1` and `x2`, sorted by x.
    pub fn affine(descriptor: &FunctionDescriptor, x1: f64, x2: f64) -> Self {
        let mut points = vec![
            Point::on_curve(descriptor, x1),
            Point::on_curve(descriptor, x2),
        ];
        points.sort_by(|p1, p2| p1.x.total_cmp(&p2.x));
        Self { points }
    }

    /// `y = ax²`: the fixed abscissae -2..=2.
    pub fn quadratic(descriptor: &FunctionDescriptor) -> Self {
        Self {
            points: QUADRATIC_SAMPLE_XS
                .iter()
                .map(|&x| Point::on_curve(descriptor, x))
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_set_starts_at_origin() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let set = PointSet::origin(&f, 3.0);
        assert_eq!(set.as_slice(), &[Point::new(0.0, 0.0), Point::new(3.0, 6.0)]);
    }

    #[test]
    fn affine_set_is_sorted() {
        let f = FunctionDescriptor::Affine { a: -1.0, b: 2.0 };
        let set = PointSet::affine(&f, 3.0, -1.0);
        assert_eq!(set.as_slice(), &[Point::new(-1.0, 3.0), Point::new(3.0, -1.0)]);
    }

    #[test]
    fn quadratic_set_has_fixed_abscissae() {
        let f = FunctionDescriptor::Quadratic { a: -3.0 };
        let set = PointSet::quadratic(&f);
        let xs: Vec<f64> = set.iter().map(|p| p.x).collect();
        assert_eq!(xs, QUADRATIC_SAMPLE_XS);
        assert_eq!(set.as_slice()[0], Point::new(-2.0, -12.0));
    }

    #[test]
    fn axis_membership() {
        assert!(Point::new(0.0, 3.0).on_axis());
        assert!(Point::new(2.0, 0.0).on_axis());
        assert!(!Point::new(2.0, 3.0).on_axis());
        assert_eq!(Point::new(-4.0, 3.0).max_abs(), 4.0);
    }

    #[test]
    fn converts_to_glam() {
        let v: DVec2 = Point::new(1.0, -2.0).into();
        assert_eq!(v, DVec2::new(1.0, -2.0));
        assert_eq!(Point::from(v), Point::new(1.0, -2.0));
    }
}

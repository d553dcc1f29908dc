use crate::point::{Point, Segment};

/// Dashed guides from a sample point back to both axes.
///
/// The vertical guide runs from `(x, 0)` to the point and the horizontal one
/// from `(0, y)` to the point, illustrating the point's coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionGuide {
    /// The sample point the guides lead to.
    pub point: Point,
    /// From the foot on the x-axis up (or down) to the point.
    pub vertical: Segment,
    /// From the foot on the y-axis across to the point.
    pub horizontal: Segment,
}

impl ProjectionGuide {
    /// Guides for `point`, or `None` when the point lies on an axis and the
    /// guide would coincide with the axis itself.
    pub fn for_point(point: Point) -> Option<Self> {
        if point.on_axis() {
            return None;
        }
        Some(Self {
            point,
            vertical: Segment::new(Point::new(point.x, 0.0), point),
            horizontal: Segment::new(Point::new(0.0, point.y), point),
        })
    }

    /// Both segments, vertical first.
    pub fn segments(&self) -> [Segment; 2] {
        [self.vertical, self.horizontal]
    }
}

/// Guides for every off-axis point, in point order.
pub fn projection_guides(points: &[Point]) -> Vec<ProjectionGuide> {
    points
        .iter()
        .copied()
        .filter_map(ProjectionGuide::for_point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_axis_point_gets_two_guides() {
        let guide = ProjectionGuide::for_point(Point::new(3.0, 6.0)).unwrap();
        assert_eq!(
            guide.vertical,
            Segment::new(Point::new(3.0, 0.0), Point::new(3.0, 6.0))
        );
        assert_eq!(
            guide.horizontal,
            Segment::new(Point::new(0.0, 6.0), Point::new(3.0, 6.0))
        );
    }

    #[test]
    fn points_on_axes_are_exempt() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(-1.0, 0.0),
            Point::new(-1.0, 0.5),
        ];
        let guides = projection_guides(&points);
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].point, Point::new(-1.0, 0.5));
    }
}

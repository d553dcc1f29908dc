use crate::{
    axis_scale::Domain,
    point::{Point, Segment},
    ticks::{self, Tick},
};

/// Grid lines and tick positions for one square domain.
///
/// Both axes share the domain, so one tick list serves for both.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    ticks: Vec<Tick>,
    extent: f64,
}

impl Grid {
    pub fn new(domain: Domain, target_ticks: f64) -> Self {
        Self {
            ticks: ticks::ticks(domain.min(), domain.max(), target_ticks),
            extent: domain.half_extent(),
        }
    }

    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Vertical grid lines, one per tick, spanning the full domain height.
    pub fn vertical_lines(&self) -> impl Iterator<Item = Segment> + '_ {
        let m = self.extent;
        self.ticks
            .iter()
            .map(move |t| Segment::new(Point::new(t.value, -m), Point::new(t.value, m)))
    }

    /// Horizontal grid lines, one per tick, spanning the full domain width.
    pub fn horizontal_lines(&self) -> impl Iterator<Item = Segment> + '_ {
        let m = self.extent;
        self.ticks
            .iter()
            .map(move |t| Segment::new(Point::new(-m, t.value), Point::new(m, t.value)))
    }

    /// All grid lines, vertical first.
    pub fn lines(&self) -> impl Iterator<Item = Segment> + '_ {
        self.vertical_lines().chain(self.horizontal_lines())
    }

    /// Ticks that carry a label (everything except the origin).
    pub fn labelled_ticks(&self) -> impl Iterator<Item = (Tick, String)> + '_ {
        self.ticks
            .iter()
            .filter_map(|&t| ticks::tick_label(t).map(|label| (t, label)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        let domain = Domain::fit(&[Point::new(3.0, 6.0)], 2.0).unwrap();
        Grid::new(domain, 10.0)
    }

    #[test]
    fn one_line_per_tick_per_axis() {
        let grid = grid();
        assert_eq!(grid.lines().count(), 2 * grid.ticks().len());
    }

    #[test]
    fn lines_span_domain() {
        let grid = grid();
        let first = grid.vertical_lines().next().unwrap();
        assert_eq!(first.from.y, -8.0);
        assert_eq!(first.to.y, 8.0);
        let h = grid.horizontal_lines().next().unwrap();
        assert_eq!((h.from.x, h.to.x), (-8.0, 8.0));
    }

    #[test]
    fn origin_is_not_labelled() {
        let grid = grid();
        assert!(grid.labelled_ticks().all(|(t, _)| !t.is_zero()));
        assert_eq!(grid.labelled_ticks().count(), grid.ticks().len() - 1);
    }
}

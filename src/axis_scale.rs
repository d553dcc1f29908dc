use glam::DVec2;

use crate::{config::LayoutConfig, point::Point};

/// Symmetric square domain `[-m, m]` shared by both axes.
///
/// Keeping the origin centred and both axes on the same interval gives the
/// plot a 1:1 aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    half_extent: f64,
}

impl Domain {
    /// Fit the domain to `points`: `m = max(|x|, |y|) + padding`.
    ///
    /// Returns `None` for an empty point set.
    pub fn fit(points: &[Point], padding: f64) -> Option<Self> {
        let furthest = points
            .iter()
            .map(Point::max_abs)
            .reduce(f64::max)?;
        Some(Self {
            half_extent: furthest + padding,
        })
    }

    /// `m` in `[-m, m]`.
    pub fn half_extent(&self) -> f64 {
        self.half_extent
    }

    pub fn min(&self) -> f64 {
        -self.half_extent
    }

    pub fn max(&self) -> f64 {
        self.half_extent
    }

    pub fn width(&self) -> f64 {
        2.0 * self.half_extent
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

/// Linear map from a data interval onto a pixel interval.
///
/// The pixel interval may be reversed (`range_start > range_end`), which is how
/// the vertical axis grows upward on a canvas whose y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl AxisScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Transform a data value into a pixel coordinate.
    pub fn data_to_pixel(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Transform a pixel coordinate back into a data value.
    pub fn pixel_to_data(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        d0 + (pixel - r0) / (r1 - r0) * (d1 - d0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// The pair of axis maps taking a [`Domain`] onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub x: AxisScale,
    pub y: AxisScale,
}

impl ScaleTransform {
    /// Horizontal: `[-m, m] -> [margin, size - margin]`.
    /// Vertical: `[-m, m] -> [size - margin, margin]`.
    pub fn new(domain: Domain, config: &LayoutConfig) -> Self {
        let (lo, hi) = config.plot_range();
        let span = (domain.min(), domain.max());
        Self {
            x: AxisScale::new(span, (lo, hi)),
            y: AxisScale::new(span, (hi, lo)),
        }
    }

    pub fn to_pixel(&self, point: Point) -> DVec2 {
        DVec2::new(self.x.data_to_pixel(point.x), self.y.data_to_pixel(point.y))
    }

    pub fn to_data(&self, pixel: DVec2) -> Point {
        Point::new(self.x.pixel_to_data(pixel.x), self.y.pixel_to_data(pixel.y))
    }

    /// Pixel position of the data origin.
    pub fn origin(&self) -> DVec2 {
        self.to_pixel(Point::new(0.0, 0.0))
    }
}

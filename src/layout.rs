//! The layout engine.
//!
//! [`layout`] turns a function descriptor and its sample points into a
//! [`RenderPlan`]: the fitted domain, the scale transform onto the canvas, the
//! grid, a restartable stream of dense curve samples, the projection guides and
//! the anchor of the formula label. Renderers only ever read a plan; a new
//! calculation produces a new plan.

use thiserror::Error;

use crate::{
    axis_scale::{Domain, ScaleTransform},
    config::LayoutConfig,
    function::FunctionDescriptor,
    grid::Grid,
    point::Point,
    projection::{ProjectionGuide, projection_guides},
};

/// Why a point set cannot be laid out.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// No points provided.
    #[error("cannot lay out an empty point set")]
    Empty,
    /// A point has a NaN or infinite coordinate.
    #[error("point ({x}, {y}) is not finite")]
    NonFinitePoint { x: f64, y: f64 },
    /// The domain would need more dense samples than the configured budget.
    #[error("domain of half-extent {half_extent} needs more than {limit} curve samples")]
    DomainTooLarge { half_extent: f64, limit: usize },
}

/// Lazily evaluated curve samples `x_i = start + i * step`, `i in 0..count`.
///
/// Cloning restarts the sequence from its current position; [`CurveSampler::samples`]
/// always starts from the beginning.
#[derive(Debug, Clone)]
pub struct CurveSamples {
    descriptor: FunctionDescriptor,
    start: f64,
    step: f64,
    next: usize,
    count: usize,
}

impl Iterator for CurveSamples {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next >= self.count {
            return None;
        }
        let x = self.start + self.next as f64 * self.step;
        self.next += 1;
        Some(Point::on_curve(&self.descriptor, x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveSamples {}

/// Recipe for the dense samples across a domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSampler {
    descriptor: FunctionDescriptor,
    start: f64,
    step: f64,
    count: usize,
}

impl CurveSampler {
    /// Samples from `domain.min()` (inclusive) toward `domain.max()` (exclusive).
    pub fn new(descriptor: FunctionDescriptor, domain: Domain, step: f64) -> Self {
        let count = (domain.width() / step).ceil().max(0.0) as usize;
        Self {
            descriptor,
            start: domain.min(),
            step,
            count,
        }
    }

    pub fn samples(&self) -> CurveSamples {
        CurveSamples {
            descriptor: self.descriptor,
            start: self.start,
            step: self.step,
            next: 0,
            count: self.count,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The formula text and the curve point it is placed next to.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLabel {
    pub text: String,
    /// Data-space anchor on the curve.
    pub anchor: Point,
}

/// Everything a renderer needs to draw one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub descriptor: FunctionDescriptor,
    /// Side of the square canvas in pixel units.
    pub canvas_size: f64,
    pub domain: Domain,
    pub transform: ScaleTransform,
    pub grid: Grid,
    pub curve: CurveSampler,
    /// Sample points, in table order.
    pub points: Vec<Point>,
    pub guides: Vec<ProjectionGuide>,
    /// `None` when no part of the curve is comfortably visible.
    pub label: Option<FunctionLabel>,
}

/// Lay out `points` of `descriptor` onto the canvas described by `config`.
pub fn layout(
    descriptor: &FunctionDescriptor,
    points: &[Point],
    config: &LayoutConfig,
) -> Result<RenderPlan, LayoutError> {
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(LayoutError::NonFinitePoint { x: p.x, y: p.y });
    }
    let domain = Domain::fit(points, config.domain_padding).ok_or(LayoutError::Empty)?;
    if !config.fits_sample_budget(domain.half_extent()) {
        return Err(LayoutError::DomainTooLarge {
            half_extent: domain.half_extent(),
            limit: config.max_curve_samples,
        });
    }
    let transform = ScaleTransform::new(domain, config);
    let curve = CurveSampler::new(*descriptor, domain, config.sample_step);

    let label = label_anchor(curve.samples(), &transform, config).map(|anchor| FunctionLabel {
        text: descriptor.label(),
        anchor,
    });

    log::debug!(
        "layout {}: m = {}, {} curve samples, label {}",
        descriptor,
        domain.half_extent(),
        curve.len(),
        if label.is_some() { "placed" } else { "omitted" }
    );

    Ok(RenderPlan {
        descriptor: *descriptor,
        canvas_size: config.canvas_size,
        domain,
        transform,
        grid: Grid::new(domain, config.grid_target_ticks),
        curve,
        points: points.to_vec(),
        guides: projection_guides(points),
        label,
    })
}

/// Pick the curve sample the formula label is attached to.
///
/// Only samples whose pixel y lies inside [`LayoutConfig::label_window`] are
/// candidates. Ordered right to left, the candidate at
/// `floor(label_anchor_fraction * count)` wins, which keeps the label near the
/// right end of the visible curve without touching the edge. A fraction of 1
/// picks the leftmost candidate.
pub fn label_anchor(
    samples: impl Iterator<Item = Point>,
    transform: &ScaleTransform,
    config: &LayoutConfig,
) -> Option<Point> {
    let (lo, hi) = config.label_window();
    let mut visible: Vec<Point> = samples
        .filter(|p| {
            let py = transform.y.data_to_pixel(p.y);
            (lo..=hi).contains(&py)
        })
        .collect();
    visible.sort_by(|a, b| b.x.total_cmp(&a.x));

    let idx = (visible.len() as f64 * config.label_anchor_fraction).floor() as usize;
    visible
        .get(idx.min(visible.len().saturating_sub(1)))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::PointSet;

    #[test]
    fn rejects_empty_points() {
        let f = FunctionDescriptor::Origin { a: 1.0 };
        assert_eq!(
            layout(&f, &[], &LayoutConfig::default()),
            Err(LayoutError::Empty)
        );
    }

    #[test]
    fn rejects_non_finite_points() {
        let f = FunctionDescriptor::Origin { a: 1.0 };
        let err = layout(&f, &[Point::new(f64::NAN, 1.0)], &LayoutConfig::default());
        assert!(matches!(err, Err(LayoutError::NonFinitePoint { .. })));
    }

    #[test]
    fn rejects_domains_beyond_sample_budget() {
        let f = FunctionDescriptor::Origin { a: 100_000.0 };
        let points = PointSet::origin(&f, 100_000.0);
        let err = layout(&f, points.as_slice(), &LayoutConfig::default());
        assert!(matches!(
            err,
            Err(LayoutError::DomainTooLarge { limit: 100_000, .. })
        ));

        // m = 8 needs 160 samples
        let tight = LayoutConfig::default().with_max_curve_samples(159);
        let f = FunctionDescriptor::Origin { a: 2.0 };
        assert!(layout(&f, PointSet::origin(&f, 3.0).as_slice(), &tight).is_err());
        let exact = LayoutConfig::default().with_max_curve_samples(160);
        assert!(layout(&f, PointSet::origin(&f, 3.0).as_slice(), &exact).is_ok());
    }

    #[test]
    fn full_anchor_fraction_keeps_the_label() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let config = LayoutConfig::default().with_label_anchor_fraction(1.0);
        let plan = layout(&f, PointSet::origin(&f, 3.0).as_slice(), &config).unwrap();
        let anchor = plan.label.expect("visible samples exist").anchor;

        let (lo, hi) = config.label_window();
        let leftmost = plan
            .curve
            .samples()
            .filter(|p| (lo..=hi).contains(&plan.transform.y.data_to_pixel(p.y)))
            .map(|p| p.x)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(anchor.x, leftmost);
    }

    #[test]
    fn sample_count_covers_domain() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let plan = layout(&f, PointSet::origin(&f, 3.0).as_slice(), &LayoutConfig::default())
            .unwrap();
        // m = 8, domain width 16, step 0.1
        assert_eq!(plan.curve.len(), 160);
        let samples: Vec<Point> = plan.curve.samples().collect();
        assert_eq!(samples.len(), 160);
        assert_eq!(samples[0], Point::new(-8.0, -16.0));
        assert!(samples.last().unwrap().x < 8.0);
    }

    #[test]
    fn samples_restart() {
        let f = FunctionDescriptor::Quadratic { a: 1.0 };
        let plan = layout(&f, PointSet::quadratic(&f).as_slice(), &LayoutConfig::default())
            .unwrap();
        let first: Vec<Point> = plan.curve.samples().collect();
        let second: Vec<Point> = plan.curve.samples().collect();
        assert_eq!(first, second);
        assert_eq!(plan.curve.samples().len(), plan.curve.len());
    }

    #[test]
    fn label_sits_ten_percent_in_from_the_right() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let config = LayoutConfig::default();
        let plan = layout(&f, PointSet::origin(&f, 3.0).as_slice(), &config).unwrap();
        let label = plan.label.expect("visible line gets a label");
        assert_eq!(label.text, "y = 2x");

        let (lo, hi) = config.label_window();
        let visible: Vec<Point> = plan
            .curve
            .samples()
            .filter(|p| (lo..=hi).contains(&plan.transform.y.data_to_pixel(p.y)))
            .collect();
        let right_of_anchor = visible.iter().filter(|p| p.x > label.anchor.x).count();
        assert_eq!(right_of_anchor, (visible.len() as f64 * 0.1).floor() as usize);
        assert!(label.anchor.x < plan.domain.max());
    }

    #[test]
    fn label_omitted_when_curve_is_clipped() {
        // m = 32, so y = 30 maps to pixel 56.25, above the label window.
        let f = FunctionDescriptor::Affine { a: 0.0, b: 30.0 };
        let points = PointSet::affine(&f, -1.0, 1.0);
        let plan = layout(&f, points.as_slice(), &LayoutConfig::default()).unwrap();
        assert_eq!(plan.label, None);
    }

    #[test]
    fn flat_line_through_the_middle_is_labelled() {
        let f = FunctionDescriptor::Origin { a: 0.0 };
        let plan = layout(&f, PointSet::origin(&f, 1.0).as_slice(), &LayoutConfig::default())
            .unwrap();
        let label = plan.label.unwrap();
        assert_eq!(label.anchor.y, 0.0);
        assert_eq!(label.text, "y = 0x");
    }

    #[test]
    fn guides_skip_origin() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let plan = layout(&f, PointSet::origin(&f, 3.0).as_slice(), &LayoutConfig::default())
            .unwrap();
        assert_eq!(plan.guides.len(), 1);
        assert_eq!(plan.guides[0].point, Point::new(3.0, 6.0));
    }

    #[test]
    fn layout_is_deterministic() {
        let f = FunctionDescriptor::Affine { a: 0.5, b: -1.5 };
        let points = PointSet::affine(&f, 4.0, -2.0);
        let config = LayoutConfig::default();
        assert_eq!(
            layout(&f, points.as_slice(), &config),
            layout(&f, points.as_slice(), &config)
        );
    }
}

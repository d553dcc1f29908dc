//! Pixel-space drawing list for a [`RenderPlan`].
//!
//! A [`Scene`] is what both the on-screen canvas and the export rasterizer
//! paint. It is built once per plan and output size; painters walk
//! [`Scene::primitives`] in order, so later primitives draw on top.

use glam::Vec2;

use crate::{
    Color,
    layout::RenderPlan,
    point::Point,
    style::{MarkerStyle, PlotStyle, Stroke},
};

/// Length of a tick mark, outward from the axis.
const TICK_SIZE: f32 = 5.0;
/// Gap between a tick mark and its label.
const TICK_PADDING: f32 = 5.0;
/// Average glyph advance as a fraction of the font size.
const GLYPH_ASPECT: f32 = 0.6;

/// A text run anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub content: String,
    pub position: Vec2,
    pub size: f32,
    pub color: Color,
}

/// One thing to paint.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Vec2>,
        stroke: Stroke,
    },
    /// Filled triangle, used for axis arrowheads.
    Triangle { points: [Vec2; 3], fill: Color },
    Marker { center: Vec2, style: MarkerStyle },
    Text(Label),
}

/// Everything needed to paint a plan onto a square surface of `size` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: f32,
    pub background: Color,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Build the scene for `plan` at `size` pixels per side.
    ///
    /// The plan is laid out on its own canvas size; every coordinate and
    /// length is scaled by `size / plan.canvas_size`.
    pub fn new(plan: &RenderPlan, style: &PlotStyle, size: f32) -> Self {
        let builder = SceneBuilder {
            plan,
            style,
            scale: size / plan.canvas_size as f32,
            size,
            primitives: Vec::new(),
        };
        builder.build()
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, &Stroke)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, stroke } => Some((*from, *to, stroke)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(label) => Some(label),
            _ => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Marker { center, .. } => Some(*center),
            _ => None,
        })
    }
}

struct SceneBuilder<'a> {
    plan: &'a RenderPlan,
    style: &'a PlotStyle,
    scale: f32,
    size: f32,
    primitives: Vec<Primitive>,
}

impl SceneBuilder<'_> {
    fn build(mut self) -> Scene {
        self.grid();
        self.axes();
        self.curve();
        self.guides();
        self.markers();
        self.function_label();
        Scene {
            size: self.size,
            background: self.style.background,
            primitives: self.primitives,
        }
    }

    fn px(&self, point: Point) -> Vec2 {
        self.plan.transform.to_pixel(point).as_vec2() * self.scale
    }

    fn stroke(&self, stroke: Stroke) -> Stroke {
        Stroke {
            width: stroke.width * self.scale,
            ..stroke
        }
    }

    fn text(&mut self, content: impl Into<String>, position: Vec2, size: f32, color: Color) {
        self.primitives.push(Primitive::Text(Label {
            content: content.into(),
            position,
            size: size * self.scale,
            color,
        }));
    }

    fn grid(&mut self) {
        let stroke = self.stroke(self.style.grid);
        let lines: Vec<Primitive> = self
            .plan
            .grid
            .lines()
            .map(|s| Primitive::Line {
                from: self.px(s.from),
                to: self.px(s.to),
                stroke,
            })
            .collect();
        self.primitives.extend(lines);
    }

    fn axes(&mut self) {
        let k = self.scale;
        let (lo, hi) = self.plan.transform.x.range();
        let (lo, hi) = (lo as f32 * k, hi as f32 * k);
        let origin = self.plan.transform.origin().as_vec2() * k;
        let axis = self.stroke(self.style.axis);
        let tick_stroke = self.stroke(Stroke {
            width: 1.0,
            ..self.style.axis
        });
        let font = self.style.tick_label_size;
        let text = self.style.text;

        let plan = self.plan;
        for (tick, label) in plan.grid.labelled_ticks() {
            let x = self.px(Point::new(tick.value, 0.0)).x;
            self.primitives.push(Primitive::Line {
                from: Vec2::new(x, origin.y),
                to: Vec2::new(x, origin.y + TICK_SIZE * k),
                stroke: tick_stroke,
            });
            let width = text_width(&label, font * k);
            let top = origin.y + (TICK_SIZE + TICK_PADDING) * k;
            self.text(label.clone(), Vec2::new(x - width / 2.0, top), font, text);

            let y = self.px(Point::new(0.0, tick.value)).y;
            self.primitives.push(Primitive::Line {
                from: Vec2::new(origin.x, y),
                to: Vec2::new(origin.x - TICK_SIZE * k, y),
                stroke: tick_stroke,
            });
            let right = origin.x - (TICK_SIZE + TICK_PADDING) * k;
            let left = right - text_width(&label, font * k);
            self.text(label, Vec2::new(left, y - font * k / 2.0), font, text);
        }

        let arrow = self.style.arrow_size * k;
        let x_tip = Vec2::new(hi, origin.y);
        let y_tip = Vec2::new(origin.x, lo);
        self.primitives.push(Primitive::Line {
            from: Vec2::new(lo, origin.y),
            to: x_tip,
            stroke: axis,
        });
        self.primitives.push(Primitive::Triangle {
            points: arrowhead(x_tip, Vec2::X, arrow),
            fill: axis.color,
        });
        self.primitives.push(Primitive::Line {
            from: Vec2::new(origin.x, hi),
            to: y_tip,
            stroke: axis,
        });
        self.primitives.push(Primitive::Triangle {
            points: arrowhead(y_tip, Vec2::NEG_Y, arrow),
            fill: axis.color,
        });

        let axis_font = self.style.axis_label_size;
        let x_label = Vec2::new(
            x_tip.x - text_width("x", axis_font * k),
            origin.y - 10.0 * k - axis_font * k,
        );
        self.text("x", x_label, axis_font, text);
        self.text("y", Vec2::new(origin.x + 15.0 * k, y_tip.y - axis_font * k), axis_font, text);
        self.text(
            "0",
            Vec2::new(origin.x - 12.0 * k, origin.y + 15.0 * k - font * k),
            font,
            text,
        );
    }

    fn curve(&mut self) {
        let points: Vec<Vec2> = self.plan.curve.samples().map(|p| self.px(p)).collect();
        let bounds = (Vec2::ZERO, Vec2::splat(self.size));
        let stroke = self.stroke(self.style.curve);
        for run in clip_polyline(&points, bounds) {
            self.primitives.push(Primitive::Polyline {
                points: run,
                stroke,
            });
        }
    }

    fn guides(&mut self) {
        let stroke = self.stroke(self.style.guide);
        let lines: Vec<Primitive> = self
            .plan
            .guides
            .iter()
            .flat_map(|g| g.segments())
            .map(|s| Primitive::Line {
                from: self.px(s.from),
                to: self.px(s.to),
                stroke,
            })
            .collect();
        self.primitives.extend(lines);
    }

    fn markers(&mut self) {
        let marker = MarkerStyle {
            radius: self.style.marker.radius * self.scale,
            outline_width: self.style.marker.outline_width * self.scale,
            ..self.style.marker
        };
        let markers: Vec<Primitive> = self
            .plan
            .points
            .iter()
            .map(|&p| Primitive::Marker {
                center: self.px(p),
                style: marker,
            })
            .collect();
        self.primitives.extend(markers);
    }

    fn function_label(&mut self) {
        let Some(label) = &self.plan.label else {
            return;
        };
        let anchor = self.px(label.anchor);
        let size = self.style.function_label_size;
        let position = Vec2::new(
            anchor.x + self.style.function_label_offset * self.scale,
            anchor.y - size * self.scale / 2.0,
        );
        self.text(
            label.text.clone(),
            position,
            size,
            self.style.function_label_color,
        );
    }
}

/// Rough advance width of `text` at `size`, for centring and right-aligning.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ASPECT
}

/// Triangle with its tip at `tip`, pointing along `direction`.
fn arrowhead(tip: Vec2, direction: Vec2, size: f32) -> [Vec2; 3] {
    let back = tip - direction * size;
    let side = direction.perp() * (size / 2.0);
    [tip, back + side, back - side]
}

/// Split a polyline into the runs that fall inside the rectangle `bounds`
/// (min corner, max corner), clipping segments that cross the edge.
pub fn clip_polyline(points: &[Vec2], bounds: (Vec2, Vec2)) -> Vec<Vec<Vec2>> {
    let mut runs: Vec<Vec<Vec2>> = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();

    for pair in points.windows(2) {
        match clip_segment(pair[0], pair[1], bounds) {
            Some((a, b)) => {
                if current.last() != Some(&a) {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(a);
                }
                current.push(b);
            }
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Liang-Barsky clipping of the segment `a -> b` against `bounds`.
pub fn clip_segment(a: Vec2, b: Vec2, bounds: (Vec2, Vec2)) -> Option<(Vec2, Vec2)> {
    let (min, max) = bounds;
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;

    let edges = [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let start = if t0 > 0.0 { a + d * t0 } else { a };
    let end = if t1 < 1.0 { a + d * t1 } else { b };
    Some((start, end))
}

/// Break `from -> to` into the visible pieces of a dash pattern.
pub fn dash(from: Vec2, to: Vec2, length: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let total = from.distance(to);
    if total == 0.0 || length <= 0.0 {
        return Vec::new();
    }
    if gap <= 0.0 {
        return vec![(from, to)];
    }
    let dir = (to - from) / total;
    let mut dashes = Vec::new();
    let mut start = 0.0;
    while start < total {
        let end = (start + length).min(total);
        dashes.push((from + dir * start, from + dir * end));
        start += length + gap;
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::LayoutConfig, function::FunctionDescriptor, layout::layout, point::PointSet,
    };
    use approx::assert_relative_eq;

    fn plan(f: FunctionDescriptor, points: PointSet) -> RenderPlan {
        layout(&f, points.as_slice(), &LayoutConfig::default()).unwrap()
    }

    #[test]
    fn contains_markers_guides_and_label() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let scene = Scene::new(&plan(f, PointSet::origin(&f, 3.0)), &PlotStyle::default(), 600.0);

        assert_eq!(scene.markers().count(), 2);
        let dashed = scene
            .lines()
            .filter(|(_, _, s)| s.line_style != crate::style::LineStyle::Solid)
            .count();
        assert_eq!(dashed, 2);
        assert!(scene.labels().any(|l| l.content == "y = 2x"));
        assert_eq!(scene.labels().filter(|l| l.content == "0").count(), 1);
    }

    #[test]
    fn marker_positions_match_transform() {
        let f = FunctionDescriptor::Origin { a: 2.0 };
        let plan = plan(f, PointSet::origin(&f, 3.0));
        let scene = Scene::new(&plan, &PlotStyle::default(), 600.0);
        let origin = scene.markers().next().unwrap();
        assert_relative_eq!(origin.x, 300.0);
        assert_relative_eq!(origin.y, 300.0);
    }

    #[test]
    fn scales_to_output_size() {
        let f = FunctionDescriptor::Quadratic { a: 1.0 };
        let plan = plan(f, PointSet::quadratic(&f));
        let full = Scene::new(&plan, &PlotStyle::default(), 600.0);
        let small = Scene::new(&plan, &PlotStyle::default(), 300.0);
        for (a, b) in full.markers().zip(small.markers()) {
            assert_relative_eq!(a.x / 2.0, b.x, epsilon = 1e-4);
            assert_relative_eq!(a.y / 2.0, b.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn curve_stays_inside_surface() {
        let f = FunctionDescriptor::Quadratic { a: 3.0 };
        let scene = Scene::new(&plan(f, PointSet::quadratic(&f)), &PlotStyle::default(), 600.0);
        let polylines: Vec<&Vec<Vec2>> = scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Polyline { points, .. } => Some(points),
                _ => None,
            })
            .collect();
        assert!(!polylines.is_empty());
        for p in polylines.iter().flat_map(|run| run.iter()) {
            assert!((-0.01..=600.01).contains(&p.y), "{p}");
        }
    }

    #[test]
    fn clips_crossing_segment() {
        let bounds = (Vec2::ZERO, Vec2::splat(10.0));
        let (a, b) = clip_segment(Vec2::new(5.0, -5.0), Vec2::new(5.0, 5.0), bounds).unwrap();
        assert_eq!(a, Vec2::new(5.0, 0.0));
        assert_eq!(b, Vec2::new(5.0, 5.0));
        assert_eq!(
            clip_segment(Vec2::new(-1.0, -1.0), Vec2::new(-5.0, 20.0), bounds),
            None
        );
    }

    #[test]
    fn polyline_splits_on_exit_and_reentry() {
        let bounds = (Vec2::ZERO, Vec2::splat(10.0));
        let points = [
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(3.0, 20.0),
            Vec2::new(4.0, 30.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(6.0, 6.0),
        ];
        let runs = clip_polyline(&points, bounds);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0][0], Vec2::new(1.0, 1.0));
        assert_eq!(runs[1].last(), Some(&Vec2::new(6.0, 6.0)));
    }

    #[test]
    fn dash_pattern() {
        let dashes = dash(Vec2::ZERO, Vec2::new(20.0, 0.0), 4.0, 4.0);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[1], (Vec2::new(8.0, 0.0), Vec2::new(12.0, 0.0)));
        assert!(dash(Vec2::ONE, Vec2::ONE, 4.0, 4.0).is_empty());
    }
}

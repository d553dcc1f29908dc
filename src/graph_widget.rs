use iced::{
    Element, Length, Pixels, Rectangle, Renderer, Theme, mouse,
    widget::{
        canvas::{self, Cache, Frame, Geometry, LineDash, Path},
        container,
    },
};

use crate::{
    Color,
    layout::RenderPlan,
    scene::{Primitive, Scene},
    style::{LineStyle, PlotStyle, Stroke},
};

/// An iced canvas showing one [`RenderPlan`].
///
/// The geometry is cached and only rebuilt when the plan is replaced or the
/// widget is resized.
pub struct GraphWidget {
    plan: Option<RenderPlan>,
    style: PlotStyle,
    frame_color: Color,
    size: f32,
    cache: Cache,
}

impl GraphWidget {
    /// An empty graph of `size` logical pixels per side.
    pub fn new(size: f32, style: PlotStyle) -> Self {
        Self {
            plan: None,
            style,
            frame_color: crate::style::Palette::default().primary,
            size,
            cache: Cache::new(),
        }
    }

    /// Replace the plotted plan, or clear the graph with `None`.
    pub fn set_plan(&mut self, plan: Option<RenderPlan>) {
        self.plan = plan;
        self.cache.clear();
    }

    pub fn plan(&self) -> Option<&RenderPlan> {
        self.plan.as_ref()
    }

    pub fn view<'a, Message: 'a>(&'a self) -> Element<'a, Message> {
        let frame_color = self.frame_color;
        container(
            canvas::Canvas::new(self)
                .width(Length::Fixed(self.size))
                .height(Length::Fixed(self.size)),
        )
        .padding(8.0)
        .style(move |_: &Theme| container::Style {
            background: Some(Color::WHITE.into()),
            border: iced::Border {
                color: frame_color,
                width: 2.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
    }
}

impl<Message> canvas::Program<Message> for GraphWidget {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let Some(plan) = &self.plan else {
            return Vec::new();
        };
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let size = frame.width().min(frame.height());
            paint(frame, &Scene::new(plan, &self.style, size));
        });
        vec![geometry]
    }
}

fn paint(frame: &mut Frame, scene: &Scene) {
    frame.fill_rectangle(
        iced::Point::ORIGIN,
        iced::Size::new(scene.size, scene.size),
        scene.background,
    );

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line { from, to, stroke } => {
                stroke_path(frame, &Path::line(point(*from), point(*to)), stroke);
            }
            Primitive::Polyline { points, stroke } => {
                let path = Path::new(|b| {
                    let mut points = points.iter().copied().map(point);
                    if let Some(first) = points.next() {
                        b.move_to(first);
                        points.for_each(|p| b.line_to(p));
                    }
                });
                stroke_path(frame, &path, stroke);
            }
            Primitive::Triangle { points, fill } => {
                let path = Path::new(|b| {
                    b.move_to(point(points[0]));
                    b.line_to(point(points[1]));
                    b.line_to(point(points[2]));
                    b.close();
                });
                frame.fill(&path, *fill);
            }
            Primitive::Marker { center, style } => {
                let circle = Path::circle(point(*center), style.radius);
                frame.fill(&circle, style.fill);
                stroke_path(
                    frame,
                    &circle,
                    &Stroke::solid(style.outline, style.outline_width),
                );
            }
            Primitive::Text(label) => {
                frame.fill_text(canvas::Text {
                    content: label.content.clone(),
                    position: point(label.position),
                    color: label.color,
                    size: Pixels(label.size),
                    ..canvas::Text::default()
                });
            }
        }
    }
}

fn stroke_path(frame: &mut Frame, path: &Path, stroke: &Stroke) {
    let dashes;
    let line_dash = match stroke.line_style {
        LineStyle::Solid => LineDash::default(),
        LineStyle::Dashed { length, gap } => {
            dashes = [length, gap];
            LineDash {
                segments: &dashes,
                offset: 0,
            }
        }
    };
    frame.stroke(
        path,
        canvas::Stroke {
            line_dash,
            ..canvas::Stroke::default()
                .with_color(stroke.color)
                .with_width(stroke.width)
        },
    );
}

fn point(v: glam::Vec2) -> iced::Point {
    iced::Point::new(v.x, v.y)
}

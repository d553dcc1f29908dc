//! Off-screen rendering of a plan to RGB pixels, and PNG encoding.

use glam::Vec2;
use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::{
        BitMapBackend, Circle, DrawingArea, DrawingBackend, IntoDrawingArea, IntoFont,
        PathElement, Polygon, RGBAColor, ShapeStyle,
    },
};
use png::{BitDepth, ColorType, Encoder};

use crate::{
    Color,
    export::ExportError,
    layout::RenderPlan,
    scene::{Primitive, Scene, dash},
    style::{LineStyle, PlotStyle, Stroke, rgb8},
};

/// A rendered RGB image, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Snapshot {
    pub fn new(width: u32, height: u32, pixels: Vec<[u8; 3]>) -> Result<Self, ExportError> {
        let expected = width as usize * height as usize;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(ExportError::Snapshot(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-color image.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Interleaved `RGBRGB...` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Renders a plan into a square [`Snapshot`].
pub trait Rasterize: Send + Sync + 'static {
    fn rasterize(&self, plan: &RenderPlan, size: u32) -> Result<Snapshot, ExportError>;
}

/// Software rasterizer drawing through the plotters bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PlottersRasterizer {
    style: PlotStyle,
}

impl PlottersRasterizer {
    pub fn new(style: PlotStyle) -> Self {
        Self { style }
    }
}

impl Rasterize for PlottersRasterizer {
    fn rasterize(&self, plan: &RenderPlan, size: u32) -> Result<Snapshot, ExportError> {
        let scene = Scene::new(plan, &self.style, size as f32);
        let mut pixels = vec![[0u8; 3]; size as usize * size as usize];
        {
            let buffer: &mut [u8] = bytemuck::cast_slice_mut(&mut pixels);
            let root = BitMapBackend::with_buffer(buffer, (size, size)).into_drawing_area();
            paint(&root, &scene).map_err(snapshot_error)?;
            root.present().map_err(snapshot_error)?;
        }
        log::debug!(
            "rasterized {} primitives at {size}x{size}",
            scene.primitives.len()
        );
        Snapshot::new(size, size, pixels)
    }
}

fn snapshot_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Snapshot(err.to_string())
}

fn paint<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scene: &Scene,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    area.fill(&rgba(scene.background))?;

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line { from, to, stroke } => match stroke.line_style {
                LineStyle::Solid => {
                    area.draw(&PathElement::new(vec![px(*from), px(*to)], shape(stroke)))?;
                }
                LineStyle::Dashed { length, gap } => {
                    for (a, b) in dash(*from, *to, length, gap) {
                        area.draw(&PathElement::new(vec![px(a), px(b)], shape(stroke)))?;
                    }
                }
            },
            Primitive::Polyline { points, stroke } => {
                let points: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
                area.draw(&PathElement::new(points, shape(stroke)))?;
            }
            Primitive::Triangle { points, fill } => {
                let points: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
                area.draw(&Polygon::new(points, filled(*fill)))?;
            }
            Primitive::Marker { center, style } => {
                let radius = style.radius.round().max(1.0) as u32;
                area.draw(&Circle::new(px(*center), radius, filled(style.fill)))?;
                let outline = Stroke::solid(style.outline, style.outline_width);
                area.draw(&Circle::new(px(*center), radius, shape(&outline)))?;
            }
            Primitive::Text(label) => {
                let font = ("sans-serif", f64::from(label.size))
                    .into_font()
                    .color(&rgba(label.color));
                area.draw_text(&label.content, &font, px(label.position))?;
            }
        }
    }
    Ok(())
}

fn px(point: Vec2) -> (i32, i32) {
    let p = point.round();
    (p.x as i32, p.y as i32)
}

fn rgba(color: Color) -> RGBAColor {
    let [r, g, b] = rgb8(color);
    RGBAColor(r, g, b, f64::from(color.a))
}

fn shape(stroke: &Stroke) -> ShapeStyle {
    ShapeStyle {
        color: rgba(stroke.color),
        filled: false,
        stroke_width: stroke.width.round().max(1.0) as u32,
    }
}

fn filled(color: Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: true,
        stroke_width: 1,
    }
}

/// Encode an RGB snapshot as an 8-bit PNG.
pub fn encode_png(snapshot: &Snapshot) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut encoder = Encoder::new(&mut buf, snapshot.width, snapshot.height);
        encoder.set_color(ColorType::Rgb);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(snapshot.as_bytes())?;
        writer.finish()?;
    }
    Ok(buf)
}

use crate::Color;

/// Line styling options for strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    /// Solid continuous line.
    Solid,
    /// Dashed line: `length` pixels drawn, then `gap` pixels skipped.
    Dashed { length: f32, gap: f32 },
}

/// A colored stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Width in pixels.
    pub width: f32,
    pub line_style: LineStyle,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width: width.max(0.5),
            line_style: LineStyle::Solid,
        }
    }

    pub fn dashed(color: Color, width: f32, length: f32, gap: f32) -> Self {
        Self {
            color,
            width: width.max(0.5),
            line_style: LineStyle::Dashed { length, gap },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Styling of the sample point markers: a filled dot with an outline ring.
pub struct MarkerStyle {
    /// Radius in pixels.
    pub radius: f32,
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f32,
}

/// Named colors of the application theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Brown, used for frames and headers.
    pub primary: Color,
    /// Red, used for the curve, its label and the markers.
    pub secondary: Color,
    /// Gold highlight.
    pub accent: Color,
    pub warning: Color,
    /// Text drawn on primary-colored surfaces.
    pub on_primary: Color,
    /// Cream panel background.
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb8(0x8B, 0x5A, 0x2B),
            secondary: Color::from_rgb8(0xB2, 0x22, 0x22),
            accent: Color::from_rgb8(0xFF, 0xD7, 0x00),
            warning: Color::from_rgb8(0xFF, 0x00, 0x00),
            on_primary: Color::WHITE,
            background: Color::from_rgb8(0xFF, 0xF8, 0xE1),
        }
    }
}

/// Everything a renderer needs to know about how a plot looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    pub background: Color,
    pub grid: Stroke,
    pub axis: Stroke,
    /// Arrowhead length in pixels, along the axis.
    pub arrow_size: f32,
    pub curve: Stroke,
    pub guide: Stroke,
    pub marker: MarkerStyle,
    pub text: Color,
    pub tick_label_size: f32,
    pub axis_label_size: f32,
    pub function_label_size: f32,
    pub function_label_color: Color,
    /// Horizontal gap between the label anchor and the label text.
    pub function_label_offset: f32,
}

impl PlotStyle {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            background: Color::WHITE,
            grid: Stroke::solid(Color::from_rgb8(0xE5, 0xE7, 0xEB), 1.0),
            axis: Stroke::solid(Color::BLACK, 1.5),
            arrow_size: 9.0,
            curve: Stroke::solid(palette.secondary, 2.5),
            guide: Stroke::dashed(Color::from_rgb8(0x66, 0x66, 0x66), 1.0, 4.0, 4.0),
            marker: MarkerStyle {
                radius: 4.0,
                fill: palette.secondary,
                outline: Color::WHITE,
                outline_width: 1.0,
            },
            text: Color::BLACK,
            tick_label_size: 12.0,
            axis_label_size: 16.0,
            function_label_size: 14.0,
            function_label_color: palette.secondary,
            function_label_offset: 10.0,
        }
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self::from_palette(&Palette::default())
    }
}

/// 8-bit RGB channels of `color`, ignoring alpha.
pub fn rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.r), channel(color.g), channel(color.b)]
}

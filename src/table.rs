//! The two-row value table shown on screen and in exported documents.

use crate::{
    function::{FunctionDescriptor, format_number},
    point::Point,
};

/// Decimal places of y-values in the on-screen table.
pub const SCREEN_PRECISION: usize = 3;

/// One x/y column of the table, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub x: String,
    pub y: String,
}

/// Header row `x | x1 | x2 ...`, second row `<formula> | y1 | y2 ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueTable {
    pub x_header: String,
    pub y_header: String,
    pub columns: Vec<TableColumn>,
}

impl ValueTable {
    /// Table for `points`, y-values rounded to `precision` places.
    ///
    /// Rounding is for display only; x-values are printed as entered.
    pub fn new(descriptor: &FunctionDescriptor, points: &[Point], precision: usize) -> Self {
        Self {
            x_header: "x".to_owned(),
            y_header: descriptor.label(),
            columns: points
                .iter()
                .map(|p| TableColumn {
                    x: format_number(p.x),
                    y: round_for_display(p.y, precision),
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header row cells, label first.
    pub fn x_row(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.x_header.as_str()).chain(self.columns.iter().map(|c| c.x.as_str()))
    }

    /// Value row cells, label first.
    pub fn y_row(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.y_header.as_str()).chain(self.columns.iter().map(|c| c.y.as_str()))
    }
}

/// Round to `places` decimals and drop trailing zeros: `0.3333 -> "0.333"`,
/// `2.50 -> "2.5"`, `-0.0001 -> "0"`.
pub fn round_for_display(value: f64, places: usize) -> String {
    let fixed = format!("{:.*}", places, value);
    match fixed.parse::<f64>() {
        Ok(rounded) => format_number(rounded),
        Err(_) => fixed,
    }
}

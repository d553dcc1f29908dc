//! Value tables, plots and Word worksheets for `y = ax`, `y = ax + b` and `y = ax²`.
//!
//! - Parses coefficients typed as decimals or fractions (`2`, `-1.5`, `1/2`)
//! - Lays out a square, origin-centred plot with grid, projection guides and a formula label
//! - Exports the table and the graph as a `.docx` worksheet
//!
//! Quick start:
//!
//! ```no_run
//! use fnplot::{CalculationInput, Field, FunctionFamily, LayoutConfig, layout};
//!
//! let calculation = CalculationInput::new(FunctionFamily::Affine)
//!     .with(Field::A, "2")
//!     .with(Field::B, "-3")
//!     .validate()
//!     .unwrap();
//! let plan = layout(
//!     &calculation.descriptor,
//!     calculation.points.as_slice(),
//!     &LayoutConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(plan.label.unwrap().text, "y = 2x - 3");
//! ```
pub mod axis_scale;
pub mod config;
pub mod export;
pub mod function;
pub mod grid;
pub mod input;
pub mod layout;
pub mod parse;
pub mod point;
pub mod projection;
pub mod scene;
pub mod style;
pub mod table;
pub mod ticks;

#[cfg(feature = "canvas")]
pub mod app;
#[cfg(feature = "canvas")]
pub mod graph_widget;

// Iced re-exports.
pub use iced::Color;

// Re-exports of public types.
pub use axis_scale::{AxisScale, Domain, ScaleTransform};
pub use config::{ExportConfig, LayoutConfig};
pub use export::{ExportError, ExportRequest, Exporter};
pub use function::{FunctionDescriptor, FunctionFamily};
pub use input::{Calculation, CalculationInput, Field, ValidationError};
pub use layout::{LayoutError, RenderPlan, layout};
pub use parse::{ParseError, parse_number};
pub use point::{Point, PointSet};
pub use table::ValueTable;

#[cfg(feature = "canvas")]
pub use graph_widget::GraphWidget;

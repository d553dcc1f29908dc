//! The form layer: raw text fields in, a validated calculation out.

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    axis_scale::Domain,
    config::LayoutConfig,
    function::{FunctionDescriptor, FunctionFamily},
    parse::parse_number,
    point::PointSet,
};

/// An editable text field of the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    A,
    B,
    X1,
    X2,
}

impl Field {
    /// Caption shown next to the field for `family`.
    pub fn caption(self, family: FunctionFamily) -> &'static str {
        match (self, family) {
            (Self::A, _) => "Hệ số a =",
            (Self::B, _) => "Hệ số b =",
            (Self::X1, FunctionFamily::Affine) => "Giá trị x₁",
            (Self::X1, _) => "Giá trị x",
            (Self::X2, _) => "Giá trị x₂",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::A => "Nhập a (vd: 2 hoặc 1/2)",
            Self::B => "Nhập b (vd: 3 hoặc -1.5)",
            Self::X1 => "vd: 1",
            Self::X2 => "vd: 2",
        }
    }
}

/// A rejected form. The `Display` text is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Vui lòng nhập hệ số a hợp lệ (số thập phân hoặc phân số, vd: 1/2)")]
    InvalidCoefficientA,
    #[error("Vui lòng nhập hệ số b hợp lệ")]
    InvalidCoefficientB,
    /// The single x-value of `y = ax` is missing or malformed.
    #[error("Vui lòng nhập giá trị x hợp lệ")]
    InvalidX,
    /// One of the two x-values of `y = ax + b` is missing or malformed.
    #[error("Vui lòng nhập đầy đủ giá trị x1 và x2")]
    InvalidXPair,
    /// Both x-values of `y = ax + b` are numerically equal.
    #[error("Vui lòng nhập hai giá trị x khác nhau")]
    DuplicateX,
    /// The inputs parse, but a table value overflows or the plot would be
    /// too large to sample.
    #[error("Giá trị quá lớn, vui lòng nhập số nhỏ hơn")]
    OutOfRange,
}

/// A validated request: the function and its table points.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub descriptor: FunctionDescriptor,
    pub points: PointSet,
}

/// Text entered for one family, field by field in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationInput {
    family: FunctionFamily,
    values: IndexMap<Field, String>,
}

impl CalculationInput {
    /// A fresh form: empty coefficients, `x1 = "1"` and `x2 = "2"`.
    pub fn new(family: FunctionFamily) -> Self {
        let mut values = IndexMap::new();
        values.insert(Field::A, String::new());
        match family {
            FunctionFamily::Origin => {
                values.insert(Field::X1, "1".to_owned());
            }
            FunctionFamily::Affine => {
                values.insert(Field::B, String::new());
                values.insert(Field::X1, "1".to_owned());
                values.insert(Field::X2, "2".to_owned());
            }
            FunctionFamily::Quadratic => {}
        }
        Self { family, values }
    }

    pub fn family(&self) -> FunctionFamily {
        self.family
    }

    /// The fields this family asks for, in display order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Update a field. Fields the family does not use are ignored.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if let Some(slot) = self.values.get_mut(&field) {
            *slot = value.into();
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    fn number(&self, field: Field) -> Option<f64> {
        self.get(field).and_then(|text| parse_number(text).ok())
    }

    /// Validate the form against the default layout.
    pub fn validate(&self) -> Result<Calculation, ValidationError> {
        self.validate_for(&LayoutConfig::default())
    }

    /// Validate the form and build the descriptor and point set.
    ///
    /// `a` is checked first for every family; then `b`, then the x-values.
    /// Points that overflow, or whose domain exceeds the curve sample budget of
    /// `config`, are [`ValidationError::OutOfRange`].
    pub fn validate_for(&self, config: &LayoutConfig) -> Result<Calculation, ValidationError> {
        self.build(config)
            .inspect_err(|err| log::warn!("rejected {} input: {err:?}", self.family))
    }

    fn build(&self, config: &LayoutConfig) -> Result<Calculation, ValidationError> {
        let a = self
            .number(Field::A)
            .ok_or(ValidationError::InvalidCoefficientA)?;

        let calculation = match self.family {
            FunctionFamily::Origin => {
                let x1 = self.number(Field::X1).ok_or(ValidationError::InvalidX)?;
                let descriptor = FunctionDescriptor::Origin { a };
                Calculation {
                    points: PointSet::origin(&descriptor, x1),
                    descriptor,
                }
            }
            FunctionFamily::Affine => {
                let b = self
                    .number(Field::B)
                    .ok_or(ValidationError::InvalidCoefficientB)?;
                let (Some(x1), Some(x2)) = (self.number(Field::X1), self.number(Field::X2))
                else {
                    return Err(ValidationError::InvalidXPair);
                };
                if x1 == x2 {
                    return Err(ValidationError::DuplicateX);
                }
                let descriptor = FunctionDescriptor::Affine { a, b };
                Calculation {
                    points: PointSet::affine(&descriptor, x1, x2),
                    descriptor,
                }
            }
            FunctionFamily::Quadratic => {
                let descriptor = FunctionDescriptor::Quadratic { a };
                Calculation {
                    points: PointSet::quadratic(&descriptor),
                    descriptor,
                }
            }
        };

        if !calculation.points.iter().all(|p| p.is_finite()) {
            return Err(ValidationError::OutOfRange);
        }
        let within_budget = Domain::fit(calculation.points.as_slice(), config.domain_padding)
            .is_some_and(|domain| config.fits_sample_budget(domain.half_extent()));
        if !within_budget {
            return Err(ValidationError::OutOfRange);
        }

        log::info!(
            "calculated {} at {} points",
            calculation.descriptor,
            calculation.points.len()
        );
        Ok(calculation)
    }
}

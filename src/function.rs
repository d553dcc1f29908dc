use core::fmt;

/// The three function families taught at lower-secondary level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionFamily {
    /// `y = ax`, a line through the origin.
    Origin,
    /// `y = ax + b`.
    Affine,
    /// `y = ax²`.
    Quadratic,
}

impl FunctionFamily {
    /// All families in menu order.
    pub const ALL: [FunctionFamily; 3] = [Self::Origin, Self::Affine, Self::Quadratic];

    /// Generic formula shown on menus and form headers.
    pub fn template(self) -> &'static str {
        match self {
            Self::Origin => "y = ax",
            Self::Affine => "y = ax + b",
            Self::Quadratic => "y = ax²",
        }
    }
}

impl fmt::Display for FunctionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

/// A fully specified function: family plus validated coefficients.
///
/// Coefficients are finite; the form layer ([`crate::input`]) rejects anything
/// else before a descriptor is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FunctionDescriptor {
    /// `y = ax`
    Origin { a: f64 },
    /// `y = ax + b`
    Affine { a: f64, b: f64 },
    /// `y = ax²`
    Quadratic { a: f64 },
}

impl FunctionDescriptor {
    pub fn family(&self) -> FunctionFamily {
        match self {
            Self::Origin { .. } => FunctionFamily::Origin,
            Self::Affine { .. } => FunctionFamily::Affine,
            Self::Quadratic { .. } => FunctionFamily::Quadratic,
        }
    }

    /// The leading coefficient.
    pub fn a(&self) -> f64 {
        match *self {
            Self::Origin { a } | Self::Affine { a, .. } | Self::Quadratic { a } => a,
        }
    }

    /// Evaluate the function at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            Self::Origin { a } => a * x,
            Self::Affine { a, b } => a * x + b,
            Self::Quadratic { a } => a * x * x,
        }
    }

    /// Formula drawn next to the curve and used as the y-row header of value
    /// tables, e.g. `y = 2x`, `y = -1x + 2`, `y = 2x - 3`, `y = 0.5x²`.
    pub fn label(&self) -> String {
        match *self {
            Self::Origin { a } => format!("y = {}x", format_number(a)),
            Self::Affine { a, b } => {
                let sign = if b < 0.0 { '-' } else { '+' };
                format!("y = {}x {} {}", format_number(a), sign, format_number(b.abs()))
            }
            Self::Quadratic { a } => format!("y = {}x²", format_number(a)),
        }
    }

    /// Formula as written in exported document titles; a negative `b` is
    /// parenthesised instead of folded into the sign: `y = 2x + (-3)`.
    pub fn title_formula(&self) -> String {
        match *self {
            Self::Origin { .. } | Self::Quadratic { .. } => self.label(),
            Self::Affine { a, b } => {
                if b < 0.0 {
                    format!("y = {}x + ({})", format_number(a), format_number(b))
                } else {
                    format!("y = {}x + {}", format_number(a), format_number(b))
                }
            }
        }
    }
}

impl fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Shortest round-trip decimal form of `value` (`2`, `0.5`, `-0.75`).
///
/// Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_each_family() {
        assert_eq!(FunctionDescriptor::Origin { a: 2.0 }.evaluate(3.0), 6.0);
        assert_eq!(FunctionDescriptor::Affine { a: -1.0, b: 2.0 }.evaluate(3.0), -1.0);
        assert_eq!(FunctionDescriptor::Quadratic { a: 0.5 }.evaluate(-2.0), 2.0);
    }

    #[test]
    fn labels() {
        assert_eq!(FunctionDescriptor::Origin { a: 2.0 }.label(), "y = 2x");
        assert_eq!(
            FunctionDescriptor::Affine { a: -1.0, b: 2.0 }.label(),
            "y = -1x + 2"
        );
        assert_eq!(
            FunctionDescriptor::Affine { a: 2.0, b: -3.0 }.label(),
            "y = 2x - 3"
        );
        assert_eq!(
            FunctionDescriptor::Affine { a: 0.5, b: 0.0 }.label(),
            "y = 0.5x + 0"
        );
        assert_eq!(FunctionDescriptor::Quadratic { a: -0.25 }.label(), "y = -0.25x²");
    }

    #[test]
    fn title_parenthesises_negative_intercept() {
        assert_eq!(
            FunctionDescriptor::Affine { a: 2.0, b: -3.0 }.title_formula(),
            "y = 2x + (-3)"
        );
        assert_eq!(
            FunctionDescriptor::Affine { a: 2.0, b: 3.0 }.title_formula(),
            "y = 2x + 3"
        );
        assert_eq!(
            FunctionDescriptor::Origin { a: 1.5 }.title_formula(),
            "y = 1.5x"
        );
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.75), "-0.75");
    }

    #[test]
    fn family_round_trip() {
        for family in FunctionFamily::ALL {
            let descriptor = match family {
                FunctionFamily::Origin => FunctionDescriptor::Origin { a: 1.0 },
                FunctionFamily::Affine => FunctionDescriptor::Affine { a: 1.0, b: 1.0 },
                FunctionFamily::Quadratic => FunctionDescriptor::Quadratic { a: 1.0 },
            };
            assert_eq!(descriptor.family(), family);
            assert_eq!(descriptor.a(), 1.0);
        }
    }
}

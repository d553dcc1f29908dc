use fnplot::{
    CalculationInput, Domain, Field, FunctionDescriptor, FunctionFamily, LayoutConfig, Point,
    PointSet, ValidationError, layout, parse_number, point::QUADRATIC_SAMPLE_XS,
};
use proptest::prelude::*;

fn coefficient() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

proptest! {
    #[test]
    fn evaluator_matches_formulas(a in coefficient(), b in coefficient(), x in coefficient()) {
        prop_assert_eq!(FunctionDescriptor::Origin { a }.evaluate(x), a * x);
        prop_assert_eq!(FunctionDescriptor::Affine { a, b }.evaluate(x), a * x + b);
        prop_assert_eq!(FunctionDescriptor::Quadratic { a }.evaluate(x), a * x * x);
    }

    #[test]
    fn domain_is_symmetric_and_padded(
        coords in prop::collection::vec((coefficient(), coefficient()), 1..8)
    ) {
        let points: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let domain = Domain::fit(&points, 2.0).unwrap();
        let furthest = coords
            .iter()
            .flat_map(|&(x, y)| [x.abs(), y.abs()])
            .fold(0.0, f64::max);
        prop_assert_eq!(domain.half_extent(), furthest + 2.0);
        prop_assert_eq!(domain.min(), -domain.max());
        for p in &points {
            prop_assert!(domain.contains(p.x) && domain.contains(p.y));
        }
    }

    #[test]
    fn affine_points_sorted(a in coefficient(), b in coefficient(), x1 in coefficient(), x2 in coefficient()) {
        prop_assume!(x1 != x2);
        let f = FunctionDescriptor::Affine { a, b };
        let points = PointSet::affine(&f, x1, x2);
        prop_assert_eq!(points.len(), 2);
        prop_assert!(points.as_slice()[0].x < points.as_slice()[1].x);
    }

    #[test]
    fn quadratic_has_five_fixed_points(a in coefficient()) {
        let f = FunctionDescriptor::Quadratic { a };
        let points = PointSet::quadratic(&f);
        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        prop_assert_eq!(xs, QUADRATIC_SAMPLE_XS.to_vec());
    }

    #[test]
    fn integers_and_fractions_parse(n in -10_000i32..10_000, d in 1i32..1000) {
        prop_assert_eq!(parse_number(&n.to_string()), Ok(f64::from(n)));
        prop_assert_eq!(
            parse_number(&format!("{n}/{d}")),
            Ok(f64::from(n) / f64::from(d))
        );
    }

    #[test]
    fn large_inputs_are_rejected_or_bounded(
        a in -1e12..1e12f64,
        b in -1e12..1e12f64,
        x1 in -1e12..1e12f64,
        x2 in -1e12..1e12f64,
    ) {
        let config = LayoutConfig::default();
        let inputs = [
            CalculationInput::new(FunctionFamily::Origin)
                .with(Field::A, a.to_string())
                .with(Field::X1, x1.to_string()),
            CalculationInput::new(FunctionFamily::Affine)
                .with(Field::A, a.to_string())
                .with(Field::B, b.to_string())
                .with(Field::X1, x1.to_string())
                .with(Field::X2, x2.to_string()),
            CalculationInput::new(FunctionFamily::Quadratic).with(Field::A, a.to_string()),
        ];
        for input in inputs {
            match input.validate_for(&config) {
                Ok(calculation) => {
                    let plan = layout(
                        &calculation.descriptor,
                        calculation.points.as_slice(),
                        &config,
                    )
                    .unwrap();
                    prop_assert!(plan.curve.len() <= config.max_curve_samples);
                }
                Err(err) => prop_assert!(matches!(
                    err,
                    ValidationError::OutOfRange | ValidationError::DuplicateX
                )),
            }
        }
    }

    #[test]
    fn label_stays_inside_window(a in -20.0..20.0f64, b in -20.0..20.0f64, x1 in -20.0..20.0f64) {
        let f = FunctionDescriptor::Affine { a, b };
        let points = PointSet::affine(&f, x1, x1 + 1.0);
        let config = LayoutConfig::default();
        let plan = layout(&f, points.as_slice(), &config).unwrap();
        if let Some(label) = plan.label {
            let (lo, hi) = config.label_window();
            let py = plan.transform.y.data_to_pixel(label.anchor.y);
            prop_assert!((lo..=hi).contains(&py));
            prop_assert!(label.anchor.x < plan.domain.max());
        }
    }
}

#[test]
fn parser_examples() {
    assert_eq!(parse_number("1/2"), Ok(0.5));
    assert_eq!(parse_number("-3/4"), Ok(-0.75));
    assert_eq!(parse_number("2"), Ok(2.0));
    assert!(parse_number("1/0").is_err());
    assert!(parse_number("abc").is_err());
}

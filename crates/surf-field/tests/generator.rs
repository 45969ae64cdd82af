// Integration tests: surface and curve generation end to end

use std::f64::consts::{PI, TAU};

use approx::assert_relative_eq;
use ndarray::arr1;
use rstest::rstest;
use surf_core::SamplingConfig;
use surf_expr::{evaluate, EvalError};
use surf_field::{
    generate_curve, generate_surface, generate_surface_with, CoordinateMode, EquationSlot,
    FieldError, ParameterGrid,
};

const UNIT: (f64, f64) = (0.0, 1.0);

#[test]
fn unit_sphere_from_polar_surface() {
    let triple = generate_surface("1", "u", "v", (0.0, TAU), (0.0, PI), CoordinateMode::Polar).unwrap();
    assert_eq!(triple.shape(), &[100, 100]);
    for p in triple.points() {
        assert_relative_eq!(p.length_squared(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn direct_mode_passes_grid_through() {
    let triple = generate_surface("u", "v", "0", UNIT, UNIT, CoordinateMode::Direct).unwrap();
    let grid = ParameterGrid::surface(UNIT, UNIT, 100, 100).unwrap();
    let ParameterGrid::Surface { u, v } = grid else {
        panic!("expected surface grid");
    };

    assert_eq!(triple.x, u);
    assert_eq!(triple.y, v);
    assert!(triple.z.iter().all(|&z| z == 0.0));
    assert_eq!(triple.x[[0, 99]], 1.0);
    assert_eq!(triple.y[[99, 0]], 1.0);
}

#[rstest]
#[case(CoordinateMode::Direct, (0.0, 1.0), (0.0, 2.0))]
#[case(CoordinateMode::Polar, (0.0, TAU), (0.0, PI))]
#[case(CoordinateMode::Direct, (3.0, 3.0), (-1.0, 1.0))]
fn surface_shape_invariant(
    #[case] mode: CoordinateMode,
    #[case] u_range: (f64, f64),
    #[case] v_range: (f64, f64),
) {
    let config = SamplingConfig::new(17, 9, 2);
    let triple = generate_surface_with("u * v", "sin(u)", "3", u_range, v_range, mode, &config).unwrap();
    for component in [&triple.x, &triple.y, &triple.z] {
        assert_eq!(component.shape(), &[9, 17]);
    }
}

#[test]
fn curve_shape_invariant() {
    let triple = generate_curve("t", "2 * t", "1", (0.0, 5.0)).unwrap();
    for component in [&triple.x, &triple.y, &triple.z] {
        assert_eq!(component.shape(), &[1000]);
    }
}

#[test]
fn repeated_calls_are_bit_identical() {
    let run = || {
        generate_surface(
            "-(4 - 2 * cos(u)) * cos(v) + 6 * (sin(u) + 1) * cos(u)",
            "16 * sin(u)",
            "(4 - 2 * cos(u)) * sin(v)",
            (0.0, TAU),
            (0.0, TAU),
            CoordinateMode::Direct,
        )
        .unwrap()
    };
    let (a, b) = (run(), run());
    for (left, right) in [(&a.x, &b.x), (&a.y, &b.y), (&a.z, &b.z)] {
        assert!(left.iter().zip(right.iter()).all(|(l, r)| l.to_bits() == r.to_bits()));
    }
}

#[test]
fn division_by_zero_is_a_value() {
    let triple = generate_surface("u", "1/0", "v", UNIT, UNIT, CoordinateMode::Direct).unwrap();
    assert!(triple.y.iter().all(|&y| y == f64::INFINITY));

    let triple = generate_surface("u", "1/u", "v", UNIT, UNIT, CoordinateMode::Direct).unwrap();
    for row in 0..100 {
        assert_eq!(triple.y[[row, 0]], f64::INFINITY);
        assert!(triple.y[[row, 1]].is_finite());
    }
    assert_eq!(triple.domain_report().non_finite, [0, 100, 0]);
}

#[test]
fn unknown_name_fails_with_slot() {
    let err = generate_surface("u", "undefined_name", "v", UNIT, UNIT, CoordinateMode::Direct).unwrap_err();
    assert_eq!(err.slot(), Some(EquationSlot::Y));
    assert_eq!(
        err.eval_error(),
        Some(&EvalError::UnknownIdentifier("undefined_name".into()))
    );
    assert_eq!(err.to_string(), "Y equation: Unknown identifier 'undefined_name'");
}

#[test]
fn polar_failures_name_greek_slots() {
    let err = generate_curve("1", "t", "phi", (0.0, 1.0)).unwrap_err();
    assert_eq!(err.slot(), Some(EquationSlot::Phi));
    assert!(err.to_string().starts_with("φ equation"), "{err}");

    let err = generate_surface("1", "u.real", "v", UNIT, UNIT, CoordinateMode::Polar).unwrap_err();
    assert_eq!(err.slot(), Some(EquationSlot::Theta));
    assert!(err.eval_error().is_some_and(EvalError::is_syntax));
}

#[test]
fn surface_variables_are_unbound_in_curves() {
    let err = generate_curve("u", "t", "t", (0.0, 1.0)).unwrap_err();
    assert_eq!(err.eval_error(), Some(&EvalError::UnknownIdentifier("u".into())));
}

#[test]
fn incompatible_shapes_fail() {
    let grid = ParameterGrid::surface(UNIT, UNIT, 4, 3).unwrap();
    let ns = grid.namespace().with("w", arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]).into_dyn());
    let err = evaluate("u * (w + 1)", &ns).unwrap_err();
    assert!(matches!(err, EvalError::ShapeMismatch { .. }), "{err:?}");
}

#[test]
fn failed_call_leaves_engine_usable() {
    assert!(generate_curve("1 +", "t", "t", (0.0, 1.0)).is_err());
    assert!(generate_curve("1", "t", "t", (0.0, 1.0)).is_ok());
}

#[test]
fn inverted_range_is_rejected() {
    let err = generate_surface("u", "v", "0", (1.0, 0.0), UNIT, CoordinateMode::Direct).unwrap_err();
    assert!(matches!(err, FieldError::InvalidRange { parameter: "u", .. }));
}

#[test]
fn independent_calls_in_parallel() {
    let handles: Vec<_> = (1..=4)
        .map(|k| {
            std::thread::spawn(move || {
                generate_curve(&k.to_string(), "t", "pi / 2", (0.0, TAU)).unwrap()
            })
        })
        .collect();
    for (k, handle) in (1..=4).zip(handles) {
        let triple = handle.join().unwrap();
        let p = triple.points()[0];
        assert_relative_eq!(p.x, k as f64, epsilon = 1e-12);
    }
}

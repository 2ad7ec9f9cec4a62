//! Convergence tests for Richardson extrapolation.
//!
//! Gains are measured in `f64`; in `f32` rounding overtakes truncation error
//! after the second column and further columns stop helping.

use approx::assert_abs_diff_eq;
use simdode::ode::{
    richardson, stepper, ExtrapolationSchedule, Gill, Nystrom, Richardson, Rk4, StepFormula,
    MAX_COLUMNS,
};
use simdode::simd::{F32x8, F64x4, F64x8, SimdLanes};
use simdode::OdeError;

fn growth(_x: F64x4, y: F64x4) -> F64x4 {
    y
}

fn gaussian(x: F64x4, y: F64x4) -> F64x4 {
    F64x4::splat(-2.0) * x * y
}

fn logistic(_x: F64x4, y: F64x4) -> F64x4 {
    F64x4::splat(1.5) * y * (F64x4::splat(1.0) - y / F64x4::splat(10.0))
}

fn logistic_exact(x: f64) -> f64 {
    10.0 / (1.0 + 19.0 * (-1.5 * x).exp())
}

fn gaussian_errors<S: StepFormula>(max_columns: usize) -> Vec<f64> {
    let exact = (-1.0f64).exp();
    (1..=max_columns)
        .map(|columns| {
            let y = richardson::<S, _, _>(&gaussian, F64x4::splat(1.0), F64x4::splat(0.0), 0.1, 10, columns);
            (y.to_vec()[0] - exact).abs()
        })
        .collect()
}

#[test]
fn test_three_columns_reach_e() {
    let e = std::f64::consts::E;

    let y = richardson::<Rk4, _, _>(&growth, F64x4::splat(1.0), F64x4::splat(0.0), 0.1, 10, 3);
    for value in y.to_vec() {
        assert_abs_diff_eq!(value, e, epsilon = 1e-8);
    }

    let y = richardson::<Rk4, _, _>(
        &|_x: F64x8, y: F64x8| y,
        F64x8::splat(1.0),
        F64x8::splat(0.0),
        0.1,
        10,
        3,
    );
    for value in y.to_vec() {
        assert_abs_diff_eq!(value, e, epsilon = 1e-8);
    }
}

#[test]
fn test_single_precision_second_column() {
    let y = richardson::<Rk4, _, _>(&|_x: F32x8, y: F32x8| y, F32x8::splat(1.0), F32x8::splat(0.0), 0.1, 10, 2);
    for value in y.to_vec() {
        assert_abs_diff_eq!(value, std::f32::consts::E, epsilon = 1e-5);
    }
}

#[test]
fn test_error_shrinks_with_every_column() {
    for (name, errors) in [
        ("rk4", gaussian_errors::<Rk4>(4)),
        ("gill", gaussian_errors::<Gill>(4)),
    ] {
        println!("{name}: {errors:?}");
        for pair in errors.windows(2) {
            assert!(pair[1] < pair[0], "{name}: {errors:?}");
        }
    }
}

#[test]
fn test_first_column_gain_matches_order() {
    // removing the h^p term of a p-th order formula should gain well over 2^p
    let rk4 = gaussian_errors::<Rk4>(2);
    let nystrom = gaussian_errors::<Nystrom>(2);

    assert!(rk4[0] / rk4[1] > 2f64.powi(Rk4::ORDER as i32));
    assert!(nystrom[0] / nystrom[1] > 2f64.powi(Nystrom::ORDER as i32));
}

#[test]
fn test_single_column_equals_stepper() {
    let y0 = F64x4::from_slice(&[0.5, 1.0, 1.5, 2.0]);
    let x0 = F64x4::from_slice(&[0.0, 0.1, 0.2, 0.3]);

    let plain = stepper::<Gill, _, _>(&gaussian, y0, x0, 0.05, 7);
    let extrapolated = richardson::<Gill, _, _>(&gaussian, y0, x0, 0.05, 7, 1);

    assert_eq!(plain.to_vec(), extrapolated.to_vec());
}

#[test]
fn test_builder_stops_on_tolerance() -> Result<(), OdeError> {
    let extrapolator = Richardson::<Nystrom>::new(8)?.with_tolerance(1e-9)?;
    let report = extrapolator.extrapolate(&logistic, F64x4::splat(0.5), F64x4::splat(0.0), 0.2, 10);

    println!(
        "columns used {}, correction {:?}",
        report.columns_used, report.correction
    );
    assert!(report.converged);
    assert!(report.columns_used < 8);
    assert!(report.correction.abs().all_le(1e-9));
    for value in report.value.to_vec() {
        assert_abs_diff_eq!(value, logistic_exact(2.0), epsilon = 1e-9);
    }
    assert!(report.checked().is_valid());
    Ok(())
}

#[test]
fn test_builder_without_tolerance_matches_free_function() -> Result<(), OdeError> {
    let extrapolator =
        Richardson::<Rk4>::new(4)?.with_schedule(ExtrapolationSchedule::Successive);
    let report = extrapolator.extrapolate(&logistic, F64x4::splat(0.5), F64x4::splat(0.0), 0.2, 10);
    assert_eq!(report.columns_used, 4);
    assert!(!report.converged);

    let geometric = Richardson::<Rk4>::new(4)?.extrapolate(&logistic, F64x4::splat(0.5), F64x4::splat(0.0), 0.2, 10);
    let free = richardson::<Rk4, _, _>(&logistic, F64x4::splat(0.5), F64x4::splat(0.0), 0.2, 10, 4);
    assert_eq!(geometric.value.to_vec(), free.to_vec());
    Ok(())
}

#[test]
fn test_invalid_settings_are_rejected() {
    assert!(matches!(
        Richardson::<Rk4>::new(0),
        Err(OdeError::ConfigError { parameter: "columns", .. })
    ));
    assert!(matches!(
        Richardson::<Rk4>::new(MAX_COLUMNS + 1),
        Err(OdeError::ConfigError { parameter: "columns", .. })
    ));

    let extrapolator = Richardson::<Gill>::new(3).unwrap();
    assert!(matches!(
        extrapolator.with_tolerance(-1.0),
        Err(OdeError::ConfigError { parameter: "tolerance", .. })
    ));
    assert!(extrapolator.with_tolerance(f64::NAN).is_err());
}

#[test]
fn test_nan_lane_stays_in_its_lane() {
    let y0 = F64x4::from_slice(&[1.0, f64::NAN, 1.0, 1.0]);
    let report = Richardson::<Rk4>::new(3)
        .unwrap()
        .extrapolate(&growth, y0, F64x4::splat(0.0), 0.1, 10);

    let checked = report.checked();
    assert_eq!(checked.invalid_lanes(), vec![1]);

    let values = report.value.to_vec();
    for lane in [0, 2, 3] {
        assert_abs_diff_eq!(values[lane], std::f64::consts::E, epsilon = 1e-8);
    }
}

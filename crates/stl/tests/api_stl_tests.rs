//! Tests for the public STL API.
//!
//! These tests verify the decomposition end to end:
//! - Parameter resolution and validation
//! - Additivity of the components
//! - Recovery of known seasonal and trend signals
//! - Missing values, robust mode and the iteration safety cap
//!
//! ## Test Organization
//!
//! 1. **Builder** - Defaults and validation
//! 2. **Data Errors** - Series rejected before smoothing
//! 3. **Decomposition** - Component behaviour
//! 4. **Robustness** - Outliers, convergence and the safety cap
//! 5. **Output** - Matrix, reconstruction and display

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use stl::prelude::*;

const TAU: f64 = 2.0 * std::f64::consts::PI;

fn seasonal_trend(n: usize, period: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let seasonal: Vec<f64> = (0..n)
        .map(|i| (TAU * i as f64 / period as f64).sin())
        .collect();
    let trend: Vec<f64> = (0..n).map(|i| 10.0 + 0.05 * i as f64).collect();
    let values = seasonal.iter().zip(&trend).map(|(s, t)| s + t).collect();
    (values, seasonal, trend)
}

fn noisy(values: &[f64], sd: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sd).unwrap();
    values.iter().map(|v| v + normal.sample(&mut rng)).collect()
}

fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
    let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
    cov / (va * vb).sqrt()
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test default parameter resolution.
#[test]
fn test_builder_defaults() {
    let decomposer = Stl::<f64>::new().period(12).build().unwrap();
    let config = decomposer.config();
    assert_eq!(config.low_pass_bandwidth, 13);
    assert_eq!(config.seasonal_bandwidth, 7);
    assert_eq!(config.trend_bandwidth, 23);
    assert_eq!(config.inner_iterations, 2);
    assert_eq!(config.outer_iterations, 0);
    assert_eq!(config.post_smoothing_bandwidth, 7);
    assert_eq!(config.max_outer_iterations, 100);
    assert_relative_eq!(config.convergence_threshold, 0.01);
    assert!(!config.robust);
}

/// Test robust-mode defaults.
#[test]
fn test_builder_robust_defaults() {
    let decomposer = Stl::<f64>::new().period(7).robust(true).build().unwrap();
    let config = decomposer.config();
    assert_eq!(config.low_pass_bandwidth, 7);
    assert_eq!(config.inner_iterations, 1);
    assert_eq!(config.outer_iterations, 15);
    assert!(config.robust);
}

/// Test that explicit settings override defaults.
#[test]
fn test_builder_overrides() {
    let decomposer = Stl::<f64>::new()
        .period(4)
        .seasonal_bandwidth(9)
        .trend_bandwidth(11)
        .low_pass_bandwidth(6)
        .inner_iterations(3)
        .outer_iterations(2)
        .post_smoothing(true)
        .post_smoothing_bandwidth(5)
        .convergence_threshold(0.001)
        .build()
        .unwrap();
    let config = decomposer.config();
    assert_eq!(config.seasonal_bandwidth, 9);
    assert_eq!(config.trend_bandwidth, 11);
    assert_eq!(config.low_pass_bandwidth, 6);
    assert_eq!(config.inner_iterations, 3);
    assert_eq!(config.outer_iterations, 2);
    assert!(config.post_smoothing);
    assert_eq!(config.post_smoothing_bandwidth, 5);
}

/// Test build-time validation.
#[test]
fn test_builder_validation() {
    assert!(matches!(
        Stl::<f64>::new().build(),
        Err(StlError::InvalidInput(_))
    ));
    assert_eq!(
        Stl::<f64>::new().period(1).build().unwrap_err(),
        StlError::InvalidPeriod(1)
    );
    assert_eq!(
        Stl::<f64>::new().period(12).seasonal_bandwidth(5).build().unwrap_err(),
        StlError::InvalidSeasonalBandwidth(5)
    );
    assert_eq!(
        Stl::<f64>::new().period(12).seasonal_bandwidth(8).build().unwrap_err(),
        StlError::InvalidSeasonalBandwidth(8)
    );
    assert_eq!(
        Stl::<f64>::new().period(12).inner_iterations(0).build().unwrap_err(),
        StlError::InvalidIterations(0)
    );
    assert_eq!(
        Stl::<f64>::new().period(12).outer_iterations(1001).build().unwrap_err(),
        StlError::InvalidIterations(1001)
    );
    assert!(Stl::<f64>::new().period(12).outer_iterations(1000).build().is_ok());
    assert_eq!(
        Stl::<f64>::new().period(12).trend_bandwidth(0).build().unwrap_err(),
        StlError::InvalidBandwidth(0)
    );
    assert_eq!(
        Stl::<f64>::new().period(12).convergence_threshold(-1.0).build().unwrap_err(),
        StlError::InvalidThreshold(-1.0)
    );
    assert_eq!(
        Stl::<f64>::new().period(3).period(4).build().unwrap_err(),
        StlError::DuplicateParameter { parameter: "period" }
    );
}

// ============================================================================
// Data Error Tests
// ============================================================================

/// Test series rejected before smoothing.
#[test]
fn test_fit_data_errors() {
    let decomposer = Stl::<f64>::new().period(12).build().unwrap();

    assert_eq!(
        decomposer.fit(&Vec::<f64>::new()).unwrap_err(),
        StlError::EmptyInput
    );
    assert_eq!(
        decomposer.fit(&vec![1.0; 8]).unwrap_err(),
        StlError::EmptySubseries { phase: 8 }
    );
    assert_eq!(
        decomposer.fit(&vec![None::<f64>; 30]).unwrap_err(),
        StlError::AllMissing
    );
    assert!(matches!(
        decomposer.fit(&vec![f64::NEG_INFINITY; 30]),
        Err(StlError::InvalidNumericValue(_))
    ));
}

/// Test that a phase with no observations is rejected.
#[test]
fn test_fit_empty_subseries() {
    let values: Vec<Option<f64>> = (0..12)
        .map(|i| if i % 3 == 1 { None } else { Some(i as f64) })
        .collect();
    let err = Stl::<f64>::new().period(3).build().unwrap().fit(&values).unwrap_err();
    assert_eq!(err, StlError::EmptySubseries { phase: 1 });
}

// ============================================================================
// Decomposition Tests
// ============================================================================

/// Test lengths and finiteness on a plain series.
#[test]
fn test_decompose_shapes() {
    let values: Vec<f64> = (0..100).map(|i| ((i * 7) % 11) as f64).collect();
    let result = Stl::<f64>::new().period(3).build().unwrap().fit(&values).unwrap();

    assert_eq!(result.len(), 100);
    assert_eq!(result.period, 3);
    assert_eq!(result.trend.len(), 100);
    assert_eq!(result.remainder.len(), 100);
    assert!(result.seasonal.iter().all(|v| v.is_finite()));
    assert!(result.trend.iter().all(|v| v.is_finite()));
    assert!(result.remainder.iter().all(|r| r.is_some_and(f64::is_finite)));
    assert!(result.diagnostics.is_none());
}

/// Test that the components add back up to the data.
#[test]
fn test_decompose_additive() {
    let (values, _, _) = seasonal_trend(72, 12);
    let values = noisy(&values, 0.2, 7);
    let result = Stl::<f64>::new().period(12).build().unwrap().fit(&values).unwrap();

    for (i, r) in result.reconstruct().iter().enumerate() {
        assert_relative_eq!(r.unwrap(), values[i], epsilon = 1e-9);
    }
}

/// Test recovery of a sine seasonal component.
#[test]
fn test_decompose_recovers_sine() {
    let (values, seasonal, trend) = seasonal_trend(120, 12);
    let values = noisy(&values, 0.1, 42);
    let result = Stl::<f64>::new().period(12).build().unwrap().fit(&values).unwrap();

    assert!(correlation(&result.seasonal, &seasonal) > 0.95);
    let max_trend_error = result
        .trend
        .iter()
        .zip(&trend)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    assert!(max_trend_error < 0.5, "trend error {max_trend_error}");
}

/// Test that the seasonal component repeats with the true period.
#[test]
fn test_decompose_seasonal_period() {
    let (values, _, _) = seasonal_trend(100, 10);
    let values = noisy(&values, 0.2, 21);
    let result = Stl::<f64>::new().period(10).build().unwrap().fit(&values).unwrap();
    let s = &result.seasonal;

    let peak = (2..15)
        .max_by(|&a, &b| {
            correlation(&s[a..], &s[..s.len() - a])
                .total_cmp(&correlation(&s[b..], &s[..s.len() - b]))
        })
        .unwrap();
    assert_eq!(peak, 10);

    let mean = s.iter().sum::<f64>() / s.len() as f64;
    assert!(mean.abs() < 0.05, "seasonal mean {mean}");
}

/// Test that convergence ratios shrink over the inner iterations.
#[test]
fn test_convergence_ratios_shrink() {
    let (values, _, _) = seasonal_trend(96, 12);
    let result = Stl::<f64>::new()
        .period(12)
        .inner_iterations(8)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    let second = result.history[1.min(result.history.len() - 1)];
    let last = result.history[result.history.len() - 1];
    assert!(last.seasonal_ratio <= second.seasonal_ratio);
    assert!(last.trend_ratio <= second.trend_ratio);
}

/// Test series shorter than two periods.
#[test]
fn test_decompose_short_series() {
    for n in [10, 15, 19] {
        let values: Vec<f64> = (0..n).map(|i| (i % 10) as f64 + 0.1 * i as f64).collect();
        let result = Stl::<f64>::new().period(10).build().unwrap().fit(&values).unwrap();

        assert_eq!(result.to_matrix().len(), n);
        assert!(result.seasonal.iter().all(|v| v.is_finite()));
        assert!(result.trend.iter().all(|v| v.is_finite()));
        for (i, r) in result.reconstruct().iter().enumerate() {
            assert_relative_eq!(r.unwrap(), values[i], epsilon = 1e-9);
        }
    }
}

/// Test that a pure line has no seasonal component.
#[test]
fn test_decompose_pure_trend() {
    let values: Vec<f64> = (0..40).map(|i| 0.5 * i as f64).collect();
    let result = Stl::<f64>::new().period(4).build().unwrap().fit(&values).unwrap();

    for (i, (&s, &t)) in result.seasonal.iter().zip(&result.trend).enumerate() {
        assert!(s.abs() < 1e-8, "seasonal[{i}] = {s}");
        assert_relative_eq!(t, values[i], epsilon = 1e-8);
    }
}

/// Test decomposition with missing values.
#[test]
fn test_decompose_missing_values() {
    let (values, _, _) = seasonal_trend(60, 6);
    let mut gappy: Vec<Option<f64>> = values.iter().map(|&v| Some(v)).collect();
    for &i in &[3, 17, 18, 41] {
        gappy[i] = None;
    }
    let result = Stl::<f64>::new().period(6).build().unwrap().fit(&gappy).unwrap();

    for i in 0..60 {
        assert!(result.seasonal[i].is_finite());
        assert!(result.trend[i].is_finite());
        assert_eq!(result.remainder[i].is_none(), gappy[i].is_none());
    }
    // Missing positions are still estimated close to the underlying signal
    assert_relative_eq!(result.seasonal[17] + result.trend[17], values[17], epsilon = 0.2);
}

/// Test that `NaN` and `None` are equivalent.
#[test]
fn test_decompose_nan_equals_none() {
    let (values, _, _) = seasonal_trend(36, 4);
    let mut with_nan = values.clone();
    with_nan[10] = f64::NAN;
    let mut with_none: Vec<Option<f64>> = values.iter().map(|&v| Some(v)).collect();
    with_none[10] = None;

    let decomposer = Stl::<f64>::new().period(4).build().unwrap();
    assert_eq!(
        decomposer.fit(&with_nan).unwrap(),
        decomposer.fit(&with_none).unwrap()
    );
}

/// Test that verbose logging does not change the result.
#[test]
fn test_decompose_verbose_is_observational() {
    let (values, _, _) = seasonal_trend(48, 6);
    let quiet = Stl::<f64>::new().period(6).build().unwrap().fit(&values).unwrap();
    let loud = Stl::<f64>::new().period(6).verbose(true).build().unwrap().fit(&values).unwrap();
    assert_eq!(quiet, loud);
}

/// Test post-smoothing keeps the decomposition additive.
#[test]
fn test_decompose_post_smoothing() {
    let (values, _, _) = seasonal_trend(48, 12);
    let values = noisy(&values, 0.3, 3);
    let result = Stl::<f64>::new()
        .period(12)
        .post_smoothing(true)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    assert!(result.seasonal.iter().all(|v| v.is_finite()));
    for (i, r) in result.reconstruct().iter().enumerate() {
        assert_relative_eq!(r.unwrap(), values[i], epsilon = 1e-9);
    }
}

/// Test single-precision input.
#[test]
fn test_decompose_f32() {
    let values: Vec<f32> = (0..48)
        .map(|i| (i % 4) as f32 + 0.1 * i as f32)
        .collect();
    let result = Stl::<f32>::new().period(4).build().unwrap().fit(&values).unwrap();
    assert!(result.seasonal.iter().all(|v| v.is_finite()));
    assert!(result.trend.iter().all(|v| v.is_finite()));
}

// ============================================================================
// Robustness Tests
// ============================================================================

/// Test non-robust iteration bookkeeping.
#[test]
fn test_iterations_non_robust() {
    let (values, _, _) = seasonal_trend(60, 6);
    let result = Stl::<f64>::new().period(6).build().unwrap().fit(&values).unwrap();

    assert!(result.outer_iterations <= 1);
    assert!(!result.history.is_empty() && result.history.len() <= 2);
    assert!(result.robustness_weights.iter().all(|&w| w == 1.0));
    assert!(result.history[0].seasonal_ratio.is_infinite());
}

/// Test convergence with enough inner iterations.
#[test]
fn test_iterations_converge() {
    let (values, _, _) = seasonal_trend(96, 12);
    let result = Stl::<f64>::new()
        .period(12)
        .inner_iterations(50)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    assert!(result.converged());
    assert!(result.warnings.is_empty());
    let last = result.history.last().unwrap();
    assert!(last.seasonal_ratio < 0.01);
    assert!(last.trend_ratio < 0.01);
    assert!(result.history.len() < 50);
}

/// Test that a single inner iteration cannot converge.
#[test]
fn test_iterations_non_convergence_warning() {
    let (values, _, _) = seasonal_trend(48, 6);
    let result = Stl::<f64>::new()
        .period(6)
        .inner_iterations(1)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    assert!(!result.converged());
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0],
        StlWarning::NonConvergence { .. }
    ));
}

/// Test that robust mode downweights an outlier and protects the trend.
#[test]
fn test_robust_outlier() {
    let (clean, _, trend) = seasonal_trend(96, 12);
    let mut values = noisy(&clean, 0.1, 11);
    values[50] += 30.0;

    let plain = Stl::<f64>::new().period(12).build().unwrap().fit(&values).unwrap();
    let robust = Stl::<f64>::new()
        .period(12)
        .robust(true)
        .convergence_threshold(1e-12)
        .max_outer_iterations(20)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    assert!(robust.robustness_weights[50] < 0.1);
    assert!(robust.robustness_weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
    assert!((robust.trend[50] - trend[50]).abs() < (plain.trend[50] - trend[50]).abs());
}

/// Test the safety cap on robust outer iterations.
#[test]
fn test_robust_safety_cap() {
    let (values, _, _) = seasonal_trend(48, 6);
    let values = noisy(&values, 0.5, 5);
    let result = Stl::<f64>::new()
        .period(6)
        .robust(true)
        .outer_iterations(2)
        .max_outer_iterations(5)
        .convergence_threshold(1e-300)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    assert!(result.outer_iterations <= 5);
    if !result.converged() {
        assert_eq!(result.outer_iterations, 5);
        assert!(!result.warnings.is_empty());
    }
}

/// Test that the safety cap also bounds the reweighting passes.
#[test]
fn test_robust_safety_cap_below_outer_iterations() {
    let (values, _, _) = seasonal_trend(48, 6);
    let values = noisy(&values, 0.5, 8);
    let decomposer = Stl::<f64>::new()
        .period(6)
        .robust(true)
        .max_outer_iterations(4)
        .convergence_threshold(1e-300)
        .build()
        .unwrap();
    assert_eq!(decomposer.config().outer_iterations, 15);

    let result = decomposer.fit(&values).unwrap();
    assert!(result.outer_iterations <= 4);
    if !result.converged() {
        assert_eq!(result.outer_iterations, 4);
        assert_eq!(result.warnings.len(), 1);
    }
}

// ============================================================================
// Output Tests
// ============================================================================

/// Test diagnostics are attached on request.
#[test]
fn test_diagnostics() {
    let (values, _, _) = seasonal_trend(72, 12);
    let values = noisy(&values, 0.1, 9);
    let result = Stl::<f64>::new()
        .period(12)
        .return_diagnostics()
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();

    let diag = result.diagnostics.expect("diagnostics requested");
    assert!(diag.seasonal_strength > 0.8);
    assert!(diag.trend_strength > 0.8);
    assert!(diag.remainder_std >= 0.0);
}

/// Test the matrix view and display with missing values.
#[test]
fn test_matrix_and_display() {
    let (values, _, _) = seasonal_trend(30, 5);
    let mut gappy: Vec<Option<f64>> = values.iter().map(|&v| Some(v)).collect();
    gappy[2] = None;
    let result = Stl::<f64>::new().period(5).build().unwrap().fit(&gappy).unwrap();

    let matrix = result.to_matrix();
    assert_eq!(matrix.len(), 30);
    assert!(matrix[2][2].is_nan());
    assert_eq!(matrix[3][0], result.seasonal[3]);
    assert!(result.reconstruct()[2].is_none());

    let text = format!("{}", result);
    assert!(text.contains("Summary:"));
    assert!(text.contains("Period:      5"));
    assert!(text.contains("NA"));
    assert!(text.contains("..."));
}

/// Test the functional form matches the builder.
#[test]
fn test_functional_matches_builder() {
    let (values, _, _) = seasonal_trend(48, 4);
    let options = StlOptions {
        robust: true,
        seasonal_bandwidth: 9,
        ..StlOptions::default()
    };
    let functional = stl(&values, 4, &options).unwrap();
    let built = Stl::<f64>::new()
        .period(4)
        .robust(true)
        .seasonal_bandwidth(9)
        .build()
        .unwrap()
        .fit(&values)
        .unwrap();
    assert_eq!(functional, built);
}

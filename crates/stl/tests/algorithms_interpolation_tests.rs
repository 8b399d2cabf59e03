#![cfg(feature = "dev")]
//! Tests for piecewise-polynomial interpolation.
//!
//! These tests verify the interpolant behind every loess model:
//! - Construction checks on the knot table
//! - Exact reproduction at knots
//! - Local Lagrange interpolation and polynomial extrapolation
//!
//! ## Test Organization
//!
//! 1. **Construction** - Validation and order capping
//! 2. **Evaluation** - Orders 0, 1 and 2
//! 3. **Extrapolation** - Queries outside the knot range

use approx::assert_relative_eq;

use stl::internals::algorithms::interpolation::{Interpolation, PiecewisePolynomial};
use stl::internals::primitives::errors::StlError;

// ============================================================================
// Construction Tests
// ============================================================================

/// Test construction errors.
#[test]
fn test_new_rejects_bad_tables() {
    assert_eq!(
        PiecewisePolynomial::<f64>::new(vec![], vec![], 1),
        Err(StlError::EmptyInput)
    );
    assert_eq!(
        PiecewisePolynomial::new(vec![0.0, 1.0], vec![1.0], 1),
        Err(StlError::MismatchedInputs { x_len: 2, y_len: 1 })
    );
    assert_eq!(
        PiecewisePolynomial::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0], 1),
        Err(StlError::NotStrictlyIncreasing { index: 2 })
    );
}

/// Test that the order is capped by the number of knots.
#[test]
fn test_order_capped() {
    let p = PiecewisePolynomial::new(vec![0.0, 1.0], vec![1.0, 3.0], 2).unwrap();
    assert_eq!(p.order(), 1);

    let single = PiecewisePolynomial::new(vec![2.0], vec![7.0], 1).unwrap();
    assert_eq!(single.order(), 0);
    assert_eq!(single.evaluate(-100.0), 7.0);
    assert_eq!(single.evaluate(100.0), 7.0);
}

// ============================================================================
// Evaluation Tests
// ============================================================================

/// Test that knots are reproduced bit-for-bit.
#[test]
fn test_exact_at_knots() {
    let knots = vec![0.0, 0.3, 1.1, 2.0, 2.7];
    let values = vec![0.123, -4.5, 3.3333, 1e-7, 42.0];
    for order in 0..=2 {
        let p = PiecewisePolynomial::new(knots.clone(), values.clone(), order).unwrap();
        for (k, v) in knots.iter().zip(values.iter()) {
            assert_eq!(p.evaluate(*k), *v);
        }
    }
}

/// Test linear interpolation between knots.
#[test]
fn test_linear_interpolation() {
    let p = PiecewisePolynomial::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0], 1).unwrap();
    assert_relative_eq!(p.evaluate(0.5), 1.0, epsilon = 1e-12);
    assert_relative_eq!(p.evaluate(1.5), 3.0, epsilon = 1e-12);
}

/// Test that piecewise-linear interpolation follows each segment.
#[test]
fn test_linear_kinked() {
    let p = PiecewisePolynomial::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0], 1).unwrap();
    assert_relative_eq!(p.evaluate(0.25), 0.25, epsilon = 1e-12);
    assert_relative_eq!(p.evaluate(1.75), 0.25, epsilon = 1e-12);
}

/// Test quadratic interpolation reproduces a parabola.
#[test]
fn test_quadratic_interpolation() {
    let knots: Vec<f64> = (0..5).map(|i| i as f64).collect();
    let values: Vec<f64> = knots.iter().map(|k| k * k).collect();
    let p = PiecewisePolynomial::new(knots, values, 2).unwrap();
    for &x in &[0.5, 1.5, 2.25, 3.9] {
        assert_relative_eq!(p.evaluate(x), x * x, epsilon = 1e-10);
    }
}

/// Test order-zero lookup.
#[test]
fn test_constant_interpolation() {
    let p = PiecewisePolynomial::new(vec![0.0, 1.0, 2.0], vec![5.0, 6.0, 7.0], 0).unwrap();
    assert_eq!(p.evaluate(0.5), 6.0);
    assert_eq!(p.evaluate(-1.0), 5.0);
    assert_eq!(p.evaluate(10.0), 7.0);
}

// ============================================================================
// Extrapolation Tests
// ============================================================================

/// Test linear extrapolation uses the boundary segment.
#[test]
fn test_linear_extrapolation() {
    let p = PiecewisePolynomial::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0], 1).unwrap();
    assert_relative_eq!(p.evaluate(3.0), 6.0, epsilon = 1e-12);
    assert_relative_eq!(p.evaluate(-1.0), -2.0, epsilon = 1e-12);
}

/// Test quadratic extrapolation stays on the parabola.
#[test]
fn test_quadratic_extrapolation() {
    let knots: Vec<f64> = (0..4).map(|i| i as f64).collect();
    let values: Vec<f64> = knots.iter().map(|k| k * k).collect();
    let p = PiecewisePolynomial::new(knots, values, 2).unwrap();
    assert_relative_eq!(p.evaluate(5.0), 25.0, epsilon = 1e-9);
    assert_relative_eq!(p.evaluate(-2.0), 4.0, epsilon = 1e-9);
}

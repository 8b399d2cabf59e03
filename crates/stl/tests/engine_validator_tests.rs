#![cfg(feature = "dev")]
//! Tests for input and parameter validation.
//!
//! ## Test Organization
//!
//! 1. **Data** - Support, lengths, missing values, weights
//! 2. **Loess Parameters** - Degree, bandwidth, exact knots
//! 3. **STL Parameters** - Period, seasonal bandwidth, iterations, threshold

use stl::internals::engine::validator::Validator;
use stl::internals::primitives::errors::StlError;

// ============================================================================
// Data Tests
// ============================================================================

/// Test support validation.
#[test]
fn test_validate_support() {
    assert!(Validator::validate_support(&[0.0, 1.0, 2.5]).is_ok());
    assert_eq!(
        Validator::validate_support::<f64>(&[]),
        Err(StlError::EmptyInput)
    );
    assert_eq!(
        Validator::validate_support(&[0.0, 1.0, 1.0]),
        Err(StlError::NotStrictlyIncreasing { index: 2 })
    );
    assert!(matches!(
        Validator::validate_support(&[0.0, f64::INFINITY]),
        Err(StlError::InvalidNumericValue(_))
    ));
}

/// Test presence validation.
#[test]
fn test_validate_any_present() {
    assert!(Validator::validate_any_present(&[None, Some(1.0)]).is_ok());
    assert_eq!(
        Validator::validate_any_present::<f64>(&[]),
        Err(StlError::EmptyInput)
    );
    assert_eq!(
        Validator::validate_any_present::<f64>(&[None, None]),
        Err(StlError::AllMissing)
    );
}

/// Test reliability weight validation.
#[test]
fn test_validate_weights() {
    assert!(Validator::validate_weights(&[0.0, 1.0, 2.0], 3).is_ok());
    assert_eq!(
        Validator::validate_weights(&[1.0], 2),
        Err(StlError::MismatchedWeights { expected: 2, got: 1 })
    );
    assert!(matches!(
        Validator::validate_weights(&[1.0, -0.1], 2),
        Err(StlError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        Validator::validate_weights(&[f64::NAN], 1),
        Err(StlError::InvalidNumericValue(_))
    ));
}

// ============================================================================
// Loess Parameter Tests
// ============================================================================

/// Test degree, bandwidth and exact-count validation.
#[test]
fn test_validate_loess_parameters() {
    assert!(Validator::validate_degree(0).is_ok());
    assert!(Validator::validate_degree(2).is_ok());
    assert_eq!(Validator::validate_degree(3), Err(StlError::InvalidDegree(3)));

    assert!(Validator::validate_bandwidth(1).is_ok());
    assert_eq!(
        Validator::validate_bandwidth(0),
        Err(StlError::InvalidBandwidth(0))
    );

    assert!(Validator::validate_exact_count(3, 2).is_ok());
    assert_eq!(
        Validator::validate_exact_count(2, 2),
        Err(StlError::TooFewExactPoints { got: 2, degree: 2 })
    );
}

// ============================================================================
// STL Parameter Tests
// ============================================================================

/// Test period and seasonal bandwidth validation.
#[test]
fn test_validate_period_and_seasonal_bandwidth() {
    assert!(Validator::validate_period(2).is_ok());
    assert_eq!(Validator::validate_period(1), Err(StlError::InvalidPeriod(1)));

    assert!(Validator::validate_seasonal_bandwidth(7).is_ok());
    assert!(Validator::validate_seasonal_bandwidth(13).is_ok());
    assert_eq!(
        Validator::validate_seasonal_bandwidth(5),
        Err(StlError::InvalidSeasonalBandwidth(5))
    );
    assert_eq!(
        Validator::validate_seasonal_bandwidth(8),
        Err(StlError::InvalidSeasonalBandwidth(8))
    );
}

/// Test iteration, threshold and length validation.
#[test]
fn test_validate_loop_parameters() {
    assert!(Validator::validate_iterations(0, 0).is_ok());
    assert_eq!(
        Validator::validate_iterations(0, 1),
        Err(StlError::InvalidIterations(0))
    );
    assert_eq!(
        Validator::validate_iterations(1001, 0),
        Err(StlError::InvalidIterations(1001))
    );

    assert!(Validator::validate_threshold(0.01).is_ok());
    assert!(Validator::validate_threshold(0.0).is_err());
    assert!(Validator::validate_threshold(f64::NAN).is_err());
}

/// Test duplicate parameter detection.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("period")),
        Err(StlError::DuplicateParameter { parameter: "period" })
    );
}

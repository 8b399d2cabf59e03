//! Input validation for loess and STL configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions for loess and STL
//! configuration parameters and input data. It checks requirements such as
//! input lengths, monotone support, finite values and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Degree in {0, 1, 2}, bandwidth >= 1, period >= 2,
//!   seasonal bandwidth odd and >= 7.
//! * **Finite Checks**: Support, weights and knot positions must be finite.
//! * **Missing Values**: At least one value must be present.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::StlError;

/// Upper bound on any iteration count.
const MAX_ITERATIONS: usize = 1000;

/// Smallest accepted seasonal bandwidth.
const MIN_SEASONAL_BANDWIDTH: usize = 7;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for loess and STL configuration and input data.
///
/// Provides static methods for validating parameters and input data. All
/// methods return `Result<(), StlError>` and fail fast upon identifying the
/// first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a support vector: non-empty, finite and strictly increasing.
    pub fn validate_support<T: Float>(x: &[T]) -> Result<(), StlError> {
        if x.is_empty() {
            return Err(StlError::EmptyInput);
        }

        for (i, &xi) in x.iter().enumerate() {
            Self::validate_scalar(xi, &format!("x[{i}]"))?;
            if i > 0 && xi <= x[i - 1] {
                return Err(StlError::NotStrictlyIncreasing { index: i });
            }
        }

        Ok(())
    }

    /// Validate that support and values have matching lengths.
    pub fn validate_lengths(x_len: usize, y_len: usize) -> Result<(), StlError> {
        if x_len != y_len {
            return Err(StlError::MismatchedInputs { x_len, y_len });
        }
        Ok(())
    }

    /// Validate that at least one value is present.
    pub fn validate_any_present<T>(values: &[Option<T>]) -> Result<(), StlError> {
        if values.is_empty() {
            return Err(StlError::EmptyInput);
        }
        if values.iter().all(|v| v.is_none()) {
            return Err(StlError::AllMissing);
        }
        Ok(())
    }

    /// Validate reliability weights: one per support point, finite and non-negative.
    pub fn validate_weights<T: Float>(rho: &[T], expected: usize) -> Result<(), StlError> {
        if rho.len() != expected {
            return Err(StlError::MismatchedWeights {
                expected,
                got: rho.len(),
            });
        }

        for (i, &w) in rho.iter().enumerate() {
            if !w.is_finite() || w < T::zero() {
                return Err(StlError::InvalidNumericValue(format!(
                    "rho[{}]={}",
                    i,
                    w.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    /// Validate a single numeric value for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), StlError> {
        if !val.is_finite() {
            return Err(StlError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    /// Validate a set of knot positions for finiteness.
    pub fn validate_knots<T: Float>(knots: &[T], name: &str) -> Result<(), StlError> {
        for (i, &k) in knots.iter().enumerate() {
            Self::validate_scalar(k, &format!("{name}[{i}]"))?;
        }
        Ok(())
    }

    // ========================================================================
    // Loess Parameter Validation
    // ========================================================================

    /// Validate the polynomial degree (0 = automatic, 1 or 2).
    pub fn validate_degree(degree: usize) -> Result<(), StlError> {
        if degree > 2 {
            return Err(StlError::InvalidDegree(degree));
        }
        Ok(())
    }

    /// Validate the bandwidth (number of nearest neighbours).
    pub fn validate_bandwidth(bandwidth: usize) -> Result<(), StlError> {
        if bandwidth < 1 {
            return Err(StlError::InvalidBandwidth(bandwidth));
        }
        Ok(())
    }

    /// Validate that the distinct exact knots outnumber the degree.
    pub fn validate_exact_count(distinct: usize, degree: usize) -> Result<(), StlError> {
        if distinct <= degree {
            return Err(StlError::TooFewExactPoints {
                got: distinct,
                degree,
            });
        }
        Ok(())
    }

    // ========================================================================
    // STL Parameter Validation
    // ========================================================================

    /// Validate the seasonal period.
    pub fn validate_period(period: usize) -> Result<(), StlError> {
        if period < 2 {
            return Err(StlError::InvalidPeriod(period));
        }
        Ok(())
    }

    /// Validate the seasonal bandwidth: odd and at least 7.
    pub fn validate_seasonal_bandwidth(ns: usize) -> Result<(), StlError> {
        if ns < MIN_SEASONAL_BANDWIDTH || ns % 2 == 0 {
            return Err(StlError::InvalidSeasonalBandwidth(ns));
        }
        Ok(())
    }

    /// Validate an iteration count against `[min, 1000]`.
    ///
    /// # Notes
    ///
    /// * Outer iterations accept 0 (a single pass without reweighting).
    /// * Inner iterations and the safety cap require at least 1.
    pub fn validate_iterations(iterations: usize, min: usize) -> Result<(), StlError> {
        if iterations < min || iterations > MAX_ITERATIONS {
            return Err(StlError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the convergence threshold.
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), StlError> {
        if !threshold.is_finite() || threshold <= T::zero() {
            return Err(StlError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), StlError> {
        if let Some(param) = duplicate_param {
            return Err(StlError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

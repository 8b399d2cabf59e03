//! Error and warning types for loess and STL operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions raised while validating inputs
//! and parameters for local regression and seasonal-trend decomposition, and
//! the non-fatal warnings attached to an otherwise successful decomposition.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include the offending values (lengths, indices, parameters).
//! * **Fail-fast**: Every error is raised before any smoothing state is produced.
//! * **Deferred**: Duplicate builder setters are recorded and reported at `build()`.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error`.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty or all-missing series, mismatched lengths, non-finite values.
//! 2. **Parameter validation**: Degree, bandwidth, period, seasonal bandwidth, iterations, threshold.
//! 3. **Structural constraints**: Empty cycle-subseries, too few exact knots.
//! 4. **Warnings**: Non-convergence is reported alongside the result, never as an error.
//!
//! ## Invariants
//!
//! * Every error variant is a kind of invalid input; there are no runtime numeric failures.
//! * Error messages are consistent in tone and formatting.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for loess and STL operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StlError {
    /// Input arrays are empty.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Support and value arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the support (`x`) array.
        x_len: usize,
        /// Number of elements in the value (`y`) array.
        y_len: usize,
    },

    /// Reliability weights must have one entry per support point.
    MismatchedWeights {
        /// Number of support points.
        expected: usize,
        /// Number of weights provided.
        got: usize,
    },

    /// Input data contains infinite values, or a weight is negative or NaN.
    InvalidNumericValue(String),

    /// Every value in the series is missing.
    AllMissing,

    /// Support values must be strictly increasing.
    NotStrictlyIncreasing {
        /// First index whose value is not greater than its predecessor.
        index: usize,
    },

    /// Polynomial degree must be 0 (automatic), 1 or 2.
    InvalidDegree(usize),

    /// Bandwidth (number of nearest neighbours) must be at least 1.
    InvalidBandwidth(usize),

    /// Seasonal period must be at least 2.
    InvalidPeriod(usize),

    /// Seasonal bandwidth must be odd and at least 7.
    InvalidSeasonalBandwidth(usize),

    /// Iteration count is outside the accepted range.
    InvalidIterations(usize),

    /// Convergence threshold must be positive and finite.
    InvalidThreshold(f64),

    /// Exact knot positions must outnumber the polynomial degree.
    TooFewExactPoints {
        /// Number of distinct exact positions provided.
        got: usize,
        /// Resolved polynomial degree.
        degree: usize,
    },

    /// A cycle-subseries has no present value to smooth.
    EmptySubseries {
        /// Phase (position within the period) of the empty subseries.
        phase: usize,
    },

    /// Selected configuration does not support the requested feature.
    UnsupportedFeature {
        /// Component rejecting the feature (e.g., "Stl").
        adapter: &'static str,
        /// Name of the unsupported feature.
        feature: &'static str,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for StlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::MismatchedWeights { expected, got } => {
                write!(f, "Length mismatch: expected {expected} weights, got {got}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::AllMissing => write!(f, "Every value in the series is missing"),
            Self::NotStrictlyIncreasing { index } => {
                write!(f, "Support values must be strictly increasing (violated at index {index})")
            }
            Self::InvalidDegree(d) => {
                write!(f, "Invalid degree: {d} (must be 0 for automatic, 1 or 2)")
            }
            Self::InvalidBandwidth(q) => write!(f, "Invalid bandwidth: {q} (must be >= 1)"),
            Self::InvalidPeriod(p) => write!(f, "Invalid period: {p} (must be >= 2)"),
            Self::InvalidSeasonalBandwidth(ns) => {
                write!(f, "Invalid seasonal bandwidth: {ns} (must be odd and >= 7)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be at most 1000)")
            }
            Self::InvalidThreshold(t) => {
                write!(f, "Invalid convergence threshold: {t} (must be > 0 and finite)")
            }
            Self::TooFewExactPoints { got, degree } => {
                write!(
                    f,
                    "Too few exact points: got {got}, need more than the degree ({degree})"
                )
            }
            Self::EmptySubseries { phase } => {
                write!(f, "Cycle-subseries at phase {phase} has no present values")
            }
            Self::UnsupportedFeature { adapter, feature } => {
                write!(f, "'{adapter}' does not support feature: {feature}")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for StlError {}

// ============================================================================
// Warning Type
// ============================================================================

/// Non-fatal condition attached to a successful decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlWarning {
    /// Seasonal or trend convergence ratio never dropped below the threshold.
    ///
    /// The decomposition is still returned; retrying with `robust(true)` or
    /// more iterations is advised.
    NonConvergence {
        /// Whether the seasonal component converged.
        seasonal_converged: bool,
        /// Whether the trend component converged.
        trend_converged: bool,
        /// Number of outer iterations performed.
        outer_iterations: usize,
    },
}

impl Display for StlWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::NonConvergence {
                seasonal_converged,
                trend_converged,
                outer_iterations,
            } => {
                let which = match (seasonal_converged, trend_converged) {
                    (false, false) => "seasonal and trend components",
                    (false, true) => "seasonal component",
                    _ => "trend component",
                };
                write!(
                    f,
                    "The {which} did not converge after {outer_iterations} outer iterations; consider robust = true"
                )
            }
        }
    }
}

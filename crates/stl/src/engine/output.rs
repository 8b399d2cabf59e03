//! Output types and result structures for loess and STL operations.
//!
//! ## Purpose
//!
//! This module defines the `RegressionModel` returned by loess, and the
//! `StlResult` returned by a decomposition together with its per-iteration
//! history, warnings and optional diagnostics.
//!
//! ## Design notes
//!
//! * **Immutability**: A `RegressionModel` never changes after it is built.
//! * **Missing values**: The remainder is `None` wherever the input is missing.
//! * **Ergonomics**: Both result types implement `Display` for human-readable output.
//!
//! ## Key concepts
//!
//! * **Knot table**: The positions where the weighted least squares problem was solved.
//! * **Iteration history**: One convergence report per inner iteration.
//!
//! ## Invariants
//!
//! * Seasonal, trend, remainder and robustness weights all have length N.
//! * Robustness weights are always in the range [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not perform calculations beyond simple reassembly.
//! * This module does not provide serialization/deserialization logic.

// External dependencies
use num_traits::Float;
use std::fmt::{Debug, Display, Formatter, Result};

// Internal dependencies
use crate::algorithms::interpolation::{Interpolation, PiecewisePolynomial};
use crate::evaluation::diagnostics::DecompositionDiagnostics;
use crate::primitives::errors::StlWarning;

// ============================================================================
// Regression Model
// ============================================================================

/// A fitted loess curve, queryable at any real position.
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel<T> {
    /// Interpolant over the knot table.
    pub(crate) interpolant: PiecewisePolynomial<T>,

    /// Polynomial degree used for the local fits.
    pub(crate) degree: usize,

    /// Bandwidth actually used (after rescaling for missing values).
    pub(crate) bandwidth: usize,
}

impl<T: Float> RegressionModel<T> {
    /// Evaluate the fitted curve at `x` (extrapolating outside the knots).
    #[inline]
    pub fn predict(&self, x: T) -> T {
        self.interpolant.evaluate(x)
    }

    /// Evaluate the fitted curve at every position in `xs`.
    pub fn predict_many(&self, xs: &[T]) -> Vec<T> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Knot positions, strictly increasing.
    pub fn knots(&self) -> &[T] {
        self.interpolant.knots()
    }

    /// Fitted values at the knots.
    pub fn fitted_values(&self) -> &[T] {
        self.interpolant.values()
    }

    /// Polynomial degree of the local fits (0 for a constant model).
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Bandwidth used for the local fits.
    pub fn bandwidth(&self) -> usize {
        self.bandwidth
    }

    /// Number of knots.
    pub fn len(&self) -> usize {
        self.knots().len()
    }

    /// Whether the knot table is empty (never true for a fitted model).
    pub fn is_empty(&self) -> bool {
        self.knots().is_empty()
    }
}

impl<T: Float> Interpolation<T> for RegressionModel<T> {
    fn evaluate(&self, x: T) -> T {
        self.predict(x)
    }
}

impl<T: Float + Display> Display for RegressionModel<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Loess model:")?;
        writeln!(f, "  Degree:    {}", self.degree)?;
        writeln!(f, "  Bandwidth: {}", self.bandwidth)?;
        writeln!(f, "  Knots:     {}", self.len())?;
        Ok(())
    }
}

// ============================================================================
// Iteration Report
// ============================================================================

/// Convergence ratios observed at the end of one inner iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport<T> {
    /// Outer iteration counter at the time of the report.
    pub outer: usize,

    /// Inner iteration index within the outer iteration.
    pub inner: usize,

    /// Seasonal convergence ratio.
    pub seasonal_ratio: T,

    /// Trend convergence ratio.
    pub trend_ratio: T,
}

// ============================================================================
// Result Structure
// ============================================================================

/// STL decomposition output.
#[derive(Debug, Clone, PartialEq)]
pub struct StlResult<T> {
    /// Seasonal component.
    pub seasonal: Vec<T>,

    /// Trend component.
    pub trend: Vec<T>,

    /// Remainder (`None` where the input is missing).
    pub remainder: Vec<Option<T>>,

    /// Final robustness weights.
    pub robustness_weights: Vec<T>,

    /// Seasonal period used.
    pub period: usize,

    /// Number of outer iterations performed.
    pub outer_iterations: usize,

    /// Whether the seasonal component converged.
    pub seasonal_converged: bool,

    /// Whether the trend component converged.
    pub trend_converged: bool,

    /// Convergence ratios of every inner iteration.
    pub history: Vec<IterationReport<T>>,

    /// Non-fatal warnings raised during the decomposition.
    pub warnings: Vec<StlWarning>,

    /// Optional diagnostic metrics.
    pub diagnostics: Option<DecompositionDiagnostics<T>>,
}

impl<T: Float> StlResult<T> {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.seasonal.len()
    }

    /// Whether the decomposition is empty.
    pub fn is_empty(&self) -> bool {
        self.seasonal.is_empty()
    }

    /// Check if both components converged.
    pub fn converged(&self) -> bool {
        self.seasonal_converged && self.trend_converged
    }

    /// Rows of `[seasonal, trend, remainder]` (NaN remainder where the input is missing).
    pub fn to_matrix(&self) -> Vec<[T; 3]> {
        self.seasonal
            .iter()
            .zip(self.trend.iter())
            .zip(self.remainder.iter())
            .map(|((&s, &t), r)| [s, t, r.unwrap_or_else(T::nan)])
            .collect()
    }

    /// Reassemble `seasonal + trend + remainder` (`None` where the input is missing).
    pub fn reconstruct(&self) -> Vec<Option<T>> {
        self.seasonal
            .iter()
            .zip(self.trend.iter())
            .zip(self.remainder.iter())
            .map(|((&s, &t), r)| r.map(|r| s + t + r))
            .collect()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for StlResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.len())?;
        writeln!(f, "  Period:      {}", self.period)?;
        writeln!(f, "  Outer iterations: {}", self.outer_iterations)?;
        writeln!(
            f,
            "  Converged:   seasonal={}, trend={}",
            self.seasonal_converged, self.trend_converged
        )?;
        for warning in &self.warnings {
            writeln!(f, "  Warning: {}", warning)?;
        }
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
        }

        writeln!(f, "Decomposition:")?;
        writeln!(
            f,
            "{:>8} {:>12} {:>12} {:>12} {:>10}",
            "Index", "Seasonal", "Trend", "Remainder", "Rob_Weight"
        )?;
        writeln!(f, "{:-<width$}", "", width = 58)?;

        // Data rows (show first 10 and last 10 if more than 20 points)
        let n = self.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(
                f,
                "{:>8} {:>12.6} {:>12.6}",
                idx, self.seasonal[idx], self.trend[idx]
            )?;
            match self.remainder[idx] {
                Some(r) => write!(f, " {:>12.6}", r)?,
                None => write!(f, " {:>12}", "NA")?,
            }
            writeln!(f, " {:>10.4}", self.robustness_weights[idx])?;
        }

        Ok(())
    }
}

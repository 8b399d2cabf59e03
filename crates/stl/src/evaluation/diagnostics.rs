//! Diagnostic metrics for decomposition quality assessment.
//!
//! ## Purpose
//!
//! This module summarises how much of a series is explained by its trend and
//! seasonal components, and how large the leftover remainder is.
//!
//! ## Design notes
//!
//! * **Present only**: Every statistic skips positions where the input is missing.
//! * **Strength**: `max(0, 1 - Var(R) / Var(X + R))` for `X` = trend or seasonal.
//! * **Robustness**: The remainder scale is reported both as MAD and as standard deviation.
//!
//! ## Invariants
//!
//! * Strengths are in [0, 1].
//! * Scale metrics are non-negative.
//!
//! ## Non-goals
//!
//! * This module does not perform the decomposition.
//! * This module does not provide formal tests for seasonality.

// External dependencies
use num_traits::Float;
use std::fmt::{Display, Formatter, Result};

// Internal dependencies
use crate::math::scaling::{variance, ScalingMethod};

/// Variance below which a component sum is treated as constant.
const MIN_VARIANCE: f64 = 1e-10;

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Diagnostic metrics for an STL decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionDiagnostics<T> {
    /// Strength of the trend component (0 to 1).
    pub trend_strength: T,

    /// Strength of the seasonal component (0 to 1).
    pub seasonal_strength: T,

    /// Median absolute deviation of the remainder.
    pub remainder_mad: T,

    /// Standard deviation of the remainder.
    pub remainder_std: T,
}

impl<T: Float> DecompositionDiagnostics<T> {
    /// Compute diagnostics over the present positions of a decomposition.
    pub fn compute(seasonal: &[T], trend: &[T], remainder: &[Option<T>]) -> Self {
        let mut r = Vec::with_capacity(remainder.len());
        let mut sr = Vec::with_capacity(remainder.len());
        let mut tr = Vec::with_capacity(remainder.len());

        for ((&s, &t), rem) in seasonal.iter().zip(trend.iter()).zip(remainder.iter()) {
            if let Some(ri) = *rem {
                r.push(ri);
                sr.push(s + ri);
                tr.push(t + ri);
            }
        }

        let var_r = variance(&r);
        let mut scratch = r.clone();

        Self {
            trend_strength: Self::strength(var_r, variance(&tr)),
            seasonal_strength: Self::strength(var_r, variance(&sr)),
            remainder_mad: ScalingMethod::MAD.compute(&mut scratch),
            remainder_std: var_r.sqrt(),
        }
    }

    // 1 - Var(R) / Var(X + R), clamped below at zero.
    fn strength(var_remainder: T, var_component: T) -> T {
        let floor = T::from(MIN_VARIANCE).unwrap_or_else(T::epsilon);
        if var_component < floor {
            return T::zero();
        }
        (T::one() - var_remainder / var_component).max(T::zero())
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for DecompositionDiagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "STL Diagnostics:")?;
        writeln!(f, "  Trend strength:     {:.6}", self.trend_strength)?;
        writeln!(f, "  Seasonal strength:  {:.6}", self.seasonal_strength)?;
        writeln!(f, "  Remainder MAD:      {:.6}", self.remainder_mad)?;
        writeln!(f, "  Remainder SD:       {:.6}", self.remainder_std)?;
        Ok(())
    }
}

//! Polynomial order estimation from successive differences.
//!
//! ## Purpose
//!
//! This module suggests a local polynomial degree when the caller leaves it
//! to the data. The series is differenced up to three times; the number of
//! differencing steps that keep reducing the spread is the order proxy.
//!
//! ## Design notes
//!
//! * **Spread**: Mean absolute deviation from the mean of each differenced sequence.
//! * **Stopping**: A spread below `1e-10` counts the step and stops; a spread that
//!   does not decrease stops without counting it.
//! * **Best effort**: This is a heuristic, not an optimal order selector.
//!
//! ## Invariants
//!
//! * The raw estimate is in `[1, 4]`; callers clamp it to `{1, 2}`.
//!
//! ## Non-goals
//!
//! * This module does not handle missing values (present values only).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::mean_absolute_deviation;

/// Maximum number of differencing steps.
const MAX_DIFFERENCES: usize = 3;

/// Spread below which a differenced sequence is treated as constant.
const ZERO_SPREAD: f64 = 1e-10;

/// Estimate the polynomial order of `values` (differencing steps + 1).
pub fn estimate_order<T: Float>(values: &[T]) -> usize {
    let zero = T::from(ZERO_SPREAD).unwrap_or_else(T::epsilon);

    let mut current = values.to_vec();
    let mut previous_spread = mean_absolute_deviation(&current);
    let mut steps = 0;

    for step in 1..=MAX_DIFFERENCES {
        if current.len() < 2 {
            break;
        }
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
        let spread = mean_absolute_deviation(&current);

        if spread < zero {
            steps = step;
            break;
        }
        if spread >= previous_spread {
            break;
        }

        steps = step;
        previous_spread = spread;
    }

    steps + 1
}

/// Resolve the automatic degree: the order estimate clamped to `{1, 2}`.
pub fn auto_degree<T: Float>(values: &[T]) -> usize {
    estimate_order(values).clamp(1, 2)
}

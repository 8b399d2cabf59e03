//! Robustness weight computation for outlier downweighting.
//!
//! ## Purpose
//!
//! This module recomputes the per-observation robustness weights of the STL
//! outer loop from the current remainder. Observations with large residuals
//! are downweighted in the next round of cycle-subseries and trend fits.
//!
//! ## Design notes
//!
//! * **Scale**: `h = 6 * median(|R|)` over present observations (MAR scaling).
//! * **Bisquare**: `w = (1 - u^2)^2` for `u = |R| / h < 1`, zero otherwise.
//! * **Degenerate scale**: When `h` is zero every weight is 1.
//!
//! ## Invariants
//!
//! * Robustness weights are in [0, 1].
//! * Missing observations keep weight 1 (they never enter a fit).
//!
//! ## Non-goals
//!
//! * This module does not decide when weights are recomputed.
//! * This module does not compute residuals.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::scaling::ScalingMethod;

/// Tuning constant applied to the median absolute residual.
const BISQUARE_C: f64 = 6.0;

/// Compute the bisquare weight of a residual for a tuned scale `h`.
#[inline]
pub fn bisquare_weight<T: Float>(residual: T, h: T) -> T {
    if h <= T::zero() {
        return T::one();
    }

    let u = residual.abs() / h;
    if u < T::one() {
        let tmp = T::one() - u * u;
        tmp * tmp
    } else {
        T::zero()
    }
}

/// Recompute robustness weights from the remainder.
///
/// `weights` must have the same length as `remainder`.
pub fn apply_robustness_weights<T: Float>(remainder: &[Option<T>], weights: &mut [T]) {
    debug_assert_eq!(remainder.len(), weights.len());

    let mut scratch: Vec<T> = remainder.iter().filter_map(|r| *r).collect();
    if scratch.is_empty() {
        weights.fill(T::one());
        return;
    }

    let c = T::from(BISQUARE_C).unwrap_or_else(T::one);
    let h = c * ScalingMethod::MAR.compute(&mut scratch);

    for (w, r) in weights.iter_mut().zip(remainder.iter()) {
        *w = match r {
            Some(r) => bisquare_weight(*r, h),
            None => T::one(),
        };
    }
}

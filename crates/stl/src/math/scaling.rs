//! Robust scale estimation and summary statistics.
//!
//! This module provides the scale measures used by the robustness weights
//! (median absolute residual), the order estimator (mean absolute deviation)
//! and the decomposition diagnostics (median absolute deviation, variance).

// External dependencies
use num_traits::Float;
use std::cmp::Ordering::Equal;

// Method for measuring the scale of residuals.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScalingMethod {
    // Median Absolute Residual: `median(|r|)`.
    #[default]
    MAR,

    // Median Absolute Deviation: `median(|r - median(r)|)`.
    MAD,
}

impl ScalingMethod {
    // Compute the scale of the given values using the selected method.
    pub fn compute<T: Float>(&self, vals: &mut [T]) -> T {
        match self {
            Self::MAR => Self::compute_mar(vals),
            Self::MAD => Self::compute_mad(vals),
        }
    }

    // Compute the Median Absolute Deviation (MAD).
    #[inline]
    fn compute_mad<T: Float>(vals: &mut [T]) -> T {
        if vals.is_empty() {
            return T::zero();
        }

        let median: T = median_inplace(vals);
        for val in vals.iter_mut() {
            *val = (*val - median).abs();
        }
        median_inplace(vals)
    }

    // Compute the Median Absolute Residual (uncentered).
    #[inline]
    fn compute_mar<T: Float>(vals: &mut [T]) -> T {
        if vals.is_empty() {
            return T::zero();
        }

        for val in vals.iter_mut() {
            *val = val.abs();
        }
        median_inplace(vals)
    }
}

/// Compute the median in place using quickselect.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Even length: the largest value of the lower half pairs with `upper`.
    let lower = vals[..mid]
        .iter()
        .copied()
        .fold(T::neg_infinity(), T::max);
    (lower + upper) / (T::one() + T::one())
}

/// Arithmetic mean; zero for an empty slice.
#[inline]
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let n = T::from(vals.len()).unwrap_or_else(T::one);
    vals.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Mean absolute deviation from the mean.
pub fn mean_absolute_deviation<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let m = mean(vals);
    let n = T::from(vals.len()).unwrap_or_else(T::one);
    vals.iter().fold(T::zero(), |acc, &v| acc + (v - m).abs()) / n
}

/// Population variance.
pub fn variance<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let m = mean(vals);
    let n = T::from(vals.len()).unwrap_or_else(T::one);
    vals.iter().fold(T::zero(), |acc, &v| acc + (v - m) * (v - m)) / n
}

/// Minimum and maximum of `vals` at positions where `mask` is set.
///
/// Returns `None` when no position is selected.
pub fn masked_range<T: Float>(vals: &[T], mask: &[bool]) -> Option<(T, T)> {
    vals.iter()
        .zip(mask.iter())
        .filter(|(_, &present)| present)
        .fold(None, |acc, (&v, _)| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

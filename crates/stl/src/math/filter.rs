//! Moving-average filter.
//!
//! ## Purpose
//!
//! This module provides the sliding-sum moving average consumed by the STL
//! low-pass stage. Only complete windows are emitted, so a series of length
//! `n` filtered with window `w` yields `n - w + 1` values.
//!
//! ## Invariants
//!
//! * The output is empty when `w` is zero or exceeds the input length.
//!
//! ## Non-goals
//!
//! * This module does not handle missing values (the low-pass input is complete).

// External dependencies
use num_traits::Float;

/// Compute the moving average of `x` over windows of length `window`.
pub fn moving_average<T: Float>(x: &[T], window: usize) -> Vec<T> {
    let n = x.len();
    if window == 0 || window > n {
        return Vec::new();
    }

    let w = T::from(window).unwrap_or_else(T::one);
    let mut out = Vec::with_capacity(n - window + 1);

    let mut sum = x[..window].iter().fold(T::zero(), |acc, &v| acc + v);
    out.push(sum / w);

    for i in window..n {
        sum = sum + x[i] - x[i - window];
        out.push(sum / w);
    }

    out
}

/// Apply the STL low-pass cascade: moving averages of length `period`, `period`, then 3.
///
/// A series of length `n + 2 * period` comes back with length `n`.
pub fn low_pass_cascade<T: Float>(x: &[T], period: usize) -> Vec<T> {
    let ma = moving_average(x, period);
    let ma = moving_average(&ma, period);
    moving_average(&ma, 3)
}

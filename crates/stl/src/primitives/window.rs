//! Windowing primitives for local regression.
//!
//! This module provides the contiguous neighbour window used by every local
//! fit: over a strictly increasing support, the `k` points nearest to a query
//! always form a contiguous index range.

// External dependencies
use num_traits::Float;

// Inclusive window bounds `[left, right]` for a local fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    // Left boundary index (inclusive).
    pub left: usize,

    // Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // Select the `k` support points nearest to `x_query`.
    //
    // The window grows outward from the insertion point of `x_query`. On a
    // distance tie the left candidate wins, which is the lower original index.
    #[inline]
    pub fn nearest<T: Float>(x: &[T], x_query: T, k: usize) -> Self {
        let n = x.len();
        debug_assert!(n >= 1, "nearest: support must not be empty");

        let k = k.clamp(1, n);
        if k == n {
            return Self {
                left: 0,
                right: n - 1,
            };
        }

        // Half-open [lo, hi) while growing.
        let pos = x.partition_point(|&xi| xi < x_query);
        let mut lo = pos;
        let mut hi = pos;

        while hi - lo < k {
            if lo == 0 {
                hi += 1;
            } else if hi == n {
                lo -= 1;
            } else {
                let d_left = x_query - x[lo - 1];
                let d_right = x[hi] - x_query;
                if d_left <= d_right {
                    lo -= 1;
                } else {
                    hi += 1;
                }
            }
        }

        Self {
            left: lo,
            right: hi - 1,
        }
    }

    // Compute the maximum distance from `x_query` to any point in the window.
    #[inline]
    pub fn max_distance<T: Float>(&self, x: &[T], x_query: T) -> T {
        T::max(
            (x_query - x[self.left]).abs(),
            (x[self.right] - x_query).abs(),
        )
    }

    // Check if the window is empty.
    #[allow(dead_code)]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right < self.left
    }

    // Get the number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }
}

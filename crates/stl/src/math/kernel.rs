//! Tricube kernel and nearest-neighbour weighting for local regression.
//!
//! ## Purpose
//!
//! This module selects the neighbourhood of a query point and turns distances
//! into tricube weights. It controls which support points influence a local
//! fit and by how much.
//!
//! ## Design notes
//!
//! * **Neighbourhood**: The `min(q, n)` nearest support points, as a contiguous window.
//! * **Scaling**: The kernel radius is `max(1, q / n)` times the farthest selected distance,
//!   so bandwidths larger than the support widen the kernel instead of truncating it.
//! * **Reliability**: Kernel weights are multiplied elementwise by the caller's `rho`.
//!
//! ## Key concepts
//!
//! * **Tricube**: `(1 - |u|^3)^3` for `|u| < 1`, zero otherwise.
//! * **Zero radius**: When every selected point coincides with the query, all kernel
//!   weights are exactly 1 (no division by zero).
//!
//! ## Invariants
//!
//! * Weights are finite and non-negative.
//! * Points outside the selected window carry no weight.
//!
//! ## Non-goals
//!
//! * This module does not normalise weights.
//! * This module does not solve the regression.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::window::Window;

// ============================================================================
// Kernel Function
// ============================================================================

/// Compute the tricube weight for a normalised distance `u`.
#[inline]
pub fn tricube<T: Float>(u: T) -> T {
    let abs_u = u.abs();
    if abs_u >= T::one() {
        return T::zero();
    }
    let tmp = T::one() - abs_u * abs_u * abs_u;
    (tmp * tmp * tmp).max(T::zero())
}

// ============================================================================
// Neighbourhood
// ============================================================================

/// Nearest-neighbour window and kernel radius for a single query point.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<T> {
    /// Selected support indices (inclusive bounds).
    pub window: Window,

    /// Kernel radius (`qdist`).
    pub radius: T,
}

impl<T: Float> Neighborhood<T> {
    /// Select the `q` nearest support points to `x_query` and derive the kernel radius.
    pub fn select(x: &[T], x_query: T, q: usize) -> Self {
        let n = x.len();
        let window = Window::nearest(x, x_query, q);

        let ratio = T::from(q).unwrap_or_else(T::one) / T::from(n).unwrap_or_else(T::one);
        let radius = ratio.max(T::one()) * window.max_distance(x, x_query);

        Self { window, radius }
    }

    /// Number of selected points.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check whether the neighbourhood is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Compute kernel × reliability weights for the selected points.
    ///
    /// `weights[k]` receives the weight of support index `window.left + k`.
    /// Returns the weight sum.
    pub fn compute_weights(&self, x: &[T], x_query: T, rho: &[T], weights: &mut [T]) -> T {
        let mut sum = T::zero();

        for (k, j) in (self.window.left..=self.window.right).enumerate() {
            let w_k = if self.radius <= T::zero() {
                T::one()
            } else {
                tricube((x[j] - x_query).abs() / self.radius)
            };

            let w = w_k * rho[j];
            weights[k] = w;
            sum = sum + w;
        }

        sum
    }
}

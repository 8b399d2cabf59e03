//! Local polynomial regression at a single query point.
//!
//! ## Purpose
//!
//! This module fits a weighted least squares polynomial of degree 0, 1 or 2
//! to the nearest neighbours of a query point and returns the fitted value at
//! that point. It is the inner kernel of every loess evaluation.
//!
//! ## Design notes
//!
//! * **Centring**: The design is built on `u = (x - x_query) / radius`, so the fitted
//!   value is the intercept and the normal equations stay well scaled.
//! * **Fallbacks**: Zero total weight falls back to the unweighted neighbour mean;
//!   singular normal equations reduce the degree for that query only.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Polynomial degree**: `Auto` is resolved once per call by the order estimator.
//! * **Neighbourhood**: Selected and weighted by the tricube kernel.
//!
//! ## Invariants
//!
//! * The returned value is finite whenever the inputs are finite.
//!
//! ## Non-goals
//!
//! * This module does not drop missing values (the caller passes present points only).
//! * This module does not choose knot positions.

// External dependencies
use num_traits::Float;
use tracing::debug;

// Internal dependencies
use crate::math::kernel::Neighborhood;
use crate::math::linalg::NormalEquations;

// ============================================================================
// Polynomial Degree
// ============================================================================

/// Degree of the local polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolynomialDegree {
    /// Infer linear or quadratic from the data (order estimator).
    #[default]
    Auto,

    /// Local linear fit.
    Linear,

    /// Local quadratic fit.
    Quadratic,
}

impl PolynomialDegree {
    /// Map the numeric convention (0 = automatic) onto the variant.
    pub fn from_usize(degree: usize) -> Option<Self> {
        match degree {
            0 => Some(Self::Auto),
            1 => Some(Self::Linear),
            2 => Some(Self::Quadratic),
            _ => None,
        }
    }

    /// Numeric degree, `None` while unresolved.
    pub fn as_usize(self) -> Option<usize> {
        match self {
            Self::Auto => None,
            Self::Linear => Some(1),
            Self::Quadratic => Some(2),
        }
    }
}

// ============================================================================
// Regression Context
// ============================================================================

/// Context containing all data needed to fit a single query point.
pub struct RegressionContext<'a, T: Float> {
    /// Support values (strictly increasing, present points only)
    pub x: &'a [T],

    /// Response values aligned with `x`
    pub y: &'a [T],

    /// Reliability weights aligned with `x`
    pub rho: &'a [T],

    /// Bandwidth (number of nearest neighbours)
    pub bandwidth: usize,

    /// Resolved polynomial degree (0, 1 or 2)
    pub degree: usize,

    /// Scratch buffer for neighbourhood weights (at least `min(bandwidth, n)` long)
    pub weights: &'a mut [T],
}

impl<'a, T: Float> RegressionContext<'a, T> {
    /// Fit the local polynomial and evaluate it at `x_query`.
    pub fn fit(&mut self, x_query: T) -> T {
        let hood = Neighborhood::select(self.x, x_query, self.bandwidth);
        let window = hood.window;
        let weight_sum = hood.compute_weights(self.x, x_query, self.rho, self.weights);

        if weight_sum <= T::zero() {
            debug!(
                x = x_query.to_f64().unwrap_or(f64::NAN),
                "zero total weight in neighbourhood, using local mean"
            );
            let cnt = T::from(window.len()).unwrap_or_else(T::one);
            return self.y[window.left..=window.right]
                .iter()
                .fold(T::zero(), |acc, &v| acc + v)
                / cnt;
        }

        let scale = if hood.radius > T::zero() {
            hood.radius
        } else {
            T::one()
        };

        let mut degree = self.degree.min(2);
        loop {
            let mut system = NormalEquations::new(degree + 1);
            for (k, j) in (window.left..=window.right).enumerate() {
                let w = self.weights[k];
                if w > T::zero() {
                    system.accumulate((self.x[j] - x_query) / scale, self.y[j], w);
                }
            }

            if let Some(beta) = system.solve() {
                return beta[0];
            }

            // Degree 0 with positive weight sum is never singular.
            if degree == 0 {
                return weighted_mean(
                    &self.y[window.left..=window.right],
                    &self.weights[..window.len()],
                );
            }

            debug!(
                x = x_query.to_f64().unwrap_or(f64::NAN),
                degree, "singular local fit, reducing degree"
            );
            degree -= 1;
        }
    }
}

#[inline]
fn weighted_mean<T: Float>(y: &[T], w: &[T]) -> T {
    let (sum_wy, sum_w) = y
        .iter()
        .zip(w.iter())
        .fold((T::zero(), T::zero()), |(swy, sw), (&yi, &wi)| {
            (swy + wi * yi, sw + wi)
        });
    sum_wy / sum_w
}

//! Execution engine for loess fits.
//!
//! ## Purpose
//!
//! This module turns a support vector, a (possibly gappy) response and a
//! configuration into a `RegressionModel`. It drops missing observations,
//! handles degenerate one- and two-point inputs, resolves the polynomial
//! degree, plans the knot positions, solves the local fits and wraps the
//! knot table in an interpolant.
//!
//! ## Design notes
//!
//! * **Missing data**: Missing responses are removed together with their support and
//!   reliability entries; the bandwidth is rescaled to the retained fraction.
//! * **Knot planning**: Either the caller's exact positions, or an even grid whose density
//!   grows as the bandwidth shrinks, plus guard knots and caller extras.
//! * **Exactness**: The model reproduces the local fit bit-for-bit at every knot.
//!
//! ## Key concepts
//!
//! * **Retained points**: Present observations only.
//! * **Grid density**: `clamp(ceil(10 n / q) + 1, d + 1, n)` grid knots.
//! * **Guard knots**: Half a grid step outside each end of the support.
//!
//! ## Invariants
//!
//! * The call either returns a complete model or fails before fitting anything.
//! * Knots are strictly increasing.
//!
//! ## Non-goals
//!
//! * This module does not sort input data (the support must already be increasing).
//! * This module does not run robustness iterations (handled by the STL loop).

// External dependencies
use num_traits::Float;
use std::cmp::Ordering::Equal;
use tracing::debug;

// Internal dependencies
use crate::algorithms::interpolation::PiecewisePolynomial;
use crate::algorithms::order::auto_degree;
use crate::algorithms::regression::{PolynomialDegree, RegressionContext};
use crate::engine::output::RegressionModel;
use crate::engine::validator::Validator;
use crate::primitives::errors::StlError;

/// Grid knots per bandwidth-relative unit of support.
const GRID_DENSITY: f64 = 10.0;

/// Default bandwidth as a fraction of the series length.
const DEFAULT_SPAN: f64 = 0.75;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a single loess fit.
#[derive(Debug, Clone, Copy)]
pub struct LoessConfig<'a, T> {
    /// Polynomial degree (automatic, linear or quadratic).
    pub degree: PolynomialDegree,

    /// Number of nearest neighbours; `None` uses `ceil(0.75 * n)`.
    pub bandwidth: Option<usize>,

    /// Reliability weights, one per support point; `None` means all ones.
    pub rho: Option<&'a [T]>,

    /// Exact knot positions; when non-empty they replace the automatic grid.
    pub exact: &'a [T],

    /// Additional knots merged into the automatic grid.
    pub extra: &'a [T],
}

impl<T> Default for LoessConfig<'_, T> {
    fn default() -> Self {
        Self {
            degree: PolynomialDegree::Auto,
            bandwidth: None,
            rho: None,
            exact: &[],
            extra: &[],
        }
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Unified execution engine for loess fits.
pub struct LoessExecutor;

impl LoessExecutor {
    /// Default bandwidth for `n` observations.
    pub fn default_bandwidth(n: usize) -> usize {
        ((DEFAULT_SPAN * n as f64).ceil() as usize).max(1)
    }

    /// Fit a loess model to `y` over support `x`.
    pub fn run_with_config<T: Float>(
        x: &[T],
        y: &[Option<T>],
        config: &LoessConfig<'_, T>,
    ) -> Result<RegressionModel<T>, StlError> {
        // Step 1: Validate shapes, values and parameters
        Validator::validate_lengths(x.len(), y.len())?;
        Validator::validate_support(x)?;
        Validator::validate_any_present(y)?;
        if let Some(rho) = config.rho {
            Validator::validate_weights(rho, x.len())?;
        }
        let bandwidth = config
            .bandwidth
            .unwrap_or_else(|| Self::default_bandwidth(x.len()));
        Validator::validate_bandwidth(bandwidth)?;
        Validator::validate_knots(config.exact, "exact")?;
        Validator::validate_knots(config.extra, "extra")?;

        // Step 2: Drop missing observations
        let n_total = x.len();
        let mut xs = Vec::with_capacity(n_total);
        let mut ys = Vec::with_capacity(n_total);
        let mut rs = Vec::with_capacity(n_total);
        for (i, (&xi, yi)) in x.iter().zip(y.iter()).enumerate() {
            if let Some(yi) = *yi {
                xs.push(xi);
                ys.push(yi);
                rs.push(config.rho.map_or(T::one(), |rho| rho[i]));
            }
        }
        let n = xs.len();
        let q = Self::rescale_bandwidth(bandwidth, n, n_total);

        // Step 3: Degenerate inputs bypass the weighted regression
        if n <= 2 {
            debug!(points = n, "degenerate loess input, using exact interpolant");
            let order = n - 1;
            return Ok(RegressionModel {
                interpolant: PiecewisePolynomial::new(xs, ys, order)?,
                degree: order,
                bandwidth: q,
            });
        }

        // Step 4: Resolve the polynomial degree once per call
        let degree = match config.degree.as_usize() {
            Some(d) => d,
            None => auto_degree(&ys),
        };

        // Step 5: Plan knot positions
        let knots = if config.exact.is_empty() {
            Self::grid_knots(&xs, q, degree, config.extra)
        } else {
            let knots = Self::sorted_unique(config.exact.to_vec());
            Validator::validate_exact_count(knots.len(), degree)?;
            knots
        };

        // Step 6: Solve the local fit at every knot
        let mut weights = vec![T::zero(); q.min(n)];
        let mut ctx = RegressionContext {
            x: &xs,
            y: &ys,
            rho: &rs,
            bandwidth: q,
            degree,
            weights: &mut weights,
        };
        let values: Vec<T> = knots.iter().map(|&k| ctx.fit(k)).collect();

        // Step 7: Wrap the knot table in an interpolant of the same degree
        Ok(RegressionModel {
            interpolant: PiecewisePolynomial::new(knots, values, degree)?,
            degree,
            bandwidth: q,
        })
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Rescale a bandwidth to the retained fraction of the data.
    pub fn rescale_bandwidth(bandwidth: usize, retained: usize, total: usize) -> usize {
        if retained == total || total == 0 {
            return bandwidth;
        }
        let scaled = (bandwidth as f64 * retained as f64 / total as f64).round() as usize;
        scaled.max(1)
    }

    /// Plan the automatic knot grid for a sorted support.
    pub fn grid_knots<T: Float>(x: &[T], q: usize, degree: usize, extra: &[T]) -> Vec<T> {
        let n = x.len();
        let lo = x[0];
        let hi = x[n - 1];

        let target = (GRID_DENSITY * n as f64 / q.max(1) as f64).ceil() as usize + 1;
        let m = target.clamp(degree + 1, n.max(degree + 1));

        let steps = T::from(m - 1).unwrap_or_else(T::one);
        let step = (hi - lo) / steps;
        let half = step / (T::one() + T::one());

        let mut knots = Vec::with_capacity(m + 2 + extra.len());
        knots.push(lo - half);
        for i in 0..m {
            let knot = if i + 1 == m {
                hi
            } else {
                lo + step * T::from(i).unwrap_or_else(T::zero)
            };
            knots.push(knot);
        }
        knots.push(hi + half);
        knots.extend_from_slice(extra);

        Self::sorted_unique(knots)
    }

    /// Sort knot positions and remove duplicates.
    pub fn sorted_unique<T: Float>(mut knots: Vec<T>) -> Vec<T> {
        knots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
        knots.dedup();
        knots
    }
}

//! High-level API for loess smoothing and STL decomposition.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points. It implements
//! fluent builders for configuring a loess fit or a decomposition, and the
//! plain functional forms `loess(...)` and `stl(...)`.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Deferred defaults**: Defaults that depend on other parameters (trend and
//!   low-pass bandwidths) are resolved at `.build()` time.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LoessBuilder`] via `Loess::new()` or a [`StlBuilder`] via `Stl::new()`.
//! 2. Chain configuration methods (`.bandwidth()`, `.period()`, `.robust()`, etc.).
//! 3. Call `.build()` to validate, then `.fit(...)` on the returned processor.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::decomposition::{StlConfig, StlExecutor, SubseriesPassFn};
use crate::engine::executor::{LoessConfig, LoessExecutor};
use crate::engine::validator::Validator;
use crate::primitives::backend::Backend;

// Publicly re-exported types
pub use crate::algorithms::interpolation::{Interpolation, PiecewisePolynomial};
pub use crate::algorithms::regression::PolynomialDegree;
pub use crate::engine::output::{IterationReport, RegressionModel, StlResult};
pub use crate::evaluation::diagnostics::DecompositionDiagnostics;
pub use crate::primitives::errors::{StlError, StlWarning};
pub use crate::primitives::series::SeriesInput;

// ============================================================================
// Loess Builder
// ============================================================================

/// Fluent builder for configuring a loess fit.
#[derive(Debug, Clone)]
pub struct LoessBuilder<T> {
    /// Polynomial degree (default: automatic).
    pub degree: Option<PolynomialDegree>,

    /// Number of nearest neighbours (default: `ceil(0.75 * n)`).
    pub bandwidth: Option<usize>,

    /// Reliability weights, one per support point (default: ones).
    pub weights: Option<Vec<T>>,

    /// Exact knot positions.
    pub exact: Option<Vec<T>>,

    /// Additional knots merged into the automatic grid.
    pub extra: Option<Vec<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for LoessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LoessBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            degree: None,
            bandwidth: None,
            weights: None,
            exact: None,
            extra: None,
            duplicate_param: None,
        }
    }

    /// Set the polynomial degree.
    pub fn degree(mut self, degree: PolynomialDegree) -> Self {
        if self.degree.is_some() {
            self.duplicate_param = Some("degree");
        }
        self.degree = Some(degree);
        self
    }

    /// Set the bandwidth (number of nearest neighbours).
    pub fn bandwidth(mut self, bandwidth: usize) -> Self {
        if self.bandwidth.is_some() {
            self.duplicate_param = Some("bandwidth");
        }
        self.bandwidth = Some(bandwidth);
        self
    }

    /// Set reliability weights (one per support point).
    pub fn weights(mut self, weights: Vec<T>) -> Self {
        if self.weights.is_some() {
            self.duplicate_param = Some("weights");
        }
        self.weights = Some(weights);
        self
    }

    /// Solve the local fit exactly at these positions instead of on a grid.
    pub fn exact(mut self, exact: Vec<T>) -> Self {
        if self.exact.is_some() {
            self.duplicate_param = Some("exact");
        }
        self.exact = Some(exact);
        self
    }

    /// Merge these positions into the automatic knot grid.
    pub fn extra(mut self, extra: Vec<T>) -> Self {
        if self.extra.is_some() {
            self.duplicate_param = Some("extra");
        }
        self.extra = Some(extra);
        self
    }

    /// Validate the configuration and build the smoother.
    pub fn build(self) -> Result<LoessSmoother<T>, StlError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let Some(q) = self.bandwidth {
            Validator::validate_bandwidth(q)?;
        }
        if let Some(ref w) = self.weights {
            Validator::validate_weights(w, w.len())?;
        }
        if let Some(ref exact) = self.exact {
            Validator::validate_knots(exact, "exact")?;
        }
        if let Some(ref extra) = self.extra {
            Validator::validate_knots(extra, "extra")?;
        }

        Ok(LoessSmoother { config: self })
    }
}

// ============================================================================
// Loess Smoother
// ============================================================================

/// Validated loess configuration, ready to fit.
#[derive(Debug, Clone)]
pub struct LoessSmoother<T> {
    config: LoessBuilder<T>,
}

impl<T: Float> LoessSmoother<T> {
    /// Fit a loess model of `y` over the strictly increasing support `x`.
    pub fn fit<Y>(&self, x: &[T], y: &Y) -> Result<RegressionModel<T>, StlError>
    where
        Y: SeriesInput<T> + ?Sized,
    {
        let values = y.to_series()?;
        let config = LoessConfig {
            degree: self.config.degree.unwrap_or_default(),
            bandwidth: self.config.bandwidth,
            rho: self.config.weights.as_deref(),
            exact: self.config.exact.as_deref().unwrap_or(&[]),
            extra: self.config.extra.as_deref().unwrap_or(&[]),
        };
        LoessExecutor::run_with_config(x, &values, &config)
    }
}

/// Fit a loess model (functional form).
///
/// `degree` is 0 (automatic), 1 or 2; `bandwidth` defaults to `ceil(0.75 * n)`;
/// `rho` defaults to all ones; `exact` may be empty.
pub fn loess<T, Y>(
    x: &[T],
    y: &Y,
    degree: usize,
    bandwidth: Option<usize>,
    rho: Option<&[T]>,
    exact: &[T],
) -> Result<RegressionModel<T>, StlError>
where
    T: Float,
    Y: SeriesInput<T> + ?Sized,
{
    Validator::validate_degree(degree)?;
    let degree = PolynomialDegree::from_usize(degree).ok_or(StlError::InvalidDegree(degree))?;
    let values = y.to_series()?;

    LoessExecutor::run_with_config(
        x,
        &values,
        &LoessConfig {
            degree,
            bandwidth,
            rho,
            exact,
            extra: &[],
        },
    )
}

// ============================================================================
// STL Builder
// ============================================================================

/// Fluent builder for configuring an STL decomposition.
#[derive(Debug, Clone)]
pub struct StlBuilder<T> {
    /// Seasonal period (required).
    pub period: Option<usize>,

    /// Robust mode (default: false).
    pub robust: Option<bool>,

    /// Low-pass bandwidth (default: smallest odd integer >= period).
    pub low_pass_bandwidth: Option<usize>,

    /// Seasonal bandwidth (default: 7).
    pub seasonal_bandwidth: Option<usize>,

    /// Trend bandwidth (default: smallest odd integer >= 1.5 p / (1 - 1.5 / ns)).
    pub trend_bandwidth: Option<usize>,

    /// Inner iterations (default: 2, or 1 when robust).
    pub inner_iterations: Option<usize>,

    /// Outer iterations (default: 0, or 15 when robust).
    pub outer_iterations: Option<usize>,

    /// Post-smooth the seasonal component (default: false).
    pub post_smoothing: Option<bool>,

    /// Post-smoothing bandwidth (default: seasonal bandwidth).
    pub post_smoothing_bandwidth: Option<usize>,

    /// Convergence threshold (default: 0.01).
    pub convergence_threshold: Option<T>,

    /// Safety cap on outer iterations in robust mode (default: 100).
    pub max_outer_iterations: Option<usize>,

    /// Log every inner iteration at INFO level (default: false).
    pub verbose: Option<bool>,

    /// Attach decomposition diagnostics.
    pub return_diagnostics: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom cycle-subseries pass function.
    #[doc(hidden)]
    pub custom_subseries_pass: Option<SubseriesPassFn<T>>,

    /// Execution backend hint.
    #[doc(hidden)]
    pub backend: Option<Backend>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for StlBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> StlBuilder<T> {
    /// Default seasonal bandwidth.
    pub const DEFAULT_SEASONAL_BANDWIDTH: usize = 7;

    /// Default convergence threshold.
    pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.01;

    /// Default safety cap on outer iterations.
    pub const DEFAULT_MAX_OUTER_ITERATIONS: usize = 100;

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            period: None,
            robust: None,
            low_pass_bandwidth: None,
            seasonal_bandwidth: None,
            trend_bandwidth: None,
            inner_iterations: None,
            outer_iterations: None,
            post_smoothing: None,
            post_smoothing_bandwidth: None,
            convergence_threshold: None,
            max_outer_iterations: None,
            verbose: None,
            return_diagnostics: None,
            custom_subseries_pass: None,
            backend: None,
            duplicate_param: None,
        }
    }

    /// Set the seasonal period.
    pub fn period(mut self, period: usize) -> Self {
        if self.period.is_some() {
            self.duplicate_param = Some("period");
        }
        self.period = Some(period);
        self
    }

    /// Enable robust mode (iterate until convergence with reweighting).
    pub fn robust(mut self, robust: bool) -> Self {
        if self.robust.is_some() {
            self.duplicate_param = Some("robust");
        }
        self.robust = Some(robust);
        self
    }

    /// Set the low-pass loess bandwidth.
    pub fn low_pass_bandwidth(mut self, nl: usize) -> Self {
        if self.low_pass_bandwidth.is_some() {
            self.duplicate_param = Some("low_pass_bandwidth");
        }
        self.low_pass_bandwidth = Some(nl);
        self
    }

    /// Set the cycle-subseries loess bandwidth (odd, >= 7).
    pub fn seasonal_bandwidth(mut self, ns: usize) -> Self {
        if self.seasonal_bandwidth.is_some() {
            self.duplicate_param = Some("seasonal_bandwidth");
        }
        self.seasonal_bandwidth = Some(ns);
        self
    }

    /// Set the trend loess bandwidth.
    pub fn trend_bandwidth(mut self, nt: usize) -> Self {
        if self.trend_bandwidth.is_some() {
            self.duplicate_param = Some("trend_bandwidth");
        }
        self.trend_bandwidth = Some(nt);
        self
    }

    /// Set the number of inner iterations.
    pub fn inner_iterations(mut self, ni: usize) -> Self {
        if self.inner_iterations.is_some() {
            self.duplicate_param = Some("inner_iterations");
        }
        self.inner_iterations = Some(ni);
        self
    }

    /// Set the number of outer (reweighting) iterations.
    pub fn outer_iterations(mut self, no: usize) -> Self {
        if self.outer_iterations.is_some() {
            self.duplicate_param = Some("outer_iterations");
        }
        self.outer_iterations = Some(no);
        self
    }

    /// Enable quadratic post-smoothing of the seasonal component.
    pub fn post_smoothing(mut self, enabled: bool) -> Self {
        if self.post_smoothing.is_some() {
            self.duplicate_param = Some("post_smoothing");
        }
        self.post_smoothing = Some(enabled);
        self
    }

    /// Set the post-smoothing bandwidth.
    pub fn post_smoothing_bandwidth(mut self, bandwidth: usize) -> Self {
        if self.post_smoothing_bandwidth.is_some() {
            self.duplicate_param = Some("post_smoothing_bandwidth");
        }
        self.post_smoothing_bandwidth = Some(bandwidth);
        self
    }

    /// Set the convergence threshold.
    pub fn convergence_threshold(mut self, threshold: T) -> Self {
        if self.convergence_threshold.is_some() {
            self.duplicate_param = Some("convergence_threshold");
        }
        self.convergence_threshold = Some(threshold);
        self
    }

    /// Set the safety cap on outer iterations in robust mode.
    pub fn max_outer_iterations(mut self, cap: usize) -> Self {
        if self.max_outer_iterations.is_some() {
            self.duplicate_param = Some("max_outer_iterations");
        }
        self.max_outer_iterations = Some(cap);
        self
    }

    /// Log every inner iteration at INFO level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        if self.verbose.is_some() {
            self.duplicate_param = Some("verbose");
        }
        self.verbose = Some(verbose);
        self
    }

    /// Include decomposition diagnostics in the result.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom cycle-subseries pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_subseries_pass(mut self, pass: SubseriesPassFn<T>) -> Self {
        self.custom_subseries_pass = Some(pass);
        self
    }

    /// Set the execution backend hint (only for dev)
    #[doc(hidden)]
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration, resolve defaults and build the decomposer.
    pub fn build(self) -> Result<StlDecomposer<T>, StlError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let period = self
            .period
            .ok_or_else(|| StlError::InvalidInput("period is required".to_string()))?;
        Validator::validate_period(period)?;

        let robust = self.robust.unwrap_or(false);

        let ns = self
            .seasonal_bandwidth
            .unwrap_or(Self::DEFAULT_SEASONAL_BANDWIDTH);
        Validator::validate_seasonal_bandwidth(ns)?;

        let nl = self
            .low_pass_bandwidth
            .unwrap_or_else(|| next_odd(period as f64));
        Validator::validate_bandwidth(nl)?;

        let nt = self.trend_bandwidth.unwrap_or_else(|| {
            let p = period as f64;
            next_odd(1.5 * p / (1.0 - 1.5 / ns as f64))
        });
        Validator::validate_bandwidth(nt)?;

        let ni = self
            .inner_iterations
            .unwrap_or(if robust { 1 } else { 2 });
        Validator::validate_iterations(ni, 1)?;

        let no = self
            .outer_iterations
            .unwrap_or(if robust { 15 } else { 0 });
        Validator::validate_iterations(no, 0)?;

        let post_q = self.post_smoothing_bandwidth.unwrap_or(ns);
        Validator::validate_bandwidth(post_q)?;

        let threshold = match self.convergence_threshold {
            Some(t) => t,
            None => T::from(Self::DEFAULT_CONVERGENCE_THRESHOLD).ok_or_else(|| {
                StlError::InvalidInput("default threshold is not representable".to_string())
            })?,
        };
        Validator::validate_threshold(threshold)?;

        let cap = self
            .max_outer_iterations
            .unwrap_or(Self::DEFAULT_MAX_OUTER_ITERATIONS);
        Validator::validate_iterations(cap, 1)?;

        Ok(StlDecomposer {
            config: StlConfig {
                period,
                robust,
                low_pass_bandwidth: nl,
                seasonal_bandwidth: ns,
                trend_bandwidth: nt,
                inner_iterations: ni,
                outer_iterations: no,
                post_smoothing: self.post_smoothing.unwrap_or(false),
                post_smoothing_bandwidth: post_q,
                convergence_threshold: threshold,
                max_outer_iterations: cap,
                verbose: self.verbose.unwrap_or(false),
                return_diagnostics: self.return_diagnostics.unwrap_or(false),
                custom_subseries_pass: self.custom_subseries_pass,
                backend: self.backend,
            },
        })
    }
}

/// Smallest odd integer greater than or equal to `v`.
fn next_odd(v: f64) -> usize {
    let c = v.ceil().max(1.0) as usize;
    if c % 2 == 0 {
        c + 1
    } else {
        c
    }
}

// ============================================================================
// STL Decomposer
// ============================================================================

/// Validated STL configuration, ready to decompose.
#[derive(Debug, Clone)]
pub struct StlDecomposer<T> {
    config: StlConfig<T>,
}

impl<T: Float> StlDecomposer<T> {
    /// Resolved configuration (defaults filled in).
    pub fn config(&self) -> &StlConfig<T> {
        &self.config
    }

    /// Decompose a series into seasonal, trend and remainder components.
    pub fn fit<Y>(&self, values: &Y) -> Result<StlResult<T>, StlError>
    where
        Y: SeriesInput<T> + ?Sized,
    {
        let series = values.to_series()?;
        StlExecutor::run_with_config(&series, &self.config)
    }
}

// ============================================================================
// Functional Form
// ============================================================================

/// Plain-struct options for the functional [`stl`] entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlOptions<T> {
    /// Robust mode.
    pub robust: bool,

    /// Low-pass bandwidth (`None`: smallest odd integer >= period).
    pub low_pass_bandwidth: Option<usize>,

    /// Seasonal bandwidth (odd, >= 7).
    pub seasonal_bandwidth: usize,

    /// Trend bandwidth (`None`: derived from period and seasonal bandwidth).
    pub trend_bandwidth: Option<usize>,

    /// Inner iterations (`None`: 2, or 1 when robust).
    pub inner_iterations: Option<usize>,

    /// Outer iterations (`None`: 0, or 15 when robust).
    pub outer_iterations: Option<usize>,

    /// Post-smooth the seasonal component.
    pub post_smoothing: bool,

    /// Post-smoothing bandwidth (`None`: seasonal bandwidth).
    pub post_smoothing_bandwidth: Option<usize>,

    /// Convergence threshold.
    pub convergence_threshold: T,

    /// Log every inner iteration at INFO level.
    pub verbose: bool,
}

impl<T: Float> Default for StlOptions<T> {
    fn default() -> Self {
        Self {
            robust: false,
            low_pass_bandwidth: None,
            seasonal_bandwidth: StlBuilder::<T>::DEFAULT_SEASONAL_BANDWIDTH,
            trend_bandwidth: None,
            inner_iterations: None,
            outer_iterations: None,
            post_smoothing: false,
            post_smoothing_bandwidth: None,
            convergence_threshold: T::from(StlBuilder::<T>::DEFAULT_CONVERGENCE_THRESHOLD)
                .unwrap_or_else(T::epsilon),
            verbose: false,
        }
    }
}

impl<T: Float> StlOptions<T> {
    /// Translate the options into a builder for `period`.
    pub fn to_builder(&self, period: usize) -> StlBuilder<T> {
        let mut builder = StlBuilder::new()
            .period(period)
            .robust(self.robust)
            .seasonal_bandwidth(self.seasonal_bandwidth)
            .post_smoothing(self.post_smoothing)
            .convergence_threshold(self.convergence_threshold)
            .verbose(self.verbose);

        if let Some(nl) = self.low_pass_bandwidth {
            builder = builder.low_pass_bandwidth(nl);
        }
        if let Some(nt) = self.trend_bandwidth {
            builder = builder.trend_bandwidth(nt);
        }
        if let Some(ni) = self.inner_iterations {
            builder = builder.inner_iterations(ni);
        }
        if let Some(no) = self.outer_iterations {
            builder = builder.outer_iterations(no);
        }
        if let Some(q) = self.post_smoothing_bandwidth {
            builder = builder.post_smoothing_bandwidth(q);
        }
        builder
    }
}

/// Decompose a series (functional form).
pub fn stl<T, Y>(values: &Y, period: usize, options: &StlOptions<T>) -> Result<StlResult<T>, StlError>
where
    T: Float,
    Y: SeriesInput<T> + ?Sized,
{
    options.to_builder(period).build()?.fit(values)
}

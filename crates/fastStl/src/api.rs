//! High-level API for STL decomposition with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for STL with
//! parallel execution. It extends the `stl` builder with a parallel
//! cycle-subseries stage and accepts ndarray input.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `stl` builder pattern.
//! * **Parallel-First**: Defaults to parallel execution when the `cpu` feature is enabled.
//! * **Identical results**: The parallel stage produces the same decomposition as the sequential one.
//!
//! ## Key concepts
//!
//! * **Parallel Support**: Uses `rayon` for the per-phase loess fits.
//! * **Feature-Gated**: Parallelism is configurable via crate features.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ParallelStlBuilder`] via `Stl::new()`.
//! 2. Chain configuration methods (`.period()`, `.robust()`, etc.).
//! 3. Call `.build()` and then `.fit(...)` with a slice, vector or ndarray.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::subseries_pass_parallel;

// External dependencies
use num_traits::Float;
use tracing::debug;

// Export dependencies from stl crate
use stl::internals::api::StlBuilder;

// Internal dependencies
use crate::input::StlInput;

// Publicly re-exported types
pub use stl::internals::api::{
    loess, DecompositionDiagnostics, Interpolation, IterationReport, LoessBuilder, LoessSmoother,
    PolynomialDegree, RegressionModel, StlError, StlResult, StlWarning,
};
pub use stl::internals::primitives::backend::Backend;

// ============================================================================
// Extended STL Builder
// ============================================================================

/// Builder for STL decomposition with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelStlBuilder<T: Float> {
    /// Base builder from the stl crate
    pub base: StlBuilder<T>,

    /// Fan the cycle-subseries fits out across threads (default: true).
    pub parallel: Option<bool>,
}

impl<T: Float> Default for ParallelStlBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelStlBuilder<T> {
    /// Create a new builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from the stl `StlBuilder`
    /// * parallel: true (fastStl extension)
    pub fn new() -> Self {
        Self {
            base: StlBuilder::new(),
            parallel: Some(true),
        }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set the execution backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.base = self.base.backend(backend);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the seasonal period.
    pub fn period(mut self, period: usize) -> Self {
        self.base = self.base.period(period);
        self
    }

    /// Enable robust mode.
    pub fn robust(mut self, robust: bool) -> Self {
        self.base = self.base.robust(robust);
        self
    }

    /// Set the low-pass loess bandwidth.
    pub fn low_pass_bandwidth(mut self, nl: usize) -> Self {
        self.base = self.base.low_pass_bandwidth(nl);
        self
    }

    /// Set the cycle-subseries loess bandwidth.
    pub fn seasonal_bandwidth(mut self, ns: usize) -> Self {
        self.base = self.base.seasonal_bandwidth(ns);
        self
    }

    /// Set the trend loess bandwidth.
    pub fn trend_bandwidth(mut self, nt: usize) -> Self {
        self.base = self.base.trend_bandwidth(nt);
        self
    }

    /// Set the number of inner iterations.
    pub fn inner_iterations(mut self, ni: usize) -> Self {
        self.base = self.base.inner_iterations(ni);
        self
    }

    /// Set the number of outer iterations.
    pub fn outer_iterations(mut self, no: usize) -> Self {
        self.base = self.base.outer_iterations(no);
        self
    }

    /// Enable quadratic post-smoothing of the seasonal component.
    pub fn post_smoothing(mut self, enabled: bool) -> Self {
        self.base = self.base.post_smoothing(enabled);
        self
    }

    /// Set the post-smoothing bandwidth.
    pub fn post_smoothing_bandwidth(mut self, bandwidth: usize) -> Self {
        self.base = self.base.post_smoothing_bandwidth(bandwidth);
        self
    }

    /// Set the convergence threshold.
    pub fn convergence_threshold(mut self, threshold: T) -> Self {
        self.base = self.base.convergence_threshold(threshold);
        self
    }

    /// Set the safety cap on outer iterations in robust mode.
    pub fn max_outer_iterations(mut self, cap: usize) -> Self {
        self.base = self.base.max_outer_iterations(cap);
        self
    }

    /// Log every inner iteration at INFO level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.base = self.base.verbose(verbose);
        self
    }

    /// Include decomposition diagnostics in the result.
    pub fn return_diagnostics(mut self) -> Self {
        self.base = self.base.return_diagnostics();
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the parallel decomposer.
    pub fn build(self) -> Result<ParallelStl<T>, StlError> {
        // Validate by attempting to build the base decomposer
        let _ = self.base.clone().build()?;

        Ok(ParallelStl { config: self })
    }
}

// ============================================================================
// Extended STL Decomposer
// ============================================================================

/// STL decomposer with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelStl<T: Float> {
    config: ParallelStlBuilder<T>,
}

impl<T: Float + Send + Sync + 'static> ParallelStl<T> {
    /// Decompose a series into seasonal, trend and remainder components.
    pub fn fit<I>(&self, values: &I) -> Result<StlResult<T>, StlError>
    where
        I: StlInput<T> + ?Sized,
    {
        let series = values.to_stl_series()?;

        // Configure the base builder with the parallel pass if enabled
        let mut builder = self.config.base.clone();
        match builder.backend.unwrap_or_default() {
            Backend::CPU => {
                #[cfg(feature = "cpu")]
                {
                    if self.config.parallel.unwrap_or(true) {
                        builder = builder.custom_subseries_pass(subseries_pass_parallel);
                    } else {
                        builder.custom_subseries_pass = None;
                    }
                }
                #[cfg(not(feature = "cpu"))]
                {
                    // Fallback to sequential if cpu feature is disabled
                    builder.custom_subseries_pass = None;
                }
            }
            Backend::GPU => {
                return Err(StlError::UnsupportedFeature {
                    adapter: "Stl",
                    feature: "GPU backend",
                });
            }
        }
        debug!(
            parallel = builder.custom_subseries_pass.is_some(),
            points = series.len(),
            "running stl decomposition"
        );

        // Delegate execution to the base implementation
        builder.build()?.fit(&series)
    }
}

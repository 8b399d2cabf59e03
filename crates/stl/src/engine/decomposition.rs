//! Execution engine for seasonal-trend decomposition.
//!
//! ## Purpose
//!
//! This module runs the STL inner/outer loop. Each inner iteration detrends
//! the series, smooths every cycle-subseries, removes low-frequency drift
//! with the low-pass stage, deseasonalises and smooths the trend. Each outer
//! iteration computes the remainder and, in the robust phase, recomputes the
//! robustness weights.
//!
//! ## Design notes
//!
//! * **Explicit state**: Components, weights and convergence flags live in a
//!   `DecompositionState`; every stage reads it and returns fresh vectors.
//! * **Hook**: The cycle-subseries stage can be replaced through `SubseriesPassFn`
//!   (used by extension crates to fan the per-phase fits out across threads).
//! * **Safety cap**: Robust mode runs at most `max_outer_iterations` outer passes, whatever `no` is.
//! * **Logging**: One `tracing` event per inner iteration (INFO when verbose, TRACE otherwise).
//!
//! ## Key concepts
//!
//! * **Cycle-subseries**: Observations sharing a phase, smoothed independently and
//!   extended by one period on each side.
//! * **Low-pass**: Moving averages of length `period`, `period`, 3, then a linear loess.
//! * **Convergence ratio**: `max|new - old| / (max old - min old)` over present positions. The
//!   seasonal ratio compares the detrended series with the previous seasonal component.
//!
//! ## Invariants
//!
//! * All component vectors have length N; the extended cycle series has length N + 2·period.
//! * Robustness weights are in [0, 1].
//! * The outer and inner loops are strictly sequential.
//!
//! ## Non-goals
//!
//! * This module does not validate builder parameters (handled by the API layer).
//! * This module does not parallelise anything itself.

// External dependencies
use num_traits::Float;
use tracing::{info, trace, warn};

// Internal dependencies
use crate::algorithms::regression::PolynomialDegree;
use crate::algorithms::robustness::apply_robustness_weights;
use crate::engine::executor::{LoessConfig, LoessExecutor};
use crate::engine::output::{IterationReport, StlResult};
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::DecompositionDiagnostics;
use crate::math::filter::low_pass_cascade;
use crate::math::scaling::masked_range;
use crate::primitives::backend::Backend;
use crate::primitives::errors::{StlError, StlWarning};
use crate::primitives::series::subtract_present;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom cycle-subseries pass function
#[doc(hidden)]
pub type SubseriesPassFn<T> = fn(
    &[Option<T>], // detrended series
    &[T],         // robustness weights
    usize,        // period
    usize,        // seasonal bandwidth
) -> Result<Vec<T>, StlError>; // extended cycle series (N + 2 * period)

// ============================================================================
// Configuration
// ============================================================================

/// Resolved configuration for an STL run.
#[derive(Debug, Clone)]
pub struct StlConfig<T> {
    /// Seasonal period.
    pub period: usize,

    /// Run the outer loop until convergence (bounded by the safety cap).
    pub robust: bool,

    /// Low-pass loess bandwidth (`nl`).
    pub low_pass_bandwidth: usize,

    /// Cycle-subseries loess bandwidth (`ns`).
    pub seasonal_bandwidth: usize,

    /// Trend loess bandwidth (`nt`).
    pub trend_bandwidth: usize,

    /// Inner iterations per outer iteration (`ni`).
    pub inner_iterations: usize,

    /// Outer iterations with robustness reweighting (`no`).
    pub outer_iterations: usize,

    /// Smooth the final seasonal component with a quadratic loess.
    pub post_smoothing: bool,

    /// Post-smoothing bandwidth.
    pub post_smoothing_bandwidth: usize,

    /// Convergence threshold for the seasonal and trend ratios.
    pub convergence_threshold: T,

    /// Safety cap on outer iterations in robust mode.
    pub max_outer_iterations: usize,

    /// Log every inner iteration at INFO level.
    pub verbose: bool,

    /// Attach decomposition diagnostics to the result.
    pub return_diagnostics: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom cycle-subseries pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_subseries_pass: Option<SubseriesPassFn<T>>,

    /// Execution backend hint.
    #[doc(hidden)]
    pub backend: Option<Backend>,
}

// ============================================================================
// Decomposition State
// ============================================================================

/// Mutable state carried through the inner and outer loops.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionState<T> {
    /// Current seasonal component.
    pub seasonal: Vec<T>,

    /// Current trend component.
    pub trend: Vec<T>,

    /// Current remainder (`None` where the input is missing).
    pub remainder: Vec<Option<T>>,

    /// Current robustness weights.
    pub robustness_weights: Vec<T>,

    /// Outer iteration counter.
    pub outer_iteration: usize,

    /// Whether the last seasonal ratio was below the threshold.
    pub seasonal_converged: bool,

    /// Whether the last trend ratio was below the threshold.
    pub trend_converged: bool,
}

impl<T: Float> DecompositionState<T> {
    /// Initial state: zero components, unit weights.
    pub fn new(n: usize) -> Self {
        Self {
            seasonal: vec![T::zero(); n],
            trend: vec![T::zero(); n],
            remainder: vec![None; n],
            robustness_weights: vec![T::one(); n],
            outer_iteration: 0,
            seasonal_converged: false,
            trend_converged: false,
        }
    }

    /// Check if both components converged.
    #[inline]
    pub fn converged(&self) -> bool {
        self.seasonal_converged && self.trend_converged
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Execution engine for STL decomposition.
pub struct StlExecutor;

impl StlExecutor {
    /// Decompose `values` into seasonal, trend and remainder components.
    pub fn run_with_config<T: Float>(
        values: &[Option<T>],
        config: &StlConfig<T>,
    ) -> Result<StlResult<T>, StlError> {
        let n = values.len();
        let period = config.period;

        Validator::validate_any_present(values)?;
        Self::validate_subseries(values, period)?;

        let mask: Vec<bool> = values.iter().map(Option::is_some).collect();
        let mut state = DecompositionState::new(n);
        let mut history = Vec::new();

        loop {
            for inner in 0..config.inner_iterations {
                let report = Self::inner_iteration(values, &mask, &mut state, config)?;
                let report = IterationReport { inner, ..report };
                Self::log_iteration(&report, config.verbose);
                history.push(report);

                if state.converged() {
                    break;
                }
            }

            state.remainder = Self::remainder(values, &state.seasonal, &state.trend);

            if state.converged() {
                break;
            }

            if state.outer_iteration > 0 && state.outer_iteration <= config.outer_iterations {
                apply_robustness_weights(&state.remainder, &mut state.robustness_weights);
            }
            state.outer_iteration += 1;

            let it = state.outer_iteration;
            let keep_going = if config.robust {
                it < config.max_outer_iterations
            } else {
                it <= config.outer_iterations
            };
            if !keep_going {
                break;
            }
        }

        if config.post_smoothing {
            state.seasonal = Self::post_smooth(&state.seasonal, config.post_smoothing_bandwidth)?;
            state.remainder = Self::remainder(values, &state.seasonal, &state.trend);
        }

        let mut warnings = Vec::new();
        if !state.converged() {
            let warning = StlWarning::NonConvergence {
                seasonal_converged: state.seasonal_converged,
                trend_converged: state.trend_converged,
                outer_iterations: state.outer_iteration,
            };
            warn!(
                seasonal_converged = state.seasonal_converged,
                trend_converged = state.trend_converged,
                outer_iterations = state.outer_iteration,
                "{}",
                warning
            );
            warnings.push(warning);
        }

        let diagnostics = if config.return_diagnostics {
            Some(DecompositionDiagnostics::compute(
                &state.seasonal,
                &state.trend,
                &state.remainder,
            ))
        } else {
            None
        };

        Ok(StlResult {
            seasonal: state.seasonal,
            trend: state.trend,
            remainder: state.remainder,
            robustness_weights: state.robustness_weights,
            period,
            outer_iterations: state.outer_iteration,
            seasonal_converged: state.seasonal_converged,
            trend_converged: state.trend_converged,
            history,
            warnings,
            diagnostics,
        })
    }

    // ========================================================================
    // Main Algorithmic Logic
    // ========================================================================

    /// Perform one inner iteration, updating components and convergence flags.
    pub fn inner_iteration<T: Float>(
        values: &[Option<T>],
        mask: &[bool],
        state: &mut DecompositionState<T>,
        config: &StlConfig<T>,
    ) -> Result<IterationReport<T>, StlError> {
        let threshold = config.convergence_threshold;

        // Step 1: Detrend
        let detrended = subtract_present(values, &state.trend);

        // Step 2: Seasonal convergence of the detrended series against the previous seasonal
        let detrended_values: Vec<T> = detrended
            .iter()
            .map(|v| v.unwrap_or_else(T::zero))
            .collect();
        let seasonal_ratio = Self::convergence_ratio(&detrended_values, &state.seasonal, mask);
        state.seasonal_converged = seasonal_ratio < threshold;

        // Steps 3-5: Cycle-subseries, low-pass, seasonal
        state.seasonal = Self::seasonal_stage(&detrended, &state.robustness_weights, config)?;

        // Steps 6-8: Deseasonalise and smooth the trend
        let deseasonalized = subtract_present(values, &state.seasonal);
        let trend = Self::trend_stage(
            &deseasonalized,
            &state.robustness_weights,
            config.trend_bandwidth,
        )?;
        let trend_ratio = Self::convergence_ratio(&trend, &state.trend, mask);
        state.trend_converged = trend_ratio < threshold;
        state.trend = trend;

        Ok(IterationReport {
            outer: state.outer_iteration,
            inner: 0,
            seasonal_ratio,
            trend_ratio,
        })
    }

    /// Compute the seasonal component from a detrended series.
    pub fn seasonal_stage<T: Float>(
        detrended: &[Option<T>],
        weights: &[T],
        config: &StlConfig<T>,
    ) -> Result<Vec<T>, StlError> {
        let n = detrended.len();
        let period = config.period;

        let cycle = match config.custom_subseries_pass {
            Some(callback) => callback(detrended, weights, period, config.seasonal_bandwidth)?,
            None => Self::subseries_pass(detrended, weights, period, config.seasonal_bandwidth)?,
        };
        if cycle.len() != n + 2 * period {
            return Err(StlError::InvalidInput(format!(
                "cycle-subseries pass returned {} values, expected {}",
                cycle.len(),
                n + 2 * period
            )));
        }

        let low_pass = Self::low_pass(&cycle, period, config.low_pass_bandwidth)?;

        Ok(cycle[period..period + n]
            .iter()
            .zip(low_pass.iter())
            .map(|(&c, &l)| c - l)
            .collect())
    }

    /// Smooth every cycle-subseries sequentially into the extended cycle series.
    pub fn subseries_pass<T: Float>(
        detrended: &[Option<T>],
        weights: &[T],
        period: usize,
        seasonal_bandwidth: usize,
    ) -> Result<Vec<T>, StlError> {
        let mut cycle = vec![T::zero(); detrended.len() + 2 * period];
        for phase in 0..period {
            let fitted =
                Self::smooth_cycle_subseries(detrended, weights, period, seasonal_bandwidth, phase)?;
            Self::scatter_subseries(&mut cycle, &fitted, period, phase);
        }
        Ok(cycle)
    }

    /// Fit one cycle-subseries and evaluate it on its extended lattice.
    ///
    /// Returns the values at positions `phase - period, phase, phase + period, ...,
    /// last + period`, where `last` is the final position of the phase inside the series.
    pub fn smooth_cycle_subseries<T: Float>(
        detrended: &[Option<T>],
        weights: &[T],
        period: usize,
        seasonal_bandwidth: usize,
        phase: usize,
    ) -> Result<Vec<T>, StlError> {
        let n = detrended.len();
        let indices: Vec<usize> = (phase..n).step_by(period).collect();
        let (first, last) = match (indices.first(), indices.last()) {
            (Some(&f), Some(&l)) => (f, l),
            _ => return Err(StlError::EmptySubseries { phase }),
        };

        let x: Vec<T> = indices.iter().map(|&j| Self::position(j)).collect();
        let y: Vec<Option<T>> = indices.iter().map(|&j| detrended[j]).collect();
        let rho: Vec<T> = indices.iter().map(|&j| weights[j]).collect();
        if y.iter().all(Option::is_none) {
            return Err(StlError::EmptySubseries { phase });
        }

        let step: T = Self::position(period);
        let before = Self::position::<T>(first) - step;
        let after = Self::position::<T>(last) + step;
        let extra = [before, after];

        let model = LoessExecutor::run_with_config(
            &x,
            &y,
            &LoessConfig {
                degree: PolynomialDegree::Linear,
                bandwidth: Some(seasonal_bandwidth),
                rho: Some(&rho),
                exact: &[],
                extra: &extra,
            },
        )?;

        let mut fitted = Vec::with_capacity(indices.len() + 2);
        fitted.push(model.predict(before));
        fitted.extend(x.iter().map(|&xi| model.predict(xi)));
        fitted.push(model.predict(after));
        Ok(fitted)
    }

    /// Write a fitted cycle-subseries into the extended cycle series.
    #[inline]
    pub fn scatter_subseries<T: Float>(cycle: &mut [T], fitted: &[T], period: usize, phase: usize) {
        for (k, &v) in fitted.iter().enumerate() {
            cycle[phase + k * period] = v;
        }
    }

    /// Low-pass filter the extended cycle series down to length N.
    pub fn low_pass<T: Float>(
        cycle: &[T],
        period: usize,
        bandwidth: usize,
    ) -> Result<Vec<T>, StlError> {
        let filtered = low_pass_cascade(cycle, period);
        let x = Self::positions(filtered.len());
        let y: Vec<Option<T>> = filtered.into_iter().map(Some).collect();

        let model = LoessExecutor::run_with_config(
            &x,
            &y,
            &LoessConfig {
                degree: PolynomialDegree::Linear,
                bandwidth: Some(bandwidth),
                ..LoessConfig::default()
            },
        )?;
        Ok(model.predict_many(&x))
    }

    /// Smooth the deseasonalised series into the trend component.
    pub fn trend_stage<T: Float>(
        deseasonalized: &[Option<T>],
        weights: &[T],
        bandwidth: usize,
    ) -> Result<Vec<T>, StlError> {
        let x = Self::positions(deseasonalized.len());
        let model = LoessExecutor::run_with_config(
            &x,
            deseasonalized,
            &LoessConfig {
                degree: PolynomialDegree::Linear,
                bandwidth: Some(bandwidth),
                rho: Some(weights),
                ..LoessConfig::default()
            },
        )?;
        Ok(model.predict_many(&x))
    }

    /// Smooth the final seasonal component with a quadratic loess, exact at every index.
    pub fn post_smooth<T: Float>(seasonal: &[T], bandwidth: usize) -> Result<Vec<T>, StlError> {
        let x = Self::positions(seasonal.len());
        let y: Vec<Option<T>> = seasonal.iter().copied().map(Some).collect();
        let model = LoessExecutor::run_with_config(
            &x,
            &y,
            &LoessConfig {
                degree: PolynomialDegree::Quadratic,
                bandwidth: Some(bandwidth),
                exact: &x,
                ..LoessConfig::default()
            },
        )?;
        Ok(model.predict_many(&x))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Remainder `Y - T - S` at present positions.
    pub fn remainder<T: Float>(values: &[Option<T>], seasonal: &[T], trend: &[T]) -> Vec<Option<T>> {
        values
            .iter()
            .zip(seasonal.iter().zip(trend.iter()))
            .map(|(v, (&s, &t))| v.map(|v| v - t - s))
            .collect()
    }

    /// Relative change between successive estimates over present positions.
    ///
    /// Zero when nothing changed; infinite when the previous estimate is flat
    /// but something changed.
    pub fn convergence_ratio<T: Float>(current: &[T], previous: &[T], mask: &[bool]) -> T {
        let max_change = current
            .iter()
            .zip(previous.iter())
            .zip(mask.iter())
            .filter(|(_, &present)| present)
            .fold(T::zero(), |maxv, ((&c, &p), _)| maxv.max((c - p).abs()));

        if max_change <= T::zero() {
            return T::zero();
        }

        match masked_range(previous, mask) {
            Some((lo, hi)) if hi > lo => max_change / (hi - lo),
            _ => T::infinity(),
        }
    }

    /// Reject series with a phase that has no present value.
    fn validate_subseries<T>(values: &[Option<T>], period: usize) -> Result<(), StlError> {
        for phase in 0..period {
            if values.iter().skip(phase).step_by(period).all(Option::is_none) {
                return Err(StlError::EmptySubseries { phase });
            }
        }
        Ok(())
    }

    fn log_iteration<T: Float>(report: &IterationReport<T>, verbose: bool) {
        let seasonal_ratio = report.seasonal_ratio.to_f64().unwrap_or(f64::NAN);
        let trend_ratio = report.trend_ratio.to_f64().unwrap_or(f64::NAN);
        if verbose {
            info!(
                outer = report.outer,
                inner = report.inner,
                seasonal_ratio,
                trend_ratio,
                "stl iteration"
            );
        } else {
            trace!(
                outer = report.outer,
                inner = report.inner,
                seasonal_ratio,
                trend_ratio,
                "stl iteration"
            );
        }
    }

    #[inline]
    fn position<T: Float>(i: usize) -> T {
        T::from(i).unwrap_or_else(T::zero)
    }

    #[inline]
    fn positions<T: Float>(n: usize) -> Vec<T> {
        (0..n).map(Self::position).collect()
    }
}

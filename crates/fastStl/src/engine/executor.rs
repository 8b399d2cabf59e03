//! Parallel execution engine for the cycle-subseries stage.
//!
//! ## Purpose
//!
//! This module provides the parallel cycle-subseries pass that is injected
//! into the `stl` crate's decomposition engine. The `period` subseries fits
//! of each inner iteration share no data, so they are fanned out across CPU
//! cores and gathered back into the extended cycle series.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential subseries pass.
//! * **Parallelism**: Uses `rayon` for data-parallel execution over phases.
//! * **Determinism**: Every phase writes a disjoint set of positions, so the
//!   result is identical to the sequential pass regardless of scheduling.
//!
//! ## Key concepts
//!
//! * **Fan-out**: One task per phase, each running a full loess fit.
//! * **Fan-in**: Fitted subseries are scattered into the extended cycle series in phase order.
//! * **Integration**: Plugs into the `stl` executor via the `SubseriesPassFn` hook.
//!
//! ## Invariants
//!
//! * The returned cycle series has length N + 2·period.
//! * Any failing phase aborts the whole pass with that phase's error.
//!
//! ## Non-goals
//!
//! * This module does not parallelise the inner or outer loops (they are sequential).
//! * This module does not validate input data (handled by `validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from stl crate
use stl::internals::engine::decomposition::StlExecutor;
use stl::internals::primitives::errors::StlError;

// ============================================================================
// Parallel Subseries Pass
// ============================================================================

/// Smooth every cycle-subseries in parallel into the extended cycle series.
#[cfg(feature = "cpu")]
pub fn subseries_pass_parallel<T>(
    detrended: &[Option<T>],
    weights: &[T],
    period: usize,
    seasonal_bandwidth: usize,
) -> Result<Vec<T>, StlError>
where
    T: Float + Send + Sync,
{
    let fitted: Vec<Vec<T>> = (0..period)
        .into_par_iter()
        .map(|phase| {
            StlExecutor::smooth_cycle_subseries(
                detrended,
                weights,
                period,
                seasonal_bandwidth,
                phase,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut cycle = vec![T::zero(); detrended.len() + 2 * period];
    for (phase, values) in fitted.iter().enumerate() {
        StlExecutor::scatter_subseries(&mut cycle, values, period, phase);
    }
    Ok(cycle)
}

//! Execution backend configuration for extension crates.
//!
//! ## Purpose
//!
//! This module defines the `Backend` enum used by extension crates (like `fastStl`)
//! to select how the cycle-subseries stage is executed. The core `stl` crate
//! always runs sequentially; the hint is carried through its configuration
//! for downstream crates to act on.
//!
//! ## Invariants
//!
//! * The default backend is always `CPU`.
//!
//! ## Non-goals
//!
//! * This module does not provide GPU implementations.

/// Execution backend hint for extension crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::upper_case_acronyms)]
pub enum Backend {
    /// CPU execution (may still use parallelism via rayon).
    #[default]
    CPU,

    /// GPU execution (not available for decomposition).
    GPU,
}

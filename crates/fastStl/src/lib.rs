//! # fastStl — Parallel STL decomposition for Rust
//!
//! A multi-threaded extension of the [`stl`] crate. The decomposition is the
//! same; the `period` independent cycle-subseries fits of every inner
//! iteration run on all available cores via `rayon`, and series can be passed
//! in and taken out as `ndarray` arrays.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastStl::prelude::*;
//! use ndarray::Array1;
//!
//! let values: Array1<f64> = (0..96)
//!     .map(|i| (i % 12) as f64 + 0.02 * i as f64)
//!     .collect();
//!
//! let result = Stl::new()
//!     .period(12)
//!     .parallel(true)
//!     .build()?
//!     .fit(&values)?;
//!
//! let matrix = result.to_array2(); // N×3: seasonal, trend, remainder
//! assert_eq!(matrix.dim(), (96, 3));
//! # Result::<(), StlError>::Ok(())
//! ```
//!
//! ## Features
//!
//! * `cpu` (default): parallel cycle-subseries smoothing via `rayon`. Without
//!   it the decomposition runs sequentially.
//!
//! The GPU backend is not available for decomposition and is rejected with
//! `StlError::UnsupportedFeature`.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel execution.
mod engine;

// High-level fluent API for parallel STL.
mod api;

// Input data handling.
mod input;

// ndarray views of results.
mod output;

// Standard fastStl prelude.
pub mod prelude {
    pub use crate::api::{
        loess,
        Backend::{CPU, GPU},
        DecompositionDiagnostics, Interpolation, IterationReport, LoessBuilder as Loess,
        LoessSmoother, ParallelStl, ParallelStlBuilder as Stl,
        PolynomialDegree::{Auto, Linear, Quadratic},
        RegressionModel, StlError, StlResult, StlWarning,
    };
    pub use crate::input::StlInput;
    pub use crate::output::StlResultExt;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
    pub mod output {
        pub use crate::output::*;
    }
}

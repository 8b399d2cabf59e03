//! # STL — Seasonal-Trend decomposition using Loess for Rust
//!
//! A robust implementation of STL (Cleveland et al., 1990) together with the
//! local weighted regression (loess) engine it is built on.
//!
//! ## What is STL?
//!
//! STL splits a regularly sampled series into three additive components:
//! a **seasonal** component with a fixed period, a slowly varying **trend**,
//! and a **remainder**. Each component is estimated by repeated loess
//! smoothing: cycle-subseries smoothing for the seasonal part, a low-pass
//! filter to keep trend drift out of it, and a final trend smoother. An
//! optional robust phase downweights outliers with bisquare weights.
//!
//! ## What is loess?
//!
//! Loess fits, at every query position, a weighted polynomial of degree 1 or
//! 2 to the `q` nearest observations using tricube distance weights. This
//! crate solves the local fit exactly on a grid of knots and interpolates
//! between them, so a fitted model can be queried at any real position.
//!
//! ## Quick Start
//!
//! ### Decomposition
//!
//! ```rust
//! use stl::prelude::*;
//!
//! // Four years of monthly data
//! let values: Vec<f64> = (0..48)
//!     .map(|i| {
//!         let t = i as f64;
//!         0.1 * t + (2.0 * std::f64::consts::PI * t / 12.0).sin()
//!     })
//!     .collect();
//!
//! let decomposer = Stl::new()
//!     .period(12)
//!     .seasonal_bandwidth(7)
//!     .build()?;
//!
//! let result = decomposer.fit(&values)?;
//!
//! assert_eq!(result.len(), 48);
//! println!("{}", result);
//! # Result::<(), StlError>::Ok(())
//! ```
//!
//! ### Robust decomposition with missing values
//!
//! ```rust
//! use stl::prelude::*;
//!
//! let mut values: Vec<Option<f64>> = (0..60)
//!     .map(|i| Some((i % 6) as f64 + 0.05 * i as f64))
//!     .collect();
//! values[17] = None;
//! values[30] = Some(40.0); // outlier
//!
//! let result = Stl::<f64>::new()
//!     .period(6)
//!     .robust(true)
//!     .return_diagnostics()
//!     .build()?
//!     .fit(&values)?;
//!
//! // No remainder where the input is missing
//! assert!(result.remainder[17].is_none());
//! // Robustness weights stay in [0, 1]
//! assert!(result.robustness_weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
//! # Result::<(), StlError>::Ok(())
//! ```
//!
//! ### Loess smoothing
//!
//! ```rust
//! use stl::prelude::*;
//!
//! let x: Vec<f64> = (0..20).map(|i| i as f64).collect();
//! let y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 1.0).collect();
//!
//! let model = Loess::new()
//!     .degree(Linear)
//!     .bandwidth(7)
//!     .build()?
//!     .fit(&x, &y)?;
//!
//! // A line is reproduced exactly, between and beyond the data
//! assert!((model.predict(3.5) - 8.0).abs() < 1e-9);
//! assert!((model.predict(25.0) - 51.0).abs() < 1e-9);
//! # Result::<(), StlError>::Ok(())
//! ```
//!
//! ### Functional form
//!
//! ```rust
//! use stl::prelude::*;
//!
//! let values: Vec<f64> = (0..24).map(|i| (i % 4) as f64).collect();
//! let result = stl(&values, 4, &StlOptions::default())?;
//!
//! let matrix = result.to_matrix(); // rows of [seasonal, trend, remainder]
//! assert_eq!(matrix.len(), 24);
//! # Result::<(), StlError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! `fit` returns `Result<StlResult<T>, StlError>` (or
//! `Result<RegressionModel<T>, StlError>` for loess). Invalid parameters are
//! rejected by `.build()`; data problems (all missing, an empty
//! cycle-subseries, non-finite support) are rejected by `.fit()` before any
//! smoothing starts. Non-convergence is not an error: it is reported in
//! `StlResult::warnings` and logged through `tracing`.
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber. Every
//! inner iteration is logged at TRACE level (INFO with `.verbose(true)`);
//! non-convergence is logged at WARN.
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Cleveland, R. B., Cleveland, W. S., McRae, J. E., Terpenning, I. (1990). "STL: A
//!   Seasonal-Trend Decomposition Procedure Based on Loess"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - core loess algorithms.
mod algorithms;

// Layer 4: Evaluation - post-processing and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for loess and STL.
mod api;

// Standard STL prelude.
pub mod prelude {
    pub use crate::api::{
        loess, stl, DecompositionDiagnostics, Interpolation, IterationReport, LoessBuilder as Loess,
        LoessSmoother, PolynomialDegree::Auto, PolynomialDegree::Linear,
        PolynomialDegree::Quadratic, RegressionModel, SeriesInput, StlBuilder as Stl,
        StlDecomposer, StlError, StlOptions, StlResult, StlWarning,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}

//! Layer 3: Algorithms
//!
//! This layer provides the core loess and STL building blocks:
//! local regression at a point, knot interpolation, order estimation
//! and robustness reweighting.

// Local polynomial regression at a query point.
pub mod regression;

// Piecewise-polynomial interpolation over knot tables.
pub mod interpolation;

// Polynomial order estimation.
pub mod order;

// Robustness weights for the STL outer loop.
pub mod robustness;

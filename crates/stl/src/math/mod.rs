//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout loess and STL:
//! - Tricube kernel and nearest-neighbour weighting
//! - Robust scale estimation and summary statistics
//! - Moving-average filtering
//! - Local normal-equation solving
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Kernel (weight) functions and neighbourhood selection.
pub mod kernel;

/// Robust scale estimation (MAR/MAD) and summary statistics.
pub mod scaling;

/// Moving-average filtering.
pub mod filter;

/// Normal-equation solver for local polynomial fits.
pub mod linalg;

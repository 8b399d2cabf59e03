//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates loess fits and the STL decomposition by
//! coordinating primitives, math and algorithms. It provides the knot
//! planner, the inner/outer decomposition loop and convergence detection.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Execution engine for loess fits.
pub mod executor;

/// Execution engine for STL decomposition.
pub mod decomposition;

/// Validation utilities.
pub mod validator;

/// Output types for loess and STL operations.
pub mod output;

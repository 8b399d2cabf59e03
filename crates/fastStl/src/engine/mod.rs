//! Layer 5: Engine
//!
//! This layer provides the parallel execution engine for STL decomposition.
//! It distributes the independent cycle-subseries fits across CPU cores.

// Parallel execution engine using CPU threads
pub mod executor;

//! Layer 4: Evaluation
//!
//! This layer provides post-processing of finished decompositions:
//! strength and remainder-scale diagnostics.

// Decomposition diagnostics.
pub mod diagnostics;

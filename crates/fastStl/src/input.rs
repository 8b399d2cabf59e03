//! Input abstractions for parallel STL decomposition.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for STL inputs, allowing the
//! `fit` method to process multiple data formats (slices, vectors, optional
//! vectors, ndarray) through a single interface.
//!
//! ## Design notes
//!
//! * **Missing values**: `NaN` entries and `None` entries are both treated as missing.
//! * **Interoperability**: Bridges standard Rust collections with ndarray.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected before processing.
//!
//! ## Key concepts
//!
//! * **StlInput Trait**: Normalises a container into one optional value per position.
//!
//! ## Invariants
//!
//! * The normalised series has exactly as many entries as the container.
//! * Infinite values are rejected.
//!
//! ## Non-goals
//!
//! * This module does not impute missing values.
//! * This module does not handle multi-dimensional input.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Export dependencies from stl crate
use stl::internals::primitives::errors::StlError;
use stl::internals::primitives::series::SeriesInput;

/// Trait for types that can be used as input for STL decomposition.
pub trait StlInput<T: Float> {
    /// Convert the input to one optional value per position.
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError>;
}

impl<T: Float> StlInput<T> for [T] {
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.to_series()
    }
}

impl<T: Float> StlInput<T> for Vec<T> {
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.to_series()
    }
}

impl<T: Float> StlInput<T> for [Option<T>] {
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.to_series()
    }
}

impl<T: Float> StlInput<T> for Vec<Option<T>> {
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.to_series()
    }
}

impl<T: Float, S> StlInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn to_stl_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.as_slice()
            .ok_or_else(|| {
                StlError::InvalidInput("ndarray input must be contiguous in memory".to_string())
            })?
            .to_series()
    }
}

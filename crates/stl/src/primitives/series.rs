//! Series input abstraction and missing-value model.
//!
//! ## Purpose
//!
//! This module lets the `fit` methods accept several value containers through
//! a single interface and normalises them to `Vec<Option<T>>`, where `None`
//! marks a missing observation.
//!
//! ## Design notes
//!
//! * **Plain floats**: `NaN` in a `[T]`/`Vec<T>` input is read as missing.
//! * **Explicit options**: `[Option<T>]`/`Vec<Option<T>>` carry missingness directly.
//! * **Rejection**: Infinite values are never accepted as data.
//!
//! ## Invariants
//!
//! * The normalised series has the same length as the input container.
//! * Every `Some` entry of a normalised series is finite.
//!
//! ## Non-goals
//!
//! * This module does not impute missing values.
//! * This module does not check that at least one value is present.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::StlError;

// ============================================================================
// Input Trait
// ============================================================================

/// Trait for containers that can be used as a (possibly gappy) series.
pub trait SeriesInput<T: Float> {
    /// Normalise the container to one optional value per position.
    fn to_series(&self) -> Result<Vec<Option<T>>, StlError>;
}

impl<T: Float> SeriesInput<T> for [T] {
    fn to_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.iter()
            .enumerate()
            .map(|(i, &v)| classify(i, Some(v)))
            .collect()
    }
}

impl<T: Float> SeriesInput<T> for Vec<T> {
    fn to_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.as_slice().to_series()
    }
}

impl<T: Float> SeriesInput<T> for [Option<T>] {
    fn to_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.iter()
            .enumerate()
            .map(|(i, &v)| classify(i, v))
            .collect()
    }
}

impl<T: Float> SeriesInput<T> for Vec<Option<T>> {
    fn to_series(&self) -> Result<Vec<Option<T>>, StlError> {
        self.as_slice().to_series()
    }
}

// Map a raw entry onto the missing-value model.
#[inline]
fn classify<T: Float>(i: usize, v: Option<T>) -> Result<Option<T>, StlError> {
    match v {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if v.is_infinite() => Err(StlError::InvalidNumericValue(format!(
            "y[{}]={}",
            i,
            v.to_f64().unwrap_or(f64::INFINITY)
        ))),
        other => Ok(other),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Number of present (non-missing) values.
#[inline]
pub fn present_count<T>(values: &[Option<T>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}

/// Elementwise difference `a - b`, missing wherever `a` is missing.
#[inline]
pub fn subtract_present<T: Float>(a: &[Option<T>], b: &[T]) -> Vec<Option<T>> {
    a.iter()
        .zip(b.iter())
        .map(|(&ai, &bi)| ai.map(|v| v - bi))
        .collect()
}

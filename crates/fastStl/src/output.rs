//! ndarray views of decomposition results.
//!
//! ## Purpose
//!
//! This module converts an `StlResult` into ndarray containers so that the
//! decomposition can flow into array-based numerical code without manual
//! copying.
//!
//! ## Invariants
//!
//! * The matrix has one row per observation and columns `[seasonal, trend, remainder]`.
//! * Missing remainders become `NaN`.

// External dependencies
use ndarray::{Array1, Array2};
use num_traits::Float;

// Export dependencies from stl crate
use stl::internals::engine::output::StlResult;

/// ndarray conversions for [`StlResult`].
pub trait StlResultExt<T> {
    /// N×3 matrix of `[seasonal, trend, remainder]` rows.
    fn to_array2(&self) -> Array2<T>;

    /// Seasonal component as an array.
    fn seasonal_array(&self) -> Array1<T>;

    /// Trend component as an array.
    fn trend_array(&self) -> Array1<T>;

    /// Remainder as an array (`NaN` where the input is missing).
    fn remainder_array(&self) -> Array1<T>;
}

impl<T: Float> StlResultExt<T> for StlResult<T> {
    fn to_array2(&self) -> Array2<T> {
        let n = self.len();
        Array2::from_shape_fn((n, 3), |(i, j)| match j {
            0 => self.seasonal[i],
            1 => self.trend[i],
            _ => self.remainder[i].unwrap_or_else(T::nan),
        })
    }

    fn seasonal_array(&self) -> Array1<T> {
        Array1::from_vec(self.seasonal.clone())
    }

    fn trend_array(&self) -> Array1<T> {
        Array1::from_vec(self.trend.clone())
    }

    fn remainder_array(&self) -> Array1<T> {
        self.remainder
            .iter()
            .map(|r| r.unwrap_or_else(T::nan))
            .collect()
    }
}

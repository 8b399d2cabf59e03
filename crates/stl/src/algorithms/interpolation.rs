//! Piecewise-polynomial interpolation over a knot table.
//!
//! ## Purpose
//!
//! This module turns a sparse table of fitted values into a function that can
//! be queried anywhere on the real line. Loess only solves the weighted least
//! squares problem at knots; everything else is interpolated here.
//!
//! ## Design notes
//!
//! * **Abstraction**: Any interpolant implementing [`Interpolation`] can back a model.
//! * **Local Lagrange**: Each query uses the `order + 1` consecutive knots around it.
//! * **Extrapolation**: Beyond the outermost knots the boundary polynomial is extended,
//!   so extrapolation stays in the same polynomial family.
//!
//! ## Key concepts
//!
//! * **Order**: 0 (constant), 1 (linear) or 2 (quadratic), capped at `knots - 1`.
//! * **Exactness**: A query equal to a knot returns that knot's value unchanged.
//!
//! ## Invariants
//!
//! * Knots are strictly increasing and aligned with their values.
//! * At least one knot is present.
//!
//! ## Non-goals
//!
//! * This module does not produce smooth (C¹) splines.
//! * This module does not compute the knot values.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::StlError;

// ============================================================================
// Interpolation Trait
// ============================================================================

/// A continuous function built from a knot table.
pub trait Interpolation<T: Float> {
    /// Evaluate the interpolant at `x`.
    fn evaluate(&self, x: T) -> T;
}

// ============================================================================
// Piecewise Polynomial
// ============================================================================

/// Piecewise Lagrange interpolant of fixed order.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewisePolynomial<T> {
    knots: Vec<T>,
    values: Vec<T>,
    order: usize,
}

impl<T: Float> PiecewisePolynomial<T> {
    /// Build an interpolant of the given polynomial order.
    pub fn new(knots: Vec<T>, values: Vec<T>, order: usize) -> Result<Self, StlError> {
        if knots.is_empty() {
            return Err(StlError::EmptyInput);
        }
        if knots.len() != values.len() {
            return Err(StlError::MismatchedInputs {
                x_len: knots.len(),
                y_len: values.len(),
            });
        }
        if let Some(index) = (1..knots.len()).find(|&i| knots[i] <= knots[i - 1]) {
            return Err(StlError::NotStrictlyIncreasing { index });
        }

        let order = order.min(knots.len() - 1);
        Ok(Self {
            knots,
            values,
            order,
        })
    }

    /// Knot positions.
    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    /// Values at the knots.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Effective polynomial order.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl<T: Float> Interpolation<T> for PiecewisePolynomial<T> {
    fn evaluate(&self, x: T) -> T {
        let len = self.knots.len();
        let pos = self.knots.partition_point(|&k| k < x);

        if pos < len && self.knots[pos] == x {
            return self.values[pos];
        }

        let m = self.order + 1;
        let start = pos.saturating_sub(m / 2).min(len - m);
        let xs = &self.knots[start..start + m];
        let ys = &self.values[start..start + m];

        // Lagrange form over the local window.
        let mut acc = T::zero();
        for (i, (&xi, &yi)) in xs.iter().zip(ys.iter()).enumerate() {
            let mut basis = T::one();
            for (j, &xj) in xs.iter().enumerate() {
                if i != j {
                    basis = basis * (x - xj) / (xi - xj);
                }
            }
            acc = acc + basis * yi;
        }
        acc
    }
}

//! Dense solver for the local normal equations.
//!
//! ## Purpose
//!
//! This module solves the small symmetric systems (at most 3×3) that arise
//! from a local weighted least squares fit of degree 0, 1 or 2.
//!
//! ## Design notes
//!
//! * **Elimination**: Gaussian elimination with partial pivoting.
//! * **Singularity**: A pivot smaller than `sqrt(eps)` times the largest diagonal entry
//!   marks the system as singular, and the caller reduces the degree.
//!
//! ## Non-goals
//!
//! * This module does not provide general-purpose linear algebra.

// External dependencies
use num_traits::Float;

/// Maximum number of unknowns (intercept, linear, quadratic).
pub const MAX_TERMS: usize = 3;

/// Normal equations `A β = b` for up to three polynomial terms.
#[derive(Debug, Clone, Copy)]
pub struct NormalEquations<T> {
    /// Gram matrix `Xᵀ W X` (only the leading `terms × terms` block is used).
    pub a: [[T; MAX_TERMS]; MAX_TERMS],

    /// Right-hand side `Xᵀ W y`.
    pub b: [T; MAX_TERMS],

    /// Number of active terms (degree + 1).
    pub terms: usize,
}

impl<T: Float> NormalEquations<T> {
    /// Create an empty system with `terms` unknowns.
    pub fn new(terms: usize) -> Self {
        debug_assert!((1..=MAX_TERMS).contains(&terms));
        Self {
            a: [[T::zero(); MAX_TERMS]; MAX_TERMS],
            b: [T::zero(); MAX_TERMS],
            terms: terms.clamp(1, MAX_TERMS),
        }
    }

    /// Accumulate one weighted observation at (centred, scaled) position `u`.
    #[inline]
    pub fn accumulate(&mut self, u: T, y: T, w: T) {
        let mut basis = [T::one(); MAX_TERMS];
        for k in 1..self.terms {
            basis[k] = basis[k - 1] * u;
        }

        for r in 0..self.terms {
            let wr = w * basis[r];
            self.b[r] = self.b[r] + wr * y;
            for c in 0..self.terms {
                self.a[r][c] = self.a[r][c] + wr * basis[c];
            }
        }
    }

    /// Solve the system, returning `None` when it is numerically singular.
    pub fn solve(&self) -> Option<[T; MAX_TERMS]> {
        let m = self.terms;
        let mut a = self.a;
        let mut b = self.b;

        let scale = (0..m).fold(T::zero(), |acc, i| acc.max(a[i][i].abs()));
        if scale <= T::zero() || !scale.is_finite() {
            return None;
        }
        let tol = scale * T::epsilon().sqrt();

        for col in 0..m {
            // Partial pivoting
            let pivot_row = (col..m).fold(col, |best, r| {
                if a[r][col].abs() > a[best][col].abs() {
                    r
                } else {
                    best
                }
            });
            if a[pivot_row][col].abs() <= tol {
                return None;
            }
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);

            for r in (col + 1)..m {
                let factor = a[r][col] / a[col][col];
                for c in col..m {
                    a[r][c] = a[r][c] - factor * a[col][c];
                }
                b[r] = b[r] - factor * b[col];
            }
        }

        let mut beta = [T::zero(); MAX_TERMS];
        for row in (0..m).rev() {
            let tail = ((row + 1)..m).fold(T::zero(), |acc, c| acc + a[row][c] * beta[c]);
            beta[row] = (b[row] - tail) / a[row][row];
        }

        if beta[..m].iter().all(|v| v.is_finite()) {
            Some(beta)
        } else {
            None
        }
    }
}

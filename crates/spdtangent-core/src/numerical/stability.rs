//! Numerical stability utilities for spectral matrix functions.
//!
//! These helpers decide when an eigenvalue is numerically indistinguishable
//! from zero and keep reconstructed matrices symmetric.

use crate::types::{DMatrix, Scalar};
use num_traits::Float;

/// Check if a matrix is finite (no NaN or Inf values).
pub fn is_finite_matrix<T: Scalar>(matrix: &DMatrix<T>) -> bool {
    matrix.iter().all(|&x| <T as Float>::is_finite(x))
}

/// Largest absolute entry of a matrix (zero for an empty matrix).
pub fn max_abs_entry<T: Scalar>(matrix: &DMatrix<T>) -> T {
    matrix
        .iter()
        .fold(T::zero(), |acc, &x| <T as Float>::max(acc, <T as Float>::abs(x)))
}

/// Threshold below which an eigenvalue is treated as zero.
///
/// Scales machine epsilon by the matrix size and the spectral radius, the
/// accuracy a backward-stable symmetric eigensolver can guarantee. An
/// eigenvalue `λ <= threshold` is rejected, so an all-zero spectrum always is.
pub fn singularity_threshold<T: Scalar>(spectral_radius: T, n: usize) -> T {
    T::EPSILON * <T as Scalar>::from_usize(n.max(1)) * spectral_radius
}

/// Largest absolute eigenvalue in a spectrum.
pub fn spectral_radius<'a, T, I>(eigenvalues: I) -> T
where
    T: Scalar,
    I: IntoIterator<Item = &'a T>,
{
    eigenvalues
        .into_iter()
        .fold(T::zero(), |acc, &x| <T as Float>::max(acc, <T as Float>::abs(x)))
}

/// Add `reg_param` to the diagonal in place.
pub fn regularize_spd<T: Scalar>(matrix: &mut DMatrix<T>, reg_param: T) {
    let n = matrix.nrows().min(matrix.ncols());
    for i in 0..n {
        matrix[(i, i)] += reg_param;
    }
}

/// Replace `matrix` with (M + Mᵀ)/2 in place.
pub fn symmetrize_in_place<T: Scalar>(matrix: &mut DMatrix<T>) {
    let n = matrix.nrows();
    let half = <T as Scalar>::from_f64(0.5);
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = (matrix[(i, j)] + matrix[(j, i)]) * half;
            matrix[(i, j)] = avg;
            matrix[(j, i)] = avg;
        }
    }
}

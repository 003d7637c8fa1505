//! Spectral matrix functions on symmetric matrices.
//!
//! Every function here goes through the symmetric eigendecomposition
//! ```text
//! M = U diag(λ) Uᵀ   ⇒   f(M) = U diag(f(λᵢ)) Uᵀ
//! ```
//! computed with nalgebra's symmetric eigensolver. Inputs must be square,
//! finite and symmetric (relative tolerance [`Scalar::SYMMETRY_TOLERANCE`]);
//! functions that need a positive spectrum (`log`, negative powers) reject
//! eigenvalues that are numerically zero or negative with
//! [`GeometryError::Domain`] instead of producing NaN or Inf.
//!
//! The module also provides the isometric vectorization of symmetric matrices
//! used to hand tangent vectors to flat-space consumers:
//! ```text
//! vec(S) = [S₁₁, …, Sₙₙ, √2·S₁₂, √2·S₁₃, …, √2·Sₙ₋₁,ₙ] ∈ ℝ^{n(n+1)/2}
//! ```
//! so that `vec(A)·vec(B) = tr(AᵀB)`.

use crate::{
    error::{GeometryError, Result},
    numerical::stability::{
        is_finite_matrix, max_abs_entry, singularity_threshold, spectral_radius,
        symmetrize_in_place,
    },
    types::{constants, DMatrix, DVector, Scalar},
};
use nalgebra::{linalg::SymmetricEigen, Dyn};
use num_traits::Float;

/// Number of free entries of an n×n symmetric matrix, n(n+1)/2.
#[inline]
pub fn vectorized_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Matrix size n such that n(n+1)/2 == `len`, if any.
pub fn matrix_size_from_len(len: usize) -> Option<usize> {
    let mut n = 0;
    while vectorized_len(n) < len {
        n += 1;
    }
    (vectorized_len(n) == len).then_some(n)
}

/// Largest absolute asymmetry max |Mᵢⱼ - Mⱼᵢ|, or +∞ for a non-square matrix.
pub fn symmetry_error<T: Scalar>(m: &DMatrix<T>) -> T {
    if m.nrows() != m.ncols() {
        return <T as Float>::infinity();
    }
    let n = m.nrows();
    let mut err = T::zero();
    for i in 0..n {
        for j in (i + 1)..n {
            err = <T as Float>::max(err, <T as Float>::abs(m[(i, j)] - m[(j, i)]));
        }
    }
    err
}

/// Returns true if `m` is square and symmetric within the absolute tolerance `tol`.
pub fn is_symmetric<T: Scalar>(m: &DMatrix<T>, tol: T) -> bool {
    m.nrows() == m.ncols() && symmetry_error(m) <= tol
}

/// Symmetric part (M + Mᵀ)/2.
///
/// # Panics
///
/// Panics if `m` is not square.
pub fn symmetrize<T: Scalar>(m: &DMatrix<T>) -> DMatrix<T> {
    (m + m.transpose()) * <T as Scalar>::from_f64(0.5)
}

fn check_square<T: Scalar>(m: &DMatrix<T>, operation: &str) -> Result<()> {
    if m.nrows() != m.ncols() {
        return Err(GeometryError::dimension_mismatch(
            format!("square matrix for {operation}"),
            format!("{}x{}", m.nrows(), m.ncols()),
        ));
    }
    if m.nrows() == 0 {
        return Err(GeometryError::domain(format!(
            "{operation} requires a non-empty matrix"
        )));
    }
    Ok(())
}

/// Checks that `m` is square, finite and symmetric up to a relative tolerance.
pub fn check_symmetric_input<T: Scalar>(m: &DMatrix<T>, operation: &str) -> Result<()> {
    check_square(m, operation)?;
    if !is_finite_matrix(m) {
        return Err(GeometryError::domain(format!(
            "{operation} requires finite entries"
        )));
    }
    let scale = <T as Float>::max(max_abs_entry(m), T::one());
    let err = symmetry_error(m);
    if err > T::SYMMETRY_TOLERANCE * scale {
        return Err(GeometryError::domain(format!(
            "{operation} requires a symmetric matrix: max |M - Mᵀ| = {err}"
        )));
    }
    Ok(())
}

/// Symmetric eigendecomposition of a validated symmetric matrix.
pub fn eigh<T: Scalar>(m: &DMatrix<T>) -> Result<SymmetricEigen<T, Dyn>> {
    check_symmetric_input(m, "eigendecomposition")?;
    let eigen = symmetrize(m).symmetric_eigen();
    if eigen.eigenvalues.iter().any(|&x| !<T as Float>::is_finite(x)) {
        return Err(GeometryError::numerical_error(
            "eigendecomposition produced non-finite eigenvalues",
        ));
    }
    Ok(eigen)
}

/// Rejects spectra with an eigenvalue that is zero, negative, or numerically zero.
fn check_positive_spectrum<T: Scalar>(eigenvalues: &DVector<T>, operation: &str) -> Result<()> {
    let threshold = singularity_threshold(spectral_radius(eigenvalues.iter()), eigenvalues.len());
    if let Some(&bad) = eigenvalues.iter().find(|&&x| x <= threshold) {
        return Err(GeometryError::domain(format!(
            "{operation} requires a positive definite matrix: eigenvalue {bad} <= {threshold}"
        )));
    }
    Ok(())
}

fn reconstruct<T: Scalar>(eigen: &SymmetricEigen<T, Dyn>, values: &DVector<T>) -> Result<DMatrix<T>> {
    if values.iter().any(|&x| !<T as Float>::is_finite(x)) {
        return Err(GeometryError::numerical_error(
            "spectral function produced non-finite values",
        ));
    }
    let u = &eigen.eigenvectors;
    let mut result = u * DMatrix::from_diagonal(values) * u.transpose();
    symmetrize_in_place(&mut result);
    Ok(result)
}

/// Applies a scalar function to the spectrum: U diag(f(λᵢ)) Uᵀ.
pub fn apply_spectral<T, F>(m: &DMatrix<T>, f: F) -> Result<DMatrix<T>>
where
    T: Scalar,
    F: Fn(T) -> T,
{
    let eigen = eigh(m)?;
    let values = eigen.eigenvalues.map(|x| f(x));
    reconstruct(&eigen, &values)
}

/// Matrix exponential of a symmetric matrix.
pub fn matrix_exp<T: Scalar>(m: &DMatrix<T>) -> Result<DMatrix<T>> {
    apply_spectral(m, <T as Float>::exp)
}

/// Matrix logarithm of a symmetric positive definite matrix.
///
/// # Errors
///
/// `Domain` if `m` is not symmetric or has an eigenvalue that is not
/// strictly positive (a rank-deficient input is rejected, never mapped to -∞).
pub fn matrix_log<T: Scalar>(m: &DMatrix<T>) -> Result<DMatrix<T>> {
    let eigen = eigh(m)?;
    check_positive_spectrum(&eigen.eigenvalues, "matrix logarithm")?;
    let values = eigen.eigenvalues.map(<T as Float>::ln);
    reconstruct(&eigen, &values)
}

/// Matrix power Mᵖ of a symmetric matrix.
///
/// Negative exponents require a positive definite input. Fractional
/// exponents require a positive semi-definite input; eigenvalues within
/// rounding of zero are clamped to zero.
pub fn matrix_power<T: Scalar>(m: &DMatrix<T>, p: T) -> Result<DMatrix<T>> {
    let eigen = eigh(m)?;
    let values = if p < T::zero() {
        check_positive_spectrum(&eigen.eigenvalues, "negative matrix power")?;
        eigen.eigenvalues.map(|x| <T as Float>::powf(x, p))
    } else if <T as Float>::fract(p) != T::zero() {
        let threshold =
            singularity_threshold(spectral_radius(eigen.eigenvalues.iter()), eigen.eigenvalues.len());
        if let Some(&bad) = eigen.eigenvalues.iter().find(|&&x| x < -threshold) {
            return Err(GeometryError::domain(format!(
                "fractional matrix power requires a positive semi-definite matrix: eigenvalue {bad}"
            )));
        }
        eigen
            .eigenvalues
            .map(|x| <T as Float>::powf(<T as Float>::max(x, T::zero()), p))
    } else {
        eigen.eigenvalues.map(|x| <T as Float>::powf(x, p))
    };
    reconstruct(&eigen, &values)
}

/// Matrix square root P^{1/2} of a symmetric positive semi-definite matrix.
pub fn matrix_sqrt<T: Scalar>(m: &DMatrix<T>) -> Result<DMatrix<T>> {
    matrix_power(m, <T as Scalar>::from_f64(0.5))
}

/// Inverse square root P^{-1/2} of a symmetric positive definite matrix.
pub fn matrix_sqrt_inv<T: Scalar>(m: &DMatrix<T>) -> Result<DMatrix<T>> {
    matrix_power(m, <T as Scalar>::from_f64(-0.5))
}

/// P^{1/2} and P^{-1/2} from a single eigendecomposition.
pub fn sqrt_and_inv_sqrt<T: Scalar>(m: &DMatrix<T>) -> Result<(DMatrix<T>, DMatrix<T>)> {
    let eigen = eigh(m)?;
    check_positive_spectrum(&eigen.eigenvalues, "matrix square root")?;
    let sqrt_vals = eigen.eigenvalues.map(<T as Float>::sqrt);
    let inv_sqrt_vals = sqrt_vals.map(|x| T::one() / x);
    Ok((
        reconstruct(&eigen, &sqrt_vals)?,
        reconstruct(&eigen, &inv_sqrt_vals)?,
    ))
}

/// Frobenius inner product tr(AᵀB).
pub fn frobenius_inner<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> Result<T> {
    if a.shape() != b.shape() {
        return Err(GeometryError::dimension_mismatch(
            format!("{}x{}", a.nrows(), a.ncols()),
            format!("{}x{}", b.nrows(), b.ncols()),
        ));
    }
    Ok(a.component_mul(b).sum())
}

/// Isometric vectorization of a symmetric matrix.
///
/// The diagonal comes first, then the strict upper triangle in row-major
/// order scaled by √2.
pub fn vectorize<T: Scalar>(s: &DMatrix<T>) -> Result<DVector<T>> {
    check_symmetric_input(s, "vectorization")?;
    let n = s.nrows();
    let sqrt_2 = constants::sqrt_2::<T>();
    let half = <T as Scalar>::from_f64(0.5);
    let mut v = DVector::zeros(vectorized_len(n));
    for i in 0..n {
        v[i] = s[(i, i)];
    }
    let mut idx = n;
    for i in 0..n {
        for j in (i + 1)..n {
            v[idx] = sqrt_2 * (s[(i, j)] + s[(j, i)]) * half;
            idx += 1;
        }
    }
    Ok(v)
}

/// Inverse of [`vectorize`]; the matrix size is inferred from the length.
pub fn devectorize<T: Scalar>(v: &DVector<T>) -> Result<DMatrix<T>> {
    let n = matrix_size_from_len(v.len()).ok_or_else(|| {
        GeometryError::dimension_mismatch("length n(n+1)/2", v.len())
    })?;
    let sqrt_2 = constants::sqrt_2::<T>();
    let mut s = DMatrix::zeros(n, n);
    for i in 0..n {
        s[(i, i)] = v[i];
    }
    let mut idx = n;
    for i in 0..n {
        for j in (i + 1)..n {
            let value = v[idx] / sqrt_2;
            s[(i, j)] = value;
            s[(j, i)] = value;
            idx += 1;
        }
    }
    Ok(s)
}

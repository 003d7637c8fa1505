//! Property tests for the symmetric matrix algebra.
//!
//! These tests verify the algebraic laws the geometry crates rely on:
//! exp/log inversion, isometry of the vectorization and exact reconstruction.

use nalgebra::DMatrix;
use proptest::prelude::*;
use spdtangent_core::numerical::symmetric::{
    devectorize, frobenius_inner, is_symmetric, matrix_exp, matrix_log, matrix_power,
    symmetry_error, vectorize, vectorized_len,
};

/// Strategy for an arbitrary symmetric n×n matrix with n in 1..=4.
fn symmetric_matrix() -> impl Strategy<Value = DMatrix<f64>> {
    (1usize..=4).prop_flat_map(|n| {
        prop::collection::vec(-2.0f64..2.0, n * n).prop_map(move |entries| {
            let a = DMatrix::from_vec(n, n, entries);
            (&a + a.transpose()) * 0.5
        })
    })
}

/// Strategy for a well-conditioned SPD matrix A Aᵀ + I.
fn spd_matrix() -> impl Strategy<Value = DMatrix<f64>> {
    (1usize..=4).prop_flat_map(|n| {
        prop::collection::vec(-1.5f64..1.5, n * n).prop_map(move |entries| {
            let a = DMatrix::from_vec(n, n, entries);
            &a * a.transpose() + DMatrix::identity(n, n)
        })
    })
}

proptest! {
    #[test]
    fn prop_vectorize_roundtrip(s in symmetric_matrix()) {
        let v = vectorize(&s).unwrap();
        prop_assert_eq!(v.len(), vectorized_len(s.nrows()));
        let back = devectorize(&v).unwrap();
        prop_assert!((back - &s).amax() < 1e-14);
    }

    #[test]
    fn prop_vectorize_preserves_inner_product(a in symmetric_matrix()) {
        let b = a.map(|x| x * x - 0.5);
        let frob = frobenius_inner(&a, &b).unwrap();
        let euclid = vectorize(&a).unwrap().dot(&vectorize(&b).unwrap());
        prop_assert!((frob - euclid).abs() < 1e-10);
    }

    #[test]
    fn prop_log_exp_roundtrip(p in spd_matrix()) {
        let log_p = matrix_log(&p).unwrap();
        prop_assert!(is_symmetric(&log_p, 0.0));
        let back = matrix_exp(&log_p).unwrap();
        prop_assert!((back - &p).amax() < 1e-9 * p.amax().max(1.0));
    }

    #[test]
    fn prop_exp_is_positive_definite(s in symmetric_matrix()) {
        let e = matrix_exp(&s).unwrap();
        prop_assert_eq!(symmetry_error(&e), 0.0);
        let eigen = e.symmetric_eigen();
        prop_assert!(eigen.eigenvalues.iter().all(|&l| l > 0.0));
    }

    #[test]
    fn prop_half_powers_compose(p in spd_matrix()) {
        let root = matrix_power(&p, 0.5).unwrap();
        let inv_root = matrix_power(&p, -0.5).unwrap();
        let identity = &root * &p.clone().try_inverse().unwrap() * &root;
        let n = p.nrows();
        prop_assert!((identity - DMatrix::<f64>::identity(n, n)).amax() < 1e-8);
        prop_assert!((&inv_root * &p * &inv_root - DMatrix::<f64>::identity(n, n)).amax() < 1e-8);
    }
}

#[test]
fn test_singular_boundary_rejected() {
    let boundary = DMatrix::from_row_slice(3, 3, &[2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    let err = matrix_log(&boundary).unwrap_err();
    assert!(err.is_domain());
    assert!(err.to_string().contains("positive definite"));
}

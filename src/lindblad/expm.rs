// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-evolution operator exp(−iHΔt) for real symmetric Hamiltonians.
//!
//! H = V Λ Vᵀ with V real orthogonal, so
//!
//!   U = V · diag(e^{−iλ_k Δt}) · Vᵀ
//!
//! is unitary to within the orthogonality error of V, which for a
//! symmetric QR-based eigensolver stays at machine precision. No
//! scaling-and-squaring is needed regardless of ‖H‖Δt.

use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::Array2;
use num_complex::Complex64;

/// Compute U = exp(−i·H·dt) for a real symmetric `h`.
///
/// # Panics
/// Panics if `h` is not square.
pub fn hermitian_exp(h: &Array2<f64>, dt: f64) -> Array2<Complex64> {
    let n = h.nrows();
    assert_eq!(n, h.ncols(), "hermitian_exp requires a square matrix");

    if n == 0 {
        return Array2::zeros((0, 0));
    }

    let dense = DMatrix::from_fn(n, n, |i, j| h[[i, j]]);
    let eigen = SymmetricEigen::new(dense);
    let vecs = &eigen.eigenvectors;

    let phases: Vec<Complex64> = eigen
        .eigenvalues
        .iter()
        .map(|&lambda| Complex64::from_polar(1.0, -lambda * dt))
        .collect();

    // U_ij = Σ_k V_ik e^{−iλ_k dt} V_jk
    Array2::from_shape_fn((n, n), |(i, j)| {
        phases
            .iter()
            .enumerate()
            .map(|(k, &phase)| phase * (vecs[(i, k)] * vecs[(j, k)]))
            .sum::<Complex64>()
    })
}

/// Conjugate transpose (dagger) of a matrix.
pub fn conjugate_transpose(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_matrix_close;
    use std::f64::consts::PI;

    fn identity(n: usize) -> Array2<Complex64> {
        Array2::from_diag_elem(n, Complex64::new(1.0, 0.0))
    }

    #[test]
    fn test_zero_hamiltonian_is_identity() {
        let zero = Array2::<f64>::zeros((4, 4));
        assert_matrix_close(&hermitian_exp(&zero, 0.5), &identity(4), 1e-14);
    }

    #[test]
    fn test_zero_time_is_identity() {
        let mut h = Array2::zeros((3, 3));
        h[[0, 1]] = 2.0;
        h[[1, 0]] = 2.0;
        h[[2, 2]] = -1.0;
        assert_matrix_close(&hermitian_exp(&h, 0.0), &identity(3), 1e-12);
    }

    #[test]
    fn test_diagonal_gives_phases() {
        let mut h = Array2::zeros((2, 2));
        h[[0, 0]] = 1.0;
        h[[1, 1]] = -2.0;
        let u = hermitian_exp(&h, 0.3);

        assert!((u[[0, 0]] - Complex64::from_polar(1.0, -0.3)).norm() < 1e-14);
        assert!((u[[1, 1]] - Complex64::from_polar(1.0, 0.6)).norm() < 1e-14);
        assert!(u[[0, 1]].norm() < 1e-14);
        assert!(u[[1, 0]].norm() < 1e-14);
    }

    #[test]
    fn test_pauli_x_produces_rotation() {
        // exp(−i θ/2 σx) = cos(θ/2) I − i sin(θ/2) σx
        let theta = PI / 2.0;
        let mut h = Array2::zeros((2, 2));
        h[[0, 1]] = 1.0;
        h[[1, 0]] = 1.0;
        let u = hermitian_exp(&h, theta / 2.0);

        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        assert!((u[[0, 0]] - Complex64::new(c, 0.0)).norm() < 1e-12);
        assert!((u[[0, 1]] - Complex64::new(0.0, -s)).norm() < 1e-12);
        assert!((u[[1, 0]] - Complex64::new(0.0, -s)).norm() < 1e-12);
        assert!((u[[1, 1]] - Complex64::new(c, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_result_is_unitary_for_strong_disorder() {
        let energies = [4.7, -3.1, 0.2, 4.9, -4.4, 1.3, -0.8];
        let mut h = Array2::zeros((7, 7));
        for (i, e) in energies.iter().enumerate() {
            h[[i, i]] = *e;
        }
        for i in 0..6 {
            h[[i, i + 1]] = 1.0;
            h[[i + 1, i]] = 1.0;
        }

        let u = hermitian_exp(&h, 0.5);
        let product = u.dot(&conjugate_transpose(&u));
        assert_matrix_close(&product, &identity(7), 1e-12);
    }

    #[test]
    fn test_group_property() {
        // U(dt)² = U(2dt)
        let mut h = Array2::zeros((3, 3));
        h[[0, 0]] = 0.4;
        h[[0, 1]] = 1.0;
        h[[1, 0]] = 1.0;
        h[[1, 2]] = 1.0;
        h[[2, 1]] = 1.0;
        h[[2, 2]] = -1.1;

        let u = hermitian_exp(&h, 0.25);
        let u2 = hermitian_exp(&h, 0.5);
        assert_matrix_close(&u.dot(&u), &u2, 1e-12);
    }

    #[test]
    fn test_conjugate_transpose() {
        let mut m = Array2::zeros((2, 2));
        m[[0, 1]] = Complex64::new(1.0, 2.0);
        m[[1, 0]] = Complex64::new(3.0, 4.0);
        let dag = conjugate_transpose(&m);
        assert_eq!(dag[[0, 1]], Complex64::new(3.0, -4.0));
        assert_eq!(dag[[1, 0]], Complex64::new(1.0, -2.0));
    }
}

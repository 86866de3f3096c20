// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities for chain and ensemble tests.

use ndarray::Array2;
use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::chain::{self, Hamiltonian};
use crate::ensemble::EnsembleParams;
use crate::lindblad::DensityMatrix;

/// Assert every entry of `a` lies within `tol` of `b`.
pub fn assert_matrix_close(a: &Array2<Complex64>, b: &Array2<Complex64>, tol: f64) {
    assert_eq!(a.dim(), b.dim(), "shape mismatch");
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        let diff = (x - y).norm();
        assert!(
            diff <= tol,
            "entry {:?} differs by {:e} (tolerance {:e}): {} vs {}",
            idx,
            diff,
            tol,
            x,
            y
        );
    }
}

/// One seeded disorder realization with J = 1.
pub fn disordered_chain(n: usize, disorder: f64, seed: u64) -> Hamiltonian {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    chain::generate(n, 1.0, disorder, &mut rng).unwrap()
}

/// |+⟩⟨+| on two sites.
pub fn plus_state() -> DensityMatrix {
    Array2::from_elem((2, 2), Complex64::new(0.5, 0.0))
}

/// Random full-rank density matrix A·A† / tr(A·A†).
pub fn random_density_matrix(n: usize, seed: u64) -> DensityMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = Array2::from_shape_fn((n, n), |_| {
        Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    });
    let a_dag = a.t().mapv(|z| z.conj());
    let rho = a.dot(&a_dag);
    let trace: Complex64 = rho.diag().iter().sum();
    rho.mapv(|z| z / trace.re)
}

/// Small, fast ensemble for unit tests.
pub fn small_params() -> EnsembleParams {
    EnsembleParams {
        num_sites: 4,
        coupling: 1.0,
        disorder: 2.0,
        dt: 0.5,
        num_time_steps: 20,
        samples: 6,
    }
}

// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Disordered tight-binding chain Hamiltonians.
//!
//! H = Σ_i ε_i |i⟩⟨i| + J Σ_i (|i⟩⟨i+1| + |i+1⟩⟨i|),  ε_i ~ U[−W, W]
//!
//! Ref: Anderson, P. W. (1958). Phys. Rev. 109, 1492.

use ndarray::Array2;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::Result;
use crate::validation::validate_chain;

/// Real symmetric nearest-neighbour chain Hamiltonian.
#[derive(Debug, Clone, PartialEq)]
pub struct Hamiltonian {
    matrix: Array2<f64>,
}

impl Hamiltonian {
    /// Build a chain from explicit site energies.
    pub fn from_site_energies(site_energies: &[f64], coupling: f64) -> Result<Self> {
        let n = site_energies.len();
        validate_chain(n, coupling, 0.0)?;

        let mut matrix = Array2::zeros((n, n));
        for (i, &energy) in site_energies.iter().enumerate() {
            matrix[[i, i]] = energy;
        }
        for i in 0..n - 1 {
            matrix[[i, i + 1]] = coupling;
            matrix[[i + 1, i]] = coupling;
        }

        Ok(Self { matrix })
    }

    /// Disorder-free chain: all site energies zero.
    pub fn uniform(num_sites: usize, coupling: f64) -> Result<Self> {
        Self::from_site_energies(&vec![0.0; num_sites], coupling)
    }

    /// Number of sites N.
    pub fn num_sites(&self) -> usize {
        self.matrix.nrows()
    }

    /// Diagonal entries ε_i.
    pub fn site_energies(&self) -> Vec<f64> {
        self.matrix.diag().to_vec()
    }

    /// Dense N × N matrix.
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Exact (bitwise) symmetry check.
    pub fn is_symmetric(&self) -> bool {
        self.matrix == self.matrix.t()
    }
}

/// Draw one disorder realization of an `n`-site chain.
///
/// Consumes exactly `n` uniform draws from `rng`, also when `disorder` is
/// zero, so the stream position depends only on the chain length.
pub fn generate<R: Rng + ?Sized>(
    n: usize,
    coupling: f64,
    disorder: f64,
    rng: &mut R,
) -> Result<Hamiltonian> {
    validate_chain(n, coupling, disorder)?;

    let dist = Uniform::new_inclusive(-disorder, disorder);
    let energies: Vec<f64> = (0..n).map(|_| dist.sample(rng)).collect();

    Hamiltonian::from_site_energies(&energies, coupling)
}

// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Coherent (Hamiltonian) part of one time step: ρ → U ρ U†.

use ndarray::Array2;
use num_complex::Complex64;

use super::expm::{conjugate_transpose, hermitian_exp};
use super::types::DensityMatrix;
use crate::chain::Hamiltonian;
use crate::error::{Result, ValidationError};
use crate::validation::validate_time_step;

/// Unitary propagator for a fixed Hamiltonian and step size.
///
/// The Hamiltonian is constant over a disorder realization, so U and U†
/// are computed once and reused for every step.
#[derive(Debug, Clone)]
pub struct UnitaryPropagator {
    unitary: Array2<Complex64>,
    unitary_dag: Array2<Complex64>,
}

impl UnitaryPropagator {
    /// Diagonalize `hamiltonian` and build U = exp(−iHdt).
    pub fn new(hamiltonian: &Hamiltonian, dt: f64) -> Result<Self> {
        validate_time_step(dt)?;
        if !hamiltonian.is_symmetric() {
            return Err(ValidationError::PhysicsConstraint(
                "Hamiltonian must be symmetric".into(),
            )
            .into());
        }

        let unitary = hermitian_exp(hamiltonian.matrix(), dt);
        let unitary_dag = conjugate_transpose(&unitary);
        Ok(Self {
            unitary,
            unitary_dag,
        })
    }

    /// ρ' = U ρ U†.
    ///
    /// # Panics
    /// Panics if `rho` does not match the Hamiltonian dimension.
    pub fn step(&self, rho: &DensityMatrix) -> DensityMatrix {
        assert_eq!(
            rho.nrows(),
            self.unitary.nrows(),
            "density matrix dimension must match Hamiltonian"
        );
        self.unitary.dot(rho).dot(&self.unitary_dag)
    }
}

/// One-shot coherent step: ρ' = exp(−iHdt) ρ exp(iHdt).
pub fn unitary_step(rho: &DensityMatrix, hamiltonian: &Hamiltonian, dt: f64) -> Result<DensityMatrix> {
    if rho.nrows() != hamiltonian.num_sites() || rho.ncols() != hamiltonian.num_sites() {
        return Err(ValidationError::PhysicsConstraint(format!(
            "density matrix is {} × {}, Hamiltonian has {} sites",
            rho.nrows(),
            rho.ncols(),
            hamiltonian.num_sites()
        ))
        .into());
    }
    Ok(UnitaryPropagator::new(hamiltonian, dt)?.step(rho))
}

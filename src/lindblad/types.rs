// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Density matrix helpers and per-step diagnostics.

use ndarray::Array2;
use num_complex::Complex64;

/// Density matrix in the site basis (N × N, Hermitian, unit trace).
pub type DensityMatrix = Array2<Complex64>;

/// Pure state with the excitation localized on `site`: ρ = |site⟩⟨site|.
///
/// # Panics
/// Panics if `site >= num_sites`.
pub fn localized_state(num_sites: usize, site: usize) -> DensityMatrix {
    assert!(
        site < num_sites,
        "site {site} out of range for {num_sites}-site chain"
    );
    let mut rho = Array2::zeros((num_sites, num_sites));
    rho[[site, site]] = Complex64::new(1.0, 0.0);
    rho
}

/// Tr(ρ), real part.
pub fn trace_real(rho: &DensityMatrix) -> f64 {
    rho.diag().iter().map(|z| z.re).sum()
}

/// Purity Tr(ρ²).
///
/// For Hermitian ρ this is Σ_ij |ρ_ij|², which avoids the matrix product.
pub fn purity(rho: &DensityMatrix) -> f64 {
    rho.iter().map(|z| z.norm_sqr()).sum()
}

/// Site populations ρ_ii (real parts).
pub fn populations(rho: &DensityMatrix) -> Vec<f64> {
    rho.diag().iter().map(|z| z.re).collect()
}

/// Largest |ρ_ij − conj(ρ_ji)| over all entries.
pub fn hermiticity_error(rho: &DensityMatrix) -> f64 {
    let n = rho.nrows();
    let mut max_err = 0.0f64;
    for i in 0..n {
        for j in i..n {
            max_err = max_err.max((rho[[i, j]] - rho[[j, i]].conj()).norm());
        }
    }
    max_err
}

/// l1-norm of coherence: Σ_{i≠j} |ρ_ij|.
pub fn coherence_l1(rho: &DensityMatrix) -> f64 {
    rho.indexed_iter()
        .filter(|((i, j), _)| i != j)
        .map(|(_, z)| z.norm())
        .sum()
}

/// Diagnostics of a density matrix after one propagation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDiagnostics {
    /// Step index (0-based; the state after `step + 1` propagations).
    pub step: usize,
    /// Tr(ρ), should stay 1.
    pub trace: f64,
    /// Tr(ρ²), 1 for pure states and 1/N for the maximally mixed state.
    pub purity: f64,
    /// Σ_{i≠j} |ρ_ij|.
    pub coherence: f64,
}

impl StepDiagnostics {
    /// Measure `rho` at `step`.
    pub fn measure(step: usize, rho: &DensityMatrix) -> Self {
        Self {
            step,
            trace: trace_real(rho),
            purity: purity(rho),
            coherence: coherence_l1(rho),
        }
    }
}

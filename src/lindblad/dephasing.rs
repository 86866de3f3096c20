// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pure dephasing in the site basis.
//!
//! The dissipator D(ρ)_ij = −γ ρ_ij (i ≠ j), D(ρ)_ii = 0 is the Lindblad
//! generator of site-local dephasing. Its exact flow over Δt multiplies
//! every coherence by e^{−γΔt} and leaves populations untouched, which is
//! what [`DephasingChannel::apply`] does. Trace is preserved exactly; the
//! channel never renormalizes.
//!
//! Ref: Breuer & Petruccione, "The Theory of Open Quantum Systems" (2002), §3.4.

use num_complex::Complex64;

use super::types::DensityMatrix;
use crate::error::Result;
use crate::validation::{validate_rate, validate_time_step};

/// Coherence-damping channel for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DephasingChannel {
    rate: f64,
    decay: f64,
}

impl DephasingChannel {
    /// Channel with dephasing rate γ applied over a step of length `dt`.
    pub fn new(rate: f64, dt: f64) -> Result<Self> {
        validate_rate(rate)?;
        validate_time_step(dt)?;
        Ok(Self {
            rate,
            decay: (-rate * dt).exp(),
        })
    }

    /// Per-step coherence factor e^{−γΔt}.
    pub fn decay(&self) -> f64 {
        self.decay
    }

    /// Whether the channel is the identity map.
    pub fn is_identity(&self) -> bool {
        self.rate == 0.0
    }

    /// Damp all off-diagonal entries of `rho` in place.
    pub fn apply(&self, rho: &mut DensityMatrix) {
        if self.is_identity() {
            return;
        }
        for ((i, j), z) in rho.indexed_iter_mut() {
            if i != j {
                *z *= self.decay;
            }
        }
    }

    /// Continuous-time generator D(ρ) = −γ · offdiag(ρ).
    pub fn dissipator(&self, rho: &DensityMatrix) -> DensityMatrix {
        let gamma = Complex64::new(-self.rate, 0.0);
        let mut d = rho.clone();
        for ((i, j), z) in d.indexed_iter_mut() {
            *z = if i == j { Complex64::new(0.0, 0.0) } else { *z * gamma };
        }
        d
    }
}

/// One-shot dephasing step returning a new matrix.
pub fn dephase(rho: &DensityMatrix, rate: f64, dt: f64) -> Result<DensityMatrix> {
    let channel = DephasingChannel::new(rate, dt)?;
    let mut out = rho.clone();
    channel.apply(&mut out);
    Ok(out)
}

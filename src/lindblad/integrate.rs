// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Split-step integrator: coherent evolution, then dephasing, every tick.
//!
//! ρ_{k+1} = 𝒟_Δt( U ρ_k U† )
//!
//! This is a first-order (Lie–Trotter) splitting of the continuous
//! Lindblad flow and is exact only as Δt → 0. The order of the two
//! half-maps is fixed: unitary first, dephasing second.

use tracing::trace;

use super::dephasing::DephasingChannel;
use super::propagate::UnitaryPropagator;
use super::record::TrajectoryRecorder;
use super::types::{localized_state, DensityMatrix};
use crate::chain::{Hamiltonian, SOURCE_SITE};
use crate::error::{Error, Result};
use crate::validation::validate_counts;

/// Evolve one disorder realization from the source site for
/// `num_time_steps` ticks, handing every post-step state to `observe`.
///
/// The observer sees ρ after step `k` (0-based), i.e. at time (k+1)·dt.
pub fn evolve<F>(
    hamiltonian: &Hamiltonian,
    rate: f64,
    dt: f64,
    num_time_steps: usize,
    mut observe: F,
) -> Result<DensityMatrix>
where
    F: FnMut(usize, &DensityMatrix) -> Result<()>,
{
    validate_counts(num_time_steps, 1)?;
    let propagator = UnitaryPropagator::new(hamiltonian, dt)?;
    let channel = DephasingChannel::new(rate, dt)?;

    let mut rho = localized_state(hamiltonian.num_sites(), SOURCE_SITE);
    for step in 0..num_time_steps {
        rho = propagator.step(&rho);
        channel.apply(&mut rho);
        observe(step, &rho)?;
    }

    trace!(
        num_sites = hamiltonian.num_sites(),
        rate,
        steps = num_time_steps,
        "Realization evolved"
    );
    Ok(rho)
}

/// Sink population after every step of one realization.
pub fn sink_trajectory(
    hamiltonian: &Hamiltonian,
    rate: f64,
    dt: f64,
    num_time_steps: usize,
) -> Result<Vec<f64>> {
    let mut recorder = TrajectoryRecorder::sink(hamiltonian.num_sites(), num_time_steps);
    evolve(hamiltonian, rate, dt, num_time_steps, |_, rho| {
        recorder.record(rho).map(|_| ()).map_err(Error::from)
    })?;
    Ok(recorder.into_values())
}

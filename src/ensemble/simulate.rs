// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo average over disorder realizations at one dephasing rate.

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::seed::SeedStream;
use super::types::EfficiencyTrajectory;
use crate::chain;
use crate::error::{Error, Result};
use crate::lindblad::sink_trajectory;
use crate::validation::{validate_chain, validate_counts, validate_rate, validate_time_step};

/// Model and sampling parameters shared by every rate of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleParams {
    /// Chain length N.
    pub num_sites: usize,
    /// Nearest-neighbour coupling J.
    pub coupling: f64,
    /// Half-width W of the site-energy distribution U[−W, W].
    pub disorder: f64,
    /// Step size Δt.
    pub dt: f64,
    /// Number of recorded steps T.
    pub num_time_steps: usize,
    /// Number of disorder realizations S.
    pub samples: usize,
}

impl Default for EnsembleParams {
    fn default() -> Self {
        Self {
            num_sites: 7,
            coupling: 1.0,
            disorder: 5.0,
            dt: 0.5,
            num_time_steps: 100,
            samples: 50,
        }
    }
}

impl EnsembleParams {
    /// Check chain, step and count parameters.
    pub fn validate(&self) -> Result<()> {
        validate_chain(self.num_sites, self.coupling, self.disorder)?;
        validate_time_step(self.dt)?;
        validate_counts(self.num_time_steps, self.samples)?;
        Ok(())
    }

    /// Physical time covered by the trajectory, T·Δt.
    pub fn duration(&self) -> f64 {
        self.num_time_steps as f64 * self.dt
    }
}

/// Runs the disorder ensemble for a single dephasing rate.
#[derive(Debug, Clone)]
pub struct EnsembleSimulator {
    params: EnsembleParams,
    parallel: bool,
}

impl EnsembleSimulator {
    /// Validate `params` and build a simulator (parallel over samples).
    pub fn new(params: EnsembleParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            parallel: true,
        })
    }

    /// Toggle rayon parallelism over samples. Results do not depend on it.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parameters shared by every rate.
    pub fn params(&self) -> &EnsembleParams {
        &self.params
    }

    /// Whether samples run on the rayon pool.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Sink trajectory of a single realization drawn from `rng`.
    pub fn run_sample<R: Rng + ?Sized>(&self, rate: f64, rng: &mut R) -> Result<Vec<f64>> {
        let p = &self.params;
        let hamiltonian = chain::generate(p.num_sites, p.coupling, p.disorder, rng)?;
        sink_trajectory(&hamiltonian, rate, p.dt, p.num_time_steps)
    }

    /// Ensemble mean where sample `s` draws from `seeds.sample_rng(s)`.
    ///
    /// Per-sample trajectories are collected in sample order and summed
    /// sequentially, so parallel and sequential runs agree bit for bit.
    pub fn run(&self, rate: f64, seeds: &SeedStream) -> Result<EfficiencyTrajectory> {
        let started = Instant::now();
        let mean = self.run_realizations(rate, |sample| {
            let traj = self.run_sample(rate, &mut seeds.sample_rng(sample))?;
            debug!(
                rate,
                sample,
                final_population = traj.last().copied().unwrap_or_default(),
                "Realization complete"
            );
            Ok(traj)
        })?;
        info!(
            rate,
            samples = self.params.samples,
            stream = seeds.stream(),
            final_efficiency = mean.final_value().unwrap_or_default(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Ensemble complete"
        );
        Ok(mean)
    }

    /// Ensemble mean drawing every realization, in order, from one `rng`.
    ///
    /// Always sequential; the generator is left where the last sample
    /// stopped.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        rate: f64,
        rng: &mut R,
    ) -> Result<EfficiencyTrajectory> {
        self.run_realizations_in_order(rate, |_| self.run_sample(rate, rng))
    }

    /// Average `realize(0..samples)`, on the rayon pool when parallel.
    ///
    /// The first failing sample aborts the whole rate.
    pub(crate) fn run_realizations<F>(
        &self,
        rate: f64,
        realize: F,
    ) -> Result<EfficiencyTrajectory>
    where
        F: Fn(usize) -> Result<Vec<f64>> + Sync + Send,
    {
        validate_rate(rate)?;
        let samples = self.params.samples;
        let checked =
            |sample: usize| realize(sample).map_err(|e| with_sample_context(e, rate, sample));

        let trajectories: Vec<Vec<f64>> = if self.parallel {
            (0..samples).into_par_iter().map(checked).collect::<Result<_>>()?
        } else {
            (0..samples).map(checked).collect::<Result<_>>()?
        };
        Ok(self.average(trajectories.iter().map(Vec::as_slice)))
    }

    /// Sequential counterpart of [`Self::run_realizations`] for stateful
    /// realization sources.
    pub(crate) fn run_realizations_in_order<F>(
        &self,
        rate: f64,
        mut realize: F,
    ) -> Result<EfficiencyTrajectory>
    where
        F: FnMut(usize) -> Result<Vec<f64>>,
    {
        validate_rate(rate)?;
        let mut trajectories = Vec::with_capacity(self.params.samples);
        for sample in 0..self.params.samples {
            let traj = realize(sample).map_err(|e| with_sample_context(e, rate, sample))?;
            trajectories.push(traj);
        }
        Ok(self.average(trajectories.iter().map(Vec::as_slice)))
    }

    fn average<'a, I>(&self, trajectories: I) -> EfficiencyTrajectory
    where
        I: Iterator<Item = &'a [f64]>,
    {
        let mut acc = vec![0.0; self.params.num_time_steps];
        for traj in trajectories {
            for (a, v) in acc.iter_mut().zip(traj) {
                *a += v;
            }
        }
        let samples = self.params.samples as f64;
        acc.iter_mut().for_each(|a| *a /= samples);
        EfficiencyTrajectory::new(acc)
    }
}

fn with_sample_context(e: Error, rate: f64, sample: usize) -> Error {
    match e {
        Error::Numerical(n) => Error::Numerical(n.in_sample(rate, sample)),
        other => other,
    }
}

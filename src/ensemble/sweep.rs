// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dephasing-rate sweep: one ensemble-averaged trajectory per rate.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::seed::SeedStream;
use super::simulate::{EnsembleParams, EnsembleSimulator};
use super::types::{EnsembleResult, RealizationPolicy};
use crate::error::Result;
use crate::validation::validate_rates;

/// A configured regime sweep.
#[derive(Debug, Clone)]
pub struct RegimeSweep {
    simulator: EnsembleSimulator,
    rates: Vec<f64>,
    seed: u64,
    policy: RealizationPolicy,
}

impl RegimeSweep {
    /// Sweep `rates` in the given order with shared disorder.
    pub fn new(simulator: EnsembleSimulator, rates: Vec<f64>, seed: u64) -> Result<Self> {
        validate_rates(&rates)?;
        Ok(Self {
            simulator,
            rates,
            seed,
            policy: RealizationPolicy::default(),
        })
    }

    /// Replace the realization policy.
    pub fn with_policy(mut self, policy: RealizationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn rates(&self) -> &[f64] {
        &self.rates
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn policy(&self) -> RealizationPolicy {
        self.policy
    }

    pub fn simulator(&self) -> &EnsembleSimulator {
        &self.simulator
    }

    /// Run every rate in order.
    ///
    /// Rates are processed one after another; parallelism, when enabled,
    /// is over the samples within a rate.
    pub fn run(&self) -> Result<EnsembleResult> {
        let params = self.simulator.params();
        info!(
            num_sites = params.num_sites,
            disorder = params.disorder,
            samples = params.samples,
            steps = params.num_time_steps,
            seed = self.seed,
            policy = %self.policy,
            "Starting dephasing sweep"
        );

        let mut result = EnsembleResult::new();
        match self.policy {
            RealizationPolicy::SharedDisorder => {
                let seeds = SeedStream::new(self.seed);
                for &rate in &self.rates {
                    info!(rate, "Simulating dephasing rate");
                    result.insert(rate, self.simulator.run(rate, &seeds)?);
                }
            }
            RealizationPolicy::IndependentPerRate => {
                for (index, &rate) in self.rates.iter().enumerate() {
                    info!(rate, stream = index, "Simulating dephasing rate");
                    let seeds = SeedStream::new(self.seed).with_stream(index as u64);
                    result.insert(rate, self.simulator.run(rate, &seeds)?);
                }
            }
            RealizationPolicy::ContinuedStream => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                for &rate in &self.rates {
                    info!(rate, "Simulating dephasing rate");
                    result.insert(rate, self.simulator.run_with_rng(rate, &mut rng)?);
                }
            }
        }

        if let Some(best) = result.optimal_rate() {
            info!(
                optimal_rate = best,
                interior = result.has_interior_optimum(),
                "Sweep complete"
            );
        }
        Ok(result)
    }
}

/// Validate, build and run a shared-disorder sweep in one call.
pub fn sweep(params: EnsembleParams, rates: &[f64], seed: u64) -> Result<EnsembleResult> {
    let simulator = EnsembleSimulator::new(params)?;
    RegimeSweep::new(simulator, rates.to_vec(), seed)?.run()
}

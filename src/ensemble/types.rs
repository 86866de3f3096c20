// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ensemble result types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Sink population after each step, for one run or an ensemble mean.
///
/// Entry `k` is the population at time (k+1)·dt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EfficiencyTrajectory {
    values: Vec<f64>,
}

impl EfficiencyTrajectory {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Population after the last step.
    pub fn final_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Highest population and the step it occurs at (first occurrence).
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (k, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((k, v)),
            })
    }

    /// Time-averaged population.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Consume the trajectory, returning the per-step populations.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for EfficiencyTrajectory {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

/// One sweep entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTrajectory {
    pub rate: f64,
    pub trajectory: EfficiencyTrajectory,
}

/// Ensemble-averaged trajectory per dephasing rate, in sweep order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnsembleResult {
    entries: Vec<RateTrajectory>,
}

impl EnsembleResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the trajectory for `rate`.
    pub fn insert(&mut self, rate: f64, trajectory: EfficiencyTrajectory) {
        match self.entries.iter_mut().find(|e| e.rate == rate) {
            Some(entry) => entry.trajectory = trajectory,
            None => self.entries.push(RateTrajectory { rate, trajectory }),
        }
    }

    /// Trajectory for an exact rate match.
    pub fn get(&self, rate: f64) -> Option<&EfficiencyTrajectory> {
        self.entries
            .iter()
            .find(|e| e.rate == rate)
            .map(|e| &e.trajectory)
    }

    /// Rates in sweep order.
    pub fn rates(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.rate).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RateTrajectory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rate with the highest final-step efficiency.
    pub fn optimal_rate(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.trajectory.final_value().map(|v| (e.rate, v)))
            .fold(None, |best: Option<(f64, f64)>, (rate, v)| match best {
                Some((_, b)) if b >= v => best,
                _ => Some((rate, v)),
            })
            .map(|(rate, _)| rate)
    }

    /// Whether the optimal rate lies strictly between the smallest and the
    /// largest swept rate (the ENAQT signature).
    pub fn has_interior_optimum(&self) -> bool {
        let Some(best) = self.optimal_rate() else {
            return false;
        };
        let min = self.entries.iter().map(|e| e.rate).fold(f64::INFINITY, f64::min);
        let max = self
            .entries
            .iter()
            .map(|e| e.rate)
            .fold(f64::NEG_INFINITY, f64::max);
        best > min && best < max
    }

    /// Per-rate summary statistics, in sweep order.
    pub fn summaries(&self) -> Vec<RegimeSummary> {
        let optimal = self.optimal_rate();
        self.entries
            .iter()
            .filter_map(|e| {
                let final_efficiency = e.trajectory.final_value()?;
                let (peak_step, peak_efficiency) = e.trajectory.peak()?;
                let mean_efficiency = e.trajectory.mean()?;
                Some(RegimeSummary {
                    rate: e.rate,
                    final_efficiency,
                    peak_efficiency,
                    peak_step,
                    mean_efficiency,
                    regime: Regime::classify(e.rate, optimal),
                })
            })
            .collect()
    }
}

/// Transport regime of a swept rate relative to the optimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// No dephasing.
    Coherent,
    /// Dephasing below the best-performing rate.
    WeakNoise,
    /// Best final efficiency in the sweep.
    OptimalNoise,
    /// Dephasing above the best-performing rate.
    TooHot,
}

impl Regime {
    fn classify(rate: f64, optimal: Option<f64>) -> Self {
        if rate == 0.0 {
            return Regime::Coherent;
        }
        match optimal {
            Some(best) if rate == best => Regime::OptimalNoise,
            Some(best) if rate > best => Regime::TooHot,
            _ => Regime::WeakNoise,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Coherent => write!(f, "coherent"),
            Regime::WeakNoise => write!(f, "weak noise"),
            Regime::OptimalNoise => write!(f, "optimal noise"),
            Regime::TooHot => write!(f, "too hot"),
        }
    }
}

/// Scalar figures of merit for one rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeSummary {
    pub rate: f64,
    pub final_efficiency: f64,
    pub peak_efficiency: f64,
    pub peak_step: usize,
    pub mean_efficiency: f64,
    pub regime: Regime,
}

/// How disorder realizations relate across the rates of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealizationPolicy {
    /// Every rate sees the same disorder realizations.
    #[default]
    SharedDisorder,
    /// Each rate draws its own realizations from a dedicated stream.
    IndependentPerRate,
    /// One generator seeded once and carried from rate to rate.
    ContinuedStream,
}

impl fmt::Display for RealizationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RealizationPolicy::SharedDisorder => write!(f, "shared"),
            RealizationPolicy::IndependentPerRate => write!(f, "independent"),
            RealizationPolicy::ContinuedStream => write!(f, "continued"),
        }
    }
}

impl FromStr for RealizationPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" | "shared_disorder" => Ok(RealizationPolicy::SharedDisorder),
            "independent" | "independent_per_rate" => Ok(RealizationPolicy::IndependentPerRate),
            "continued" | "continued_stream" => Ok(RealizationPolicy::ContinuedStream),
            other => Err(ValidationError::field(
                "realization_policy",
                format!("unknown policy '{}' (expected shared, independent or continued)", other),
            )),
        }
    }
}

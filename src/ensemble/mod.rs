// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Disorder ensembles and dephasing-rate sweeps.
//!
//! For each dephasing rate γ the sink population is averaged over S
//! independent disorder realizations:
//!
//!   η_γ(t_k) = (1/S) Σ_s ⟨N−1| ρ_s(t_k) |N−1⟩
//!
//! Every realization draws its site energies from its own seeded ChaCha8
//! substream ([`SeedStream`]), so results are reproducible for a given
//! seed and independent of thread count. How realizations relate across
//! rates is selected by [`RealizationPolicy`].
//!
//! # Example
//!
//! ```ignore
//! use enaqt_chain::ensemble::{sweep, EnsembleParams};
//!
//! let result = sweep(EnsembleParams::default(), &[0.0, 1.5, 10.0], 42)?;
//! for s in result.summaries() {
//!     println!("{:>6.2}  {:.4}  {}", s.rate, s.final_efficiency, s.regime);
//! }
//! ```

pub mod seed;
pub mod simulate;
pub mod sweep;
pub mod types;

pub use seed::SeedStream;
pub use simulate::{EnsembleParams, EnsembleSimulator};
pub use sweep::{sweep, RegimeSweep};
pub use types::{
    EfficiencyTrajectory, EnsembleResult, RateTrajectory, RealizationPolicy, Regime,
    RegimeSummary,
};

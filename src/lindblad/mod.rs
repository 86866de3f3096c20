// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Open-system dynamics of a single excitation on the chain.
//!
//! The continuous model is the GKSL master equation with site-local
//! pure dephasing:
//!
//!   dρ/dt = -i[H, ρ] + γ Σ_i (|i⟩⟨i| ρ |i⟩⟨i| − ½{|i⟩⟨i|, ρ})
//!
//! which is integrated by alternating an exact unitary step with the exact
//! dephasing map over each tick.
//!
//! This module provides:
//! - [`hermitian_exp`]: exp(−iHΔt) through symmetric eigendecomposition
//! - [`UnitaryPropagator`]: ρ → UρU†
//! - [`DephasingChannel`]: coherence damping by e^{−γΔt}
//! - [`TrajectoryRecorder`]: checked sink-population readout
//! - [`evolve`] / [`sink_trajectory`]: the split-step loop
//!
//! # Example
//!
//! ```ignore
//! use enaqt_chain::chain::Hamiltonian;
//! use enaqt_chain::lindblad::sink_trajectory;
//!
//! let h = Hamiltonian::uniform(2, 1.0)?;
//! let p = sink_trajectory(&h, 0.0, 0.5, 4)?;  // sin²(t) at t = 0.5, 1.0, …
//! ```
//!
//! # References
//!
//! - Lindblad, G. (1976). Commun. Math. Phys. 48, 119.
//! - Rebentrost, P., Mohseni, M., Kassal, I., Lloyd, S., & Aspuru-Guzik, A.
//!   (2009). New J. Phys. 11, 033003.
//! - Plenio, M. B. & Huelga, S. F. (2008). New J. Phys. 10, 113019.

pub mod dephasing;
pub mod expm;
pub mod integrate;
pub mod propagate;
pub mod record;
pub mod types;

pub use dephasing::{dephase, DephasingChannel};
pub use expm::hermitian_exp;
pub use integrate::{evolve, sink_trajectory};
pub use propagate::{unitary_step, UnitaryPropagator};
pub use record::TrajectoryRecorder;
pub use types::{localized_state, DensityMatrix, StepDiagnostics};

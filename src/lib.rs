// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Environment-assisted quantum transport (ENAQT) on a disordered chain.
//!
//! A single excitation starts on site 0 of an N-site tight-binding chain
//! with random site energies and is tracked to site N−1 (the sink) while
//! pure dephasing destroys coherences at a configurable rate. Averaging
//! the sink population over many disorder realizations, for several
//! rates, exposes the ENAQT signature: moderate noise transports better
//! than none at all or too much.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          enaqt-sim (CLI driver)          │
//! ├─────────────────────────────────────────┤
//! │   RegimeSweep  (one run per rate)        │
//! ├─────────────────────────────────────────┤
//! │   EnsembleSimulator  (rayon, substreams) │
//! ├──────────────────┬──────────────────────┤
//! │ chain::generate  │  lindblad::evolve     │
//! │ (rand_chacha)    │  U ρ U†, dephasing    │
//! │                  │  (nalgebra, ndarray)  │
//! └──────────────────┴──────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`chain`]: Disordered Hamiltonian construction
//! - [`lindblad`]: Unitary propagation, dephasing and sink readout
//! - [`ensemble`]: Disorder averaging and dephasing-rate sweeps
//! - [`config`]: Configuration management
//! - [`validation`]: Input validation utilities
//! - [`error`]: Error types

pub mod chain;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod lindblad;
pub mod validation;

pub use config::Config;
pub use error::{Error, Result};

#[cfg(test)]
pub mod test_utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

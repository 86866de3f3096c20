// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Linear chain model: site 0 is the source, site N−1 the sink.

pub mod hamiltonian;

pub use hamiltonian::{generate, Hamiltonian};

/// Index of the injection site.
pub const SOURCE_SITE: usize = 0;

/// Index of the extraction site for an `n`-site chain.
pub fn sink_site(num_sites: usize) -> usize {
    num_sites - 1
}

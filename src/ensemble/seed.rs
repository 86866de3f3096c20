// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Explicitly seeded random substreams for disorder realizations.
//!
//! A [`SeedStream`] is a ChaCha8 key (from the user seed) plus a 64-bit
//! stream id. Sample `s` reads from word position `s << SAMPLE_SPACING_BITS`
//! of that stream, so samples never overlap and each one can be generated
//! independently of the others and of execution order.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// log2 of the number of 32-bit words reserved per sample.
const SAMPLE_SPACING_BITS: u32 = 32;

/// Source of per-sample generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedStream {
    seed: u64,
    stream: u64,
}

impl SeedStream {
    /// Stream 0 of the generator keyed by `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Same key, different ChaCha stream.
    pub fn with_stream(self, stream: u64) -> Self {
        Self { stream, ..self }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Generator for realization `sample`.
    pub fn sample_rng(&self, sample: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos((sample as u128) << SAMPLE_SPACING_BITS);
        rng
    }
}

// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Input validation for simulation parameters.
//!
//! Every check runs before any propagation work starts, so an invalid
//! configuration never produces a partial result.

use crate::error::{Result, ValidationError};

/// Validate the chain geometry and energetics.
pub fn validate_chain(num_sites: usize, coupling: f64, disorder: f64) -> Result<()> {
    if num_sites < 2 {
        return Err(ValidationError::field(
            "num_sites",
            format!("must be at least 2, got {}", num_sites),
        )
        .into());
    }

    if !coupling.is_finite() {
        return Err(ValidationError::field(
            "coupling",
            format!("must be finite, got {}", coupling),
        )
        .into());
    }

    if !disorder.is_finite() || disorder < 0.0 {
        return Err(ValidationError::field(
            "disorder",
            format!("must be finite and >= 0, got {}", disorder),
        )
        .into());
    }

    // The sampler rescales the window width 2W by slightly more than 1.
    if !(4.0 * disorder).is_finite() {
        return Err(ValidationError::field(
            "disorder",
            format!("sampling window [-{0}, {0}] is too wide", disorder),
        )
        .into());
    }

    Ok(())
}

/// Validate the time discretization.
pub fn validate_time_step(dt: f64) -> Result<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(ValidationError::field("dt", format!("must be finite and > 0, got {}", dt)).into());
    }
    Ok(())
}

/// Validate step and sample counts.
pub fn validate_counts(num_time_steps: usize, samples: usize) -> Result<()> {
    if num_time_steps == 0 {
        return Err(ValidationError::field("num_time_steps", "must be greater than 0").into());
    }
    if samples == 0 {
        return Err(ValidationError::field("samples", "must be greater than 0").into());
    }
    Ok(())
}

/// Validate a single dephasing rate.
pub fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(ValidationError::field(
            "dephasing_rate",
            format!("must be finite and >= 0, got {}", rate),
        )
        .into());
    }
    Ok(())
}

/// Validate the list of dephasing rates for a sweep.
///
/// Rates key the sweep result, so duplicates are rejected.
pub fn validate_rates(rates: &[f64]) -> Result<()> {
    if rates.is_empty() {
        return Err(ValidationError::field("dephasing_rates", "must not be empty").into());
    }

    for (i, &rate) in rates.iter().enumerate() {
        validate_rate(rate)?;
        if rates[..i].contains(&rate) {
            return Err(ValidationError::field(
                "dephasing_rates",
                format!("duplicate rate {}", rate),
            )
            .into());
        }
    }

    Ok(())
}

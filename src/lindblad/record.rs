// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sink-population readout with numerical sanity checks.

use super::types::DensityMatrix;
use crate::error::NumericalError;

/// Largest imaginary part tolerated on a diagonal entry.
pub const IMAGINARY_TOLERANCE: f64 = 1e-9;

/// Slack allowed outside [0, 1] before a population counts as unphysical.
pub const POPULATION_TOLERANCE: f64 = 1e-8;

/// Records the population of one site at every step.
///
/// Values inside the tolerance band are stored as computed, not clipped.
#[derive(Debug, Clone)]
pub struct TrajectoryRecorder {
    site: usize,
    values: Vec<f64>,
}

impl TrajectoryRecorder {
    /// Recorder for `site`, preallocating `capacity` steps.
    pub fn new(site: usize, capacity: usize) -> Self {
        Self {
            site,
            values: Vec::with_capacity(capacity),
        }
    }

    /// Recorder for the last site of an `n`-site chain.
    pub fn sink(num_sites: usize, capacity: usize) -> Self {
        Self::new(crate::chain::sink_site(num_sites), capacity)
    }

    /// Site being recorded.
    pub fn site(&self) -> usize {
        self.site
    }

    /// Re ρ[site, site], checked against the tolerances above.
    ///
    /// # Panics
    /// Panics if `rho` is not square or has no row for the recorded site.
    pub fn measure(&self, rho: &DensityMatrix, step: usize) -> Result<f64, NumericalError> {
        let (rows, cols) = rho.dim();
        assert!(
            rows == cols && self.site < rows,
            "cannot read site {} from a {}x{} density matrix",
            self.site,
            rows,
            cols
        );
        let z = rho[[self.site, self.site]];

        if !z.re.is_finite() || !z.im.is_finite() {
            return Err(NumericalError::NonFinite { step, value: z.re });
        }
        if z.im.abs() > IMAGINARY_TOLERANCE {
            return Err(NumericalError::ComplexPopulation {
                step,
                imaginary: z.im,
            });
        }
        if z.re < -POPULATION_TOLERANCE || z.re > 1.0 + POPULATION_TOLERANCE {
            return Err(NumericalError::OutOfRange {
                step,
                value: z.re,
                tolerance: POPULATION_TOLERANCE,
            });
        }

        Ok(z.re)
    }

    /// Measure and append; the step index is the number of values recorded so far.
    pub fn record(&mut self, rho: &DensityMatrix) -> Result<f64, NumericalError> {
        let value = self.measure(rho, self.values.len())?;
        self.values.push(value);
        Ok(value)
    }

    /// Consume the recorder, returning one value per recorded step.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lindblad::types::localized_state;
    use num_complex::Complex64;

    #[test]
    fn test_measures_sink_population() {
        let rho = localized_state(3, 2);
        let rec = TrajectoryRecorder::sink(3, 1);
        assert_eq!(rec.site(), 2);
        assert_eq!(rec.measure(&rho, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_record_appends_in_order() {
        let mut rec = TrajectoryRecorder::sink(2, 2);
        rec.record(&localized_state(2, 0)).unwrap();
        rec.record(&localized_state(2, 1)).unwrap();
        assert_eq!(rec.into_values(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_small_drift_is_kept_unclipped() {
        let mut rho = localized_state(2, 0);
        rho[[1, 1]] = Complex64::new(-1e-12, 1e-12);
        assert_eq!(TrajectoryRecorder::sink(2, 1).measure(&rho, 0).unwrap(), -1e-12);
    }

    #[test]
    fn test_nan_population_rejected() {
        let mut rho = localized_state(2, 0);
        rho[[1, 1]] = Complex64::new(f64::NAN, 0.0);
        let err = TrajectoryRecorder::sink(2, 1).measure(&rho, 4).unwrap_err();
        assert!(matches!(err, NumericalError::NonFinite { step: 4, .. }));
    }

    #[test]
    fn test_out_of_range_population_rejected() {
        let mut rho = localized_state(2, 0);
        rho[[1, 1]] = Complex64::new(1.01, 0.0);
        let rec = TrajectoryRecorder::sink(2, 1);
        assert!(matches!(
            rec.measure(&rho, 0),
            Err(NumericalError::OutOfRange { .. })
        ));

        rho[[1, 1]] = Complex64::new(-1e-6, 0.0);
        assert!(matches!(
            rec.measure(&rho, 0),
            Err(NumericalError::OutOfRange { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "cannot read site 3 from a 2x2 density matrix")]
    fn test_site_outside_matrix_panics() {
        let rec = TrajectoryRecorder::sink(4, 1);
        let _ = rec.measure(&localized_state(2, 0), 0);
    }

    #[test]
    #[should_panic(expected = "cannot read site 1 from a 2x3 density matrix")]
    fn test_non_square_matrix_panics() {
        let rho = DensityMatrix::zeros((2, 3));
        let _ = TrajectoryRecorder::sink(2, 1).measure(&rho, 0);
    }

    #[test]
    fn test_imaginary_population_rejected() {
        let mut rho = localized_state(2, 0);
        rho[[1, 1]] = Complex64::new(0.5, 1e-6);
        assert!(matches!(
            TrajectoryRecorder::sink(2, 1).measure(&rho, 1),
            Err(NumericalError::ComplexPopulation { step: 1, .. })
        ));
    }
}

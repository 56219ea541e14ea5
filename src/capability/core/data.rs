//! Observation containers for the capability tracker.
//!
//! Purpose
//! -------
//! Provide a small, validated container for an aligned `(time, score)`
//! series. All input checks happen once, at construction, so the filter and
//! optimizer can assume clean data and never re-validate inside hot loops.
//!
//! Invariants
//! ----------
//! - `times.len() == scores.len() > 0`.
//! - Times are finite, `>= 0`, and non-decreasing (ties allowed; a tie means a
//!   zero-length propagation step).
//! - Scores are finite and in `[0, 1]`.
//!
//! Conventions
//! -----------
//! - Times are elapsed weeks since the first assessment, but any consistent
//!   unit works; drift and diffusion rates are per unit of time.
//! - Raw percentage scores go through [`Observations::from_percentages`].
use crate::capability::{
    core::validation::{validate_scores, validate_times},
    errors::{CapabilityError, CapabilityResult},
};
use ndarray::Array1;

/// `Observations`: validated, aligned time and score series.
///
/// Fields
/// ------
/// - `times`: `Array1<f64>`, non-negative, non-decreasing.
/// - `scores`: `Array1<f64>`, each in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    /// Observation times.
    pub times: Array1<f64>,
    /// Normalized scores in `[0, 1]`.
    pub scores: Array1<f64>,
}

impl Observations {
    /// Construct a validated [`Observations`] from raw arrays.
    ///
    /// Errors
    /// ------
    /// - `CapabilityError::LengthMismatch` when the arrays differ in length.
    /// - `CapabilityError::EmptySeries` when both are empty.
    /// - Any error from [`validate_times`] or [`validate_scores`].
    pub fn new(times: Array1<f64>, scores: Array1<f64>) -> CapabilityResult<Observations> {
        if times.len() != scores.len() {
            return Err(CapabilityError::LengthMismatch {
                times: times.len(),
                scores: scores.len(),
            });
        }
        if times.is_empty() {
            return Err(CapabilityError::EmptySeries);
        }
        validate_times(times.view())?;
        validate_scores(scores.view())?;
        Ok(Observations { times, scores })
    }

    /// Construct from percentage scores (`0..=100`), dividing by 100 first.
    pub fn from_percentages(
        times: Array1<f64>, percentages: Array1<f64>,
    ) -> CapabilityResult<Observations> {
        Observations::new(times, percentages / 100.0)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false` for a constructed value; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the final observation.
    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Happy path keeps the arrays untouched.
    //
    // Given
    // -----
    // - Four aligned observations.
    //
    // Expect
    // ------
    // - `Ok`, same arrays, `last_time == 3`.
    fn new_accepts_valid_series() {
        let obs = Observations::new(array![0.0, 1.0, 2.0, 3.0], array![0.2, 0.4, 0.5, 0.7])
            .expect("valid observations");
        assert_eq!(obs.len(), 4);
        assert!(!obs.is_empty());
        assert_eq!(obs.last_time(), 3.0);
    }

    #[test]
    // Purpose
    // -------
    // Shape errors are caught before element checks.
    //
    // Given
    // -----
    // - Three times and two scores; then two empty arrays.
    //
    // Expect
    // ------
    // - `LengthMismatch { 3, 2 }` and `EmptySeries`.
    fn new_rejects_mismatched_and_empty_series() {
        assert_eq!(
            Observations::new(array![0.0, 1.0, 2.0], array![0.1, 0.2]),
            Err(CapabilityError::LengthMismatch { times: 3, scores: 2 })
        );
        assert_eq!(
            Observations::new(Array1::zeros(0), Array1::zeros(0)),
            Err(CapabilityError::EmptySeries)
        );
    }

    #[test]
    // Purpose
    // -------
    // Percentages are scaled into the unit interval before validation.
    //
    // Given
    // -----
    // - Scores 40, 55, 100 and then 120.
    //
    // Expect
    // ------
    // - The first becomes [0.4, 0.55, 1.0]; 120 is out of range.
    fn from_percentages_scales_then_validates() {
        let obs = Observations::from_percentages(array![0.0, 2.0, 5.0], array![40.0, 55.0, 100.0])
            .expect("valid percentages");
        assert_abs_diff_eq!(obs.scores[1], 0.55, epsilon = 1e-12);
        assert!(matches!(
            Observations::from_percentages(array![0.0], array![120.0]),
            Err(CapabilityError::ScoreOutOfRange { index: 0, .. })
        ));
    }
}

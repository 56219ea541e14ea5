//! Out-of-sample capability forecasts from the final filter state.
//!
//! Each requested time is projected independently from the last posterior
//! moments under the fitted random walk with drift:
//!
//! - `mean(t) = last_mean + mu (t - last_time)`
//! - `var(t)  = last_variance + sigma_omega² (t - last_time)`
//!
//! No ensemble is simulated, so forecasts are deterministic and the variance
//! is non-decreasing in the horizon.
use crate::capability::{
    core::params::CapabilityParams,
    errors::{CapabilityError, CapabilityResult},
};
use ndarray::{Array1, ArrayView1};

/// Forecast means and variances at the requested times.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub times: Array1<f64>,
    pub capability: Array1<f64>,
    pub uncertainty: Array1<f64>,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn std_dev(&self) -> Array1<f64> {
        self.uncertainty.mapv(f64::sqrt)
    }

    /// `(mean - z·sd, mean + z·sd)` envelopes.
    pub fn bands(&self, z: f64) -> (Array1<f64>, Array1<f64>) {
        let half = self.std_dev() * z;
        (&self.capability - &half, &self.capability + &half)
    }
}

/// Project `(last_mean, last_variance)` at `last_time` to `future_times`.
///
/// An empty `future_times` yields empty arrays.
///
/// Errors
/// ------
/// - `CapabilityError::InvalidForecastTime` for the first time that is
///   non-finite or earlier than `last_time`.
pub fn forecast(
    params: &CapabilityParams, last_time: f64, last_mean: f64, last_variance: f64,
    future_times: ArrayView1<f64>,
) -> CapabilityResult<ForecastResult> {
    for (index, &value) in future_times.iter().enumerate() {
        if !value.is_finite() || value < last_time {
            return Err(CapabilityError::InvalidForecastTime { index, value, last: last_time });
        }
    }
    let horizon = future_times.mapv(|t| t - last_time);
    let capability = horizon.mapv(|h| last_mean + params.mu * h);
    let process_var = params.sigma_omega * params.sigma_omega;
    let uncertainty = horizon.mapv(|h| last_variance + process_var * h);
    Ok(ForecastResult { times: future_times.to_owned(), capability, uncertainty })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn params() -> CapabilityParams {
        CapabilityParams::new(0.2, 0.3, 2.0, 0.0, 0.1, 0.0, 0.5).expect("valid params")
    }

    #[test]
    // Purpose
    // -------
    // An empty request is valid and returns empty arrays.
    //
    // Given
    // -----
    // - No future times.
    //
    // Expect
    // ------
    // - All three arrays are empty.
    fn forecast_of_empty_times_is_empty() {
        let out = forecast(&params(), 3.0, 0.4, 0.1, Array1::zeros(0).view()).expect("valid");
        assert!(out.is_empty());
        assert!(out.capability.is_empty() && out.uncertainty.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Closed-form projection with variance growing in the horizon.
    //
    // Given
    // -----
    // - last_time 3, mean 0.4, var 0.1, mu 0.2, sigma_omega 0.3.
    // - Times [3, 4, 8].
    //
    // Expect
    // ------
    // - mean [0.4, 0.6, 1.4]; var [0.1, 0.19, 0.55]; non-decreasing.
    fn forecast_projects_mean_and_variance() {
        let out = forecast(&params(), 3.0, 0.4, 0.1, array![3.0, 4.0, 8.0].view()).expect("valid");

        for (got, want) in out.capability.iter().zip([0.4, 0.6, 1.4]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        for (got, want) in out.uncertainty.iter().zip([0.1, 0.19, 0.55]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert!(out.uncertainty.windows(2).into_iter().all(|w| w[0] <= w[1]));
        assert_abs_diff_eq!(out.bands(1.0).1[0], 0.4 + 0.1_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Times before the last observation, or non-finite, are rejected.
    //
    // Given
    // -----
    // - last_time 3 and requests [4, 2.5] and [NaN].
    //
    // Expect
    // ------
    // - `InvalidForecastTime` at index 1 and index 0.
    fn forecast_rejects_past_and_nan_times() {
        assert_eq!(
            forecast(&params(), 3.0, 0.0, 0.1, array![4.0, 2.5].view()),
            Err(CapabilityError::InvalidForecastTime { index: 1, value: 2.5, last: 3.0 })
        );
        assert!(matches!(
            forecast(&params(), 3.0, 0.0, 0.1, array![f64::NAN].view()),
            Err(CapabilityError::InvalidForecastTime { index: 0, .. })
        ));
    }
}

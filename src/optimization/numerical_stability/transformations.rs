//! Numerical stability utilities.
//!
//! Provides safe implementations of the logistic family of transforms,
//! which are prone to overflow in naïve form, plus the scaled-logistic box
//! mapping used to run an unconstrained optimizer over bounded parameters.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp distance from the endpoints of `(0, 1)`.
//! - [`safe_logistic(x)`]: stable `1 / (1 + exp(-x))`, ℝ → (0, 1).
//! - [`safe_logit(p)`]: stable `ln(p / (1 - p))`, (0, 1) → ℝ.
//! - [`bounded_from_unconstrained`] / [`unconstrained_from_bounded`]: map
//!   between ℝ and an open interval `(lower, upper)`.

/// Distance kept from the endpoints of the unit interval.
///
/// `safe_logit` clamps its input into `[LOGIT_EPS, 1 - LOGIT_EPS]` so that
/// values sitting exactly on a bound map to a large but finite θ.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so `exp` is only ever evaluated at a
/// non-positive argument, which keeps the result free of overflow for any
/// finite input.
///
/// # Returns
/// - `σ(x)` in `[0, 1]`. In `f64` the result saturates to exactly `0.0` or
///   `1.0` once `|x|` exceeds roughly 745 and 37 respectively; callers that
///   need the open interval clamp afterwards.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable logit `ln(p / (1 - p))`.
///
/// The input is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` first, so `0` and
/// `1` map to finite values of magnitude about 27.6.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Map an unconstrained real `theta` into the interval `(lower, upper)`.
///
/// `v = lower + (upper - lower) · σ(theta)`.
///
/// The result is clamped into `[lower, upper]` so rounding in
/// `lower + (upper - lower)` can never step outside the box. Assumes
/// `lower < upper` and both finite; bounds are validated where they are
/// constructed.
pub fn bounded_from_unconstrained(theta: f64, lower: f64, upper: f64) -> f64 {
    (lower + (upper - lower) * safe_logistic(theta)).clamp(lower, upper)
}

/// Inverse of [`bounded_from_unconstrained`].
///
/// `theta = logit((value - lower) / (upper - lower))`, with the ratio clamped
/// by [`safe_logit`] so values on a bound stay finite.
pub fn unconstrained_from_bounded(value: f64, lower: f64, upper: f64) -> f64 {
    safe_logit((value - lower) / (upper - lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable logistic with the naïve formula on a safe grid.
    // - Tail behavior (no NaN/overflow) for large |x|.
    // - Logit/logistic inverse relationship and endpoint clamping.
    // - The scaled box mapping staying inside its bounds.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Confirm `safe_logistic` matches the textbook formula where the latter
    // is well-conditioned.
    //
    // Given
    // -----
    // - A grid of x in [-10, 10].
    //
    // Expect
    // ------
    // - Relative agreement to 1e-12.
    fn safe_logistic_matches_naive_formula_on_safe_grid() {
        for i in -20..=20 {
            let x = i as f64 * 0.5;
            let naive = 1.0 / (1.0 + (-x).exp());
            assert_relative_eq!(safe_logistic(x), naive, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Make sure extreme arguments never produce NaN.
    //
    // Given
    // -----
    // - x = ±1e6.
    //
    // Expect
    // ------
    // - Results are finite and within [0, 1].
    fn safe_logistic_tails_are_finite() {
        for x in [-1e6, 1e6] {
            let y = safe_logistic(x);
            assert!(y.is_finite());
            assert!((0.0..=1.0).contains(&y));
        }
    }

    #[test]
    // Purpose
    // -------
    // Logit inverts logistic in the interior and stays finite at endpoints.
    //
    // Given
    // -----
    // - Interior probabilities and the endpoints 0 and 1.
    //
    // Expect
    // ------
    // - `safe_logistic(safe_logit(p)) ≈ p` for interior p.
    // - `safe_logit(0)` and `safe_logit(1)` are finite with opposite signs.
    fn safe_logit_inverts_logistic_and_clamps_endpoints() {
        for p in [0.01, 0.2, 0.5, 0.77, 0.99] {
            assert_relative_eq!(safe_logistic(safe_logit(p)), p, max_relative = 1e-12);
        }
        let lo = safe_logit(0.0);
        let hi = safe_logit(1.0);
        assert!(lo.is_finite() && hi.is_finite());
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // The scaled box mapping round-trips and respects its interval.
    //
    // Given
    // -----
    // - Interval [0.1, 10] and several interior values.
    // - Unconstrained inputs spanning ±50.
    //
    // Expect
    // ------
    // - Interior values round-trip.
    // - Every mapped value lies in [lower, upper].
    fn bounded_mapping_round_trips_and_stays_in_box() {
        let (lower, upper) = (0.1, 10.0);
        for v in [0.2, 1.0, 5.5, 9.9] {
            let theta = unconstrained_from_bounded(v, lower, upper);
            assert_relative_eq!(
                bounded_from_unconstrained(theta, lower, upper),
                v,
                max_relative = 1e-10
            );
        }
        for i in -10..=10 {
            let v = bounded_from_unconstrained(i as f64 * 5.0, lower, upper);
            assert!(v >= lower && v <= upper);
        }
    }
}

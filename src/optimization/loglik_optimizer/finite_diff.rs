//! loglik_optimizer::finite_diff: finite-difference gradients with error capture.
//!
//! Purpose
//! -------
//! The capability log-likelihood runs an ensemble filter and has no closed
//! form gradient, so every gradient the solver asks for is a finite
//! difference of the cost. This module wraps the `finitediff` crate so that
//! errors raised by the cost (which the FD closures cannot return) are
//! captured and surfaced, and so that the resulting gradient is validated.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences if any evaluation failed or the central result is
//!   not finite.
//! - [`run_fd_diff`] performs the forward-difference pass on its own.
//!
//! Invariants & assumptions
//! ------------------------
//! - Differences are taken in the unconstrained θ-space.
//! - A cost error captured during the forward pass is a hard failure.
//! - Returned gradients always pass [`validate_grad`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Finite-difference gradient of a fallible scalar cost.
///
/// Parameters
/// ----------
/// - `theta`: point at which to differentiate.
/// - `cost`: fallible objective. Errors are stashed in a shared cell and the
///   FD closure sees `NaN` for that evaluation.
///
/// Returns
/// -------
/// - Central-difference gradient when every evaluation succeeded and the
///   result is finite.
/// - Otherwise the forward-difference gradient from [`run_fd_diff`].
///
/// Errors
/// ------
/// - Any cost error captured during the forward pass.
/// - `OptError::InvalidGradient` / `GradientDimMismatch` if the forward
///   gradient fails validation.
pub fn fd_gradient<C>(theta: &Theta, cost: C) -> OptResult<Grad>
where
    C: Fn(&Theta) -> Result<f64, Error>,
{
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let cost_func = |x: &Theta| -> f64 {
        match cost(x) {
            Ok(val) => val,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };
    let central = theta.central_diff(&cost_func);
    if closure_err.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(theta, &cost_func, &closure_err)
}

/// Forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, runs `forward_diff`, then returns the captured error
/// if one was recorded, else the validated gradient.
///
/// Errors
/// ------
/// - The error captured in `closure_err` (mapped through `From<Error>`).
/// - Validation errors from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Accuracy of the central-difference path on a smooth objective.
    // - Forward fallback when the cost fails part of the time.
    // - Error propagation when every evaluation fails.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Central differences recover the gradient of a quadratic.
    //
    // Given
    // -----
    // - `c(θ) = θ₀² + 3 θ₁` at θ = (1, -2).
    //
    // Expect
    // ------
    // - Gradient ≈ (2, 3).
    fn fd_gradient_quadratic_matches_analytic() {
        // Arrange
        let theta = array![1.0, -2.0];
        let cost = |x: &Theta| -> Result<f64, Error> { Ok(x[0] * x[0] + 3.0 * x[1]) };

        // Act
        let grad = fd_gradient(&theta, cost).expect("smooth cost should differentiate");

        // Assert
        assert_abs_diff_eq!(grad[0], 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[1], 3.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // A cost that errors on every call surfaces its error.
    //
    // Given
    // -----
    // - A cost returning `OptError::DegenerateEnsemble` boxed as argmin's error.
    //
    // Expect
    // ------
    // - `Err(OptError::DegenerateEnsemble { .. })`.
    fn fd_gradient_propagates_cost_errors() {
        let theta = array![0.5];
        let cost = |_: &Theta| -> Result<f64, Error> {
            Err(OptError::DegenerateEnsemble { step: 0, p_yy: 0.0 }.into())
        };

        let err = fd_gradient(&theta, cost).expect_err("failing cost must fail");

        assert_eq!(err, OptError::DegenerateEnsemble { step: 0, p_yy: 0.0 });
    }

    #[test]
    // Purpose
    // -------
    // Only the central pass fails: the forward pass should rescue the
    // gradient.
    //
    // Given
    // -----
    // - A linear cost that errors on its first call only. The central pass
    //   makes two calls per coordinate; the first is poisoned.
    //
    // Expect
    // ------
    // - `Ok(grad)` with grad ≈ 4.
    fn fd_gradient_falls_back_to_forward_difference() {
        let theta = array![1.0];
        let calls = Cell::new(0usize);
        let cost = |x: &Theta| -> Result<f64, Error> {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                return Err(OptError::UnknownError.into());
            }
            Ok(4.0 * x[0])
        };

        let grad = fd_gradient(&theta, cost).expect("forward pass should succeed");

        assert_abs_diff_eq!(grad[0], 4.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // `run_fd_diff` rejects non-finite gradients.
    //
    // Given
    // -----
    // - A closure returning NaN without recording an error.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidGradient { .. })`.
    fn run_fd_diff_non_finite_gradient_is_invalid() {
        let theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        let err = run_fd_diff(&theta, &f, &closure_err).expect_err("NaN gradient must fail");

        assert!(matches!(err, OptError::InvalidGradient { .. }));
    }
}

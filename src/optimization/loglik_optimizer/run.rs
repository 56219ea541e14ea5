//! Execution helper that runs an `argmin` solver on a log-likelihood problem and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
use argmin::core::{CostFunction, Executor, State};

/// Run an `argmin` optimization for a log-likelihood problem.
///
/// Shared runner for both line-search variants. It sets `theta0` on the
/// executor state, attaches the slog observer when the `obs_slog` feature is
/// on and `opts.verbose` is set, applies `max_iter`, runs, and converts the
/// final state into an [`OptimOutcome`].
///
/// # Type Parameters
/// - `F`: log-likelihood implementing [`LogLikelihood`].
/// - `S`: any `argmin` solver over `ArgMinAdapter<'a, F>` whose `IterState`
///   uses `Theta` / `Grad` / `f64`.
///
/// # Errors
/// - Propagates `argmin` runtime errors (solver, line search, or model errors
///   raised during cost evaluation) via `From<argmin::core::Error>`.
/// - Propagates validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem);
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>)
where
    F: LogLikelihood,
{
    match problem.cost(theta0) {
        Ok(cost) => tracing::debug!(loglik = -cost, dim = theta0.len(), "optimizer start"),
        Err(err) => tracing::debug!(%err, "optimizer start: initial cost failed"),
    }
}

//! Logistic observation model: latent capability → expected score.
//!
//! `score = 1 / (1 + exp(-g (c - c0)))`, evaluated through the overflow-safe
//! [`safe_logistic`] and clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` so the
//! result stays strictly inside `(0, 1)` even where `f64` would round to an
//! endpoint.
use crate::optimization::numerical_stability::{LOGIT_EPS, safe_logistic};
use ndarray::{Array1, ArrayView1};

/// Expected score for a single capability value.
pub fn logistic(c: f64, g: f64, c0: f64) -> f64 {
    safe_logistic(g * (c - c0)).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
}

/// Elementwise [`logistic`] over an ensemble.
pub fn logistic_ensemble(particles: ArrayView1<f64>, g: f64, c0: f64) -> Array1<f64> {
    particles.mapv(|c| logistic(c, g, c0))
}

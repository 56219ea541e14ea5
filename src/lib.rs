//! capability_tracking: ensemble Kalman filtering of a latent capability
//! from irregular, logistic test-score observations.
//!
//! Purpose
//! -------
//! Serve as the crate root. The crate estimates a latent scalar capability
//! trajectory from scores in `[0, 1]`, fits the model's parameters by
//! maximum likelihood, and forecasts capability at future times.
//!
//! Key behaviors
//! -------------
//! - [`capability`]: observations, parameters, the ensemble filter, the
//!   forecaster, and the user-facing `CapabilityModel`.
//! - [`optimization`]: a generic `LogLikelihood` maximizer (argmin L-BFGS
//!   with finite-difference gradients) and numerically stable transforms.
//!
//! Conventions
//! -----------
//! - Errors are returned as `CapabilityResult` / `OptResult`; the library
//!   never panics on invalid input.
//! - Logging goes through the `tracing` facade. The library installs no
//!   subscriber; binaries and tests choose one.
//! - Randomness is injected. Seeded configurations are bit-reproducible.
//!
//! Example
//! -------
//! ```
//! use capability_tracking::capability::prelude::*;
//! use ndarray::array;
//!
//! let data = Observations::new(array![0.0, 1.0, 2.0, 3.0], array![0.3, 0.45, 0.5, 0.65])?;
//! let options = CapabilityOptions::default()
//!     .with_noise(NoisePolicy::CommonRandomNumbers { seed: Some(42) });
//! let model = CapabilityModel::new(options);
//!
//! let params = CapabilityParams::new(0.2, 0.1, 2.0, 0.0, 0.1, -0.5, 0.2)?;
//! let out = model.filter(&params, &data)?;
//! assert_eq!(out.trajectory.len(), 4);
//! # Ok::<(), CapabilityError>(())
//! ```

pub mod capability;
pub mod optimization;

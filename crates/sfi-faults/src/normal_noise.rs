// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use sfi_core::SfiError;
use sfi_core::validate::{check_finite_parameter, check_positive_length};

use crate::model::{BlendMode, DEFAULT_SEED, FaultModel};
use crate::params::{FaultParams, optional_seed, require_scalar};

/// Additive Gaussian noise with mean `mu` and standard deviation `sigma`.
///
/// The random stream is seeded deterministically; consecutive `generate`
/// calls continue the stream and `reset` rewinds it to the seed.
#[derive(Clone, Debug)]
pub struct NormalNoiseFault {
    mu: f64,
    sigma: f64,
    seed: u64,
    rng: StdRng,
}

impl NormalNoiseFault {
    pub fn new(mu: f64, sigma: f64) -> Result<Self, SfiError> {
        Self::with_seed(mu, sigma, DEFAULT_SEED)
    }

    pub fn with_seed(mu: f64, sigma: f64, seed: u64) -> Result<Self, SfiError> {
        check_finite_parameter(mu, "mu")?;
        check_finite_parameter(sigma, "sigma")?;
        if sigma < 0.0 {
            return Err(SfiError::invalid_parameter(format!(
                "sigma must be >= 0, got {sigma}"
            )));
        }
        Ok(Self {
            mu,
            sigma,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        let mu = require_scalar(params, "mu")?;
        let sigma = require_scalar(params, "sigma")?;
        let seed = optional_seed(params, "seed")?.unwrap_or(DEFAULT_SEED);
        Self::with_seed(mu, sigma, seed)
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FaultModel for NormalNoiseFault {
    fn name(&self) -> &'static str {
        "NormalNoiseFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Additive
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        if self.sigma == 0.0 {
            return Ok(vec![self.mu; len]);
        }
        let dist = Normal::new(self.mu, self.sigma)
            .map_err(|e| SfiError::invalid_parameter(format!("normal distribution: {e}")))?;
        Ok((0..len).map(|_| dist.sample(&mut self.rng)).collect())
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        for key in params.keys() {
            match key.as_str() {
                "mu" | "sigma" | "seed" => {}
                other => {
                    return Err(SfiError::invalid_parameter(format!(
                        "unknown parameter '{other}' for NormalNoiseFault"
                    )));
                }
            }
        }
        if params.contains_key("mu") {
            let mu = require_scalar(params, "mu")?;
            check_finite_parameter(mu, "mu")?;
            self.mu = mu;
        }
        if params.contains_key("sigma") {
            let sigma = require_scalar(params, "sigma")?;
            check_finite_parameter(sigma, "sigma")?;
            if sigma < 0.0 {
                return Err(SfiError::invalid_parameter(format!(
                    "sigma must be >= 0, got {sigma}"
                )));
            }
            self.sigma = sigma;
        }
        if let Some(seed) = optional_seed(params, "seed")? {
            self.seed = seed;
            self.rng = StdRng::seed_from_u64(seed);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    fn boxed_clone(&self) -> Box<dyn FaultModel> {
        Box::new(self.clone())
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};
use sfi_core::SfiError;
use sfi_core::validate::{check_finite_parameter, check_positive_length};

use crate::model::{BlendMode, DEFAULT_SEED, FaultModel};
use crate::params::{FaultParams, optional_seed, require_scalar};

/// Additive noise drawn uniformly from the half-open interval
/// `[min_val, max_val)`.
#[derive(Clone, Debug)]
pub struct UniformNoiseFault {
    min_val: f64,
    max_val: f64,
    seed: u64,
    rng: StdRng,
}

impl UniformNoiseFault {
    pub fn new(min_val: f64, max_val: f64) -> Result<Self, SfiError> {
        Self::with_seed(min_val, max_val, DEFAULT_SEED)
    }

    pub fn with_seed(min_val: f64, max_val: f64, seed: u64) -> Result<Self, SfiError> {
        check_finite_parameter(min_val, "min_val")?;
        check_finite_parameter(max_val, "max_val")?;
        if max_val <= min_val {
            return Err(SfiError::invalid_parameter(format!(
                "max_val must be > min_val, got [{min_val}, {max_val})"
            )));
        }
        Ok(Self {
            min_val,
            max_val,
            seed,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        let min_val = require_scalar(params, "min_val")?;
        let max_val = require_scalar(params, "max_val")?;
        let seed = optional_seed(params, "seed")?.unwrap_or(DEFAULT_SEED);
        Self::with_seed(min_val, max_val, seed)
    }

    pub fn min_val(&self) -> f64 {
        self.min_val
    }

    pub fn max_val(&self) -> f64 {
        self.max_val
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FaultModel for UniformNoiseFault {
    fn name(&self) -> &'static str {
        "UniformNoiseFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Additive
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        // Bounds are validated at construction; Uniform::new panics otherwise.
        let dist = Uniform::new(self.min_val, self.max_val);
        Ok((0..len).map(|_| dist.sample(&mut self.rng)).collect())
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        for key in params.keys() {
            match key.as_str() {
                "min_val" | "max_val" | "seed" => {}
                other => {
                    return Err(SfiError::invalid_parameter(format!(
                        "unknown parameter '{other}' for UniformNoiseFault"
                    )));
                }
            }
        }
        let mut min_val = self.min_val;
        let mut max_val = self.max_val;
        if params.contains_key("min_val") {
            min_val = require_scalar(params, "min_val")?;
            check_finite_parameter(min_val, "min_val")?;
        }
        if params.contains_key("max_val") {
            max_val = require_scalar(params, "max_val")?;
            check_finite_parameter(max_val, "max_val")?;
        }
        if max_val <= min_val {
            return Err(SfiError::invalid_parameter(format!(
                "max_val must be > min_val, got [{min_val}, {max_val})"
            )));
        }
        self.min_val = min_val;
        self.max_val = max_val;
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

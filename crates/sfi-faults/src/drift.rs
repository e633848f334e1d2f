// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::{check_finite_parameter, check_positive_length};

use crate::model::{BlendMode, FaultModel};
use crate::params::{FaultParams, optional_bool, require_scalar};

/// Linearly increasing additive drift.
///
/// The n-th generated sample is `(n + prior) * drift_rate` with 1-based `n`.
/// In continuous mode `prior` advances by the generated length on every call,
/// so consecutive patterns continue the same ramp; `reset` rewinds it.
#[derive(Clone, Debug, PartialEq)]
pub struct DriftFault {
    drift_rate: f64,
    continuous: bool,
    prior: usize,
}

impl DriftFault {
    pub fn new(drift_rate: f64, continuous: bool) -> Result<Self, SfiError> {
        check_finite_parameter(drift_rate, "drift_rate")?;
        Ok(Self {
            drift_rate,
            continuous,
            prior: 0,
        })
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        let drift_rate = require_scalar(params, "drift_rate")?;
        let continuous = optional_bool(params, "continuous", false)?;
        Self::new(drift_rate, continuous)
    }

    pub fn drift_rate(&self) -> f64 {
        self.drift_rate
    }

    pub fn continuous(&self) -> bool {
        self.continuous
    }

    /// Number of samples already generated in continuous mode.
    pub fn prior(&self) -> usize {
        self.prior
    }
}

impl FaultModel for DriftFault {
    fn name(&self) -> &'static str {
        "DriftFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Additive
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        let pattern = (1 + self.prior..=len + self.prior)
            .map(|step| step as f64 * self.drift_rate)
            .collect();
        if self.continuous {
            self.prior += len;
        }
        Ok(pattern)
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        for key in params.keys() {
            match key.as_str() {
                "drift_rate" | "continuous" => {}
                other => {
                    return Err(SfiError::invalid_parameter(format!(
                        "unknown parameter '{other}' for DriftFault"
                    )));
                }
            }
        }
        if params.contains_key("drift_rate") {
            let drift_rate = require_scalar(params, "drift_rate")?;
            check_finite_parameter(drift_rate, "drift_rate")?;
            self.drift_rate = drift_rate;
        }
        if params.contains_key("continuous") {
            self.continuous = optional_bool(params, "continuous", self.continuous)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.prior = 0;
    }

    fn boxed_clone(&self) -> Box<dyn FaultModel> {
        Box::new(self.clone())
    }
}

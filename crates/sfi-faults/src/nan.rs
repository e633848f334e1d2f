// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::check_positive_length;

use crate::model::{BlendMode, FaultModel};
use crate::params::FaultParams;

/// Missing readings: the pattern is all-NaN and replaces the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NanFault;

impl NanFault {
    pub fn new() -> Self {
        Self
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        if let Some(key) = params.keys().next() {
            return Err(SfiError::invalid_parameter(format!(
                "unknown parameter '{key}' for NanFault"
            )));
        }
        Ok(Self)
    }
}

impl FaultModel for NanFault {
    fn name(&self) -> &'static str {
        "NanFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Replace
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        Ok(vec![f64::NAN; len])
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        if let Some(key) = params.keys().next() {
            return Err(SfiError::invalid_parameter(format!(
                "unknown parameter '{key}' for NanFault"
            )));
        }
        Ok(())
    }

    fn reset(&mut self) {}

    fn boxed_clone(&self) -> Box<dyn FaultModel> {
        Box::new(*self)
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::{check_finite_parameter, check_positive_length};

use crate::model::{BlendMode, FaultModel};
use crate::params::{FaultParams, require_scalar};

/// Constant additive offset.
#[derive(Clone, Debug, PartialEq)]
pub struct OffsetFault {
    offset_by: f64,
}

impl OffsetFault {
    pub fn new(offset_by: f64) -> Result<Self, SfiError> {
        check_finite_parameter(offset_by, "offset_by")?;
        Ok(Self { offset_by })
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        Self::new(require_scalar(params, "offset_by")?)
    }

    pub fn offset_by(&self) -> f64 {
        self.offset_by
    }
}

impl FaultModel for OffsetFault {
    fn name(&self) -> &'static str {
        "OffsetFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Additive
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        Ok(vec![self.offset_by; len])
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        for key in params.keys() {
            if key != "offset_by" {
                return Err(SfiError::invalid_parameter(format!(
                    "unknown parameter '{key}' for OffsetFault"
                )));
            }
        }
        if params.contains_key("offset_by") {
            let offset_by = require_scalar(params, "offset_by")?;
            check_finite_parameter(offset_by, "offset_by")?;
            self.offset_by = offset_by;
        }
        Ok(())
    }

    fn reset(&mut self) {}

    fn boxed_clone(&self) -> Box<dyn FaultModel> {
        Box::new(self.clone())
    }
}

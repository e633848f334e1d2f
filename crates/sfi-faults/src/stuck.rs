// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::{check_finite_parameter, check_positive_length};

use crate::model::{BlendMode, FaultModel};
use crate::params::{FaultParams, require_scalar};

/// Sensor frozen at a constant reading; the pattern replaces the input.
#[derive(Clone, Debug, PartialEq)]
pub struct StuckValueFault {
    stuck_val: f64,
}

impl StuckValueFault {
    pub fn new(stuck_val: f64) -> Result<Self, SfiError> {
        check_finite_parameter(stuck_val, "stuck_val")?;
        Ok(Self { stuck_val })
    }

    pub fn from_params(params: &FaultParams) -> Result<Self, SfiError> {
        Self::new(require_scalar(params, "stuck_val")?)
    }

    pub fn stuck_val(&self) -> f64 {
        self.stuck_val
    }
}

impl FaultModel for StuckValueFault {
    fn name(&self) -> &'static str {
        "StuckValueFault"
    }

    fn blend(&self) -> BlendMode {
        BlendMode::Replace
    }

    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError> {
        check_positive_length(len, "len")?;
        Ok(vec![self.stuck_val; len])
    }

    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError> {
        for key in params.keys() {
            if key != "stuck_val" {
                return Err(SfiError::invalid_parameter(format!(
                    "unknown parameter '{key}' for StuckValueFault"
                )));
            }
        }
        if params.contains_key("stuck_val") {
            let stuck_val = require_scalar(params, "stuck_val")?;
            check_finite_parameter(stuck_val, "stuck_val")?;
            self.stuck_val = stuck_val;
        }
        Ok(())
    }

    fn reset(&mut self) {}

    fn boxed_clone(&self) -> Box<dyn FaultModel> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::StuckValueFault;
    use crate::model::FaultModel;
    use crate::params::{FaultParams, ParamValue};

    #[test]
    fn apply_overwrites_input_with_stuck_value() {
        let mut fault = StuckValueFault::new(0.0).expect("stuck should build");
        assert_eq!(
            fault.apply(&[5.0, 6.0, 7.0]).expect("apply should succeed"),
            vec![0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn from_params_requires_stuck_val() {
        let params = FaultParams::new();
        let err = StuckValueFault::from_params(&params).expect_err("missing value must fail");
        assert!(err.to_string().contains("no stuck_val set in params"));

        let mut params = FaultParams::new();
        params.insert("stuck_val".to_string(), ParamValue::from(3.0));
        let fault = StuckValueFault::from_params(&params).expect("stuck should build");
        assert_eq!(fault.stuck_val(), 3.0);
    }
}

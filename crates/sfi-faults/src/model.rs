// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::check_non_empty;

use crate::params::FaultParams;

/// Seed used by stochastic faults when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// How a generated fault pattern combines with clean input values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// The pattern is added element-wise to the input.
    Additive,
    /// The pattern replaces the input outright.
    Replace,
}

/// A single fault generator.
///
/// Implementations produce a standalone fault pattern of a requested length;
/// [`FaultModel::apply`] blends that pattern onto clean input according to
/// the model's [`BlendMode`]. Stateful models (drift position, random
/// streams) advance on every `generate` call and rewind on `reset`.
pub trait FaultModel: Send {
    /// Type name of the fault, e.g. `"DriftFault"`.
    fn name(&self) -> &'static str;

    /// How this model's patterns combine with input values.
    fn blend(&self) -> BlendMode;

    /// Produces the next fault pattern of length `len`.
    fn generate(&mut self, len: usize) -> Result<Vec<f64>, SfiError>;

    /// Updates parameters in place, preserving unrelated internal state.
    ///
    /// Only keys present in `params` are applied; unknown keys are rejected.
    fn set_params(&mut self, params: &FaultParams) -> Result<(), SfiError>;

    /// Rewinds internal state to its post-construction value.
    fn reset(&mut self);

    /// Clones the model behind the trait object.
    fn boxed_clone(&self) -> Box<dyn FaultModel>;

    /// Applies the fault to clean input values.
    fn apply(&mut self, x: &[f64]) -> Result<Vec<f64>, SfiError> {
        check_non_empty(x, "x")?;
        let pattern = self.generate(x.len())?;
        Ok(match self.blend() {
            BlendMode::Additive => x.iter().zip(&pattern).map(|(a, b)| a + b).collect(),
            BlendMode::Replace => pattern,
        })
    }
}

impl Clone for Box<dyn FaultModel> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}

impl std::fmt::Debug for dyn FaultModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

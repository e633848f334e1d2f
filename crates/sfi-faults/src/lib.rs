// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Fault generators for numeric time-series data.
//!
//! Each fault type produces a standalone pattern of a requested length and
//! blends it onto clean input per its [`BlendMode`]: drift, offset and the
//! noise faults add to the input; stuck-value and NaN faults replace it.

pub mod drift;
pub mod model;
pub mod nan;
pub mod normal_noise;
pub mod offset;
pub mod params;
pub mod registry;
pub mod stuck;
pub mod uniform_noise;

pub use drift::DriftFault;
pub use model::{BlendMode, DEFAULT_SEED, FaultModel};
pub use nan::NanFault;
pub use normal_noise::NormalNoiseFault;
pub use offset::OffsetFault;
pub use params::{FaultParams, ParamValue};
pub use registry::{FaultFactory, FaultKind, FaultRegistry};
pub use stuck::StuckValueFault;
pub use uniform_noise::UniformNoiseFault;

pub fn crate_name() -> &'static str {
    "sfi-faults"
}

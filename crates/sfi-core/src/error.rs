// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error type for the sfi workspace.
///
/// Every validation failure is raised at the point of detection; no caller
/// retries or silently coerces. The variants map onto the failure kinds a
/// fault-injection run can hit, from constructor-time parameter checks to
/// shape checks during frame assembly.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SfiError {
    /// A fault constructor parameter is missing, non-finite, or out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The array/sequence supplied for fault application is unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A start/stop window falls outside the addressable range of the target.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The generation configuration is inconsistent or incomplete.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Component arrays or frame columns disagree in shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A fault object could not be built from its specification.
    #[error("fault instantiation failed: {0}")]
    Instantiation(String),
}

impl SfiError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    pub fn instantiation(msg: impl Into<String>) -> Self {
        Self::Instantiation(msg.into())
    }
}

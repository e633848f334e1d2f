// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use sfi_core::SfiError;

/// One fault parameter value.
///
/// Scalars and booleans configure a fault uniformly; lists are resolved per
/// column (or per row in horizontal mode) by the composition layer before
/// they reach a fault instance.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Scalar(f64),
    List(Vec<f64>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// True for values that apply to a fault instance as-is.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        Self::List(values)
    }
}

/// Keyword parameters for constructing or updating a fault instance.
pub type FaultParams = BTreeMap<String, ParamValue>;

/// Fetches a required scalar parameter.
pub fn require_scalar(params: &FaultParams, key: &str) -> Result<f64, SfiError> {
    match params.get(key) {
        Some(value) => value.as_scalar().ok_or_else(|| {
            SfiError::invalid_parameter(format!("{key} must be a scalar, got {value:?}"))
        }),
        None => Err(SfiError::invalid_parameter(format!(
            "no {key} set in params"
        ))),
    }
}

/// Fetches an optional scalar parameter.
pub fn optional_scalar(params: &FaultParams, key: &str) -> Result<Option<f64>, SfiError> {
    match params.get(key) {
        Some(value) => value
            .as_scalar()
            .map(Some)
            .ok_or_else(|| {
                SfiError::invalid_parameter(format!("{key} must be a scalar, got {value:?}"))
            }),
        None => Ok(None),
    }
}

/// Fetches an optional boolean parameter, falling back to `default`.
pub fn optional_bool(params: &FaultParams, key: &str, default: bool) -> Result<bool, SfiError> {
    match params.get(key) {
        Some(value) => value.as_bool().ok_or_else(|| {
            SfiError::invalid_parameter(format!("{key} must be a boolean, got {value:?}"))
        }),
        None => Ok(default),
    }
}

/// Fetches an optional seed parameter.
///
/// Seeds travel through parameter maps as scalars and must be non-negative
/// whole numbers.
pub fn optional_seed(params: &FaultParams, key: &str) -> Result<Option<u64>, SfiError> {
    match optional_scalar(params, key)? {
        Some(value) => {
            if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
                return Err(SfiError::invalid_parameter(format!(
                    "{key} must be a non-negative integer, got {value}"
                )));
            }
            Ok(Some(value as u64))
        }
        None => Ok(None),
    }
}

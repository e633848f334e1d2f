// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_faults::{FaultParams, ParamValue};

/// Resolves one parameter value for a generation call.
///
/// Scalars pass through. Length-1 sequences collapse to their value. Longer
/// sequences need a known `df_length`: a sequence of exactly `df_length`
/// values is indexed by row and so requires horizontal mode (`row` present);
/// a shorter one is allowed only with `repeat`, which indexes by row while
/// values remain and holds the last value once exhausted (in vertical mode
/// it collapses straight to the last value); a longer one always fails.
pub fn resolve_param(
    name: &str,
    value: &ParamValue,
    row: Option<usize>,
    df_length: Option<usize>,
    repeat: bool,
) -> Result<ParamValue, SfiError> {
    let values = match value {
        ParamValue::List(values) => values,
        scalar => return Ok(scalar.clone()),
    };
    if values.is_empty() {
        return Err(SfiError::invalid_config(format!(
            "parameter '{name}' is an empty sequence"
        )));
    }
    if values.len() == 1 {
        return Ok(ParamValue::Scalar(values[0]));
    }

    let df_length = df_length.ok_or_else(|| {
        SfiError::invalid_config(format!(
            "broadcast sequence for parameter '{name}' requires df_length"
        ))
    })?;
    if values.len() > df_length {
        return Err(SfiError::invalid_config(format!(
            "parameter '{name}' has {} values for df_length {df_length}",
            values.len()
        )));
    }
    if values.len() == df_length {
        let row = row.ok_or_else(|| {
            SfiError::invalid_config(format!(
                "per-row sequence for parameter '{name}' requires horizontal mode"
            ))
        })?;
        return Ok(ParamValue::Scalar(values[row]));
    }
    if !repeat {
        return Err(SfiError::invalid_config(format!(
            "parameter '{name}' has {} values for df_length {df_length} and repeat is disabled",
            values.len()
        )));
    }
    let idx = match row {
        Some(row) => row.min(values.len() - 1),
        None => values.len() - 1,
    };
    Ok(ParamValue::Scalar(values[idx]))
}

/// Resolves a full parameter map for one generation call.
pub fn resolve_params(
    params: &FaultParams,
    row: Option<usize>,
    df_length: Option<usize>,
    repeat: bool,
) -> Result<FaultParams, SfiError> {
    let mut resolved = FaultParams::new();
    for (name, value) in params {
        resolved.insert(
            name.clone(),
            resolve_param(name, value, row, df_length, repeat)?,
        );
    }
    Ok(resolved)
}

/// Keys whose values broadcast per row and so vary between rows.
pub fn varying_keys(params: &FaultParams) -> Vec<&str> {
    params
        .iter()
        .filter(|(_, value)| matches!(value, ParamValue::List(values) if values.len() > 1))
        .map(|(name, _)| name.as_str())
        .collect()
}

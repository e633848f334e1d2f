// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SfiError;

/// Checks that a requested fault length is at least one.
pub fn check_positive_length(len: usize, what: &str) -> Result<(), SfiError> {
    if len == 0 {
        return Err(SfiError::invalid_input(format!("{what} must be >= 1")));
    }
    Ok(())
}

/// Checks that a constructor parameter is a finite number.
pub fn check_finite_parameter(value: f64, name: &str) -> Result<(), SfiError> {
    if !value.is_finite() {
        return Err(SfiError::invalid_parameter(format!(
            "{name} must be finite, got {value}"
        )));
    }
    Ok(())
}

/// Checks that an input array is non-empty before fault application.
pub fn check_non_empty(values: &[f64], name: &str) -> Result<(), SfiError> {
    if values.is_empty() {
        return Err(SfiError::invalid_input(format!("{name} must be non-empty")));
    }
    Ok(())
}

/// Produces a zero-filled sequence of the requested length.
///
/// Used for columns that have no fault assigned, keeping generated frames
/// rectangular.
pub fn zero_fill(len: usize) -> Result<Vec<f64>, SfiError> {
    check_positive_length(len, "length")?;
    Ok(vec![0.0; len])
}

#[cfg(test)]
mod tests {
    use super::{check_finite_parameter, check_non_empty, check_positive_length, zero_fill};

    #[test]
    fn positive_length_accepts_one_and_rejects_zero() {
        assert!(check_positive_length(1, "fault_length").is_ok());
        let err = check_positive_length(0, "fault_length").expect_err("zero must fail");
        assert_eq!(err.to_string(), "invalid input: fault_length must be >= 1");
    }

    #[test]
    fn finite_parameter_rejects_nan_and_infinities() {
        assert!(check_finite_parameter(-3.25, "drift_rate").is_ok());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = check_finite_parameter(bad, "drift_rate").expect_err("non-finite must fail");
            assert!(err.to_string().contains("drift_rate must be finite"));
        }
    }

    #[test]
    fn non_empty_rejects_empty_slice() {
        assert!(check_non_empty(&[0.0], "x").is_ok());
        let err = check_non_empty(&[], "x").expect_err("empty must fail");
        assert_eq!(err.to_string(), "invalid input: x must be non-empty");
    }

    #[test]
    fn zero_fill_produces_requested_length_or_fails() {
        let zeros = zero_fill(4).expect("length 4 should succeed");
        assert_eq!(zeros, vec![0.0; 4]);
        assert!(zero_fill(0).is_err());
    }
}

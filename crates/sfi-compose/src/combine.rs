// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::fmt;

use sfi_core::SfiError;

/// How multiple fault components for one column are reduced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    #[default]
    Sum,
    Mean,
}

impl fmt::Display for CombineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
        })
    }
}

/// Reduces per-assignment fault components into one sequence.
///
/// A single component passes through unchanged. All components must share
/// one length.
pub fn combine_components(
    components: &[Vec<f64>],
    mode: CombineMode,
) -> Result<Vec<f64>, SfiError> {
    let first = components
        .first()
        .ok_or_else(|| SfiError::invalid_input("no fault components to combine"))?;
    for (idx, component) in components.iter().enumerate() {
        if component.len() != first.len() {
            return Err(SfiError::shape_mismatch(format!(
                "component {idx} has length {}, expected {}",
                component.len(),
                first.len()
            )));
        }
    }
    if components.len() == 1 {
        return Ok(first.clone());
    }

    let mut combined = vec![0.0; first.len()];
    for component in components {
        for (acc, value) in combined.iter_mut().zip(component) {
            *acc += *value;
        }
    }
    if mode == CombineMode::Mean {
        let n = components.len() as f64;
        for acc in &mut combined {
            *acc /= n;
        }
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::{CombineMode, combine_components};

    #[test]
    fn single_component_passes_through() {
        let combined = combine_components(&[vec![1.0, 2.0]], CombineMode::Sum)
            .expect("single component should pass");
        assert_eq!(combined, vec![1.0, 2.0]);
    }

    #[test]
    fn sum_adds_components_elementwise() {
        let combined = combine_components(
            &[vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]],
            CombineMode::Sum,
        )
        .expect("sum should succeed");
        assert_eq!(combined, vec![6.0, 6.0]);
    }

    #[test]
    fn mean_divides_by_component_count() {
        let combined = combine_components(&[vec![1.0, 3.0], vec![3.0, 5.0]], CombineMode::Mean)
            .expect("mean should succeed");
        assert_eq!(combined, vec![2.0, 4.0]);
    }

    #[test]
    fn rejects_empty_component_list() {
        let err = combine_components(&[], CombineMode::Sum).expect_err("empty list must fail");
        assert!(err.to_string().contains("no fault components"));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = combine_components(&[vec![1.0, 2.0], vec![1.0]], CombineMode::Sum)
            .expect_err("length mismatch must fail");
        assert!(err.to_string().contains("component 1 has length 1, expected 2"));
    }

    #[test]
    fn combine_mode_serde_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_string(&CombineMode::Mean).expect("mode should serialize"),
            "\"mean\""
        );
        let decoded: CombineMode =
            serde_json::from_str("\"sum\"").expect("mode should deserialize");
        assert_eq!(decoded, CombineMode::Sum);
    }
}

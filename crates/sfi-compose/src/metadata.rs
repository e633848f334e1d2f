// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use sfi_core::SfiError;
use sfi_faults::{FaultParams, FaultRegistry};

use crate::assignment::{AssignOptions, FaultAssignment, FaultSpec};
use crate::frame_fault::{FrameFault, FrameFaultConfig};

/// Version tag for serialized orchestrator metadata.
pub const METADATA_SCHEMA_VERSION: u32 = 1;

/// Serialized form of one fault assignment.
///
/// Only the configuration is captured; generator instances and their
/// in-flight state are intentionally not serialized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentWire {
    pub fault_type: String,
    #[serde(default)]
    pub params: FaultParams,
    #[serde(default)]
    pub fault_length: Option<usize>,
    #[serde(default)]
    pub repeat: Option<bool>,
    #[serde(default, flatten)]
    pub unknown_fields: BTreeMap<String, serde_json::Value>,
}

/// Serialized orchestrator snapshot.
///
/// Round-tripping reconstructs an equivalent [`FrameFault`]; unknown fields
/// from newer writers are carried through untouched.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameFaultWire {
    pub schema_version: u32,
    pub config: FrameFaultConfig,
    #[serde(default)]
    pub assignments: BTreeMap<String, Vec<AssignmentWire>>,
    #[serde(default, flatten)]
    pub unknown_fields: BTreeMap<String, serde_json::Value>,
}

impl FrameFaultWire {
    pub fn from_runtime(fault: &FrameFault) -> Self {
        let assignments = fault
            .column_assignments()
            .iter()
            .map(|(column, list)| {
                let wires = list
                    .iter()
                    .map(|assignment| AssignmentWire {
                        fault_type: assignment.spec.type_name(),
                        params: assignment.params.clone(),
                        fault_length: assignment.fault_length,
                        repeat: assignment.repeat,
                        unknown_fields: BTreeMap::new(),
                    })
                    .collect();
                (column.clone(), wires)
            })
            .collect();
        Self {
            schema_version: METADATA_SCHEMA_VERSION,
            config: fault.config().clone(),
            assignments,
            unknown_fields: BTreeMap::new(),
        }
    }

    pub fn validate_schema_version(&self) -> Result<(), SfiError> {
        if self.schema_version != METADATA_SCHEMA_VERSION {
            return Err(SfiError::invalid_config(format!(
                "unsupported metadata schema version {}, expected {METADATA_SCHEMA_VERSION}",
                self.schema_version
            )));
        }
        Ok(())
    }

    /// Rebuilds an orchestrator from this snapshot.
    ///
    /// Every serialized fault type must resolve in `registry`; assignments
    /// start with no generator instance.
    pub fn to_runtime(&self, registry: FaultRegistry) -> Result<FrameFault, SfiError> {
        self.validate_schema_version()?;
        let mut fault = FrameFault::with_registry(self.config.clone(), registry)?;
        for (column, list) in &self.assignments {
            if !self.config.col_names.contains(column) {
                return Err(SfiError::invalid_input(format!(
                    "column '{column}' in metadata is not declared in col_names"
                )));
            }
            for wire in list {
                if !fault.registry().contains(&wire.fault_type) {
                    return Err(SfiError::instantiation(format!(
                        "fault type '{}' is not registered",
                        wire.fault_type
                    )));
                }
                let assignment = FaultAssignment::new(
                    FaultSpec::named(wire.fault_type.clone()),
                    wire.params.clone(),
                    AssignOptions {
                        fault_length: wire.fault_length,
                        repeat: wire.repeat,
                        persist_state: None,
                    },
                );
                fault.insert_assignment(column.clone(), assignment);
            }
        }
        Ok(fault)
    }
}

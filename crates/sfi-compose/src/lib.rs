// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Fault assignment and composition over column frames.
//!
//! [`FrameFault`] maps named columns to one or more fault assignments,
//! broadcasts per-row parameter sequences, combines multi-fault components,
//! and snapshots its configuration as schema-versioned metadata.

pub mod assignment;
pub mod broadcast;
pub mod combine;
pub mod frame_fault;
pub mod metadata;

pub use assignment::{AssignOptions, FaultAssignment, FaultSpec};
pub use broadcast::{resolve_param, resolve_params};
pub use combine::{CombineMode, combine_components};
pub use frame_fault::{FrameFault, FrameFaultConfig, Generation, validate_config};
pub use metadata::{AssignmentWire, FrameFaultWire, METADATA_SCHEMA_VERSION};

pub fn crate_name() -> &'static str {
    "sfi-compose"
}

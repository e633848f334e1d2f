// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Core shared types for the sfi fault-injection workspace.

pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod validate;

pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, Diagnostics};
pub use error::SfiError;
pub use frame::{ColumnCells, FaultFrame, FrameColumn, GenerationMode};

pub fn crate_name() -> &'static str {
    "sfi-core"
}

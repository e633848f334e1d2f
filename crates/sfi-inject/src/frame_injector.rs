// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use sfi_core::{ColumnCells, FaultFrame, SfiError};

use crate::window::IndexWindow;

/// How injected values combine with the target frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InjectMode {
    /// Target values inside the row window are overwritten.
    #[default]
    Replace,
    /// Faulty values are added as deltas onto the target values.
    Add,
}

/// Options for one frame-to-frame injection call.
#[derive(Clone, Debug, Default)]
pub struct FrameInjectOptions {
    /// Row window resolved against the target frame.
    pub rows: IndexWindow,
    /// Renames faulty-frame columns to target-frame columns.
    pub column_map: BTreeMap<String, String>,
    pub mode: InjectMode,
}

/// Injects the columns of a faulty frame into a target frame over a row
/// window.
///
/// Both frames must share orientation, and the faulty frame must have
/// exactly as many rows as the resolved window. The pristine target is kept
/// so repeated experiments can restore it.
#[derive(Clone, Debug)]
pub struct FrameInjector {
    original: FaultFrame,
    working: FaultFrame,
}

impl FrameInjector {
    pub fn new(target: FaultFrame) -> Self {
        Self {
            working: target.clone(),
            original: target,
        }
    }

    /// The frame with all injections applied so far.
    pub fn frame(&self) -> &FaultFrame {
        &self.working
    }

    /// The pristine frame as passed to the constructor.
    pub fn original(&self) -> &FaultFrame {
        &self.original
    }

    /// Discards all injections.
    pub fn restore_original(&mut self) {
        self.working = self.original.clone();
    }

    pub fn into_frame(self) -> FaultFrame {
        self.working
    }

    /// Applies one faulty frame to the working copy.
    pub fn inject_faults(
        &mut self,
        faulty: &FaultFrame,
        options: &FrameInjectOptions,
    ) -> Result<&FaultFrame, SfiError> {
        if faulty.mode() != self.working.mode() {
            return Err(SfiError::shape_mismatch(format!(
                "faulty frame orientation {:?} differs from target {:?}",
                faulty.mode(),
                self.working.mode()
            )));
        }

        let (start, stop) = options.rows.resolve(self.working.n_rows())?;
        let window_len = stop - start;
        if faulty.n_rows() != window_len {
            return Err(SfiError::shape_mismatch(format!(
                "faulty frame has {} rows, window [{start}, {stop}) needs {window_len}",
                faulty.n_rows()
            )));
        }

        let mut targets = Vec::with_capacity(faulty.n_cols());
        for column in faulty.columns() {
            let target_name = options
                .column_map
                .get(&column.name)
                .map(String::as_str)
                .unwrap_or(column.name.as_str());
            if self.working.column(target_name).is_none() {
                return Err(SfiError::invalid_input(format!(
                    "column '{target_name}' not present in target frame"
                )));
            }
            targets.push(target_name.to_string());
        }
        if window_len == 0 {
            return Ok(&self.working);
        }

        // Writes go to a scratch copy so any validation failure below leaves
        // the working frame untouched.
        let mut staged = self.working.clone();
        for (column, target_name) in faulty.columns().iter().zip(&targets) {
            let target = staged
                .column_mut(target_name)
                .ok_or_else(|| SfiError::invalid_input(format!("column '{target_name}' lost")))?;
            match (&mut target.cells, &column.cells) {
                (ColumnCells::Scalars(into), ColumnCells::Scalars(from)) => {
                    for (offset, value) in from.iter().enumerate() {
                        match options.mode {
                            InjectMode::Replace => into[start + offset] = *value,
                            InjectMode::Add => into[start + offset] += *value,
                        }
                    }
                }
                (ColumnCells::Arrays(into), ColumnCells::Arrays(from)) => {
                    for (offset, row) in from.iter().enumerate() {
                        let cell = &mut into[start + offset];
                        if cell.len() != row.len() {
                            return Err(SfiError::shape_mismatch(format!(
                                "row {} of column '{target_name}' has {} values, faulty row has {}",
                                start + offset,
                                cell.len(),
                                row.len()
                            )));
                        }
                        match options.mode {
                            InjectMode::Replace => cell.copy_from_slice(row),
                            InjectMode::Add => {
                                for (a, b) in cell.iter_mut().zip(row) {
                                    *a += *b;
                                }
                            }
                        }
                    }
                }
                _ => {
                    return Err(SfiError::shape_mismatch(format!(
                        "column '{target_name}' orientation differs from faulty column '{}'",
                        column.name
                    )));
                }
            }
        }
        self.working = staged;
        Ok(&self.working)
    }
}

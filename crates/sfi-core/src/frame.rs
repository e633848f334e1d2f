// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::SfiError;

/// How fault sequences are laid out in a generated frame.
///
/// Vertical mode produces one sequence per column (scalar cells); horizontal
/// mode produces one independent sequence per simulated row (array cells).
/// The mode is fixed when a frame or orchestrator is built.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerationMode {
    #[default]
    Vertical,
    Horizontal,
}

/// Cell storage for one frame column.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnCells {
    /// Vertical orientation: one numeric value per row.
    Scalars(Vec<f64>),
    /// Horizontal orientation: one numeric sequence per row.
    Arrays(Vec<Vec<f64>>),
}

impl ColumnCells {
    pub fn n_rows(&self) -> usize {
        match self {
            Self::Scalars(values) => values.len(),
            Self::Arrays(rows) => rows.len(),
        }
    }

    pub fn mode(&self) -> GenerationMode {
        match self {
            Self::Scalars(_) => GenerationMode::Vertical,
            Self::Arrays(_) => GenerationMode::Horizontal,
        }
    }
}

/// A named column of a fault frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FrameColumn {
    pub name: String,
    pub cells: ColumnCells,
}

impl FrameColumn {
    /// Returns the scalar values for a vertical column.
    pub fn as_scalars(&self) -> Option<&[f64]> {
        match &self.cells {
            ColumnCells::Scalars(values) => Some(values),
            ColumnCells::Arrays(_) => None,
        }
    }

    /// Returns the per-row sequences for a horizontal column.
    pub fn as_arrays(&self) -> Option<&[Vec<f64>]> {
        match &self.cells {
            ColumnCells::Scalars(_) => None,
            ColumnCells::Arrays(rows) => Some(rows),
        }
    }
}

/// Owned, rectangular column frame holding generated or injected values.
///
/// Invariants enforced at construction: at least one column, unique column
/// names, every column shares one orientation, and every column has the same
/// row count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FaultFrame {
    columns: Vec<FrameColumn>,
}

impl FaultFrame {
    /// Builds a frame from pre-assembled columns, validating invariants.
    pub fn from_columns(columns: Vec<FrameColumn>) -> Result<Self, SfiError> {
        if columns.is_empty() {
            return Err(SfiError::invalid_input(
                "frame must contain at least one column",
            ));
        }

        let mode = columns[0].cells.mode();
        let n_rows = columns[0].cells.n_rows();
        for column in &columns {
            if column.cells.mode() != mode {
                return Err(SfiError::shape_mismatch(format!(
                    "column '{}' orientation differs from '{}'",
                    column.name, columns[0].name
                )));
            }
            if column.cells.n_rows() != n_rows {
                return Err(SfiError::shape_mismatch(format!(
                    "column '{}' has {} rows, expected {}",
                    column.name,
                    column.cells.n_rows(),
                    n_rows
                )));
            }
        }

        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|prior| prior.name == column.name) {
                return Err(SfiError::invalid_input(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        Ok(Self { columns })
    }

    /// Convenience constructor for a vertical (scalar-cell) frame.
    pub fn vertical(columns: Vec<(String, Vec<f64>)>) -> Result<Self, SfiError> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, values)| FrameColumn {
                    name,
                    cells: ColumnCells::Scalars(values),
                })
                .collect(),
        )
    }

    /// Convenience constructor for a horizontal (array-cell) frame.
    pub fn horizontal(columns: Vec<(String, Vec<Vec<f64>>)>) -> Result<Self, SfiError> {
        Self::from_columns(
            columns
                .into_iter()
                .map(|(name, rows)| FrameColumn {
                    name,
                    cells: ColumnCells::Arrays(rows),
                })
                .collect(),
        )
    }

    pub fn mode(&self) -> GenerationMode {
        self.columns[0].cells.mode()
    }

    pub fn n_rows(&self) -> usize {
        self.columns[0].cells.n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[FrameColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&FrameColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut FrameColumn> {
        self.columns.iter_mut().find(|c| c.name == name)
    }
}

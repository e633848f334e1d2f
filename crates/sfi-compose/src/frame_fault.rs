// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::time::Instant;

use sfi_core::validate::zero_fill;
use sfi_core::{ColumnCells, Diagnostics, FaultFrame, GenerationMode, SfiError};
use sfi_faults::{FaultParams, FaultRegistry};

use crate::assignment::{AssignOptions, FaultAssignment, FaultSpec, ensure_instance};
use crate::broadcast::resolve_params;
use crate::combine::{CombineMode, combine_components};
use crate::metadata::FrameFaultWire;

/// Construction options for [`FrameFault`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameFaultConfig {
    pub col_names: Vec<String>,
    /// Horizontal mode generates one fault sequence per simulated row.
    pub horizontal: bool,
    /// Default length of each generated sequence.
    pub fault_length: Option<usize>,
    /// Number of simulated rows; required in horizontal mode and as the
    /// broadcast axis for per-row parameter sequences.
    pub df_length: Option<usize>,
    /// Default policy for parameter sequences shorter than `df_length`.
    pub repeat: bool,
    /// Append assignments per column instead of replacing them.
    pub multi_fault: bool,
    pub combine_mode: CombineMode,
    /// Also produce a frame with one column per individual fault component.
    pub include_individual_faults: bool,
    /// Default policy for carrying generator state across runs.
    pub persist_state: bool,
}

impl Default for FrameFaultConfig {
    fn default() -> Self {
        Self {
            col_names: vec![],
            horizontal: false,
            fault_length: None,
            df_length: None,
            repeat: true,
            multi_fault: false,
            combine_mode: CombineMode::Sum,
            include_individual_faults: false,
            persist_state: false,
        }
    }
}

impl FrameFaultConfig {
    pub fn new<S: Into<String>>(col_names: Vec<S>) -> Self {
        Self {
            col_names: col_names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn mode(&self) -> GenerationMode {
        if self.horizontal {
            GenerationMode::Horizontal
        } else {
            GenerationMode::Vertical
        }
    }
}

pub fn validate_config(config: &FrameFaultConfig) -> Result<(), SfiError> {
    if config.col_names.is_empty() {
        return Err(SfiError::invalid_config("col_names must not be empty"));
    }
    for (idx, name) in config.col_names.iter().enumerate() {
        if config.col_names[..idx].contains(name) {
            return Err(SfiError::invalid_config(format!(
                "duplicate column name '{name}' in col_names"
            )));
        }
    }
    if config.fault_length == Some(0) {
        return Err(SfiError::invalid_config("fault_length must be >= 1"));
    }
    if config.df_length == Some(0) {
        return Err(SfiError::invalid_config("df_length must be >= 1"));
    }
    if config.horizontal && config.df_length.is_none() {
        return Err(SfiError::invalid_config(
            "horizontal mode requires df_length",
        ));
    }
    Ok(())
}

/// The result of one generation run.
///
/// `frame` is always the combined result; `extended` carries the individual
/// fault components when requested. `metadata` is sufficient to rebuild an
/// equivalent orchestrator via [`FrameFault::from_metadata`].
#[derive(Clone, Debug)]
pub struct Generation {
    pub frame: FaultFrame,
    pub extended: Option<FaultFrame>,
    pub metadata: FrameFaultWire,
    pub diagnostics: Diagnostics,
}

/// Assigns fault models to named columns and generates fault frames.
#[derive(Clone, Debug)]
pub struct FrameFault {
    config: FrameFaultConfig,
    registry: FaultRegistry,
    assignments: BTreeMap<String, Vec<FaultAssignment>>,
}

impl FrameFault {
    pub fn new(config: FrameFaultConfig) -> Result<Self, SfiError> {
        Self::with_registry(config, FaultRegistry::new())
    }

    pub fn with_registry(
        config: FrameFaultConfig,
        registry: FaultRegistry,
    ) -> Result<Self, SfiError> {
        validate_config(&config)?;
        Ok(Self {
            config,
            registry,
            assignments: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &FrameFaultConfig {
        &self.config
    }

    pub fn registry(&self) -> &FaultRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FaultRegistry {
        &mut self.registry
    }

    pub fn column_assignments(&self) -> &BTreeMap<String, Vec<FaultAssignment>> {
        &self.assignments
    }

    pub(crate) fn insert_assignment(&mut self, column: String, assignment: FaultAssignment) {
        self.assignments.entry(column).or_default().push(assignment);
    }

    /// Registers one fault for one or more declared columns.
    ///
    /// With `multi_fault` disabled the new assignment replaces a column's
    /// existing one; enabled, it appends.
    pub fn assign_fault(
        &mut self,
        columns: &[&str],
        spec: FaultSpec,
        params: FaultParams,
    ) -> Result<(), SfiError> {
        self.assign_fault_with(columns, spec, params, AssignOptions::default())
    }

    pub fn assign_fault_with(
        &mut self,
        columns: &[&str],
        spec: FaultSpec,
        params: FaultParams,
        options: AssignOptions,
    ) -> Result<(), SfiError> {
        if columns.is_empty() {
            return Err(SfiError::invalid_input("no columns given"));
        }
        for column in columns {
            if !self.config.col_names.iter().any(|name| name == column) {
                return Err(SfiError::invalid_input(format!(
                    "column '{column}' is not declared in col_names"
                )));
            }
        }
        if options.fault_length == Some(0) {
            return Err(SfiError::invalid_config("fault_length must be >= 1"));
        }
        if let FaultSpec::Named(name) = &spec {
            if !self.registry.contains(name) {
                return Err(SfiError::instantiation(format!(
                    "fault type '{name}' is not registered"
                )));
            }
        }

        let multi_fault = self.config.multi_fault;
        for column in columns {
            let assignment = FaultAssignment::new(spec.clone(), params.clone(), options);
            let list = self.assignments.entry((*column).to_string()).or_default();
            if !multi_fault {
                list.clear();
            }
            list.push(assignment);
        }
        Ok(())
    }

    /// Runs one generation pass over all assigned columns.
    ///
    /// Generator instances are discarded at call start unless their effective
    /// persist policy keeps them, so stateful models only accumulate across
    /// runs when asked to.
    pub fn generate(&mut self) -> Result<Generation, SfiError> {
        let started = Instant::now();
        if self.assignments.values().all(Vec::is_empty) {
            return Err(SfiError::invalid_config("no faults assigned to any column"));
        }

        let persist_default = self.config.persist_state;
        for list in self.assignments.values_mut() {
            for assignment in list.iter_mut() {
                if !assignment.effective_persist(persist_default) {
                    assignment.clear_instance();
                }
            }
        }

        let (frame, extended) = if self.config.horizontal {
            self.generate_horizontal()?
        } else {
            self.generate_vertical()?
        };

        let mut diagnostics = Diagnostics {
            n_rows: frame.n_rows(),
            n_cols: frame.n_cols(),
            ..Diagnostics::default()
        };
        if self.config.multi_fault {
            diagnostics
                .notes
                .push(format!("combine_mode={}", self.config.combine_mode));
        }
        self.warn_unexpected_nan(&frame, &mut diagnostics);
        diagnostics.runtime_ms = Some(started.elapsed().as_millis() as u64);

        Ok(Generation {
            metadata: self.build_metadata(),
            frame,
            extended,
            diagnostics,
        })
    }

    pub fn build_metadata(&self) -> FrameFaultWire {
        FrameFaultWire::from_runtime(self)
    }

    pub fn from_metadata(wire: &FrameFaultWire) -> Result<Self, SfiError> {
        Self::from_metadata_with_registry(wire, FaultRegistry::new())
    }

    pub fn from_metadata_with_registry(
        wire: &FrameFaultWire,
        registry: FaultRegistry,
    ) -> Result<Self, SfiError> {
        wire.to_runtime(registry)
    }

    fn generate_vertical(&mut self) -> Result<(FaultFrame, Option<FaultFrame>), SfiError> {
        let FrameFault {
            config,
            registry,
            assignments,
        } = self;
        let df_length = config.df_length;
        let mut produced: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut extended: Vec<(String, Vec<f64>)> = Vec::new();
        let mut common_len: Option<usize> = None;

        for col in &config.col_names {
            let Some(list) = assignments.get_mut(col) else {
                continue;
            };
            if list.is_empty() {
                continue;
            }
            let mut components = Vec::with_capacity(list.len());
            let mut component_names = Vec::with_capacity(list.len());
            for (ai, assignment) in list.iter_mut().enumerate() {
                let len = assignment
                    .fault_length
                    .or(config.fault_length)
                    .or(df_length)
                    .ok_or_else(|| {
                        SfiError::invalid_config(format!(
                            "no fault length available for column '{col}'"
                        ))
                    })?;
                let repeat = assignment.effective_repeat(config.repeat);
                let resolved = resolve_params(&assignment.params, None, df_length, repeat)?;
                let model = ensure_instance(assignment, registry, &resolved)?;
                let pattern = model.generate(len)?;
                component_names.push(format!("{col}_{}_{}", model.name(), ai + 1));
                components.push(pattern);
            }
            let combined = combine_components(&components, config.combine_mode)?;
            match common_len {
                Some(expected) if combined.len() != expected => {
                    return Err(SfiError::shape_mismatch(format!(
                        "column '{col}' produced {} values, expected {expected}",
                        combined.len()
                    )));
                }
                Some(_) => {}
                None => common_len = Some(combined.len()),
            }
            if config.include_individual_faults {
                extended.extend(component_names.into_iter().zip(components));
            }
            produced.insert(col.clone(), combined);
        }

        let n_rows = common_len
            .ok_or_else(|| SfiError::invalid_config("no faults assigned to any column"))?;
        let mut columns = Vec::with_capacity(config.col_names.len());
        for col in &config.col_names {
            let values = match produced.remove(col) {
                Some(values) => values,
                None => zero_fill(n_rows)?,
            };
            columns.push((col.clone(), values));
        }
        let frame = FaultFrame::vertical(columns)?;
        let extended_frame = if config.include_individual_faults {
            Some(FaultFrame::vertical(extended)?)
        } else {
            None
        };
        Ok((frame, extended_frame))
    }

    fn generate_horizontal(&mut self) -> Result<(FaultFrame, Option<FaultFrame>), SfiError> {
        let FrameFault {
            config,
            registry,
            assignments,
        } = self;
        let df_length = config
            .df_length
            .ok_or_else(|| SfiError::invalid_config("horizontal mode requires df_length"))?;
        let mut rows_by_col: BTreeMap<String, Vec<Vec<f64>>> = BTreeMap::new();
        let mut ext_cols: Vec<(String, Vec<Vec<f64>>)> = Vec::new();

        for row in 0..df_length {
            let mut ext_idx = 0usize;
            for col in &config.col_names {
                let Some(list) = assignments.get_mut(col) else {
                    continue;
                };
                if list.is_empty() {
                    continue;
                }
                let mut components = Vec::with_capacity(list.len());
                for (ai, assignment) in list.iter_mut().enumerate() {
                    let len = assignment
                        .fault_length
                        .or(config.fault_length)
                        .unwrap_or(df_length);
                    let repeat = assignment.effective_repeat(config.repeat);
                    let resolved =
                        resolve_params(&assignment.params, Some(row), Some(df_length), repeat)?;
                    let model = ensure_instance(assignment, registry, &resolved)?;
                    let pattern = model.generate(len)?;
                    if config.include_individual_faults {
                        if row == 0 {
                            ext_cols.push((
                                format!("{col}_{}_{}", model.name(), ai + 1),
                                Vec::with_capacity(df_length),
                            ));
                        }
                        ext_cols[ext_idx].1.push(pattern.clone());
                        ext_idx += 1;
                    }
                    components.push(pattern);
                }
                let combined = combine_components(&components, config.combine_mode)?;
                rows_by_col.entry(col.clone()).or_default().push(combined);
            }
        }

        let default_len = config.fault_length.unwrap_or(df_length);
        let mut columns = Vec::with_capacity(config.col_names.len());
        for col in &config.col_names {
            let rows = match rows_by_col.remove(col) {
                Some(rows) => rows,
                None => (0..df_length)
                    .map(|_| zero_fill(default_len))
                    .collect::<Result<_, _>>()?,
            };
            columns.push((col.clone(), rows));
        }
        let frame = FaultFrame::horizontal(columns)?;
        let extended_frame = if config.include_individual_faults {
            Some(FaultFrame::horizontal(ext_cols)?)
        } else {
            None
        };
        Ok((frame, extended_frame))
    }

    /// NaN values are only expected from an intentional NaN fault.
    fn warn_unexpected_nan(&self, frame: &FaultFrame, diagnostics: &mut Diagnostics) {
        for column in frame.columns() {
            let has_nan = match &column.cells {
                ColumnCells::Scalars(values) => values.iter().any(|v| v.is_nan()),
                ColumnCells::Arrays(rows) => {
                    rows.iter().any(|row| row.iter().any(|v| v.is_nan()))
                }
            };
            if !has_nan {
                continue;
            }
            let intentional = self
                .assignments
                .get(&column.name)
                .map(|list| {
                    list.iter().any(|assignment| {
                        assignment.spec.type_name().eq_ignore_ascii_case("nanfault")
                    })
                })
                .unwrap_or(false);
            if !intentional {
                diagnostics.warnings.push(format!(
                    "column '{}' contains NaN outside a NaN fault",
                    column.name
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use sfi_faults::{DriftFault, FaultKind, FaultParams, FaultRegistry, NanFault, ParamValue};

    use super::{FrameFault, FrameFaultConfig, validate_config};
    use crate::assignment::{AssignOptions, FaultSpec};
    use crate::combine::CombineMode;

    fn params_of(pairs: &[(&str, ParamValue)]) -> FaultParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn vertical_drift_scenario_matches_the_ramp() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(4);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::Drift),
                params_of(&[("drift_rate", ParamValue::from(2.0))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            Some([2.0, 4.0, 6.0, 8.0].as_slice())
        );
        assert_eq!(generation.diagnostics.n_rows, 4);
        assert_eq!(generation.diagnostics.n_cols, 1);
        assert!(generation.extended.is_none());
    }

    #[test]
    fn horizontal_short_sequence_holds_last_value_with_repeat() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.horizontal = true;
        config.df_length = Some(3);
        config.fault_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(vec![1.0, 2.0]))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        let rows = generation
            .frame
            .column("A")
            .and_then(|c| c.as_arrays())
            .expect("horizontal column");
        assert_eq!(rows[0], vec![1.0, 1.0]);
        assert_eq!(rows[1], vec![2.0, 2.0]);
        assert_eq!(rows[2], vec![2.0, 2.0]);
    }

    #[test]
    fn multi_fault_sum_combines_stuck_values() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(3);
        config.multi_fault = true;
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        for stuck_val in [1.0, 2.0] {
            fault
                .assign_fault(
                    &["A"],
                    FaultSpec::Kind(FaultKind::StuckValue),
                    params_of(&[("stuck_val", ParamValue::from(stuck_val))]),
                )
                .expect("assign should succeed");
        }

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            Some([3.0, 3.0, 3.0].as_slice())
        );
        assert!(
            generation
                .diagnostics
                .notes
                .iter()
                .any(|n| n == "combine_mode=sum")
        );
    }

    #[test]
    fn single_assignment_replaces_previous_without_multi_fault() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        for stuck_val in [1.0, 5.0] {
            fault
                .assign_fault(
                    &["A"],
                    FaultSpec::Kind(FaultKind::StuckValue),
                    params_of(&[("stuck_val", ParamValue::from(stuck_val))]),
                )
                .expect("assign should succeed");
        }

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            Some([5.0, 5.0].as_slice())
        );
    }

    #[test]
    fn mean_combination_averages_components() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        config.multi_fault = true;
        config.combine_mode = CombineMode::Mean;
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        for stuck_val in [2.0, 4.0] {
            fault
                .assign_fault(
                    &["A"],
                    FaultSpec::Kind(FaultKind::StuckValue),
                    params_of(&[("stuck_val", ParamValue::from(stuck_val))]),
                )
                .expect("assign should succeed");
        }

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            Some([3.0, 3.0].as_slice())
        );
    }

    #[test]
    fn unassigned_columns_are_zero_filled() {
        let mut config = FrameFaultConfig::new(vec!["A", "B"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::Offset),
                params_of(&[("offset_by", ParamValue::from(1.0))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("B").and_then(|c| c.as_scalars()),
            Some([0.0, 0.0].as_slice())
        );
        assert_eq!(generation.frame.column_names(), vec!["A", "B"]);
    }

    #[test]
    fn generate_without_assignments_fails() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        let err = fault.generate().expect_err("no assignments must fail");
        assert!(err.to_string().contains("no faults assigned"));
    }

    #[test]
    fn assignment_to_undeclared_column_fails() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        let err = fault
            .assign_fault(&["Z"], FaultSpec::Kind(FaultKind::Nan), FaultParams::new())
            .expect_err("undeclared column must fail");
        assert!(err.to_string().contains("'Z' is not declared"));
    }

    #[test]
    fn unknown_named_fault_fails_at_assignment() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        let err = fault
            .assign_fault(&["A"], FaultSpec::named("SpikeFault"), FaultParams::new())
            .expect_err("unknown name must fail");
        assert!(err.to_string().contains("'SpikeFault' is not registered"));
    }

    #[test]
    fn persist_state_carries_continuous_drift_across_runs() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        config.persist_state = true;
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::Drift),
                params_of(&[
                    ("drift_rate", ParamValue::from(1.0)),
                    ("continuous", ParamValue::from(true)),
                ]),
            )
            .expect("assign should succeed");

        let first = fault.generate().expect("first run should succeed");
        let second = fault.generate().expect("second run should succeed");
        assert_eq!(
            first.frame.column("A").and_then(|c| c.as_scalars()),
            Some([1.0, 2.0].as_slice())
        );
        assert_eq!(
            second.frame.column("A").and_then(|c| c.as_scalars()),
            Some([3.0, 4.0].as_slice())
        );
    }

    #[test]
    fn without_persist_state_each_run_starts_fresh() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::Drift),
                params_of(&[
                    ("drift_rate", ParamValue::from(1.0)),
                    ("continuous", ParamValue::from(true)),
                ]),
            )
            .expect("assign should succeed");

        let first = fault.generate().expect("first run should succeed");
        let second = fault.generate().expect("second run should succeed");
        assert_eq!(first.frame, second.frame);
    }

    #[test]
    fn extended_frame_names_components_by_column_type_and_index() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        config.multi_fault = true;
        config.include_individual_faults = true;
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::Offset),
                params_of(&[("offset_by", ParamValue::from(1.0))]),
            )
            .expect("assign should succeed");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(9.0))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        let extended = generation.extended.expect("extended frame requested");
        assert_eq!(
            extended.column_names(),
            vec!["A_OffsetFault_1", "A_StuckValueFault_2"]
        );
        assert_eq!(
            extended
                .column("A_StuckValueFault_2")
                .and_then(|c| c.as_scalars()),
            Some([9.0, 9.0].as_slice())
        );
    }

    #[test]
    fn vertical_mode_rejects_full_length_parameter_sequences() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(vec![1.0, 2.0]))]),
            )
            .expect("assign should succeed");

        let err = fault.generate().expect_err("per-row sequence must fail");
        assert!(err.to_string().contains("requires horizontal mode"));
    }

    #[test]
    fn vertical_short_parameter_sequence_holds_last_value_with_repeat() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(4);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(vec![1.0, 2.0]))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            Some([2.0, 2.0, 2.0, 2.0].as_slice())
        );
    }

    #[test]
    fn vertical_short_parameter_sequence_without_repeat_fails() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(4);
        config.repeat = false;
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(vec![1.0, 2.0]))]),
            )
            .expect("assign should succeed");

        let err = fault.generate().expect_err("short sequence must fail");
        assert!(err.to_string().contains("repeat is disabled"));
    }

    #[test]
    fn horizontal_row_indexed_parameters_vary_per_row() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.horizontal = true;
        config.df_length = Some(3);
        config.fault_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(vec![1.0, 2.0, 3.0]))]),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        let rows = generation
            .frame
            .column("A")
            .and_then(|c| c.as_arrays())
            .expect("horizontal column");
        assert_eq!(rows, &[vec![1.0; 2], vec![2.0; 2], vec![3.0; 2]]);
    }

    #[test]
    fn instance_spec_is_deep_copied_per_column() {
        let mut config = FrameFaultConfig::new(vec!["A", "B"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        let prototype = DriftFault::new(1.0, true).expect("drift should build");
        fault
            .assign_fault(
                &["A", "B"],
                FaultSpec::Instance(Box::new(prototype)),
                FaultParams::new(),
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        // Each column owns its own clone, so both ramps start at 1.
        assert_eq!(
            generation.frame.column("A").and_then(|c| c.as_scalars()),
            generation.frame.column("B").and_then(|c| c.as_scalars())
        );
    }

    #[test]
    fn nan_outside_nan_fault_is_warned_not_raised() {
        let mut registry = FaultRegistry::new();
        registry.register("HoleFault", |_params| {
            Ok(Box::new(NanFault::new()) as Box<dyn sfi_faults::FaultModel>)
        });
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault =
            FrameFault::with_registry(config, registry).expect("orchestrator should build");
        fault
            .assign_fault(&["A"], FaultSpec::named("HoleFault"), FaultParams::new())
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert!(
            generation
                .diagnostics
                .warnings
                .iter()
                .any(|w| w.contains("column 'A' contains NaN"))
        );
    }

    #[test]
    fn intentional_nan_fault_does_not_warn() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(&["A"], FaultSpec::Kind(FaultKind::Nan), FaultParams::new())
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert!(generation.diagnostics.warnings.is_empty());
    }

    #[test]
    fn per_assignment_fault_length_overrides_the_global_one() {
        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(4);
        config.fault_length = Some(4);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault_with(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(1.0))]),
                AssignOptions {
                    fault_length: Some(2),
                    ..AssignOptions::default()
                },
            )
            .expect("assign should succeed");

        let generation = fault.generate().expect("generate should succeed");
        assert_eq!(generation.frame.n_rows(), 2);
    }

    #[test]
    fn vertical_columns_with_mismatched_lengths_fail() {
        let mut config = FrameFaultConfig::new(vec!["A", "B"]);
        config.df_length = Some(4);
        let mut fault = FrameFault::new(config).expect("orchestrator should build");
        fault
            .assign_fault(
                &["A"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(1.0))]),
            )
            .expect("assign should succeed");
        fault
            .assign_fault_with(
                &["B"],
                FaultSpec::Kind(FaultKind::StuckValue),
                params_of(&[("stuck_val", ParamValue::from(1.0))]),
                AssignOptions {
                    fault_length: Some(2),
                    ..AssignOptions::default()
                },
            )
            .expect("assign should succeed");

        let err = fault.generate().expect_err("length mismatch must fail");
        assert!(err.to_string().contains("produced 2 values, expected 4"));
    }

    #[test]
    fn config_validation_rejects_bad_inputs() {
        assert!(validate_config(&FrameFaultConfig::default()).is_err());

        let mut config = FrameFaultConfig::new(vec!["A", "A"]);
        config.df_length = Some(2);
        assert!(validate_config(&config).is_err());

        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.horizontal = true;
        assert!(validate_config(&config).is_err());

        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.fault_length = Some(0);
        assert!(validate_config(&config).is_err());

        let mut config = FrameFaultConfig::new(vec!["A"]);
        config.df_length = Some(2);
        assert!(validate_config(&config).is_ok());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_faults::{FaultKind, FaultModel, FaultParams, FaultRegistry};

use crate::broadcast::varying_keys;

/// How a fault assignment names its generator.
#[derive(Clone, Debug)]
pub enum FaultSpec {
    /// Registry lookup by (case-insensitive) type name.
    Named(String),
    /// A built-in kind.
    Kind(FaultKind),
    /// A ready prototype instance, cloned on first use.
    Instance(Box<dyn FaultModel>),
}

impl FaultSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The type name recorded in metadata.
    pub fn type_name(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::Kind(kind) => kind.type_name().to_string(),
            Self::Instance(model) => model.name().to_string(),
        }
    }
}

/// Per-assignment overrides accepted by `assign_fault_with`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AssignOptions {
    /// Overrides the orchestrator-level fault length.
    pub fault_length: Option<usize>,
    /// Overrides the orchestrator-level repeat policy for short sequences.
    pub repeat: Option<bool>,
    /// Overrides whether the generator instance survives between runs.
    pub persist_state: Option<bool>,
}

/// One fault registered for one column.
///
/// The generator instance is populated lazily on first use and discarded at
/// the start of each run unless the effective persist policy keeps it.
#[derive(Clone, Debug)]
pub struct FaultAssignment {
    pub spec: FaultSpec,
    pub params: FaultParams,
    pub fault_length: Option<usize>,
    pub repeat: Option<bool>,
    pub persist_state: Option<bool>,
    pub(crate) instance: Option<Box<dyn FaultModel>>,
}

impl FaultAssignment {
    pub fn new(spec: FaultSpec, params: FaultParams, options: AssignOptions) -> Self {
        Self {
            spec,
            params,
            fault_length: options.fault_length,
            repeat: options.repeat,
            persist_state: options.persist_state,
            instance: None,
        }
    }

    pub fn effective_repeat(&self, default: bool) -> bool {
        self.repeat.unwrap_or(default)
    }

    pub fn effective_persist(&self, default: bool) -> bool {
        self.persist_state.unwrap_or(default)
    }

    /// Drops the generator instance so the next run starts fresh.
    pub fn clear_instance(&mut self) {
        self.instance = None;
    }

    pub fn has_instance(&self) -> bool {
        self.instance.is_some()
    }

    /// True when any parameter broadcasts per row.
    pub fn has_varying_params(&self) -> bool {
        !varying_keys(&self.params).is_empty()
    }
}

/// Returns the assignment's generator, building or updating it as needed.
///
/// A missing instance is built from the resolved parameters; an existing one
/// is kept, with only the row-varying parameters re-applied so internal
/// counters and random streams survive.
pub fn ensure_instance<'a>(
    assignment: &'a mut FaultAssignment,
    registry: &FaultRegistry,
    resolved: &FaultParams,
) -> Result<&'a mut Box<dyn FaultModel>, SfiError> {
    if assignment.instance.is_none() {
        let model = match &assignment.spec {
            FaultSpec::Named(name) => registry.resolve(name, resolved)?,
            FaultSpec::Kind(kind) => kind.build(resolved)?,
            FaultSpec::Instance(prototype) => {
                let mut model = prototype.clone();
                if !resolved.is_empty() {
                    model.set_params(resolved)?;
                }
                model
            }
        };
        assignment.instance = Some(model);
    } else if assignment.has_varying_params() {
        let varying: Vec<String> = varying_keys(&assignment.params)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut update = FaultParams::new();
        for key in varying {
            if let Some(value) = resolved.get(&key) {
                update.insert(key, value.clone());
            }
        }
        if let Some(model) = assignment.instance.as_mut() {
            model.set_params(&update)?;
        }
    }
    assignment
        .instance
        .as_mut()
        .ok_or_else(|| SfiError::instantiation("fault instance missing after construction"))
}

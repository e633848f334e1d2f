// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use sfi_core::SfiError;

use crate::drift::DriftFault;
use crate::model::FaultModel;
use crate::nan::NanFault;
use crate::normal_noise::NormalNoiseFault;
use crate::offset::OffsetFault;
use crate::params::FaultParams;
use crate::stuck::StuckValueFault;
use crate::uniform_noise::UniformNoiseFault;

/// The built-in fault types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    Drift,
    Offset,
    StuckValue,
    Nan,
    NormalNoise,
    UniformNoise,
}

impl FaultKind {
    pub const ALL: [FaultKind; 6] = [
        FaultKind::Drift,
        FaultKind::Offset,
        FaultKind::StuckValue,
        FaultKind::Nan,
        FaultKind::NormalNoise,
        FaultKind::UniformNoise,
    ];

    /// Type name, matching [`FaultModel::name`] of the built model.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Drift => "DriftFault",
            Self::Offset => "OffsetFault",
            Self::StuckValue => "StuckValueFault",
            Self::Nan => "NanFault",
            Self::NormalNoise => "NormalNoiseFault",
            Self::UniformNoise => "UniformNoiseFault",
        }
    }

    /// Lookup key: the lowercased type name.
    pub fn registry_key(self) -> &'static str {
        match self {
            Self::Drift => "driftfault",
            Self::Offset => "offsetfault",
            Self::StuckValue => "stuckvaluefault",
            Self::Nan => "nanfault",
            Self::NormalNoise => "normalnoisefault",
            Self::UniformNoise => "uniformnoisefault",
        }
    }

    /// Case-insensitive lookup by type name.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.registry_key() == key)
    }

    /// Builds a fault instance from keyword parameters.
    pub fn build(self, params: &FaultParams) -> Result<Box<dyn FaultModel>, SfiError> {
        Ok(match self {
            Self::Drift => Box::new(DriftFault::from_params(params)?),
            Self::Offset => Box::new(OffsetFault::from_params(params)?),
            Self::StuckValue => Box::new(StuckValueFault::from_params(params)?),
            Self::Nan => Box::new(NanFault::from_params(params)?),
            Self::NormalNoise => Box::new(NormalNoiseFault::from_params(params)?),
            Self::UniformNoise => Box::new(UniformNoiseFault::from_params(params)?),
        })
    }
}

/// Factory for user-registered fault types.
pub type FaultFactory =
    Arc<dyn Fn(&FaultParams) -> Result<Box<dyn FaultModel>, SfiError> + Send + Sync>;

/// Name-based fault resolution.
///
/// Built-in kinds are always available; user factories registered under the
/// same key shadow them. Keys are compared case-insensitively.
#[derive(Clone, Default)]
pub struct FaultRegistry {
    user: BTreeMap<String, FaultFactory>,
}

impl FaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user factory under `name` (lowercased).
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&FaultParams) -> Result<Box<dyn FaultModel>, SfiError> + Send + Sync + 'static,
    {
        self.user.insert(name.to_lowercase(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.user.contains_key(&key) || FaultKind::from_name(&key).is_some()
    }

    /// Builds a fault instance by name.
    pub fn resolve(
        &self,
        name: &str,
        params: &FaultParams,
    ) -> Result<Box<dyn FaultModel>, SfiError> {
        let key = name.to_lowercase();
        if let Some(factory) = self.user.get(&key) {
            return factory(params);
        }
        match FaultKind::from_name(&key) {
            Some(kind) => kind.build(params),
            None => Err(SfiError::instantiation(format!(
                "fault type '{name}' is not registered"
            ))),
        }
    }
}

impl fmt::Debug for FaultRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultRegistry")
            .field("user", &self.user.keys().collect::<Vec<_>>())
            .finish()
    }
}

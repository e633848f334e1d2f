// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::check_non_empty;
use sfi_faults::FaultModel;

use crate::window::IndexWindow;

/// Applies one fault model to one array over an index window.
///
/// The window is resolved per call against the input length. Values outside
/// the window pass through untouched; the caller's input is never mutated.
pub struct Injector {
    fault: Box<dyn FaultModel>,
    window: IndexWindow,
}

impl Injector {
    pub fn new(fault: Box<dyn FaultModel>, window: IndexWindow) -> Self {
        Self { fault, window }
    }

    /// Injector applying the fault over the default window.
    pub fn over_default(fault: Box<dyn FaultModel>) -> Self {
        Self::new(fault, IndexWindow::default())
    }

    pub fn window(&self) -> IndexWindow {
        self.window
    }

    pub fn fault(&self) -> &dyn FaultModel {
        self.fault.as_ref()
    }

    /// Rewinds the fault model's internal state.
    pub fn reset(&mut self) {
        self.fault.reset();
    }

    /// Returns a copy of `x` with the fault applied over the window.
    pub fn inject_fault(&mut self, x: &[f64]) -> Result<Vec<f64>, SfiError> {
        check_non_empty(x, "x")?;
        let (start, stop) = self.window.resolve(x.len())?;
        let mut out = x.to_vec();
        if start < stop {
            let segment = self.fault.apply(&x[start..stop])?;
            out[start..stop].copy_from_slice(&segment);
        }
        Ok(out)
    }
}

impl Clone for Injector {
    fn clone(&self) -> Self {
        Self {
            fault: self.fault.clone(),
            window: self.window,
        }
    }
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("fault", &self.fault.name())
            .field("window", &self.window)
            .finish()
    }
}

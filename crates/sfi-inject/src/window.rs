// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use sfi_core::SfiError;
use sfi_core::validate::check_positive_length;

/// A half-open index window `[start, stop)` with slice-style negative indices.
///
/// Negative endpoints count from the end of the target. Validity bounds:
/// `start` in `[-len, len]`, `stop` in `(-len, len]`, and after resolution
/// `stop >= start`. The default window `{start: 0, stop: -1}` covers
/// everything but the last element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexWindow {
    pub start: isize,
    pub stop: isize,
}

impl Default for IndexWindow {
    fn default() -> Self {
        Self { start: 0, stop: -1 }
    }
}

impl IndexWindow {
    pub fn new(start: isize, stop: isize) -> Self {
        Self { start, stop }
    }

    /// Resolves against a target of length `len` into absolute indices.
    pub fn resolve(&self, len: usize) -> Result<(usize, usize), SfiError> {
        check_positive_length(len, "target length")?;
        let n = len as isize;

        if self.start < -n || self.start > n {
            return Err(SfiError::invalid_range(format!(
                "start {} outside [-{n}, {n}] for length {len}",
                self.start
            )));
        }
        if self.stop <= -n || self.stop > n {
            return Err(SfiError::invalid_range(format!(
                "stop {} outside (-{n}, {n}] for length {len}",
                self.stop
            )));
        }

        let start = if self.start < 0 { self.start + n } else { self.start } as usize;
        let stop = if self.stop < 0 { self.stop + n } else { self.stop } as usize;
        if stop < start {
            return Err(SfiError::invalid_range(format!(
                "window resolves to [{start}, {stop}) with stop before start"
            )));
        }
        Ok((start, stop))
    }
}

#[cfg(test)]
mod tests {
    use super::IndexWindow;

    #[test]
    fn default_window_excludes_the_last_element() {
        let (start, stop) = IndexWindow::default().resolve(5).expect("default resolves");
        assert_eq!((start, stop), (0, 4));
    }

    #[test]
    fn stop_equal_to_length_covers_everything() {
        let (start, stop) = IndexWindow::new(0, 5).resolve(5).expect("window resolves");
        assert_eq!((start, stop), (0, 5));
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let (start, stop) = IndexWindow::new(-3, -1).resolve(5).expect("window resolves");
        assert_eq!((start, stop), (2, 4));
    }

    #[test]
    fn rejects_out_of_range_endpoints() {
        assert!(IndexWindow::new(6, 2).resolve(5).is_err());
        assert!(IndexWindow::new(-6, 2).resolve(5).is_err());
        assert!(IndexWindow::new(0, 6).resolve(5).is_err());
        assert!(IndexWindow::new(0, -5).resolve(5).is_err());
    }

    #[test]
    fn rejects_stop_before_start_after_resolution() {
        let err = IndexWindow::new(4, 2).resolve(5).expect_err("inverted must fail");
        assert!(err.to_string().contains("stop before start"));
    }

    #[test]
    fn empty_window_is_allowed() {
        let (start, stop) = IndexWindow::new(2, 2).resolve(5).expect("empty window resolves");
        assert_eq!((start, stop), (2, 2));
    }

    #[test]
    fn rejects_zero_length_target() {
        assert!(IndexWindow::default().resolve(0).is_err());
    }
}

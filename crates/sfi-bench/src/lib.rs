// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Benchmark-only crate; see the `benches/` directory.

pub fn crate_name() -> &'static str {
    "sfi-bench"
}

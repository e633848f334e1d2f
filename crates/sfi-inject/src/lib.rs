// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Windowed fault injection into arrays and column frames.

pub mod frame_injector;
pub mod injector;
pub mod window;

pub use frame_injector::{FrameInjectOptions, FrameInjector, InjectMode};
pub use injector::Injector;
pub use window::IndexWindow;

pub fn crate_name() -> &'static str {
    "sfi-inject"
}

//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single sample window, wires them to the
//! GPU layer and drives the `core::App` lifecycle.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};

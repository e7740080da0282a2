//! Quadrant engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the quad samples:
//! window and event loop, device/surface, the async fetch queue, and the quad
//! renderer.

pub mod device;
pub mod window;
pub mod core;
pub mod fetch;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;

//! Core engine-facing contracts.
//!
//! Defines the lifecycle an application plugs into (`init` → `frame` per
//! display refresh → `cleanup`) and the context handed to each call.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;

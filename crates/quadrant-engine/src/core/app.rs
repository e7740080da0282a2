use anyhow::Result;
use winit::event::WindowEvent;

use crate::render::RenderCtx;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application lifecycle driven by `window::Runtime`.
///
/// All calls happen on the event-loop thread, in order:
/// `init` once after the GPU is ready, `frame` once per redraw, `cleanup`
/// once before the GPU and window are released.
pub trait App {
    /// Creates GPU resources and kicks off any asynchronous loads.
    ///
    /// An error aborts startup; `cleanup` is not called.
    fn init(&mut self, ctx: &RenderCtx<'_>) -> Result<()>;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases application-owned resources. The runtime tears down the GPU
    /// and window afterwards.
    fn cleanup(&mut self) {}
}

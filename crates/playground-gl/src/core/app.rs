use std::rc::Rc;

use winit::event::WindowEvent;

use crate::backend::GlowBackend;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
///
/// All callbacks run on the thread owning the GL context, with the context
/// current.
pub trait App {
    /// Called once after the window and GL context exist. GL resources are
    /// created here; an error aborts the runtime.
    fn on_start(&mut self, gl: &Rc<GlowBackend>) -> anyhow::Result<()>;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame, before buffers are swapped.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called before the GL context is destroyed. Drop GL resources here.
    fn on_stop(&mut self) {}
}

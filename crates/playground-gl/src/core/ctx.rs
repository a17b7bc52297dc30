use winit::window::Window;

use crate::backend::GlowBackend;
use crate::render::Renderer;

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
pub struct FrameCtx<'a> {
    pub window: &'a Window,
    pub renderer: &'a Renderer<GlowBackend>,
}

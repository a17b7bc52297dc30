use std::rc::Rc;

use anyhow::Result;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use playground_gl::backend::GlowBackend;
use playground_gl::buffer::{IndexBuffer, VertexArray, VertexBuffer, VertexBufferLayout};
use playground_gl::core::{App, AppControl, FrameCtx};
use playground_gl::paint::Color;
use playground_gl::shader::ShaderProgram;

use crate::pulse::ColorPulse;

pub const VERTEX_SHADER_PATH: &str = "res/shaders/vert.shader";
pub const FRAGMENT_SHADER_PATH: &str = "res/shaders/frag.shader";

const POSITIONS: [f32; 8] = [
    -0.5, -0.5, //
    0.5, -0.5, //
    0.5, 0.5, //
    -0.5, 0.5, //
];

const INDICES: [u32; 6] = [
    0, 1, 2, //
    2, 3, 0, //
];

/// Quad color; the red channel is animated.
const BASE_COLOR: Color = Color::new(0.2, 0.3, 0.8, 1.0);

/// GL objects of the scene. Dropped in `on_stop` while the context is current.
struct Scene {
    program: ShaderProgram<GlowBackend>,
    index_buffer: IndexBuffer<GlowBackend>,
    // Kept alive for the vertex array's attribute bindings.
    _vertex_buffer: VertexBuffer<GlowBackend>,
    vertex_array: VertexArray<GlowBackend>,
}

impl Scene {
    fn new(gl: &Rc<GlowBackend>) -> Result<Self> {
        let vertex_array = VertexArray::new(gl.clone())?;
        let vertex_buffer = VertexBuffer::new(gl.clone(), &POSITIONS)?;

        let mut layout = VertexBufferLayout::new();
        layout.push::<f32>(2);
        vertex_array.add_buffer(&vertex_buffer, &layout);

        let index_buffer = IndexBuffer::new(gl.clone(), &INDICES)?;

        let mut program =
            ShaderProgram::from_files(gl.clone(), VERTEX_SHADER_PATH, FRAGMENT_SHADER_PATH)?;
        program.bind();
        program.set_uniform("u_Color", BASE_COLOR);

        // Start from a clean binding state; every frame binds what it draws.
        vertex_array.unbind();
        program.unbind();
        vertex_buffer.unbind();
        index_buffer.unbind();

        Ok(Self {
            program,
            index_buffer,
            _vertex_buffer: vertex_buffer,
            vertex_array,
        })
    }
}

/// Draws one quad whose color pulses between blue and magenta.
#[derive(Default)]
pub struct QuadDemo {
    scene: Option<Scene>,
    pulse: ColorPulse,
}

impl QuadDemo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl App for QuadDemo {
    fn on_start(&mut self, gl: &Rc<GlowBackend>) -> Result<()> {
        self.scene = Some(Scene::new(gl)?);
        log::info!("scene ready");
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        ctx.renderer.clear();

        scene.program.bind();
        scene
            .program
            .set_uniform("u_Color", BASE_COLOR.with_r(self.pulse.value()));

        ctx.renderer
            .draw(&scene.vertex_array, &scene.index_buffer, &scene.program);

        self.pulse.advance();
        AppControl::Continue
    }

    fn on_stop(&mut self) {
        self.scene = None;
        log::debug!("scene released");
    }
}

use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::GlWindow;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::backend::{GlowBackend, GraphicsBackend};
use crate::core::{App, AppControl, FrameCtx};
use crate::render::Renderer;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Wait for vertical sync on every buffer swap.
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Playground".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
            vsync: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the GL context and drives `app` until the
    /// window closes or the app asks to exit.
    ///
    /// Errors from window/context creation and from [`App::on_start`] are
    /// returned after the event loop has shut down.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Window + current GL context.
///
/// Field order is drop order: the surface and context go before the window.
struct GlWindowState {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    renderer: Renderer<GlowBackend>,
    gl: Rc<GlowBackend>,
    window: Window,
}

impl GlWindowState {
    fn new(event_loop: &ActiveEventLoop, config: &RuntimeConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let (window, gl_config) = create_window_and_config(event_loop, attrs)?;

        let raw_window_handle = window.window_handle().ok().map(|h| h.as_raw());
        let gl_display = gl_config.display();

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(raw_window_handle);

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create OpenGL 3.3 core context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to build GL surface attributes")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create GL window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {e}");
        }

        // Safety: the context was made current on this thread above and stays
        // current until `GlWindowState` is dropped.
        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };
        let gl = Rc::new(unsafe { GlowBackend::new(gl) });

        log::info!("OpenGL version: {}", gl.version());

        let renderer = Renderer::new(gl.clone());
        let size = window.inner_size();
        renderer.resize(size.width, size.height);

        Ok(Self {
            surface,
            context,
            renderer,
            gl,
            window,
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            // Minimized; keep the old surface size.
            return;
        };

        self.surface.resize(&self.context, w, h);
        self.renderer.resize(size.width, size.height);
    }

    fn present(&self) {
        self.window.pre_present_notify();
        if let Err(e) = self.surface.swap_buffers(&self.context) {
            log::error!("failed to swap buffers: {e}");
        }
    }
}

/// Creates the platform GL display, picks a config from it and opens a window
/// compatible with that config.
///
/// WGL needs the native window before configs can be queried, so on Windows the
/// window comes first.
fn create_window_and_config(
    event_loop: &ActiveEventLoop,
    attrs: WindowAttributes,
) -> Result<(Window, Config)> {
    let raw_display = event_loop
        .display_handle()
        .context("event loop has no display handle")?
        .as_raw();

    #[cfg(target_os = "windows")]
    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;
    #[cfg(target_os = "windows")]
    let raw_window = window
        .window_handle()
        .context("window has no native handle")?
        .as_raw();

    #[cfg(target_os = "windows")]
    let preference = DisplayApiPreference::Wgl(Some(raw_window));
    #[cfg(target_os = "macos")]
    let preference = DisplayApiPreference::Cgl;
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let preference = DisplayApiPreference::Egl;

    let display = unsafe { Display::new(raw_display, preference) }
        .context("failed to create GL display")?;

    let template = ConfigTemplateBuilder::new();
    #[cfg(target_os = "windows")]
    let template = template.compatible_with_native_window(raw_window);

    let configs = unsafe { display.find_configs(template.build()) }
        .context("failed to enumerate GL configs")?;
    let gl_config = pick_config(configs, |c| c.hardware_accelerated())
        .ok_or_else(|| anyhow!("no suitable GL config"))?;

    #[cfg(not(target_os = "windows"))]
    let window = glutin_winit::finalize_window(event_loop, attrs, &gl_config)
        .context("failed to create window")?;

    Ok((window, gl_config))
}

/// First hardware-accelerated config, else the first config offered.
/// `None` when nothing is offered.
fn pick_config<C>(configs: impl Iterator<Item = C>, accelerated: impl Fn(&C) -> bool) -> Option<C> {
    configs.reduce(|best, c| {
        if !accelerated(&best) && accelerated(&c) {
            c
        } else {
            best
        }
    })
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    app: A,

    gl: Option<GlWindowState>,
    frame_index: u64,
    failure: Option<anyhow::Error>,
    stopped: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            gl: None,
            frame_index: 0,
            failure: None,
            stopped: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let state = GlWindowState::new(event_loop, &self.config)?;
        self.app
            .on_start(&state.gl)
            .context("application failed to start")?;
        state.window.request_redraw();
        self.gl = Some(state);
        Ok(())
    }

    /// Lets the app release GL objects while the context is still current,
    /// then tears the context and window down. Idempotent.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if !self.stopped {
            self.stopped = true;
            if self.gl.is_some() {
                self.app.on_stop();
            }
            self.gl = None;
            log::debug!("runtime shut down after {} frames", self.frame_index);
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.shutdown(event_loop);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl.is_some() || self.stopped {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.stopped {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the animation advances once per frame.
        if let Some(gl) = &self.gl {
            gl.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gl) = self.gl.as_ref() else {
            return;
        };
        if gl.window.id() != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => {
                gl.resize(size);
                gl.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let control = {
                    let mut ctx = FrameCtx {
                        window: &gl.window,
                        renderer: &gl.renderer,
                    };
                    self.app.on_frame(&mut ctx)
                };

                gl.present();
                self.frame_index = self.frame_index.wrapping_add(1);

                if control == AppControl::Exit {
                    self.shutdown(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::backend::GraphicsBackend;

use super::{FsSourceLoader, ShaderError, ShaderStage, SourceLoader, UniformCache, UniformValue};

/// A linked GL program plus its uniform-location cache.
///
/// The program handle is owned exclusively: the type is move-only and deletes
/// the handle on drop. Uniform setters require the program to be bound; they do
/// not re-bind on their own.
pub struct ShaderProgram<B: GraphicsBackend> {
    gl: Rc<B>,
    program: B::Program,
    uniforms: UniformCache<B::UniformLocation>,
}

impl<B: GraphicsBackend> ShaderProgram<B> {
    /// Reads both stages from disk, compiles and links them.
    ///
    /// On success the new program is left bound.
    pub fn from_files(
        gl: Rc<B>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        Self::load(gl, &FsSourceLoader, vertex_path, fragment_path)
    }

    /// Like [`from_files`](Self::from_files) with a caller-provided loader.
    ///
    /// Both sources are read before any GL object is created, so an unreadable
    /// path never reaches the compiler.
    pub fn load<S>(
        gl: Rc<B>,
        loader: &S,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError>
    where
        S: SourceLoader + ?Sized,
    {
        let vertex = read_source(loader, ShaderStage::Vertex, vertex_path.as_ref())?;
        let fragment = read_source(loader, ShaderStage::Fragment, fragment_path.as_ref())?;

        Self::from_sources(gl, &vertex, &fragment)
    }

    /// Compiles and links in-memory sources.
    pub fn from_sources(gl: Rc<B>, vertex: &str, fragment: &str) -> Result<Self, ShaderError> {
        let program = {
            let vs = CompiledStage::compile(&*gl, ShaderStage::Vertex, vertex)?;
            let fs = CompiledStage::compile(&*gl, ShaderStage::Fragment, fragment)?;
            link(&*gl, [&vs, &fs])?
            // Stage objects are released here, linked or not.
        };

        gl.use_program(Some(program));

        Ok(Self {
            gl,
            program,
            uniforms: UniformCache::new(),
        })
    }

    /// Makes this program the active one.
    pub fn bind(&self) {
        self.gl.use_program(Some(self.program));
    }

    /// Clears the active program. Idempotent.
    pub fn unbind(&self) {
        self.gl.use_program(None);
    }

    /// Raw backend handle.
    pub fn handle(&self) -> B::Program {
        self.program
    }

    /// Resolved uniform names so far.
    pub fn uniforms(&self) -> &UniformCache<B::UniformLocation> {
        &self.uniforms
    }

    /// Location of `name`, queried from the backend on first use only.
    pub fn uniform_location(&mut self, name: &str) -> Option<B::UniformLocation> {
        let gl = &self.gl;
        let program = self.program;
        self.uniforms
            .resolve(name, |n| gl.uniform_location(program, n))
            .cloned()
    }

    /// Sets a `vec4` uniform on the bound program.
    pub fn set_uniform_4f(&mut self, name: &str, v0: f32, v1: f32, v2: f32, v3: f32) {
        self.set_uniform(name, [v0, v1, v2, v3]);
    }

    /// Sets a uniform on the bound program.
    ///
    /// A name missing from the program still issues the set call, which GL
    /// ignores; the miss itself was logged when the name was first resolved.
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) {
        debug_assert!(!name.is_empty(), "uniform name must not be empty");

        let gl = &self.gl;
        let program = self.program;
        let location = self
            .uniforms
            .resolve(name, |n| gl.uniform_location(program, n));

        gl.set_uniform(location, value.into());
    }
}

impl<B: GraphicsBackend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
    }
}

impl<B: GraphicsBackend> fmt::Debug for ShaderProgram<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("program", &self.program)
            .field("cached_uniforms", &self.uniforms.len())
            .finish()
    }
}

fn read_source<S>(loader: &S, stage: ShaderStage, path: &Path) -> Result<String, ShaderError>
where
    S: SourceLoader + ?Sized,
{
    log::debug!("reading {stage} shader source {}", path.display());

    loader
        .load(path)
        .map_err(|source| ShaderError::SourceUnavailable {
            stage,
            path: path.to_path_buf(),
            source,
        })
}

/// A compiled stage, deleted when dropped.
struct CompiledStage<'a, B: GraphicsBackend> {
    gl: &'a B,
    shader: B::Shader,
}

impl<'a, B: GraphicsBackend> CompiledStage<'a, B> {
    fn compile(gl: &'a B, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        log::info!("compiling {stage} shader");

        let shader = gl.create_shader(stage).map_err(ShaderError::Backend)?;
        let compiled = Self { gl, shader };

        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let info_log = gl.shader_info_log(shader);
            log::error!("{stage} shader failed to compile:\n{}", info_log.trim_end());
            return Err(ShaderError::Compile { stage, log: info_log });
        }

        let info_log = gl.shader_info_log(shader);
        if !info_log.trim().is_empty() {
            log::warn!("{stage} shader compiled with diagnostics:\n{}", info_log.trim_end());
        }

        log::info!("compiled {stage} shader");
        Ok(compiled)
    }
}

impl<B: GraphicsBackend> Drop for CompiledStage<'_, B> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.shader);
    }
}

/// Links the stages into a new program. The program is deleted again if
/// linking fails; on success the stages are detached.
fn link<B: GraphicsBackend>(
    gl: &B,
    stages: [&CompiledStage<'_, B>; 2],
) -> Result<B::Program, ShaderError> {
    log::info!("linking program");

    let program = gl.create_program().map_err(ShaderError::Backend)?;
    for stage in stages {
        gl.attach_shader(program, stage.shader);
    }

    gl.link_program(program);

    if !gl.program_link_status(program) {
        let info_log = gl.program_info_log(program);
        gl.delete_program(program);
        log::error!("program failed to link:\n{}", info_log.trim_end());
        return Err(ShaderError::Link { log: info_log });
    }

    let info_log = gl.program_info_log(program);
    if !info_log.trim().is_empty() {
        log::warn!("program linked with diagnostics:\n{}", info_log.trim_end());
    }

    for stage in stages {
        gl.detach_shader(program, stage.shader);
    }

    log::info!("linked program");
    Ok(program)
}

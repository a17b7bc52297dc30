use super::GraphicsBackend;

/// Upper bound on flags read per check. A lost context can report errors
/// forever.
const MAX_DRAINED: usize = 32;

/// Symbolic name of a GL error code.
pub fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "unknown GL error",
    }
}

/// Reads every pending error flag and logs each one against `call`.
///
/// Returns the codes in the order the backend reported them.
pub fn drain_errors<B>(gl: &B, call: &str) -> Vec<u32>
where
    B: GraphicsBackend + ?Sized,
{
    let mut codes = Vec::new();
    while codes.len() < MAX_DRAINED {
        let Some(code) = gl.take_error() else {
            break;
        };
        log::error!("[OpenGL error] {} ({code:#06x}) after {call}", error_name(code));
        codes.push(code);
    }
    codes
}

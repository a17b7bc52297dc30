use std::fmt;
use std::io;
use std::path::PathBuf;

use super::ShaderStage;

/// Failure to build a usable [`ShaderProgram`](super::ShaderProgram).
///
/// All variants are fatal; there is no partially working program.
#[derive(Debug)]
pub enum ShaderError {
    /// The stage's source file could not be opened or read.
    SourceUnavailable {
        stage: ShaderStage,
        path: PathBuf,
        source: io::Error,
    },
    /// The driver rejected a stage. `log` is the compiler's info log.
    Compile { stage: ShaderStage, log: String },
    /// Both stages compiled but the program did not link.
    Link { log: String },
    /// The driver refused to allocate a shader or program object.
    Backend(String),
}

impl ShaderError {
    /// Stage the error is attributed to, if any.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::SourceUnavailable { stage, .. } | ShaderError::Compile { stage, .. } => {
                Some(*stage)
            }
            ShaderError::Link { .. } | ShaderError::Backend(_) => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::SourceUnavailable { stage, path, source } => write!(
                f,
                "cannot open {stage} shader source {}: {source}",
                path.display()
            ),
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader failed to compile: {}", log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "shader program failed to link: {}", log.trim_end())
            }
            ShaderError::Backend(msg) => write!(f, "graphics backend error: {msg}"),
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderError::SourceUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}

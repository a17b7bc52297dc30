use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
///
/// Shader diagnostics and GL errors stay visible at `info`; the windowing and
/// context crates log every event-loop and EGL/GLX step at that level, so they
/// are held to warnings.
pub const DEFAULT_FILTER: &str =
    "info,winit=warn,glutin=warn,glutin_winit=warn,calloop=warn,sctk=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "playground_gl=debug") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Picks the filter directives: explicit config, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. Blank values count as unset.
fn filter_spec<'a>(configured: Option<&'a str>, from_env: Option<&'a str>) -> &'a str {
    configured
        .filter(|f| !f.trim().is_empty())
        .or(from_env.filter(|f| !f.trim().is_empty()))
        .unwrap_or(DEFAULT_FILTER)
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` once; later calls are ignored.
///
/// Call it first thing in `main` so shader diagnostics emitted during startup
/// are not lost.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let from_env = std::env::var("RUST_LOG").ok();
        let spec = filter_spec(config.env_filter.as_deref(), from_env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(spec).write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter '{spec}'");
        }
    });
}

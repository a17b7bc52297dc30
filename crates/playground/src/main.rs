mod app;
mod pulse;

use playground_gl::logging::{init_logging, LoggingConfig};
use playground_gl::window::{Runtime, RuntimeConfig};

use crate::app::QuadDemo;

fn main() {
    init_logging(LoggingConfig::default());
    log::info!("starting playground");

    if let Err(e) = Runtime::run(RuntimeConfig::default(), QuadDemo::new()) {
        log::error!("playground failed: {e:#}");
        std::process::exit(-1);
    }

    log::info!("clean shutdown");
}

//! Textured quad at rest in the window center.

use quadrant_engine::logging::{init_logging, LoggingConfig};
use quadrant_sample::SampleConfig;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = quadrant_sample::run(SampleConfig::textured_static()) {
        log::error!("quadrant runtime error: {e:#}");
        std::process::exit(1);
    }
}

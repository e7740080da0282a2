//! Flat-colored quad; no texture fetch, no animation.

use quadrant_engine::logging::{init_logging, LoggingConfig};
use quadrant_sample::SampleConfig;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = quadrant_sample::run(SampleConfig::flat()) {
        log::error!("quadrant runtime error: {e:#}");
        std::process::exit(1);
    }
}

//! Logging initialisation.
//!
//! `RUST_LOG` wins when set; otherwise `-v` flags pick the level.

use tracing_subscriber::{EnvFilter, fmt};

fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));

    let result = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: logging already initialised: {}", e);
    }
}

//! Logging initialization for the CLI.
//!
//! Logging is owned by the CLI crate to keep library crates lightweight;
//! the core and parser crates only emit `tracing` events.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets raised to the requested level.
const TARGETS: [&str; 3] = ["jsast", "jsast_core", "jsast_parser"];

/// Map the `-d` count to a level: 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber. Logs always go to stderr so stdout
/// only carries the report.
///
/// # Panics
/// Panics if the subscriber cannot be initialized (e.g., called twice).
pub fn init(verbosity: u8, json: bool) {
    let level = level_for(verbosity);

    // RUST_LOG is honored, with the verbosity flag layered on top.
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    for target in TARGETS {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

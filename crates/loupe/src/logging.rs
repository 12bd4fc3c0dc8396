//! Logging setup for the loupe CLI.
//!
//! The filter is assembled from the `[logging]` config section and the
//! repeatable `-v` flag; `RUST_LOG` replaces it wholesale. Logs go to
//! stderr so stdout stays clean for extracted metadata.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build the filter directive for the requested verbosity.
///
/// No `-v` uses the configured level, `-v` raises loupe to debug, `-vv`
/// and beyond to trace. The HTTP stack underneath the URL sources stays at
/// warn on every rung.
fn directive(config_level: &str, verbose: u8) -> String {
    let level = match verbose {
        0 => config_level,
        1 => "debug",
        _ => "trace",
    };
    format!("{level},hyper=warn,reqwest=warn")
}

/// Initialize the tracing subscriber.
///
/// CLI flags win over the config file; `--json-logs` (or `format = "json"`)
/// selects the structured layer for machine consumption.
pub fn init(config: &loupe_core::Config, verbose: u8, json_logs: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(&config.logging.level, verbose)));

    let json = json_logs || config.logging.format == "json";
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

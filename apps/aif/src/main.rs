//! # aif
//!
//! Build AIF knowledge graphs from extraction manifests.
//!
//! ## Usage
//!
//! ```bash
//! # Build a graph as Turtle
//! aif build -i manifest.json -o graph.ttl
//!
//! # Audit a manifest's graph, machine-readable
//! aif check -i manifest.json --json
//!
//! # BLAKE3 digest of the N-Triples dump
//! aif --config aif.toml hash -i manifest.json
//! ```

use aif::cli;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    // AIF_LOG_FORMAT=json enables machine-parseable logs.
    // Logs go to stderr so a dump on stdout stays clean.
    let log_format = std::env::var("AIF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "aif=info,aif_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    match cli::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! # Tangle - Query-Graph Workbench
//!
//! The main binary for the Tangle query-graph state machine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            apps/tangle (THE BINARY)         │
//! │                                             │
//! │   validate / normalize / template / apply   │
//! │                      │                      │
//! │                      ▼                      │
//! │             ┌─────────────────┐             │
//! │             │   tangle-core   │             │
//! │             │   (THE LOGIC)   │             │
//! │             └─────────────────┘             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! tangle validate -f message.json
//! tangle normalize -f legacy_graph.json -o canonical.json
//! tangle template
//! tangle apply -s state.json --script edits.json
//! ```

use clap::Parser;
use tangle::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — TANGLE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TANGLE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "tangle=debug"
    } else {
        "tangle=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    match cli::execute(cli) {
        Ok(code) => std::process::exit(i32::from(code)),
        Err(e) => {
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the Tangle startup banner.
fn print_banner() {
    println!(
        r#"
  ████████╗ █████╗ ███╗   ██╗ ██████╗ ██╗     ███████╗
  ╚══██╔══╝██╔══██╗████╗  ██║██╔════╝ ██║     ██╔════╝
     ██║   ███████║██╔██╗ ██║██║  ███╗██║     █████╗
     ██║   ██╔══██║██║╚██╗██║██║   ██║██║     ██╔══╝
     ██║   ██║  ██║██║ ╚████║╚██████╔╝███████╗███████╗
     ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═══╝ ╚═════╝ ╚══════╝╚══════╝

  Query-Graph Workbench v{}

  Deterministic • Connected • Canonical
"#,
        env!("CARGO_PKG_VERSION")
    );
}

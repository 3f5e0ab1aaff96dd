//! # APAX - Bullion Dashboard CLI
//!
//! The main binary for the APAX mock bullion-token platform.
//!
//! This application provides:
//! - CLI interface over the dashboard state engine
//! - The timed driver for the identity-verification sequencer
//! - Prefs file I/O for the persisted view selection
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/apax (THE BINARY)                  │
//! │                                                          │
//! │  ┌─────────────┐   ┌───────────────┐   ┌─────────────┐  │
//! │  │   CLI       │   │ Verify Driver │   │  Prefs I/O  │  │
//! │  │  (clap)     │   │ (tokio timer) │   │   (file)    │  │
//! │  └──────┬──────┘   └───────┬───────┘   └──────┬──────┘  │
//! │         │                  │                  │          │
//! │         └──────────────────┼──────────────────┘          │
//! │                            ▼                             │
//! │                    ┌───────────────┐                     │
//! │                    │   apax-core   │                     │
//! │                    │  (THE LOGIC)  │                     │
//! │                    └───────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Dashboard snapshot
//! apax status
//!
//! # Run the identity verification flow at its real cadence
//! apax verify
//!
//! # Proof-of-reserve report
//! apax reserve
//!
//! # Persisted view selection
//! apax view --set por
//! ```

use apax::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — APAX_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("APAX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apax=info".into());

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

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the APAX startup banner.
fn print_banner() {
    println!(
        r#"
   █████╗ ██████╗  █████╗ ██╗  ██╗
  ██╔══██╗██╔══██╗██╔══██╗╚██╗██╔╝
  ███████║██████╔╝███████║ ╚███╔╝
  ██╔══██║██╔═══╝ ██╔══██║ ██╔██╗
  ██║  ██║██║     ██║  ██║██╔╝ ██╗
  ╚═╝  ╚═╝╚═╝     ╚═╝  ╚═╝╚═╝  ╚═╝

  Bullion Dashboard v{}

  Vaulted • Audited • Mock Data Only
"#,
        env!("CARGO_PKG_VERSION")
    );
}

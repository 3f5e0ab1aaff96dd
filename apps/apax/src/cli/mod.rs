//! # APAX CLI Module
//!
//! This module implements the CLI interface for APAX.
//!
//! ## Available Commands
//!
//! - `status` - Dashboard snapshot (prices, holdings, vault)
//! - `verify` - Run the identity-verification flow at its real cadence
//! - `reserve` - Proof-of-reserve report
//! - `history` - Mock intraday price series for one metal
//! - `audit` - Recent vault audit events
//! - `view` - Read or set the persisted view selection

mod commands;

use apax_core::ApaxError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// APAX - Bullion Dashboard CLI
///
/// A mock precious-metals-backed token platform. All data is generated
/// locally from fixed seeds; nothing here talks to a real vault.
#[derive(Parser, Debug)]
#[command(name = "apax")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the persisted UI prefs file
    #[arg(short = 'S', long, global = true, default_value = "apax-ui.state")]
    pub state: PathBuf,

    /// Path to an optional apax.toml config file
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the dashboard snapshot
    Status,

    /// Run the identity-verification flow
    Verify {
        /// Tick interval in milliseconds (overrides config and the
        /// built-in 800ms cadence)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Debug: inject a failure when the given stage is reached
        /// (scanning, liveness, analyzing)
        #[arg(long)]
        fail_at: Option<String>,

        /// After an injected failure, reset and let a fresh run complete
        #[arg(long)]
        resume: bool,
    },

    /// Show the proof-of-reserve report
    Reserve,

    /// Show the mock intraday price series for one metal
    History {
        /// Metal (gold, silver, platinum)
        #[arg(short, long, default_value = "gold")]
        metal: String,
    },

    /// Show recent vault audit events
    Audit,

    /// Read or set the persisted view selection
    View {
        /// Select a view (dashboard, por, zakat, redemption, sharia)
        #[arg(short, long)]
        set: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ApaxError> {
    let ctx = CommandContext::build(cli.config.as_deref(), &cli.state, cli.json_mode)?;

    match cli.command {
        Some(Commands::Verify {
            interval_ms,
            fail_at,
            resume,
        }) => cmd_verify(&ctx, interval_ms, fail_at.as_deref(), resume).await,
        Some(Commands::Status) => cmd_status(&ctx),
        Some(Commands::Reserve) => cmd_reserve(&ctx),
        Some(Commands::History { metal }) => cmd_history(&ctx, &metal),
        Some(Commands::Audit) => cmd_audit(&ctx),
        Some(Commands::View { set }) => cmd_view(&ctx, set.as_deref()),
        None => {
            // No subcommand - show status by default
            cmd_status(&ctx)
        }
    }
}

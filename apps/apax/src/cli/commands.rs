//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Commands are thin: they build a [`CommandContext`] (config + seeded
//! store + persisted prefs), call into `apax-core`, and render the result
//! as text or JSON. The only long-running command is `verify`, which owns
//! the tokio timer driving the sequencer.

use apax_core::{
    ApaxError, AuditEntry, AuditStatus, MetalKind, ReserveAssessor, Sequencer, Store, TickOutcome,
    UiPrefs, UnixSeconds, VerificationStage, format_age, price_history,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::AppConfig;
use crate::prefs::{load_prefs, save_prefs};

/// Width of the textual progress bar rendered by `verify`.
const PROGRESS_BAR_WIDTH: u64 = 20;

// =============================================================================
// COMMAND CONTEXT
// =============================================================================

/// Everything a command needs: resolved config, the seeded store with the
/// persisted view applied, and the output mode.
pub struct CommandContext {
    pub config: AppConfig,
    pub store: Store,
    pub state_path: PathBuf,
    pub json_mode: bool,
    pub now: UnixSeconds,
}

impl CommandContext {
    /// Load config and prefs, then seed the store.
    pub fn build(
        config_path: Option<&Path>,
        state_path: &Path,
        json_mode: bool,
    ) -> Result<Self, ApaxError> {
        let config = AppConfig::load(config_path)?;
        let now = wall_clock_now();
        let mut store = config.seed_store(now);

        let prefs = load_prefs(state_path)?;
        store.set_active_view(prefs.active_view);
        seed_audit_trail(&mut store, now);

        Ok(Self {
            config,
            store,
            state_path: state_path.to_path_buf(),
            json_mode,
            now,
        })
    }
}

/// Current wall-clock time as seconds since the epoch.
///
/// The core never reads the clock; this is the single place the app does.
fn wall_clock_now() -> UnixSeconds {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    UnixSeconds::new(secs)
}

/// Seed the mock audit trail the proof-of-reserve view lists.
fn seed_audit_trail(store: &mut Store, now: UnixSeconds) {
    let at = |secs_ago: u64| UnixSeconds::new(now.value().saturating_sub(secs_ago));
    let audit = store.audit_mut();
    audit.record(AuditEntry::new(
        at(26 * 3600),
        "Quarterly assay report published",
        AuditStatus::Confirmed,
    ));
    audit.record(AuditEntry::new(
        at(3 * 3600),
        "Bar list refresh scheduled",
        AuditStatus::Pending,
    ));
    audit.record(AuditEntry::new(
        at(34 * 60),
        "Custodian attestation received",
        AuditStatus::Confirmed,
    ));
    audit.record(AuditEntry::new(
        at(2 * 60),
        "Vault audit reconciled: 412 bars verified",
        AuditStatus::Confirmed,
    ));
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the dashboard snapshot.
pub fn cmd_status(ctx: &CommandContext) -> Result<(), ApaxError> {
    let store = &ctx.store;

    if ctx.json_mode {
        let output = serde_json::json!({
            "active_view": store.active_view().as_str(),
            "prices": {
                "gold_cents": store.prices().gold.value(),
                "silver_cents": store.prices().silver.value(),
                "platinum_cents": store.prices().platinum.value(),
            },
            "holdings": {
                "gold_mg": store.holdings().gold.value(),
                "silver_mg": store.holdings().silver.value(),
                "platinum_mg": store.holdings().platinum.value(),
                "tokens_hundredths": store.holdings().tokens.value(),
                "total_value_cents": store.total_holding_value().value(),
            },
            "vault": {
                "total_metal_mg": store.vault_total_metal().value(),
                "tokens_minted_hundredths": store.tokens_minted().value(),
                "status": store.vault().status.to_string(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("Dashboard (view: {})", store.active_view());
    println!();
    println!("Spot prices (per gram):");
    for metal in MetalKind::ALL {
        println!("  {:<9} {}", metal, store.prices().price_of(metal));
    }
    println!();
    println!("Your holdings:");
    for metal in MetalKind::ALL {
        println!(
            "  {:<9} {:>14}  ≈ {}",
            metal,
            store.holdings().mass_of(metal).to_string(),
            store.holding_value(metal)
        );
    }
    println!("  {:<9} {:>14}", "tokens", store.holdings().tokens.to_string());
    println!("  Total bullion value: {}", store.total_holding_value());
    println!();
    println!(
        "Vault: {} metal backing {} ({})",
        store.vault_total_metal(),
        store.tokens_minted(),
        store.vault().status
    );

    Ok(())
}

// =============================================================================
// VERIFY COMMAND
// =============================================================================

/// Terminal monitor line shown while a stage is active.
fn monitor_line(stage: VerificationStage) -> &'static str {
    match stage {
        VerificationStage::Scanning => "SCANNING_DOCUMENT...",
        VerificationStage::Liveness => "MATCHING_BIOMETRICS...",
        VerificationStage::Analyzing => "COMPUTING_HASH_VERIFICATION...",
        _ => "",
    }
}

/// Render the progress bar for a stage.
fn progress_bar(stage: VerificationStage) -> String {
    let filled = stage.progress_per_mille() * PROGRESS_BAR_WIDTH / 1000;
    let mut bar = String::new();
    for i in 0..PROGRESS_BAR_WIDTH {
        bar.push(if i < filled { '█' } else { '·' });
    }
    bar
}

/// Run the identity-verification flow at its configured cadence.
///
/// `fail_at` injects the manual failure signal when the named stage is
/// reached; with `resume`, the run resets afterwards and a fresh
/// generation completes normally.
pub async fn cmd_verify(
    ctx: &CommandContext,
    interval_ms: Option<u64>,
    fail_at: Option<&str>,
    resume: bool,
) -> Result<(), ApaxError> {
    let mut fail_at = parse_fail_stage(fail_at)?;
    let interval_ms = interval_ms
        .unwrap_or_else(|| ctx.config.effective_interval_ms())
        .max(1);

    // The host-side "what completion unlocks" hook. Here it only flips the
    // KYC badge in the logs; the dashboard front end would unlock its next
    // step from the same signal.
    let mut sequencer = Sequencer::new().with_completion(Box::new(|| {
        tracing::info!("verification completed; KYC badge unlocked");
    }));

    let Some(mut generation) = sequencer.start() else {
        return Ok(());
    };
    tracing::debug!(interval_ms, "verification run started");

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
    // The first interval tick fires immediately; consume it so stage
    // transitions land on the cadence boundary.
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match sequencer.tick(generation) {
            TickOutcome::Advanced(stage) => {
                report_transition(ctx, stage);
                if fail_at == Some(stage) {
                    sequencer.fail();
                    report_transition(ctx, VerificationStage::Failed);
                    if resume {
                        // Retry path: reset invalidates this generation and
                        // starts a fresh run from Idle.
                        fail_at = None;
                        generation = sequencer.reset();
                        report_transition(ctx, VerificationStage::Idle);
                    } else {
                        if !ctx.json_mode {
                            println!("  Verification failed — security mismatch signaled");
                        }
                        return Ok(());
                    }
                }
            }
            TickOutcome::Completed => {
                report_transition(ctx, VerificationStage::Completed);
                return Ok(());
            }
            TickOutcome::Stale | TickOutcome::Halted => {
                // Nothing left to drive.
                return Ok(());
            }
        }
    }
}

/// Parse and validate the failure-injection stage.
fn parse_fail_stage(raw: Option<&str>) -> Result<Option<VerificationStage>, ApaxError> {
    let Some(raw) = raw else { return Ok(None) };
    let stage: VerificationStage = raw.parse()?;
    if stage.sequence_position().is_none() {
        return Err(ApaxError::UnknownStage(format!(
            "{raw} (must be scanning, liveness, or analyzing)"
        )));
    }
    Ok(Some(stage))
}

/// Print one stage transition.
fn report_transition(ctx: &CommandContext, stage: VerificationStage) {
    if ctx.json_mode {
        let output = serde_json::json!({
            "stage": format!("{:?}", stage).to_ascii_lowercase(),
            "label": stage.label(),
            "progress_per_mille": stage.progress_per_mille(),
        });
        println!("{}", output);
        return;
    }

    let monitor = monitor_line(stage);
    if monitor.is_empty() {
        println!("  [{}] {}", progress_bar(stage), stage.label());
    } else {
        println!("  [{}] {:<9} {}", progress_bar(stage), stage.label(), monitor);
    }
}

// =============================================================================
// RESERVE COMMAND
// =============================================================================

/// Show the proof-of-reserve report.
pub fn cmd_reserve(ctx: &CommandContext) -> Result<(), ApaxError> {
    let assessor = ReserveAssessor::new();
    let report = assessor.assess(ctx.store.vault());
    let fully_backed = assessor.is_fully_backed(&report);

    if ctx.json_mode {
        let output = serde_json::json!({
            "total_metal_mg": report.total_metal.value(),
            "tokens_minted_hundredths": report.tokens_minted.value(),
            "ratio_bps": report.ratio_bps,
            "fully_backed": fully_backed,
            "status": report.status.to_string(),
            "last_audit": ctx.store.vault().last_audit.value(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("Proof of Reserve");
    println!();
    println!("  Allocated bullion:  {}", report.total_metal);
    println!("  Tokens minted:      {}", report.tokens_minted);
    println!(
        "  Reserve ratio:      {}.{:02}%",
        report.ratio_whole_percent(),
        report.ratio_percent_fraction()
    );
    println!(
        "  Backing:            {}",
        if fully_backed {
            "fully metal-backed"
        } else {
            "partially metal-backed"
        }
    );
    println!(
        "  Last audit:         {} ({})",
        format_age(ctx.store.vault().last_audit, ctx.now),
        report.status
    );

    Ok(())
}

// =============================================================================
// HISTORY COMMAND
// =============================================================================

/// Show the mock intraday series for one metal.
pub fn cmd_history(ctx: &CommandContext, metal: &str) -> Result<(), ApaxError> {
    let metal: MetalKind = metal.parse()?;
    let spot = ctx.store.prices().price_of(metal);
    let series = price_history(spot);

    if ctx.json_mode {
        let points: Vec<_> = series
            .iter()
            .map(|p| serde_json::json!({ "time": p.time, "price_cents": p.price.value() }))
            .collect();
        let output = serde_json::json!({ "metal": metal.name(), "series": points });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return Ok(());
    }

    println!("{} — intraday (UTC)", metal);
    for point in &series {
        println!("  {}  {}", point.time, point.price);
    }

    Ok(())
}

// =============================================================================
// AUDIT COMMAND
// =============================================================================

/// Show recent vault audit events.
pub fn cmd_audit(ctx: &CommandContext) -> Result<(), ApaxError> {
    let trail = ctx.store.audit();

    if ctx.json_mode {
        let entries: Vec<_> = trail
            .entries()
            .map(|e| {
                serde_json::json!({
                    "at": e.at.value(),
                    "event": e.event,
                    "status": match e.status {
                        AuditStatus::Confirmed => "confirmed",
                        AuditStatus::Pending => "pending",
                    },
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "entries": entries }))
                .unwrap_or_default()
        );
        return Ok(());
    }

    println!("Audit trail ({} events)", trail.len());
    for entry in trail.entries() {
        let marker = match entry.status {
            AuditStatus::Confirmed => "✓",
            AuditStatus::Pending => "…",
        };
        println!(
            "  {} {:<44} {}",
            marker,
            entry.event,
            format_age(entry.at, ctx.now)
        );
    }

    Ok(())
}

// =============================================================================
// VIEW COMMAND
// =============================================================================

/// Read or set the persisted view selection.
pub fn cmd_view(ctx: &CommandContext, set: Option<&str>) -> Result<(), ApaxError> {
    if let Some(raw) = set {
        let view = raw.parse()?;
        save_prefs(&ctx.state_path, &UiPrefs::new(view))?;
        tracing::info!(view = %view, "persisted view selection");
        if ctx.json_mode {
            println!("{}", serde_json::json!({ "active_view": view.as_str() }));
        } else {
            println!("Active view set to '{}'", view);
        }
        return Ok(());
    }

    let view = ctx.store.active_view();
    if ctx.json_mode {
        println!("{}", serde_json::json!({ "active_view": view.as_str() }));
    } else {
        println!("Active view: {}", view);
    }
    Ok(())
}

//! # apax-core
//!
//! The deterministic state engine for the APAX dashboard - THE LOGIC.
//!
//! APAX is a mock precious-metals-backed token platform. This crate owns
//! everything the dashboard derives its display from: the identity
//! verification stage sequencer, the dashboard store (prices, holdings,
//! vault totals, audit trail, view selection), the intraday price series,
//! the proof-of-reserve arithmetic, and the prefs persistence format.
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Is the ONLY place where dashboard state exists (stateful)
//! - Is deterministic: integer fixed-point only, no floats, no randomness
//! - Never reads the clock or schedules timers; drivers supply ticks and
//!   timestamps explicitly
//! - Has NO async, NO network dependencies (pure Rust)

// =============================================================================
// MODULES
// =============================================================================

pub mod audit;
pub mod formats;
pub mod market;
pub mod primitives;
pub mod reserve;
pub mod sequencer;
pub mod stage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ActiveView, ApaxError, MetalKind, MetalPrices, Milligrams, TokenHundredths, UnixSeconds,
    UsdCents, UserHoldings, VaultData, VaultStatus,
};

// =============================================================================
// RE-EXPORTS: Sequencer
// =============================================================================

pub use sequencer::{CompletionHandler, Generation, Sequencer, TickOutcome};
pub use stage::VerificationStage;

// =============================================================================
// RE-EXPORTS: Dashboard State
// =============================================================================

pub use audit::{AuditEntry, AuditStatus, AuditTrail, format_age};
pub use market::{HISTORY_SAMPLES, PricePoint, price_history};
pub use reserve::{ReserveAssessor, ReserveReport};
pub use store::Store;

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{PrefsHeader, UiPrefs, prefs_from_bytes, prefs_to_bytes};

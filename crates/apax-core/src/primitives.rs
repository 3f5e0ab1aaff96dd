//! # Innate Primitives
//!
//! Hardcoded runtime constants for the APAX CORE.
//!
//! APAX is a mock platform: it starts with fixed seed data and fixed logic.
//! These primitives are compiled into the binary and are immutable at runtime.
//! Drivers may override the seed values through an explicit configuration
//! struct; nothing in the CORE reads ambient state.

/// Cadence of automatic stage advancement, in milliseconds.
///
/// One tick is delivered to the [`crate::Sequencer`] per interval.
/// The CORE never schedules ticks itself; drivers own the timer.
pub const TICK_INTERVAL_MS: u64 = 800;

/// Number of active (non-terminal, non-idle) verification stages.
///
/// The fixed progression is `Scanning → Liveness → Analyzing`, followed by
/// the terminal `Completed` stage.
pub const ACTIVE_STAGE_COUNT: usize = 3;

/// Magic bytes for the APAX prefs file header.
///
/// - File Header = Magic Bytes ("APAX") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"APAX";

/// Current prefs serialization format version.
///
/// Increment this when making breaking changes to the serialization format.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum allowed payload size for the prefs format.
///
/// The prefs payload holds a single enum field; anything near this limit
/// is corrupted or hostile and is rejected before deserialization.
pub const MAX_PREFS_PAYLOAD_SIZE: usize = 4096;

/// Reserve ratio, in basis points, at which the token supply counts as
/// fully metal-backed.
pub const FULL_BACKING_BPS: u64 = 10_000;

/// Maximum number of entries retained in the audit trail.
///
/// Older entries are evicted first, keeping the trail bounded regardless
/// of how long a session runs.
pub const MAX_AUDIT_ENTRIES: usize = 64;

// =============================================================================
// SEED DATA (the reference dashboard's initial mock state)
// =============================================================================

/// Seed spot price for gold: $2342.50 per gram.
pub const SEED_GOLD_PRICE_CENTS: u64 = 234_250;

/// Seed spot price for silver: $27.85 per gram.
pub const SEED_SILVER_PRICE_CENTS: u64 = 2_785;

/// Seed spot price for platinum: $1024.30 per gram.
pub const SEED_PLATINUM_PRICE_CENTS: u64 = 102_430;

/// Seed user holdings: 156.750 g gold.
pub const SEED_HOLDING_GOLD_MG: u64 = 156_750;

/// Seed user holdings: 892.400 g silver.
pub const SEED_HOLDING_SILVER_MG: u64 = 892_400;

/// Seed user holdings: 45.200 g platinum.
pub const SEED_HOLDING_PLATINUM_MG: u64 = 45_200;

/// Seed user balance: 1250.00 APXI tokens.
pub const SEED_HOLDING_TOKENS_HUNDREDTHS: u64 = 125_000;

/// Seed vault total: 15678.500 g gold.
pub const SEED_VAULT_GOLD_MG: u64 = 15_678_500;

/// Seed vault total: 89240.750 g silver.
pub const SEED_VAULT_SILVER_MG: u64 = 89_240_750;

/// Seed vault total: 4520.250 g platinum.
pub const SEED_VAULT_PLATINUM_MG: u64 = 4_520_250;

/// Seed token supply: 125000.00 APXI minted.
pub const SEED_TOKENS_MINTED_HUNDREDTHS: u64 = 12_500_000;

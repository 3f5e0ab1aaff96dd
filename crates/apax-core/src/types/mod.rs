//! # Core Type Definitions
//!
//! This module contains all core data types for the APAX state engine:
//! - Fixed-point scalars (`UsdCents`, `Milligrams`, `TokenHundredths`, `UnixSeconds`)
//! - Dashboard slices (`MetalPrices`, `UserHoldings`, `VaultData`)
//! - UI selection (`ActiveView`) and metal identity (`MetalKind`)
//! - Error types (`ApaxError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Use saturating arithmetic for derived quantities to prevent overflow
//! - Carry timestamps as plain integers supplied by the caller — the CORE
//!   never reads the wall clock

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::primitives;

// =============================================================================
// FIXED-POINT SCALARS
// =============================================================================

/// US dollar amount in cents.
///
/// All monetary values are fixed-point: $2342.50 is `UsdCents(234_250)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct UsdCents(pub u64);

impl UsdCents {
    /// Create a new amount from raw cents.
    #[must_use]
    pub const fn new(cents: u64) -> Self {
        Self(cents)
    }

    /// Get the raw cent value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for UsdCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Mass of physical metal in milligrams.
///
/// 156.750 g is `Milligrams(156_750)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Milligrams(pub u64);

impl Milligrams {
    /// Create a new mass from raw milligrams.
    #[must_use]
    pub const fn new(mg: u64) -> Self {
        Self(mg)
    }

    /// Get the raw milligram value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Milligrams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03} g", self.0 / 1000, self.0 % 1000)
    }
}

/// APXI token amount in hundredths of a token.
///
/// 1250.00 APXI is `TokenHundredths(125_000)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct TokenHundredths(pub u64);

impl TokenHundredths {
    /// Create a new token amount from raw hundredths.
    #[must_use]
    pub const fn new(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Get the raw hundredth value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenHundredths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} APXI", self.0 / 100, self.0 % 100)
    }
}

/// Seconds since the Unix epoch, supplied by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct UnixSeconds(pub u64);

impl UnixSeconds {
    /// Create a timestamp from raw seconds.
    #[must_use]
    pub const fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the raw second value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Whole seconds elapsed between `self` and a later instant.
    ///
    /// Saturates to zero if `later` precedes `self` (clock skew).
    #[must_use]
    pub const fn elapsed_until(self, later: UnixSeconds) -> u64 {
        later.0.saturating_sub(self.0)
    }
}

// =============================================================================
// METAL IDENTITY
// =============================================================================

/// The three metals backing the APXI token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalKind {
    Gold,
    Silver,
    Platinum,
}

impl MetalKind {
    /// All metals, in display order.
    pub const ALL: [MetalKind; 3] = [MetalKind::Gold, MetalKind::Silver, MetalKind::Platinum];

    /// Get the metal name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            MetalKind::Gold => "gold",
            MetalKind::Silver => "silver",
            MetalKind::Platinum => "platinum",
        }
    }
}

impl fmt::Display for MetalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() honors width flags so tables line up.
        f.pad(self.name())
    }
}

impl FromStr for MetalKind {
    type Err = ApaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gold" | "au" => Ok(MetalKind::Gold),
            "silver" | "ag" => Ok(MetalKind::Silver),
            "platinum" | "pt" => Ok(MetalKind::Platinum),
            other => Err(ApaxError::UnknownMetal(other.to_string())),
        }
    }
}

// =============================================================================
// PRICE SLICE
// =============================================================================

/// Spot prices per gram for the three backing metals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetalPrices {
    pub gold: UsdCents,
    pub silver: UsdCents,
    pub platinum: UsdCents,
    /// When these prices were last refreshed (caller-supplied).
    pub last_updated: UnixSeconds,
}

impl MetalPrices {
    /// Seed prices from the reference dashboard.
    #[must_use]
    pub const fn seed(now: UnixSeconds) -> Self {
        Self {
            gold: UsdCents::new(primitives::SEED_GOLD_PRICE_CENTS),
            silver: UsdCents::new(primitives::SEED_SILVER_PRICE_CENTS),
            platinum: UsdCents::new(primitives::SEED_PLATINUM_PRICE_CENTS),
            last_updated: now,
        }
    }

    /// Price for a specific metal.
    #[must_use]
    pub const fn price_of(&self, metal: MetalKind) -> UsdCents {
        match metal {
            MetalKind::Gold => self.gold,
            MetalKind::Silver => self.silver,
            MetalKind::Platinum => self.platinum,
        }
    }
}

// =============================================================================
// HOLDINGS SLICE
// =============================================================================

/// A user's bullion and token balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHoldings {
    pub gold: Milligrams,
    pub silver: Milligrams,
    pub platinum: Milligrams,
    pub tokens: TokenHundredths,
}

impl UserHoldings {
    /// Seed holdings from the reference dashboard.
    #[must_use]
    pub const fn seed() -> Self {
        Self {
            gold: Milligrams::new(primitives::SEED_HOLDING_GOLD_MG),
            silver: Milligrams::new(primitives::SEED_HOLDING_SILVER_MG),
            platinum: Milligrams::new(primitives::SEED_HOLDING_PLATINUM_MG),
            tokens: TokenHundredths::new(primitives::SEED_HOLDING_TOKENS_HUNDREDTHS),
        }
    }

    /// Mass held of a specific metal.
    #[must_use]
    pub const fn mass_of(&self, metal: MetalKind) -> Milligrams {
        match metal {
            MetalKind::Gold => self.gold,
            MetalKind::Silver => self.silver,
            MetalKind::Platinum => self.platinum,
        }
    }
}

// =============================================================================
// VAULT SLICE
// =============================================================================

/// Verification status of the vault inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VaultStatus {
    Verified,
    Pending,
    Syncing,
}

impl fmt::Display for VaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VaultStatus::Verified => "verified",
            VaultStatus::Pending => "pending",
            VaultStatus::Syncing => "syncing",
        };
        f.pad(s)
    }
}

/// Aggregate vault inventory backing the token supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultData {
    pub total_gold: Milligrams,
    pub total_silver: Milligrams,
    pub total_platinum: Milligrams,
    pub tokens_minted: TokenHundredths,
    pub last_audit: UnixSeconds,
    pub status: VaultStatus,
}

impl VaultData {
    /// Seed vault totals from the reference dashboard.
    #[must_use]
    pub const fn seed(now: UnixSeconds) -> Self {
        Self {
            total_gold: Milligrams::new(primitives::SEED_VAULT_GOLD_MG),
            total_silver: Milligrams::new(primitives::SEED_VAULT_SILVER_MG),
            total_platinum: Milligrams::new(primitives::SEED_VAULT_PLATINUM_MG),
            tokens_minted: TokenHundredths::new(primitives::SEED_TOKENS_MINTED_HUNDREDTHS),
            last_audit: now,
            status: VaultStatus::Verified,
        }
    }

    /// Total metal mass across all three vaults.
    #[must_use]
    pub const fn total_metal(&self) -> Milligrams {
        self.total_gold
            .saturating_add(self.total_silver)
            .saturating_add(self.total_platinum)
    }
}

// =============================================================================
// UI SELECTION
// =============================================================================

/// The dashboard view currently selected in the navigation shell.
///
/// This is the only field that survives a session (persisted through
/// [`crate::formats`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveView {
    #[default]
    Dashboard,
    ProofOfReserve,
    Zakat,
    Redemption,
    Sharia,
}

impl ActiveView {
    /// Stable string form, used for persistence display and CLI parsing.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveView::Dashboard => "dashboard",
            ActiveView::ProofOfReserve => "por",
            ActiveView::Zakat => "zakat",
            ActiveView::Redemption => "redemption",
            ActiveView::Sharia => "sharia",
        }
    }
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ActiveView {
    type Err = ApaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dashboard" => Ok(ActiveView::Dashboard),
            "por" | "proof-of-reserve" => Ok(ActiveView::ProofOfReserve),
            "zakat" => Ok(ActiveView::Zakat),
            "redemption" => Ok(ActiveView::Redemption),
            "sharia" => Ok(ActiveView::Sharia),
            other => Err(ApaxError::UnknownView(other.to_string())),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the APAX system.
///
/// - No silent failures
/// - Use `Result<T, ApaxError>` for fallible operations
/// - The CORE should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum ApaxError {
    /// The requested dashboard view name is not recognized.
    #[error("Unknown view: {0}")]
    UnknownView(String),

    /// The requested metal name is not recognized.
    #[error("Unknown metal: {0}")]
    UnknownMetal(String),

    /// The requested verification stage name is not recognized.
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_display_pads_fraction() {
        assert_eq!(UsdCents::new(234_250).to_string(), "$2342.50");
        assert_eq!(UsdCents::new(2_785).to_string(), "$27.85");
        assert_eq!(UsdCents::new(5).to_string(), "$0.05");
    }

    #[test]
    fn milligrams_display_pads_fraction() {
        assert_eq!(Milligrams::new(156_750).to_string(), "156.750 g");
        assert_eq!(Milligrams::new(45_200).to_string(), "45.200 g");
        assert_eq!(Milligrams::new(7).to_string(), "0.007 g");
    }

    #[test]
    fn vault_total_metal_sums_all_three() {
        let vault = VaultData::seed(UnixSeconds::new(0));
        assert_eq!(
            vault.total_metal(),
            Milligrams::new(15_678_500 + 89_240_750 + 4_520_250)
        );
    }

    #[test]
    fn elapsed_saturates_on_clock_skew() {
        let earlier = UnixSeconds::new(100);
        let later = UnixSeconds::new(40);
        assert_eq!(earlier.elapsed_until(later), 0);
    }

    #[test]
    fn active_view_string_roundtrip() {
        for view in [
            ActiveView::Dashboard,
            ActiveView::ProofOfReserve,
            ActiveView::Zakat,
            ActiveView::Redemption,
            ActiveView::Sharia,
        ] {
            let parsed: ActiveView = view.as_str().parse().expect("parse");
            assert_eq!(parsed, view);
        }
    }

    #[test]
    fn unknown_view_rejected() {
        let result: Result<ActiveView, _> = "settings".parse();
        assert!(result.is_err());
    }

    #[test]
    fn metal_parse_accepts_symbols() {
        assert_eq!("au".parse::<MetalKind>().expect("parse"), MetalKind::Gold);
        assert_eq!("AG".parse::<MetalKind>().expect("parse"), MetalKind::Silver);
        assert_eq!(
            "Platinum".parse::<MetalKind>().expect("parse"),
            MetalKind::Platinum
        );
    }
}

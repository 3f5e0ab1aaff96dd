//! # Proof of Reserve
//!
//! Arithmetic behind the proof-of-reserve view: vault metal mass versus
//! minted token supply, expressed as a reserve ratio in basis points.
//!
//! The reference display is `total grams / tokens minted × 100 %`. With
//! mass in milligrams and tokens in hundredths, the exact integer form is
//! `mg × 1000 / token-hundredths` basis points.

use serde::{Deserialize, Serialize};

use crate::primitives::FULL_BACKING_BPS;
use crate::types::{Milligrams, TokenHundredths, VaultData, VaultStatus};

// =============================================================================
// RESERVE REPORT
// =============================================================================

/// Snapshot of reserve coverage for one vault state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveReport {
    /// Total metal mass across all vaults.
    pub total_metal: Milligrams,
    /// Token supply the metal backs.
    pub tokens_minted: TokenHundredths,
    /// Reserve ratio in basis points (10000 = one gram per token).
    pub ratio_bps: u64,
    /// Stored verification status carried through from the vault slice.
    pub status: VaultStatus,
}

impl ReserveReport {
    /// Whether the supply is fully backed at the assessor's threshold is
    /// decided by [`ReserveAssessor`]; this is the ratio in whole percent
    /// for display ("125.43%" renders from 12543 bps).
    #[must_use]
    pub const fn ratio_whole_percent(&self) -> u64 {
        self.ratio_bps / 100
    }

    /// Fractional percent digits for display, always two.
    #[must_use]
    pub const fn ratio_percent_fraction(&self) -> u64 {
        self.ratio_bps % 100
    }
}

// =============================================================================
// RESERVE ASSESSOR
// =============================================================================

/// Pure assessor mapping vault state to a reserve report.
pub struct ReserveAssessor {
    full_backing_bps: u64,
}

impl Default for ReserveAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReserveAssessor {
    /// Create an assessor with the default full-backing threshold.
    #[must_use]
    pub fn new() -> Self {
        Self {
            full_backing_bps: FULL_BACKING_BPS,
        }
    }

    /// Create an assessor with a custom full-backing threshold.
    #[must_use]
    pub fn with_threshold(full_backing_bps: u64) -> Self {
        Self { full_backing_bps }
    }

    /// Assess reserve coverage for a vault state.
    #[must_use]
    pub fn assess(&self, vault: &VaultData) -> ReserveReport {
        let total_metal = vault.total_metal();
        ReserveReport {
            total_metal,
            tokens_minted: vault.tokens_minted,
            ratio_bps: Self::ratio_bps(total_metal, vault.tokens_minted),
            status: vault.status,
        }
    }

    /// Whether a report clears this assessor's full-backing bar.
    #[must_use]
    pub fn is_fully_backed(&self, report: &ReserveReport) -> bool {
        report.ratio_bps >= self.full_backing_bps
    }

    /// `mg × 1000 / token-hundredths`, widened through u128.
    ///
    /// A zero token supply reports zero coverage rather than dividing.
    fn ratio_bps(total_metal: Milligrams, tokens: TokenHundredths) -> u64 {
        if tokens.value() == 0 {
            return 0;
        }
        let bps = u128::from(total_metal.value()) * 1000 / u128::from(tokens.value());
        u64::try_from(bps).unwrap_or(u64::MAX)
    }
}

// =============================================================================
// TESTS
// =============================================================================

//! # Mock Price History
//!
//! Generates the intraday series behind the price chart. The series is a
//! pure function of the current spot price: seven fixed sample times, each
//! scaled by a fixed per-mille factor, ending exactly at the input price.
//!
//! No randomness, no feed — this is presentation data for a mock platform.

use serde::{Deserialize, Serialize};

use crate::types::UsdCents;

/// Fixed sample times and per-mille scale factors for the intraday series.
///
/// Mirrors the reference chart: the day drifts below spot in the morning
/// and overshoots slightly in the late afternoon.
pub const HISTORY_SAMPLES: [(&str, u64); 7] = [
    ("08:00", 982),
    ("10:00", 988),
    ("12:00", 995),
    ("14:00", 991),
    ("16:00", 1008),
    ("18:00", 1003),
    ("20:00", 1000),
];

/// One point of the intraday series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample time label (UTC, "HH:MM").
    pub time: &'static str,
    pub price: UsdCents,
}

/// Build the intraday series for a given spot price.
///
/// The final point equals `current` exactly (factor 1000‰); intermediate
/// points are `current × factor / 1000` with the product widened through
/// u128 so no price can overflow.
#[must_use]
pub fn price_history(current: UsdCents) -> Vec<PricePoint> {
    HISTORY_SAMPLES
        .iter()
        .map(|&(time, per_mille)| {
            let scaled = u128::from(current.value()) * u128::from(per_mille) / 1000;
            PricePoint {
                time,
                price: UsdCents::new(u64::try_from(scaled).unwrap_or(u64::MAX)),
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

//! # App Configuration
//!
//! Optional `apax.toml` overrides for the seeded mock state and the
//! sequencer cadence. The config is an explicitly-owned struct handed to
//! whoever builds the store — there is no ambient global configuration.
//!
//! Every field is optional; an absent file yields the core seed values.

use serde::Deserialize;
use std::path::Path;

use apax_core::primitives::TICK_INTERVAL_MS;
use apax_core::{
    ApaxError, Milligrams, Store, TokenHundredths, UnixSeconds, UsdCents, VaultStatus,
};

// =============================================================================
// CONFIG STRUCTURE
// =============================================================================

/// Spot price overrides, in cents per gram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PriceOverrides {
    pub gold_cents: Option<u64>,
    pub silver_cents: Option<u64>,
    pub platinum_cents: Option<u64>,
}

/// User holding overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HoldingOverrides {
    pub gold_mg: Option<u64>,
    pub silver_mg: Option<u64>,
    pub platinum_mg: Option<u64>,
    pub tokens_hundredths: Option<u64>,
}

/// Vault inventory overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct VaultOverrides {
    pub gold_mg: Option<u64>,
    pub silver_mg: Option<u64>,
    pub platinum_mg: Option<u64>,
    pub tokens_minted_hundredths: Option<u64>,
    pub status: Option<VaultStatus>,
}

/// Full application configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AppConfig {
    /// Sequencer cadence override, in milliseconds.
    pub interval_ms: Option<u64>,
    #[serde(default)]
    pub prices: PriceOverrides,
    #[serde(default)]
    pub holdings: HoldingOverrides,
    #[serde(default)]
    pub vault: VaultOverrides,
}

impl AppConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ApaxError> {
        toml::from_str(text).map_err(|e| ApaxError::DeserializationError(e.to_string()))
    }

    /// Load a config file, or the defaults when `path` is `None`.
    ///
    /// A named-but-missing file is an error; silently ignoring an explicit
    /// `--config` would hide typos.
    pub fn load(path: Option<&Path>) -> Result<Self, ApaxError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| {
            ApaxError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Effective sequencer cadence.
    #[must_use]
    pub fn effective_interval_ms(&self) -> u64 {
        self.interval_ms.unwrap_or(TICK_INTERVAL_MS)
    }

    /// Build a store from the seed state with overrides applied.
    #[must_use]
    pub fn seed_store(&self, now: UnixSeconds) -> Store {
        let mut store = Store::seed(now);

        let mut prices = *store.prices();
        if let Some(cents) = self.prices.gold_cents {
            prices.gold = UsdCents::new(cents);
        }
        if let Some(cents) = self.prices.silver_cents {
            prices.silver = UsdCents::new(cents);
        }
        if let Some(cents) = self.prices.platinum_cents {
            prices.platinum = UsdCents::new(cents);
        }
        store.set_prices(prices);

        let mut holdings = *store.holdings();
        if let Some(mg) = self.holdings.gold_mg {
            holdings.gold = Milligrams::new(mg);
        }
        if let Some(mg) = self.holdings.silver_mg {
            holdings.silver = Milligrams::new(mg);
        }
        if let Some(mg) = self.holdings.platinum_mg {
            holdings.platinum = Milligrams::new(mg);
        }
        if let Some(h) = self.holdings.tokens_hundredths {
            holdings.tokens = TokenHundredths::new(h);
        }
        store.set_holdings(holdings);

        let mut vault = *store.vault();
        if let Some(mg) = self.vault.gold_mg {
            vault.total_gold = Milligrams::new(mg);
        }
        if let Some(mg) = self.vault.silver_mg {
            vault.total_silver = Milligrams::new(mg);
        }
        if let Some(mg) = self.vault.platinum_mg {
            vault.total_platinum = Milligrams::new(mg);
        }
        if let Some(h) = self.vault.tokens_minted_hundredths {
            vault.tokens_minted = TokenHundredths::new(h);
        }
        if let Some(status) = self.vault.status {
            vault.status = status;
        }
        store.set_vault(vault);

        store
    }
}

// =============================================================================
// TESTS
// =============================================================================

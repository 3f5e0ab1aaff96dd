//! # Dashboard Store
//!
//! The single owned container for all dashboard state: spot prices, user
//! holdings, vault totals, the audit trail, and the active view selection.
//!
//! The reference behavior kept this as ambient global state with bare
//! setters. Here it is an explicitly-owned struct passed to whoever needs
//! it — no statics, no aliasing. Every field is plain data; the only
//! invariant-bearing state in the system lives in [`crate::Sequencer`].
//!
//! Only `active_view` survives a session (see [`crate::formats`]); the rest
//! is volatile mock state reseeded on startup.

use crate::audit::AuditTrail;
use crate::types::{
    ActiveView, MetalKind, MetalPrices, Milligrams, TokenHundredths, UnixSeconds, UsdCents,
    UserHoldings, VaultData,
};

/// All dashboard state, explicitly owned.
#[derive(Debug, Clone)]
pub struct Store {
    prices: MetalPrices,
    holdings: UserHoldings,
    vault: VaultData,
    audit: AuditTrail,
    active_view: ActiveView,
}

impl Store {
    /// Create a store seeded with the reference dashboard's mock state.
    ///
    /// `now` stamps the seed prices and vault audit date.
    #[must_use]
    pub fn seed(now: UnixSeconds) -> Self {
        Self {
            prices: MetalPrices::seed(now),
            holdings: UserHoldings::seed(),
            vault: VaultData::seed(now),
            audit: AuditTrail::new(),
            active_view: ActiveView::default(),
        }
    }

    // =========================================================================
    // SLICE ACCESS
    // =========================================================================

    /// Current spot prices.
    #[must_use]
    pub fn prices(&self) -> &MetalPrices {
        &self.prices
    }

    /// Replace the spot prices wholesale.
    pub fn set_prices(&mut self, prices: MetalPrices) {
        self.prices = prices;
    }

    /// Current user holdings.
    #[must_use]
    pub fn holdings(&self) -> &UserHoldings {
        &self.holdings
    }

    /// Replace the user holdings wholesale.
    pub fn set_holdings(&mut self, holdings: UserHoldings) {
        self.holdings = holdings;
    }

    /// Current vault data.
    #[must_use]
    pub fn vault(&self) -> &VaultData {
        &self.vault
    }

    /// Replace the vault data wholesale.
    pub fn set_vault(&mut self, vault: VaultData) {
        self.vault = vault;
    }

    /// The audit trail.
    #[must_use]
    pub fn audit(&self) -> &AuditTrail {
        &self.audit
    }

    /// Mutable access to the audit trail.
    pub fn audit_mut(&mut self) -> &mut AuditTrail {
        &mut self.audit
    }

    /// The currently selected dashboard view.
    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    /// Select a dashboard view.
    pub fn set_active_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    // =========================================================================
    // DERIVED VALUES
    // =========================================================================

    /// Market value of the user's holdings in one metal: mass × spot price.
    #[must_use]
    pub fn holding_value(&self, metal: MetalKind) -> UsdCents {
        Self::metal_value(self.holdings.mass_of(metal), self.prices.price_of(metal))
    }

    /// Market value of the user's full bullion position (tokens excluded).
    #[must_use]
    pub fn total_holding_value(&self) -> UsdCents {
        MetalKind::ALL
            .iter()
            .fold(UsdCents::default(), |total, &metal| {
                total.saturating_add(self.holding_value(metal))
            })
    }

    /// Total metal mass backing the token supply.
    #[must_use]
    pub fn vault_total_metal(&self) -> Milligrams {
        self.vault.total_metal()
    }

    /// Token supply currently minted.
    #[must_use]
    pub fn tokens_minted(&self) -> TokenHundredths {
        self.vault.tokens_minted
    }

    /// `mg × cents-per-gram`, widened through u128 so large vault masses
    /// cannot overflow the intermediate product.
    fn metal_value(mass: Milligrams, price_per_gram: UsdCents) -> UsdCents {
        let product = u128::from(mass.value()) * u128::from(price_per_gram.value()) / 1000;
        UsdCents::new(u64::try_from(product).unwrap_or(u64::MAX))
    }
}

// =============================================================================
// TESTS
// =============================================================================

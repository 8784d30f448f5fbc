//! Market catalog — the four investment channels.
//!
//! A market's `current_return` is derived state: it must equal
//! `base_return.max + modifiers[current_cycle]` at all times. Only the
//! cycle machine recomputes it; everything else reads it or receives it
//! as a parameter.

use crate::config::MarketConfig;
use crate::cycle::EconomicCycle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The four investment channels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum MarketKey {
    Stocks,
    RealEstate,
    Crypto,
    Business,
}

impl MarketKey {
    pub const ALL: [MarketKey; 4] = [
        MarketKey::Stocks,
        MarketKey::RealEstate,
        MarketKey::Crypto,
        MarketKey::Business,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::RealEstate => "realEstate",
            Self::Crypto => "crypto",
            Self::Business => "business",
        }
    }
}

impl fmt::Display for MarketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Percentage bounds on a market's base return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRange {
    pub min: f64,
    pub max: f64,
}

/// One investment channel with its cycle-derived return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub key: MarketKey,
    pub label: String,
    pub base_return: ReturnRange,
    /// Signed percentage delta applied on top of `base_return.max` per cycle.
    pub modifiers: BTreeMap<EconomicCycle, f64>,
    /// Recomputed on every cycle change; never read stale.
    pub current_return: f64,
    /// Display-only label; no numeric effect on calculations.
    pub risk: String,
    /// Display-only label; no numeric effect on calculations.
    pub sensitivity: String,
    pub requires_startup_cost: bool,
}

impl Market {
    pub fn from_config(config: &MarketConfig, cycle: EconomicCycle) -> Self {
        let mut market = Self {
            key: config.key,
            label: config.label.clone(),
            base_return: config.base_return,
            modifiers: config.modifiers.clone(),
            current_return: 0.0,
            risk: config.risk.clone(),
            sensitivity: config.sensitivity.clone(),
            requires_startup_cost: config.requires_startup_cost,
        };
        market.recompute_return(cycle);
        market
    }

    /// The signed percentage delta this market takes under `cycle`.
    pub fn modifier_for(&self, cycle: EconomicCycle) -> f64 {
        self.modifiers.get(&cycle).copied().unwrap_or(0.0)
    }

    pub(crate) fn recompute_return(&mut self, cycle: EconomicCycle) {
        self.current_return = self.base_return.max + self.modifier_for(cycle);
    }
}

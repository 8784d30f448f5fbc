//! Game configuration — the market catalog.
//!
//! The canonical four markets ship compiled in (`GameConfig::builtin`);
//! a JSON catalog in a data directory can override them for balancing
//! experiments (`GameConfig::load`).

use crate::cycle::EconomicCycle;
use crate::market::{MarketKey, ReturnRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static description of one investment channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub key: MarketKey,
    pub label: String,
    pub base_return: ReturnRange,
    /// Signed percentage delta per cycle, applied on top of `base_return.max`.
    pub modifiers: BTreeMap<EconomicCycle, f64>,
    pub risk: String,
    pub sensitivity: String,
    #[serde(default)]
    pub requires_startup_cost: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct MarketCatalogFile {
    markets: Vec<MarketConfig>,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub markets: BTreeMap<MarketKey, MarketConfig>,
}

impl GameConfig {
    /// Load a market catalog from the data/ directory.
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/markets/market_catalog.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: MarketCatalogFile = serde_json::from_str(&content)?;
        let markets = file.markets.into_iter().map(|m| (m.key, m)).collect();
        Ok(Self { markets })
    }

    /// The canonical catalog the game ships with.
    pub fn builtin() -> Self {
        let markets = [
            MarketConfig {
                key: MarketKey::Stocks,
                label: "Stock Market".into(),
                base_return: ReturnRange { min: 4.0, max: 8.0 },
                modifiers: [
                    (EconomicCycle::Boom, 7.0),
                    (EconomicCycle::Stable, 0.0),
                    (EconomicCycle::Downturn, -14.0),
                    (EconomicCycle::Crisis, -23.0),
                ]
                .into(),
                risk: "medium".into(),
                sensitivity: "high".into(),
                requires_startup_cost: false,
            },
            MarketConfig {
                key: MarketKey::RealEstate,
                label: "Real Estate".into(),
                base_return: ReturnRange { min: 3.0, max: 6.0 },
                modifiers: [
                    (EconomicCycle::Boom, 6.0),
                    (EconomicCycle::Stable, 1.0),
                    (EconomicCycle::Downturn, -9.0),
                    (EconomicCycle::Crisis, -16.0),
                ]
                .into(),
                risk: "low".into(),
                sensitivity: "medium".into(),
                requires_startup_cost: false,
            },
            MarketConfig {
                key: MarketKey::Crypto,
                label: "Crypto Exchange".into(),
                base_return: ReturnRange { min: 6.0, max: 15.0 },
                modifiers: [
                    (EconomicCycle::Boom, 25.0),
                    (EconomicCycle::Stable, -3.0),
                    (EconomicCycle::Downturn, -27.0),
                    (EconomicCycle::Crisis, -45.0),
                ]
                .into(),
                risk: "high".into(),
                sensitivity: "extreme".into(),
                requires_startup_cost: false,
            },
            MarketConfig {
                key: MarketKey::Business,
                label: "Private Business".into(),
                base_return: ReturnRange { min: 5.0, max: 10.0 },
                modifiers: [
                    (EconomicCycle::Boom, 10.0),
                    (EconomicCycle::Stable, 2.0),
                    (EconomicCycle::Downturn, -8.0),
                    (EconomicCycle::Crisis, -18.0),
                ]
                .into(),
                risk: "medium".into(),
                sensitivity: "low".into(),
                requires_startup_cost: true,
            },
        ]
        .into_iter()
        .map(|m| (m.key, m))
        .collect();

        Self { markets }
    }
}

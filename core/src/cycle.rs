//! Economic cycle state machine.
//!
//! RULE: the machine owns the single current cycle and every market's
//! derived return. All mutation goes through `set_cycle` and
//! `generate_random_event`; calculators read derived values passed to
//! them as parameters and never reach into this state.

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::market::{Market, MarketKey};
use crate::rng::GameRng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Discrete macroeconomic regime affecting all markets' returns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EconomicCycle {
    Boom,
    Stable,
    Downturn,
    Crisis,
}

/// Fixed draw weights for `generate_random_event`.
/// Order matters for the cumulative scan; weights sum to 1.0.
pub const CYCLE_WEIGHTS: [(EconomicCycle, f64); 4] = [
    (EconomicCycle::Boom, 0.20),
    (EconomicCycle::Stable, 0.40),
    (EconomicCycle::Downturn, 0.30),
    (EconomicCycle::Crisis, 0.10),
];

impl EconomicCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boom => "boom",
            Self::Stable => "stable",
            Self::Downturn => "downturn",
            Self::Crisis => "crisis",
        }
    }

    /// Map one uniform roll in [0, 1) to a cycle: the first cycle whose
    /// cumulative weight meets or exceeds the roll wins. Bands:
    /// [0, 0.20] boom, (0.20, 0.60] stable, (0.60, 0.90] downturn,
    /// above that crisis.
    pub fn sample(roll: f64) -> EconomicCycle {
        let mut cumulative = 0.0;
        for (cycle, weight) in CYCLE_WEIGHTS {
            cumulative += weight;
            if cumulative >= roll {
                return cycle;
            }
        }
        // Rolls at the very top of the range land past the last
        // cumulative boundary due to float addition.
        EconomicCycle::Crisis
    }
}

impl fmt::Display for EconomicCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EconomicCycle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boom" => Ok(Self::Boom),
            "stable" => Ok(Self::Stable),
            "downturn" => Ok(Self::Downturn),
            "crisis" => Ok(Self::Crisis),
            other => Err(EngineError::InvalidCycle {
                name: other.to_string(),
            }),
        }
    }
}

/// Session-scoped economy state: the active cycle plus every market's
/// cycle-derived return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomyState {
    pub current_cycle: EconomicCycle,
    pub last_update:   DateTime<Utc>,
    pub markets:       BTreeMap<MarketKey, Market>,
}

pub struct CycleMachine {
    pub state: EconomyState,
    auto_simulation: bool,
}

impl CycleMachine {
    /// Fresh machine at the initial `stable` cycle, with every market's
    /// return already derived from it.
    pub fn new(config: &GameConfig) -> Self {
        let initial = EconomicCycle::Stable;
        let markets = config
            .markets
            .values()
            .map(|m| (m.key, Market::from_config(m, initial)))
            .collect();
        Self {
            state: EconomyState {
                current_cycle: initial,
                last_update: Utc::now(),
                markets,
            },
            auto_simulation: false,
        }
    }

    /// Set the active cycle and recompute every market's return before
    /// returning. No reader can observe a partially updated catalog:
    /// the recomputation covers all markets in this single call.
    pub fn set_cycle(&mut self, cycle: EconomicCycle) {
        self.state.current_cycle = cycle;
        self.state.last_update = Utc::now();
        for market in self.state.markets.values_mut() {
            market.recompute_return(cycle);
        }
        log::debug!(
            "cycle set to {cycle}; {} market returns recomputed",
            self.state.markets.len()
        );
    }

    /// Draw the next cycle from the fixed weights using the injected
    /// RNG, apply it, and return it.
    pub fn generate_random_event(&mut self, rng: &mut GameRng) -> EconomicCycle {
        let cycle = EconomicCycle::sample(rng.next_f64());
        self.set_cycle(cycle);
        cycle
    }

    /// Flip the auto-simulation flag. Returns the new value. While on,
    /// the engine fires `generate_random_event` every seven days; the
    /// scheduling lives in the engine's day loop, not here.
    pub fn toggle_auto_simulation(&mut self) -> bool {
        self.auto_simulation = !self.auto_simulation;
        self.auto_simulation
    }

    pub fn auto_simulation(&self) -> bool {
        self.auto_simulation
    }

    pub fn market(&self, key: MarketKey) -> Option<&Market> {
        self.state.markets.get(&key)
    }

    /// The signed percentage status of a market under the active cycle —
    /// what callers pass to `potential_return`.
    pub fn market_status(&self, key: MarketKey) -> Option<f64> {
        self.market(key).map(|m| m.current_return)
    }

    /// All (market, current_return) pairs in stable key order.
    pub fn market_returns(&self) -> Vec<(MarketKey, f64)> {
        self.state
            .markets
            .iter()
            .map(|(key, market)| (*key, market.current_return))
            .collect()
    }
}

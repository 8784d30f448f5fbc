//! Weekly economy snapshots.
//!
//! One snapshot per completed week boundary: the active cycle and every
//! market's derived return, serialized to JSON for the persistence
//! collaborator.

use crate::cycle::EconomicCycle;
use crate::market::MarketKey;
use crate::types::{RunId, Week};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomySnapshot {
    pub run_id: RunId,
    pub week: Week,
    pub cycle: EconomicCycle,
    pub returns: Vec<(MarketKey, f64)>,
}

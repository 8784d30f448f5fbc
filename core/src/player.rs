//! Player record — the fields the rules core reads.
//!
//! The roster comes from the persistence collaborator; the core never
//! debits `soldiers` itself. Validation reads the count, execution-time
//! debiting belongs to the storage layer after validation succeeds.

use crate::combat::DefenseLabel;
use crate::market::MarketKey;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Deployable resource pool.
    pub soldiers: u32,
    pub defense: DefenseLabel,
    /// Percentage allocation breakdown. Display only.
    #[serde(default)]
    pub investments: BTreeMap<MarketKey, f64>,
}

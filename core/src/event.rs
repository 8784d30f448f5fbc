//! Event log — every observable state change the engine records.
//!
//! Variants are added as the game grows — never removed or reordered.

use crate::cycle::EconomicCycle;
use crate::market::MarketKey;
use crate::types::{Day, PlayerId, RunId, Week};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ── Engine events ──────────────────────────────
    RunInitialized {
        run_id: RunId,
        seed: u64,
    },
    WeekCompleted {
        week: Week,
    },

    // ── Economy events ─────────────────────────────
    CycleChanged {
        day: Day,
        cycle: EconomicCycle,
        /// (market, current_return) pairs after the recompute, in
        /// stable key order.
        returns: Vec<(MarketKey, f64)>,
        /// True when the change came from the weighted random draw.
        random: bool,
    },
    AutoSimulationToggled {
        day: Day,
        enabled: bool,
    },

    // ── Weekly move events ─────────────────────────
    ActionSubmitted {
        week: Week,
        player_id: PlayerId,
        move_kind: String,
    },
    ActionReplaced {
        week: Week,
        player_id: PlayerId,
        move_kind: String,
    },
    ActionRejected {
        week: Week,
        player_id: PlayerId,
        reason: String,
    },
}

/// Extract a stable string name from a GameEvent variant.
/// Used for the event_type column in event_log.
pub fn event_type_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::RunInitialized { .. } => "run_initialized",
        GameEvent::WeekCompleted { .. } => "week_completed",
        GameEvent::CycleChanged { .. } => "cycle_changed",
        GameEvent::AutoSimulationToggled { .. } => "auto_simulation_toggled",
        GameEvent::ActionSubmitted { .. } => "action_submitted",
        GameEvent::ActionReplaced { .. } => "action_replaced",
        GameEvent::ActionRejected { .. } => "action_rejected",
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Option<i64>,
    pub run_id: RunId,
    pub day: Day,
    pub event_type: String,
    pub payload: String, // JSON-serialized GameEvent
}

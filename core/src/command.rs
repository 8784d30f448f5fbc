//! Commands accepted by the engine — the rules core's entire external
//! surface besides the pure calculators.

use crate::action::ActionDraft;
use crate::types::{PlayerId, Week};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Clock control ─────────────────────────────
    Pause,
    Resume,

    // ── Economy control (admin) ───────────────────
    /// Explicit cycle selection. The name is parsed at this boundary;
    /// an unknown name fails without touching economy state.
    SetCycle { cycle: String },
    TriggerRandomEvent,
    ToggleAutoSimulation,

    // ── Weekly moves ──────────────────────────────
    SubmitActions {
        player_id: PlayerId,
        draft: ActionDraft,
    },
    /// Replace a previously submitted bundle. Only the current week is
    /// open; editing a closed week fails and leaves the record intact.
    EditMoves {
        player_id: PlayerId,
        week: Week,
        draft: ActionDraft,
    },
}

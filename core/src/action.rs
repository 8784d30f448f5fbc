//! Weekly action validation and normalization.
//!
//! A draft arrives straight from client selections with any combination
//! of branches filled in or half-filled. `validate` is the only way to
//! turn it into a `ValidatedAction`; on failure the draft is untouched
//! so the player can correct and retry, and no resource balance moves.

use crate::error::ActionError;
use crate::market::MarketKey;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Soldiers required before an attack can be launched.
pub const MIN_ATTACK_SOLDIERS: u32 = 25;
/// Soldiers required before a spy can be deployed.
pub const MIN_SPY_SOLDIERS: u32 = 10;
/// Smallest deployment a market accepts.
pub const MIN_DEPLOYMENT: u32 = 10;
/// Substituted when an offensive draft names a target id but no
/// display name.
pub const UNKNOWN_COMMANDER: &str = "Unknown Commander";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentKind {
    Invest,
    Diversify,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffensiveKind {
    Attack,
    Manipulate,
    Spy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveKind {
    Defense,
    Insurance,
    Counter,
}

/// Raw investment selection as it arrives from the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestmentDraft {
    #[serde(default)]
    pub kind: Option<InvestmentKind>,
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub market: Option<MarketKey>,
}

/// Raw offensive selection. A `market` may ride along from the UI but
/// is dropped at normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffensiveDraft {
    #[serde(default)]
    pub kind: Option<OffensiveKind>,
    #[serde(default)]
    pub target_player: Option<PlayerId>,
    #[serde(default)]
    pub target_name: Option<String>,
    #[serde(default)]
    pub market: Option<MarketKey>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefensiveDraft {
    #[serde(default)]
    pub kind: Option<DefensiveKind>,
    #[serde(default)]
    pub market: Option<MarketKey>,
}

/// A player's in-progress weekly submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionDraft {
    #[serde(default)]
    pub investment: Option<InvestmentDraft>,
    #[serde(default)]
    pub offensive: Option<OffensiveDraft>,
    #[serde(default)]
    pub defensive: Option<DefensiveDraft>,
}

/// Canonical investment record: exactly `{kind, amount, market}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub kind: InvestmentKind,
    pub amount: u32,
    pub market: MarketKey,
}

/// Canonical offensive record: exactly `{kind, target_player, target_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offensive {
    pub kind: OffensiveKind,
    pub target_player: PlayerId,
    pub target_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defensive {
    pub kind: DefensiveKind,
    #[serde(default)]
    pub market: Option<MarketKey>,
}

/// The one active move of a validated bundle. Exactly one case exists;
/// the inactive sibling is unrepresentable rather than null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", rename_all = "snake_case")]
pub enum WeeklyMove {
    Investment(Investment),
    Offensive(Offensive),
}

impl WeeklyMove {
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Investment(_) => "investment",
            Self::Offensive(_) => "offensive",
        }
    }
}

/// A validated, normalized weekly action ready to be persisted as an
/// immutable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedAction {
    pub primary: WeeklyMove,
    #[serde(default)]
    pub defensive: Option<Defensive>,
}

impl ValidatedAction {
    /// The investment branch, or None when the move is offensive.
    pub fn investment(&self) -> Option<&Investment> {
        match &self.primary {
            WeeklyMove::Investment(investment) => Some(investment),
            WeeklyMove::Offensive(_) => None,
        }
    }

    /// The offensive branch, or None when the move is an investment.
    pub fn offensive(&self) -> Option<&Offensive> {
        match &self.primary {
            WeeklyMove::Offensive(offensive) => Some(offensive),
            WeeklyMove::Investment(_) => None,
        }
    }
}

/// Validate a draft against the acting player's soldier count.
///
/// Rules run in fixed precedence: empty bundle, then the investment
/// branch, then the offensive branch. When both branches are filled the
/// investment wins and the offensive is dropped from the normalized
/// result. Pure: same input, same output, nothing mutated.
pub fn validate(draft: &ActionDraft, soldiers: u32) -> Result<ValidatedAction, ActionError> {
    if draft.investment.is_none() && draft.offensive.is_none() {
        return Err(ActionError::MissingAction);
    }

    if let Some(investment) = &draft.investment {
        let amount = investment.amount.unwrap_or(0);
        if amount == 0 {
            return Err(ActionError::InvalidAmount);
        }
        if amount > soldiers {
            return Err(ActionError::InsufficientResources {
                requested: amount,
                available: soldiers,
            });
        }
        if amount < MIN_DEPLOYMENT {
            return Err(ActionError::BelowMinimumDeployment {
                min: MIN_DEPLOYMENT,
            });
        }
        let market = investment.market.ok_or(ActionError::MissingMarket)?;
        return Ok(ValidatedAction {
            primary: WeeklyMove::Investment(Investment {
                kind: investment.kind.unwrap_or(InvestmentKind::Invest),
                amount,
                market,
            }),
            defensive: normalize_defensive(draft.defensive.as_ref()),
        });
    }

    if let Some(offensive) = &draft.offensive {
        let kind = offensive.kind.ok_or(ActionError::MissingOperationType)?;
        let target_player = offensive
            .target_player
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or(ActionError::MissingTarget)?;
        let target_name = offensive
            .target_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_COMMANDER.to_string());

        match kind {
            OffensiveKind::Attack if soldiers < MIN_ATTACK_SOLDIERS => {
                return Err(ActionError::InsufficientForces {
                    required: MIN_ATTACK_SOLDIERS,
                    operation: "launch an attack",
                });
            }
            OffensiveKind::Spy if soldiers < MIN_SPY_SOLDIERS => {
                return Err(ActionError::InsufficientForces {
                    required: MIN_SPY_SOLDIERS,
                    operation: "deploy a spy",
                });
            }
            _ => {}
        }

        return Ok(ValidatedAction {
            primary: WeeklyMove::Offensive(Offensive {
                kind,
                target_player,
                target_name,
            }),
            defensive: normalize_defensive(draft.defensive.as_ref()),
        });
    }

    // Rule 1 guarantees one branch above resolves; kept as a defensive
    // catch-all for malformed bundles.
    Err(ActionError::InvalidStructure)
}

/// A defensive rider is optional and only kept when a type was chosen.
fn normalize_defensive(draft: Option<&DefensiveDraft>) -> Option<Defensive> {
    draft.and_then(|d| {
        d.kind.map(|kind| Defensive {
            kind,
            market: d.market,
        })
    })
}

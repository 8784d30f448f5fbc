//! Combat odds.
//!
//! Success chance comes from the attacker/defender strength ratio,
//! scaled by the defender's categorical defense rating and hard-capped
//! at 90 — an attack is never guaranteed. No floor is applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard ceiling on attack odds, in percent.
pub const SUCCESS_CHANCE_CAP: u32 = 90;

/// Categorical defense posture, each mapped to a fixed numeric rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefenseLabel {
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl DefenseLabel {
    /// Numeric multiplier used in the odds computation.
    pub fn rating(&self) -> f64 {
        match self {
            Self::Weak => 0.25,
            Self::Moderate => 0.5,
            Self::Strong => 0.75,
            Self::VeryStrong => 0.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for DefenseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage chance an attack succeeds:
/// `min(round(attacker / (defender * rating) * 100), 90)`.
#[must_use]
pub fn success_chance(
    attacker_soldiers: u32,
    defender_soldiers: u32,
    defense: DefenseLabel,
) -> u32 {
    let effective_defense = f64::from(defender_soldiers) * defense.rating();
    if effective_defense <= 0.0 {
        // An undefended target still cannot push odds past the ceiling.
        return SUCCESS_CHANCE_CAP;
    }
    let raw = (f64::from(attacker_soldiers) / effective_defense * 100.0).round();
    (raw as u32).min(SUCCESS_CHANCE_CAP)
}

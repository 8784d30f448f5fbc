use crate::types::Week;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown economic cycle '{name}'")]
    InvalidCycle { name: String },

    #[error("Week {week} is closed; moves can no longer be changed")]
    WeekClosed { week: Week },

    #[error("Moves for week {week} already submitted; use the edit-moves flow to change them")]
    AlreadySubmitted { week: Week },

    #[error("Player '{id}' not found")]
    UnknownPlayer { id: String },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Validation failures for a weekly action draft.
///
/// These are player-facing: the Display text is rendered verbatim by the
/// client, so callers show `err.to_string()` instead of catching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("select an investment or an operation before submitting")]
    MissingAction,

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("minimum deployment is {min} soldiers")]
    BelowMinimumDeployment { min: u32 },

    #[error("cannot deploy {requested} soldiers: only {available} available")]
    InsufficientResources { requested: u32, available: u32 },

    #[error("select a market for the investment")]
    MissingMarket,

    #[error("select an operation type")]
    MissingOperationType,

    #[error("select a target commander")]
    MissingTarget,

    #[error("need at least {required} soldiers to {operation}")]
    InsufficientForces { required: u32, operation: &'static str },

    #[error("action bundle is malformed")]
    InvalidStructure,
}

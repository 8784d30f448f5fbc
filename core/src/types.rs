//! Shared primitive types used across the rules core.

/// A simulated day. Seven days make one game week.
pub type Day = u64;

/// A game week number, derived from the day clock.
pub type Week = u64;

/// A stable, unique identifier for a player.
pub type PlayerId = String;

/// The canonical run identifier.
pub type RunId = String;

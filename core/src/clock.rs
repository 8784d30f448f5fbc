//! Game clock — owns the day counter and pause state.

use crate::types::{Day, Week};
use serde::{Deserialize, Serialize};

/// Seven simulated days make one game week.
pub const DAYS_PER_WEEK: Day = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekClock {
    pub current_day: Day,
    pub paused:      bool,
}

impl Default for WeekClock {
    fn default() -> Self { Self::new() }
}

impl WeekClock {
    pub fn new() -> Self {
        Self {
            current_day: 0,
            paused: true,
        }
    }

    /// Advance one day. Returns the new day number.
    /// Panics if called while paused — callers must check.
    pub fn advance(&mut self) -> Day {
        assert!(!self.paused, "advance() called on paused clock");
        self.current_day += 1;
        self.current_day
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    /// The week the current day falls in. Week 0 covers days 0-6.
    pub fn current_week(&self) -> Week {
        self.current_day / DAYS_PER_WEEK
    }
}

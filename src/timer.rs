use crate::model::deserialize_optional_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_MINUTES: u32 = 25;

/// Focus-timer bookkeeping persisted alongside the task list.
///
/// Counters are per calendar day; `refresh_daily_tracking` rolls them over
/// when the stored day is not today.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase", default)]
pub struct TimerState {
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub last_tracked_date: Option<NaiveDate>,
    pub focus_seconds_today: u64,
    pub completed_sessions_today: u32,
    pub session_minutes: u32,
    pub is_running: bool,
    pub remaining_seconds: u64,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            last_tracked_date: None,
            focus_seconds_today: 0,
            completed_sessions_today: 0,
            session_minutes: DEFAULT_SESSION_MINUTES,
            is_running: false,
            remaining_seconds: u64::from(DEFAULT_SESSION_MINUTES) * 60,
        }
    }
}

impl TimerState {
    pub fn session_seconds(&self) -> u64 {
        u64::from(self.session_minutes) * 60
    }

    /// Returns `true` when the counters were reset for a new day.
    pub fn refresh_daily_tracking(&mut self, today: NaiveDate) -> bool {
        if self.last_tracked_date == Some(today) {
            return false;
        }

        self.focus_seconds_today = 0;
        self.completed_sessions_today = 0;
        self.is_running = false;
        self.remaining_seconds = self.session_seconds();
        self.last_tracked_date = Some(today);
        true
    }
}

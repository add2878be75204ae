use crate::timer::TimerState;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_THEME: &str = "light";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Active,
    Overdue,
    #[default]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct TaskItem {
    #[serde(alias = "name")]
    pub name: String,
    #[serde(alias = "dueDate", alias = "duedate")]
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: NaiveDate,
    #[serde(alias = "dueTime", alias = "duetime")]
    pub due_time: NaiveTime,
    #[serde(default, alias = "reminderStatus", alias = "reminderstatus")]
    pub reminder_status: ReminderStatus,
    #[serde(default, alias = "reminderLabel", alias = "reminderlabel")]
    pub reminder_label: String,
}

/// User preferences. Keys other than `Theme` are kept as-is so that settings
/// written by newer builds survive a load/save cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    #[serde(alias = "theme", deserialize_with = "deserialize_theme")]
    pub theme: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct AppState {
    pub tasks: Vec<TaskItem>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub timer: TimerState,
}

/// On-disk shape before validation: every top-level field may be missing or null.
/// Lower-case keys are accepted alongside the PascalCase ones that are written.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct StoredState {
    #[serde(default, alias = "tasks")]
    pub tasks: Option<Vec<TaskItem>>,
    #[serde(default, alias = "settings")]
    pub settings: Option<Settings>,
    #[serde(default, alias = "timer")]
    pub timer: Option<TimerState>,
}

impl StoredState {
    pub(crate) fn into_app_state(self) -> Option<AppState> {
        Some(AppState {
            tasks: self.tasks?,
            settings: self.settings.unwrap_or_default(),
            timer: self.timer.unwrap_or_default(),
        })
    }
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid seed date"),
    }
}

const fn time(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => panic!("invalid seed time"),
    }
}

const SEED_TASKS: [(&str, NaiveDate, NaiveTime, ReminderStatus, &str); 3] = [
    (
        "Understanding the tools in Figma",
        date(2025, 1, 14),
        time(9, 0),
        ReminderStatus::Active,
        "Monday, Jan 14 - 9:00",
    ),
    (
        "Review project mockups",
        date(2025, 1, 18),
        time(14, 30),
        ReminderStatus::Overdue,
        "Saturday, Jan 18 - 2:30 PM",
    ),
    (
        "Prepare presentation slides",
        date(2025, 1, 20),
        time(10, 0),
        ReminderStatus::None,
        "Not set",
    ),
];

/// First-run state: default settings and timer plus three sample tasks so the
/// task list is not empty.
pub fn default_state() -> AppState {
    let tasks = SEED_TASKS
        .iter()
        .map(|(name, due_date, due_time, status, label)| TaskItem {
            name: (*name).to_string(),
            due_date: *due_date,
            due_time: *due_time,
            reminder_status: *status,
            reminder_label: (*label).to_string(),
        })
        .collect();

    AppState {
        tasks,
        ..AppState::default()
    }
}

// Older files carry full date-times (`2025-01-14T00:00:00`); only the date is kept.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid due date: {raw}")))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_due_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}"))),
        None => Ok(None),
    }
}

fn deserialize_theme<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let theme = Option::<String>::deserialize(deserializer)?;
    Ok(theme.unwrap_or_else(|| DEFAULT_THEME.to_string()))
}

pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Some(date);
    }
    if let Ok(datetime) = raw.parse::<NaiveDateTime>() {
        return Some(datetime.date());
    }
    DateTime::<FixedOffset>::parse_from_rfc3339(raw)
        .ok()
        .map(|datetime| datetime.date_naive())
}

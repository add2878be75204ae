use chrono::NaiveDate;
use taskaid::timer::{DEFAULT_SESSION_MINUTES, TimerState};

#[test]
fn timer_refresh_only_resets_on_day_change() {
    let monday = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();

    let mut timer = TimerState {
        last_tracked_date: Some(monday),
        focus_seconds_today: 1500,
        completed_sessions_today: 1,
        ..TimerState::default()
    };

    assert!(!timer.refresh_daily_tracking(monday));
    assert_eq!(timer.completed_sessions_today, 1);

    assert!(timer.refresh_daily_tracking(tuesday));
    assert_eq!(timer.last_tracked_date, Some(tuesday));
    assert_eq!(timer.completed_sessions_today, 0);
    assert_eq!(timer.focus_seconds_today, 0);
    assert_eq!(
        timer.remaining_seconds,
        u64::from(DEFAULT_SESSION_MINUTES) * 60
    );
}

#[test]
fn fresh_timer_starts_tracking_on_first_refresh() {
    let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();
    let mut timer = TimerState::default();

    assert!(timer.refresh_daily_tracking(day));
    assert_eq!(timer.last_tracked_date, Some(day));
}

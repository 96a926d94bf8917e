use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveDateTime};

use wagewatch::engine::EarnStatus;
use wagewatch::persist::SettingsDb;
use wagewatch::store::WageStore;

fn feb(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// 22000 over a 28-day month with rest days {6,7,13,14}: 24 workdays.
fn configured_store(now: NaiveDateTime) -> WageStore {
    let mut store = WageStore::load_at(Some(SettingsDb::in_memory().unwrap()), now);
    store.set_month_salary(22000.0);
    store.set_non_work_days([6, 7, 13, 14].into_iter().collect());
    store
}

#[test]
fn working_day_mid_window_scenario() {
    // day 10 at 13:00, four hours into a 09:00-18:00 window
    let store = configured_store(feb(10, 13, 0));
    let snap = store.snapshot();
    assert_matches!(snap.status, EarnStatus::Working);

    let fig = snap.figures.unwrap();
    assert_eq!(fig.days_in_month, 28);
    assert_eq!(fig.workday_count, 24);
    assert_eq!(fig.workdays_elapsed, 8);

    let daily: f64 = 22000.0 / 24.0;
    assert!((daily - 916.6667).abs() < 1e-3);
    assert!((fig.today_earned - daily * (14400.0 / 32400.0)).abs() < 1e-9);
    assert!((fig.today_earned - 407.41).abs() < 0.01);
}

#[test]
fn rest_day_scenario() {
    let store = configured_store(feb(6, 13, 0));
    let snap = store.snapshot();
    assert_matches!(snap.status, EarnStatus::Resting);
    let fig = snap.figures.unwrap();
    assert_eq!(fig.today_earned, 0.0);
    assert_eq!(fig.today_hours, 0.0);
}

#[test]
fn completed_day_scenario() {
    // day 15 at 19:00, one hour past the window end
    let store = configured_store(feb(15, 19, 0));
    let snap = store.snapshot();
    assert_matches!(snap.status, EarnStatus::Paused);
    let fig = snap.figures.unwrap();
    let daily = 22000.0 / 24.0;
    assert!((fig.today_earned - daily).abs() < 1e-9);
    assert!((fig.today_hours - fig.total_hours).abs() < 1e-9);
}

#[test]
fn early_morning_scenario() {
    let store = configured_store(feb(10, 7, 30));
    let snap = store.snapshot();
    assert_matches!(snap.status, EarnStatus::Paused);
    assert_eq!(snap.figures.unwrap().today_earned, 0.0);
}

#[test]
fn partially_configured_store_is_not_configured() {
    let mut store = WageStore::load_at(Some(SettingsDb::in_memory().unwrap()), feb(10, 13, 0));
    store.set_non_work_days([6, 7].into_iter().collect());
    let snap = store.snapshot();
    assert_matches!(snap.status, EarnStatus::NotConfigured);
    assert!(snap.figures.is_none());
}

#[test]
fn earnings_climb_through_the_day_and_settle_at_daily_pay() {
    let mut store = configured_store(feb(10, 0, 0));
    let daily = 22000.0 / 24.0;
    let mut last = -1.0;
    for hour in 0..24 {
        for minute in [0, 20, 40] {
            store.refresh(feb(10, hour, minute));
            let earned = store.snapshot().figures.unwrap().today_earned;
            assert!(earned >= last, "regressed at {:02}:{:02}", hour, minute);
            last = earned;
        }
    }
    assert!((last - daily).abs() < 1e-9);
}

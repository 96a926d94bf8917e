use std::sync::mpsc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wagewatch::persist::SettingsDb;
use wagewatch::runtime::{FixedTicker, Runner, SharedTicker, TestEventSource, Ticker, WatchEvent};
use wagewatch::store::WageStore;

fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

// Headless watch loop using the internal runtime without a TTY: ticks drive
// the store's refresh (and rollover) with synthetic instants.
#[test]
fn headless_ticks_drive_refresh_and_rollover() {
    let mut store = WageStore::load_at(Some(SettingsDb::in_memory().unwrap()), at(1, 31, 12));
    store.set_month_salary(22000.0);
    store.set_non_work_days([3, 4].into_iter().collect());
    assert!(store.config().is_configured());

    let (_tx, rx) = mpsc::channel();
    let es = TestEventSource::new(rx);
    let ticker = FixedTicker::new(Duration::from_millis(1));
    let runner = Runner::new(es, ticker);

    // Synthetic clock: one hour per tick, crossing into February.
    let mut hour = 12;
    for _ in 0..24u32 {
        if let WatchEvent::Tick = runner.step() {
            hour += 1;
            let now = if hour < 24 {
                at(1, 31, hour)
            } else {
                at(2, 1, hour - 24)
            };
            store.refresh(now);
        }
    }

    assert_eq!(store.config().month_key, "2026-02");
    assert!(!store.config().is_configured());
}

#[test]
fn headless_quit_key_passes_through() {
    let (tx, rx) = mpsc::channel();
    tx.send(WatchEvent::Key(KeyEvent::new(
        KeyCode::Char('q'),
        KeyModifiers::NONE,
    )))
    .unwrap();

    let es = TestEventSource::new(rx);
    let runner = Runner::new(es, FixedTicker::new(Duration::from_millis(10)));

    match runner.step() {
        WatchEvent::Key(key) => assert_eq!(key.code, KeyCode::Char('q')),
        other => panic!("expected key event, got {:?}", other),
    }
}

#[test]
fn cadence_edit_rearms_the_shared_ticker() {
    let mut store = WageStore::load_at(Some(SettingsDb::in_memory().unwrap()), at(2, 10, 12));
    let ticker = SharedTicker::new(store.refresh_interval());
    assert_eq!(ticker.interval(), Duration::from_secs(1));

    store.set_refresh_interval(0.2);
    ticker.set(store.refresh_interval());
    assert_eq!(ticker.interval(), Duration::from_millis(200));

    // clamped below the floor
    store.set_refresh_interval(0.001);
    ticker.set(store.refresh_interval());
    assert_eq!(ticker.interval(), Duration::from_millis(100));
}

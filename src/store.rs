use crate::calendar::{CalendarPolicy, Gregorian};
use crate::config::{MonthConfig, MIN_REFRESH_INTERVAL};
use crate::engine::{compute_snapshot, Snapshot};
use crate::persist::{
    SettingsDb, KEY_END_SECONDS, KEY_MONTH_KEY, KEY_MONTH_SALARY, KEY_MONTH_SALARY_SET,
    KEY_NON_WORK_DAYS, KEY_NON_WORK_DAYS_SET, KEY_REFRESH_INTERVAL, KEY_START_SECONDS,
};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeSet;
use std::time::Duration;

/// Stateful owner of the configuration, the current instant, and the
/// write-through persistence. All mutation happens on the loop thread;
/// persistence is best-effort and never rolls back in-memory state.
#[derive(Debug)]
pub struct WageStore {
    now: NaiveDateTime,
    config: MonthConfig,
    db: Option<SettingsDb>,
    calendar: Gregorian,
}

impl WageStore {
    /// Load persisted configuration (or defaults) and run the startup
    /// rollover check against the wall clock.
    pub fn new(db: Option<SettingsDb>) -> Self {
        Self::load_at(db, Local::now().naive_local())
    }

    /// As `new`, but for a caller-supplied instant.
    pub fn load_at(db: Option<SettingsDb>, now: NaiveDateTime) -> Self {
        let config = db
            .as_ref()
            .and_then(|d| d.load_config().ok())
            .unwrap_or_default();
        let mut store = Self {
            now,
            config,
            db,
            calendar: Gregorian,
        };
        store.check_rollover();
        store
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn config(&self) -> &MonthConfig {
        &self.config
    }

    /// `YYYY-MM` of the store's current instant.
    pub fn current_month_key(&self) -> String {
        self.calendar.month_key(self.now.date())
    }

    /// Derived earnings state for the current instant. Recomputed on every
    /// call; nothing is cached or persisted.
    pub fn snapshot(&self) -> Snapshot {
        compute_snapshot(self.now, &self.config, &self.calendar)
    }

    /// Advance "now" and re-run the month-rollover check. Called on every
    /// tick of the refresh loop.
    pub fn refresh(&mut self, now: NaiveDateTime) {
        self.now = now;
        self.check_rollover();
    }

    /// Tick against the wall clock.
    pub fn tick(&mut self) {
        self.refresh(Local::now().naive_local());
    }

    pub fn set_month_salary(&mut self, salary: f64) {
        self.config.month_salary = salary.max(0.0);
        self.config.month_salary_set = true;
        self.config.month_key = self.current_month_key();
        if let Some(db) = &self.db {
            let _ = db.set_string(KEY_MONTH_KEY, &self.config.month_key);
            let _ = db.set_f64(KEY_MONTH_SALARY, self.config.month_salary);
            let _ = db.set_bool(KEY_MONTH_SALARY_SET, true);
        }
    }

    pub fn set_non_work_days(&mut self, days: BTreeSet<u32>) {
        self.config.non_work_days = days;
        self.config.non_work_days_set = true;
        self.config.month_key = self.current_month_key();
        if let Some(db) = &self.db {
            let _ = db.set_string(KEY_MONTH_KEY, &self.config.month_key);
            let _ = db.set_days(KEY_NON_WORK_DAYS, &self.config.non_work_days);
            let _ = db.set_bool(KEY_NON_WORK_DAYS_SET, true);
        }
    }

    pub fn set_work_start(&mut self, seconds: f64) {
        self.config.start_seconds = seconds;
        if let Some(db) = &self.db {
            let _ = db.set_f64(KEY_START_SECONDS, seconds);
        }
    }

    pub fn set_work_end(&mut self, seconds: f64) {
        self.config.end_seconds = seconds;
        if let Some(db) = &self.db {
            let _ = db.set_f64(KEY_END_SECONDS, seconds);
        }
    }

    /// Cadence edits are clamped up to the floor, never rejected. The loop
    /// reads the new value on its next step, which re-arms the ticker.
    pub fn set_refresh_interval(&mut self, seconds: f64) {
        self.config.refresh_interval = seconds.max(MIN_REFRESH_INTERVAL);
        if let Some(db) = &self.db {
            let _ = db.set_f64(KEY_REFRESH_INTERVAL, self.config.refresh_interval);
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs_f64(self.config.refresh_interval.max(MIN_REFRESH_INTERVAL))
    }

    /// Reset the configuration the moment the current month no longer
    /// matches the stamped one. The reset is unconditional and written as a
    /// single transaction; once the keys match this is a no-op.
    fn check_rollover(&mut self) {
        let key = self.current_month_key();
        if self.config.month_key != key {
            self.config.reset_for_month(&key);
            if let Some(db) = &mut self.db {
                let _ = db.save_config(&self.config);
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Default working window: 09:00 - 18:00.
pub const DEFAULT_START_SECONDS: f64 = 32400.0;
pub const DEFAULT_END_SECONDS: f64 = 64800.0;
/// Default cadence for refreshing "now".
pub const DEFAULT_REFRESH_INTERVAL: f64 = 1.0;
/// Floor for the refresh cadence; smaller values are clamped up, not rejected.
pub const MIN_REFRESH_INTERVAL: f64 = 0.1;

/// Durable per-month configuration. Salary and non-work days are scoped to
/// `month_key` and wiped on rollover; the work window and refresh cadence
/// survive across months.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthConfig {
    pub month_key: String,
    pub month_salary: f64,
    pub month_salary_set: bool,
    pub non_work_days: BTreeSet<u32>,
    pub non_work_days_set: bool,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub refresh_interval: f64,
}

impl Default for MonthConfig {
    fn default() -> Self {
        Self {
            month_key: String::new(),
            month_salary: 0.0,
            month_salary_set: false,
            non_work_days: BTreeSet::new(),
            non_work_days_set: false,
            start_seconds: DEFAULT_START_SECONDS,
            end_seconds: DEFAULT_END_SECONDS,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl MonthConfig {
    /// Fully configured only when both salary and non-work days have been
    /// explicitly set this month. One without the other is a valid
    /// intermediate state and still renders as not configured.
    pub fn is_configured(&self) -> bool {
        self.month_salary_set && self.non_work_days_set
    }

    /// Wholesale reset at a month boundary. The work window and refresh
    /// cadence are not month-scoped and are left untouched.
    pub fn reset_for_month(&mut self, month_key: &str) {
        self.month_key = month_key.to_string();
        self.month_salary = 0.0;
        self.month_salary_set = false;
        self.non_work_days.clear();
        self.non_work_days_set = false;
    }
}

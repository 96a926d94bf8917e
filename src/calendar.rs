use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar queries the engine needs, kept behind a trait so the
/// computation stays deterministic for any calendar handed to it.
pub trait CalendarPolicy {
    fn days_in_month(&self, date: NaiveDate) -> u32;
    fn start_of_day(&self, date: NaiveDate) -> NaiveDateTime;
    fn day_of_month(&self, date: NaiveDate) -> u32;
    /// `YYYY-MM` identity used to stamp configuration and detect rollover.
    fn month_key(&self, date: NaiveDate) -> String;
}

/// Proleptic Gregorian calendar via chrono.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl CalendarPolicy for Gregorian {
    fn days_in_month(&self, date: NaiveDate) -> u32 {
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1);
        let next = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        match (first, next) {
            (Some(a), Some(b)) => (b - a).num_days() as u32,
            _ => 30,
        }
    }

    fn start_of_day(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

    fn day_of_month(&self, date: NaiveDate) -> u32 {
        date.day()
    }

    fn month_key(&self, date: NaiveDate) -> String {
        date.format("%Y-%m").to_string()
    }
}

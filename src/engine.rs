use crate::calendar::CalendarPolicy;
use crate::config::MonthConfig;
use chrono::NaiveDateTime;

/// Where the user sits in the working day right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EarnStatus {
    #[strum(serialize = "not configured")]
    NotConfigured,
    #[strum(serialize = "resting")]
    Resting,
    #[strum(serialize = "working")]
    Working,
    #[strum(serialize = "paused")]
    Paused,
}

/// Derived figures for a configured month. Bundled in one struct so they are
/// all present or all absent together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figures {
    pub today_earned: f64,
    pub month_earned: f64,
    pub workdays_elapsed: u32,
    pub workday_count: u32,
    pub today_hours: f64,
    pub total_hours: f64,
    pub days_in_month: u32,
}

/// A point-in-time read of earnings state. Recomputed on every read, never
/// persisted. `figures` is `None` exactly when status is `NotConfigured`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub status: EarnStatus,
    pub figures: Option<Figures>,
}

impl Snapshot {
    pub fn not_configured() -> Self {
        Self {
            status: EarnStatus::NotConfigured,
            figures: None,
        }
    }
}

/// Pure projection of (now, config) onto an earnings snapshot.
///
/// Salary is split evenly across the month's work days; today's share
/// accrues linearly through the work window, is zero on a rest day or
/// before the window opens, and is paid in full once the window closes.
/// Prior days of the month are assumed fully worked.
pub fn compute_snapshot<C: CalendarPolicy>(
    now: NaiveDateTime,
    cfg: &MonthConfig,
    cal: &C,
) -> Snapshot {
    if !cfg.is_configured() {
        return Snapshot::not_configured();
    }

    let date = now.date();
    let days_in_month = cal.days_in_month(date);
    let workday_count = (days_in_month as i64 - cfg.non_work_days.len() as i64).max(0) as u32;
    let daily_pay = if workday_count > 0 {
        cfg.month_salary / workday_count as f64
    } else {
        0.0
    };

    let total_work_seconds = (cfg.end_seconds - cfg.start_seconds).max(0.0);
    let total_hours = total_work_seconds / 3600.0;

    // Seconds since local midnight, compared against the window bounds that
    // are themselves seconds-since-midnight offsets of the same day.
    let now_seconds = (now - cal.start_of_day(date)).num_milliseconds() as f64 / 1000.0;

    let today = cal.day_of_month(date);
    let resting_today = cfg.non_work_days.contains(&today);

    let (status, today_earned, today_hours) = if resting_today {
        (EarnStatus::Resting, 0.0, 0.0)
    } else if now_seconds >= cfg.start_seconds && now_seconds < cfg.end_seconds {
        let elapsed = (now_seconds - cfg.start_seconds).clamp(0.0, total_work_seconds);
        let earned = if total_work_seconds > 0.0 {
            daily_pay * (elapsed / total_work_seconds)
        } else {
            0.0
        };
        (EarnStatus::Working, earned, elapsed / 3600.0)
    } else if now_seconds < cfg.start_seconds {
        // work hasn't started yet today
        (EarnStatus::Paused, 0.0, 0.0)
    } else {
        // the work day is complete
        (EarnStatus::Paused, daily_pay, total_hours)
    };

    let workdays_elapsed = (1..=today)
        .filter(|d| !cfg.non_work_days.contains(d))
        .count() as u32;
    let prior_workdays = (1..today).filter(|d| !cfg.non_work_days.contains(d)).count() as f64;
    let mut month_earned = daily_pay * prior_workdays;
    if !resting_today {
        month_earned += today_earned;
    }

    Snapshot {
        status,
        figures: Some(Figures {
            today_earned,
            month_earned,
            workdays_elapsed,
            workday_count,
            today_hours,
            total_hours,
            days_in_month,
        }),
    }
}

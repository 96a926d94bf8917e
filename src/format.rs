//! Display formatting shared by the status view and `--once` output.
//! Renderers show `--` wherever a figure is absent.

/// Currency glyph shown before every amount.
pub const CURRENCY: &str = "¥";

const ABSENT: &str = "--";

pub fn money(amount: Option<f64>) -> String {
    match amount {
        Some(v) => format!("{}{:.2}", CURRENCY, v),
        None => ABSENT.to_string(),
    }
}

pub fn hours_ratio(hours: Option<(f64, f64)>) -> String {
    match hours {
        Some((worked, total)) => format!("{:.1}/{:.1}", worked, total),
        None => ABSENT.to_string(),
    }
}

pub fn workdays_ratio(days: Option<(u32, u32)>) -> String {
    match days {
        Some((elapsed, total)) => format!("{}/{}", elapsed, total),
        None => ABSENT.to_string(),
    }
}

/// 24-hour `HH:MM` from seconds since local midnight.
pub fn hhmm(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64 / 60;
    format!("{:02}:{:02}", (total / 60) % 24, total % 60)
}

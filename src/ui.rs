use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::engine::{EarnStatus, Snapshot};
use crate::format;

const VERTICAL_MARGIN: u16 = 2;

/// Full-screen status view rendered once per tick.
pub struct StatusView<'a> {
    pub snapshot: &'a Snapshot,
    pub month_key: &'a str,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

fn status_style(status: EarnStatus) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match status {
        EarnStatus::Working => bold.fg(Color::Green),
        EarnStatus::Resting => bold.fg(Color::Magenta),
        EarnStatus::Paused => bold.fg(Color::Yellow),
        EarnStatus::NotConfigured => bold.add_modifier(Modifier::DIM),
    }
}

impl Widget for &StatusView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let snap = self.snapshot;
        let fig = snap.figures;

        let mut lines = vec![
            Line::from(Span::styled(
                snap.status.to_string(),
                status_style(snap.status),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("today  ", dim_style),
                Span::styled(format::money(fig.map(|f| f.today_earned)), bold_style),
            ]),
            Line::from(vec![
                Span::styled("month  ", dim_style),
                Span::styled(format::money(fig.map(|f| f.month_earned)), bold_style),
            ]),
            Line::from(vec![
                Span::styled("hours  ", dim_style),
                Span::raw(format::hours_ratio(
                    fig.map(|f| (f.today_hours, f.total_hours)),
                )),
            ]),
            Line::from(vec![
                Span::styled("days   ", dim_style),
                Span::raw(format::workdays_ratio(
                    fig.map(|f| (f.workdays_elapsed, f.workday_count)),
                )),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "{}-{}  {}",
                    format::hhmm(self.start_seconds),
                    format::hhmm(self.end_seconds),
                    self.month_key
                ),
                dim_style,
            )),
        ];

        if snap.status == EarnStatus::NotConfigured {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "set --salary and --rest-days for this month",
                italic_style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("(q) quit", dim_style)));

        let height = lines.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints(
                [
                    Constraint::Min(area.height.saturating_sub(height) / 2),
                    Constraint::Length(height),
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);
    }
}

/// One-line rendering of a snapshot, shared by `--once` output and tests.
pub fn status_line(snapshot: &Snapshot) -> String {
    let fig = snapshot.figures;
    format!(
        "{} | today {} | month {} | hours {} | days {}",
        snapshot.status,
        format::money(fig.map(|f| f.today_earned)),
        format::money(fig.map(|f| f.month_earned)),
        format::hours_ratio(fig.map(|f| (f.today_hours, f.total_hours))),
        format::workdays_ratio(fig.map(|f| (f.workdays_elapsed, f.workday_count))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Figures;

    #[test]
    fn status_line_unconfigured_shows_placeholders() {
        let line = status_line(&Snapshot::not_configured());
        assert_eq!(
            line,
            "not configured | today -- | month -- | hours -- | days --"
        );
    }

    #[test]
    fn status_line_working_shows_figures() {
        let snap = Snapshot {
            status: EarnStatus::Working,
            figures: Some(Figures {
                today_earned: 407.407407,
                month_earned: 6824.074074,
                workdays_elapsed: 8,
                workday_count: 24,
                today_hours: 4.0,
                total_hours: 9.0,
                days_in_month: 28,
            }),
        };
        assert_eq!(
            status_line(&snap),
            "working | today ¥407.41 | month ¥6824.07 | hours 4.0/9.0 | days 8/24"
        );
    }
}

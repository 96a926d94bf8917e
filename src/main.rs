use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};
use wagewatch::persist::SettingsDb;
use wagewatch::runtime::{CrosstermEventSource, Runner, SharedTicker, WatchEvent};
use wagewatch::store::WageStore;
use wagewatch::ui::{status_line, StatusView};

/// terminal salary pacer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shows how much of your monthly salary you've earned so far today and this month, refreshed continuously. Salary and rest days are per-month and reset automatically at the month boundary."
)]
pub struct Cli {
    /// set this month's salary
    #[clap(long)]
    salary: Option<f64>,

    /// comma-separated non-working days of the month, e.g. 6,7,13,14
    #[clap(long, value_delimiter = ',', value_parser = clap::value_parser!(u32).range(1..=31))]
    rest_days: Option<Vec<u32>>,

    /// work-day start as 24h HH:MM
    #[clap(long)]
    work_start: Option<String>,

    /// work-day end as 24h HH:MM
    #[clap(long)]
    work_end: Option<String>,

    /// refresh cadence in seconds (values below 0.1 are clamped up)
    #[clap(long)]
    refresh: Option<f64>,

    /// settings database path override
    #[clap(long)]
    db: Option<PathBuf>,

    /// print a single status line and exit
    #[clap(long)]
    once: bool,

    /// evaluate at a fixed local instant (YYYY-MM-DDTHH:MM:SS) instead of now
    #[clap(long)]
    at: Option<String>,
}

/// Seconds since midnight from a 24h `HH:MM` string.
fn parse_hhmm(text: &str) -> Option<f64> {
    let t = NaiveTime::parse_from_str(text, "%H:%M").ok()?;
    Some(f64::from(t.num_seconds_from_midnight()))
}

fn cli_error(message: &str) -> ! {
    let mut cmd = Cli::command();
    cmd.error(ErrorKind::ValueValidation, message).exit()
}

/// Apply any configuration edits given on the command line. Malformed input
/// is rejected here; the store only ever sees validated values.
fn apply_cli(cli: &Cli, store: &mut WageStore) {
    if let Some(salary) = cli.salary {
        if salary < 0.0 || !salary.is_finite() {
            cli_error("--salary must be a non-negative number");
        }
        store.set_month_salary(salary);
    }
    if let Some(days) = &cli.rest_days {
        store.set_non_work_days(days.iter().copied().collect());
    }
    if let Some(text) = &cli.work_start {
        match parse_hhmm(text) {
            Some(seconds) => store.set_work_start(seconds),
            None => cli_error("--work-start must be 24h HH:MM"),
        }
    }
    if let Some(text) = &cli.work_end {
        match parse_hhmm(text) {
            Some(seconds) => store.set_work_end(seconds),
            None => cli_error("--work-end must be 24h HH:MM"),
        }
    }
    if let Some(secs) = cli.refresh {
        if secs <= 0.0 || !secs.is_finite() {
            cli_error("--refresh must be a positive number of seconds");
        }
        store.set_refresh_interval(secs);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let db = match &cli.db {
        Some(path) => SettingsDb::open_at(path).ok(),
        None => SettingsDb::new().ok(),
    };

    let now = match &cli.at {
        Some(text) => match NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
            Ok(t) => t,
            Err(_) => cli_error("--at must be YYYY-MM-DDTHH:MM:SS"),
        },
        None => Local::now().naive_local(),
    };

    let mut store = WageStore::load_at(db, now);
    apply_cli(&cli, &mut store);

    if cli.once {
        println!("{}", status_line(&store.snapshot()));
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run = start_tui(&mut terminal, &mut store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    store: &mut WageStore,
) -> Result<(), Box<dyn Error>> {
    let ticker = SharedTicker::new(store.refresh_interval());
    let runner = Runner::new(CrosstermEventSource::new(), ticker.clone());

    loop {
        store.tick();
        // pick up any cadence edit on the next step
        ticker.set(store.refresh_interval());

        let snapshot = store.snapshot();
        let config = store.config();
        let view = StatusView {
            snapshot: &snapshot,
            month_key: config.month_key.as_str(),
            start_seconds: config.start_seconds,
            end_seconds: config.end_seconds,
        };
        terminal.draw(|f| f.render_widget(&view, f.area()))?;

        match runner.step() {
            WatchEvent::Tick | WatchEvent::Resize => {}
            WatchEvent::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ => {}
            },
        }
    }

    // Dropping the runner tears down the ticker and lets the crossterm
    // reader thread exit on its next failed send.
    Ok(())
}

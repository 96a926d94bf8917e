use crate::app_dirs::AppDirs;
use crate::config::{
    MonthConfig, DEFAULT_END_SECONDS, DEFAULT_REFRESH_INTERVAL, DEFAULT_START_SECONDS,
};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const KEY_MONTH_KEY: &str = "month_key";
pub const KEY_MONTH_SALARY: &str = "month_salary";
pub const KEY_MONTH_SALARY_SET: &str = "month_salary_set";
pub const KEY_NON_WORK_DAYS: &str = "non_work_days";
pub const KEY_NON_WORK_DAYS_SET: &str = "non_work_days_set";
pub const KEY_START_SECONDS: &str = "start_seconds";
pub const KEY_END_SECONDS: &str = "end_seconds";
pub const KEY_REFRESH_INTERVAL: &str = "refresh_interval";

/// Durable key-value store for the month configuration, one row per key.
#[derive(Debug)]
pub struct SettingsDb {
    conn: Connection,
}

impl SettingsDb {
    /// Open (and bootstrap) the settings database at the default location.
    pub fn new() -> Result<Self> {
        let db_path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("wagewatch_settings.db"));

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        Self::open_at(db_path)
    }

    /// Open a settings database at an explicit path (tests, `--db`).
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::bootstrap(conn)
    }

    /// In-memory database for unit tests.
    pub fn in_memory() -> Result<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
            [],
        )?;
        Ok(SettingsDb { conn })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM settings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        Ok(self.get(key)?.unwrap_or_default())
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, value)
    }

    pub fn get_f64(&self, key: &str, default: f64) -> Result<f64> {
        Ok(self
            .get(key)?
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(default))
    }

    pub fn set_f64(&self, key: &str, value: f64) -> Result<()> {
        self.set(key, &value.to_string())
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.map(|v| v == "1").unwrap_or(false))
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, if value { "1" } else { "0" })
    }

    /// Day numbers are stored as a JSON array; order carries no meaning and
    /// the value is rebuilt into a set on load.
    pub fn get_days(&self, key: &str) -> Result<BTreeSet<u32>> {
        Ok(self
            .get(key)?
            .and_then(|v| serde_json::from_str::<Vec<u32>>(&v).ok())
            .map(|days| days.into_iter().collect())
            .unwrap_or_default())
    }

    pub fn set_days(&self, key: &str, days: &BTreeSet<u32>) -> Result<()> {
        let list: Vec<u32> = days.iter().copied().collect();
        self.set(key, &serde_json::to_string(&list).unwrap_or_default())
    }

    /// Reconstruct the configuration, falling back to per-key defaults for
    /// anything absent.
    pub fn load_config(&self) -> Result<MonthConfig> {
        Ok(MonthConfig {
            month_key: self.get_string(KEY_MONTH_KEY)?,
            month_salary: self.get_f64(KEY_MONTH_SALARY, 0.0)?,
            month_salary_set: self.get_bool(KEY_MONTH_SALARY_SET)?,
            non_work_days: self.get_days(KEY_NON_WORK_DAYS)?,
            non_work_days_set: self.get_bool(KEY_NON_WORK_DAYS_SET)?,
            start_seconds: self.get_f64(KEY_START_SECONDS, DEFAULT_START_SECONDS)?,
            end_seconds: self.get_f64(KEY_END_SECONDS, DEFAULT_END_SECONDS)?,
            refresh_interval: self.get_f64(KEY_REFRESH_INTERVAL, DEFAULT_REFRESH_INTERVAL)?,
        })
    }

    /// Write every key in one transaction so a reader never observes a
    /// half-written configuration (the rollover reset relies on this).
    pub fn save_config(&mut self, cfg: &MonthConfig) -> Result<()> {
        let list: Vec<u32> = cfg.non_work_days.iter().copied().collect();
        let days = serde_json::to_string(&list).unwrap_or_default();

        let tx = self.conn.transaction()?;
        for (key, value) in [
            (KEY_MONTH_KEY, cfg.month_key.clone()),
            (KEY_MONTH_SALARY, cfg.month_salary.to_string()),
            (
                KEY_MONTH_SALARY_SET,
                if cfg.month_salary_set { "1" } else { "0" }.to_string(),
            ),
            (KEY_NON_WORK_DAYS, days),
            (
                KEY_NON_WORK_DAYS_SET,
                if cfg.non_work_days_set { "1" } else { "0" }.to_string(),
            ),
            (KEY_START_SECONDS, cfg.start_seconds.to_string()),
            (KEY_END_SECONDS, cfg.end_seconds.to_string()),
            (KEY_REFRESH_INTERVAL, cfg.refresh_interval.to_string()),
        ] {
            tx.execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        tx.commit()
    }
}

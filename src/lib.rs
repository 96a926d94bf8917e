// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod format;
pub mod persist;
pub mod runtime;
pub mod store;
pub mod ui;

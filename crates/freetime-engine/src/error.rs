//! Error types for freetime-engine.
//!
//! Only configuration and input validation can fail. The free-time
//! computation itself treats unreadable calendars as data, not errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid business hours: start {start}, end {end} (need 0 <= start < end <= 24)")]
    InvalidHours { start: u32, end: u32 },

    #[error("Invalid day count: {0} (need 1..=366)")]
    InvalidDays(u32),

    #[error("Invalid minimum duration: {0} minutes (need > 0)")]
    InvalidMinDuration(i64),

    #[error("Invalid interval: end {end} is before start {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

//! Search settings.
//!
//! [`SearchConfig`] is the loose, serde-friendly form (every field has a
//! default). [`SearchConfig::window`] validates it and produces the typed
//! [`SearchWindow`] the finder works with.

use crate::clock::DateRange;
use crate::error::{EngineError, Result};
use crate::filter::FilterPolicy;
use crate::keywords::{parse_exclude_keywords, ExcludeRule};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const MAX_DAYS: u32 = 366;

/// User-facing search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of days to search, starting today.
    pub days: u32,
    /// First business hour (local wall clock, inclusive).
    pub start_hour: u32,
    /// End of business hours (local wall clock, exclusive; 24 = midnight).
    pub end_hour: u32,
    /// Shortest free slot worth reporting.
    pub min_duration_minutes: i64,
    /// Raw exclude-keyword text, see [`crate::keywords`].
    pub exclude_keywords: String,
    /// Count tentative and unanswered events as busy.
    pub include_tentative: bool,
    /// IANA timezone the business hours are expressed in.
    pub timezone: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            days: 7,
            start_hour: 9,
            end_hour: 18,
            min_duration_minutes: 30,
            exclude_keywords: String::new(),
            include_tentative: false,
            timezone: "UTC".to_string(),
        }
    }
}

impl SearchConfig {
    /// Parse configuration from a JSON string and validate it.
    pub fn from_json(content: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.days == 0 || self.days > MAX_DAYS {
            return Err(EngineError::InvalidDays(self.days));
        }
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(EngineError::InvalidHours {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.min_duration_minutes <= 0 {
            return Err(EngineError::InvalidMinDuration(self.min_duration_minutes));
        }
        Ok(())
    }

    /// The configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| EngineError::InvalidTimezone(self.timezone.clone()))
    }

    pub fn rules(&self) -> Vec<ExcludeRule> {
        parse_exclude_keywords(&self.exclude_keywords)
    }

    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy {
            include_tentative: self.include_tentative,
            rules: self.rules(),
        }
    }

    /// Validate and build the search window starting on `today`.
    pub fn window(&self, today: NaiveDate) -> Result<SearchWindow> {
        self.validate()?;
        Ok(SearchWindow {
            range: DateRange::starting(today, self.days),
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            min_duration_minutes: self.min_duration_minutes,
            timezone: self.tz()?,
        })
    }
}

/// Validated time bounds for one search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub range: DateRange,
    pub start_hour: u32,
    pub end_hour: u32,
    pub min_duration_minutes: i64,
    pub timezone: Tz,
}

impl SearchWindow {
    /// A window over `range` with the given business hours.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidHours` or `EngineError::InvalidMinDuration`
    /// when the bounds make no sense.
    pub fn new(
        range: DateRange,
        start_hour: u32,
        end_hour: u32,
        min_duration_minutes: i64,
        timezone: Tz,
    ) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(EngineError::InvalidHours {
                start: start_hour,
                end: end_hour,
            });
        }
        if min_duration_minutes <= 0 {
            return Err(EngineError::InvalidMinDuration(min_duration_minutes));
        }
        Ok(Self {
            range,
            start_hour,
            end_hour,
            min_duration_minutes,
            timezone,
        })
    }
}

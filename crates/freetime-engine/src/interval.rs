//! Half-open time intervals.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open range `[start, end)` of UTC instants.
///
/// Always satisfies `start <= end`. Zero-length intervals are valid but never
/// overlap anything. Values are immutable; [`TimeInterval::clip`] returns a new
/// interval instead of adjusting this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unchecked wire shape, validated on the way in.
#[derive(Deserialize)]
struct IntervalRepr {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<IntervalRepr> for TimeInterval {
    type Error = EngineError;

    fn try_from(repr: IntervalRepr) -> Result<Self> {
        Self::new(repr.start, repr.end)
    }
}

impl TimeInterval {
    /// Build an interval.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` when `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length in whole minutes (truncated).
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Open overlap test: intervals that merely touch do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Same start, end pushed out to `end` if that is later.
    pub(crate) fn extended_to(&self, end: DateTime<Utc>) -> TimeInterval {
        TimeInterval {
            start: self.start,
            end: self.end.max(end),
        }
    }

    /// Clamp this interval to `window`.
    ///
    /// Returns `None` when the interval lies entirely outside the window,
    /// including the case where it only touches one of the window's edges.
    pub fn clip(&self, window: &TimeInterval) -> Option<TimeInterval> {
        if self.end <= window.start || self.start >= window.end {
            return None;
        }
        Some(TimeInterval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        })
    }
}

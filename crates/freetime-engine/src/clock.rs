//! Calendar-day arithmetic in the search timezone.
//!
//! Business hours are wall-clock hours in an IANA timezone, so every day
//! boundary goes through [`resolve_local`], which handles DST transitions:
//! an ambiguous local time (fall back) resolves to the earlier instant, and a
//! local time inside a spring-forward gap shifts forward past the gap.

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc, Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Largest DST gap we search across, in minutes (real-world gaps are 30 or 60).
const MAX_GAP_MINUTES: i64 = 120;

/// Step used when probing forward out of a DST gap.
const GAP_PROBE_MINUTES: i64 = 15;

/// A range of whole local days, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `days` consecutive days beginning at `start`.
    ///
    /// Saturates at the last representable date.
    pub fn starting(start: NaiveDate, days: u32) -> Self {
        let end = start
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day < self.end)
    }

    pub fn len(&self) -> usize {
        self.days().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Saturday and Sunday are never searched.
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Convert a wall-clock time in `tz` to a UTC instant.
///
/// Returns `None` only for datetimes chrono cannot represent.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }
    // Inside a spring-forward gap: take the first valid wall-clock time after it.
    (1..=MAX_GAP_MINUTES / GAP_PROBE_MINUTES)
        .filter_map(|step| local.checked_add_signed(Duration::minutes(step * GAP_PROBE_MINUTES)))
        .find_map(|probe| tz.from_local_datetime(&probe).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// The instant at `hour:00` on `day` in `tz`. `hour == 24` is the following
/// midnight.
pub fn at_hour(tz: &Tz, day: NaiveDate, hour: u32) -> Option<DateTime<Utc>> {
    let local = if hour >= 24 {
        day.checked_add_days(Days::new(1))?.and_hms_opt(0, 0, 0)?
    } else {
        day.and_hms_opt(hour, 0, 0)?
    };
    resolve_local(tz, local)
}

/// The local calendar day of `instant` in `tz`.
pub fn local_date(tz: &Tz, instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// Round `instant` up to the next local `step_minutes` boundary.
///
/// Instants already on a boundary are returned unchanged. The result is never
/// earlier than `instant`: when the boundary falls in a repeated hour, the
/// first occurrence at or after `instant` is used.
pub fn round_up_to_step(tz: &Tz, instant: DateTime<Utc>, step_minutes: u32) -> Option<DateTime<Utc>> {
    let local = instant.with_timezone(tz).naive_local();
    let step_secs = i64::from(step_minutes) * 60;
    if step_secs == 0 {
        return Some(instant);
    }
    let secs_of_day = i64::from(local.num_seconds_from_midnight());
    let remainder = secs_of_day % step_secs;
    if remainder == 0 && local.nanosecond() == 0 {
        return Some(instant);
    }
    let floored = local
        .with_nanosecond(0)?
        .checked_sub_signed(Duration::seconds(remainder))?;
    let rounded = floored.checked_add_signed(Duration::seconds(step_secs))?;

    let resolved = match tz.from_local_datetime(&rounded) {
        LocalResult::Ambiguous(first, second) => {
            let first = first.with_timezone(&Utc);
            if first >= instant {
                first
            } else {
                second.with_timezone(&Utc)
            }
        }
        _ => resolve_local(tz, rounded)?,
    };
    Some(resolved.max(instant))
}

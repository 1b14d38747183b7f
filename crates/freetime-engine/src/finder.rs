//! Compute common free slots across all members over a date range.
//!
//! For every weekday in the range the business window is built in the search
//! timezone, today's window is cut down to start no earlier than "now"
//! (rounded up to the next half hour), everybody's busy periods are merged
//! inside the window, and the gaps between them become free slots if they are
//! long enough.

use crate::clock::{self, DateRange};
use crate::config::SearchWindow;
use crate::interval::TimeInterval;
use crate::merge::merge_busy_periods;
use crate::occupancy::SLOT_MINUTES;
use crate::snapshot::BusySnapshot;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A free time slot common to every accessible member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSlot {
    /// Local day the slot belongs to.
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Find free slots of at least `window.min_duration_minutes` on every business
/// day of `window.range`.
///
/// Weekends are skipped. On the local day containing `now`, nothing before
/// `now` rounded up to the next half hour is offered. Inaccessible members
/// contribute no busy time. Slots are returned in chronological order.
pub fn find_free_slots(
    snapshot: &BusySnapshot,
    window: &SearchWindow,
    now: DateTime<Utc>,
) -> Vec<FreeSlot> {
    let tz = window.timezone;
    let today = clock::local_date(&tz, now);
    let range: DateRange = window.range;

    let mut slots = Vec::new();
    for day in range.days() {
        if clock::is_weekend(day) {
            continue;
        }

        let Some(business) = business_window(window, day, today, now) else {
            warn!(%day, "could not resolve business hours, skipping day");
            continue;
        };

        let merged = merge_busy_periods(snapshot.accessible_intervals(), &business);
        debug!(%day, busy_blocks = merged.len(), "merged busy periods");

        slots.extend(
            gaps(&merged, &business)
                .into_iter()
                .filter(|gap| gap.duration_minutes() >= window.min_duration_minutes)
                .map(|gap| FreeSlot {
                    date: day,
                    start: gap.start(),
                    end: gap.end(),
                    duration_minutes: gap.duration_minutes(),
                }),
        );
    }

    slots
}

/// The `[start_hour, end_hour)` window of `day`, truncated to "now" on today.
fn business_window(
    window: &SearchWindow,
    day: NaiveDate,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Option<TimeInterval> {
    let tz = window.timezone;
    let mut day_start = clock::at_hour(&tz, day, window.start_hour)?;
    let day_end = clock::at_hour(&tz, day, window.end_hour)?;

    if day == today && now > day_start {
        let rounded = clock::round_up_to_step(&tz, now, SLOT_MINUTES)?;
        day_start = rounded.min(day_end);
    }

    TimeInterval::new(day_start, day_end).ok()
}

/// Gaps between sorted, disjoint busy intervals inside `window`.
fn gaps(merged: &[TimeInterval], window: &TimeInterval) -> Vec<TimeInterval> {
    let mut free = Vec::new();
    let mut cursor = window.start();

    for busy in merged {
        if busy.start() > cursor {
            if let Ok(gap) = TimeInterval::new(cursor, busy.start()) {
                free.push(gap);
            }
        }
        cursor = cursor.max(busy.end());
    }

    // Trailing free time after the last busy period.
    if cursor < window.end() {
        if let Ok(gap) = TimeInterval::new(cursor, window.end()) {
            free.push(gap);
        }
    }

    free
}

//! Merge busy periods inside a window.
//!
//! Clips every interval to the window, sorts by start time, and coalesces
//! overlapping or touching intervals. The result is the minimal sorted set of
//! disjoint intervals during which at least one member is busy. Zero-length
//! intervals contribute nothing.

use crate::interval::TimeInterval;

/// Merge overlapping or adjacent busy periods, clipped to `window`.
///
/// Intervals entirely outside the window (or only touching its edges) are
/// discarded. Returns a sorted, non-overlapping list.
pub fn merge_busy_periods<'a, I>(intervals: I, window: &TimeInterval) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = &'a TimeInterval>,
{
    let mut clipped: Vec<TimeInterval> = intervals
        .into_iter()
        .filter(|interval| !interval.is_empty())
        .filter_map(|interval| interval.clip(window))
        .collect();

    if clipped.is_empty() {
        return Vec::new();
    }

    clipped.sort_by_key(|interval| (interval.start(), interval.end()));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(clipped.len());
    for interval in clipped {
        if let Some(last) = merged.last_mut() {
            if interval.start() <= last.end() {
                *last = last.extended_to(interval.end());
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

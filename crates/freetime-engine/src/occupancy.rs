//! Per-slot occupancy: how many (and which) members are busy in a short slot.
//!
//! This is what a grid view shows: each cell is a fixed-width slot, classified
//! as free for everybody, busy for some, or busy for all.

use crate::clock;
use crate::config::SearchWindow;
use crate::event::MemberId;
use crate::interval::TimeInterval;
use crate::snapshot::BusySnapshot;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Width of a grid cell, and the granularity "now" is rounded up to.
pub const SLOT_MINUTES: u32 = 30;

/// Busy tally for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub busy_count: usize,
    /// Busy members, in search order.
    pub busy_members: Vec<MemberId>,
    /// Every member of the search, inaccessible ones included.
    pub total_members: usize,
}

/// Display class of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CellStatus {
    /// Nobody is busy.
    Free,
    /// Some members are busy.
    Partial,
    /// Every member is busy.
    Busy,
}

impl From<&Occupancy> for CellStatus {
    fn from(occupancy: &Occupancy) -> Self {
        if occupancy.busy_count == 0 {
            CellStatus::Free
        } else if occupancy.busy_count >= occupancy.total_members {
            CellStatus::Busy
        } else {
            CellStatus::Partial
        }
    }
}

/// Who is busy during `[slot_start, slot_start + slot_width_minutes)`.
///
/// A member is busy when one of their intervals overlaps the slot; an interval
/// that ends exactly at the slot start (or begins exactly at its end) does not
/// count. Inaccessible members are never busy but still count toward
/// `total_members`.
pub fn member_busy_status(
    snapshot: &BusySnapshot,
    slot_start: DateTime<Utc>,
    slot_width_minutes: u32,
) -> Occupancy {
    let slot_end = slot_start + Duration::minutes(i64::from(slot_width_minutes));
    let Ok(slot) = TimeInterval::new(slot_start, slot_end) else {
        return Occupancy {
            busy_count: 0,
            busy_members: Vec::new(),
            total_members: snapshot.len(),
        };
    };

    let busy_members: Vec<MemberId> = snapshot
        .iter()
        .filter(|(_, data)| {
            data.busy()
                .is_some_and(|busy| busy.iter().any(|interval| interval.overlaps(&slot)))
        })
        .map(|(id, _)| id.clone())
        .collect();

    Occupancy {
        busy_count: busy_members.len(),
        busy_members,
        total_members: snapshot.len(),
    }
}

/// A column of the occupancy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_today: bool,
}

/// One cell of the occupancy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum GridCell {
    /// Weekend, or a wall-clock time that does not exist in the timezone.
    Closed,
    Slot {
        start: DateTime<Utc>,
        status: CellStatus,
        occupancy: Occupancy,
    },
}

/// One half-hour row of the occupancy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    /// Local wall-clock start of the row.
    pub time: NaiveTime,
    /// One cell per [`GridDay`], in the same order.
    pub cells: Vec<GridCell>,
}

/// Day-by-half-hour occupancy over the whole search window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    pub days: Vec<GridDay>,
    pub rows: Vec<GridRow>,
}

/// Classify every half-hour cell of the business window for every day in the
/// range. Weekend columns are present but closed.
pub fn occupancy_grid(snapshot: &BusySnapshot, window: &SearchWindow, today: NaiveDate) -> OccupancyGrid {
    let tz = window.timezone;
    let days: Vec<GridDay> = window
        .range
        .days()
        .map(|date| GridDay {
            date,
            is_weekend: clock::is_weekend(date),
            is_today: date == today,
        })
        .collect();

    let rows = (window.start_hour..window.end_hour)
        .flat_map(|hour| (0..60).step_by(SLOT_MINUTES as usize).map(move |minute| (hour, minute)))
        .filter_map(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
        .map(|time| GridRow {
            time,
            cells: days
                .iter()
                .map(|day| {
                    if day.is_weekend {
                        return GridCell::Closed;
                    }
                    match clock::resolve_local(&tz, day.date.and_time(time)) {
                        Some(start) => {
                            let occupancy = member_busy_status(snapshot, start, SLOT_MINUTES);
                            GridCell::Slot {
                                start,
                                status: CellStatus::from(&occupancy),
                                occupancy,
                            }
                        }
                        None => GridCell::Closed,
                    }
                })
                .collect(),
        })
        .collect();

    OccupancyGrid { days, rows }
}

//! Plain-text output for the `find` and `grid` subcommands.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use freetime_engine::{BusySnapshot, CellStatus, FindOutcome, GridCell, MemberId, OccupancyGrid};
use std::fmt::Write;

const COLUMN_WIDTH: usize = 6;

/// Slots grouped by day, followed by warnings and exclusion counts.
pub fn find_report(outcome: &FindOutcome) -> String {
    let tz = outcome.window.timezone;
    let mut out = String::new();

    if outcome.slots.is_empty() {
        out.push_str("No free slots found\n");
    } else {
        let _ = writeln!(out, "Found {} free slots", outcome.slots.len());
        let mut current: Option<NaiveDate> = None;
        for slot in &outcome.slots {
            if current != Some(slot.date) {
                let _ = writeln!(out, "{}", slot.date.format("%Y-%m-%d (%a)"));
                current = Some(slot.date);
            }
            let _ = writeln!(
                out,
                "  {}-{}  {}",
                local_time(&tz, slot.start),
                local_time(&tz, slot.end),
                format_duration(slot.duration_minutes)
            );
        }
    }

    if !outcome.inaccessible.is_empty() {
        let _ = writeln!(
            out,
            "warning: cannot access calendars: {} (check sharing permissions)",
            join_ids(&outcome.inaccessible)
        );
    }
    if !outcome.fallback.is_empty() {
        let _ = writeln!(
            out,
            "warning: free/busy only, exclude keywords not applied: {}",
            join_ids(&outcome.fallback)
        );
    }
    if outcome.excluded_by_keyword > 0 {
        let _ = writeln!(
            out,
            "info: {} events treated as free by exclude keywords",
            outcome.excluded_by_keyword
        );
    }
    if outcome.excluded_by_status > 0 {
        let _ = writeln!(
            out,
            "info: {} tentative or unanswered events excluded",
            outcome.excluded_by_status
        );
    }

    out
}

/// One column per day, one row per half hour.
///
/// `.` everyone free, `+` some busy, `#` everyone busy, blank for weekends.
pub fn grid_table(grid: &OccupancyGrid, snapshot: &BusySnapshot) -> String {
    let mut out = String::new();

    let _ = write!(out, "{:<COLUMN_WIDTH$}", "");
    for day in &grid.days {
        let marker = if day.is_today { "*" } else { "" };
        let label = format!("{}{}", day.date.format("%m/%d"), marker);
        let _ = write!(out, "{:<COLUMN_WIDTH$}", label);
    }
    end_line(&mut out);

    let _ = write!(out, "{:<COLUMN_WIDTH$}", "");
    for day in &grid.days {
        let _ = write!(out, "{:<COLUMN_WIDTH$}", day.date.format("%a").to_string());
    }
    end_line(&mut out);

    for row in &grid.rows {
        let _ = write!(out, "{:<COLUMN_WIDTH$}", row.time.format("%H:%M").to_string());
        for cell in &row.cells {
            let _ = write!(out, "{:<COLUMN_WIDTH$}", cell_glyph(cell));
        }
        end_line(&mut out);
    }

    let names: Vec<&str> = snapshot.members().iter().map(MemberId::display_name).collect();
    let _ = writeln!(out, "members: {}", names.join(", "));
    out.push_str(". free  + partly busy  # all busy\n");
    out
}

/// Finish a table line without its trailing column padding.
fn end_line(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}

fn cell_glyph(cell: &GridCell) -> &'static str {
    match cell {
        GridCell::Closed => "",
        GridCell::Slot { status, .. } => match status {
            CellStatus::Free => ".",
            CellStatus::Partial => "+",
            CellStatus::Busy => "#",
        },
    }
}

fn local_time(tz: &Tz, instant: DateTime<Utc>) -> String {
    instant.with_timezone(tz).format("%H:%M").to_string()
}

fn join_ids(ids: &[MemberId]) -> String {
    ids.iter()
        .map(MemberId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `45m`, `1h`, `1h 30m`.
pub fn format_duration(minutes: i64) -> String {
    if minutes >= 60 {
        let hours = minutes / 60;
        let rest = minutes % 60;
        if rest > 0 {
            format!("{}h {}m", hours, rest)
        } else {
            format!("{}h", hours)
        }
    } else {
        format!("{}m", minutes)
    }
}

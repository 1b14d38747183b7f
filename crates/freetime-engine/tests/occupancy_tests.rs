//! Tests for per-slot occupancy and the occupancy grid.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use freetime_engine::clock::DateRange;
use freetime_engine::config::SearchWindow;
use freetime_engine::event::{MemberBusyData, MemberId};
use freetime_engine::interval::TimeInterval;
use freetime_engine::occupancy::{
    member_busy_status, occupancy_grid, CellStatus, GridCell, SLOT_MINUTES,
};
use freetime_engine::snapshot::BusySnapshot;

fn at(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, d, h, m, 0).unwrap()
}

fn span(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
    TimeInterval::new(at(16, start.0, start.1), at(16, end.0, end.1)).unwrap()
}

fn member(id: &str, busy: Vec<TimeInterval>) -> (MemberId, MemberBusyData) {
    (MemberId::new(id), MemberBusyData::Events { busy })
}

fn inaccessible(id: &str) -> (MemberId, MemberBusyData) {
    (
        MemberId::new(id),
        MemberBusyData::Inaccessible {
            reason: "noAccess".to_string(),
        },
    )
}

#[test]
fn overlapping_interval_makes_member_busy() {
    let snapshot = BusySnapshot::from_data(vec![member("a@example.com", vec![span((10, 15), (10, 45))])]);

    let status = member_busy_status(&snapshot, at(16, 10, 0), SLOT_MINUTES);

    assert_eq!(status.busy_count, 1);
    assert_eq!(status.busy_members, vec![MemberId::new("a@example.com")]);
    assert_eq!(status.total_members, 1);
}

#[test]
fn touching_interval_does_not_count() {
    let snapshot = BusySnapshot::from_data(vec![
        member("a@example.com", vec![span((9, 0), (10, 0))]),
        member("b@example.com", vec![span((10, 30), (11, 0))]),
    ]);

    let status = member_busy_status(&snapshot, at(16, 10, 0), 30);

    assert_eq!(status.busy_count, 0);
    assert!(status.busy_members.is_empty());
    assert_eq!(CellStatus::from(&status), CellStatus::Free);
}

#[test]
fn busy_members_follow_member_order() {
    let snapshot = BusySnapshot::from_data(vec![
        member("zed@example.com", vec![span((10, 0), (11, 0))]),
        member("amy@example.com", vec![]),
        member("bob@example.com", vec![span((9, 0), (12, 0))]),
    ]);

    let status = member_busy_status(&snapshot, at(16, 10, 0), 30);

    assert_eq!(
        status.busy_members,
        vec![MemberId::new("zed@example.com"), MemberId::new("bob@example.com")]
    );
    assert_eq!(CellStatus::from(&status), CellStatus::Partial);
}

#[test]
fn everyone_busy_is_busy_cell() {
    let snapshot = BusySnapshot::from_data(vec![
        member("a@example.com", vec![span((10, 0), (11, 0))]),
        member("b@example.com", vec![span((10, 0), (10, 30))]),
    ]);

    let status = member_busy_status(&snapshot, at(16, 10, 0), 30);

    assert_eq!(CellStatus::from(&status), CellStatus::Busy);
}

#[test]
fn inaccessible_member_is_never_busy_but_counted() {
    let snapshot = BusySnapshot::from_data(vec![
        member("a@example.com", vec![span((10, 0), (11, 0))]),
        inaccessible("b@example.com"),
    ]);

    let status = member_busy_status(&snapshot, at(16, 10, 0), 30);

    assert_eq!(status.busy_count, 1);
    assert_eq!(status.total_members, 2);
    assert_eq!(CellStatus::from(&status), CellStatus::Partial);
}

#[test]
fn repeated_queries_give_identical_answers() {
    let snapshot = BusySnapshot::from_data(vec![member("a@example.com", vec![span((10, 0), (11, 0))])]);
    let first = member_busy_status(&snapshot, at(16, 10, 30), 30);
    let second = member_busy_status(&snapshot, at(16, 10, 30), 30);
    assert_eq!(first, second);
}

#[test]
fn grid_has_half_hour_rows_and_closed_weekends() {
    // Fri 13th .. Mon 16th, 09:00-11:00.
    let window = SearchWindow::new(
        DateRange::starting(NaiveDate::from_ymd_opt(2026, 3, 13).unwrap(), 4),
        9,
        11,
        30,
        Tz::UTC,
    )
    .unwrap();
    let snapshot = BusySnapshot::from_data(vec![
        member("a@example.com", vec![span((9, 30), (10, 0))]),
        member("b@example.com", vec![]),
    ]);
    let today = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();

    let grid = occupancy_grid(&snapshot, &window, today);

    assert_eq!(grid.days.len(), 4);
    assert!(grid.days[1].is_weekend && grid.days[2].is_weekend);
    assert!(grid.days[3].is_today);

    let times: Vec<NaiveTime> = grid.rows.iter().map(|row| row.time).collect();
    assert_eq!(
        times,
        vec![
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        ]
    );

    let row_0930 = &grid.rows[1];
    assert_eq!(row_0930.cells.len(), 4);
    assert_eq!(row_0930.cells[1], GridCell::Closed);
    match &row_0930.cells[3] {
        GridCell::Slot { start, status, occupancy } => {
            assert_eq!(*start, at(16, 9, 30));
            assert_eq!(*status, CellStatus::Partial);
            assert_eq!(occupancy.busy_count, 1);
        }
        GridCell::Closed => panic!("Monday cell should be open"),
    }
    match &row_0930.cells[0] {
        GridCell::Slot { status, .. } => assert_eq!(*status, CellStatus::Free),
        GridCell::Closed => panic!("Friday cell should be open"),
    }
}

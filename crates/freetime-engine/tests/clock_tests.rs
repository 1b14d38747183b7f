//! Tests for local-day arithmetic, DST resolution and half-hour rounding.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Africa::Cairo;
use chrono_tz::America::New_York;
use chrono_tz::Tz;
use freetime_engine::clock::{at_hour, is_weekend, resolve_local, round_up_to_step, DateRange};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Rounding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn rounds_up_to_half_hour() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 14, 15, 0).unwrap();
    let rounded = round_up_to_step(&Tz::UTC, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 3, 16, 14, 30, 0).unwrap());
}

#[test]
fn boundary_is_left_alone() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 14, 30, 0).unwrap();
    assert_eq!(round_up_to_step(&Tz::UTC, now, 30), Some(now));
}

#[test]
fn seconds_past_boundary_round_up() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 20).unwrap();
    let rounded = round_up_to_step(&Tz::UTC, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 3, 16, 14, 30, 0).unwrap());
}

#[test]
fn late_evening_rounds_into_next_day() {
    let now = Utc.with_ymd_and_hms(2026, 3, 16, 23, 45, 0).unwrap();
    let rounded = round_up_to_step(&Tz::UTC, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap());
}

#[test]
fn repeated_hour_first_pass_keeps_earlier_offset() {
    // Cairo falls back at midnight on 2026-10-29/30: 23:00-24:00 happens twice.
    // 22:10 EEST (19:10Z) rounds to 22:30 EEST.
    let now = Utc.with_ymd_and_hms(2026, 10, 29, 19, 10, 0).unwrap();
    let rounded = round_up_to_step(&Cairo, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 10, 29, 19, 30, 0).unwrap());

    // 23:10 EEST (20:10Z), first pass of the repeated hour.
    let now = Utc.with_ymd_and_hms(2026, 10, 29, 20, 10, 0).unwrap();
    let rounded = round_up_to_step(&Cairo, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 10, 29, 20, 30, 0).unwrap());
}

#[test]
fn repeated_hour_second_pass_never_goes_back() {
    // 23:10 EET (21:10Z), second pass. Local 23:30 occurs at 20:30Z and 21:30Z.
    let now = Utc.with_ymd_and_hms(2026, 10, 29, 21, 10, 0).unwrap();
    let rounded = round_up_to_step(&Cairo, now, 30).unwrap();
    assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 10, 29, 21, 30, 0).unwrap());
    assert!(rounded >= now);
}

// ─────────────────────────────────────────────────────────────────────────────
// Local time resolution
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn hour_24_is_next_midnight() {
    let end = at_hour(&Tz::UTC, date(2026, 3, 16), 24).unwrap();
    assert_eq!(end, Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap());
}

#[test]
fn spring_forward_gap_shifts_forward() {
    // 2026-03-08 02:30 does not exist in New York; clocks jump 02:00 -> 03:00.
    let local = date(2026, 3, 8).and_hms_opt(2, 30, 0).unwrap();
    let resolved = resolve_local(&New_York, local).unwrap();
    assert_eq!(resolved, Utc.with_ymd_and_hms(2026, 3, 8, 7, 0, 0).unwrap());
}

#[test]
fn business_hours_follow_local_offset() {
    // EDT is UTC-4 after the March switch.
    let start = at_hour(&New_York, date(2026, 3, 16), 9).unwrap();
    assert_eq!(start, Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap());
}

// ─────────────────────────────────────────────────────────────────────────────
// Date ranges
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn range_iterates_exclusive_end() {
    let range = DateRange::starting(date(2026, 3, 13), 3);
    let days: Vec<_> = range.days().collect();
    assert_eq!(days, vec![date(2026, 3, 13), date(2026, 3, 14), date(2026, 3, 15)]);
    assert_eq!(range.len(), 3);
    assert!(is_weekend(days[1]));
    assert!(!is_weekend(days[0]));
}

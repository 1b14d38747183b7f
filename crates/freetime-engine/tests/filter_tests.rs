//! Tests for the per-member event filter.

use chrono::{DateTime, TimeZone, Utc};
use freetime_engine::event::{MemberId, RawEvent, ResponseStatus};
use freetime_engine::filter::{filter_member_events, FilterPolicy};
use freetime_engine::keywords::parse_exclude_keywords;

fn at(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, h, m, 0).unwrap()
}

fn event(title: &str, status: ResponseStatus, start: (u32, u32), end: (u32, u32)) -> RawEvent {
    RawEvent {
        start: at(start.0, start.1),
        end: at(end.0, end.1),
        title: title.to_string(),
        response_status: status,
    }
}

fn alice() -> MemberId {
    MemberId::new("alice@example.com")
}

#[test]
fn tentative_excluded_when_not_included() {
    let events = vec![event("Maybe", ResponseStatus::Tentative, (9, 0), (10, 0))];
    let policy = FilterPolicy::default();

    let outcome = filter_member_events(&alice(), &events, &policy);

    assert!(outcome.busy.is_empty());
    assert_eq!(outcome.excluded_by_status, 1);
    assert_eq!(outcome.excluded_by_keyword, 0);
}

#[test]
fn needs_action_excluded_when_not_included() {
    let events = vec![event("Invite", ResponseStatus::NeedsAction, (9, 0), (10, 0))];
    let outcome = filter_member_events(&alice(), &events, &FilterPolicy::default());
    assert_eq!(outcome.excluded_by_status, 1);
    assert!(outcome.busy.is_empty());
}

#[test]
fn tentative_counts_as_busy_when_included() {
    let events = vec![
        event("Maybe", ResponseStatus::Tentative, (9, 0), (10, 0)),
        event("Invite", ResponseStatus::NeedsAction, (11, 0), (12, 0)),
    ];
    let policy = FilterPolicy {
        include_tentative: true,
        rules: Vec::new(),
    };

    let outcome = filter_member_events(&alice(), &events, &policy);

    assert_eq!(outcome.busy.len(), 2);
    assert_eq!(outcome.busy[0].start(), at(9, 0));
    assert_eq!(outcome.excluded_by_status, 0);
}

#[test]
fn keyword_match_excludes_accepted_event() {
    let events = vec![
        event("Focus block", ResponseStatus::Accepted, (9, 0), (11, 0)),
        event("Design review", ResponseStatus::Accepted, (13, 0), (14, 0)),
    ];
    let policy = FilterPolicy {
        include_tentative: false,
        rules: parse_exclude_keywords("block"),
    };

    let outcome = filter_member_events(&alice(), &events, &policy);

    assert_eq!(outcome.excluded_by_keyword, 1);
    assert_eq!(outcome.busy.len(), 1);
    assert_eq!(outcome.busy[0].start(), at(13, 0));
    assert_eq!(outcome.busy[0].end(), at(14, 0));
}

#[test]
fn status_check_runs_before_keyword_check() {
    // Tentative AND keyword-matching: only the status tally moves.
    let events = vec![event("Focus block", ResponseStatus::Tentative, (9, 0), (10, 0))];
    let policy = FilterPolicy {
        include_tentative: false,
        rules: parse_exclude_keywords("block"),
    };

    let outcome = filter_member_events(&alice(), &events, &policy);

    assert_eq!(outcome.excluded_by_status, 1);
    assert_eq!(outcome.excluded_by_keyword, 0);
}

#[test]
fn declined_is_never_busy_and_never_counted() {
    let events = vec![event("Nope", ResponseStatus::Declined, (9, 0), (10, 0))];
    let policy = FilterPolicy {
        include_tentative: true,
        rules: Vec::new(),
    };

    let outcome = filter_member_events(&alice(), &events, &policy);

    assert!(outcome.busy.is_empty());
    assert_eq!(outcome.excluded_by_status, 0);
    assert_eq!(outcome.excluded_by_keyword, 0);
}

#[test]
fn unknown_status_is_treated_as_accepted() {
    let events = vec![event("Odd", ResponseStatus::Unknown, (9, 0), (10, 0))];
    let outcome = filter_member_events(&alice(), &events, &FilterPolicy::default());
    assert_eq!(outcome.busy.len(), 1);
}

#[test]
fn reversed_event_is_skipped() {
    let events = vec![event("Broken", ResponseStatus::Accepted, (11, 0), (10, 0))];
    let outcome = filter_member_events(&alice(), &events, &FilterPolicy::default());
    assert!(outcome.busy.is_empty());
    assert_eq!(outcome.excluded_by_status + outcome.excluded_by_keyword, 0);
}

#[test]
fn busy_intervals_keep_input_order() {
    let events = vec![
        event("Late", ResponseStatus::Accepted, (15, 0), (16, 0)),
        event("Early", ResponseStatus::Accepted, (9, 0), (10, 0)),
    ];
    let outcome = filter_member_events(&alice(), &events, &FilterPolicy::default());
    assert_eq!(outcome.busy[0].start(), at(15, 0));
    assert_eq!(outcome.busy[1].start(), at(9, 0));
}

//! Decide which of a member's events make them busy.
//!
//! Applied in order for each event:
//!
//! 1. declined events are never busy (not counted in either tally);
//! 2. unless tentative events are included, `tentative` and `needsAction`
//!    events are dropped and counted as excluded by status;
//! 3. events whose title matches an exclude keyword are dropped and counted as
//!    excluded by keyword;
//! 4. everything else contributes its `[start, end)` to the busy set.
//!
//! Free/busy fallback data never passes through here: it has no titles or
//! statuses to filter on.

use crate::event::{MemberId, RawEvent, ResponseStatus};
use crate::interval::TimeInterval;
use crate::keywords::{self, ExcludeRule};
use tracing::{debug, warn};

/// The exclusion policy for one find operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPolicy {
    pub include_tentative: bool,
    pub rules: Vec<ExcludeRule>,
}

/// Result of filtering one member's events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOutcome {
    pub busy: Vec<TimeInterval>,
    pub excluded_by_status: usize,
    pub excluded_by_keyword: usize,
}

/// Filter one member's events into busy intervals.
///
/// `member` only labels the diagnostic log lines.
pub fn filter_member_events(
    member: &MemberId,
    events: &[RawEvent],
    policy: &FilterPolicy,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();

    for event in events {
        let status = event.response_status;

        if status == ResponseStatus::Declined {
            debug!(%member, title = %event.title, "skipping declined event");
            continue;
        }

        if !policy.include_tentative && status.is_unconfirmed() {
            debug!(%member, title = %event.title, %status, "excluded by response status");
            outcome.excluded_by_status += 1;
            continue;
        }

        if let Some(rule) = keywords::matches(&event.title, &policy.rules) {
            debug!(
                %member,
                title = %event.title,
                keyword = %rule.keyword,
                exact = rule.exact,
                "excluded by keyword"
            );
            outcome.excluded_by_keyword += 1;
            continue;
        }

        match TimeInterval::new(event.start, event.end) {
            Ok(interval) => {
                debug!(
                    %member,
                    title = %event.title,
                    %status,
                    start = %event.start,
                    end = %event.end,
                    "busy"
                );
                outcome.busy.push(interval);
            }
            Err(err) => warn!(%member, title = %event.title, %err, "skipping malformed event"),
        }
    }

    outcome
}

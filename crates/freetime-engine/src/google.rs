//! Google Calendar payloads -> engine input.
//!
//! The retrieval layer fetches `events.list` (with `singleEvents=true`) and, if
//! that is refused, the `freeBusy` endpoint. This module only converts the
//! already-fetched JSON bodies; it performs no I/O.
//!
//! Only the fields the engine needs are modelled. Everything else in the
//! payloads is ignored during deserialization.

use crate::event::{MemberId, MemberSource, RawEvent, ResponseStatus};
use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Reason used when a member has neither events nor free/busy data.
pub const NO_ACCESS: &str = "noAccess";

/// Reason used when the free/busy response has no entry for the member.
pub const FREE_BUSY_FAILED: &str = "freeBusyFailed";

/// Body of an `events.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleEventList {
    #[serde(default)]
    pub items: Vec<GoogleEvent>,
}

/// A single event resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEvent {
    pub status: Option<String>,
    pub transparency: Option<String>,
    pub summary: Option<String>,
    pub start: Option<GoogleEventTime>,
    pub end: Option<GoogleEventTime>,
    #[serde(default)]
    pub attendees: Vec<GoogleAttendee>,
}

/// `start` / `end` of an event. All-day events carry `date` instead of
/// `dateTime` and are not modelled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleEventTime {
    pub date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAttendee {
    pub email: Option<String>,
    pub response_status: Option<ResponseStatus>,
}

/// Body of a `freeBusy` query response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleFreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, GoogleFreeBusyCalendar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleFreeBusyCalendar {
    #[serde(default)]
    pub busy: Vec<TimeInterval>,
    #[serde(default)]
    pub errors: Vec<GoogleFreeBusyError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleFreeBusyError {
    #[serde(default)]
    pub reason: String,
}

impl GoogleEvent {
    /// The calendar owner's response, matched by email.
    ///
    /// When reading someone else's calendar the `self` flag refers to the
    /// reader, so the owner is found by address. Events without the owner in
    /// the attendee list are the owner's own and count as accepted.
    fn owner_status(&self, owner: &MemberId) -> ResponseStatus {
        self.attendees
            .iter()
            .find(|attendee| {
                attendee
                    .email
                    .as_deref()
                    .is_some_and(|email| owner.matches_email(email))
            })
            .map_or(ResponseStatus::Accepted, |attendee| {
                attendee.response_status.unwrap_or_default()
            })
    }

    fn is_owner_listed(&self, owner: &MemberId) -> bool {
        self.attendees.iter().any(|attendee| {
            attendee
                .email
                .as_deref()
                .is_some_and(|email| owner.matches_email(email))
        })
    }
}

/// Convert an `events.list` body into the owner's raw events.
///
/// Drops cancelled events, events marked transparent (they do not block
/// time), all-day events, and events the owner declined.
pub fn events_from_google(owner: &MemberId, list: &GoogleEventList) -> Vec<RawEvent> {
    list.items
        .iter()
        .filter_map(|item| {
            if item.status.as_deref() == Some("cancelled") {
                return None;
            }
            if item.transparency.as_deref() == Some("transparent") {
                return None;
            }
            let start = item.start.as_ref()?.date_time?;
            let end = item.end.as_ref()?.date_time?;
            let title = item.summary.clone().unwrap_or_default();

            let response_status = item.owner_status(owner);
            if response_status == ResponseStatus::Declined {
                return None;
            }
            if !item.attendees.is_empty() && !item.is_owner_listed(owner) {
                debug!(member = %owner, %title, "owner not among attendees, treating as accepted");
            }

            Some(RawEvent {
                start,
                end,
                title,
                response_status,
            })
        })
        .collect()
}

/// Convert a `freeBusy` body into the owner's fallback source.
pub fn source_from_freebusy(owner: &MemberId, response: &GoogleFreeBusyResponse) -> MemberSource {
    let calendar = response
        .calendars
        .iter()
        .find(|(id, _)| owner.matches_email(id))
        .map(|(_, calendar)| calendar);

    match calendar {
        Some(calendar) => match calendar.errors.first() {
            Some(error) => {
                warn!(member = %owner, reason = %error.reason, "free/busy lookup failed");
                MemberSource::Error(error.reason.clone())
            }
            None => MemberSource::FreeBusy(calendar.busy.clone()),
        },
        None => MemberSource::Error(FREE_BUSY_FAILED.to_string()),
    }
}

/// Pick the best available source for a member: events when readable,
/// otherwise the free/busy fallback, otherwise inaccessible.
pub fn resolve_member_source(
    owner: &MemberId,
    events: Option<&GoogleEventList>,
    freebusy: Option<&GoogleFreeBusyResponse>,
) -> MemberSource {
    match (events, freebusy) {
        (Some(list), _) => MemberSource::Events(events_from_google(owner, list)),
        (None, Some(response)) => source_from_freebusy(owner, response),
        (None, None) => MemberSource::Error(NO_ACCESS.to_string()),
    }
}

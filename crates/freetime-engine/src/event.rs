//! Member identifiers and the per-member calendar data the engine consumes.

use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a calendar owner, normally an email address.
///
/// Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short label for compact displays: the local part of an email address,
    /// or the whole identifier when there is no `@`.
    pub fn display_name(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    /// Case-insensitive comparison against an email from a calendar payload.
    pub fn matches_email(&self, email: &str) -> bool {
        self.0.eq_ignore_ascii_case(email.trim())
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<MemberId> for String {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The calendar owner's answer to an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseStatus {
    #[default]
    Accepted,
    Tentative,
    NeedsAction,
    Declined,
    /// Any status value the engine does not know about; treated like accepted.
    #[serde(other)]
    Unknown,
}

impl ResponseStatus {
    /// Not yet answered, or answered "maybe".
    pub fn is_unconfirmed(self) -> bool {
        matches!(self, ResponseStatus::Tentative | ResponseStatus::NeedsAction)
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResponseStatus::Accepted => "accepted",
            ResponseStatus::Tentative => "tentative",
            ResponseStatus::NeedsAction => "needsAction",
            ResponseStatus::Declined => "declined",
            ResponseStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One timed calendar event of one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub response_status: ResponseStatus,
}

/// What the retrieval layer managed to get for one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberSource {
    /// Full event data; the exclusion policy applies.
    Events(Vec<RawEvent>),
    /// Coarse free/busy periods only; no titles or statuses to filter on.
    FreeBusy(Vec<TimeInterval>),
    /// The calendar could not be read.
    Error(String),
}

/// A member's busy periods as held in a [`crate::BusySnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum MemberBusyData {
    /// Busy periods derived from filtered events.
    Events { busy: Vec<TimeInterval> },
    /// Busy periods taken as-is from free/busy data.
    Fallback { busy: Vec<TimeInterval> },
    /// Contributes nothing; surfaced to the user as inaccessible.
    Inaccessible { reason: String },
}

impl MemberBusyData {
    /// Busy intervals, or `None` for an inaccessible member.
    pub fn busy(&self) -> Option<&[TimeInterval]> {
        match self {
            MemberBusyData::Events { busy } | MemberBusyData::Fallback { busy } => Some(busy),
            MemberBusyData::Inaccessible { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MemberBusyData::Fallback { .. })
    }

    pub fn is_inaccessible(&self) -> bool {
        matches!(self, MemberBusyData::Inaccessible { .. })
    }
}

//! The per-operation busy snapshot and the top-level find operation.
//!
//! A [`BusySnapshot`] is built once from what the retrieval layer returned for
//! each member and is never mutated afterwards. [`find_free_time`] hands it
//! back inside [`FindOutcome`] so the same data can answer occupancy queries
//! for a grid view without recomputing anything.

use crate::clock;
use crate::config::{SearchConfig, SearchWindow};
use crate::error::Result;
use crate::event::{MemberBusyData, MemberId, MemberSource};
use crate::filter::{filter_member_events, FilterPolicy};
use crate::finder::{find_free_slots, FreeSlot};
use crate::interval::TimeInterval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// One member's input to a find operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInput {
    pub id: MemberId,
    #[serde(flatten)]
    pub source: MemberSource,
}

impl MemberInput {
    pub fn new(id: impl Into<MemberId>, source: MemberSource) -> Self {
        Self {
            id: id.into(),
            source,
        }
    }
}

/// Exclusion tallies summed over all members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExclusionTally {
    pub by_status: usize,
    pub by_keyword: usize,
}

/// Immutable busy data for every member of one find operation.
///
/// Every listed member has exactly one entry, so a lookup miss always means
/// "not part of this search".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusySnapshot {
    members: Vec<MemberId>,
    data: HashMap<MemberId, MemberBusyData>,
}

impl BusySnapshot {
    /// Build a snapshot from prepared busy data, in member order.
    ///
    /// A repeated member id keeps its first position and first data.
    pub fn from_data(entries: impl IntoIterator<Item = (MemberId, MemberBusyData)>) -> Self {
        let mut snapshot = Self::default();
        for (id, busy) in entries {
            if snapshot.data.contains_key(&id) {
                warn!(member = %id, "duplicate member ignored");
                continue;
            }
            snapshot.members.push(id.clone());
            snapshot.data.insert(id, busy);
        }
        snapshot
    }

    /// Apply the exclusion policy to every member's input.
    ///
    /// Event lists go through the filter; free/busy fallbacks pass through
    /// untouched; errors become inaccessible members. A repeated member id is
    /// dropped before filtering, so its events never reach the tally.
    pub fn build(inputs: Vec<MemberInput>, policy: &FilterPolicy) -> (Self, ExclusionTally) {
        let mut tally = ExclusionTally::default();
        let mut seen = HashSet::new();
        let entries: Vec<(MemberId, MemberBusyData)> = inputs
            .into_iter()
            .filter(|input| {
                let first = seen.insert(input.id.clone());
                if !first {
                    warn!(member = %input.id, "duplicate member ignored");
                }
                first
            })
            .map(|input| {
                let busy = match input.source {
                    MemberSource::Events(events) => {
                        let outcome = filter_member_events(&input.id, &events, policy);
                        tally.by_status += outcome.excluded_by_status;
                        tally.by_keyword += outcome.excluded_by_keyword;
                        MemberBusyData::Events { busy: outcome.busy }
                    }
                    MemberSource::FreeBusy(busy) => {
                        warn!(member = %input.id, "using free/busy fallback, exclusions not applied");
                        MemberBusyData::Fallback { busy }
                    }
                    MemberSource::Error(reason) => {
                        warn!(member = %input.id, %reason, "calendar inaccessible");
                        MemberBusyData::Inaccessible { reason }
                    }
                };
                (input.id, busy)
            })
            .collect();

        (Self::from_data(entries), tally)
    }

    /// Members in search order.
    pub fn members(&self) -> &[MemberId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, member: &MemberId) -> Option<&MemberBusyData> {
        self.data.get(member)
    }

    /// `(member, data)` pairs in search order.
    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &MemberBusyData)> {
        self.members
            .iter()
            .filter_map(|id| self.data.get(id).map(|busy| (id, busy)))
    }

    /// Busy intervals of every accessible member, flattened.
    pub fn accessible_intervals(&self) -> impl Iterator<Item = &TimeInterval> {
        self.iter()
            .filter_map(|(_, busy)| busy.busy())
            .flatten()
    }

    pub fn inaccessible(&self) -> Vec<MemberId> {
        self.iter()
            .filter(|(_, busy)| busy.is_inaccessible())
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn fallback(&self) -> Vec<MemberId> {
        self.iter()
            .filter(|(_, busy)| busy.is_fallback())
            .map(|(id, _)| id.clone())
            .collect()
    }
}

/// Everything one find operation produces.
#[derive(Debug, Clone, Serialize)]
pub struct FindOutcome {
    pub slots: Vec<FreeSlot>,
    pub excluded_by_keyword: usize,
    pub excluded_by_status: usize,
    /// Members whose calendars could not be read at all.
    pub inaccessible: Vec<MemberId>,
    /// Members whose busy time comes from free/busy data only.
    pub fallback: Vec<MemberId>,
    pub window: SearchWindow,
    /// The data the slots were computed from, for occupancy queries.
    #[serde(skip)]
    pub snapshot: BusySnapshot,
}

/// Run a complete find: filter every member's events, then search the
/// configured number of days starting on the local day of `now`.
///
/// # Errors
/// Returns an error only when `config` is invalid.
pub fn find_free_time(
    inputs: Vec<MemberInput>,
    config: &SearchConfig,
    now: DateTime<Utc>,
) -> Result<FindOutcome> {
    let tz = config.tz()?;
    let window = config.window(clock::local_date(&tz, now))?;
    let (snapshot, tally) = BusySnapshot::build(inputs, &config.policy());

    let slots = find_free_slots(&snapshot, &window, now);

    info!(
        members = snapshot.len(),
        slots = slots.len(),
        excluded_by_keyword = tally.by_keyword,
        excluded_by_status = tally.by_status,
        "find complete"
    );

    Ok(FindOutcome {
        slots,
        excluded_by_keyword: tally.by_keyword,
        excluded_by_status: tally.by_status,
        inaccessible: snapshot.inaccessible(),
        fallback: snapshot.fallback(),
        window,
        snapshot,
    })
}

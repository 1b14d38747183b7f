//! # freetime-engine
//!
//! Finds common free time across several calendar owners.
//!
//! The engine consumes already-fetched per-member calendar data (full event
//! lists, coarse free/busy fallbacks, or an "inaccessible" marker), applies
//! the exclusion policy, merges everybody's busy periods day by day inside the
//! business window and returns the gaps that are long enough to book. The same
//! immutable [`BusySnapshot`] then answers per-cell occupancy queries for a
//! grid view.
//!
//! ## Modules
//!
//! - [`keywords`]: exclude-keyword parsing and title matching
//! - [`filter`]: decide which events of one member count as busy
//! - [`merge`]: clip and coalesce busy intervals inside a window
//! - [`finder`]: walk a date range and extract common free slots
//! - [`occupancy`]: per-slot busy tallies and the occupancy grid
//! - [`snapshot`]: build the per-operation snapshot and run a find
//! - [`clock`]: date ranges, local-time resolution, 30-minute rounding
//! - [`config`]: typed search settings
//! - [`google`]: convert Google Calendar payloads into engine input
//! - [`interval`], [`event`]: value types
//! - [`error`]: Error types

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod finder;
pub mod google;
pub mod interval;
pub mod keywords;
pub mod merge;
pub mod occupancy;
pub mod snapshot;

pub use clock::DateRange;
pub use config::{SearchConfig, SearchWindow};
pub use error::EngineError;
pub use event::{MemberBusyData, MemberId, MemberSource, RawEvent, ResponseStatus};
pub use filter::{filter_member_events, FilterOutcome, FilterPolicy};
pub use finder::{find_free_slots, FreeSlot};
pub use interval::TimeInterval;
pub use keywords::{matches, parse_exclude_keywords, ExcludeRule};
pub use merge::merge_busy_periods;
pub use occupancy::{
    member_busy_status, occupancy_grid, CellStatus, GridCell, GridDay, GridRow, Occupancy,
    OccupancyGrid, SLOT_MINUTES,
};
pub use snapshot::{find_free_time, BusySnapshot, ExclusionTally, FindOutcome, MemberInput};

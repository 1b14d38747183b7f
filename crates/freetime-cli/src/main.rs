//! `freetime` CLI: find common free time across several calendars.
//!
//! ## Usage
//!
//! ```sh
//! # Free slots for the next 7 days, 09:00-18:00 UTC, at least 30 minutes
//! freetime find -i members.json
//!
//! # Tokyo business hours, ignore lunch blocks, count tentative events as busy
//! freetime find -i members.json --timezone Asia/Tokyo --exclude '"Lunch", block' --include-tentative
//!
//! # Settings from a JSON file, flags still override
//! freetime find -i members.json --config search.json --days 14
//!
//! # Half-hour occupancy grid
//! freetime grid -i members.json
//!
//! # Machine-readable output
//! freetime find -i members.json --json
//! ```
//!
//! The members file holds one entry per calendar owner:
//!
//! ```json
//! {"members": [
//!   {"id": "alice@example.com", "events": [{"start": "...", "end": "...", "title": "...", "responseStatus": "accepted"}]},
//!   {"id": "bob@example.com", "freeBusy": [{"start": "...", "end": "..."}]},
//!   {"id": "carol@example.com", "error": "noAccess"},
//!   {"id": "dave@example.com", "googleEvents": {"items": []}},
//!   {"id": "erin@example.com", "googleFreeBusy": {"calendars": {}}}
//! ]}
//! ```

mod render;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use freetime_engine::google::{self, GoogleEventList, GoogleFreeBusyResponse};
use freetime_engine::{
    clock, find_free_time, occupancy_grid, MemberId, MemberInput, MemberSource, RawEvent,
    SearchConfig, TimeInterval,
};
use serde::Deserialize;
use std::io::{self, Read};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Fewer members than this makes "common" free time meaningless.
const MIN_MEMBERS: usize = 2;

#[derive(Parser)]
#[command(
    name = "freetime",
    version,
    about = "Find common free time across several calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every filter decision and per-day merge to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List free slots common to every member
    Find {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Show half-hour occupancy for every day in the range
    Grid {
        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Members file (reads from stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,
    /// JSON file with search settings
    #[arg(long)]
    config: Option<String>,
    /// Number of days to search, starting today
    #[arg(long)]
    days: Option<u32>,
    /// First business hour (0-23)
    #[arg(long)]
    start_hour: Option<u32>,
    /// End of business hours (1-24)
    #[arg(long)]
    end_hour: Option<u32>,
    /// Shortest slot to report, in minutes
    #[arg(long)]
    min_duration: Option<i64>,
    /// Comma-separated exclude keywords; wrap in double quotes for exact match
    #[arg(long)]
    exclude: Option<String>,
    /// Treat tentative and unanswered events as busy
    #[arg(long)]
    include_tentative: bool,
    /// IANA timezone for business hours (e.g. "Asia/Tokyo")
    #[arg(long)]
    timezone: Option<String>,
    /// Pretend the current time is this RFC 3339 instant
    #[arg(long)]
    now: Option<String>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Top-level shape of the members file.
#[derive(Deserialize)]
struct MembersFile {
    members: Vec<MemberEntry>,
}

#[derive(Deserialize)]
struct MemberEntry {
    id: MemberId,
    #[serde(flatten)]
    source: EntrySource,
}

/// Engine sources plus raw Google Calendar payloads.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum EntrySource {
    Events(Vec<RawEvent>),
    FreeBusy(Vec<TimeInterval>),
    Error(String),
    GoogleEvents(GoogleEventList),
    GoogleFreeBusy(GoogleFreeBusyResponse),
}

impl MemberEntry {
    fn into_input(self) -> MemberInput {
        let source = match self.source {
            EntrySource::Events(events) => MemberSource::Events(events),
            EntrySource::FreeBusy(busy) => MemberSource::FreeBusy(busy),
            EntrySource::Error(reason) => MemberSource::Error(reason),
            EntrySource::GoogleEvents(list) => {
                google::resolve_member_source(&self.id, Some(&list), None)
            }
            EntrySource::GoogleFreeBusy(response) => {
                google::resolve_member_source(&self.id, None, Some(&response))
            }
        };
        MemberInput::new(self.id, source)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Find { search } => {
            let (inputs, config, now) = prepare(&search)?;
            let outcome = find_free_time(inputs, &config, now)?;
            if search.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print!("{}", render::find_report(&outcome));
            }
        }
        Commands::Grid { search } => {
            let (inputs, config, now) = prepare(&search)?;
            let outcome = find_free_time(inputs, &config, now)?;
            let today = clock::local_date(&outcome.window.timezone, now);
            let grid = occupancy_grid(&outcome.snapshot, &outcome.window, today);
            if search.json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render::grid_table(&grid, &outcome.snapshot));
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Load members and settings, and work out "now".
fn prepare(search: &SearchArgs) -> Result<(Vec<MemberInput>, SearchConfig, DateTime<Utc>)> {
    let raw = read_input(search.input.as_deref())?;
    let file: MembersFile =
        serde_json::from_str(&raw).context("Failed to parse members file")?;
    let inputs: Vec<MemberInput> = file
        .members
        .into_iter()
        .filter(|entry| {
            let blank = entry.id.as_str().is_empty();
            if blank {
                warn!("skipping member entry with an empty id");
            }
            !blank
        })
        .map(MemberEntry::into_input)
        .collect();

    if inputs.len() < MIN_MEMBERS {
        anyhow::bail!(
            "At least {} members are required, got {}",
            MIN_MEMBERS,
            inputs.len()
        );
    }

    let config = build_config(search)?;
    let now = match search.now.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now value: {}", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    Ok((inputs, config, now))
}

/// Defaults, then the config file, then individual flags.
fn build_config(search: &SearchArgs) -> Result<SearchConfig> {
    let mut config = match search.config.as_deref() {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            serde_json::from_str::<SearchConfig>(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => SearchConfig::default(),
    };

    if let Some(days) = search.days {
        config.days = days;
    }
    if let Some(hour) = search.start_hour {
        config.start_hour = hour;
    }
    if let Some(hour) = search.end_hour {
        config.end_hour = hour;
    }
    if let Some(minutes) = search.min_duration {
        config.min_duration_minutes = minutes;
    }
    if let Some(exclude) = &search.exclude {
        config.exclude_keywords = exclude.clone();
    }
    if search.include_tentative {
        config.include_tentative = true;
    }
    if let Some(timezone) = &search.timezone {
        config.timezone = timezone.clone();
    }

    config.validate().context("Invalid search settings")?;
    Ok(config)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

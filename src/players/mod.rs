//! Players and teams.
//!
//! Raw statistics come in through a `RosterProvider`, are normalized once
//! into `PlayerProfile`s, and grouped into a `Team` with its batting order
//! and bowling pool.

pub mod rates;
pub mod profile;
pub mod roster;
pub mod team;

pub use rates::{DismissalKind, DismissalRates, OverFrequencies, RunOutcome, RunRates};
pub use profile::{
    BattingRates, BowlingRates, BowlingStyle, HeadToHead, OverNumbers, PlayerProfile,
    RawPlayerStats, BOWLER_RUN_OUT_BASELINE, PLACEHOLDER_OVER_WEIGHT,
};
pub use roster::{InMemoryRoster, RosterProvider, TeamRecord};
pub use team::{PhaseBowlers, Team, TeamInfo, MIN_BOWLING_POOL};

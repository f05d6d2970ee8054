//! # cricket-sim
//!
//! Ball-by-ball Twenty20 match simulation from player statistics.
//!
//! ## Design Principles
//!
//! 1. **One RNG stream**: Every random draw in a match comes from a single
//!    seeded `MatchRng`, in a fixed order. Same seed and rosters, same match.
//!
//! 2. **Degrade, don't fail**: Missing or malformed player data is replaced
//!    with league-average placeholders and reported as a `Diagnostic`.
//!    Only unusable matches (unknown team, empty roster) are errors.
//!
//! 3. **Snapshots over sessions**: A match can be paused at any step as a
//!    `MatchSnapshot` and resumed later with identical results.
//!
//! ## Modules
//!
//! - `core`: Identifiers, RNG, weighted choice, configuration, errors
//! - `players`: Raw statistics, normalized profiles, rosters and teams
//! - `model`: Phases, delivery context and the outcome probability model
//! - `engine`: Innings state, deliveries, bowler rotation, the match engine
//! - `scorecard`: Whole-match simulation to a batting/bowling scorecard
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod players;
pub mod model;
pub mod engine;
pub mod scorecard;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Diagnostic, Diagnostics, MatchConfig, MatchRng, MatchRngState, PitchFactors, PlayerKey,
    SimError, TeamCode,
};

pub use crate::players::{
    DismissalKind, InMemoryRoster, PlayerProfile, RawPlayerStats, RosterProvider, RunOutcome,
    Team, TeamRecord,
};

pub use crate::model::{DeliveryContext, OutcomeDistribution, Phase, ProbabilityModel, Target};

pub use crate::engine::{
    BallEvent, Innings, MatchEngine, MatchResult, MatchSnapshot, MatchStatus, MatchSummary,
    StepEvent, StepOutcome, TossDecision, TossResult, Winner,
};

pub use crate::scorecard::{simulate_match, Scorecard};

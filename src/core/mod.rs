//! Core building blocks: identifiers, RNG, weighted choice, configuration,
//! errors and diagnostics.
//!
//! Nothing here knows about cricket beyond the fixed format constants.

pub mod ids;
pub mod rng;
pub mod sampling;
pub mod config;
pub mod error;
pub mod diagnostics;

pub use ids::{PlayerKey, TeamCode};
pub use rng::{MatchRng, MatchRngState};
pub use sampling::WeightedChoice;
pub use config::{
    MatchConfig, PitchFactors, BALLS_PER_OVER, DEATH_OVERS_START, MAX_BALLS_PER_BOWLER,
    MAX_LEGAL_BALLS, MAX_WICKETS, MIDDLE_OVERS_START, OVERS_PER_INNINGS,
};
pub use error::{LookupError, SimError};
pub use diagnostics::{Diagnostic, Diagnostics, RotationFallback};

//! Match snapshots for pause and resume.
//!
//! A snapshot holds everything that changes during a match, the RNG
//! position included. Player profiles are not stored: they are rebuilt from
//! the roster on resume, so resuming against the same roster data replays
//! exactly as an uninterrupted run would.

use serde::{Deserialize, Serialize};

use super::innings::Innings;
use super::match_engine::{MatchStatus, TossResult};
use super::result::MatchResult;
use crate::core::{MatchConfig, MatchRngState, SimError, TeamCode};
use crate::model::Target;

/// Serializable engine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub team_a: TeamCode,
    pub team_b: TeamCode,
    pub config: MatchConfig,
    pub rng: MatchRngState,
    pub status: MatchStatus,
    pub toss: Option<TossResult>,
    pub innings: Vec<Innings>,
    pub target: Option<Target>,
    pub result: Option<MatchResult>,
}

impl MatchSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SimError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SimError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

//! Read-only view of a match, returned after every step.

use serde::{Deserialize, Serialize};

use super::event::BallEvent;
use super::innings::Innings;
use super::match_engine::{MatchStatus, TossResult};
use super::result::{MatchResult, Winner};
use crate::core::{PlayerKey, TeamCode};
use crate::model::Target;
use crate::players::TeamInfo;

/// Match state as seen from outside the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub team_a: TeamCode,
    pub team_b: TeamCode,
    /// Display metadata (names, logo, primary color) from the team records.
    pub team_a_info: TeamInfo,
    pub team_b_info: TeamInfo,

    pub status: MatchStatus,
    /// 0 before the toss, then 1 or 2.
    pub current_innings: u8,
    pub innings: Vec<Innings>,

    pub batting_team: Option<TeamCode>,
    pub bowling_team: Option<TeamCode>,
    pub striker: Option<PlayerKey>,
    pub non_striker: Option<PlayerKey>,
    pub bowler: Option<PlayerKey>,

    pub target: Option<Target>,
    pub is_complete: bool,
    pub result: Option<MatchResult>,
    pub toss: Option<TossResult>,
}

impl MatchSummary {
    /// The innings being played, or the last one played.
    #[must_use]
    pub fn current(&self) -> Option<&Innings> {
        self.innings.last()
    }

    /// The winner, once the match is complete.
    #[must_use]
    pub fn winner(&self) -> Option<&Winner> {
        self.result.as_ref().map(|r| &r.winner)
    }

    /// Every ball of the match, in order.
    pub fn all_balls(&self) -> impl Iterator<Item = &BallEvent> + '_ {
        self.innings.iter().flat_map(|i| i.log.iter())
    }
}

//! Match result.

use serde::{Deserialize, Serialize};

use super::innings::Innings;
use crate::core::{TeamCode, MAX_WICKETS};
use crate::model::Target;

/// Who won.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    Team(TeamCode),
    Tie,
}

/// Margin of victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Margin {
    Runs(u32),
    Wickets(u8),
}

/// Final result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Winner,
    /// `None` for a tie.
    pub margin: Option<Margin>,
    /// e.g. `"CSK won by 6 wickets."`
    pub message: String,
}

impl MatchResult {
    /// Decide the result from both completed innings.
    ///
    /// - chasing side reached the target: won by wickets in hand
    /// - otherwise the higher score wins by the run difference
    /// - equal scores: tie
    #[must_use]
    pub fn decide(first: &Innings, second: &Innings, target: Target) -> Self {
        if target.is_reached(second.score) {
            let wickets = MAX_WICKETS.saturating_sub(second.wickets);
            return Self::won_by(&second.batting_team, Margin::Wickets(wickets));
        }

        match first.score.cmp(&second.score) {
            std::cmp::Ordering::Greater => {
                Self::won_by(&first.batting_team, Margin::Runs(first.score - second.score))
            }
            std::cmp::Ordering::Equal => Self {
                winner: Winner::Tie,
                margin: None,
                message: "Match Tied.".to_string(),
            },
            // Only reachable with an unreachable target.
            std::cmp::Ordering::Less => {
                Self::won_by(&second.batting_team, Margin::Runs(second.score - first.score))
            }
        }
    }

    fn won_by(team: &TeamCode, margin: Margin) -> Self {
        let message = match margin {
            Margin::Runs(runs) => format!("{} won by {} runs.", team, runs),
            Margin::Wickets(wickets) => format!("{} won by {} wickets.", team, wickets),
        };
        Self {
            winner: Winner::Team(team.clone()),
            margin: Some(margin),
            message,
        }
    }

    /// True for a tie.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winner == Winner::Tie
    }
}

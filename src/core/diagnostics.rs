//! Non-fatal diagnostics.
//!
//! The engine never aborts on bad input data. It substitutes a safe default
//! and records a `Diagnostic` here instead. Callers inspect or drain the
//! channel; each entry is also emitted as a `tracing` warning.

use serde::{Deserialize, Serialize};

use super::ids::{PlayerKey, TeamCode};

/// Which rotation tier produced a bowler when the normal phase list could not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationFallback {
    /// Scored the full bowler list with random tie-breaking.
    FullList,
    /// Every bowler was capped; picked uniformly at random.
    Uniform,
    /// No bowlers listed; kept the previous bowler.
    PreviousBowler,
}

/// A recoverable data or model problem.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Roster entry was blank and skipped.
    BlankRosterEntry { team: TeamCode },

    /// Player listed more than once; later entries skipped.
    DuplicateRosterEntry { team: TeamCode, player: PlayerKey },

    /// No statistics found; a placeholder profile was used.
    UnknownPlayer { team: TeamCode, player: PlayerKey },

    /// Statistics could not be read; a placeholder profile was used.
    MalformedStats {
        team: TeamCode,
        player: PlayerKey,
        reason: String,
    },

    /// Too few recognised bowlers; part-timers added to the bowling pool.
    PartTimeBowlers { team: TeamCode, added: Vec<PlayerKey> },

    /// The run distribution had no positive weight.
    DegenerateRunDistribution { batsman: PlayerKey, bowler: PlayerKey },

    /// The dismissal-type distribution had no positive weight.
    DegenerateDismissalDistribution { batsman: PlayerKey, bowler: PlayerKey },

    /// Bowler rotation fell back past the phase list.
    RotationFallback {
        team: TeamCode,
        over: u32,
        tier: RotationFallback,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::BlankRosterEntry { team } => {
                write!(f, "skipping empty player key for team {}", team)
            }
            Diagnostic::DuplicateRosterEntry { team, player } => {
                write!(f, "player {} listed twice for team {}, skipping repeat", player, team)
            }
            Diagnostic::UnknownPlayer { team, player } => {
                write!(f, "player {} not found for team {}, using placeholder", player, team)
            }
            Diagnostic::MalformedStats { team, player, reason } => write!(
                f,
                "stats for {} (team {}) unreadable: {}, using placeholder",
                player, team, reason
            ),
            Diagnostic::PartTimeBowlers { team, added } => {
                write!(f, "team {} short of bowlers, added {} part-timers", team, added.len())
            }
            Diagnostic::DegenerateRunDistribution { batsman, bowler } => write!(
                f,
                "run distribution sum zero for {} vs {}, using fallback",
                batsman, bowler
            ),
            Diagnostic::DegenerateDismissalDistribution { batsman, bowler } => write!(
                f,
                "dismissal distribution sum zero for {} vs {}, using fallback 'bowled'",
                batsman, bowler
            ),
            Diagnostic::RotationFallback { team, over, tier } => {
                write!(f, "team {} over {}: bowler rotation fell back to {:?}", team, over + 1, tier)
            }
        }
    }
}

/// Collected diagnostics, in the order they were raised.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and emit it as a warning.
    pub fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "simulation diagnostic");
        self.entries.push(diagnostic);
    }

    /// All diagnostics so far.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Remove and return all diagnostics.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every entry from another channel.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }
}

//! Innings phases.

use serde::{Deserialize, Serialize};

use crate::core::{BALLS_PER_OVER, DEATH_OVERS_START, MIDDLE_OVERS_START};

/// Stage of an innings, by over index.
///
/// - Powerplay: overs 0-5
/// - Middle: overs 6-16
/// - Death: overs 17-19
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Powerplay,
    Middle,
    Death,
}

impl Phase {
    /// Phase of the over with this index (0-based).
    #[must_use]
    pub fn from_over(over: u32) -> Self {
        if over < MIDDLE_OVERS_START {
            Phase::Powerplay
        } else if over < DEATH_OVERS_START {
            Phase::Middle
        } else {
            Phase::Death
        }
    }

    /// Phase after this many legal balls have been bowled.
    #[must_use]
    pub fn from_legal_balls(legal_balls: u32) -> Self {
        Self::from_over(legal_balls / BALLS_PER_OVER)
    }

    /// Short name, as used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Powerplay => "powerplay",
            Phase::Middle => "middle",
            Phase::Death => "death",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

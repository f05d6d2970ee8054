//! Error types.
//!
//! `SimError` covers the fatal cases only: a match that cannot be built,
//! stepped, or restored. Recoverable data problems (unknown players, bad
//! probability inputs, rotation fallbacks) are reported as diagnostics.

use thiserror::Error;

use super::ids::TeamCode;

/// Fatal simulation error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown team: {0}")]
    UnknownTeam(TeamCode),

    #[error("player list for {0} is empty or missing")]
    EmptyRoster(TeamCode),

    #[error("a match needs two different teams, got {0} twice")]
    SameTeam(TeamCode),

    #[error("pitch factor {name} must be positive and finite, got {value}")]
    InvalidPitchFactor { name: &'static str, value: f64 },

    #[error("the toss has not been performed")]
    TossNotPerformed,

    #[error("the toss has already been performed")]
    TossAlreadyPerformed,

    #[error("snapshot is for {expected_a} vs {expected_b}, not {found_a} vs {found_b}")]
    SnapshotMismatch {
        expected_a: TeamCode,
        expected_b: TeamCode,
        found_a: TeamCode,
        found_b: TeamCode,
    },

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("roster data error: {0}")]
    RosterData(#[from] serde_json::Error),

    #[error("match did not finish within {0} steps")]
    StepLimit(usize),
}

/// Result of looking up a player's raw statistics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("player not found")]
    NotFound,

    #[error("malformed statistics: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SimError::EmptyRoster(TeamCode::new("csk"));
        assert_eq!(err.to_string(), "player list for CSK is empty or missing");

        let err = SimError::InvalidPitchFactor { name: "spin", value: 0.0 };
        assert!(err.to_string().contains("spin"));

        assert_eq!(LookupError::NotFound.to_string(), "player not found");
    }
}

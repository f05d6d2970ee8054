//! Match configuration and fixed Twenty20 rules.
//!
//! Callers configure a match with `MatchConfig` (RNG seed and
//! `PitchFactors`). The format itself (20 overs, 10 wickets, 4 overs per
//! bowler) is fixed and exposed as constants.

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Legal deliveries in an over.
pub const BALLS_PER_OVER: u32 = 6;

/// Overs per innings.
pub const OVERS_PER_INNINGS: u32 = 20;

/// Legal deliveries per innings.
pub const MAX_LEGAL_BALLS: u32 = BALLS_PER_OVER * OVERS_PER_INNINGS;

/// Wickets that close an innings.
pub const MAX_WICKETS: u8 = 10;

/// Legal deliveries a single bowler may bowl in an innings (4 overs).
pub const MAX_BALLS_PER_BOWLER: u32 = 24;

/// First over index of the middle overs.
pub const MIDDLE_OVERS_START: u32 = 6;

/// First over index of the death overs.
pub const DEATH_OVERS_START: u32 = 17;

/// Pitch and ground conditions.
///
/// Each factor is a multiplier around 1.0:
/// - `pace` / `spin` below 1.0 help that style of bowler (more wickets,
///   fewer boundaries), above 1.0 help the batsman.
/// - `outfield` divides boundary weights: larger means fewer boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitchFactors {
    pub pace: f64,
    pub spin: f64,
    pub outfield: f64,
}

impl Default for PitchFactors {
    fn default() -> Self {
        Self {
            pace: 1.0,
            spin: 1.0,
            outfield: 1.0,
        }
    }
}

impl PitchFactors {
    /// Create pitch factors.
    #[must_use]
    pub fn new(pace: f64, spin: f64, outfield: f64) -> Self {
        Self { pace, spin, outfield }
    }

    /// Set the pace factor.
    #[must_use]
    pub fn with_pace(mut self, pace: f64) -> Self {
        self.pace = pace;
        self
    }

    /// Set the spin factor.
    #[must_use]
    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    /// Set the outfield factor.
    #[must_use]
    pub fn with_outfield(mut self, outfield: f64) -> Self {
        self.outfield = outfield;
        self
    }

    /// Check every factor is positive and finite.
    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in [("pace", self.pace), ("spin", self.spin), ("outfield", self.outfield)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidPitchFactor { name, value });
            }
        }
        Ok(())
    }
}

/// Match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Seed for the match RNG.
    /// Same seed and rosters produce the same match, ball for ball.
    pub seed: u64,

    /// Pitch and ground conditions.
    pub pitch: PitchFactors,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            pitch: PitchFactors::default(),
        }
    }
}

impl MatchConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with custom pitch factors.
    #[must_use]
    pub fn with_pitch(mut self, pitch: PitchFactors) -> Self {
        self.pitch = pitch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_constants() {
        assert_eq!(MAX_LEGAL_BALLS, 120);
        assert_eq!(MAX_BALLS_PER_BOWLER / BALLS_PER_OVER, 4);
        assert!(MIDDLE_OVERS_START < DEATH_OVERS_START);
        assert!(DEATH_OVERS_START < OVERS_PER_INNINGS);
    }

    #[test]
    fn test_pitch_default() {
        let pitch = PitchFactors::default();
        assert_eq!(pitch, PitchFactors::new(1.0, 1.0, 1.0));
        assert!(pitch.validate().is_ok());
    }

    #[test]
    fn test_pitch_builder() {
        let pitch = PitchFactors::default().with_pace(0.8).with_spin(1.2).with_outfield(1.1);
        assert_eq!(pitch.pace, 0.8);
        assert_eq!(pitch.spin, 1.2);
        assert_eq!(pitch.outfield, 1.1);
    }

    #[test]
    fn test_pitch_validation() {
        assert!(PitchFactors::default().with_outfield(0.0).validate().is_err());
        assert!(PitchFactors::default().with_pace(-1.0).validate().is_err());
        assert!(PitchFactors::default().with_spin(f64::NAN).validate().is_err());
        assert!(PitchFactors::default().with_spin(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_match_config() {
        let config = MatchConfig::default()
            .with_seed(7)
            .with_pitch(PitchFactors::default().with_spin(0.9));

        assert_eq!(config.seed, 7);
        assert_eq!(config.pitch.spin, 0.9);
    }

    #[test]
    fn test_match_config_serde() {
        let config = MatchConfig::default().with_seed(123);
        let json = serde_json::to_string(&config).unwrap();
        let back: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

//! What the model needs to know about the state of an innings.

use serde::{Deserialize, Serialize};

use crate::core::MAX_LEGAL_BALLS;

/// Second-innings target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// Runs needed to win.
    Runs(u32),
    /// First innings scored nothing: no run chase is possible.
    Unreachable,
}

impl Target {
    /// Target set by a first-innings score.
    #[must_use]
    pub fn from_first_innings(score: u32) -> Self {
        if score > 0 {
            Target::Runs(score + 1)
        } else {
            Target::Unreachable
        }
    }

    /// True once `score` reaches the target.
    #[must_use]
    pub fn is_reached(self, score: u32) -> bool {
        match self {
            Target::Runs(runs) => score >= runs,
            Target::Unreachable => false,
        }
    }

    /// Runs as a number, if there is one.
    #[must_use]
    pub fn runs(self) -> Option<u32> {
        match self {
            Target::Runs(runs) => Some(runs),
            Target::Unreachable => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Runs(runs) => write!(f, "{}", runs),
            Target::Unreachable => f.write_str("unreachable"),
        }
    }
}

/// Innings state seen by the probability model for one delivery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeliveryContext {
    /// 1 or 2.
    pub innings: u8,
    pub legal_balls: u32,
    pub score: u32,
    pub wickets: u8,
    /// Set in the second innings only.
    pub target: Option<Target>,
    /// Legal balls the striker has faced so far.
    pub batsman_balls: u32,
    /// Runs the striker has scored so far.
    pub batsman_runs: u32,
}

impl DeliveryContext {
    /// Context for the first ball of an innings.
    #[must_use]
    pub fn new(innings: u8) -> Self {
        Self {
            innings,
            legal_balls: 0,
            score: 0,
            wickets: 0,
            target: None,
            batsman_balls: 0,
            batsman_runs: 0,
        }
    }

    /// Legal balls left in the innings.
    #[must_use]
    pub fn balls_remaining(&self) -> u32 {
        MAX_LEGAL_BALLS.saturating_sub(self.legal_balls)
    }

    /// Runs per over needed to reach the target, when a chase is on.
    ///
    /// `None` outside the second innings, with an unreachable target, with
    /// no balls left, or when the target is already reached.
    #[must_use]
    pub fn required_rate(&self) -> Option<f64> {
        if self.innings != 2 {
            return None;
        }
        let target = self.target?.runs()?;
        let balls = self.balls_remaining();
        let needed = target.saturating_sub(self.score);
        if balls == 0 || needed == 0 {
            return None;
        }
        Some(f64::from(needed) / f64::from(balls) * 6.0)
    }

    /// The striker's runs per ball so far, 0 before facing.
    #[must_use]
    pub fn batsman_strike_rate(&self) -> f64 {
        if self.batsman_balls == 0 {
            0.0
        } else {
            f64::from(self.batsman_runs) / f64::from(self.batsman_balls)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_from_first_innings() {
        assert_eq!(Target::from_first_innings(150), Target::Runs(151));
        assert_eq!(Target::from_first_innings(0), Target::Unreachable);
        assert!(Target::Runs(151).is_reached(151));
        assert!(!Target::Runs(151).is_reached(150));
        assert!(!Target::Unreachable.is_reached(500));
    }

    #[test]
    fn test_required_rate() {
        let mut ctx = DeliveryContext::new(2);
        ctx.target = Some(Target::Runs(121));
        ctx.legal_balls = 60;
        ctx.score = 61;
        assert_eq!(ctx.required_rate(), Some(6.0));

        ctx.score = 121;
        assert_eq!(ctx.required_rate(), None);

        ctx.target = Some(Target::Unreachable);
        assert_eq!(ctx.required_rate(), None);

        assert_eq!(DeliveryContext::new(1).required_rate(), None);
    }

    #[test]
    fn test_strike_rate() {
        let mut ctx = DeliveryContext::new(1);
        assert_eq!(ctx.batsman_strike_rate(), 0.0);
        ctx.batsman_balls = 20;
        ctx.batsman_runs = 30;
        assert_eq!(ctx.batsman_strike_rate(), 1.5);
    }
}

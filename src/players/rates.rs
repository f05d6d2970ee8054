//! Outcome labels and fixed-size rate vectors.
//!
//! Rate vectors are arrays indexed by an enum, never string-keyed maps:
//! `RunRates` by `RunOutcome`, `DismissalRates` by `DismissalKind`,
//! `OverFrequencies` by over number 0-19.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::core::OVERS_PER_INNINGS;

/// Runs off the bat from one delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Dot,
    One,
    Two,
    Three,
    Four,
    Six,
}

impl RunOutcome {
    /// All outcomes, in sampling order.
    pub const ALL: [RunOutcome; 6] = [
        RunOutcome::Dot,
        RunOutcome::One,
        RunOutcome::Two,
        RunOutcome::Three,
        RunOutcome::Four,
        RunOutcome::Six,
    ];

    /// Runs scored.
    #[must_use]
    pub const fn runs(self) -> u32 {
        match self {
            RunOutcome::Dot => 0,
            RunOutcome::One => 1,
            RunOutcome::Two => 2,
            RunOutcome::Three => 3,
            RunOutcome::Four => 4,
            RunOutcome::Six => 6,
        }
    }

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for fours and sixes.
    #[must_use]
    pub const fn is_boundary(self) -> bool {
        matches!(self, RunOutcome::Four | RunOutcome::Six)
    }

    /// Outcome for a run value, if it is one of 0, 1, 2, 3, 4, 6.
    #[must_use]
    pub fn from_runs(runs: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.runs() == runs)
    }

    /// Parse a histogram key such as `"4"`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        key.trim().parse::<u32>().ok().and_then(Self::from_runs)
    }
}

/// How a batsman was dismissed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DismissalKind {
    Bowled,
    Caught,
    RunOut,
    Lbw,
    Stumped,
    HitWicket,
}

impl DismissalKind {
    /// All kinds, in sampling order.
    pub const ALL: [DismissalKind; 6] = [
        DismissalKind::Bowled,
        DismissalKind::Caught,
        DismissalKind::RunOut,
        DismissalKind::Lbw,
        DismissalKind::Stumped,
        DismissalKind::HitWicket,
    ];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the bowler is credited with the wicket.
    #[must_use]
    pub const fn bowler_credit(self) -> bool {
        !matches!(self, DismissalKind::RunOut)
    }

    /// Parse a histogram key (`"bowled"`, `"runOut"`, `"hitwicket"`, ...).
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let normalized: String = key
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "bowled" => Some(DismissalKind::Bowled),
            "caught" => Some(DismissalKind::Caught),
            "runout" => Some(DismissalKind::RunOut),
            "lbw" => Some(DismissalKind::Lbw),
            "stumped" => Some(DismissalKind::Stumped),
            "hitwicket" => Some(DismissalKind::HitWicket),
            _ => None,
        }
    }

    /// Lower-case description used in commentary.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::RunOut => "run out",
            DismissalKind::Lbw => "lbw",
            DismissalKind::Stumped => "stumped",
            DismissalKind::HitWicket => "hit wicket",
        }
    }
}

impl std::fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Per-outcome run rates (or weights).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRates(pub [f64; 6]);

impl RunRates {
    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Iterate `(outcome, rate)` pairs in sampling order.
    pub fn iter(&self) -> impl Iterator<Item = (RunOutcome, f64)> + '_ {
        RunOutcome::ALL.into_iter().map(move |o| (o, self.0[o.index()]))
    }
}

impl Index<RunOutcome> for RunRates {
    type Output = f64;

    fn index(&self, outcome: RunOutcome) -> &f64 {
        &self.0[outcome.index()]
    }
}

impl IndexMut<RunOutcome> for RunRates {
    fn index_mut(&mut self, outcome: RunOutcome) -> &mut f64 {
        &mut self.0[outcome.index()]
    }
}

/// Per-kind dismissal rates (or weights).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DismissalRates(pub [f64; 6]);

impl DismissalRates {
    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Iterate `(kind, rate)` pairs in sampling order.
    pub fn iter(&self) -> impl Iterator<Item = (DismissalKind, f64)> + '_ {
        DismissalKind::ALL.into_iter().map(move |k| (k, self.0[k.index()]))
    }
}

impl Index<DismissalKind> for DismissalRates {
    type Output = f64;

    fn index(&self, kind: DismissalKind) -> &f64 {
        &self.0[kind.index()]
    }
}

impl IndexMut<DismissalKind> for DismissalRates {
    fn index_mut(&mut self, kind: DismissalKind) -> &mut f64 {
        &mut self.0[kind.index()]
    }
}

/// How often a bowler has historically bowled each over of an innings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverFrequencies(pub [f64; OVERS_PER_INNINGS as usize]);

impl Default for OverFrequencies {
    fn default() -> Self {
        Self([0.0; OVERS_PER_INNINGS as usize])
    }
}

impl OverFrequencies {
    /// Same weight for every over.
    #[must_use]
    pub fn uniform(weight: f64) -> Self {
        Self([weight; OVERS_PER_INNINGS as usize])
    }

    /// Weight for one over, 0 if out of range.
    #[must_use]
    pub fn get(&self, over: usize) -> f64 {
        self.0.get(over).copied().unwrap_or(0.0)
    }

    /// Sum of weights over a range of over indices.
    #[must_use]
    pub fn sum_range(&self, overs: std::ops::Range<u32>) -> f64 {
        overs.map(|o| self.get(o as usize)).sum()
    }
}

//! Innings state and per-player trackers.
//!
//! An `Innings` owns everything that changes ball to ball: score, wickets,
//! ball counts, the batsmen at the crease, the current bowler, the ball log
//! and the batting / bowling trackers.
//!
//! ## Invariants
//!
//! - `legal_balls_bowled` grows by exactly 1 per legal delivery, at most 120
//! - `balls_bowled` counts every delivery, legal or not
//! - `score` never decreases and equals the sum of `total_runs` in `log`
//! - `wickets` is at most 10
//! - `striker` and `non_striker` are distinct, not-out players

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::{BallEvent, WicketDetail};
use crate::core::{PlayerKey, TeamCode, BALLS_PER_OVER, MAX_LEGAL_BALLS, MAX_WICKETS};
use crate::model::{DeliveryContext, Target};
use crate::players::Team;

/// A batsman's state in the innings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattingStatus {
    DidNotBat,
    NotOut,
    Out(WicketDetail),
}

/// Batting figures for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingTracker {
    pub player: PlayerKey,
    /// Position in the batting order, from 1.
    pub position: usize,
    pub runs: u32,
    /// Legal balls faced.
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub status: BattingStatus,
}

impl BattingTracker {
    fn new(player: PlayerKey, position: usize) -> Self {
        Self {
            player,
            position,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            status: BattingStatus::DidNotBat,
        }
    }

    /// Runs per 100 balls, 0 before facing.
    #[must_use]
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            f64::from(self.runs) * 100.0 / f64::from(self.balls)
        }
    }

    /// True once dismissed.
    #[must_use]
    pub fn is_out(&self) -> bool {
        matches!(self.status, BattingStatus::Out(_))
    }
}

/// Bowling figures for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlingTracker {
    pub player: PlayerKey,
    /// Legal balls bowled.
    pub balls: u32,
    /// Runs conceded, extras included.
    pub runs_conceded: u32,
    /// Wickets credited to the bowler (run-outs excluded).
    pub wickets: u32,
    pub maidens: u32,
    pub dots: u32,
    pub wides: u32,
    pub no_balls: u32,
}

/// Economy used to rank bowlers who have not bowled yet.
pub const UNUSED_BOWLER_ECONOMY: f64 = 99.0;

impl BowlingTracker {
    fn new(player: PlayerKey) -> Self {
        Self {
            player,
            balls: 0,
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
            dots: 0,
            wides: 0,
            no_balls: 0,
        }
    }

    /// Runs conceded per over, 0 before bowling.
    #[must_use]
    pub fn economy(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            f64::from(self.runs_conceded) / (f64::from(self.balls) / f64::from(BALLS_PER_OVER))
        }
    }

    /// Economy for ranking bowlers: a bowler with no balls yet ranks as
    /// `UNUSED_BOWLER_ECONOMY`.
    #[must_use]
    pub fn rotation_economy(&self) -> f64 {
        if self.balls == 0 {
            UNUSED_BOWLER_ECONOMY
        } else {
            self.economy()
        }
    }

    /// Overs in `"overs.balls"` notation, e.g. `"3.2"`.
    #[must_use]
    pub fn overs(&self) -> String {
        format!("{}.{}", self.balls / BALLS_PER_OVER, self.balls % BALLS_PER_OVER)
    }
}

/// Extras conceded in the innings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
}

impl Extras {
    /// All extras.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls
    }
}

/// One innings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Innings {
    /// 1 or 2.
    pub number: u8,
    pub batting_team: TeamCode,
    pub bowling_team: TeamCode,

    // === Totals ===
    pub score: u32,
    pub wickets: u8,
    /// Every delivery, legal or not.
    pub balls_bowled: u32,
    pub legal_balls_bowled: u32,
    pub overs_completed: u32,
    pub extras: Extras,

    // === At the crease ===
    pub striker: Option<PlayerKey>,
    pub non_striker: Option<PlayerKey>,
    pub bowler: Option<PlayerKey>,
    /// Bowler of the last completed over.
    pub previous_bowler: Option<PlayerKey>,

    // === Records ===
    pub log: Vector<BallEvent>,
    /// In batting order.
    pub batting: Vec<BattingTracker>,
    pub bowling: Vec<BowlingTracker>,

    batting_order: Vec<PlayerKey>,
    next_batsman: usize,
    /// Runs conceded in the over in progress.
    over_runs: u32,
}

impl Innings {
    /// Set up an innings: trackers for both sides and the opening pair.
    ///
    /// The opening bowler is chosen separately, by bowler rotation.
    #[must_use]
    pub fn new(number: u8, batting: &Team, bowling: &Team) -> Self {
        let mut innings = Self {
            number,
            batting_team: batting.code.clone(),
            bowling_team: bowling.code.clone(),
            score: 0,
            wickets: 0,
            balls_bowled: 0,
            legal_balls_bowled: 0,
            overs_completed: 0,
            extras: Extras::default(),
            striker: None,
            non_striker: None,
            bowler: None,
            previous_bowler: None,
            log: Vector::new(),
            batting: batting
                .batting_order
                .iter()
                .enumerate()
                .map(|(i, p)| BattingTracker::new(p.clone(), i + 1))
                .collect(),
            bowling: bowling
                .bowlers
                .iter()
                .map(|p| BowlingTracker::new(p.clone()))
                .collect(),
            batting_order: batting.batting_order.clone(),
            next_batsman: 0,
            over_runs: 0,
        };

        innings.striker = innings.next_batsman_in();
        innings.non_striker = innings.next_batsman_in();
        innings
    }

    /// Bring in the next batsman from the order, marking them not out.
    /// `None` once the order is exhausted.
    pub(crate) fn next_batsman_in(&mut self) -> Option<PlayerKey> {
        let player = self.batting_order.get(self.next_batsman)?.clone();
        self.next_batsman += 1;
        self.batting_tracker_mut(&player).status = BattingStatus::NotOut;
        Some(player)
    }

    /// Batting figures for a player.
    #[must_use]
    pub fn batting_tracker(&self, player: &PlayerKey) -> Option<&BattingTracker> {
        self.batting.iter().find(|t| &t.player == player)
    }

    /// Bowling figures for a player.
    #[must_use]
    pub fn bowling_tracker(&self, player: &PlayerKey) -> Option<&BowlingTracker> {
        self.bowling.iter().find(|t| &t.player == player)
    }

    /// Legal balls a player has bowled, 0 if they have no tracker.
    #[must_use]
    pub fn balls_by(&self, bowler: &PlayerKey) -> u32 {
        self.bowling_tracker(bowler).map_or(0, |t| t.balls)
    }

    pub(crate) fn batting_tracker_mut(&mut self, player: &PlayerKey) -> &mut BattingTracker {
        let idx = match self.batting.iter().position(|t| &t.player == player) {
            Some(idx) => idx,
            None => {
                let position = self.batting.len() + 1;
                self.batting.push(BattingTracker::new(player.clone(), position));
                self.batting.len() - 1
            }
        };
        &mut self.batting[idx]
    }

    pub(crate) fn bowling_tracker_mut(&mut self, player: &PlayerKey) -> &mut BowlingTracker {
        let idx = match self.bowling.iter().position(|t| &t.player == player) {
            Some(idx) => idx,
            None => {
                self.bowling.push(BowlingTracker::new(player.clone()));
                self.bowling.len() - 1
            }
        };
        &mut self.bowling[idx]
    }

    pub(crate) fn add_over_runs(&mut self, runs: u32) {
        self.over_runs += runs;
    }

    /// Close the over if the last legal ball completed it: count the
    /// over, credit a maiden, and reset the over's runs.
    ///
    /// Returns true if an over was closed.
    pub(crate) fn close_over_if_complete(&mut self, last: &BallEvent) -> bool {
        if !last.completes_over() {
            return false;
        }
        self.overs_completed += 1;
        if self.over_runs == 0 {
            self.bowling_tracker_mut(&last.bowler).maidens += 1;
        }
        self.over_runs = 0;
        true
    }

    /// Swap striker and non-striker. A lone batsman keeps strike.
    pub(crate) fn swap_strike(&mut self) {
        if self.non_striker.is_some() {
            std::mem::swap(&mut self.striker, &mut self.non_striker);
        }
    }

    /// Whether the innings is over.
    ///
    /// All out, no batsman left to take strike, 120 legal balls, or (second
    /// innings) the target reached.
    #[must_use]
    pub fn is_complete(&self, target: Option<Target>) -> bool {
        self.wickets >= MAX_WICKETS
            || self.striker.is_none()
            || self.legal_balls_bowled >= MAX_LEGAL_BALLS
            || target.is_some_and(|t| t.is_reached(self.score))
    }

    /// Model context for the next delivery to the current striker.
    #[must_use]
    pub fn delivery_context(&self, target: Option<Target>) -> DeliveryContext {
        let (batsman_balls, batsman_runs) = self
            .striker
            .as_ref()
            .and_then(|s| self.batting_tracker(s))
            .map_or((0, 0), |t| (t.balls, t.runs));

        DeliveryContext {
            innings: self.number,
            legal_balls: self.legal_balls_bowled,
            score: self.score,
            wickets: self.wickets,
            target,
            batsman_balls,
            batsman_runs,
        }
    }

    /// Overs bowled in `"overs.balls"` notation.
    #[must_use]
    pub fn overs(&self) -> String {
        format!(
            "{}.{}",
            self.legal_balls_bowled / BALLS_PER_OVER,
            self.legal_balls_bowled % BALLS_PER_OVER
        )
    }

    /// Runs per over so far.
    #[must_use]
    pub fn run_rate(&self) -> f64 {
        if self.legal_balls_bowled == 0 {
            0.0
        } else {
            f64::from(self.score) * f64::from(BALLS_PER_OVER) / f64::from(self.legal_balls_bowled)
        }
    }
}

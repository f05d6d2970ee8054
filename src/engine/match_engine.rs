//! The match engine: toss, ball-by-ball stepping, innings lifecycle.
//!
//! ## Lifecycle
//!
//! ```text
//! AwaitingToss --perform_toss--> Innings1 --innings over--> Innings2 --innings over--> Complete
//! ```
//!
//! An innings ends after any ball that leaves it all out, without a
//! batsman to take strike, at 120 legal balls, or (second innings) with
//! the target reached. The second innings is batted by the side that
//! bowled first.
//!
//! Every random draw comes from the engine's single `MatchRng`, so the
//! same seed and rosters replay the same match ball for ball, and a
//! snapshot resumes exactly where it left off.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::ball::sample_outcome;
use super::event::BallEvent;
use super::innings::Innings;
use super::result::MatchResult;
use super::rotation::select_bowler;
use super::snapshot::MatchSnapshot;
use super::summary::MatchSummary;
use crate::core::{
    Diagnostic, Diagnostics, MatchConfig, MatchRng, SimError, TeamCode, BALLS_PER_OVER,
};
use crate::model::{ProbabilityModel, Target};
use crate::players::{PlayerProfile, RosterProvider, Team};

/// Where the match is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    AwaitingToss,
    Innings1,
    Innings2,
    Complete,
}

/// What the toss winner chose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TossDecision {
    Bat,
    Field,
}

impl std::fmt::Display for TossDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TossDecision::Bat => f.write_str("bat"),
            TossDecision::Field => f.write_str("field"),
        }
    }
}

/// Outcome of the toss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossResult {
    pub winner: TeamCode,
    pub decision: TossDecision,
    /// e.g. `"CSK won the toss and chose to bat."`
    pub message: String,
}

/// What a single step produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepEvent {
    /// A ball was bowled.
    Delivery(BallEvent),
    /// The innings was closed without a ball being bowled.
    InningsClosed { commentary: String },
    /// The match was already over; nothing changed.
    GameOver { commentary: String },
}

impl StepEvent {
    /// Commentary text for the step.
    #[must_use]
    pub fn commentary(&self) -> &str {
        match self {
            StepEvent::Delivery(event) => &event.commentary,
            StepEvent::InningsClosed { commentary } | StepEvent::GameOver { commentary } => commentary,
        }
    }

    /// The ball bowled, if any.
    #[must_use]
    pub fn ball(&self) -> Option<&BallEvent> {
        match self {
            StepEvent::Delivery(event) => Some(event),
            _ => None,
        }
    }
}

/// Result of `MatchEngine::simulate_one_ball`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub summary: MatchSummary,
    pub event: StepEvent,
}

/// A Twenty20 match, simulated one ball at a time.
///
/// ## Example
///
/// ```
/// use cricket_sim::core::MatchConfig;
/// use cricket_sim::engine::MatchEngine;
/// use cricket_sim::players::{InMemoryRoster, TeamRecord};
///
/// let roster = InMemoryRoster::new()
///     .with_team("csk", TeamRecord::new(["C1", "C2", "C3", "C4", "C5", "C6"]))
///     .with_team("mi", TeamRecord::new(["M1", "M2", "M3", "M4", "M5", "M6"]));
///
/// let mut engine = MatchEngine::new(&roster, "CSK", "MI", MatchConfig::default()).unwrap();
/// engine.perform_toss().unwrap();
/// while !engine.is_complete() {
///     engine.simulate_one_ball().unwrap();
/// }
/// assert!(engine.result().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct MatchEngine {
    teams: [Team; 2],
    config: MatchConfig,
    model: ProbabilityModel,
    rng: MatchRng,

    // === Match state ===
    status: MatchStatus,
    toss: Option<TossResult>,
    innings: Vec<Innings>,
    target: Option<Target>,
    result: Option<MatchResult>,

    diagnostics: Diagnostics,
}

impl MatchEngine {
    /// Create a match between two teams.
    ///
    /// Team codes are case-insensitive. Fails if the pitch factors are not
    /// positive, both codes name the same team, or a team is unknown or
    /// has no players. Unknown players only produce diagnostics.
    pub fn new(
        provider: &dyn RosterProvider,
        team_a: impl AsRef<str>,
        team_b: impl AsRef<str>,
        config: MatchConfig,
    ) -> Result<Self, SimError> {
        config.pitch.validate()?;

        let code_a = TeamCode::new(team_a);
        let code_b = TeamCode::new(team_b);
        if code_a == code_b {
            return Err(SimError::SameTeam(code_a));
        }

        let mut diagnostics = Diagnostics::new();
        let teams = [
            Team::load(provider, &code_a, &mut diagnostics)?,
            Team::load(provider, &code_b, &mut diagnostics)?,
        ];

        debug!(team_a = %code_a, team_b = %code_b, seed = config.seed, "match created");

        Ok(Self {
            teams,
            model: ProbabilityModel::new(config.pitch),
            rng: MatchRng::new(config.seed),
            config,
            status: MatchStatus::AwaitingToss,
            toss: None,
            innings: Vec::with_capacity(2),
            target: None,
            result: None,
            diagnostics,
        })
    }

    /// Resume a match from a snapshot, reloading both teams from `provider`.
    pub fn resume(provider: &dyn RosterProvider, snapshot: MatchSnapshot) -> Result<Self, SimError> {
        let mut engine = Self::new(provider, snapshot.team_a.as_str(), snapshot.team_b.as_str(), snapshot.config)?;
        engine.rng = MatchRng::from_state(&snapshot.rng);
        engine.status = snapshot.status;
        engine.toss = snapshot.toss;
        engine.innings = snapshot.innings;
        engine.target = snapshot.target;
        engine.result = snapshot.result;

        debug!(status = ?engine.status, balls = engine.balls_played(), "match resumed");
        Ok(engine)
    }

    /// Resume a snapshot, checking it belongs to the given teams.
    pub fn resume_for(
        provider: &dyn RosterProvider,
        team_a: impl AsRef<str>,
        team_b: impl AsRef<str>,
        snapshot: MatchSnapshot,
    ) -> Result<Self, SimError> {
        let expected_a = TeamCode::new(team_a);
        let expected_b = TeamCode::new(team_b);
        if snapshot.team_a != expected_a || snapshot.team_b != expected_b {
            return Err(SimError::SnapshotMismatch {
                expected_a,
                expected_b,
                found_a: snapshot.team_a,
                found_b: snapshot.team_b,
            });
        }
        Self::resume(provider, snapshot)
    }

    /// Capture the engine state.
    #[must_use]
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            team_a: self.teams[0].code.clone(),
            team_b: self.teams[1].code.clone(),
            config: self.config.clone(),
            rng: self.rng.state(),
            status: self.status,
            toss: self.toss.clone(),
            innings: self.innings.clone(),
            target: self.target,
            result: self.result.clone(),
        }
    }

    /// Toss: pick a winner and a decision, then set up the first innings.
    pub fn perform_toss(&mut self) -> Result<TossResult, SimError> {
        if self.status != MatchStatus::AwaitingToss {
            return Err(SimError::TossAlreadyPerformed);
        }

        let winner_idx = self.rng.gen_range_usize(0..2);
        let decision = if self.rng.gen_range_usize(0..2) == 0 {
            TossDecision::Bat
        } else {
            TossDecision::Field
        };
        let winner = self.teams[winner_idx].code.clone();
        let batting_idx = match decision {
            TossDecision::Bat => winner_idx,
            TossDecision::Field => 1 - winner_idx,
        };

        let toss = TossResult {
            message: format!("{} won the toss and chose to {}.", winner, decision),
            winner,
            decision,
        };
        info!(message = %toss.message, "toss");

        self.toss = Some(toss.clone());
        self.start_innings(batting_idx);
        self.status = MatchStatus::Innings1;
        Ok(toss)
    }

    /// Bowl one ball.
    ///
    /// Fails only before the toss. Once the match is complete, returns
    /// the final summary with a `GameOver` event and changes nothing.
    pub fn simulate_one_ball(&mut self) -> Result<StepOutcome, SimError> {
        let event = match self.status {
            MatchStatus::AwaitingToss => return Err(SimError::TossNotPerformed),
            MatchStatus::Complete => {
                let message = self.result.as_ref().map_or("", |r| r.message.as_str());
                StepEvent::GameOver {
                    commentary: format!("Game is over. {}", message),
                }
            }
            MatchStatus::Innings1 | MatchStatus::Innings2 => self.play_ball(),
        };

        Ok(StepOutcome {
            summary: self.summary(),
            event,
        })
    }

    fn play_ball(&mut self) -> StepEvent {
        let target = self.target;
        let Some(innings) = self.innings.last_mut() else {
            return StepEvent::InningsClosed {
                commentary: "No innings in progress.".to_string(),
            };
        };
        let batting = team_by_code(&self.teams, &innings.batting_team);
        let bowling = team_by_code(&self.teams, &innings.bowling_team);

        let Some(striker) = innings.striker.clone() else {
            return self.close_innings("Innings ended: No batsman available.".to_string());
        };

        if innings.bowler.is_none() {
            innings.bowler = select_bowler(bowling, innings, &mut self.rng, &mut self.diagnostics);
        }
        let Some(bowler) = innings.bowler.clone() else {
            let commentary = format!("Innings ended: No bowler available for {}.", innings.bowling_team);
            return self.close_innings(commentary);
        };

        let batsman_profile = profile_or_placeholder(batting, &striker);
        let bowler_profile = profile_or_placeholder(bowling, &bowler);

        let ctx = innings.delivery_context(target);
        let dist = self.model.distribution(
            &batsman_profile,
            &bowler_profile,
            &ctx,
            &mut self.rng,
            &mut self.diagnostics,
        );
        let outcome = sample_outcome(&dist, &bowler, &bowling.players, &mut self.rng);
        let event = innings.record_delivery(&striker, &bowler, outcome);
        let over_closed = innings.close_over_if_complete(&event);

        trace!(
            innings = event.innings,
            ball = %event.over_label(),
            score = event.score_after,
            wickets = event.wickets_after,
            "{}",
            event.commentary
        );

        if innings.is_complete(target) {
            self.end_innings();
        } else if over_closed {
            innings.swap_strike();
            innings.previous_bowler = Some(bowler);
            innings.bowler = select_bowler(bowling, innings, &mut self.rng, &mut self.diagnostics);
        }

        StepEvent::Delivery(event)
    }

    fn close_innings(&mut self, commentary: String) -> StepEvent {
        self.end_innings();
        StepEvent::InningsClosed { commentary }
    }

    fn start_innings(&mut self, batting_idx: usize) {
        let number = if self.innings.is_empty() { 1 } else { 2 };
        let batting = &self.teams[batting_idx];
        let bowling = &self.teams[1 - batting_idx];

        let mut innings = Innings::new(number, batting, bowling);
        innings.bowler = select_bowler(bowling, &innings, &mut self.rng, &mut self.diagnostics);

        debug!(
            innings = number,
            batting = %batting.code,
            bowling = %bowling.code,
            target = ?self.target,
            "innings started"
        );
        self.innings.push(innings);
    }

    fn end_innings(&mut self) {
        let Some(innings) = self.innings.last_mut() else {
            return;
        };
        innings.overs_completed = innings.legal_balls_bowled / BALLS_PER_OVER;

        info!(
            innings = innings.number,
            team = %innings.batting_team,
            score = innings.score,
            wickets = innings.wickets,
            overs = %innings.overs(),
            "innings closed"
        );

        match (self.status, self.innings.as_slice()) {
            (MatchStatus::Innings1, [first]) => {
                self.target = Some(Target::from_first_innings(first.score));
                let next_batting = self.team_index(&first.bowling_team);
                self.start_innings(next_batting);
                self.status = MatchStatus::Innings2;
            }
            (_, [first, second]) => {
                let target = self.target.unwrap_or(Target::Unreachable);
                let result = MatchResult::decide(first, second, target);
                info!(result = %result.message, "match complete");
                self.result = Some(result);
                self.status = MatchStatus::Complete;
            }
            _ => {
                self.status = MatchStatus::Complete;
            }
        }
    }

    fn team_index(&self, code: &TeamCode) -> usize {
        self.teams.iter().position(|t| &t.code == code).unwrap_or(0)
    }

    /// Current view of the match.
    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        let current = self.innings.last();
        MatchSummary {
            team_a: self.teams[0].code.clone(),
            team_b: self.teams[1].code.clone(),
            team_a_info: self.teams[0].info.clone(),
            team_b_info: self.teams[1].info.clone(),
            status: self.status,
            current_innings: current.map_or(0, |i| i.number),
            innings: self.innings.clone(),
            batting_team: current.map(|i| i.batting_team.clone()),
            bowling_team: current.map(|i| i.bowling_team.clone()),
            striker: current.and_then(|i| i.striker.clone()),
            non_striker: current.and_then(|i| i.non_striker.clone()),
            bowler: current.and_then(|i| i.bowler.clone()),
            target: self.target,
            is_complete: self.is_complete(),
            result: self.result.clone(),
            toss: self.toss.clone(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == MatchStatus::Complete
    }

    #[must_use]
    pub fn toss(&self) -> Option<&TossResult> {
        self.toss.as_ref()
    }

    /// Innings played or in progress.
    #[must_use]
    pub fn innings(&self) -> &[Innings] {
        &self.innings
    }

    #[must_use]
    pub fn current_innings(&self) -> Option<&Innings> {
        self.innings.last()
    }

    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    #[must_use]
    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The two teams, in construction order.
    #[must_use]
    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    /// Deliveries bowled so far, both innings.
    #[must_use]
    pub fn balls_played(&self) -> usize {
        self.innings.iter().map(|i| i.log.len()).sum()
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.entries()
    }

    /// Drain recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

fn team_by_code<'a>(teams: &'a [Team; 2], code: &TeamCode) -> &'a Team {
    if teams[1].code == *code {
        &teams[1]
    } else {
        &teams[0]
    }
}

fn profile_or_placeholder<'a>(team: &'a Team, player: &crate::core::PlayerKey) -> Cow<'a, PlayerProfile> {
    team.profile(player)
        .map_or_else(|| Cow::Owned(PlayerProfile::placeholder(player)), Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PitchFactors;
    use crate::players::{InMemoryRoster, TeamRecord};

    fn roster() -> InMemoryRoster {
        let a: Vec<String> = (1..=11).map(|i| format!("A{}", i)).collect();
        let b: Vec<String> = (1..=11).map(|i| format!("B{}", i)).collect();
        InMemoryRoster::new()
            .with_team("aaa", TeamRecord::new(a))
            .with_team("bbb", TeamRecord::new(b))
    }

    fn engine(seed: u64) -> MatchEngine {
        MatchEngine::new(&roster(), "AAA", "bbb", MatchConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_construction_errors() {
        let r = roster();
        assert!(matches!(
            MatchEngine::new(&r, "aaa", "AAA", MatchConfig::default()),
            Err(SimError::SameTeam(_))
        ));
        assert!(matches!(
            MatchEngine::new(&r, "aaa", "zzz", MatchConfig::default()),
            Err(SimError::UnknownTeam(_))
        ));
        let bad = MatchConfig::default().with_pitch(PitchFactors::default().with_pace(0.0));
        assert!(matches!(
            MatchEngine::new(&r, "aaa", "bbb", bad),
            Err(SimError::InvalidPitchFactor { name: "pace", .. })
        ));
    }

    #[test]
    fn test_unknown_players_are_diagnostics() {
        let e = engine(1);
        assert_eq!(e.status(), MatchStatus::AwaitingToss);
        // 22 players without statistics.
        let unknown = e
            .diagnostics()
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnknownPlayer { .. }))
            .count();
        assert_eq!(unknown, 22);
    }

    #[test]
    fn test_step_before_toss_fails() {
        let mut e = engine(1);
        assert!(matches!(e.simulate_one_ball(), Err(SimError::TossNotPerformed)));
    }

    #[test]
    fn test_toss_sets_up_first_innings() {
        let mut e = engine(3);
        let toss = e.perform_toss().unwrap();

        assert_eq!(e.status(), MatchStatus::Innings1);
        assert!(toss.message.contains("won the toss and chose to"));
        let innings = e.current_innings().unwrap();
        let expected_batting = match toss.decision {
            TossDecision::Bat => toss.winner.clone(),
            TossDecision::Field => e
                .teams()
                .iter()
                .map(|t| t.code.clone())
                .find(|c| *c != toss.winner)
                .unwrap(),
        };
        assert_eq!(innings.batting_team, expected_batting);
        assert!(innings.striker.is_some());
        assert!(innings.bowler.is_some());

        assert!(matches!(e.perform_toss(), Err(SimError::TossAlreadyPerformed)));
    }

    #[test]
    fn test_full_match_completes() {
        let mut e = engine(11);
        e.perform_toss().unwrap();
        let mut steps = 0;
        while !e.is_complete() {
            e.simulate_one_ball().unwrap();
            steps += 1;
            assert!(steps < 2000);
        }

        let [first, second] = e.innings() else {
            panic!("expected two innings");
        };
        assert_eq!(first.bowling_team, second.batting_team);
        assert_eq!(e.target(), Some(Target::from_first_innings(first.score)));
        assert!(e.result().is_some());

        let before = e.snapshot();
        let step = e.simulate_one_ball().unwrap();
        assert!(matches!(step.event, StepEvent::GameOver { .. }));
        assert!(step.event.commentary().starts_with("Game is over."));
        assert_eq!(e.snapshot(), before);
    }

    #[test]
    fn test_snapshot_bytes() {
        let mut e = engine(5);
        e.perform_toss().unwrap();
        for _ in 0..30 {
            e.simulate_one_ball().unwrap();
        }
        let snapshot = e.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(MatchSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_resume_for_checks_teams() {
        let e = engine(5);
        let err = MatchEngine::resume_for(&roster(), "aaa", "ccc", e.snapshot()).unwrap_err();
        assert!(matches!(err, SimError::SnapshotMismatch { .. }));
        assert!(MatchEngine::resume_for(&roster(), "AAA", "BBB", e.snapshot()).is_ok());
    }
}

//! One-shot simulation to a finished scorecard.
//!
//! `simulate_match` runs the toss and steps the engine to completion, then
//! reads each innings back into batting and bowling rows. Dismissals are
//! read from the ball log, not from the trackers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{MatchConfig, PlayerKey, SimError, TeamCode};
use crate::engine::{Extras, Innings, MatchEngine, MatchSummary};
use crate::players::{RosterProvider, TeamInfo};

/// Steps allowed before `simulate_match` gives up.
///
/// A match is at most 240 legal balls; the rest is headroom for extras.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// How-out text for a batsman who never faced a ball.
pub const DID_NOT_BAT: &str = "did not bat";

/// How-out text for a batsman still in at the end.
pub const NOT_OUT: &str = "not out";

/// One batsman's line.
///
/// Figures are `None` for a batsman who did not bat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattingRow {
    pub position: usize,
    pub player: PlayerKey,
    pub how_out: String,
    pub runs: Option<u32>,
    pub balls: Option<u32>,
    pub fours: Option<u32>,
    pub sixes: Option<u32>,
    pub strike_rate: Option<f64>,
}

impl BattingRow {
    /// True if the batsman did not bat.
    #[must_use]
    pub fn did_not_bat(&self) -> bool {
        self.how_out == DID_NOT_BAT
    }
}

/// One bowler's line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BowlingRow {
    pub player: PlayerKey,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
    pub dots: u32,
    pub wides: u32,
    pub no_balls: u32,
}

/// Scorecard for one innings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InningsCard {
    pub number: u8,
    pub batting_team: TeamCode,
    pub bowling_team: TeamCode,
    pub batting: Vec<BattingRow>,
    pub bowling: Vec<BowlingRow>,
    pub extras: Extras,
    pub total: u32,
    /// Wickets counted from the ball log.
    pub wickets: u32,
    pub overs: String,
}

impl InningsCard {
    /// Build the card for an innings.
    #[must_use]
    pub fn from_innings(innings: &Innings) -> Self {
        let batting = innings
            .batting
            .iter()
            .map(|t| {
                let how_out = how_out(innings, &t.player);
                let batted = how_out != DID_NOT_BAT;
                BattingRow {
                    position: t.position,
                    player: t.player.clone(),
                    runs: batted.then_some(t.runs),
                    balls: batted.then_some(t.balls),
                    fours: batted.then_some(t.fours),
                    sixes: batted.then_some(t.sixes),
                    strike_rate: batted.then(|| t.strike_rate()),
                    how_out,
                }
            })
            .collect();

        let bowling = innings
            .bowling
            .iter()
            .filter(|t| t.balls > 0 || t.runs_conceded > 0)
            .map(|t| BowlingRow {
                player: t.player.clone(),
                overs: t.overs(),
                maidens: t.maidens,
                runs: t.runs_conceded,
                wickets: t.wickets,
                economy: t.economy(),
                dots: t.dots,
                wides: t.wides,
                no_balls: t.no_balls,
            })
            .collect();

        let wickets = innings.log.iter().filter(|e| e.is_wicket()).count() as u32;

        Self {
            number: innings.number,
            batting_team: innings.batting_team.clone(),
            bowling_team: innings.bowling_team.clone(),
            batting,
            bowling,
            extras: innings.extras,
            total: innings.score,
            wickets,
            overs: innings.overs(),
        }
    }

    /// `"182/6 (20.0 ov)"` style total.
    #[must_use]
    pub fn total_line(&self) -> String {
        format!("{}/{} ({} ov)", self.total, self.wickets, self.overs)
    }
}

/// Dismissal text for a player, from the innings log.
///
/// A dismissed batsman gets the dismissal. One who neither faced a legal
/// ball nor scored did not bat, provided a teammate faced a ball; anyone
/// else is "not out".
#[must_use]
pub fn how_out(innings: &Innings, player: &PlayerKey) -> String {
    let dismissal = innings
        .log
        .iter()
        .filter_map(|e| e.wicket.as_ref())
        .find(|w| &w.batsman == player);
    if let Some(wicket) = dismissal {
        return wicket.how_out();
    }

    let faced = innings
        .batting_tracker(player)
        .is_some_and(|t| t.balls > 0 || t.runs > 0);
    let teammate_faced = innings.batting.iter().any(|t| &t.player != player && t.balls > 0);

    if !faced && teammate_faced {
        DID_NOT_BAT.to_string()
    } else {
        NOT_OUT.to_string()
    }
}

/// A finished match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub team_a: TeamCode,
    pub team_b: TeamCode,
    pub team_a_info: TeamInfo,
    pub team_b_info: TeamInfo,
    pub toss: String,
    pub result: String,
    pub innings: Vec<InningsCard>,
}

impl Scorecard {
    /// Build a scorecard from a match summary.
    #[must_use]
    pub fn from_summary(summary: &MatchSummary) -> Self {
        Self {
            team_a: summary.team_a.clone(),
            team_b: summary.team_b.clone(),
            team_a_info: summary.team_a_info.clone(),
            team_b_info: summary.team_b_info.clone(),
            toss: summary.toss.as_ref().map(|t| t.message.clone()).unwrap_or_default(),
            result: summary.result.as_ref().map(|r| r.message.clone()).unwrap_or_default(),
            innings: summary.innings.iter().map(InningsCard::from_innings).collect(),
        }
    }
}

/// Simulate a whole match and return its scorecard.
pub fn simulate_match(
    provider: &dyn RosterProvider,
    team_a: &str,
    team_b: &str,
    config: MatchConfig,
) -> Result<Scorecard, SimError> {
    simulate_match_with_limit(provider, team_a, team_b, config, DEFAULT_STEP_LIMIT)
}

/// `simulate_match` with an explicit step limit.
pub fn simulate_match_with_limit(
    provider: &dyn RosterProvider,
    team_a: &str,
    team_b: &str,
    config: MatchConfig,
    step_limit: usize,
) -> Result<Scorecard, SimError> {
    let mut engine = MatchEngine::new(provider, team_a, team_b, config)?;
    engine.perform_toss()?;
    run_to_completion(&mut engine, step_limit)?;
    Ok(Scorecard::from_summary(&engine.summary()))
}

/// Step an engine until the match is complete.
///
/// Returns the number of steps taken, or `SimError::StepLimit` if the match
/// is still going after `step_limit` steps.
pub fn run_to_completion(engine: &mut MatchEngine, step_limit: usize) -> Result<usize, SimError> {
    let mut steps = 0;
    while !engine.is_complete() {
        if steps >= step_limit {
            return Err(SimError::StepLimit(step_limit));
        }
        engine.simulate_one_ball()?;
        steps += 1;
    }
    debug!(steps, "match simulated");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DeliveryOutcome;
    use crate::core::Diagnostics;
    use crate::players::{DismissalKind, InMemoryRoster, RunOutcome, Team, TeamRecord};

    fn roster() -> InMemoryRoster {
        let a: Vec<String> = (1..=11).map(|i| format!("A{}", i)).collect();
        let b: Vec<String> = (1..=11).map(|i| format!("B{}", i)).collect();
        InMemoryRoster::new()
            .with_team("aa", TeamRecord::new(a).with_names("Alpha", "Alpha XI"))
            .with_team("bb", TeamRecord::new(b))
    }

    fn key(k: &str) -> PlayerKey {
        PlayerKey::new(k)
    }

    #[test]
    fn test_how_out_from_log() {
        let provider = roster();
        let mut diags = Diagnostics::new();
        let a = Team::load(&provider, &TeamCode::new("aa"), &mut diags).unwrap();
        let b = Team::load(&provider, &TeamCode::new("bb"), &mut diags).unwrap();
        let mut innings = Innings::new(1, &a, &b);

        innings.record_delivery(&key("A1"), &key("B1"), DeliveryOutcome::Runs(RunOutcome::Four));
        innings.record_delivery(
            &key("A1"),
            &key("B1"),
            DeliveryOutcome::Wicket {
                kind: DismissalKind::Caught,
                fielder: Some(key("B7")),
            },
        );

        // Only A1 has faced: the non-striker and the new batsman did not bat.
        assert_eq!(how_out(&innings, &key("A1")), "c B7 b B1");
        assert_eq!(how_out(&innings, &key("A2")), DID_NOT_BAT);
        assert_eq!(how_out(&innings, &key("A3")), DID_NOT_BAT);
        assert_eq!(how_out(&innings, &key("A4")), DID_NOT_BAT);

        innings.record_delivery(&key("A3"), &key("B1"), DeliveryOutcome::Runs(RunOutcome::Dot));
        assert_eq!(how_out(&innings, &key("A3")), NOT_OUT);

        let card = InningsCard::from_innings(&innings);
        assert_eq!(card.wickets, 1);
        assert_eq!(card.total, 4);
        assert_eq!(card.batting[0].runs, Some(4));
        assert!(card.batting[1].did_not_bat());
        assert_eq!(card.batting[1].runs, None);
        assert_eq!(card.batting[2].balls, Some(1));
        assert_eq!(card.bowling.len(), 1);
        assert_eq!(card.bowling[0].overs, "0.3");
        assert_eq!(card.total_line(), "4/1 (0.3 ov)");
    }

    #[test]
    fn test_how_out_before_anyone_faces() {
        let provider = roster();
        let mut diags = Diagnostics::new();
        let a = Team::load(&provider, &TeamCode::new("aa"), &mut diags).unwrap();
        let b = Team::load(&provider, &TeamCode::new("bb"), &mut diags).unwrap();
        let mut innings = Innings::new(1, &a, &b);

        assert_eq!(how_out(&innings, &key("A1")), NOT_OUT);
        assert_eq!(how_out(&innings, &key("A5")), NOT_OUT);

        // Runs off a no-ball count as batting even without a legal ball.
        innings.record_delivery(&key("A1"), &key("B1"), DeliveryOutcome::NoBall { runs: RunOutcome::One });
        innings.record_delivery(&key("A2"), &key("B1"), DeliveryOutcome::Runs(RunOutcome::Two));
        assert_eq!(how_out(&innings, &key("A1")), NOT_OUT);
        assert_eq!(how_out(&innings, &key("A2")), NOT_OUT);
        assert_eq!(how_out(&innings, &key("A5")), DID_NOT_BAT);
    }

    #[test]
    fn test_simulate_match() {
        let card = simulate_match(&roster(), "aa", "bb", MatchConfig::default().with_seed(21)).unwrap();

        assert_eq!(card.innings.len(), 2);
        assert!(!card.result.is_empty());
        assert!(card.toss.contains("won the toss"));
        assert_eq!(card.team_a_info.full_name, "Alpha XI");

        for inn in &card.innings {
            let batted = inn.batting.iter().filter(|r| !r.did_not_bat()).count();
            assert!(batted >= 1);
            assert!(inn.wickets <= 10);
            let dismissed = inn
                .batting
                .iter()
                .filter(|r| r.how_out != NOT_OUT && !r.did_not_bat())
                .count() as u32;
            assert_eq!(dismissed, inn.wickets);
        }
    }

    #[test]
    fn test_step_limit() {
        let err = simulate_match_with_limit(&roster(), "aa", "bb", MatchConfig::default(), 5).unwrap_err();
        assert!(matches!(err, SimError::StepLimit(5)));
    }
}

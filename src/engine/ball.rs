//! One delivery: draw an outcome, then apply it to the innings.
//!
//! Draw order is fixed: wide, no-ball, wicket, then either the dismissal
//! kind (and catcher) or the runs. A no-ball also draws its runs off the
//! bat. Anything drawn here comes after the model's own draws.

use serde::{Deserialize, Serialize};

use super::event::{BallEvent, Extra, ExtraKind, WicketDetail};
use super::innings::{BattingStatus, Innings};
use crate::core::{MatchRng, PlayerKey, BALLS_PER_OVER};
use crate::model::OutcomeDistribution;
use crate::players::{DismissalKind, RunOutcome};

/// Penalty runs for a wide or a no-ball.
pub const EXTRA_PENALTY: u32 = 1;

/// What happened on a delivery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryOutcome {
    Wide,
    /// Illegal delivery; the batsman may still score off it.
    NoBall { runs: RunOutcome },
    Wicket {
        kind: DismissalKind,
        fielder: Option<PlayerKey>,
    },
    Runs(RunOutcome),
}

/// Draw an outcome for one delivery.
///
/// `fielders` is the fielding side; a catcher is drawn from it, excluding
/// the bowler (the bowler takes it if nobody else is available).
pub fn sample_outcome(
    dist: &OutcomeDistribution,
    bowler: &PlayerKey,
    fielders: &[PlayerKey],
    rng: &mut MatchRng,
) -> DeliveryOutcome {
    if rng.next_f64() < dist.wide_rate {
        return DeliveryOutcome::Wide;
    }

    if rng.next_f64() < dist.no_ball_rate {
        let runs = dist.runs.sample(rng).unwrap_or(RunOutcome::Dot);
        return DeliveryOutcome::NoBall { runs };
    }

    if rng.next_f64() < dist.wicket_probability {
        let kind = dist.dismissals.sample(rng).unwrap_or(DismissalKind::Bowled);
        let fielder = (kind == DismissalKind::Caught).then(|| {
            let catchers: Vec<&PlayerKey> = fielders.iter().filter(|f| *f != bowler).collect();
            rng.choose(&catchers).map_or_else(|| bowler.clone(), |c| (*c).clone())
        });
        return DeliveryOutcome::Wicket { kind, fielder };
    }

    DeliveryOutcome::Runs(dist.runs.sample(rng).unwrap_or(RunOutcome::Dot))
}

impl Innings {
    /// Apply a delivery bowled by `bowler` to the current striker.
    ///
    /// Updates totals and trackers, brings in the next batsman after a
    /// wicket, rotates strike on odd runs, logs and returns the event. Over
    /// completion (end-of-over swap, next bowler) is left to the caller.
    pub fn record_delivery(
        &mut self,
        striker: &PlayerKey,
        bowler: &PlayerKey,
        outcome: DeliveryOutcome,
    ) -> BallEvent {
        let non_striker = self.non_striker.clone();
        let over = self.overs_completed;

        let mut runs = 0;
        let mut extra = None;
        let mut wicket = None;
        let commentary;

        match outcome {
            DeliveryOutcome::Wide => {
                extra = Some(Extra {
                    kind: ExtraKind::Wide,
                    runs: EXTRA_PENALTY,
                });
                self.extras.wides += 1;
                self.bowling_tracker_mut(bowler).wides += 1;
                commentary = "Wide.".to_string();
            }
            DeliveryOutcome::NoBall { runs: bat } => {
                runs = bat.runs();
                extra = Some(Extra {
                    kind: ExtraKind::NoBall,
                    runs: EXTRA_PENALTY,
                });
                self.extras.no_balls += 1;
                self.bowling_tracker_mut(bowler).no_balls += 1;
                self.credit_batsman(striker, bat);
                commentary = if runs == 0 {
                    "No ball.".to_string()
                } else {
                    format!("No ball. {} scores {} off it.", striker, runs)
                };
            }
            DeliveryOutcome::Wicket { kind, fielder } => {
                let detail = WicketDetail {
                    kind,
                    batsman: striker.clone(),
                    bowler: bowler.clone(),
                    bowler_credit: kind.bowler_credit(),
                    fielder,
                };
                commentary = match (&detail.kind, &detail.fielder) {
                    (DismissalKind::Caught, Some(catcher)) => {
                        format!("{} c {} b {} OUT!", striker, catcher, bowler)
                    }
                    (DismissalKind::RunOut, _) => format!("{} is run out!", striker),
                    _ => format!("{} is {} by {}!", striker, kind, bowler),
                };
                self.wickets += 1;
                if detail.bowler_credit {
                    self.bowling_tracker_mut(bowler).wickets += 1;
                }
                self.batting_tracker_mut(striker).status = BattingStatus::Out(detail.clone());
                wicket = Some(detail);
            }
            DeliveryOutcome::Runs(bat) => {
                runs = bat.runs();
                self.credit_batsman(striker, bat);
                if runs == 0 {
                    self.bowling_tracker_mut(bowler).dots += 1;
                }
                commentary = match bat {
                    RunOutcome::Dot => format!("{} defends. No run.", striker),
                    RunOutcome::Four => format!("FOUR! {} finds the boundary.", striker),
                    RunOutcome::Six => format!("SIX! {} clears the rope.", striker),
                    _ => format!("{} scores {}.", striker, runs),
                };
            }
        }

        let conceded = runs + extra.map_or(0, |e| e.runs);
        self.score += conceded;
        self.bowling_tracker_mut(bowler).runs_conceded += conceded;
        self.add_over_runs(conceded);

        self.balls_bowled += 1;
        let legal = extra.is_none();
        if legal {
            self.legal_balls_bowled += 1;
            self.batting_tracker_mut(striker).balls += 1;
            self.bowling_tracker_mut(bowler).balls += 1;
        }

        let mut ball_in_over = self.legal_balls_bowled % BALLS_PER_OVER;
        if legal && ball_in_over == 0 {
            ball_in_over = BALLS_PER_OVER;
        }

        let event = BallEvent {
            innings: self.number,
            ball_number: self.legal_balls_bowled,
            over,
            ball_in_over,
            striker: striker.clone(),
            non_striker,
            bowler: bowler.clone(),
            runs,
            extra,
            wicket,
            score_after: self.score,
            wickets_after: self.wickets,
            commentary,
        };
        self.log.push_back(event.clone());

        if event.is_wicket() {
            self.striker = self.next_batsman_in();
        } else if runs % 2 == 1 && !matches!(extra, Some(Extra { kind: ExtraKind::Wide, .. })) {
            self.swap_strike();
        }

        event
    }

    fn credit_batsman(&mut self, striker: &PlayerKey, bat: RunOutcome) {
        let tracker = self.batting_tracker_mut(striker);
        tracker.runs += bat.runs();
        match bat {
            RunOutcome::Four => tracker.fours += 1,
            RunOutcome::Six => tracker.sixes += 1,
            _ => {}
        }
    }
}

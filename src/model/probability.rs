//! Per-delivery outcome probabilities.
//!
//! `ProbabilityModel::distribution` blends a batsman's and a bowler's
//! profiles, then adjusts the blend in a fixed order:
//!
//! 1. pitch (spin or pace help, outfield size)
//! 2. batsman settling in, accelerating, or stuck
//! 3. innings phase (powerplay, middle, death) and wickets down
//! 4. second-innings chase pressure
//!
//! and finally clips and normalizes. Steps 2-4 each take one uniform draw
//! from the match RNG when they apply, always in this order, so a seeded
//! match is replayable.

use crate::core::{Diagnostic, Diagnostics, MatchRng, PitchFactors, WeightedChoice};
use crate::players::{BowlingStyle, DismissalKind, PlayerProfile, RunOutcome, RunRates};

use super::context::DeliveryContext;

/// Smallest weight an adjusted run outcome may be pushed down to.
const WEIGHT_FLOOR: f64 = 0.001;

/// Wicket probability bounds.
pub const MIN_WICKET_PROBABILITY: f64 = 0.01;
pub const MAX_WICKET_PROBABILITY: f64 = 0.95;

/// Upper bound on wide and no-ball rates.
pub const MAX_EXTRAS_RATE: f64 = 0.5;

/// Everything needed to sample one delivery.
///
/// `runs` and `dismissals` are normalized (sum to 1).
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeDistribution {
    pub runs: WeightedChoice<RunOutcome>,
    pub wicket_probability: f64,
    pub dismissals: WeightedChoice<DismissalKind>,
    pub wide_rate: f64,
    pub no_ball_rate: f64,
}

impl OutcomeDistribution {
    /// Run distribution used when the adjusted weights collapse.
    #[must_use]
    pub fn fallback_runs() -> WeightedChoice<RunOutcome> {
        WeightedChoice::new([(RunOutcome::Dot, 0.5), (RunOutcome::One, 0.5)])
    }

    /// Dismissal distribution used when the adjusted weights collapse.
    #[must_use]
    pub fn fallback_dismissals() -> WeightedChoice<DismissalKind> {
        WeightedChoice::new([(DismissalKind::Bowled, 1.0)])
    }
}

/// Un-normalized weights being adjusted.
#[derive(Clone, Copy, Debug)]
struct Blend {
    runs: RunRates,
    wicket: f64,
}

impl Blend {
    /// Shift a run weight, never below the floor.
    fn shift(&mut self, outcome: RunOutcome, delta: f64) {
        self.runs[outcome] = (self.runs[outcome] + delta).max(WEIGHT_FLOOR);
    }

    fn lower_wicket(&mut self, by: f64) {
        self.wicket = (self.wicket - by).max(MIN_WICKET_PROBABILITY);
    }

    fn raise_wicket(&mut self, by: f64) {
        self.wicket = (self.wicket + by).min(MAX_WICKET_PROBABILITY);
    }
}

/// Outcome model for a match, fixed to its pitch conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilityModel {
    pitch: PitchFactors,
}

impl ProbabilityModel {
    /// Create a model for these pitch conditions.
    #[must_use]
    pub fn new(pitch: PitchFactors) -> Self {
        Self { pitch }
    }

    /// The pitch conditions in use.
    #[must_use]
    pub fn pitch(&self) -> PitchFactors {
        self.pitch
    }

    /// Compute the outcome distribution for one delivery.
    ///
    /// Degenerate distributions are replaced with
    /// `OutcomeDistribution::fallback_runs` / `fallback_dismissals` and
    /// reported to `diagnostics`.
    pub fn distribution(
        &self,
        batsman: &PlayerProfile,
        bowler: &PlayerProfile,
        ctx: &DeliveryContext,
        rng: &mut MatchRng,
        diagnostics: &mut Diagnostics,
    ) -> OutcomeDistribution {
        let mut blend = baseline(batsman, bowler);

        self.apply_pitch(&mut blend, bowler.bowling_style);
        apply_batsman_form(&mut blend, ctx, rng);
        apply_innings_phase(&mut blend, ctx, rng);
        apply_chase(&mut blend, ctx, rng);

        let runs = WeightedChoice::new(blend.runs.iter())
            .normalized()
            .unwrap_or_else(|| {
                diagnostics.warn(Diagnostic::DegenerateRunDistribution {
                    batsman: batsman.key.clone(),
                    bowler: bowler.key.clone(),
                });
                OutcomeDistribution::fallback_runs()
            });

        let mut dismissal_weights = bowler.bowling.dismissals;
        dismissal_weights[DismissalKind::RunOut] += batsman.batting.run_out_rate / 2.0;
        let dismissals = WeightedChoice::new(dismissal_weights.iter())
            .normalized()
            .unwrap_or_else(|| {
                diagnostics.warn(Diagnostic::DegenerateDismissalDistribution {
                    batsman: batsman.key.clone(),
                    bowler: bowler.key.clone(),
                });
                OutcomeDistribution::fallback_dismissals()
            });

        OutcomeDistribution {
            runs,
            wicket_probability: bounded(blend.wicket, MIN_WICKET_PROBABILITY, MAX_WICKET_PROBABILITY),
            dismissals,
            wide_rate: bounded(bowler.bowling.wide_rate, 0.0, MAX_EXTRAS_RATE),
            no_ball_rate: bounded(bowler.bowling.no_ball_rate, 0.0, MAX_EXTRAS_RATE),
        }
    }

    /// Spin or pace friendly pitches take wickets and cut boundaries;
    /// a bigger outfield cuts boundaries for everyone.
    fn apply_pitch(&self, blend: &mut Blend, style: BowlingStyle) {
        let factor = match style {
            BowlingStyle::Spin => Some(self.pitch.spin),
            BowlingStyle::Pace => Some(self.pitch.pace),
            BowlingStyle::Other | BowlingStyle::None => None,
        };

        if let Some(factor) = factor {
            let effect = (1.0 - factor) / 2.0;
            blend.raise_wicket(effect * 0.1);
            for outcome in [RunOutcome::Four, RunOutcome::Six] {
                blend.runs[outcome] = (blend.runs[outcome] * (1.0 - effect * 2.0)).max(WEIGHT_FLOOR);
            }
            blend.runs[RunOutcome::Dot] += effect * 0.1;
            blend.runs[RunOutcome::One] += effect * 0.05;
        }

        blend.runs[RunOutcome::Four] /= self.pitch.outfield;
        blend.runs[RunOutcome::Six] /= self.pitch.outfield;
    }
}

fn baseline(batsman: &PlayerProfile, bowler: &PlayerProfile) -> Blend {
    let mut runs = RunRates::default();
    for outcome in RunOutcome::ALL {
        runs[outcome] = (batsman.batting.runs[outcome] + bowler.bowling.runs[outcome]) / 2.0;
    }
    Blend {
        runs,
        wicket: (batsman.batting.out_rate + bowler.bowling.wicket_rate) / 2.0,
    }
}

fn apply_batsman_form(blend: &mut Blend, ctx: &DeliveryContext, rng: &mut MatchRng) {
    let balls = ctx.batsman_balls;

    // New to the crease early in the innings: play it safe.
    if balls < 8 && ctx.legal_balls < 80 {
        let scale = if ctx.innings == 1 { 1.0 } else { 0.8 };
        let adjust = rng.uniform(-0.01, 0.03) * scale;
        blend.lower_wicket(0.015);
        blend.shift(RunOutcome::Dot, adjust * 0.5);
        blend.shift(RunOutcome::One, adjust * 0.33);
        blend.shift(RunOutcome::Two, adjust * 0.17);
        blend.shift(RunOutcome::Four, -adjust * 0.17);
        blend.shift(RunOutcome::Six, -adjust * 0.5);
    }

    if balls > 15 && balls < 30 {
        let adjust = rng.uniform(0.03, 0.07);
        blend.shift(RunOutcome::Dot, -adjust * 0.33);
        blend.shift(RunOutcome::Four, adjust * 0.33);
    }

    // Stuck: long innings at a low strike rate.
    if balls > 20 && ctx.batsman_strike_rate() < 1.1 {
        let adjust = rng.uniform(0.05, 0.08);
        blend.shift(RunOutcome::Dot, adjust * 0.5);
        blend.shift(RunOutcome::One, adjust * 0.17);
        blend.shift(RunOutcome::Six, -adjust * 0.67);
        blend.raise_wicket(0.05);
    }
}

fn apply_innings_phase(blend: &mut Blend, ctx: &DeliveryContext, rng: &mut MatchRng) {
    let wickets = ctx.wickets;

    if ctx.legal_balls < 36 {
        blend.lower_wicket(if wickets == 0 { 0.07 } else { 0.03 });
        let settled = wickets < 2;
        let adj = if settled {
            rng.uniform(0.05, 0.11)
        } else {
            rng.uniform(0.02, 0.08)
        };
        blend.shift(RunOutcome::Dot, -adj * 0.67);
        blend.shift(RunOutcome::One, -adj * 0.33);
        blend.shift(RunOutcome::Four, adj * if settled { 0.67 } else { 0.83 });
        blend.shift(RunOutcome::Six, adj * if settled { 0.33 } else { 0.17 });
    } else if ctx.legal_balls >= 102 {
        let deep = wickets < 7;
        let adj = if deep {
            rng.uniform(0.07, 0.1)
        } else {
            rng.uniform(0.07, 0.09)
        };
        blend.shift(RunOutcome::Dot, adj * if deep { 0.13 } else { -0.13 });
        blend.shift(RunOutcome::One, -adj * 0.33);
        blend.shift(RunOutcome::Four, adj * 0.48);
        blend.shift(RunOutcome::Six, adj * 0.62);
        blend.raise_wicket(if deep { 0.015 } else { 0.025 });
    } else if wickets < 3 {
        let adj = rng.uniform(0.05, 0.11);
        blend.shift(RunOutcome::Dot, -adj * 0.5);
        blend.shift(RunOutcome::One, -adj * 0.33);
        blend.shift(RunOutcome::Four, adj * 0.5);
        blend.shift(RunOutcome::Six, adj * 0.33);
    } else {
        let adj = rng.uniform(0.02, 0.07);
        blend.shift(RunOutcome::Dot, -adj * 0.53);
        blend.shift(RunOutcome::One, -adj * 0.4);
        blend.shift(RunOutcome::Four, adj * 0.7);
        blend.shift(RunOutcome::Six, adj * 0.3);
        blend.lower_wicket(0.03);
    }
}

fn apply_chase(blend: &mut Blend, ctx: &DeliveryContext, rng: &mut MatchRng) {
    let Some(rrr) = ctx.required_rate() else {
        return;
    };

    if rrr < 8.0 {
        let adj = rng.uniform(0.05, 0.09) * (1.0 - (rrr / 10.0) * 0.5);
        blend.shift(RunOutcome::Six, -adj * 0.67);
        blend.shift(RunOutcome::Four, -adj * 0.33);
        blend.shift(RunOutcome::One, adj);
        blend.lower_wicket(0.04);
    } else if rrr <= 10.4 {
        let adj = rng.uniform(0.04, 0.08);
        blend.shift(RunOutcome::Six, adj * 0.2);
        blend.shift(RunOutcome::Four, adj * 0.33);
        blend.wicket = (blend.wicket - 0.01).min(MAX_WICKET_PROBABILITY);
    } else {
        let pressure = rrr * 1.1 / 1000.0;
        let adj = rng.uniform(0.04, 0.08) + pressure;
        blend.shift(RunOutcome::Six, adj * 0.5);
        blend.shift(RunOutcome::Four, adj * 0.33);
        blend.shift(RunOutcome::Dot, -adj * 0.17);
        blend.shift(RunOutcome::One, -adj * 0.67);
        blend.raise_wicket(0.02 + pressure);
    }
}

fn bounded(value: f64, low: f64, high: f64) -> f64 {
    if value.is_finite() {
        value.clamp(low, high)
    } else {
        low
    }
}

//! Bowler rotation: who bowls the next over.
//!
//! Candidates come from the bowling team's priority list for the phase of
//! the next over. A candidate is dropped once they have bowled their 24
//! balls. The bowler of the previous over is dropped too, unless that
//! would leave fewer than 3 candidates or the team has at most 2 bowlers.
//! Survivors are scored by
//!
//! ```text
//! economy - 10 * wickets + 0.1 * balls_bowled
//! ```
//!
//! and the lowest score wins, earlier in the list on ties.
//!
//! If nobody survives, the full bowling pool is tried with random
//! tie-breaking, then a uniform pick from the pool, then the previous
//! bowler. Each fallback is reported as a diagnostic.

use tracing::trace;

use super::innings::{Innings, UNUSED_BOWLER_ECONOMY};
use crate::core::{Diagnostic, Diagnostics, MatchRng, PlayerKey, RotationFallback, MAX_BALLS_PER_BOWLER};
use crate::model::Phase;
use crate::players::Team;

/// Fewest candidates the repeat-bowler restriction may leave.
const MIN_CANDIDATES_AFTER_EXCLUSION: usize = 3;

/// Score penalty keeping the previous bowler last in the full-pool fallback.
const REPEAT_PENALTY: f64 = 100.0;

/// Rotation score for a bowler this innings. Lower is better.
///
/// A bowler without figures this innings scores as an unused one.
#[must_use]
pub fn bowler_score(innings: &Innings, bowler: &PlayerKey) -> f64 {
    let (economy, wickets, balls) = innings
        .bowling_tracker(bowler)
        .map_or((UNUSED_BOWLER_ECONOMY, 0, 0), |t| (t.rotation_economy(), t.wickets, t.balls));
    economy - 10.0 * f64::from(wickets) + 0.1 * f64::from(balls)
}

fn under_cap(innings: &Innings, bowler: &PlayerKey) -> bool {
    innings.balls_by(bowler) < MAX_BALLS_PER_BOWLER
}

/// Lowest-scoring entry; the first one wins ties.
fn pick_lowest(scored: impl IntoIterator<Item = (PlayerKey, f64)>) -> Option<PlayerKey> {
    let mut best: Option<(PlayerKey, f64)> = None;
    for (bowler, score) in scored {
        if best.as_ref().map_or(true, |(_, s)| score < *s) {
            best = Some((bowler, score));
        }
    }
    best.map(|(bowler, _)| bowler)
}

/// Choose the bowler for the next over (`innings.overs_completed`).
///
/// Returns `None` only when the team has no bowlers and there is no
/// previous bowler to fall back on.
pub fn select_bowler(
    team: &Team,
    innings: &Innings,
    rng: &mut MatchRng,
    diagnostics: &mut Diagnostics,
) -> Option<PlayerKey> {
    let over = innings.overs_completed;
    let phase = Phase::from_over(over);
    let previous = innings.previous_bowler.as_ref();

    let mut candidates: Vec<&PlayerKey> = team
        .phase_bowlers
        .for_phase(phase)
        .iter()
        .filter(|b| team.contains(b) && under_cap(innings, b))
        .collect();

    if let Some(previous) = previous {
        let without: Vec<&PlayerKey> = candidates.iter().copied().filter(|b| *b != previous).collect();
        if team.bowlers.len() > 2 && without.len() >= MIN_CANDIDATES_AFTER_EXCLUSION {
            candidates = without;
        }
    }

    if let Some(bowler) = pick_lowest(candidates.into_iter().map(|b| (b.clone(), bowler_score(innings, b)))) {
        trace!(over, %phase, %bowler, "bowler selected");
        return Some(bowler);
    }

    let fallback = |tier: RotationFallback, diagnostics: &mut Diagnostics| {
        diagnostics.warn(Diagnostic::RotationFallback {
            team: team.code.clone(),
            over,
            tier,
        });
    };

    let pool: Vec<&PlayerKey> = team.bowlers.iter().filter(|b| under_cap(innings, b)).collect();
    if !pool.is_empty() {
        fallback(RotationFallback::FullList, diagnostics);
        let scored: Vec<(PlayerKey, f64)> = pool
            .into_iter()
            .map(|b| {
                let penalty = if Some(b) == previous { REPEAT_PENALTY } else { 0.0 };
                (b.clone(), rng.next_f64() + penalty)
            })
            .collect();
        return pick_lowest(scored);
    }

    if let Some(bowler) = rng.choose(&team.bowlers) {
        fallback(RotationFallback::Uniform, diagnostics);
        return Some(bowler.clone());
    }

    fallback(RotationFallback::PreviousBowler, diagnostics);
    previous.cloned()
}

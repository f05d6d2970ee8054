//! Property tests over random seeds and pitch conditions.

use proptest::prelude::*;

use cricket_sim::core::{MatchConfig, MatchRng, PitchFactors, WeightedChoice, MAX_LEGAL_BALLS};
use cricket_sim::engine::{MatchEngine, MatchSnapshot};
use cricket_sim::players::{InMemoryRoster, TeamRecord};

/// Unknown players throughout, so every profile is the placeholder.
fn roster() -> InMemoryRoster {
    InMemoryRoster::new()
        .with_team("aa", TeamRecord::new((1..=11).map(|i| format!("A{}", i))))
        .with_team("bb", TeamRecord::new((1..=11).map(|i| format!("B{}", i))))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: every match finishes with two consistent innings.
    #[test]
    fn prop_match_completes(
        seed in any::<u64>(),
        pace in 0.5f64..1.5,
        spin in 0.5f64..1.5,
        outfield in 0.5f64..1.5
    ) {
        let config = MatchConfig::default()
            .with_seed(seed)
            .with_pitch(PitchFactors::new(pace, spin, outfield));
        let mut engine = MatchEngine::new(&roster(), "aa", "bb", config).unwrap();
        engine.perform_toss().unwrap();

        let mut steps = 0;
        while !engine.is_complete() {
            engine.simulate_one_ball().unwrap();
            steps += 1;
            prop_assert!(steps < 2_000);
        }

        prop_assert_eq!(engine.innings().len(), 2);
        for innings in engine.innings() {
            prop_assert!(innings.legal_balls_bowled <= MAX_LEGAL_BALLS);
            prop_assert!(innings.wickets <= 10);
            let total: u32 = innings.log.iter().map(|e| e.total_runs()).sum();
            prop_assert_eq!(total, innings.score);
        }
        prop_assert!(engine.result().is_some());
    }

    /// Property: a snapshot taken at any step resumes to the same result.
    #[test]
    fn prop_snapshot_resume(seed in any::<u64>(), pause_at in 0usize..260) {
        let provider = roster();
        let config = MatchConfig::default().with_seed(seed);

        let mut straight = MatchEngine::new(&provider, "aa", "bb", config.clone()).unwrap();
        straight.perform_toss().unwrap();
        while !straight.is_complete() {
            straight.simulate_one_ball().unwrap();
        }

        let mut paused = MatchEngine::new(&provider, "aa", "bb", config).unwrap();
        paused.perform_toss().unwrap();
        for _ in 0..pause_at {
            paused.simulate_one_ball().unwrap();
        }
        let bytes = paused.snapshot().to_bytes().unwrap();
        let mut resumed = MatchEngine::resume(&provider, MatchSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        while !resumed.is_complete() {
            resumed.simulate_one_ball().unwrap();
        }

        prop_assert_eq!(resumed.summary(), straight.summary());
    }

    /// Property: sampling only returns entries with positive weight.
    #[test]
    fn prop_weighted_choice_respects_zero_weights(
        seed in any::<u64>(),
        weights in proptest::collection::vec(0.0f64..5.0, 1..8)
    ) {
        prop_assume!(weights.iter().any(|w| *w > 0.0));
        let choice = WeightedChoice::new(weights.iter().copied().enumerate());
        let mut rng = MatchRng::new(seed);
        for _ in 0..50 {
            let picked = choice.sample(&mut rng).unwrap();
            prop_assert!(weights[picked] > 0.0);
        }
    }

    /// Property: uniform draws stay inside their bounds.
    #[test]
    fn prop_uniform_in_range(seed in any::<u64>(), low in -10.0f64..10.0, width in 0.0f64..10.0) {
        let mut rng = MatchRng::new(seed);
        for _ in 0..20 {
            let x = rng.uniform(low, low + width);
            prop_assert!(x >= low - 1e-9 && x <= low + width + 1e-9);
        }
    }
}

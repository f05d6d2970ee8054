use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cricket_sim::core::MatchConfig;
use cricket_sim::engine::MatchEngine;
use cricket_sim::players::{InMemoryRoster, TeamRecord};
use cricket_sim::scorecard::simulate_match;

fn roster() -> InMemoryRoster {
    InMemoryRoster::new()
        .with_team("aa", TeamRecord::new((1..=11).map(|i| format!("A{}", i))))
        .with_team("bb", TeamRecord::new((1..=11).map(|i| format!("B{}", i))))
}

fn bench_full_match(c: &mut Criterion) {
    let provider = roster();
    let mut seed = 0u64;
    c.bench_function("simulate_match", |b| {
        b.iter(|| {
            seed += 1;
            simulate_match(&provider, "aa", "bb", MatchConfig::default().with_seed(black_box(seed)))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let provider = roster();
    let mut engine = MatchEngine::new(&provider, "aa", "bb", MatchConfig::default()).unwrap();
    engine.perform_toss().unwrap();
    for _ in 0..120 {
        engine.simulate_one_ball().unwrap();
    }

    c.bench_function("snapshot_roundtrip", |b| {
        b.iter(|| {
            let bytes = engine.snapshot().to_bytes().unwrap();
            MatchEngine::resume(&provider, cricket_sim::MatchSnapshot::from_bytes(black_box(&bytes)).unwrap())
        })
    });
}

criterion_group!(benches, bench_full_match, bench_snapshot);
criterion_main!(benches);

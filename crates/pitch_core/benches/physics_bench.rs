use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pitch_core::{
    check_interception, create_sample_team, generate_match, ActionKind, MatchSimulator, SimConfig,
    TeamSide, DEFAULT_INTERCEPTION_RADIUS_M,
};

fn bench_interception(c: &mut Criterion) {
    let defenders = create_sample_team("Away", 11, TeamSide::Away).unwrap().players;

    c.bench_function("check_interception_11_defenders", |b| {
        b.iter(|| {
            check_interception(
                black_box((30.0, 20.0)),
                black_box((80.0, 50.0)),
                black_box(&defenders),
                DEFAULT_INTERCEPTION_RADIUS_M,
            )
        })
    });
}

fn bench_step(c: &mut Criterion) {
    let home = create_sample_team("Home", 11, TeamSide::Home).unwrap();
    let away = create_sample_team("Away", 11, TeamSide::Away).unwrap();
    let sim = MatchSimulator::new(home, away).unwrap();

    c.bench_function("simulate_step_pass", |b| {
        b.iter_batched(
            || sim.clone(),
            |mut sim| sim.simulate_step(ActionKind::Pass, Some(black_box((60.0, 10.0)))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_generate_match(c: &mut Criterion) {
    let config = SimConfig::default();
    c.bench_function("generate_match_500_steps", |b| {
        b.iter(|| generate_match(black_box(7), 500, &config))
    });
}

criterion_group!(benches, bench_interception, bench_step, bench_generate_match);
criterion_main!(benches);

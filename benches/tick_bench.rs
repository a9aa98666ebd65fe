//! Simulation tick benchmarks
//!
//! Measures one tick over organizations of increasing size, using the
//! flattened agent directory.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use megadev::core::{NeedsConfig, SimulationConfig};
use megadev::entity::Squad;
use megadev::organization::OrganizationBuilder;
use megadev::simulation::SimulationEngine;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SQUAD_SIZE: usize = 10;

fn build_engine(agents: usize) -> SimulationEngine {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let squads = (0..agents / SQUAD_SIZE)
        .map(|i| Squad::create_random(format!("Squad-{}", i), SQUAD_SIZE, &mut rng))
        .collect();

    let config = SimulationConfig {
        start_time: NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(9, 0, 0)),
        seed: Some(42),
        ..SimulationConfig::default()
    };
    let mut engine = SimulationEngine::new(config, NeedsConfig::default()).unwrap();
    for department in OrganizationBuilder::default().build(squads) {
        engine.add_department(department);
    }
    // First tick builds the directory
    engine.tick();
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_tick");
    group.sample_size(20);

    for agents in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(agents as u64));
        group.bench_with_input(BenchmarkId::new("agents", agents), &agents, |b, &agents| {
            let mut engine = build_engine(agents);
            b.iter(|| black_box(engine.tick()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);

//! Criterion benchmarks for city generation.
//!
//! Benchmarks:
//!   - single city at grid sizes 8, 20 and 64
//!   - connectivity pass alone on a 64x64 station set
//!   - parallel batch of 32 cities at grid 20
//!
//! Run with: cargo bench -p citynet-logic --bench generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use citynet_logic::batch::generate_batch_from;
use citynet_logic::connectivity::build_connections;
use citynet_logic::rng::CityRng;
use citynet_logic::stations::place_stations;
use citynet_logic::{generate_with_rng, CityConfig};

fn bench_single_city(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_city");

    for grid_size in [8, 20, 64] {
        let config = CityConfig::with_grid_size(grid_size);
        group.bench_with_input(BenchmarkId::from_parameter(grid_size), &config, |b, config| {
            b.iter(|| {
                let mut rng = CityRng::from_seed_u64(42);
                black_box(generate_with_rng(black_box(config), &mut rng))
            });
        });
    }

    group.finish();
}

fn bench_connectivity(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity");
    group.sample_size(20);

    let mut rng = CityRng::from_seed_u64(7);
    let placed = place_stations(64, citynet_logic::model::TransitMode::all(), &mut rng);

    group.bench_function("build_connections_64", |b| {
        b.iter(|| {
            let mut stations = placed.clone();
            black_box(build_connections(&mut stations))
        });
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    let config = CityConfig::with_grid_size(20);
    group.bench_function("32_cities_grid_20", |b| {
        b.iter(|| black_box(generate_batch_from(&config, 1, 32)));
    });

    group.finish();
}

criterion_group!(benches, bench_single_city, bench_connectivity, bench_batch);
criterion_main!(benches);

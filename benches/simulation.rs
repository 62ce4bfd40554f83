//! Performance benchmarks for MEADOW

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meadow::environment::{Astronomical, DayLength, Triangular, Weather};
use meadow::{Config, Simulation};

fn benchmark_simulation_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_year");

    for species_count in [1usize, 10, 50].iter() {
        let mut config = Config::default();
        config.simulation.years = 1;
        let templates = config.species.clone();
        config.species = templates.iter().cycle().take(*species_count).cloned().collect();

        group.bench_with_input(
            BenchmarkId::new("species", species_count),
            species_count,
            |b, _| {
                b.iter(|| {
                    let mut sim = Simulation::from_config(&config).unwrap();
                    sim.run();
                    black_box(sim.total_days())
                });
            },
        );
    }

    group.finish();
}

fn benchmark_weather(c: &mut Criterion) {
    let mut weather = Weather::new(42, Box::new(Triangular::new(240, 8.0, 16.0)), 48.0, 1);
    weather.start_season();

    c.bench_function("weather_next_day", |b| {
        b.iter(|| black_box(weather.next_day()));
    });
}

fn benchmark_day_length(c: &mut Criterion) {
    let astro = Astronomical;

    c.bench_function("astronomical_day_length", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for day in 1..=365 {
                total += astro.hours(black_box(day), black_box(52.0));
            }
            total
        });
    });
}

criterion_group!(
    benches,
    benchmark_simulation_year,
    benchmark_weather,
    benchmark_day_length,
);

criterion_main!(benches);

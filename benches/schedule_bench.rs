use criterion::{black_box, criterion_group, criterion_main, Criterion};
use epoch_ndframe::prelude::*;

fn benchmark_valid_days_one_year(c: &mut Criterion) {
    let nyse = exchanges::nyse().expect("failed to build nyse calendar");
    let start = Date::new(2024, 1, 1).unwrap();
    let end = Date::new(2024, 12, 31).unwrap();

    c.bench_function("nyse_valid_days_one_year", |b| {
        b.iter(|| nyse.valid_days(black_box(start), black_box(end)).unwrap());
    });
}

fn benchmark_schedule_one_year(c: &mut Criterion) {
    let nyse = exchanges::nyse().expect("failed to build nyse calendar");
    let start = Date::new(2024, 1, 1).unwrap();
    let end = Date::new(2024, 12, 31).unwrap();
    let market_times = [MarketTimeType::MarketOpen, MarketTimeType::MarketClose];

    c.bench_function("nyse_schedule_one_year", |b| {
        b.iter(|| {
            nyse.schedule(
                black_box(start),
                black_box(end),
                &market_times,
                ForceSpecialTimes::Clamp,
            )
            .unwrap()
        });
    });
}

fn benchmark_schedule_cached_repeated_lookup(c: &mut Criterion) {
    let nyse = exchanges::nyse().expect("failed to build nyse calendar");
    let start = Date::new(2024, 1, 1).unwrap();
    let end = Date::new(2024, 12, 31).unwrap();
    let market_times = [MarketTimeType::MarketOpen, MarketTimeType::MarketClose];

    c.bench_function("nyse_schedule_cached_repeated", |b| {
        b.iter(|| {
            nyse.schedule_cached(
                black_box(start),
                black_box(end),
                &market_times,
                ForceSpecialTimes::Clamp,
            )
            .unwrap()
        });
    });
}

criterion_group!(
    benches,
    benchmark_valid_days_one_year,
    benchmark_schedule_one_year,
    benchmark_schedule_cached_repeated_lookup
);
criterion_main!(benches);

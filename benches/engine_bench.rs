//! Criterion benchmarks for the daily aggregation path

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use wattrack::config::{CarbonParams, HardwareParams, SimulationParams};
use wattrack::parsers::DailyCountMap;
use wattrack::services::{Aggregator, TokenVolumeModel};
use wattrack::types::DailyCounts;

/// Build `days` consecutive dates with varying counts
fn synthetic_counts(days: u64) -> DailyCountMap {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    (0..days)
        .map(|offset| {
            let date = start + chrono::Duration::days(offset as i64);
            let counts = DailyCounts {
                chatbots: offset % 40,
                completions: offset % 250,
                translations: offset % 90,
                sessions: offset % 300,
            };
            (date, counts)
        })
        .collect()
}

fn bench_daily(c: &mut Criterion) {
    let sim = SimulationParams::default();
    let carbon = CarbonParams::default();
    let model = TokenVolumeModel::new(HardwareParams::default());

    let mut group = c.benchmark_group("aggregator_daily");
    for size in [30u64, 365, 3650] {
        let counts = synthetic_counts(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &counts, |b, counts| {
            b.iter(|| {
                Aggregator::daily(
                    black_box(counts),
                    &sim,
                    &model,
                    carbon.carbon_intensity_g_per_kwh,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_daily);
criterion_main!(benches);

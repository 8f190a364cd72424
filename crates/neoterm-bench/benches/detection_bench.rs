use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use neoterm_detect::{detect_all, growth, longest_run, DetectionParams};
use neoterm_test_utils::generated_count_table;
use neoterm_types::YearRange;

fn range() -> YearRange {
    YearRange::new(1990, 2020).unwrap()
}

fn bench_detect_all(c: &mut Criterion) {
    let params = DetectionParams::default();
    let mut group = c.benchmark_group("detect_all");

    for terms in [100, 1_000, 10_000].iter() {
        let table = generated_count_table(*terms, range(), 42);
        group.throughput(Throughput::Elements(*terms as u64));
        group.bench_with_input(BenchmarkId::from_parameter(terms), &table, |b, table| {
            b.iter(|| {
                let candidates = detect_all(black_box(table), range(), &params);
                black_box(candidates);
            });
        });
    }
    group.finish();
}

fn bench_term_metrics(c: &mut Criterion) {
    let table = generated_count_table(1, range(), 7);
    let Some(counts) = table.values().next() else {
        return;
    };

    c.bench_function("longest_run", |b| {
        b.iter(|| black_box(longest_run(range(), black_box(counts))));
    });
    c.bench_function("growth", |b| {
        b.iter(|| black_box(growth(black_box(counts))));
    });
}

criterion_group!(benches, bench_detect_all, bench_term_metrics);
criterion_main!(benches);

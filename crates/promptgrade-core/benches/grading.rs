use criterion::{black_box, criterion_group, criterion_main, Criterion};

use promptgrade_core::model::{EvaluationSet, Grade};
use promptgrade_core::seed::reference_set;

fn large_set(n: u32) -> EvaluationSet {
    let mut set = EvaluationSet::new(
        "bench",
        "Bench",
        (1..=n).map(|id| (id, format!("prompt number {id}"))),
    )
    .unwrap();
    for id in (1..=n).step_by(3) {
        set.set_grade(id, Grade::Pass);
    }
    set
}

fn bench_pass_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_rate");

    let reference = reference_set();
    group.bench_function("reference", |b| b.iter(|| black_box(&reference).pass_rate()));

    let large = large_set(10_000);
    group.bench_function("n=10000", |b| b.iter(|| black_box(&large).pass_rate()));

    group.finish();
}

fn bench_set_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_grade");

    let mut large = large_set(10_000);
    group.bench_function("last item", |b| {
        b.iter(|| large.set_grade(black_box(10_000), black_box(Grade::Fail)))
    });
    group.bench_function("unknown id", |b| {
        b.iter(|| large.set_grade(black_box(20_000), black_box(Grade::Pass)))
    });

    group.finish();
}

criterion_group!(benches, bench_pass_rate, bench_set_grade);
criterion_main!(benches);

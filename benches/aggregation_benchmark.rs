use criterion::{criterion_group, criterion_main, Criterion};
use riskmap::config::ReportConfig;
use riskmap::io::output::EvaluationReport;
use riskmap::io::snapshot::{load_register, save_register};
use riskmap::register::ScoringPolicy;
use riskmap::testkit::generated_register;
use std::hint::black_box;
use tempfile::TempDir;

fn benchmark_aggregation(c: &mut Criterion) {
    let register = generated_register(200, 8);

    c.bench_function("aggregate_200x8", |b| {
        b.iter(|| black_box(register.aggregates()));
    });

    c.bench_function("rank_200x8", |b| {
        b.iter(|| black_box(register.ranking()));
    });
}

fn benchmark_mutations(c: &mut Criterion) {
    let register = generated_register(200, 8);

    c.bench_function("add_remove_modality_200x8", |b| {
        b.iter(|| {
            let mut working = register.clone();
            working.add_modality("Extra").unwrap();
            working.remove_modality("Extra").unwrap();
            black_box(working)
        });
    });

    c.bench_function("bulk_mitigation_200x8", |b| {
        b.iter(|| {
            let mut working = register.clone();
            black_box(working.apply_bulk_mitigation("Modality 3", 0.4).unwrap())
        });
    });
}

fn benchmark_report_and_snapshot(c: &mut Criterion) {
    let register = generated_register(200, 8);
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("register.json");
    save_register(&path, &register).unwrap();

    c.bench_function("evaluation_report_200x8", |b| {
        b.iter(|| black_box(EvaluationReport::new(&register, ReportConfig::default())));
    });

    c.bench_function("load_register_200x8", |b| {
        b.iter(|| black_box(load_register(&path, ScoringPolicy::default()).unwrap()));
    });
}

criterion_group!(
    benches,
    benchmark_aggregation,
    benchmark_mutations,
    benchmark_report_and_snapshot
);
criterion_main!(benches);

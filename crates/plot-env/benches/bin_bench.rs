use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plot_env::{bin, BinOptions, BinPosition, Column};

fn gen_values(n: usize) -> Vec<f64> {
    // simple waveform with drift
    (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + i as f64 * 0.0001).collect()
}

fn gen_groups(n: usize, k: usize) -> Column {
    Column::categorical((0..n).map(|i| format!("host-{}", i % k)))
}

fn bench_bin(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin");
    for &n in &[10_000usize, 100_000usize] {
        let values = Column::numeric(gen_values(n));
        let groups = gen_groups(n, 8);
        for &bins in &[10usize, 100usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_b{bins}")), &bins, |b, &bins| {
                let opts = BinOptions::default().bins(bins);
                b.iter(|| black_box(bin(&values, None, &opts)));
            });
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_b{bins}_grouped")), &bins, |b, &bins| {
                let opts = BinOptions::default().bins(bins).position(BinPosition::Stacked);
                b.iter(|| black_box(bin(&values, Some(&groups), &opts)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_bin);
criterion_main!(benches);

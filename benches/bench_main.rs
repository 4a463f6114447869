use criterion::criterion_main;

mod benchmarks;

criterion_main! {
    benchmarks::rans::rans_benches,
    benchmarks::edgebreaker::edgebreaker_benches,
}

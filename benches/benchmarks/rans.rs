use criterion::{criterion_group, BatchSize, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use geomcodec::entropy::{RansModel, RansSymbolDecoder, RansSymbolEncoder};

use crate::benchmarks::{skewed_symbols, SYMBOL_LIST_LENGTH};

fn encode_bench(c: &mut Criterion) {
    let symbols = skewed_symbols(SYMBOL_LIST_LENGTH);
    let counts = [SYMBOL_LIST_LENGTH as u64, 1, 1];
    let model = RansModel::from_counts(&counts, 12).unwrap();

    let mut group = c.benchmark_group("rans encoder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(30);

    group.bench_function("encode skewed stream", |b| {
        b.iter_batched(
            || (),
            |_| {
                let mut enc = RansSymbolEncoder::new(&model);
                for &s in symbols.iter().rev() {
                    enc.encode(s).unwrap();
                }
                enc.finish()
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn decode_bench(c: &mut Criterion) {
    let symbols = skewed_symbols(SYMBOL_LIST_LENGTH);
    let counts = [SYMBOL_LIST_LENGTH as u64, 1, 1];
    let model = RansModel::from_counts(&counts, 12).unwrap();
    let mut enc = RansSymbolEncoder::new(&model);
    for &s in symbols.iter().rev() {
        enc.encode(s).unwrap();
    }
    let payload = enc.finish();

    let mut group = c.benchmark_group("rans decoder");
    group.throughput(criterion::Throughput::Elements(symbols.len() as u64));
    group.sample_size(30);

    group.bench_function("decode skewed stream", |b| {
        b.iter(|| {
            let mut dec = RansSymbolDecoder::new(&model, &payload).unwrap();
            for _ in 0..symbols.len() {
                dec.decode().unwrap();
            }
        })
    });
    group.finish();
}

criterion_group! {
    name = rans_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = encode_bench, decode_bench
}

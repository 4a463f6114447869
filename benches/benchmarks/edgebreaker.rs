use criterion::{criterion_group, Criterion};
use pprof::criterion::{Output, PProfProfiler};

use geomcodec::bitstream::{DecoderBuffer, EncoderBuffer};
use geomcodec::edgebreaker::{read_connectivity, write_connectivity};

use crate::benchmarks::{grid_mesh, GRID_COLS, GRID_ROWS};

fn traversal_and_encode_bench(c: &mut Criterion) {
    let mesh = grid_mesh(GRID_ROWS, GRID_COLS);
    let mut group = c.benchmark_group("edgebreaker encode");
    group.throughput(criterion::Throughput::Elements(mesh.num_faces() as u64));
    group.sample_size(30);

    group.bench_function("write_connectivity", |b| {
        b.iter(|| {
            let mut out = EncoderBuffer::new();
            write_connectivity(&mesh, &mut out).unwrap();
        })
    });
    group.finish();
}

fn decode_bench(c: &mut Criterion) {
    let mesh = grid_mesh(GRID_ROWS, GRID_COLS);
    let mut out = EncoderBuffer::new();
    write_connectivity(&mesh, &mut out).unwrap();
    let bytes = out.into_bytes();

    let mut group = c.benchmark_group("edgebreaker decode");
    group.throughput(criterion::Throughput::Elements(mesh.num_faces() as u64));
    group.sample_size(30);

    group.bench_function("read_connectivity", |b| {
        b.iter(|| {
            let mut data = DecoderBuffer::new(&bytes);
            read_connectivity(&mut data).unwrap();
        })
    });
    group.finish();
}

criterion_group! {
    name = edgebreaker_benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = traversal_and_encode_bench, decode_bench
}

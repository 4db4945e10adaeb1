//! Criterion benchmarks for compression and decompression throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_codec(c: &mut Criterion) {
    let repetitive = b"the the the and the and the and the cat sat on the mat".repeat(100);
    let uniform: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();

    let mut group = c.benchmark_group("huffcodec");
    for (name, data) in [("repetitive", &repetitive), ("uniform", &uniform)] {
        let container = huffcodec::compress(data).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_function(format!("compress_{}", name), |b| {
            b.iter(|| huffcodec::compress(black_box(data)).unwrap())
        });
        group.bench_function(format!("decompress_{}", name), |b| {
            b.iter(|| huffcodec::decompress(black_box(&container)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);

//! Entry-point benchmarks: dispatched `csum_partial`, the streaming hasher,
//! and the O(1) combine operation.
//!
//! Run: `cargo bench -p netsum --bench csum`

use core::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use netsum::{ChecksumCombine, InetChecksum, csum_partial};

mod util;

fn bench_csum_partial(c: &mut Criterion) {
  util::print_platform_info();

  let mut group = c.benchmark_group("csum_partial");
  for &(label, size) in util::CASES {
    let data = util::make_parity_variants(&util::make_data(size));
    group.throughput(Throughput::Bytes(size as u64));

    for variant in &data {
      let data = variant.as_slice();
      let param = util::bench_param_label(label, variant.parity());

      group.bench_with_input(BenchmarkId::from_parameter(&param), &data, |b, data| {
        b.iter(|| black_box(csum_partial(black_box(data), black_box(0))));
      });
    }
  }
  group.finish();
}

fn bench_streaming(c: &mut Criterion) {
  util::print_platform_info();
  let base = InetChecksum::new();

  let mut group = c.benchmark_group("streaming");
  for &(label, size) in util::CASES {
    let data = util::make_data(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::new("oneshot", label), &data, |b, data| {
      b.iter(|| {
        let mut sum = base.clone();
        sum.update(black_box(data));
        black_box(sum.finalize())
      });
    });

    group.bench_with_input(BenchmarkId::new("chunked", label), &data, |b, data| {
      b.iter(|| {
        let mut sum = base.clone();
        for chunk in black_box(data).chunks(util::STREAM_CHUNK_BYTES) {
          sum.update(chunk);
        }
        black_box(sum.finalize())
      });
    });
  }
  group.finish();
}

/// Benchmark the checksum combine operation.
///
/// Combine is O(1) in the length of either part; `len_a` only selects
/// whether the second sum is byte-swapped before merging.
fn bench_combine(c: &mut Criterion) {
  let mut group = c.benchmark_group("combine");
  group.throughput(Throughput::Elements(1));

  for len_a in [40usize, 41, 1460, 65536] {
    group.bench_with_input(BenchmarkId::from_parameter(len_a), &len_a, |b, &len_a| {
      let sum_a = 0x1234u16;
      let sum_b = 0x8765u16;
      b.iter(|| black_box(InetChecksum::combine(sum_a, sum_b, len_a)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_csum_partial, bench_streaming, bench_combine,);
criterion_main!(benches);

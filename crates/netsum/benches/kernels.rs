use core::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use netsum::bench;

mod util;

fn bench_accum_kernels(c: &mut Criterion) {
  util::print_platform_info();
  let kernel_names = bench::available_accum_kernels();

  let mut group = c.benchmark_group("kernels/accum");
  for &(label, size) in util::CASES {
    let data = util::make_parity_variants(&util::make_data(size));
    group.throughput(Throughput::Bytes(size as u64));

    for variant in &data {
      let data = variant.as_slice();
      let param = util::bench_param_label(label, variant.parity());

      for &name in &kernel_names {
        if name == "reference" {
          continue;
        }
        let Some(kernel) = bench::get_accum_kernel(name) else {
          panic!("accum kernel should exist for name={name}");
        };
        let func = kernel.func;
        group.bench_with_input(BenchmarkId::new(kernel.name, &param), &data, |b, data| {
          b.iter(|| {
            let sum = black_box(0u64);
            black_box(func(sum, black_box(data)))
          });
        });
      }
    }
  }
  group.finish();
}

fn bench_block40_kernels(c: &mut Criterion) {
  util::print_platform_info();
  let kernel_names = bench::available_block40_kernels();

  let mut group = c.benchmark_group("kernels/block40");
  group.throughput(Throughput::Bytes(40));

  let data = util::make_parity_variants(&util::make_data(40));
  for variant in &data {
    let data = variant.as_slice();
    let param = variant.parity().label();

    for &name in &kernel_names {
      if name == "reference" {
        continue;
      }
      let Some(kernel) = bench::get_block40_kernel(name) else {
        panic!("block40 kernel should exist for name={name}");
      };
      let func = kernel.func;
      group.bench_with_input(BenchmarkId::new(kernel.name, param), &data, |b, data| {
        b.iter(|| {
          let sum = black_box(0u32);
          black_box(func(sum, black_box(data)))
        });
      });
    }
  }
  group.finish();
}

criterion_group! {
  name = benches;
  config = Criterion::default()
    .measurement_time(Duration::from_secs(3))
    .sample_size(50);
  targets =
    bench_accum_kernels,
    bench_block40_kernels,
}
criterion_main!(benches);

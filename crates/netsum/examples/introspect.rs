//! Kernel introspection: verify which optimizations are active.
//!
//! This example shows how to inspect which kernels the dispatchers picked
//! for your platform, useful for verifying hardware acceleration is
//! enabled.
//!
//! Run with: `cargo run --example introspect -p netsum`

use netsum::{ChainStrategy, InetChecksum, bench, csum_block40_with, dispatchers, fold};

fn main() {
  println!("=== Internet Checksum Kernel Introspection ===\n");

  platform_info();
  dispatcher_backends();
  strategy_census();
  kernel_registry();
}

/// Display detected platform capabilities.
fn platform_info() {
  println!("--- Platform Detection ---\n");

  let caps = platform::caps();
  println!("Platform: {}", platform::describe(caps));
  println!();
}

/// Show which backend each dispatcher selected.
fn dispatcher_backends() {
  println!("--- Dispatcher Backends ---\n");

  println!("accumulate:          {}", InetChecksum::backend_name());
  println!("block40/sequential:  {}", dispatchers::BLOCK40_SEQUENTIAL.backend_name());
  println!("block40/dual-chain:  {}", dispatchers::BLOCK40_DUAL_CHAIN.backend_name());
  println!("block40/flag-pair:   {}", dispatchers::BLOCK40_FLAG_PAIR.backend_name());
  println!("block40/word32-tree: {}", dispatchers::BLOCK40_WORD32_TREE.backend_name());
  println!("block40/auto:        {}", dispatchers::BLOCK40_AUTO.backend_name());
  println!();
}

/// Every carry-chain strategy computes the same folded sum.
fn strategy_census() {
  println!("--- Carry-Chain Strategies ---\n");

  let mut block = [0u8; 40];
  for (i, byte) in block.iter_mut().enumerate() {
    *byte = (i as u8).wrapping_mul(31);
  }

  for strategy in ChainStrategy::ALL {
    let sum = csum_block40_with(strategy, &block, 0);
    println!("{:<12} 0x{:04X}", strategy.label(), fold::fold32(sum));
  }
  println!();
}

/// List every kernel reachable through the benchmarking registry.
fn kernel_registry() {
  println!("--- Kernel Registry ---\n");

  println!("accumulation kernels:");
  for name in bench::available_accum_kernels() {
    println!("  {name}");
  }
  println!();

  println!("40-byte block kernels:");
  for name in bench::available_block40_kernels() {
    println!("  {name}");
  }
  println!();
}

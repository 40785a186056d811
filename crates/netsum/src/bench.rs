//! Kernel benchmarking API.
//!
//! Exposes kernel function pointers by name so benchmarks and differential
//! tests can reach individual kernels directly, bypassing the cached
//! dispatch system. The names match the dispatcher candidates, plus a
//! `"reference"` kernel that computes the sum one 16-bit word at a time and
//! serves as the baseline everything else is measured and checked against.
//!
//! Kernels gated on a CPU capability are only listed and returned when the
//! current CPU has it.

use alloc::vec::Vec;

use crate::common::{fold, reference};
use crate::dispatchers::{AccumFn, Block40Fn};
use crate::{block40, partial};

/// Accumulation kernel lookup result.
#[derive(Clone, Copy)]
pub struct AccumKernel {
  /// Kernel name.
  pub name: &'static str,
  /// Kernel function pointer.
  pub func: AccumFn,
}

/// 40-byte block kernel lookup result.
#[derive(Clone, Copy)]
pub struct Block40Kernel {
  /// Kernel name.
  pub name: &'static str,
  /// Kernel function pointer.
  pub func: Block40Fn,
}

/// Word-at-a-time reference accumulator.
///
/// Returns a fully folded 16-bit sum widened to the accumulator type; the
/// asm kernels return wider partial sums, so compare kernels after folding.
fn reference_accum(sum: u64, data: &[u8]) -> u64 {
  u64::from(reference::sum16(data, fold::fold64(sum)))
}

/// Word-at-a-time reference 40-byte kernel.
fn reference_block40(sum: u32, data: &[u8]) -> u32 {
  u32::from(reference::sum16(data, sum))
}

/// Get all available accumulation kernel names for the current platform.
#[must_use]
pub fn available_accum_kernels() -> Vec<&'static str> {
  let mut kernels = Vec::new();

  // Always available
  kernels.push("reference");
  kernels.push("portable");

  #[cfg(all(target_arch = "x86_64", not(miri)))]
  kernels.push("x86_64/adc");

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  kernels.push("aarch64/adcs");

  kernels
}

/// Get all available 40-byte block kernel names for the current platform.
#[must_use]
pub fn available_block40_kernels() -> Vec<&'static str> {
  let mut kernels = Vec::new();

  // Always available
  kernels.push("reference");
  kernels.push("portable/sequential");
  kernels.push("portable/dual-chain");
  kernels.push("portable/flag-pair");
  kernels.push("portable/word32-tree");

  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    kernels.push("x86_64/sequential");
    kernels.push("x86_64/dual-chain");
    kernels.push("x86_64/word32-tree");

    if platform::caps().has(platform::caps::x86::ADX) {
      kernels.push("x86_64/flag-pair");
    }
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    kernels.push("aarch64/sequential");
    kernels.push("aarch64/dual-chain");
  }

  kernels
}

/// Get an accumulation kernel function by name.
#[must_use]
pub fn get_accum_kernel(name: &str) -> Option<AccumKernel> {
  if name == "reference" {
    return Some(AccumKernel {
      name: "reference",
      func: reference_accum,
    });
  }
  if name == "portable" {
    return Some(AccumKernel {
      name: "portable",
      func: partial::portable::accumulate,
    });
  }

  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    if name == "x86_64/adc" {
      return Some(AccumKernel {
        name: "x86_64/adc",
        func: partial::x86_64::accumulate,
      });
    }
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    if name == "aarch64/adcs" {
      return Some(AccumKernel {
        name: "aarch64/adcs",
        func: partial::aarch64::accumulate,
      });
    }
  }

  None
}

/// Get a 40-byte block kernel function by name.
#[must_use]
pub fn get_block40_kernel(name: &str) -> Option<Block40Kernel> {
  if name == "reference" {
    return Some(Block40Kernel {
      name: "reference",
      func: reference_block40,
    });
  }
  if name == "portable/sequential" {
    return Some(Block40Kernel {
      name: "portable/sequential",
      func: block40::portable::sequential,
    });
  }
  if name == "portable/dual-chain" {
    return Some(Block40Kernel {
      name: "portable/dual-chain",
      func: block40::portable::dual_chain,
    });
  }
  if name == "portable/flag-pair" {
    return Some(Block40Kernel {
      name: "portable/flag-pair",
      func: block40::portable::flag_pair,
    });
  }
  if name == "portable/word32-tree" {
    return Some(Block40Kernel {
      name: "portable/word32-tree",
      func: block40::portable::word32_tree,
    });
  }

  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    if name == "x86_64/sequential" {
      return Some(Block40Kernel {
        name: "x86_64/sequential",
        func: block40::x86_64::sequential,
      });
    }
    if name == "x86_64/dual-chain" {
      return Some(Block40Kernel {
        name: "x86_64/dual-chain",
        func: block40::x86_64::dual_chain,
      });
    }
    if name == "x86_64/word32-tree" {
      return Some(Block40Kernel {
        name: "x86_64/word32-tree",
        func: block40::x86_64::word32_tree,
      });
    }
    if name == "x86_64/flag-pair" && platform::caps().has(platform::caps::x86::ADX) {
      return Some(Block40Kernel {
        name: "x86_64/flag-pair",
        func: block40::x86_64::flag_pair,
      });
    }
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    if name == "aarch64/sequential" {
      return Some(Block40Kernel {
        name: "aarch64/sequential",
        func: block40::aarch64::sequential,
      });
    }
    if name == "aarch64/dual-chain" {
      return Some(Block40Kernel {
        name: "aarch64/dual-chain",
        func: block40::aarch64::dual_chain,
      });
    }
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reference_kernel_available() {
    let kernel = get_accum_kernel("reference").expect("reference kernel should be available");
    assert_eq!(kernel.name, "reference");

    let folded = fold::fold32(fold::fold64((kernel.func)(0, &reference::IPV4_HEADER)));
    assert_eq!(folded, 0x9E47);
  }

  #[test]
  fn test_every_listed_accum_kernel_resolves() {
    let kernels = available_accum_kernels();
    assert!(kernels.contains(&"reference"));
    assert!(kernels.contains(&"portable"));

    for &name in &kernels {
      let kernel = get_accum_kernel(name);
      assert!(kernel.is_some(), "kernel '{name}' should be available");
    }
  }

  #[test]
  fn test_every_listed_block40_kernel_resolves() {
    let kernels = available_block40_kernels();
    assert!(kernels.len() >= 5, "reference plus four portable strategies, got: {kernels:?}");

    for &name in &kernels {
      let kernel = get_block40_kernel(name);
      assert!(kernel.is_some(), "kernel '{name}' should be available");
    }
  }

  #[test]
  fn test_listed_block40_kernels_agree() {
    let block = [0x5Au8; 40];
    let expected = reference::sum16(&block, 0x0001_0203);

    for &name in &available_block40_kernels() {
      let kernel = get_block40_kernel(name).expect("listed kernel resolves");
      let folded = fold::fold32((kernel.func)(0x0001_0203, &block));
      assert_eq!(folded, expected, "kernel '{name}'");
    }
  }

  #[test]
  fn test_unknown_kernel_name() {
    assert!(get_accum_kernel("x86_64/avx512").is_none());
    assert!(get_block40_kernel("portable/quad-chain").is_none());
  }
}

//! 40-byte checksum kernels for aarch64.
//!
//! The carry-chain shapes carry over from x86_64 with `adds`/`adcs` in
//! place of `add`/`adc`. There is no second carry flag, so the flag-pair
//! shape has no aarch64 rendition; the 32-bit tree brings nothing over the
//! native 64-bit adds either. That leaves the two shapes worth measuring:
//!
//! - [`sequential`]: one flag chain over the five words
//! - [`dual_chain`]: three-word and two-word chains merged at the end
//!
//! # Safety
//!
//! Every kernel reads exactly 40 bytes. The safe wrappers assert the length
//! before entering `unsafe`.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::asm;

use crate::common::fold;

/// One dependent chain over the five words.
#[inline]
pub(crate) fn sequential(sum: u32, data: &[u8]) -> u32 {
  debug_assert_eq!(data.len(), 40);
  // SAFETY: callers hand in exactly 40 bytes; the kernel reads 40.
  unsafe { sequential_unchecked(sum, data.as_ptr()) }
}

/// Two independent chains merged at the end.
#[inline]
pub(crate) fn dual_chain(sum: u32, data: &[u8]) -> u32 {
  debug_assert_eq!(data.len(), 40);
  // SAFETY: as above.
  unsafe { dual_chain_unchecked(sum, data.as_ptr()) }
}

/// # Safety
///
/// `ptr` must be valid for reads of 40 bytes.
#[inline]
unsafe fn sequential_unchecked(sum: u32, ptr: *const u8) -> u32 {
  let mut acc = u64::from(sum);
  asm!(
    "ldp {t0}, {t1}, [{ptr}]",
    "ldp {t2}, {t3}, [{ptr}, #16]",
    "ldr {t4}, [{ptr}, #32]",
    "adds {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "adcs {acc}, {acc}, {t2}",
    "adcs {acc}, {acc}, {t3}",
    "adcs {acc}, {acc}, {t4}",
    "adc {acc}, {acc}, xzr",
    acc = inout(reg) acc,
    t0 = out(reg) _,
    t1 = out(reg) _,
    t2 = out(reg) _,
    t3 = out(reg) _,
    t4 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  fold::fold64(acc)
}

/// # Safety
///
/// `ptr` must be valid for reads of 40 bytes.
#[inline]
unsafe fn dual_chain_unchecked(sum: u32, ptr: *const u8) -> u32 {
  let mut low = u64::from(sum);
  asm!(
    "ldp {t0}, {t1}, [{ptr}]",
    "ldr {t2}, [{ptr}, #16]",
    "ldp {t3}, {t4}, [{ptr}, #24]",
    "adds {low}, {low}, {t0}",
    "adcs {low}, {low}, {t1}",
    "adcs {low}, {low}, {t2}",
    "adc {low}, {low}, xzr",
    "adds {t3}, {t3}, {t4}",
    "adc {t3}, {t3}, xzr",
    "adds {low}, {low}, {t3}",
    "adc {low}, {low}, xzr",
    low = inout(reg) low,
    t0 = out(reg) _,
    t1 = out(reg) _,
    t2 = out(reg) _,
    t3 = out(reg) _,
    t4 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  fold::fold64(low)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::block40::portable;

  fn blocks() -> [[u8; 40]; 3] {
    let mut scrambled = [0u8; 40];
    let mut state = 0x853C_49E6_748F_EA9Bu64;
    for byte in scrambled.iter_mut() {
      state ^= state << 13;
      state ^= state >> 7;
      state ^= state << 17;
      *byte = state as u8;
    }
    [[0u8; 40], [0xFF; 40], scrambled]
  }

  #[test]
  fn chains_match_portable_groupings() {
    let pairs: [(fn(u32, &[u8]) -> u32, fn(u32, &[u8]) -> u32); 2] = [
      (sequential, portable::sequential),
      (dual_chain, portable::dual_chain),
    ];
    for block in blocks() {
      for seed in [0u32, 1, 0xFFFF, 0x8000_0001, u32::MAX] {
        for (asm_kernel, portable_kernel) in pairs {
          assert_eq!(
            asm_kernel(seed, &block),
            portable_kernel(seed, &block),
            "seed {seed:#x}"
          );
        }
      }
    }
  }
}

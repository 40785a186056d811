//! 40-byte checksum kernels exploring x86_64 carry-chain shapes.
//!
//! Five 64-bit words is short enough that the shape of the carry chain, not
//! memory bandwidth, sets the latency. Each kernel keeps a different number
//! of flag chains in flight:
//!
//! - [`sequential`]: one `add`/`adc` chain, five dependent adds
//! - [`dual_chain`]: three-word and two-word chains merged at the end
//! - [`flag_pair`]: `adcx`/`adox` interleaved on the two carry flags (ADX)
//! - [`word32_tree`]: ten 32-bit adds in three short chains
//!
//! # Safety
//!
//! Every kernel reads exactly 40 bytes. The safe wrappers assert the length
//! before entering `unsafe`; the flag-pair kernel additionally requires ADX,
//! which its dispatcher checks.

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

/// Interleaved `adcx`/`adox` chains on the two carry flags.
#[inline]
pub(crate) fn flag_pair(sum: u32, data: &[u8]) -> u32 {
  debug_assert_eq!(data.len(), 40);
  // SAFETY: Dispatcher verifies ADX before selecting this kernel.
  unsafe { flag_pair_unchecked(sum, data.as_ptr()) }
}

/// Ten 32-bit words in three short chains.
#[inline]
pub(crate) fn word32_tree(sum: u32, data: &[u8]) -> u32 {
  debug_assert_eq!(data.len(), 40);
  // SAFETY: as above.
  unsafe { word32_tree_unchecked(sum, data.as_ptr()) }
}

/// # Safety
///
/// `ptr` must be valid for reads of 40 bytes.
#[inline]
unsafe fn sequential_unchecked(sum: u32, ptr: *const u8) -> u32 {
  let mut acc = u64::from(sum);
  asm!(
    "add {acc}, [{ptr}]",
    "adc {acc}, [{ptr} + 8]",
    "adc {acc}, [{ptr} + 16]",
    "adc {acc}, [{ptr} + 24]",
    "adc {acc}, [{ptr} + 32]",
    "adc {acc}, 0",
    acc = inout(reg) acc,
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
    "mov {high}, [{ptr} + 24]",
    "add {low}, [{ptr}]",
    "adc {low}, [{ptr} + 8]",
    "adc {low}, [{ptr} + 16]",
    "adc {low}, 0",
    "add {high}, [{ptr} + 32]",
    "adc {high}, 0",
    "add {low}, {high}",
    "adc {low}, 0",
    low = inout(reg) low,
    high = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  fold::fold64(low)
}

/// # Safety
///
/// `ptr` must be valid for reads of 40 bytes and the CPU must support ADX.
#[inline]
#[target_feature(enable = "adx")]
unsafe fn flag_pair_unchecked(sum: u32, ptr: *const u8) -> u32 {
  let mut even = u64::from(sum);
  let mut odd: u64 = 0;
  // `xor` clears both CF and OF, starting the two chains together.
  asm!(
    "xor {zero:e}, {zero:e}",
    "adcx {even}, [{ptr}]",
    "adox {odd}, [{ptr} + 8]",
    "adcx {even}, [{ptr} + 16]",
    "adox {odd}, [{ptr} + 24]",
    "adcx {even}, [{ptr} + 32]",
    "adcx {even}, {zero}",
    "adox {odd}, {zero}",
    "add {even}, {odd}",
    "adc {even}, 0",
    even = inout(reg) even,
    odd = inout(reg) odd,
    zero = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  fold::fold64(even)
}

/// # Safety
///
/// `ptr` must be valid for reads of 40 bytes.
#[inline]
unsafe fn word32_tree_unchecked(sum: u32, ptr: *const u8) -> u32 {
  let mut a = sum;
  asm!(
    "add {a:e}, [{ptr}]",
    "adc {a:e}, [{ptr} + 4]",
    "adc {a:e}, [{ptr} + 8]",
    "adc {a:e}, 0",
    "mov {b:e}, [{ptr} + 12]",
    "add {b:e}, [{ptr} + 16]",
    "adc {b:e}, [{ptr} + 20]",
    "adc {b:e}, 0",
    "mov {c:e}, [{ptr} + 24]",
    "add {c:e}, [{ptr} + 28]",
    "adc {c:e}, [{ptr} + 32]",
    "adc {c:e}, [{ptr} + 36]",
    "adc {c:e}, 0",
    "add {a:e}, {b:e}",
    "adc {a:e}, {c:e}",
    "adc {a:e}, 0",
    a = inout(reg) a,
    b = out(reg) _,
    c = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  a
}

//! aarch64 accumulation kernel using `adds`/`adcs` chains.
//!
//! `ldp` pulls two words per load and the flag-setting add forms keep the
//! end-around carry live across the chain, closed by one `adc xzr` that
//! folds the final carry back in. Loads do not touch the flags, so they
//! interleave freely with the chain.
//!
//! # Safety
//!
//! Each chain helper reads exactly the number of bytes its name states
//! through the pointer it is given. [`accumulate`] is the only entry point;
//! it checks the remaining length before every step.

#![allow(unsafe_code)]
#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::asm;

use crate::common::tail;

/// Accumulate `data` into `sum` as little-endian 64-bit words.
#[inline]
pub(crate) fn accumulate(sum: u64, data: &[u8]) -> u64 {
  // SAFETY: the helpers below never read past `data.len()` bytes from the
  // slice's base pointer.
  unsafe { accumulate_unchecked(sum, data.as_ptr(), data.len()) }
}

/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes.
unsafe fn accumulate_unchecked(mut sum: u64, mut ptr: *const u8, mut len: usize) -> u64 {
  while len >= 64 {
    sum = add_chunk64(sum, ptr);
    ptr = ptr.add(64);
    len -= 64;
  }
  if len & 32 != 0 {
    sum = add_chunk32(sum, ptr);
    ptr = ptr.add(32);
  }
  if len & 16 != 0 {
    sum = add_chunk16(sum, ptr);
    ptr = ptr.add(16);
  }
  if len & 8 != 0 {
    sum = add_chunk8(sum, ptr);
    ptr = ptr.add(8);
  }
  len &= 7;
  if len != 0 {
    // SAFETY: `ptr` points at the final `len` bytes of the original slice.
    let rest = core::slice::from_raw_parts(ptr, len);
    sum = add_value(sum, tail::load_tail(rest));
  }
  sum
}

/// # Safety
///
/// `ptr` must be valid for reads of 64 bytes.
#[inline]
unsafe fn add_chunk64(mut sum: u64, ptr: *const u8) -> u64 {
  asm!(
    "ldp {t0}, {t1}, [{ptr}]",
    "adds {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "ldp {t0}, {t1}, [{ptr}, #16]",
    "adcs {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "ldp {t0}, {t1}, [{ptr}, #32]",
    "adcs {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "ldp {t0}, {t1}, [{ptr}, #48]",
    "adcs {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "adc {acc}, {acc}, xzr",
    acc = inout(reg) sum,
    t0 = out(reg) _,
    t1 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  sum
}

/// # Safety
///
/// `ptr` must be valid for reads of 32 bytes.
#[inline]
unsafe fn add_chunk32(mut sum: u64, ptr: *const u8) -> u64 {
  asm!(
    "ldp {t0}, {t1}, [{ptr}]",
    "adds {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "ldp {t0}, {t1}, [{ptr}, #16]",
    "adcs {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "adc {acc}, {acc}, xzr",
    acc = inout(reg) sum,
    t0 = out(reg) _,
    t1 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  sum
}

/// # Safety
///
/// `ptr` must be valid for reads of 16 bytes.
#[inline]
unsafe fn add_chunk16(mut sum: u64, ptr: *const u8) -> u64 {
  asm!(
    "ldp {t0}, {t1}, [{ptr}]",
    "adds {acc}, {acc}, {t0}",
    "adcs {acc}, {acc}, {t1}",
    "adc {acc}, {acc}, xzr",
    acc = inout(reg) sum,
    t0 = out(reg) _,
    t1 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  sum
}

/// # Safety
///
/// `ptr` must be valid for reads of 8 bytes.
#[inline]
unsafe fn add_chunk8(mut sum: u64, ptr: *const u8) -> u64 {
  asm!(
    "ldr {t0}, [{ptr}]",
    "adds {acc}, {acc}, {t0}",
    "adc {acc}, {acc}, xzr",
    acc = inout(reg) sum,
    t0 = out(reg) _,
    ptr = in(reg) ptr,
    options(readonly, nostack),
  );
  sum
}

/// End-around add of a loaded word.
#[inline]
fn add_value(mut sum: u64, value: u64) -> u64 {
  // SAFETY: register-only arithmetic.
  unsafe {
    asm!(
      "adds {acc}, {acc}, {value}",
      "adc {acc}, {acc}, xzr",
      acc = inout(reg) sum,
      value = in(reg) value,
      options(pure, nomem, nostack),
    );
  }
  sum
}

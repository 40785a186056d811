//! x86_64 accumulation kernel built on the materialized carry flag.
//!
//! `add`/`adc` chains keep the end-around carry live in `CF` across a whole
//! cache line, so the 64-byte inner loop retires one add per word plus a
//! single trailing `adc 0` that folds the final carry back in. The trailing
//! `adc` can never carry again: that would require every word in the chain
//! to be all-ones and the accumulator to wrap at the same time, which the
//! chain arithmetic rules out.
//!
//! Remainders are handled by shorter chains picked from the bits of the
//! length (32, 16, 8), and the last zero to seven bytes are widened into a
//! zero-padded word before one final end-around add.
//!
//! # Safety
//!
//! Each chain helper reads exactly the number of bytes its name states
//! through the pointer it is given. [`accumulate`] is the only entry point;
//! it checks the remaining length before every step and advances pointer
//! and length in lockstep.

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
    "add {acc}, [{ptr}]",
    "adc {acc}, [{ptr} + 8]",
    "adc {acc}, [{ptr} + 16]",
    "adc {acc}, [{ptr} + 24]",
    "adc {acc}, [{ptr} + 32]",
    "adc {acc}, [{ptr} + 40]",
    "adc {acc}, [{ptr} + 48]",
    "adc {acc}, [{ptr} + 56]",
    "adc {acc}, 0",
    acc = inout(reg) sum,
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
    "add {acc}, [{ptr}]",
    "adc {acc}, [{ptr} + 8]",
    "adc {acc}, [{ptr} + 16]",
    "adc {acc}, [{ptr} + 24]",
    "adc {acc}, 0",
    acc = inout(reg) sum,
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
    "add {acc}, [{ptr}]",
    "adc {acc}, [{ptr} + 8]",
    "adc {acc}, 0",
    acc = inout(reg) sum,
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
    "add {acc}, [{ptr}]",
    "adc {acc}, 0",
    acc = inout(reg) sum,
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
      "add {acc}, {value}",
      "adc {acc}, 0",
      acc = inout(reg) sum,
      value = in(reg) value,
      options(pure, nomem, nostack),
    );
  }
  sum
}

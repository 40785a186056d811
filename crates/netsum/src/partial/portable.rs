//! Portable accumulation kernel.
//!
//! Sums the input as little-endian 64-bit words into a 128-bit accumulator
//! and folds once at the end. Folding preserves congruence modulo
//! `2^64 - 1` and never maps a non-zero sum to zero, so the single fold
//! lands on exactly the value the carry-chain kernels reach through their
//! per-block end-around carries. The two families are interchangeable
//! bit for bit, not merely as checksums.

use crate::common::fold;
use crate::common::tail;

/// Accumulate `data` into `sum` as little-endian 64-bit words.
pub(crate) fn accumulate(sum: u64, data: &[u8]) -> u64 {
  let mut total = u128::from(sum);
  let mut rest = data;
  while let Some((word, remainder)) = rest.split_first_chunk::<8>() {
    total += u128::from(u64::from_le_bytes(*word));
    rest = remainder;
  }
  if !rest.is_empty() {
    total += u128::from(tail::load_tail(rest));
  }
  fold::fold128(total)
}

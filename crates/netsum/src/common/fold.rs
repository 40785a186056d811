//! End-around-carry folding primitives.
//!
//! The Internet checksum is arithmetic modulo `2^16 - 1`: a carry out of the
//! top bit wraps around and is added back at the bottom. Because `2^16 - 1`
//! divides `2^32 - 1`, `2^64 - 1`, and `2^128 - 1`, a sum may be accumulated
//! at any convenient width and folded down afterwards without changing its
//! value as a checksum. These helpers perform the width reductions and the
//! end-around additions that the kernels build on.
//!
//! Folding never maps a non-zero value to zero. A sum that is congruent to
//! zero folds to the all-ones representative instead, so a folded result of
//! zero means "zero seed and no non-zero bytes".

/// Fold a 64-bit accumulator to 32 bits with end-around carry.
///
/// The result is congruent to `sum` modulo `2^32 - 1`. Values that already
/// fit in 32 bits pass through unchanged.
#[inline]
#[must_use]
pub const fn fold64(sum: u64) -> u32 {
  // Both halves are below 2^32, so the first add stays below 2^33 and the
  // second cannot carry at all.
  let folded = (sum >> 32).strict_add(sum & 0xFFFF_FFFF);
  let folded = (folded >> 32).strict_add(folded & 0xFFFF_FFFF);
  folded as u32
}

/// Fold a 32-bit partial sum to the final 16-bit checksum value.
///
/// The result is congruent to `sum` modulo `2^16 - 1`.
#[inline]
#[must_use]
pub const fn fold32(sum: u32) -> u16 {
  let folded = (sum >> 16).strict_add(sum & 0xFFFF);
  let folded = (folded >> 16).strict_add(folded & 0xFFFF);
  folded as u16
}

/// Fold a 32-bit partial sum and complement it.
///
/// This is the value stored in a header's checksum field, in the same byte
/// convention as `sum` itself.
#[inline]
#[must_use]
pub const fn finish(sum: u32) -> u16 {
  !fold32(sum)
}

/// Add two 32-bit partial sums with end-around carry.
///
/// Associative and commutative, which is what makes checksum combination
/// and parallel accumulation work.
#[inline]
#[must_use]
pub const fn add_sums(a: u32, b: u32) -> u32 {
  let (sum, carry) = a.overflowing_add(b);
  // When the add wraps, `sum` is at most 2^32 - 2, so folding the carry
  // back in cannot wrap again.
  sum.strict_add(carry as u32)
}

/// Add two 64-bit accumulators with end-around carry.
#[inline]
#[must_use]
pub(crate) const fn add_sums64(a: u64, b: u64) -> u64 {
  let (sum, carry) = a.overflowing_add(b);
  sum.strict_add(carry as u64)
}

/// Fold a 128-bit accumulator to 64 bits with end-around carry.
///
/// A single fold of a whole-message 128-bit sum lands on exactly the value
/// a chain of per-block end-around carries reaches, so the portable kernels
/// can accumulate first and fold once.
#[inline]
#[must_use]
pub(crate) const fn fold128(sum: u128) -> u64 {
  const LOW: u128 = u64::MAX as u128;
  let folded = (sum >> 64).strict_add(sum & LOW);
  let folded = (folded >> 64).strict_add(folded & LOW);
  folded as u64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fold64_small_values_pass_through() {
    assert_eq!(fold64(0), 0);
    assert_eq!(fold64(1), 1);
    assert_eq!(fold64(0xFFFF_FFFF), 0xFFFF_FFFF);
  }

  #[test]
  fn fold64_wraps_carries() {
    // 2^32 is congruent to 1.
    assert_eq!(fold64(0x1_0000_0000), 1);
    assert_eq!(fold64(0x2_0000_0005), 7);
    // 2^64 - 1 is congruent to 0 and folds to the all-ones representative.
    assert_eq!(fold64(u64::MAX), 0xFFFF_FFFF);
  }

  #[test]
  fn fold64_never_folds_nonzero_to_zero() {
    // Multiples of 2^32 - 1 are congruent to zero; they must fold to the
    // all-ones representative, never to zero itself.
    let congruent_to_zero = [
      u64::MAX,
      0x1_FFFF_FFFE,
      0x2_FFFF_FFFD,
      0xFFFF_FFFE_0000_0001, // (2^32 - 1)^2
    ];
    for value in congruent_to_zero {
      assert_eq!(fold64(value), 0xFFFF_FFFF, "fold64({value:#x})");
    }
  }

  #[test]
  fn fold32_known_values() {
    assert_eq!(fold32(0), 0);
    assert_eq!(fold32(0xFFFF), 0xFFFF);
    assert_eq!(fold32(0x0001_0000), 1);
    assert_eq!(fold32(0x0001_FFFF), 1);
    assert_eq!(fold32(0xFFFF_FFFF), 0xFFFF);
  }

  #[test]
  fn finish_complements() {
    assert_eq!(finish(0), 0xFFFF);
    assert_eq!(finish(0xFFFF), 0);
    // 2 + 0xFFFD sums to 0xFFFF, so the complement is zero.
    assert_eq!(finish(0x0002_FFFD), 0);
  }

  #[test]
  fn add_sums_wraps_end_around() {
    assert_eq!(add_sums(0, 0), 0);
    assert_eq!(add_sums(5, 7), 12);
    assert_eq!(add_sums(u32::MAX, 1), 1);
    assert_eq!(add_sums(u32::MAX, u32::MAX), u32::MAX);
  }

  #[test]
  fn add_sums_is_associative() {
    let triples = [
      (0x1234_5678, 0x9ABC_DEF0, 0x0F0F_0F0F),
      (u32::MAX, u32::MAX, u32::MAX),
      (u32::MAX - 1, 3, u32::MAX),
      (0, u32::MAX, 1),
    ];
    for (a, b, c) in triples {
      assert_eq!(
        add_sums(add_sums(a, b), c),
        add_sums(a, add_sums(b, c)),
        "associativity failed for {a:#x}, {b:#x}, {c:#x}"
      );
    }
  }

  #[test]
  fn add_sums64_matches_double_width() {
    let pairs = [
      (0u64, 0u64),
      (u64::MAX, 1),
      (u64::MAX, u64::MAX),
      (0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210),
    ];
    for (a, b) in pairs {
      let wide = u128::from(a) + u128::from(b);
      assert_eq!(add_sums64(a, b), fold128(wide), "mismatch for {a:#x} + {b:#x}");
    }
  }

  #[test]
  fn fold128_matches_iterated_add() {
    // Folding a four-term 128-bit sum once equals chaining end-around adds.
    let words = [u64::MAX, 0x8000_0000_0000_0001, 0x7FFF_FFFF_FFFF_FFFE, 42];
    let wide: u128 = words.iter().map(|&w| u128::from(w)).sum();
    let chained = words.iter().fold(0u64, |acc, &w| add_sums64(acc, w));
    assert_eq!(fold128(wide), chained);
  }
}

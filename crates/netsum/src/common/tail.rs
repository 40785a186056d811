//! Zero-padded loading of sub-word tails.
//!
//! The accumulation kernels consume eight bytes at a time; whatever is left
//! over (zero to seven bytes) is widened into a single 64-bit little-endian
//! word with the missing high bytes as zero. Zero padding is free for the
//! checksum because added zeros never produce a carry.
//!
//! The load is assembled from at most one 4-byte, one 2-byte, and one 1-byte
//! read selected by the bits of the remaining length, so it never touches
//! memory past the slice.

/// Load up to seven bytes as a zero-padded little-endian word.
///
/// `data.len()` must be less than 8; an empty slice loads as zero.
#[inline]
#[must_use]
pub(crate) fn load_tail(data: &[u8]) -> u64 {
  debug_assert!(data.len() < 8, "tail loads handle at most 7 bytes");
  let mut value: u64 = 0;
  let mut shift: u32 = 0;
  let mut rest = data;
  if data.len() & 4 != 0 {
    if let Some((word, tail)) = rest.split_first_chunk::<4>() {
      value = u64::from(u32::from_le_bytes(*word));
      shift = 32;
      rest = tail;
    }
  }
  if data.len() & 2 != 0 {
    if let Some((half, tail)) = rest.split_first_chunk::<2>() {
      value |= u64::from(u16::from_le_bytes(*half)) << shift;
      shift += 16;
      rest = tail;
    }
  }
  if data.len() & 1 != 0 {
    if let Some((&byte, _)) = rest.split_first() {
      value |= u64::from(byte) << shift;
    }
  }
  value
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Bytewise model: byte `i` lands at bit position `8 * i`.
  fn naive(data: &[u8]) -> u64 {
    data
      .iter()
      .enumerate()
      .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
  }

  #[test]
  fn empty_loads_zero() {
    assert_eq!(load_tail(&[]), 0);
  }

  #[test]
  fn all_lengths_match_bytewise_model() {
    let bytes = [0x01, 0x80, 0xFF, 0x7F, 0xA5, 0x5A, 0xC3];
    for len in 0..=7 {
      let slice = &bytes[..len];
      assert_eq!(load_tail(slice), naive(slice), "length {len}");
    }
  }

  #[test]
  fn high_bytes_stay_zero() {
    for len in 1..=7 {
      let slice = &[0xFFu8; 7][..len];
      let loaded = load_tail(slice);
      assert_eq!(loaded >> (8 * len), 0, "padding dirty for length {len}");
      assert_eq!(loaded, (1u64 << (8 * len)) - 1);
    }
  }

  #[test]
  fn single_byte_positions() {
    assert_eq!(load_tail(&[0xAB]), 0xAB);
    assert_eq!(load_tail(&[0x00, 0xAB]), 0xAB00);
    assert_eq!(load_tail(&[0x00, 0x00, 0x00, 0x00, 0xAB]), 0xAB_0000_0000);
  }
}

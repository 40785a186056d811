//! Partial Internet checksum over arbitrary buffers.

pub(crate) mod portable;

#[cfg(all(target_arch = "x86_64", not(miri)))]
pub(crate) mod x86_64;

#[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
pub(crate) mod aarch64;

use crate::common::fold;
use crate::dispatchers;

/// Sum `data` into `sum` as 16-bit little-endian words with end-around
/// carry, returning an unfolded 32-bit partial sum.
///
/// The byte at an even offset is the low byte of its word; a trailing odd
/// byte contributes as a bare low byte. The result is uncomplemented. Fold
/// with [`fold::fold32`] and complement to obtain the value stored in a
/// header, or use [`InetChecksum`](crate::InetChecksum) which does both.
///
/// # Resuming
///
/// `sum` may be the result of a previous call over a preceding buffer:
///
/// - resuming at an offset that is a multiple of 4 reproduces the one-shot
///   32-bit value bit for bit;
/// - resuming at any even offset preserves the folded 16-bit checksum;
/// - after an odd-length prefix the folded checksum of the concatenation is
///   the byte swap of what direct continuation would give, per the
///   byte-order independence rule of RFC 1071.
///
/// # Buffer address
///
/// A buffer starting at an odd address is entered one byte early in spirit:
/// the first byte is added as a high byte, the rest is summed from the even
/// boundary, and the folded result is byte-swapped on exit. The swap makes
/// the folded checksum of the same bytes independent of where they sit in
/// memory (for a byte-symmetric `sum` such as zero). With a zero-length
/// buffer at an odd address, `sum` is returned unchanged.
#[must_use]
pub fn csum_partial(data: &[u8], sum: u32) -> u32 {
  let odd = data.as_ptr() as usize & 1 != 0;
  let mut acc = u64::from(sum);
  let mut buf = data;
  if odd {
    let Some((&first, rest)) = buf.split_first() else {
      return sum;
    };
    acc += u64::from(first) << 8;
    buf = rest;
  }
  let folded = fold::fold64(dispatchers::ACCUM.call(acc, buf));
  if odd {
    u32::from(fold::fold32(folded).swap_bytes())
  } else {
    folded
  }
}

#[cfg(test)]
mod tests {
  use alloc::vec;
  use alloc::vec::Vec;

  use super::*;
  use crate::common::reference;

  fn gen_bytes(len: usize, mut state: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
      state ^= state << 13;
      state ^= state >> 7;
      state ^= state << 17;
      out.push(state as u8);
    }
    out
  }

  /// Copy `data` into `storage` so the view starts at an address of the
  /// requested parity.
  fn at_parity<'a>(storage: &'a mut Vec<u8>, data: &[u8], odd: bool) -> &'a [u8] {
    storage.clear();
    storage.resize(data.len() + 1, 0);
    let offset = (storage.as_ptr() as usize & 1) ^ usize::from(odd);
    storage[offset..offset + data.len()].copy_from_slice(data);
    &storage[offset..offset + data.len()]
  }

  #[test]
  fn even_address_matches_reference() {
    let mut storage = Vec::new();
    for len in [0, 1, 2, 3, 4, 7, 8, 15, 16, 31, 32, 63, 64, 65, 255, 256, 1024] {
      let data = gen_bytes(len, 0x9E37_79B9_7F4A_7C15 ^ len as u64);
      for seed in [0u32, 1, 0xFFFF, 0x0001_0000, 0xFFFF_FFFF] {
        let view = at_parity(&mut storage, &data, false);
        let got = fold::fold32(csum_partial(view, seed));
        let want = reference::sum16(&data, seed);
        assert_eq!(got, want, "len {len}, seed {seed:#x}");
      }
    }
  }

  #[test]
  fn odd_address_swaps_the_seeded_sum() {
    let mut storage = Vec::new();
    for len in [1, 2, 3, 7, 8, 15, 16, 63, 64, 65, 255] {
      let data = gen_bytes(len, 0xABCD_EF01_2345_6789 ^ len as u64);
      for seed in [0u32, 1, 0xBEEF, 0xFFFF_FFFF] {
        let view = at_parity(&mut storage, &data, true);
        let got = csum_partial(view, seed);
        // Entering one byte early swaps the seed's byte roles; everything
        // else sums as if the buffer were even-aligned.
        let swapped_seed = u32::from(fold::fold32(seed).swap_bytes());
        let want = u32::from(reference::sum16(&data, swapped_seed));
        assert_eq!(got, want, "len {len}, seed {seed:#x}");
      }
    }
  }

  #[test]
  fn zero_seed_is_address_invariant() {
    let mut even_storage = Vec::new();
    let mut odd_storage = Vec::new();
    for len in [1, 2, 5, 40, 64, 100, 1500] {
      let data = gen_bytes(len, 0x1357_9BDF_2468_ACE0 ^ len as u64);
      let even = csum_partial(at_parity(&mut even_storage, &data, false), 0);
      let odd = csum_partial(at_parity(&mut odd_storage, &data, true), 0);
      assert_eq!(fold::fold32(even), fold::fold32(odd), "len {len}");
    }
  }

  #[test]
  fn empty_returns_seed_at_both_parities() {
    let storage = vec![0u8; 2];
    let even_offset = storage.as_ptr() as usize & 1;
    let odd_offset = even_offset ^ 1;
    let even_view = &storage[even_offset..even_offset];
    let odd_view = &storage[odd_offset..odd_offset];
    for seed in [0u32, 7, 0xFFFF_FFFF] {
      assert_eq!(csum_partial(even_view, seed), seed);
      assert_eq!(csum_partial(odd_view, seed), seed);
    }
  }

  #[test]
  fn quad_aligned_resume_is_bit_exact() {
    let mut storage = Vec::new();
    let data = gen_bytes(256, 0xDEAD_BEEF_CAFE_F00D);
    let view = at_parity(&mut storage, &data, false);
    let whole = csum_partial(view, 0x1234);
    for split in [0, 4, 8, 12, 40, 64, 100, 128, 252, 256] {
      let resumed = csum_partial(&view[split..], csum_partial(&view[..split], 0x1234));
      assert_eq!(resumed, whole, "split {split}");
    }
  }

  #[test]
  fn even_resume_preserves_folded_sum() {
    let mut storage = Vec::new();
    let data = gen_bytes(250, 0x0F1E_2D3C_4B5A_6978);
    let view = at_parity(&mut storage, &data, false);
    let whole = fold::fold32(csum_partial(view, 0));
    for split in [2, 6, 10, 38, 66, 98, 126, 246] {
      let resumed = csum_partial(&view[split..], csum_partial(&view[..split], 0));
      assert_eq!(fold::fold32(resumed), whole, "split {split}");
    }
  }
}

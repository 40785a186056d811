//! Reference checksum implementation.
//!
//! A slow, obviously-correct model of the Internet checksum used to validate
//! the kernels: 16-bit little-endian words (the byte at the even offset is
//! the low byte) summed with end-around carry, a trailing odd byte added as
//! a bare low byte.
//!
//! | Property | Value |
//! |----------|-------|
//! | Word | 16-bit little-endian |
//! | Arithmetic | ones' complement (mod `2^16 - 1`) |
//! | Zero | only for zero seed and all-zero data |

// Index arithmetic is bounded by the enclosing loop conditions; `const fn`
// rules out iterator forms.
#![allow(clippy::indexing_slicing)]

/// Fully folded 16-bit sum of `data` on top of `initial`, uncomplemented.
pub(crate) const fn sum16(data: &[u8], initial: u32) -> u16 {
  let mut total: u64 = initial as u64;
  let mut index = 0;
  while index + 1 < data.len() {
    total += (data[index] as u64) | ((data[index + 1] as u64) << 8);
    index += 2;
  }
  if index < data.len() {
    total += data[index] as u64;
  }
  while total > 0xFFFF {
    total = (total >> 16) + (total & 0xFFFF);
  }
  total as u16
}

/// The checksum as quoted in protocol documents, most-significant byte first.
pub(crate) const fn wire_checksum(data: &[u8]) -> u16 {
  (!sum16(data, 0)).swap_bytes()
}

/// The classic worked example: a 20-byte IPv4 header with the checksum field
/// zeroed, whose checksum is 0xB861.
pub(crate) const IPV4_HEADER: [u8; 20] = [
  0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xC0, 0xA8, 0x00, 0x01,
  0xC0, 0xA8, 0x00, 0xC7,
];

const _: () = {
  assert!(wire_checksum(&IPV4_HEADER) == 0xB861);
  assert!(sum16(&[0u8; 40], 0) == 0);
  assert!(sum16(&[], 0) == 0);
};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_is_initial() {
    assert_eq!(sum16(&[], 0), 0);
    assert_eq!(sum16(&[], 0x1234), 0x1234);
    // Initial values wider than 16 bits fold down first.
    assert_eq!(sum16(&[], 0x0001_0000), 1);
  }

  #[test]
  fn odd_byte_is_low_byte() {
    assert_eq!(sum16(&[0xAB], 0), 0x00AB);
    assert_eq!(sum16(&[0x01, 0x02, 0xAB], 0), 0x0201 + 0x00AB);
  }

  #[test]
  fn carries_wrap_end_around() {
    // 0xFFFF + 0x0001 wraps to 0x0001.
    assert_eq!(sum16(&[0xFF, 0xFF, 0x01, 0x00], 0), 1);
    // A sum congruent to zero lands on the all-ones representative.
    assert_eq!(sum16(&[0xFF, 0xFF, 0xFF, 0xFF], 0), 0xFFFF);
  }

  #[test]
  fn ipv4_header_verifies_to_all_ones() {
    let mut header = IPV4_HEADER;
    header[10] = 0xB8;
    header[11] = 0x61;
    assert_eq!(sum16(&header, 0), 0xFFFF);
    assert_eq!(wire_checksum(&header), 0);
  }
}

//! Portable renditions of the 40-byte strategies.
//!
//! Each function mirrors the word grouping of its hardware counterpart, so
//! intermediate and final values match those kernels exactly, not merely as
//! checksums. All four agree with each other and with the general
//! accumulation path on the final 32-bit value.

use crate::common::fold;

fn load_words(data: &[u8]) -> [u64; 5] {
  debug_assert_eq!(data.len(), 40);
  let mut words = [0u64; 5];
  for (slot, chunk) in words.iter_mut().zip(data.chunks_exact(8)) {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(chunk);
    *slot = u64::from_le_bytes(bytes);
  }
  words
}

fn load_dwords(data: &[u8]) -> [u32; 10] {
  debug_assert_eq!(data.len(), 40);
  let mut dwords = [0u32; 10];
  for (slot, chunk) in dwords.iter_mut().zip(data.chunks_exact(4)) {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(chunk);
    *slot = u32::from_le_bytes(bytes);
  }
  dwords
}

/// One dependent chain over the five words.
pub(crate) fn sequential(sum: u32, data: &[u8]) -> u32 {
  let [w0, w1, w2, w3, w4] = load_words(data);
  let total = u128::from(sum)
    + u128::from(w0)
    + u128::from(w1)
    + u128::from(w2)
    + u128::from(w3)
    + u128::from(w4);
  fold::fold64(fold::fold128(total))
}

/// Two independent chains, three words and two words, merged at the end.
pub(crate) fn dual_chain(sum: u32, data: &[u8]) -> u32 {
  let [w0, w1, w2, w3, w4] = load_words(data);
  let low = fold::fold128(u128::from(sum) + u128::from(w0) + u128::from(w1) + u128::from(w2));
  let high = fold::fold128(u128::from(w3) + u128::from(w4));
  fold::fold64(fold::add_sums64(low, high))
}

/// Two interleaved chains over alternating words, as the `adcx`/`adox`
/// kernel splits them.
pub(crate) fn flag_pair(sum: u32, data: &[u8]) -> u32 {
  let [w0, w1, w2, w3, w4] = load_words(data);
  let even = fold::fold128(u128::from(sum) + u128::from(w0) + u128::from(w2) + u128::from(w4));
  let odd = fold::fold128(u128::from(w1) + u128::from(w3));
  fold::fold64(fold::add_sums64(even, odd))
}

/// Ten 32-bit words summed in three short chains.
pub(crate) fn word32_tree(sum: u32, data: &[u8]) -> u32 {
  let [d0, d1, d2, d3, d4, d5, d6, d7, d8, d9] = load_dwords(data);
  let a = fold::fold64(u64::from(sum) + u64::from(d0) + u64::from(d1) + u64::from(d2));
  let b = fold::fold64(u64::from(d3) + u64::from(d4) + u64::from(d5));
  let c = fold::fold64(u64::from(d6) + u64::from(d7) + u64::from(d8) + u64::from(d9));
  fold::add_sums(fold::add_sums(a, b), c)
}

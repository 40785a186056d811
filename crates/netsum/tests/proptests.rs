//! Property-based tests for the Internet checksum.
//!
//! These tests verify invariants that must hold for all inputs, not just
//! specific test vectors. Uses proptest for randomized input generation.

use netsum::{Checksum, ChecksumCombine, InetChecksum, csum_partial, fold};
use proptest::prelude::*;

// Test Strategies

/// Generate arbitrary byte vectors up to 8KB.
fn arb_data() -> impl Strategy<Value = Vec<u8>> {
  prop::collection::vec(any::<u8>(), 0..8192)
}

/// Generate multiple split points for chunked testing.
fn arb_splits(len: usize, count: usize) -> impl Strategy<Value = Vec<usize>> {
  prop::collection::vec(0..=len, count).prop_map(move |mut splits| {
    splits.sort();
    splits.push(len);
    splits.dedup();
    splits
  })
}

// Generic Property Tests

/// Incremental updates produce the same result as one-shot.
fn prop_incremental_equals_oneshot<C: Checksum>(data: &[u8], split: usize) -> bool {
  let split = split.min(data.len());
  let (a, b) = data.split_at(split);

  let oneshot = C::checksum(data);

  let mut incremental = C::new();
  incremental.update(a);
  incremental.update(b);

  incremental.finalize() == oneshot
}

/// Many incremental updates produce the same result as one-shot.
fn prop_multi_incremental<C: Checksum>(data: &[u8], splits: &[usize]) -> bool {
  let oneshot = C::checksum(data);

  let mut hasher = C::new();
  let mut prev = 0;
  for &split in splits {
    let split = split.min(data.len());
    if split > prev {
      hasher.update(&data[prev..split]);
      prev = split;
    }
  }
  if prev < data.len() {
    hasher.update(&data[prev..]);
  }

  hasher.finalize() == oneshot
}

/// Reset returns the hasher to its initial state.
fn prop_reset_works<C: Checksum>(data: &[u8]) -> bool {
  let mut hasher = C::new();
  hasher.update(data);
  hasher.reset();
  hasher.update(data);

  hasher.finalize() == C::checksum(data)
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(1000))]

  #[test]
  fn incremental_equals_oneshot(data in arb_data(), split in 0..8192usize) {
    prop_assert!(prop_incremental_equals_oneshot::<InetChecksum>(&data, split));
  }

  #[test]
  fn multi_incremental(data in arb_data(), splits in arb_splits(8192, 5)) {
    prop_assert!(prop_multi_incremental::<InetChecksum>(&data, &splits));
  }

  #[test]
  fn reset_works(data in arb_data()) {
    prop_assert!(prop_reset_works::<InetChecksum>(&data));
  }

  #[test]
  fn vectored_equals_oneshot(data in arb_data(), splits in arb_splits(8192, 3)) {
    let mut bufs: Vec<&[u8]> = Vec::new();
    let mut prev = 0;
    for &split in &splits {
      let split = split.min(data.len());
      if split > prev {
        bufs.push(&data[prev..split]);
        prev = split;
      }
    }
    if prev < data.len() {
      bufs.push(&data[prev..]);
    }

    prop_assert_eq!(InetChecksum::checksum_vectored(&bufs), InetChecksum::checksum(&data));
  }

  #[test]
  fn combine_correctness(data in arb_data(), split in 0..8192usize) {
    let split = split.min(data.len());
    let (a, b) = data.split_at(split);

    let sum_a = InetChecksum::checksum(a);
    let sum_b = InetChecksum::checksum(b);

    prop_assert_eq!(InetChecksum::combine(sum_a, sum_b, a.len()), InetChecksum::checksum(&data));
  }

  #[test]
  fn combine_is_associative(data in arb_data(), s1 in 0..8192usize, s2 in 0..8192usize) {
    let i = s1.min(data.len());
    let j = s2.min(data.len());
    let (i, j) = (i.min(j), i.max(j));
    let (a, rest) = data.split_at(i);
    let (b, c) = rest.split_at(j - i);

    let oneshot = InetChecksum::checksum(&data);

    let left = InetChecksum::combine(
      InetChecksum::combine(InetChecksum::checksum(a), InetChecksum::checksum(b), a.len()),
      InetChecksum::checksum(c),
      a.len() + b.len(),
    );
    let right = InetChecksum::combine(
      InetChecksum::checksum(a),
      InetChecksum::combine(InetChecksum::checksum(b), InetChecksum::checksum(c), b.len()),
      a.len(),
    );

    prop_assert_eq!(left, oneshot);
    prop_assert_eq!(right, oneshot);
  }

  #[test]
  fn resume_correctness(data in arb_data(), split in 0..8192usize) {
    // A finalized u16 cannot carry an unpaired byte, so resuming is
    // specified for even-length prefixes only.
    let split = split.min(data.len()) & !1;
    let (a, b) = data.split_at(split);

    let mut resumed = InetChecksum::with_initial(InetChecksum::checksum(a));
    resumed.update(b);

    prop_assert_eq!(resumed.finalize(), InetChecksum::checksum(&data));
  }

  #[test]
  fn update_range_matches_recompute(
    data in prop::collection::vec(any::<u8>(), 1..4096),
    raw_offset in 0..4096usize,
    patch in prop::collection::vec(any::<u8>(), 0..64),
  ) {
    let offset = raw_offset.min(data.len()) & !1;
    let len = patch.len().min(data.len() - offset);

    let mut edited = data.clone();
    edited[offset..offset + len].copy_from_slice(&patch[..len]);

    let mut hasher = InetChecksum::new();
    hasher.update(&data);
    hasher.update_range(offset, &data[offset..offset + len], &patch[..len]);

    prop_assert_eq!(hasher.finalize(), InetChecksum::checksum(&edited));
  }

  #[test]
  fn single_bit_flips_are_detected(
    data in prop::collection::vec(any::<u8>(), 1..2048),
    index in any::<prop::sample::Index>(),
    bit in 0..8u32,
  ) {
    let i = index.index(data.len());
    let mut flipped = data.clone();
    flipped[i] ^= 1 << bit;

    prop_assert_ne!(InetChecksum::checksum(&flipped), InetChecksum::checksum(&data));
  }

  #[test]
  fn seed_chaining_preserves_the_fold(
    data in arb_data(),
    split in 0..8192usize,
    seed in any::<u32>(),
  ) {
    // csum_partial pairs bytes by address, so pin the buffer to an even
    // one before splitting it.
    let mut storage = Vec::with_capacity(data.len() + 1);
    let offset = storage.as_ptr() as usize & 1;
    storage.resize(offset, 0);
    storage.extend_from_slice(&data);
    let view = &storage[offset..];

    let split = split.min(view.len()) & !1;
    let (a, b) = view.split_at(split);

    let whole = fold::fold32(csum_partial(view, seed));
    let chained = fold::fold32(csum_partial(b, csum_partial(a, seed)));

    prop_assert_eq!(chained, whole);
  }
}

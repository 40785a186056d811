//! Fuzz target for the Internet checksum implementation.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Incremental updates produce same result as one-shot
//! - Combine and resume produce correct results

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use netsum::{ChecksumCombine, InetChecksum};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  split_point: usize,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let split = input.split_point % (data.len() + 1);

  // One-shot computation
  let oneshot = InetChecksum::checksum(data);

  // Incremental computation
  let (a, b) = data.split_at(split);
  let mut hasher = InetChecksum::new();
  hasher.update(a);
  hasher.update(b);
  let incremental = hasher.finalize();

  assert_eq!(oneshot, incremental, "incremental mismatch");

  // Combine computation
  let sum_a = InetChecksum::checksum(a);
  let sum_b = InetChecksum::checksum(b);
  let combined = InetChecksum::combine(sum_a, sum_b, a.len());

  assert_eq!(oneshot, combined, "combine mismatch");

  // Resume computation (exact from an even-length prefix)
  if split & 1 == 0 {
    let mut resumed = InetChecksum::with_initial(sum_a);
    resumed.update(b);
    let resume_result = resumed.finalize();

    assert_eq!(oneshot, resume_result, "resume mismatch");
  }
});

//! Fuzz target for the checksum combine operation.
//!
//! Tests combine correctness over arbitrary multi-way splits.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use netsum::{ChecksumCombine, InetChecksum};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  splits: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  if data.is_empty() {
    return;
  }

  // Normalize splits to valid range and sort
  let mut splits: Vec<usize> = input.splits.iter().map(|s| s % (data.len() + 1)).collect();
  splits.sort();
  splits.dedup();

  let expected = InetChecksum::checksum(data);

  let mut chunks = Vec::new();
  let mut prev = 0;
  for &split in &splits {
    if split > prev && split <= data.len() {
      chunks.push(&data[prev..split]);
      prev = split;
    }
  }
  if prev < data.len() {
    chunks.push(&data[prev..]);
  }

  // Combine left to right; only the prefix length feeds each merge
  let mut combined = InetChecksum::checksum(chunks[0]);
  let mut prefix_len = chunks[0].len();
  for chunk in &chunks[1..] {
    let chunk_sum = InetChecksum::checksum(chunk);
    combined = InetChecksum::combine(combined, chunk_sum, prefix_len);
    prefix_len += chunk.len();
  }

  assert_eq!(combined, expected, "combine chain mismatch");
});

//! Fuzz target for the streaming checksum API.
//!
//! Tests that arbitrary sequences of update calls produce correct results.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use netsum::InetChecksum;

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = InetChecksum::checksum(data);

  // Replay the buffer with arbitrary chunk sizes
  let mut hasher = InetChecksum::new();
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      (input.chunk_sizes[chunk_idx % input.chunk_sizes.len()] % 256).max(1)
    };

    let end = (offset + chunk_size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    chunk_idx += 1;
  }

  assert_eq!(hasher.finalize(), expected, "streaming mismatch");

  // finalize() is non-consuming; a second call returns the same value
  assert_eq!(hasher.finalize(), expected, "finalize is not idempotent");

  // reset() then replaying the whole buffer matches one-shot
  hasher.reset();
  hasher.update(data);
  assert_eq!(hasher.finalize(), expected, "reset mismatch");
});

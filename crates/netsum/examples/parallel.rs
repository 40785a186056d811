//! Parallel checksum computation using combine().
//!
//! The Internet checksum is combinable: given sum(A) and sum(B), the sum
//! of the concatenation follows from the two values and the length of A.
//! This enables parallel processing of large buffers.
//!
//! Run with: `cargo run --example parallel -p netsum`

use std::thread;

use netsum::{ChecksumCombine, InetChecksum};

fn main() {
  println!("=== Parallel Checksum Examples ===\n");

  combine_basics();
  parallel_chunks();
  threaded_example();
}

/// Basic combine() demonstration.
fn combine_basics() {
  println!("--- Combine Basics ---\n");

  let data = b"hello world";
  let (part_a, part_b) = data.split_at(6); // "hello " and "world"

  // Compute checksums of each part independently
  let sum_a = InetChecksum::checksum(part_a);
  let sum_b = InetChecksum::checksum(part_b);

  println!("Part A (\"hello \"): 0x{sum_a:04X}");
  println!("Part B (\"world\"):  0x{sum_b:04X}");

  // Combine to get the checksum of the full data. Only the length of the
  // first part matters; an odd length swaps the second sum's bytes.
  let combined = InetChecksum::combine(sum_a, sum_b, part_a.len());
  let expected = InetChecksum::checksum(data);

  println!("Combined:           0x{combined:04X}");
  println!("Full data checksum: 0x{expected:04X}");
  assert_eq!(combined, expected);
  println!("Match!\n");

  // Works with any number of parts - combine left to right, tracking the
  // length of the prefix combined so far
  let parts: &[&[u8]] = &[b"one", b"two", b"three"];
  let full: Vec<u8> = parts.iter().flat_map(|p| p.iter().copied()).collect();

  let mut result = InetChecksum::checksum(parts[0]);
  let mut prefix_len = parts[0].len();
  for part in &parts[1..] {
    let part_sum = InetChecksum::checksum(part);
    result = InetChecksum::combine(result, part_sum, prefix_len);
    prefix_len += part.len();
  }

  println!("Multi-part combine: 0x{result:04X}");
  println!("Full data verify:   0x{:04X}", InetChecksum::checksum(&full));
  assert_eq!(result, InetChecksum::checksum(&full));
  println!();
}

/// Processing large data in parallel chunks.
fn parallel_chunks() {
  println!("--- Parallel Chunk Processing ---\n");

  // Simulate a large buffer (in practice, a memory-mapped file or a
  // scatter-gather list)
  let data: Vec<u8> = (0..1_000_000).map(|i| (i % 256) as u8).collect();

  let chunk_size = 250_000; // 4 chunks of 250KB each

  // Sequential: reference result
  let sequential = InetChecksum::checksum(&data);
  println!("Sequential checksum: 0x{sequential:04X}");

  // Parallel: compute each chunk's sum, then combine
  let chunks: Vec<_> = data.chunks(chunk_size).collect();
  let chunk_sums: Vec<_> = chunks.iter().map(|c| InetChecksum::checksum(c)).collect();

  let mut parallel = chunk_sums[0];
  let mut prefix_len = chunks[0].len();
  for (sum, chunk) in chunk_sums[1..].iter().zip(&chunks[1..]) {
    parallel = InetChecksum::combine(parallel, *sum, prefix_len);
    prefix_len += chunk.len();
  }

  println!("Parallel checksum:   0x{parallel:04X}");
  assert_eq!(sequential, parallel);
  println!("Match! (processed {} chunks)\n", chunks.len());
}

/// Multi-threaded checksum using std::thread.
fn threaded_example() {
  println!("--- Multi-Threaded Example ---\n");

  // Generate test data
  let data: Vec<u8> = (0..4_000_000).map(|i| ((i * 17) % 256) as u8).collect();

  let num_threads = 4;
  let chunk_size = data.len() / num_threads;

  // Sequential reference
  let sequential = InetChecksum::checksum(&data);
  println!("Sequential: 0x{sequential:04X}");

  // Split data into chunks with their indices
  let chunks: Vec<(usize, &[u8])> = data.chunks(chunk_size).enumerate().collect();

  // Spawn threads to compute each chunk's sum
  let handles: Vec<_> = chunks
    .into_iter()
    .map(|(idx, chunk)| {
      let chunk = chunk.to_vec(); // Clone for thread ownership
      thread::spawn(move || {
        let sum = InetChecksum::checksum(&chunk);
        (idx, sum, chunk.len())
      })
    })
    .collect();

  // Collect results in order
  let mut results: Vec<(usize, u16, usize)> = handles
    .into_iter()
    .map(|h| h.join().expect("thread panicked"))
    .collect();
  results.sort_by_key(|(idx, _, _)| *idx);

  // Combine in order, tracking the prefix length
  let mut combined = results[0].1;
  let mut prefix_len = results[0].2;
  for (_, sum, len) in &results[1..] {
    combined = InetChecksum::combine(combined, *sum, prefix_len);
    prefix_len += *len;
  }

  println!("Threaded:   0x{combined:04X}");
  assert_eq!(sequential, combined);
  println!("Match! (used {} threads)\n", num_threads);
}

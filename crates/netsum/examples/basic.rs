//! Basic Internet checksum usage: one-shot, streaming, and resume APIs.
//!
//! Run with: `cargo run --example basic -p netsum`

use netsum::InetChecksum;

// IPv4 header for 192.168.0.1 -> 192.168.0.199 (UDP, total length 115)
// with the checksum field zeroed.
const IPV4_HEADER: [u8; 20] = [
  0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00, 0xC0, 0xA8, 0x00, 0x01,
  0xC0, 0xA8, 0x00, 0xC7,
];

fn main() {
  println!("=== Internet Checksum Basic Examples ===\n");

  one_shot_example();
  streaming_example();
  resume_example();
  incremental_update_example();
}

/// One-shot computation: fastest when the whole datagram is in memory.
fn one_shot_example() {
  println!("--- One-Shot Computation ---\n");

  // Checksumming a header whose checksum field is zeroed yields the value
  // to store in that field, already in wire byte order.
  let check = InetChecksum::checksum(&IPV4_HEADER);
  println!("IPv4 header checksum: 0x{check:04X}");
  assert_eq!(check, 0xB861);

  // A receiver checksums the header with the field filled in; a valid
  // header yields zero.
  let mut stored = IPV4_HEADER;
  stored[10..12].copy_from_slice(&check.to_be_bytes());
  let verify = InetChecksum::checksum(&stored);
  println!("Stored header verifies: 0x{verify:04X}");
  assert_eq!(verify, 0);

  println!();
}

/// Streaming computation: process a datagram in chunks.
fn streaming_example() {
  println!("--- Streaming Computation ---\n");

  // Chunk boundaries never change the result, odd splits included.
  let mut hasher = InetChecksum::new();
  hasher.update(&IPV4_HEADER[..7]);
  hasher.update(&IPV4_HEADER[7..]);
  let check = hasher.finalize();

  println!("Streaming checksum: 0x{check:04X}");
  assert_eq!(check, InetChecksum::checksum(&IPV4_HEADER));

  // finalize() is non-consuming: can continue after
  hasher.update(b"payload bytes");
  let extended = hasher.finalize();
  println!("Extended checksum:  0x{extended:04X}");

  // reset() clears state for reuse
  hasher.reset();
  hasher.update(b"new datagram");
  let fresh = hasher.finalize();
  println!("Reset checksum:     0x{fresh:04X}");

  println!();
}

/// Resume computation from a saved checksum.
fn resume_example() {
  println!("--- Resume from a Saved Checksum ---\n");

  // Resuming is exact when the saved prefix has even length.
  let part1 = b"first part of a datagram";
  let part2 = b" and the second part";

  let saved = InetChecksum::checksum(part1);
  println!("Checksum after part1:  0x{saved:04X}");

  let mut resumed = InetChecksum::with_initial(saved);
  resumed.update(part2);
  let check = resumed.finalize();
  println!("Checksum after resume: 0x{check:04X}");

  // Verify: should match processing all at once
  let mut full = InetChecksum::new();
  full.update(part1);
  full.update(part2);
  assert_eq!(check, full.finalize());
  println!("Verified: matches the full computation");

  println!();
}

/// Incremental update: patch a checksum after a small in-place edit.
fn incremental_update_example() {
  println!("--- Incremental Update ---\n");

  // A router decrementing the TTL does not re-checksum the whole header.
  let mut header = IPV4_HEADER;
  let mut hasher = InetChecksum::new();
  hasher.update(&header);
  println!("Checksum before edit: 0x{:04X}", hasher.finalize());

  // Patch the TTL/protocol word at offset 8: TTL 0x40 -> 0x3F.
  let old = [header[8], header[9]];
  header[8] -= 1;
  let new = [header[8], header[9]];
  hasher.update_range(8, &old, &new);

  let updated = hasher.finalize();
  println!("Checksum after edit:  0x{updated:04X}");

  assert_eq!(updated, InetChecksum::checksum(&header));
  println!("Verified: matches a fresh checksum of the edited header");

  println!();
}

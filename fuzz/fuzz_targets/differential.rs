//! Differential fuzzing against a textbook RFC 1071 rendition.
//!
//! Compares the dispatched kernels and every kernel reachable through the
//! benchmarking registry against a direct big-endian word sum to catch any
//! discrepancies.

#![no_main]

use libfuzzer_sys::fuzz_target;
use netsum::{InetChecksum, bench, csum_partial, fold};

fuzz_target!(|data: &[u8]| {
  let expected = reference_checksum(data);

  let ours = InetChecksum::checksum(data);
  assert_eq!(
    ours,
    expected,
    "checksum differential mismatch: ours={ours:#06x}, reference={expected:#06x}, len={}",
    data.len()
  );

  // The raw partial sum folds and complements to the same wire value
  let partial = csum_partial(data, 0);
  assert_eq!(
    !fold::fold32(partial).swap_bytes(),
    expected,
    "csum_partial differential mismatch, len={}",
    data.len()
  );

  // Every registered accumulation kernel agrees after folding
  let folded = (!expected).swap_bytes();
  for name in bench::available_accum_kernels() {
    let Some(kernel) = bench::get_accum_kernel(name) else {
      panic!("accum kernel should exist for name={name}");
    };
    let got = fold::fold32(fold::fold64((kernel.func)(0, data)));
    assert_eq!(got, folded, "accum kernel {name} mismatch, len={}", data.len());
  }

  // Every registered 40-byte block kernel agrees on the leading block
  if let Some(block) = data.first_chunk::<40>() {
    let want = (!reference_checksum(block)).swap_bytes();
    for name in bench::available_block40_kernels() {
      let Some(kernel) = bench::get_block40_kernel(name) else {
        panic!("block40 kernel should exist for name={name}");
      };
      let got = fold::fold32((kernel.func)(0, block));
      assert_eq!(got, want, "block40 kernel {name} mismatch");
    }
  }
});

/// Textbook RFC 1071 checksum: big-endian 16-bit words, end-around carry,
/// final complement. Deliberately shares nothing with the library's
/// little-endian word convention.
fn reference_checksum(data: &[u8]) -> u16 {
  let mut total: u64 = 0;
  let mut words = data.chunks_exact(2);
  for word in &mut words {
    total += u64::from(u16::from_be_bytes([word[0], word[1]]));
  }
  if let Some(&last) = words.remainder().first() {
    total += u64::from(last) << 8;
  }
  while total > 0xFFFF {
    total = (total & 0xFFFF) + (total >> 16);
  }
  !(total as u16)
}

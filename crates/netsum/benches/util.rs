use std::sync::Once;

use netsum::dispatchers;

#[allow(dead_code)] // Used by `benches/csum.rs` (but not by `benches/kernels.rs`).
pub const STREAM_CHUNK_BYTES: usize = 31;

pub const CASES: &[(&str, usize)] = &[
  ("hdr", 40),
  ("s", 256),
  ("mtu", 1460),
  ("l", 64usize.strict_mul(1024)),
  ("xl", 1024usize.strict_mul(1024)),
];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Parity {
  /// A slice starting at an even address (word-aligned entry).
  Even,
  /// A slice starting at an odd address (byte-swapped entry).
  Odd,
}

impl Parity {
  pub const ALL: [Self; 2] = [Self::Even, Self::Odd];

  #[inline]
  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      Self::Even => "even",
      Self::Odd => "odd",
    }
  }

  #[inline]
  #[must_use]
  pub const fn bit(self) -> usize {
    match self {
      Self::Even => 0,
      Self::Odd => 1,
    }
  }
}

pub struct BenchData {
  parity: Parity,
  backing: Vec<u8>,
  offset: usize,
  len: usize,
}

impl BenchData {
  #[inline]
  #[must_use]
  pub fn parity_copy(src: &[u8], parity: Parity) -> Self {
    let len = src.len();
    let backing_len = len.strict_add(2);
    let mut backing = vec![0u8; backing_len];

    let base = backing.as_ptr() as usize;
    let offset = (base & 1) ^ parity.bit();
    let end = offset.strict_add(len);

    backing[offset..end].copy_from_slice(src);
    debug_assert_eq!(backing[offset..].as_ptr() as usize & 1, parity.bit());

    Self {
      parity,
      backing,
      offset,
      len,
    }
  }

  #[inline]
  #[must_use]
  pub fn parity(&self) -> Parity {
    self.parity
  }

  #[inline]
  #[must_use]
  pub fn as_slice(&self) -> &[u8] {
    let end = self.offset.strict_add(self.len);
    &self.backing[self.offset..end]
  }
}

#[must_use]
pub fn make_data(len: usize) -> Vec<u8> {
  (0..len)
    .map(|i| (i as u8).wrapping_mul(31).wrapping_add(i.strict_shr(8) as u8))
    .collect()
}

#[must_use]
pub fn make_parity_variants(src: &[u8]) -> Vec<BenchData> {
  Parity::ALL
    .iter()
    .map(|&parity| BenchData::parity_copy(src, parity))
    .collect()
}

#[inline]
#[must_use]
pub fn bench_param_label(size_label: &str, parity: Parity) -> String {
  format!("{size_label}@{}", parity.label())
}

/// Print platform detection info once at benchmark start.
pub fn print_platform_info() {
  static ONCE: Once = Once::new();
  ONCE.call_once(|| {
    let caps = platform::caps();
    eprintln!("╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║                   PLATFORM DETECTION INFO                    ║");
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    eprintln!("║ Platform: {}", platform::describe(caps));
    eprintln!("║ Bench parities: even, odd");
    eprintln!("╠══════════════════════════════════════════════════════════════╣");
    eprintln!("║ Dispatcher selection:");
    eprintln!("║   accum:       {}", dispatchers::ACCUM.backend_name());
    eprintln!("║   sequential:  {}", dispatchers::BLOCK40_SEQUENTIAL.backend_name());
    eprintln!("║   dual-chain:  {}", dispatchers::BLOCK40_DUAL_CHAIN.backend_name());
    eprintln!("║   flag-pair:   {}", dispatchers::BLOCK40_FLAG_PAIR.backend_name());
    eprintln!("║   word32-tree: {}", dispatchers::BLOCK40_WORD32_TREE.backend_name());
    eprintln!("║   auto:        {}", dispatchers::BLOCK40_AUTO.backend_name());
    eprintln!("╚══════════════════════════════════════════════════════════════╝");
  });
}

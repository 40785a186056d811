//! Checksum of exactly 40 bytes.
//!
//! Forty bytes is the fixed-header hot case: an IPv6 header, or an IPv4
//! header plus a TCP header without options. At that size kernel latency is
//! set by the shape of the carry chain rather than by throughput, so this
//! module keeps several shapes side by side behind one signature and lets
//! the dispatcher or the caller pick.
//!
//! The length is a contract, not a checked argument: [`csum_block40`] takes
//! `&[u8; 40]` so the contract is enforced by the type.

pub(crate) mod portable;

#[cfg(all(target_arch = "x86_64", not(miri)))]
pub(crate) mod x86_64;

#[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
pub(crate) mod aarch64;

use crate::dispatchers;

/// Carry-chain shape used for the 40-byte kernels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainStrategy {
  /// One dependent chain: every add waits on the previous carry.
  Sequential,
  /// Two independent chains (three words and two words) merged by a final
  /// end-around add.
  DualChain,
  /// Two chains interleaved on separate carry flags. Runs on the x86 ADX
  /// extension (`adcx`/`adox`); elsewhere it falls back to the portable
  /// rendition of the same grouping.
  FlagPairDual,
  /// Ten 32-bit words summed in three short chains, trading a wider word
  /// for shorter dependency runs.
  Word32Tree,
}

impl ChainStrategy {
  /// Every strategy, in the order they grew out of the sequential chain.
  pub const ALL: [ChainStrategy; 4] = [
    ChainStrategy::Sequential,
    ChainStrategy::DualChain,
    ChainStrategy::FlagPairDual,
    ChainStrategy::Word32Tree,
  ];

  /// Short name used in diagnostics and benchmark labels.
  #[must_use]
  pub const fn label(self) -> &'static str {
    match self {
      ChainStrategy::Sequential => "sequential",
      ChainStrategy::DualChain => "dual-chain",
      ChainStrategy::FlagPairDual => "flag-pair",
      ChainStrategy::Word32Tree => "word32-tree",
    }
  }
}

/// Checksum exactly 40 bytes on top of `sum`.
///
/// Semantically identical to [`csum_partial`](crate::csum_partial) over the
/// same bytes at an even address, including the returned representative.
/// The strategy is chosen once per process: the flag-pair kernel where ADX
/// is available, the dual chain otherwise.
#[inline]
#[must_use]
pub fn csum_block40(block: &[u8; 40], sum: u32) -> u32 {
  dispatchers::BLOCK40_AUTO.call(sum, block)
}

/// Checksum exactly 40 bytes with an explicit chain strategy.
///
/// All strategies return the same value; this entry point exists to compare
/// them. Each strategy dispatches to its hardware kernel when the CPU
/// provides one and to its portable rendition otherwise.
#[inline]
#[must_use]
pub fn csum_block40_with(strategy: ChainStrategy, block: &[u8; 40], sum: u32) -> u32 {
  match strategy {
    ChainStrategy::Sequential => dispatchers::BLOCK40_SEQUENTIAL.call(sum, block),
    ChainStrategy::DualChain => dispatchers::BLOCK40_DUAL_CHAIN.call(sum, block),
    ChainStrategy::FlagPairDual => dispatchers::BLOCK40_FLAG_PAIR.call(sum, block),
    ChainStrategy::Word32Tree => dispatchers::BLOCK40_WORD32_TREE.call(sum, block),
  }
}

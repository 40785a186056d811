//! Streaming checksum state and wire presentation.
//!
//! [`InetChecksum`] carries the ones'-complement running total across
//! arbitrarily chunked input. Chunk boundaries never have to respect the
//! 16-bit word grid: a trailing unpaired byte is held until the next update
//! supplies its word partner, so feeding a message byte by byte finalizes to
//! the same value as one shot.
//!
//! Internally the total lives in the little-endian word convention shared
//! with [`csum_partial`](crate::csum_partial). Only [`finalize`] crosses into
//! wire presentation: it complements the folded total and swaps it into
//! network byte order, so the returned `u16`, stored big-endian in a
//! checksum field, makes the whole message sum to `0xFFFF`.
//!
//! [`finalize`]: InetChecksum::finalize

use traits::{Checksum, ChecksumCombine};

use crate::common::fold;
use crate::dispatchers;

/// Internet checksum hasher (RFC 1071).
///
/// Computes the 16-bit ones'-complement checksum used by IPv4, TCP, UDP and
/// ICMP. Input may arrive in chunks of any length, including odd ones.
///
/// # Properties
///
/// - **Sum**: ones'-complement addition of 16-bit words, low byte first
/// - **Final step**: complement, presented in wire byte order
/// - **Empty input**: finalizes to `0xFFFF`
/// - **Verification**: a message carrying its correct checksum finalizes to `0`
///
/// # Hardware Acceleration
///
/// - **x86_64**: 64-bit `add`/`adc` carry chains
/// - **aarch64**: `adds`/`adcs` carry chains over `ldp` pairs
///
/// # Example
///
/// ```
/// use netsum::{Checksum, InetChecksum};
///
/// // IPv4 header with a zeroed checksum field.
/// let header: [u8; 20] = [
///   0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00,
///   0xC0, 0xA8, 0x00, 0x01, 0xC0, 0xA8, 0x00, 0xC7,
/// ];
/// assert_eq!(InetChecksum::checksum(&header), 0xB861);
/// ```
#[derive(Clone, Default)]
pub struct InetChecksum {
  /// Running total in the little-endian word convention, folded to 32 bits
  /// after every update.
  sum: u32,
  /// Trailing byte of an odd-length update, waiting for its word partner.
  pending: Option<u8>,
}

impl InetChecksum {
  /// Create a hasher with an all-zero running total.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { sum: 0, pending: None }
  }

  /// Resume from a previously finalized checksum.
  ///
  /// `with_initial(checksum(a))` followed by `update(b)` finalizes to the
  /// checksum of `a` and `b` concatenated, provided `a` has even length. An
  /// odd-length prefix leaves an unpaired byte that a finalized `u16` cannot
  /// carry.
  #[inline]
  #[must_use]
  pub const fn with_initial(initial: u16) -> Self {
    Self { sum: (!initial).swap_bytes() as u32, pending: None }
  }

  /// Absorb `data` into the running total.
  pub fn update(&mut self, data: &[u8]) {
    let mut data = data;
    if let Some(low) = self.pending.take() {
      let Some((&high, rest)) = data.split_first() else {
        self.pending = Some(low);
        return;
      };
      self.sum = fold::add_sums(self.sum, u32::from(u16::from_le_bytes([low, high])));
      data = rest;
    }
    let (paired, tail) = data.split_at(data.len() & !1);
    self.sum = fold::fold64(dispatchers::ACCUM.call(u64::from(self.sum), paired));
    if let Some((&last, _)) = tail.split_first() {
      self.pending = Some(last);
    }
  }

  /// Fold the running total to 16 bits. A pending trailing byte counts as
  /// the low half of a final zero-padded word.
  const fn folded(&self) -> u16 {
    let total = match self.pending {
      Some(low) => fold::add_sums(self.sum, low as u32),
      None => self.sum,
    };
    fold::fold32(total)
  }

  /// Complemented checksum in wire byte order.
  ///
  /// Does not consume the state; more data may be absorbed afterwards.
  #[inline]
  #[must_use]
  pub const fn finalize(&self) -> u16 {
    !self.folded().swap_bytes()
  }

  /// Restore the hasher to its initial state.
  #[inline]
  pub fn reset(&mut self) {
    self.sum = 0;
    self.pending = None;
  }

  /// Checksum `data` in one call.
  #[inline]
  #[must_use]
  pub fn checksum(data: &[u8]) -> u16 {
    let mut hasher = Self::new();
    hasher.update(data);
    hasher.finalize()
  }

  /// Replace the contribution of `old` with `new` without re-summing the
  /// rest of the message (RFC 1624).
  ///
  /// `offset` is the byte position of the replaced range within the already
  /// absorbed data. It must be even, so the replacement keeps every byte on
  /// the same half of its 16-bit word, and `new` must be as long as `old`.
  /// The range length itself may be odd.
  pub fn update_range(&mut self, offset: usize, old: &[u8], new: &[u8]) {
    debug_assert_eq!(offset & 1, 0, "replaced range must start on a word boundary");
    debug_assert_eq!(old.len(), new.len(), "replacement must preserve length");
    let removed = fold::fold32(fold::fold64(dispatchers::ACCUM.call(0, old)));
    let inserted = fold::fold64(dispatchers::ACCUM.call(0, new));
    self.sum = fold::add_sums(fold::add_sums(self.sum, u32::from(!removed)), inserted);
  }

  /// Name of the accumulation backend selected for this process.
  ///
  /// Returns the implementation name (e.g., "portable", "x86_64/adc").
  #[must_use]
  pub fn backend_name() -> &'static str {
    dispatchers::ACCUM.backend_name()
  }
}

impl Checksum for InetChecksum {
  const OUTPUT_SIZE: usize = 2;
  type Output = u16;

  #[inline]
  fn new() -> Self {
    InetChecksum::new()
  }

  #[inline]
  fn with_initial(initial: u16) -> Self {
    InetChecksum::with_initial(initial)
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    InetChecksum::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> u16 {
    InetChecksum::finalize(self)
  }

  #[inline]
  fn reset(&mut self) {
    InetChecksum::reset(self);
  }

  #[inline]
  fn checksum(data: &[u8]) -> u16 {
    InetChecksum::checksum(data)
  }
}

impl ChecksumCombine for InetChecksum {
  /// Combine finalized checksums of adjacent chunks in O(1).
  ///
  /// When `len_a` is odd, every byte of the second chunk sits on the
  /// opposite half of its 16-bit word; a byte swap of the second sum puts
  /// its contribution back in place.
  fn combine(sum_a: u16, sum_b: u16, len_a: usize) -> u16 {
    let a = !sum_a;
    let b = if len_a & 1 == 0 { !sum_b } else { (!sum_b).swap_bytes() };
    !fold::fold32(u32::from(a) + u32::from(b))
  }
}

#[cfg(feature = "std")]
impl std::io::Write for InetChecksum {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    self.update(buf);
    Ok(buf.len())
  }

  #[inline]
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

//! Checksum traits.
//!
//! Traits for checksum algorithms like the RFC 1071 Internet checksum.
//!
//! - **Performance**: Zero-cost abstractions, inline-friendly
//! - **Streaming**: Incremental updates for large or fragmented data
//! - **Parallelism**: Combine operation for parallel chunk processing

use core::fmt::Debug;

/// A checksum algorithm.
///
/// Provides the core interface for checksum computation with support for
/// incremental updates and streaming data.
///
/// # Usage
///
/// ```rust,ignore
/// use netsum::InetChecksum;
/// use traits::Checksum;
///
/// // One-shot (fastest for data already in memory)
/// let sum = InetChecksum::checksum(&packet);
///
/// // Streaming (for incremental or fragmented data)
/// let mut hasher = InetChecksum::new();
/// hasher.update(&header);
/// hasher.update(&payload);
/// let sum = hasher.finalize();
/// ```
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `finalize()` must be idempotent (calling multiple times returns same value)
/// - `reset()` must restore the hasher to its initial state
pub trait Checksum: Clone + Default {
  /// Output size in bytes.
  ///
  /// - Internet checksum: 2
  /// - CRC32: 4
  const OUTPUT_SIZE: usize;

  /// The checksum output type.
  ///
  /// Typically `u16` for the Internet checksum, `u32` for CRC32.
  type Output: Copy + Eq + Debug + Default;

  /// Create a new hasher with the default initial value.
  #[must_use]
  fn new() -> Self;

  /// Create a new hasher with a custom initial value.
  ///
  /// Useful for resuming a checksum computation. Implementations document
  /// what the initial value means; for the Internet checksum it is a
  /// previously finalized checksum of data that ended on a 16-bit boundary.
  #[must_use]
  fn with_initial(initial: Self::Output) -> Self;

  /// Update the hasher with additional data.
  ///
  /// This method can be called multiple times to process data incrementally.
  /// Splitting the input at any byte boundary must not change the final value.
  fn update(&mut self, data: &[u8]);

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// Semantics are identical to calling [`update`](Self::update) on each buffer
  /// in order, but implementations may fuse dispatch and reduce per-buffer
  /// overhead. Packet fragments are the typical use.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  ///
  /// This is a convenience for integrating with vectored I/O APIs.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) {
    for buf in bufs {
      self.update(buf);
    }
  }

  /// Finalize and return the checksum.
  ///
  /// This method does not consume the hasher, allowing further updates
  /// if needed (though the result would include all data processed so far).
  #[must_use]
  fn finalize(&self) -> Self::Output;

  /// Reset the hasher to its initial state.
  ///
  /// After calling this, the hasher behaves as if newly constructed.
  fn reset(&mut self);

  /// Compute the checksum of data in one shot.
  ///
  /// This is the fastest path for small to medium data that fits in memory.
  /// For large data or streaming, use [`new`](Self::new) + [`update`](Self::update).
  #[inline]
  #[must_use]
  fn checksum(data: &[u8]) -> Self::Output {
    let mut h = Self::new();
    h.update(data);
    h.finalize()
  }

  /// Compute the checksum of multiple buffers in one shot.
  #[inline]
  #[must_use]
  fn checksum_vectored(bufs: &[&[u8]]) -> Self::Output {
    let mut h = Self::new();
    h.update_vectored(bufs);
    h.finalize()
  }

  /// Compute the checksum of `std::io::IoSlice` buffers in one shot.
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn checksum_io_slices(bufs: &[std::io::IoSlice<'_>]) -> Self::Output {
    let mut h = Self::new();
    h.update_io_slices(bufs);
    h.finalize()
  }

  /// Wrap a reader to compute the checksum transparently during I/O.
  ///
  /// # Example
  ///
  /// ```rust,ignore
  /// use netsum::InetChecksum;
  /// use std::fs::File;
  ///
  /// let file = File::open("payload.bin")?;
  /// let mut reader = InetChecksum::reader(file);
  /// std::io::copy(&mut reader, &mut std::io::sink())?;
  /// println!("checksum: {:04x}", reader.sum());
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::ChecksumReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumReader::new(inner)
  }

  /// Wrap a writer to compute the checksum transparently during I/O.
  ///
  /// # Example
  ///
  /// ```rust,ignore
  /// use netsum::InetChecksum;
  ///
  /// let mut writer = InetChecksum::writer(Vec::new());
  /// writer.write_all(&payload)?;
  /// let (buf, sum) = writer.into_parts();
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::ChecksumWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::ChecksumWriter::new(inner)
  }
}

/// Checksums that support parallel computation via combination.
///
/// The combine operation computes `sum(A || B)` from `sum(A)`, `sum(B)`, and
/// `len(A)` in O(1) time. This enables parallel checksum computation:
///
/// 1. Split data into chunks
/// 2. Compute checksums in parallel
/// 3. Combine results
///
/// # Mathematical Background
///
/// For the Internet checksum, end-around-carry addition is associative, so
/// checksums of adjacent chunks add directly when the split point is even.
/// When the first chunk has odd length, the second chunk's bytes all sit at
/// flipped positions within their 16-bit words, which a byte swap of
/// `sum(B)` corrects. Hence the combine needs `len(A)` (only its parity).
///
/// # Usage
///
/// ```rust,ignore
/// use netsum::InetChecksum;
/// use traits::{Checksum, ChecksumCombine};
///
/// let (a, b) = data.split_at(7);
///
/// let sum_a = InetChecksum::checksum(a);
/// let sum_b = InetChecksum::checksum(b);
///
/// // Combine produces sum(a || b)
/// let combined = InetChecksum::combine(sum_a, sum_b, a.len());
/// assert_eq!(combined, InetChecksum::checksum(data));
/// ```
pub trait ChecksumCombine: Checksum {
  /// Combine two checksums.
  ///
  /// Given `sum_a = sum(A)` and `sum_b = sum(B)`, computes `sum(A || B)`.
  ///
  /// # Arguments
  ///
  /// * `sum_a` - Checksum of the first part (A)
  /// * `sum_b` - Checksum of the second part (B)
  /// * `len_a` - Length of the first part in bytes
  #[must_use]
  fn combine(sum_a: Self::Output, sum_b: Self::Output, len_a: usize) -> Self::Output;
}

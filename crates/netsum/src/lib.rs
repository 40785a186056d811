//! Internet checksum (RFC 1071) with latency-tuned carry chains.
//!
//! This crate computes the 16-bit ones'-complement checksum used by IPv4,
//! TCP, UDP and ICMP. Bulk accumulation runs on hardware carry-chain kernels
//! selected at run time, and the 40-byte fixed-header case gets its own
//! family of latency-shaped kernels.
//!
//! # Entry Points
//!
//! | Entry point | Input | Use case |
//! |-------------|-------|----------|
//! | [`InetChecksum`] | any chunking | streaming, wire-order output |
//! | [`csum_partial`] | one slice plus seed | raw accumulation, resumable |
//! | [`csum_block40`] | exactly 40 bytes | IPv6 / IPv4+TCP header fast path |
//!
//! # Carry-Chain Strategies
//!
//! The 40-byte path keeps four kernel shapes behind one signature; see
//! [`ChainStrategy`]. All return identical sums and differ only in how the
//! carry chains schedule:
//!
//! | Strategy | Shape |
//! |----------|-------|
//! | [`ChainStrategy::Sequential`] | one dependent `add`/`adc` chain |
//! | [`ChainStrategy::DualChain`] | two chains merged by an end-around add |
//! | [`ChainStrategy::FlagPairDual`] | two chains on separate carry flags |
//! | [`ChainStrategy::Word32Tree`] | ten 32-bit words in three short chains |
//!
//! # Hardware Acceleration
//!
//! | Target | Kernels |
//! |--------|---------|
//! | x86_64 | 64-bit `add`/`adc` chains; `adcx`/`adox` pair on ADX CPUs |
//! | aarch64 | `adds`/`adcs` chains over `ldp` pairs |
//! | elsewhere | portable 128-bit accumulation |
//!
//! # Example
//!
//! ```rust
//! use netsum::{Checksum, ChecksumCombine, InetChecksum};
//!
//! // IPv4 header with a zeroed checksum field.
//! let header: [u8; 20] = [
//!   0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0x00, 0x00,
//!   0xC0, 0xA8, 0x00, 0x01, 0xC0, 0xA8, 0x00, 0xC7,
//! ];
//!
//! // One-shot computation
//! let sum = InetChecksum::checksum(&header);
//! assert_eq!(sum, 0xB861);
//!
//! // Streaming computation, chunked anywhere
//! let mut hasher = InetChecksum::new();
//! hasher.update(&header[..7]);
//! hasher.update(&header[7..]);
//! assert_eq!(hasher.finalize(), sum);
//!
//! // Parallel combine
//! let (a, b) = header.split_at(9);
//! let combined = InetChecksum::combine(
//!   InetChecksum::checksum(a),
//!   InetChecksum::checksum(b),
//!   a.len(),
//! );
//! assert_eq!(combined, sum);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the `std` feature for embedded
//! use:
//!
//! ```toml
//! [dependencies]
//! netsum = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod common;

mod block40;
mod partial;
mod stream;

pub mod dispatchers;

#[cfg(feature = "alloc")]
pub mod bench;

#[cfg(feature = "std")]
pub mod io;

pub use block40::{ChainStrategy, csum_block40, csum_block40_with};
pub use common::fold;
#[cfg(feature = "std")]
pub use io::{ChecksumReader, ChecksumWriter};
pub use partial::csum_partial;
pub use stream::InetChecksum;
// Re-export traits for convenience
pub use traits::{Checksum, ChecksumCombine};

//! Core traits for the netsum workspace.
//!
//! This crate provides the foundational traits that checksum implementations
//! conform to. It is `no_std` compatible and has zero dependencies.
//!
//! # Trait Hierarchy
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Checksum`] | Streaming checksums | Internet checksum (RFC 1071) |
//! | [`ChecksumCombine`] | Parallel checksum combination | O(1) parity-aware combine |
//!
//! # I/O Adapters
//!
//! With the `std` feature, [`io::ChecksumReader`] and [`io::ChecksumWriter`]
//! compute a checksum transparently while data flows through standard I/O.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod checksum;
#[cfg(feature = "std")]
pub mod io;

pub use checksum::{Checksum, ChecksumCombine};

//! Backend crate: kernel dispatch primitives for the netsum workspace.
//!
//! This crate provides the foundation for the acceleration subsystem:
//!
//! - **Dispatch**: Zero-cost (compile-time) or cached (runtime) kernel selection
//! - **Capabilities**: Re-exports from `platform` for capability-based dispatch
//!
//! # Architecture
//!
//! The dispatch system has two paths:
//!
//! 1. **Compile-time selection** (zero-cost): When target features are known at compile time (`-C
//!    target-feature=...`), the selector can resolve to a direct function call with no overhead.
//!
//! 2. **Runtime selection** (cached): For generic binaries, the dispatcher detects CPU features
//!    once and caches the selected kernel. Subsequent calls are a single indirect call.
//!
//! # Usage
//!
//! Algorithm crates register kernels as an ordered list of `Candidate`s.
//! Use the [`candidates!`] macro for concise syntax:
//!
//! ```ignore
//! use backend::dispatch::{Selected, select};
//! use backend::candidates;
//! use platform::{Caps, caps::x86};
//!
//! fn select_accum() -> Selected<fn(u64, &[u8]) -> u64> {
//!     let caps = platform::caps();
//!     select(caps, candidates![
//!         "x86_64/adx" => x86::ADX   => adx_kernel,
//!         "portable"   => Caps::NONE => portable_kernel,
//!     ])
//! }
//! ```
//!
//! The macro expands to `&[Candidate::new(...), ...]`, providing a cleaner
//! syntax while maintaining zero runtime overhead.

// Fallibility discipline: deny unwrap/expect in production, allow in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;

// Re-export core dispatch types for convenience.
pub use dispatch::{Candidate, Selected, select};
// Re-export platform types for convenience.
pub use platform;

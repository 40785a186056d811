//! CPU detection and capabilities for the netsum workspace.
//!
//! This crate is the **single source of truth** for CPU feature detection
//! across the workspace. Kernel selection in the checksum crates queries
//! `platform::caps()` instead of doing ad-hoc detection.
//!
//! # Core Type
//!
//! - [`Caps`]: What instructions can run on this machine (a 256-bit feature bitset)
//!
//! # Main Entry Point
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//!
//! if caps.has(x86::ADX) {
//!     // Use the adcx/adox flag-pair kernel
//! }
//! ```
//!
//! # Design Philosophy
//!
//! 1. **One API**: Algorithms query `platform::caps()` instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`, avoiding runtime
//!    overhead.
//! 3. **Cached otherwise**: Runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! 4. **Miri-safe**: Under Miri, always returns portable-only caps.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

pub mod caps;
mod detect;

// ─────────────────────────────────────────────────────────────────────────────
// Public API
// ─────────────────────────────────────────────────────────────────────────────

pub use caps::{Arch, Caps};
pub use detect::detect_uncached;

/// Get detected CPU capabilities.
///
/// This is the main entry point for capability-based dispatch.
///
/// # Caching
///
/// - With `std`: Results are cached in a `OnceLock` (one-time detection).
/// - Without `std`: Results are cached using atomics (one-time detection).
///
/// # Miri
///
/// Under Miri, always returns portable-only capabilities.
///
/// # Example
///
/// ```ignore
/// let caps = platform::caps();
///
/// if caps.has(platform::caps::x86::ADX) {
///     // Two-flag carry chains are available
/// }
/// ```
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get()
}

/// Initialize with user-supplied capabilities.
///
/// Call this before any call to [`caps()`] to bypass runtime detection.
/// This is useful for:
/// - Bare metal environments without runtime detection support
/// - Embedded systems where the CPU is known at deployment
/// - Testing specific code paths
#[inline]
pub fn init_with_caps(caps: Caps) {
  detect::init_with_caps(caps);
}

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] will return the override value instead of detecting.
/// Pass `None` to clear the override and resume detection.
///
/// # Thread Safety
///
/// This function is thread-safe but should typically be called early in
/// program initialization, before any calls to [`caps()`].
///
/// # Example
///
/// ```ignore
/// // In tests
/// platform::set_caps_override(Some(Caps::NONE));
/// // ... run tests with portable fallback ...
/// platform::set_caps_override(None);
/// ```
#[inline]
pub fn set_caps_override(value: Option<Caps>) {
  detect::set_caps_override(value);
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  detect::has_override()
}

/// Render a capability set as a human-readable feature list.
///
/// Intended for diagnostics and benchmark banners, e.g.
/// `"x86_64: sse2 sse4.2 avx2 bmi2 adx"`.
#[cfg(feature = "std")]
#[must_use]
pub fn describe(caps: Caps) -> std::string::String {
  use core::fmt::Write;

  let mut out = std::string::String::new();
  let _ = write!(out, "{}:", Arch::current().name());

  let names = match Arch::current() {
    Arch::X86_64 | Arch::X86 => caps::x86::NAMES,
    Arch::Aarch64 | Arch::Arm => caps::aarch64::NAMES,
    _ => &[],
  };

  let mut any = false;
  for (bit, name) in names {
    if caps.has(*bit) {
      let _ = write!(out, " {name}");
      any = true;
    }
  }
  if !any {
    out.push_str(" portable");
  }
  out
}

#[cfg(all(test, feature = "std"))]
mod tests {
  use super::*;

  #[test]
  fn describe_names_the_arch() {
    let s = describe(Caps::NONE);
    assert!(s.starts_with(Arch::current().name()));
    assert!(s.ends_with("portable"));
  }

  #[test]
  fn describe_lists_features() {
    #[cfg(target_arch = "x86_64")]
    {
      let s = describe(caps::x86::SSE2 | caps::x86::ADX);
      assert!(s.contains("sse2"));
      assert!(s.contains("adx"));
    }
  }
}

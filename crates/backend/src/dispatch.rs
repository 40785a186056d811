//! Kernel dispatch: selection and caching.
//!
//! This module provides the core dispatch primitives for the workspace:
//!
//! - [`Candidate`]: A kernel with capability requirements
//! - [`Selected`]: The result of kernel selection
//! - [`select`]: Choose the best kernel from a candidate list
//! - [`define_dispatcher!`](crate::define_dispatcher): Generate a caching dispatcher newtype
//!
//! # Design
//!
//! The dispatch system has two paths:
//!
//! 1. **Compile-time selection** (zero-cost): When target features are known at compile time,
//!    dispatch can be resolved to a direct function call with no overhead. This is handled in the
//!    algorithm crate's selector function using `cfg!` guards.
//!
//! 2. **Runtime selection** (cached): For generic binaries, the dispatcher detects CPU features
//!    once and caches the selected kernel. Subsequent calls are a single indirect call.
//!
//! # Usage
//!
//! Algorithm crates register kernels as an ordered list of `Candidate`s.
//! Use the [`candidates!`](crate::candidates) macro for concise syntax:
//!
//! ```ignore
//! use backend::dispatch::{Selected, select};
//! use backend::candidates;
//! use platform::caps::x86;
//! use platform::Caps;
//!
//! fn select_accum() -> Selected<fn(u64, &[u8]) -> u64> {
//!     let caps = platform::caps();
//!     select(caps, candidates![
//!         "x86_64/adx"  => x86::ADX   => adx_kernel,
//!         "portable"    => Caps::NONE => portable_kernel,
//!     ])
//! }
//! ```

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/adx").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
///
/// Contains the selected kernel's name and function pointer.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
///
/// # Panics
///
/// Panics if `candidates` is empty or no candidate matches. The last
/// candidate should always have `requires = Caps::NONE` as a fallback.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  // This should never happen if the candidate list has a portable fallback.
  panic!("No matching kernel found! Candidate list must include a portable fallback.");
}

// ─────────────────────────────────────────────────────────────────────────────
// Macros
// ─────────────────────────────────────────────────────────────────────────────

/// Build a candidate list for [`select`](crate::dispatch::select).
///
/// Expands to `&[Candidate::new(...), ...]`. Each entry is
/// `"name" => required_caps => kernel_fn`.
///
/// ```ignore
/// select(caps, candidates![
///     "x86_64/adx" => x86::ADX   => adx_kernel,
///     "portable"   => Caps::NONE => portable_kernel,
/// ])
/// ```
#[macro_export]
macro_rules! candidates {
  ($($name:expr => $requires:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $func)),+]
  };
}

/// Define a caching dispatcher newtype for a kernel signature.
///
/// Each kernel family gets its own dispatcher type for type safety. The
/// generated type caches the selected kernel on first access: under `std`
/// in a `OnceLock`, without `std` in atomics.
///
/// # Arguments
///
/// - Doc attributes to attach to the generated type
/// - The dispatcher type name
/// - The kernel function pointer type, `fn(State, &[u8]) -> State`
/// - The kernel state type
///
/// ```ignore
/// pub type AccumFn = fn(u64, &[u8]) -> u64;
///
/// backend::define_dispatcher!(
///   /// Dispatcher for wide-accumulator kernels.
///   AccumDispatcher, AccumFn, u64
/// );
/// ```
#[macro_export]
macro_rules! define_dispatcher {
  ($(#[$meta:meta])* $name:ident, $fnty:ty, $state:ty) => {
    $(#[$meta])*
    pub struct $name {
      #[cfg(feature = "std")]
      inner: ::std::sync::OnceLock<$crate::dispatch::Selected<$fnty>>,

      #[cfg(not(feature = "std"))]
      func: ::core::sync::atomic::AtomicPtr<()>,
      #[cfg(not(feature = "std"))]
      name_ptr: ::core::sync::atomic::AtomicPtr<u8>,
      #[cfg(not(feature = "std"))]
      name_len: ::core::sync::atomic::AtomicUsize,

      /// The selector function that chooses the best kernel.
      selector: fn() -> $crate::dispatch::Selected<$fnty>,
    }

    impl $name {
      /// Create a new dispatcher with the given selector function.
      ///
      /// The selector is called once on first access to choose the best kernel.
      #[must_use]
      pub const fn new(selector: fn() -> $crate::dispatch::Selected<$fnty>) -> Self {
        Self {
          #[cfg(feature = "std")]
          inner: ::std::sync::OnceLock::new(),

          #[cfg(not(feature = "std"))]
          func: ::core::sync::atomic::AtomicPtr::new(::core::ptr::null_mut()),
          #[cfg(not(feature = "std"))]
          name_ptr: ::core::sync::atomic::AtomicPtr::new(::core::ptr::null_mut()),
          #[cfg(not(feature = "std"))]
          name_len: ::core::sync::atomic::AtomicUsize::new(0),

          selector,
        }
      }

      /// Get the selected kernel, initializing on first call.
      #[inline]
      #[must_use]
      pub fn get(&self) -> $crate::dispatch::Selected<$fnty> {
        #[cfg(feature = "std")]
        {
          *self.inner.get_or_init(|| (self.selector)())
        }

        #[cfg(not(feature = "std"))]
        {
          use ::core::sync::atomic::Ordering;

          let func_ptr = self.func.load(Ordering::Acquire);
          if func_ptr.is_null() {
            // First access: run selector and store result
            let selected = (self.selector)();

            let new_func_ptr = selected.func as *mut ();
            self.func.store(new_func_ptr, Ordering::Release);

            // Store name pointer and length separately (Rust strings are NOT null-terminated)
            let name_ptr = selected.name.as_ptr() as *mut u8;
            self.name_ptr.store(name_ptr, Ordering::Release);
            self.name_len.store(selected.name.len(), Ordering::Release);

            selected
          } else {
            // Already initialized: reconstruct Selected from cached values
            // SAFETY: func_ptr was stored from a valid function pointer of this type
            #[allow(unsafe_code)]
            let func: $fnty = unsafe { ::core::mem::transmute(func_ptr) };

            let name_ptr = self.name_ptr.load(Ordering::Acquire);
            let name_len = self.name_len.load(Ordering::Acquire);

            let name = if name_ptr.is_null() || name_len == 0 {
              "unknown"
            } else {
              // SAFETY: name_ptr and name_len were stored from a valid &'static str
              #[allow(unsafe_code)]
              unsafe {
                ::core::str::from_utf8_unchecked(::core::slice::from_raw_parts(name_ptr, name_len))
              }
            };
            $crate::dispatch::Selected { name, func }
          }
        }
      }

      /// Get the name of the selected backend.
      #[inline]
      #[must_use]
      pub fn backend_name(&self) -> &'static str {
        self.get().name
      }

      /// Call the selected kernel.
      #[inline]
      #[must_use]
      pub fn call(&self, state: $state, data: &[u8]) -> $state {
        (self.get().func)(state, data)
      }
    }

    // SAFETY: the dispatcher uses OnceLock (std) or atomic operations (no_std),
    // both of which are thread-safe. The stored function pointers are read-only after init.
    #[allow(unsafe_code)]
    unsafe impl Sync for $name {}
    #[allow(unsafe_code)]
    unsafe impl Send for $name {}
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  type TestFn = fn(u32, &[u8]) -> u32;

  fn portable_kernel(_state: u32, _data: &[u8]) -> u32 {
    0xDEADBEEF
  }

  fn fast_kernel(_state: u32, _data: &[u8]) -> u32 {
    0xCAFEBABE
  }

  #[test]
  fn candidate_creation() {
    let c: Candidate<TestFn> = Candidate::new("test", Caps::NONE, portable_kernel);
    assert_eq!(c.name, "test");
    assert_eq!(c.requires, Caps::NONE);
  }

  #[test]
  fn select_portable_fallback() {
    let caps = Caps::NONE;
    let candidates: &[Candidate<TestFn>] = candidates![
      "fast" => Caps::bit(0) => fast_kernel,
      "portable" => Caps::NONE => portable_kernel,
    ];

    let selected = select(caps, candidates);
    assert_eq!(selected.name, "portable");
    assert_eq!((selected.func)(0, &[]), 0xDEADBEEF);
  }

  #[test]
  fn select_best_match() {
    let caps = Caps::bit(0);
    let candidates: &[Candidate<TestFn>] = candidates![
      "fast" => Caps::bit(0) => fast_kernel,
      "portable" => Caps::NONE => portable_kernel,
    ];

    let selected = select(caps, candidates);
    assert_eq!(selected.name, "fast");
    assert_eq!((selected.func)(0, &[]), 0xCAFEBABE);
  }

  #[test]
  fn select_skips_unavailable() {
    // Caps have bit 0, but not bit 1
    let caps = Caps::bit(0);
    let candidates: &[Candidate<TestFn>] = candidates![
      "needs_bit1" => Caps::bit(1) => fast_kernel,
      "needs_bit0" => Caps::bit(0) => fast_kernel,
      "portable" => Caps::NONE => portable_kernel,
    ];

    let selected = select(caps, candidates);
    assert_eq!(selected.name, "needs_bit0");
  }

  crate::define_dispatcher!(
    /// Test dispatcher.
    TestDispatcher, TestFn, u32
  );

  fn test_selector() -> Selected<TestFn> {
    Selected::new("test", portable_kernel)
  }

  #[test]
  fn dispatcher_caches_selection() {
    static DISPATCH: TestDispatcher = TestDispatcher::new(test_selector);

    let selected = DISPATCH.get();
    assert_eq!(selected.name, "test");

    // Second call should return cached result
    let selected2 = DISPATCH.get();
    assert_eq!(selected2.name, "test");

    let result = DISPATCH.call(0, &[]);
    assert_eq!(result, 0xDEADBEEF);
  }

  #[test]
  fn dispatcher_backend_name() {
    static DISPATCH: TestDispatcher = TestDispatcher::new(test_selector);
    assert_eq!(DISPATCH.backend_name(), "test");
  }
}

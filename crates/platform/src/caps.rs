//! CPU capability representation.
//!
//! This module provides a unified capability model for the architectures the
//! checksum kernels care about. It answers the question: "What instructions
//! can I legally run on this machine?"
//!
//! # Design
//!
//! [`Caps`] is a 256-bit bitset representing available CPU features. Each bit
//! corresponds to a specific ISA extension. The bits are architecture-specific
//! but the API is uniform across all targets.
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86/x86_64 features
//! - Bits 64-127: aarch64/arm features
//! - Bits 128-255: reserved for future architectures
//!
//! # Usage
//!
//! ```ignore
//! use platform::caps::x86;
//!
//! let c = platform::caps();
//! if c.has(x86::ADX) {
//!     // Use the adcx/adox flag-pair kernel
//! }
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 256-bit feature bitset.
///
/// This is the core type for capability-based dispatch. Use [`has()`](Caps::has)
/// to check if required features are available.
///
/// # Thread Safety
///
/// `Caps` is `Copy`, `Send`, and `Sync`. It can be freely shared across threads.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 4]);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self([0; 4]);

  /// Create a capability set from raw words.
  ///
  /// This is primarily useful for testing and fuzzing. Normal usage should
  /// prefer the predefined constants.
  ///
  /// # Availability
  ///
  /// Only available when the `testing` feature is enabled or in test builds.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 4]) -> Self {
    Self(words)
  }

  /// Check if all features in `required` are present.
  ///
  /// This is the core dispatch check, marked `#[inline(always)]` for zero overhead.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0]
      && (self.0[1] & required.0[1]) == required.0[1]
      && (self.0[2] & required.0[2]) == required.0[2]
      && (self.0[3] & required.0[3]) == required.0[3]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([
      self.0[0] | other.0[0],
      self.0[1] | other.0[1],
      self.0[2] | other.0[2],
      self.0[3] | other.0[3],
    ])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([
      self.0[0] & other.0[0],
      self.0[1] & other.0[1],
      self.0[2] & other.0[2],
      self.0[3] & other.0[3],
    ])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones() + self.0[3].count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// Bit must be 0-255 (enforced by the `u8` parameter type).
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    // Use match instead of indexing to satisfy const evaluation
    let mut bits = [0u64; 4];
    match word {
      0 => bits[0] = 1u64 << bit_in_word,
      1 => bits[1] = 1u64 << bit_in_word,
      2 => bits[2] = 1u64 << bit_in_word,
      _ => bits[3] = 1u64 << bit_in_word,
    }
    Self(bits)
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    let word = (bit / 64) as usize;
    let bit_in_word = bit % 64;
    let bits_word = match word {
      0 => self.0[0],
      1 => self.0[1],
      2 => self.0[2],
      _ => self.0[3],
    };
    (bits_word & (1u64 << bit_in_word)) != 0
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(
      f,
      "Caps({:#018x}, {:#018x}, {:#018x}, {:#018x})",
      self.0[0], self.0[1], self.0[2], self.0[3]
    )
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Arm,
  Riscv64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(target_arch = "arm")]
    {
      Self::Arm
    }
    #[cfg(target_arch = "riscv64")]
    {
      Self::Riscv64
    }
    #[cfg(not(any(
      target_arch = "x86_64",
      target_arch = "x86",
      target_arch = "aarch64",
      target_arch = "arm",
      target_arch = "riscv64"
    )))]
    {
      Self::Other
    }
  }

  /// Returns the human-readable name for this architecture.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Arm => "arm",
      Self::Riscv64 => "riscv64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features relevant to carry-chain and wide-add kernels.
pub mod x86 {
  use super::Caps;

  // ─── Baseline SIMD ───
  pub const SSE2: Caps = Caps::bit(0);
  pub const SSE42: Caps = Caps::bit(1);
  pub const AVX2: Caps = Caps::bit(2);

  // ─── Bit Manipulation / Flag Arithmetic ───
  pub const BMI1: Caps = Caps::bit(8);
  pub const BMI2: Caps = Caps::bit(9);
  pub const POPCNT: Caps = Caps::bit(10);
  pub const LZCNT: Caps = Caps::bit(11);

  /// ADX: `adcx`/`adox`, add-with-carry through CF and OF independently.
  ///
  /// This is the feature that enables the flag-pair dual-chain strategy:
  /// two carry chains run concurrently without serializing on one flag.
  pub const ADX: Caps = Caps::bit(12);

  /// Names for the bits above, used by `platform::describe()`.
  pub const NAMES: &[(Caps, &str)] = &[
    (SSE2, "sse2"),
    (SSE42, "sse4.2"),
    (AVX2, "avx2"),
    (BMI1, "bmi1"),
    (BMI2, "bmi2"),
    (POPCNT, "popcnt"),
    (LZCNT, "lzcnt"),
    (ADX, "adx"),
  ];
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features relevant to this crate.
///
/// The scalar `adds`/`adcs` chain the kernels use is baseline A64, so nothing
/// here gates a kernel today; the bits exist for diagnostics and future SIMD
/// accumulators.
pub mod aarch64 {
  use super::Caps;

  /// NEON (Advanced SIMD). Baseline on AArch64.
  pub const NEON: Caps = Caps::bit(64);
  /// CRC32 extension.
  pub const CRC: Caps = Caps::bit(65);
  /// Large System Extensions (ARMv8.1 atomics).
  pub const LSE: Caps = Caps::bit(66);

  /// Names for the bits above, used by `platform::describe()`.
  pub const NAMES: &[(Caps, &str)] = &[(NEON, "neon"), (CRC, "crc"), (LSE, "lse")];
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none_is_empty() {
    assert!(Caps::NONE.is_empty());
    assert_eq!(Caps::NONE.count(), 0);
  }

  #[test]
  fn bit_roundtrip() {
    for bit in [0u8, 1, 12, 63, 64, 66, 127, 128, 255] {
      let c = Caps::bit(bit);
      assert!(c.has_bit(bit), "bit {bit} not set");
      assert_eq!(c.count(), 1);
    }
  }

  #[test]
  fn has_requires_all_bits() {
    let need = x86::ADX.union(x86::BMI2);
    assert!(!x86::ADX.has(need));
    assert!(need.has(x86::ADX));
    assert!(need.has(need));
    assert!(need.has(Caps::NONE));
  }

  #[test]
  fn union_and_intersection() {
    let a = x86::ADX | x86::AVX2;
    let b = x86::AVX2 | aarch64::NEON;
    assert_eq!(a.intersection(b), x86::AVX2);
    assert_eq!((a | b).count(), 3);
  }

  #[test]
  fn arch_bits_do_not_collide() {
    // x86 bits live in word 0, aarch64 bits in word 1.
    assert!(x86::ADX.0[1] == 0 && x86::ADX.0[0] != 0);
    assert!(aarch64::NEON.0[0] == 0 && aarch64::NEON.0[1] != 0);
  }
}

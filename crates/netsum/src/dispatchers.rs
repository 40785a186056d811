//! Kernel dispatchers.
//!
//! One dispatcher per kernel family, each caching its selection on first
//! use. Selection is by capability: candidate lists are ordered best first
//! and always end in a portable fallback, so every target resolves. Only
//! the accumulation function is dispatched; entry adjustments, folds, and
//! the odd-byte exit live in the callers and are identical for every
//! backend.
//!
//! Inline asm is unavailable under Miri, so the asm candidates compile out
//! there and Miri runs exercise the portable kernels.

use backend::dispatch::Selected;
use platform::Caps;

use crate::block40;
use crate::partial;

/// Signature of accumulation kernels: sum `data` into a 64-bit partial sum
/// as little-endian 64-bit words with end-around carry.
pub type AccumFn = fn(u64, &[u8]) -> u64;

/// Signature of 40-byte kernels: the slice always holds exactly 40 bytes.
pub type Block40Fn = fn(u32, &[u8]) -> u32;

backend::define_dispatcher!(
  /// Dispatcher for whole-range accumulation kernels.
  AccumDispatcher,
  AccumFn,
  u64
);

backend::define_dispatcher!(
  /// Dispatcher for 40-byte block kernels.
  Block40Dispatcher,
  Block40Fn,
  u32
);

/// Accumulation kernel behind [`csum_partial`](crate::csum_partial) and the
/// streaming hasher.
pub static ACCUM: AccumDispatcher = AccumDispatcher::new(select_accum);

/// Sequential-chain 40-byte kernel.
pub static BLOCK40_SEQUENTIAL: Block40Dispatcher = Block40Dispatcher::new(select_block40_sequential);

/// Dual-chain 40-byte kernel.
pub static BLOCK40_DUAL_CHAIN: Block40Dispatcher = Block40Dispatcher::new(select_block40_dual_chain);

/// Flag-pair 40-byte kernel (ADX where available).
pub static BLOCK40_FLAG_PAIR: Block40Dispatcher = Block40Dispatcher::new(select_block40_flag_pair);

/// 32-bit tree 40-byte kernel.
pub static BLOCK40_WORD32_TREE: Block40Dispatcher = Block40Dispatcher::new(select_block40_word32_tree);

/// Default 40-byte kernel: flag-pair where ADX is available, dual-chain
/// otherwise.
pub static BLOCK40_AUTO: Block40Dispatcher = Block40Dispatcher::new(select_block40_auto);

#[allow(unreachable_code)]
fn select_accum() -> Selected<AccumFn> {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "x86_64/adc" => Caps::NONE => partial::x86_64::accumulate,
        "portable" => Caps::NONE => partial::portable::accumulate,
      ],
    );
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "aarch64/adcs" => Caps::NONE => partial::aarch64::accumulate,
        "portable" => Caps::NONE => partial::portable::accumulate,
      ],
    );
  }

  Selected::new("portable", partial::portable::accumulate as AccumFn)
}

#[allow(unreachable_code)]
fn select_block40_sequential() -> Selected<Block40Fn> {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "x86_64/sequential" => Caps::NONE => block40::x86_64::sequential,
        "portable/sequential" => Caps::NONE => block40::portable::sequential,
      ],
    );
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "aarch64/sequential" => Caps::NONE => block40::aarch64::sequential,
        "portable/sequential" => Caps::NONE => block40::portable::sequential,
      ],
    );
  }

  Selected::new("portable/sequential", block40::portable::sequential as Block40Fn)
}

#[allow(unreachable_code)]
fn select_block40_dual_chain() -> Selected<Block40Fn> {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "x86_64/dual-chain" => Caps::NONE => block40::x86_64::dual_chain,
        "portable/dual-chain" => Caps::NONE => block40::portable::dual_chain,
      ],
    );
  }

  #[cfg(all(target_arch = "aarch64", target_endian = "little", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "aarch64/dual-chain" => Caps::NONE => block40::aarch64::dual_chain,
        "portable/dual-chain" => Caps::NONE => block40::portable::dual_chain,
      ],
    );
  }

  Selected::new("portable/dual-chain", block40::portable::dual_chain as Block40Fn)
}

#[allow(unreachable_code)]
fn select_block40_flag_pair() -> Selected<Block40Fn> {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "x86_64/flag-pair" => platform::caps::x86::ADX => block40::x86_64::flag_pair,
        "portable/flag-pair" => Caps::NONE => block40::portable::flag_pair,
      ],
    );
  }

  Selected::new("portable/flag-pair", block40::portable::flag_pair as Block40Fn)
}

#[allow(unreachable_code)]
fn select_block40_word32_tree() -> Selected<Block40Fn> {
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  {
    return backend::select(
      platform::caps(),
      backend::candidates![
        "x86_64/word32-tree" => Caps::NONE => block40::x86_64::word32_tree,
        "portable/word32-tree" => Caps::NONE => block40::portable::word32_tree,
      ],
    );
  }

  Selected::new("portable/word32-tree", block40::portable::word32_tree as Block40Fn)
}

fn select_block40_auto() -> Selected<Block40Fn> {
  if platform::caps().has(platform::caps::x86::ADX) {
    return select_block40_flag_pair();
  }
  select_block40_dual_chain()
}

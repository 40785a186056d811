//! Shared helpers for the checksum kernels.

pub mod fold;
pub(crate) mod reference;
pub(crate) mod tail;

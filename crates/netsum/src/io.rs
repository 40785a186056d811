//! I/O adapters for checksum computation.
//!
//! This module provides [`ChecksumReader`] and [`ChecksumWriter`] which wrap
//! [`std::io::Read`] and [`std::io::Write`] implementations to compute the
//! checksum transparently during I/O operations.
//!
//! Only bytes actually transferred are hashed, so short reads and writes are
//! handled correctly, and the wrapped stream may be read or written in
//! chunks of any length.
//!
//! # Example
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use netsum::{Checksum as _, ChecksumReader, InetChecksum};
//!
//! let mut reader = InetChecksum::reader(Cursor::new(b"hello world".to_vec()));
//! let mut contents = Vec::new();
//! reader.read_to_end(&mut contents)?;
//! assert_eq!(contents, b"hello world");
//! assert_eq!(reader.sum(), InetChecksum::checksum(&contents));
//! # Ok::<(), std::io::Error>(())
//! ```

pub use traits::io::{ChecksumReader, ChecksumWriter};

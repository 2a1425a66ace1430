//! ZIP archive parsing and the ZipCrypto primitive.
//!
//! The module is organized into three parts:
//!
//! - [`structures`]: data structures for the ZIP format elements the
//!   recovery path needs (EOCD, central directory entries, flags)
//! - [`parser`]: low-level parsing of those structures from raw bytes
//! - [`crypto`]: the traditional PKWARE stream cipher
//!
//! A ZIP file is read from the end: the End of Central Directory record
//! locates the Central Directory, which describes every entry. The
//! entry metadata carries everything the password search needs up
//! front (flags, CRC-32, mod time, sizes), so the ciphertext is read
//! exactly once and all subsequent attempts run in memory.
//!
//! ## Limitations
//!
//! - Traditional PKWARE (ZipCrypto) encryption only; WinZip AES entries
//!   are reported as unsupported
//! - STORED and DEFLATE compression methods
//! - No ZIP64 or multi-disk archives

pub mod crypto;
mod parser;
mod structures;

pub use crypto::ZipCryptoKeys;
pub use parser::ZipParser;
pub use structures::*;

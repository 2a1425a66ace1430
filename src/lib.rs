//! # zipcrack
//!
//! A parallel password recovery tool for ZipCrypto-encrypted ZIP
//! entries.
//!
//! The archive is read once: the central directory supplies the target
//! entry's metadata (CRC-32, flags, sizes) and the entry's ciphertext
//! is pulled into memory. The fixed-length key space over a chosen
//! alphabet is then partitioned by first symbol, one worker per
//! alphabet symbol, and every worker drives its own lexicographic
//! candidate generator against the shared attempt oracle until one of
//! them commits the result and cancels the rest.
//!
//! ## Features
//!
//! - Traditional PKWARE (ZipCrypto) encryption, STORED and DEFLATE
//!   entries
//! - Fixed worker pool with cooperative, one-shot cancellation
//! - Lossless global attempt counting and elapsed-time reporting
//! - Ctrl-C aborts the run cleanly, distinct from "not found"
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use zipcrack::{Alphabet, Coordinator, LocalFileReader, ZipEntryOracle, ZipParser};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let reader = Arc::new(LocalFileReader::new(Path::new("storage.zip"))?);
//!     let parser = ZipParser::new(reader);
//!
//!     let entries = parser.list_entries().await?;
//!     let target = entries.iter().find(|e| e.is_encrypted()).unwrap();
//!
//!     let oracle = Arc::new(ZipEntryOracle::load(&parser, target).await?);
//!     let alphabet = Alphabet::parse("abc123")?;
//!     let report = Coordinator::new(alphabet, 5, oracle)?.run().await?;
//!     println!("{:?}", report.outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod crack;
pub mod io;
pub mod zip;

pub use cli::Cli;
pub use crack::{
    Alphabet, AttemptOutcome, Coordinator, Oracle, SearchOutcome, SearchReport, SearchState,
    ZipEntryOracle,
};
pub use io::{LocalFileReader, ReadAt};
pub use zip::{ZipFileEntry, ZipParser};

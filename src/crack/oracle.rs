//! The attempt oracle: one password guess against one archive entry.
//!
//! A wrong password is the overwhelmingly common outcome and is never
//! an error. ZipCrypto rejects roughly 255 of 256 wrong passwords from
//! the 12-byte encryption header alone; the survivors are weeded out
//! by inflating the payload and checking its CRC-32 against the
//! central directory value.

use anyhow::{Result, bail};
use flate2::{Crc, Decompress, FlushDecompress, Status};

use crate::io::ReadAt;
use crate::zip::{
    CRYPTO_HEADER_SIZE, CompressionMethod, ZipCryptoKeys, ZipFileEntry, ZipParser,
};

/// Outcome of testing a single candidate password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Wrong password. The expected, cheap case.
    AuthFailure,
    /// Correct password; carries the decrypted, decompressed payload.
    Success(Vec<u8>),
}

/// The decrypt capability the search drives.
///
/// `attempt` returns `Err` only for conditions that doom the whole
/// search (the entry data being unreadable); a failed guess is the
/// `AuthFailure` variant, not an error.
pub trait Oracle: Send + Sync {
    fn attempt(&self, candidate: &str) -> Result<AttemptOutcome>;
}

/// Oracle over one ZipCrypto-encrypted archive entry.
///
/// Loads the entry's stored bytes once at construction, so every
/// attempt runs purely in memory and workers can share one instance
/// behind an `Arc`.
#[derive(Debug)]
pub struct ZipEntryOracle {
    method: CompressionMethod,
    uncompressed_size: usize,
    crc32: u32,
    check_byte: u8,
    /// The 12-byte encryption header.
    header: [u8; CRYPTO_HEADER_SIZE],
    /// Ciphertext of the compressed payload, after the header.
    ciphertext: Vec<u8>,
}

impl ZipEntryOracle {
    /// Read the entry's ciphertext and validate that the entry is one
    /// this oracle can attack.
    ///
    /// # Errors
    ///
    /// Fails when the entry is a directory, is not encrypted, uses an
    /// unsupported compression method, or its stored data is shorter
    /// than the encryption header. These are fatal to the search: no
    /// password will ever succeed against them.
    pub async fn load<R: ReadAt>(parser: &ZipParser<R>, entry: &ZipFileEntry) -> Result<Self> {
        if entry.is_directory {
            bail!("'{}' is a directory entry", entry.file_name);
        }
        if !entry.is_encrypted() {
            bail!("Entry '{}' is not encrypted", entry.file_name);
        }
        if let CompressionMethod::Unknown(method) = entry.compression_method {
            bail!(
                "Unsupported compression method {} for entry '{}'",
                method,
                entry.file_name
            );
        }

        let raw = parser.read_raw_data(entry).await?;
        if raw.len() < CRYPTO_HEADER_SIZE {
            bail!(
                "Entry '{}' is truncated: {} bytes is too short for an encryption header",
                entry.file_name,
                raw.len()
            );
        }

        let mut header = [0u8; CRYPTO_HEADER_SIZE];
        header.copy_from_slice(&raw[..CRYPTO_HEADER_SIZE]);

        Ok(Self {
            method: entry.compression_method,
            uncompressed_size: entry.uncompressed_size as usize,
            crc32: entry.crc32,
            check_byte: entry.password_check_byte(),
            header,
            ciphertext: raw[CRYPTO_HEADER_SIZE..].to_vec(),
        })
    }

    /// Decrypt and decompress the payload with an already-initialized
    /// key state. Returns `None` for any symptom of a wrong password.
    fn open_payload(&self, keys: &mut ZipCryptoKeys) -> Option<Vec<u8>> {
        let mut data = self.ciphertext.clone();
        keys.decrypt_in_place(&mut data);

        let payload = match self.method {
            CompressionMethod::Stored => {
                if data.len() != self.uncompressed_size {
                    return None;
                }
                data
            }
            CompressionMethod::Deflate => inflate_raw(&data, self.uncompressed_size)?,
            CompressionMethod::Unknown(_) => return None,
        };

        let mut crc = Crc::new();
        crc.update(&payload);
        if crc.sum() != self.crc32 {
            return None;
        }

        Some(payload)
    }
}

impl Oracle for ZipEntryOracle {
    fn attempt(&self, candidate: &str) -> Result<AttemptOutcome> {
        let mut keys = ZipCryptoKeys::derive(candidate.as_bytes());

        // Cheap pre-check: the last decrypted header byte must match
        // the check byte. Rejects ~255/256 of wrong passwords.
        let mut last = 0u8;
        for &b in &self.header {
            last = keys.decrypt_byte(b);
        }
        if last != self.check_byte {
            return Ok(AttemptOutcome::AuthFailure);
        }

        // Header check passed; only the full CRC verifies the guess.
        match self.open_payload(&mut keys) {
            Some(payload) => Ok(AttemptOutcome::Success(payload)),
            None => Ok(AttemptOutcome::AuthFailure),
        }
    }
}

/// Inflate a raw deflate stream whose uncompressed size is known.
///
/// Returns `None` on any decompression error or size mismatch; with a
/// wrong password the input is keystream garbage and failing here is
/// the normal path.
fn inflate_raw(data: &[u8], expected_size: usize) -> Option<Vec<u8>> {
    let mut decompress = Decompress::new(false);
    let mut out = Vec::with_capacity(expected_size);

    match decompress.decompress_vec(data, &mut out, FlushDecompress::Finish) {
        Ok(Status::StreamEnd) if out.len() == expected_size => Some(out),
        Ok(Status::Ok) if out.len() == expected_size => {
            // The output filled exactly before the decoder saw the
            // stream terminator; one more call must end the stream
            // without producing further bytes.
            let consumed = decompress.total_in() as usize;
            out.reserve(8);
            match decompress.decompress_vec(&data[consumed..], &mut out, FlushDecompress::Finish) {
                Ok(Status::StreamEnd) if out.len() == expected_size => Some(out),
                _ => None,
            }
        }
        _ => None,
    }
}

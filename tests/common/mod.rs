//! Test fixtures: an in-memory ZIP writer producing ZipCrypto-encrypted
//! archives, and a memory-backed `ReadAt` source.

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::{Compression, Crc, write::DeflateEncoder};
use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use zipcrack::io::ReadAt;
use zipcrack::zip::ZipCryptoKeys;

/// One entry to place in a built archive.
pub struct TestEntry<'a> {
    pub name: &'a str,
    pub content: &'a [u8],
    /// `None` writes the entry unencrypted.
    pub password: Option<&'a str>,
    /// Deflate the content; otherwise store it raw.
    pub deflate: bool,
    /// Set the data-descriptor flag, switching the ZipCrypto check
    /// byte to the mod-time high byte.
    pub streamed: bool,
}

impl<'a> TestEntry<'a> {
    pub fn encrypted(name: &'a str, content: &'a [u8], password: &'a str) -> Self {
        Self {
            name,
            content,
            password: Some(password),
            deflate: true,
            streamed: false,
        }
    }

    pub fn plain(name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            content,
            password: None,
            deflate: true,
            streamed: false,
        }
    }
}

const FLAG_ENCRYPTED: u16 = 1 << 0;
const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;
const MOD_TIME: u16 = 0x6B21;
const MOD_DATE: u16 = 0x5B41;

/// Build a complete single-disk ZIP archive in memory.
pub fn build_archive(entries: &[TestEntry<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut central = Vec::new();

    for entry in entries {
        let lfh_offset = out.len() as u32;

        let mut crc = Crc::new();
        crc.update(entry.content);
        let crc32 = crc.sum();

        let compressed = if entry.deflate {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(entry.content).unwrap();
            encoder.finish().unwrap()
        } else {
            entry.content.to_vec()
        };

        let mut flags = 0u16;
        if entry.streamed {
            flags |= FLAG_DATA_DESCRIPTOR;
        }

        let stored = match entry.password {
            Some(password) => {
                flags |= FLAG_ENCRYPTED;
                let check_byte = if entry.streamed {
                    (MOD_TIME >> 8) as u8
                } else {
                    (crc32 >> 24) as u8
                };

                // 11 arbitrary salt bytes plus the check byte
                let mut header = [0u8; 12];
                for (i, b) in header.iter_mut().enumerate().take(11) {
                    *b = (i as u8).wrapping_mul(37).wrapping_add(101);
                }
                header[11] = check_byte;

                let mut keys = ZipCryptoKeys::derive(password.as_bytes());
                let mut data = Vec::with_capacity(12 + compressed.len());
                for &b in &header {
                    data.push(keys.encrypt_byte(b));
                }
                for &b in &compressed {
                    data.push(keys.encrypt_byte(b));
                }
                data
            }
            None => compressed,
        };

        let method: u16 = if entry.deflate { 8 } else { 0 };
        let name = entry.name.as_bytes();

        // Local File Header
        out.extend_from_slice(b"PK\x03\x04");
        out.write_u16::<LittleEndian>(20).unwrap();
        out.write_u16::<LittleEndian>(flags).unwrap();
        out.write_u16::<LittleEndian>(method).unwrap();
        out.write_u16::<LittleEndian>(MOD_TIME).unwrap();
        out.write_u16::<LittleEndian>(MOD_DATE).unwrap();
        out.write_u32::<LittleEndian>(crc32).unwrap();
        out.write_u32::<LittleEndian>(stored.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(entry.content.len() as u32)
            .unwrap();
        out.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.extend_from_slice(name);
        out.extend_from_slice(&stored);

        // Central Directory File Header
        central.extend_from_slice(b"PK\x01\x02");
        central.write_u16::<LittleEndian>(20).unwrap();
        central.write_u16::<LittleEndian>(20).unwrap();
        central.write_u16::<LittleEndian>(flags).unwrap();
        central.write_u16::<LittleEndian>(method).unwrap();
        central.write_u16::<LittleEndian>(MOD_TIME).unwrap();
        central.write_u16::<LittleEndian>(MOD_DATE).unwrap();
        central.write_u32::<LittleEndian>(crc32).unwrap();
        central.write_u32::<LittleEndian>(stored.len() as u32).unwrap();
        central
            .write_u32::<LittleEndian>(entry.content.len() as u32)
            .unwrap();
        central.write_u16::<LittleEndian>(name.len() as u16).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u16::<LittleEndian>(0).unwrap();
        central.write_u32::<LittleEndian>(0).unwrap();
        central.write_u32::<LittleEndian>(lfh_offset).unwrap();
        central.extend_from_slice(name);
    }

    // End of Central Directory
    let cd_offset = out.len() as u32;
    let cd_size = central.len() as u32;
    out.extend_from_slice(&central);
    out.extend_from_slice(b"PK\x05\x06");
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();
    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    out.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
    out.write_u32::<LittleEndian>(cd_size).unwrap();
    out.write_u32::<LittleEndian>(cd_offset).unwrap();
    out.write_u16::<LittleEndian>(0).unwrap();

    out
}

/// In-memory archive source.
pub struct MemReader(pub Vec<u8>);

#[async_trait]
impl ReadAt for MemReader {
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let offset = offset as usize;
        if offset >= self.0.len() {
            return Ok(0);
        }
        let end = (offset + buf.len()).min(self.0.len());
        let n = end - offset;
        buf[..n].copy_from_slice(&self.0[offset..end]);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.0.len() as u64
    }
}

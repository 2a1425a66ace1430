use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use anyhow::{Result, bail};

/// ZIP compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    Stored,
    Deflate,
    Unknown(u16),
}

impl CompressionMethod {
    pub fn from_u16(value: u16) -> Self {
        match value {
            0 => CompressionMethod::Stored,
            8 => CompressionMethod::Deflate,
            _ => CompressionMethod::Unknown(value),
        }
    }

    pub fn as_u16(&self) -> u16 {
        match self {
            CompressionMethod::Stored => 0,
            CompressionMethod::Deflate => 8,
            CompressionMethod::Unknown(v) => *v,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompressionMethod::Stored => "Stored",
            CompressionMethod::Deflate => "Deflate",
            CompressionMethod::Unknown(_) => "Unknown",
        }
    }
}

/// General-purpose bit flag: entry is encrypted (traditional PKWARE
/// encryption or stronger).
pub const FLAG_ENCRYPTED: u16 = 1 << 0;

/// General-purpose bit flag: sizes and CRC were written in a trailing
/// data descriptor. For ZipCrypto this also changes which value the
/// encryption header's check byte is derived from.
pub const FLAG_DATA_DESCRIPTOR: u16 = 1 << 3;

/// End of Central Directory (EOCD) - 22 bytes minimum
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub disk_with_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::SIZE {
            bail!("Invalid End of Central Directory");
        }

        // Verify signature
        if &data[0..4] != Self::SIGNATURE {
            bail!("Invalid End of Central Directory");
        }

        let mut cursor = Cursor::new(&data[4..]);

        Ok(Self {
            disk_number: cursor.read_u16::<LittleEndian>()?,
            disk_with_cd: cursor.read_u16::<LittleEndian>()?,
            disk_entries: cursor.read_u16::<LittleEndian>()?,
            total_entries: cursor.read_u16::<LittleEndian>()?,
            cd_size: cursor.read_u32::<LittleEndian>()?,
            cd_offset: cursor.read_u32::<LittleEndian>()?,
            comment_len: cursor.read_u16::<LittleEndian>()?,
        })
    }
}

/// Central Directory File Header (CDFH) - 46 bytes minimum
pub const CDFH_SIGNATURE: &[u8] = b"PK\x01\x02";

/// Local File Header (LFH) - 30 bytes
pub const LFH_SIGNATURE: &[u8] = b"PK\x03\x04";
pub const LFH_SIZE: usize = 30;

/// Size of the ZipCrypto encryption header that precedes the
/// ciphertext of an encrypted entry.
pub const CRYPTO_HEADER_SIZE: usize = 12;

/// Parsed ZIP file entry information
#[derive(Debug, Clone)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub crc32: u32,
    pub flags: u16,
    pub lfh_offset: u64,
    pub last_mod_time: u16,
    pub is_directory: bool,
}

impl ZipFileEntry {
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    /// Expected plaintext value of the final encryption header byte.
    ///
    /// With a correct password the twelfth decrypted header byte equals
    /// the high byte of the CRC-32, or of the DOS mod time when the
    /// entry was streamed with a data descriptor (APPNOTE 6.1).
    pub fn password_check_byte(&self) -> u8 {
        if self.flags & FLAG_DATA_DESCRIPTOR != 0 {
            (self.last_mod_time >> 8) as u8
        } else {
            (self.crc32 >> 24) as u8
        }
    }
}

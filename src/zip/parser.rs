//! Low-level ZIP archive parser.
//!
//! ZIP files are read from the end: the End of Central Directory (EOCD)
//! record locates the Central Directory, which carries the metadata for
//! every entry, including the general-purpose flags that mark an entry
//! as encrypted. The entry's ciphertext (12-byte ZipCrypto header plus
//! compressed data) is then read through the Local File Header.
//!
//! The parser reads from anything implementing [`ReadAt`], so the
//! archive bytes themselves are never loaded more than once per entry.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use std::sync::Arc;

use crate::io::ReadAt;
use anyhow::{Result, bail};

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Low-level ZIP file parser, generic over the archive source.
pub struct ZipParser<R: ReadAt> {
    /// The underlying data source
    reader: Arc<R>,
    /// Total size of the archive in bytes
    size: u64,
}

impl<R: ReadAt> ZipParser<R> {
    pub fn new(reader: Arc<R>) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Tries the no-comment position first, then searches backwards
    /// through the maximum comment window for the signature.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid EOCD can be found, indicating the
    /// file is not a valid ZIP archive.
    pub async fn find_eocd(&self) -> Result<EndOfCentralDirectory> {
        // Common case: archive has no trailing comment.
        if self.size >= EndOfCentralDirectory::SIZE as u64 {
            let offset = self.size - EndOfCentralDirectory::SIZE as u64;
            let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
            self.reader.read_at(offset, &mut buf).await?;

            if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
                return EndOfCentralDirectory::from_bytes(&buf);
            }
        }

        // A comment pushes the EOCD away from the end of the file.
        // Search backwards for the signature within the comment window.
        let search_size = (MAX_COMMENT_SIZE + EndOfCentralDirectory::SIZE as u64).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_at(search_start, &mut buf).await?;

        for i in (0..buf.len().saturating_sub(EndOfCentralDirectory::SIZE)).rev() {
            if &buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                // Candidate EOCD: the comment length field must account
                // for exactly the bytes that follow the record.
                let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;

                if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                    return EndOfCentralDirectory::from_bytes(
                        &buf[i..i + EndOfCentralDirectory::SIZE],
                    );
                }
            }
        }

        bail!("Not a valid ZIP file")
    }

    /// List all entries in the archive by walking the Central Directory.
    pub async fn list_entries(&self) -> Result<Vec<ZipFileEntry>> {
        let eocd = self.find_eocd().await?;

        // Read the whole Central Directory in one request.
        let mut cd_data = vec![0u8; eocd.cd_size as usize];
        self.reader.read_at(eocd.cd_offset as u64, &mut cd_data).await?;

        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        let mut cursor = Cursor::new(&cd_data);

        for _ in 0..eocd.total_entries {
            entries.push(self.parse_cdfh(&mut cursor)?);
        }

        Ok(entries)
    }

    /// Parse one Central Directory File Header at the cursor.
    fn parse_cdfh(&self, cursor: &mut Cursor<&Vec<u8>>) -> Result<ZipFileEntry> {
        let mut sig = [0u8; 4];
        cursor.read_exact(&mut sig)?;
        if sig != CDFH_SIGNATURE {
            bail!("Invalid Central Directory File Header");
        }

        let _version_made_by = cursor.read_u16::<LittleEndian>()?;
        let _version_needed = cursor.read_u16::<LittleEndian>()?;
        let flags = cursor.read_u16::<LittleEndian>()?;
        let compression_method = cursor.read_u16::<LittleEndian>()?;
        let last_mod_time = cursor.read_u16::<LittleEndian>()?;
        let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
        let crc32 = cursor.read_u32::<LittleEndian>()?;
        let compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
        let file_name_length = cursor.read_u16::<LittleEndian>()?;
        let extra_field_length = cursor.read_u16::<LittleEndian>()?;
        let file_comment_length = cursor.read_u16::<LittleEndian>()?;
        let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
        let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
        let _external_attrs = cursor.read_u32::<LittleEndian>()?;
        let lfh_offset = cursor.read_u32::<LittleEndian>()? as u64;

        let mut file_name_bytes = vec![0u8; file_name_length as usize];
        cursor.read_exact(&mut file_name_bytes)?;
        // Lossy conversion keeps non-UTF8 names listable
        let file_name = String::from_utf8_lossy(&file_name_bytes).to_string();

        // Directory entries end with '/'
        let is_directory = file_name.ends_with('/');

        // Extra field and comment are not needed for recovery
        let skip = extra_field_length as u64 + file_comment_length as u64;
        cursor.set_position(cursor.position() + skip);

        Ok(ZipFileEntry {
            file_name,
            compression_method: CompressionMethod::from_u16(compression_method),
            compressed_size,
            uncompressed_size,
            crc32,
            flags,
            lfh_offset,
            last_mod_time,
            is_directory,
        })
    }

    /// Get the offset where an entry's stored data begins.
    ///
    /// The Local File Header repeats the filename and extra field with
    /// lengths that may differ from the Central Directory copy, so the
    /// LFH must be read to find the data start. For an encrypted entry
    /// the data starts with the 12-byte encryption header.
    pub async fn data_offset(&self, entry: &ZipFileEntry) -> Result<u64> {
        let mut lfh_buf = vec![0u8; LFH_SIZE];
        self.reader.read_at(entry.lfh_offset, &mut lfh_buf).await?;

        if &lfh_buf[0..4] != LFH_SIGNATURE {
            bail!("Invalid Local File Header");
        }

        let mut cursor = Cursor::new(&lfh_buf);
        cursor.set_position(26); // filename length field

        let file_name_length = cursor.read_u16::<LittleEndian>()? as u64;
        let extra_field_length = cursor.read_u16::<LittleEndian>()? as u64;

        Ok(entry.lfh_offset + LFH_SIZE as u64 + file_name_length + extra_field_length)
    }

    /// Read an entry's raw stored bytes: for an encrypted entry this is
    /// the encryption header followed by the ciphertext of the
    /// compressed data.
    pub async fn read_raw_data(&self, entry: &ZipFileEntry) -> Result<Vec<u8>> {
        let offset = self.data_offset(entry).await?;
        let mut buf = vec![0u8; entry.compressed_size as usize];
        self.reader.read_at(offset, &mut buf).await?;
        Ok(buf)
    }
}

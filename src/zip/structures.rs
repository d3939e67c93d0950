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
}

/// Central Directory File Header signature; in a forward-only read it marks
/// the end of the local entry sequence.
pub const CDFH_SIGNATURE: [u8; 4] = *b"PK\x01\x02";

/// End of Central Directory signature.
pub const EOCD_SIGNATURE: [u8; 4] = *b"PK\x05\x06";

/// ZIP64 End of Central Directory signature.
pub const ZIP64_EOCD_SIGNATURE: [u8; 4] = *b"PK\x06\x06";

/// ZIP64 End of Central Directory Locator signature.
pub const ZIP64_LOCATOR_SIGNATURE: [u8; 4] = *b"PK\x06\x07";

/// Data descriptor signature. The descriptor may also appear bare, without
/// this marker, immediately after an entry's compressed data.
pub const DATA_DESCRIPTOR_SIGNATURE: [u8; 4] = *b"PK\x07\x08";

/// Extra-field id of the ZIP64 extended information record.
const ZIP64_EXTRA_ID: u16 = 0x0001;

/// General purpose bit 0: the entry data is encrypted.
const FLAG_ENCRYPTED: u16 = 0x0001;

/// General purpose bit 3: sizes and CRC are zero in the header and arrive
/// in a data descriptor after the entry data.
const FLAG_DATA_DESCRIPTOR: u16 = 0x0008;

/// Local File Header (LFH) - 30 bytes including the signature
pub struct LocalFileHeader {
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub last_mod_time: u16,
    pub last_mod_date: u16,
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    /// Set when a ZIP64 extended information record was seen in the extra
    /// field; a trailing data descriptor then carries 8-byte sizes.
    pub zip64: bool,
}

impl LocalFileHeader {
    /// Signature bytes. Doubles as the nested-archive magic number: an
    /// entry whose content starts with these four bytes is itself a ZIP
    /// container.
    pub const SIGNATURE: [u8; 4] = *b"PK\x03\x04";

    /// Size of the fixed header fields following the signature.
    pub const FIXED_SIZE: usize = 26;

    /// Parse the fixed header fields. `data` starts immediately after the
    /// signature.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < Self::FIXED_SIZE {
            bail!("Invalid Local File Header");
        }

        let mut cursor = Cursor::new(data);

        Ok(Self {
            version_needed: cursor.read_u16::<LittleEndian>()?,
            flags: cursor.read_u16::<LittleEndian>()?,
            compression_method: cursor.read_u16::<LittleEndian>()?,
            last_mod_time: cursor.read_u16::<LittleEndian>()?,
            last_mod_date: cursor.read_u16::<LittleEndian>()?,
            crc32: cursor.read_u32::<LittleEndian>()?,
            compressed_size: cursor.read_u32::<LittleEndian>()? as u64,
            uncompressed_size: cursor.read_u32::<LittleEndian>()? as u64,
            file_name_length: cursor.read_u16::<LittleEndian>()?,
            extra_field_length: cursor.read_u16::<LittleEndian>()?,
            zip64: false,
        })
    }

    pub fn method(&self) -> CompressionMethod {
        CompressionMethod::from_u16(self.compression_method)
    }

    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    pub fn has_data_descriptor(&self) -> bool {
        self.flags & FLAG_DATA_DESCRIPTOR != 0
    }

    /// Apply the variable extra field: ZIP64 records replace 0xFFFFFFFF
    /// size sentinels with their 64-bit values. Unknown and malformed
    /// records are skipped.
    pub fn apply_extra_field(&mut self, extra: &[u8]) {
        let mut pos = 0usize;
        while pos + 4 <= extra.len() {
            let header_id = u16::from_le_bytes([extra[pos], extra[pos + 1]]);
            let field_size = u16::from_le_bytes([extra[pos + 2], extra[pos + 3]]) as usize;
            pos += 4;
            if pos + field_size > extra.len() {
                break;
            }

            if header_id == ZIP64_EXTRA_ID {
                self.zip64 = true;
                // The local-header form carries the original size first,
                // then the compressed size, 8 bytes each. Each is present
                // only when the 32-bit field is saturated.
                let mut cursor = Cursor::new(&extra[pos..pos + field_size]);
                if self.uncompressed_size == u32::MAX as u64 {
                    if let Ok(size) = cursor.read_u64::<LittleEndian>() {
                        self.uncompressed_size = size;
                    }
                }
                if self.compressed_size == u32::MAX as u64 {
                    if let Ok(size) = cursor.read_u64::<LittleEndian>() {
                        self.compressed_size = size;
                    }
                }
            }

            pos += field_size;
        }
    }
}

/// Data descriptor trailing an entry written by a streaming producer.
pub struct DataDescriptor {
    pub crc32: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

impl DataDescriptor {
    /// Parse a descriptor body (no signature): CRC then the two sizes,
    /// 8 bytes each for ZIP64 entries, 4 otherwise.
    pub fn from_bytes(data: &[u8], zip64: bool) -> Result<Self> {
        let expected = if zip64 { 20 } else { 12 };
        if data.len() < expected {
            bail!("Invalid data descriptor");
        }

        let mut cursor = Cursor::new(data);
        let crc32 = cursor.read_u32::<LittleEndian>()?;
        let (compressed_size, uncompressed_size) = if zip64 {
            (
                cursor.read_u64::<LittleEndian>()?,
                cursor.read_u64::<LittleEndian>()?,
            )
        } else {
            (
                cursor.read_u32::<LittleEndian>()? as u64,
                cursor.read_u32::<LittleEndian>()? as u64,
            )
        };

        Ok(Self {
            crc32,
            compressed_size,
            uncompressed_size,
        })
    }
}

/// Parsed ZIP entry metadata, as seen by a forward-only reader.
#[derive(Debug, Clone)]
pub struct ZipFileEntry {
    pub file_name: String,
    pub is_directory: bool,
    pub compression_method: CompressionMethod,
    /// Uncompressed size declared up front, `None` for entries that defer
    /// sizes to a data descriptor. Headers can lie; byte counts shown to
    /// users come from the data actually read.
    pub declared_size: Option<u64>,
    pub compressed_size: Option<u64>,
    pub crc32: u32,
}

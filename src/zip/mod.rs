//! Forward-only ZIP archive reading.
//!
//! This module provides the streaming layer the archive walker is built on:
//! entries are parsed from their local file headers in the order they appear
//! in the stream, and their data is decompressed on demand.
//!
//! ## Architecture
//!
//! The module is organized into two components:
//!
//! - [`structures`]: Data structures for the ZIP format elements a streaming
//!   reader encounters (local file headers, data descriptors, signatures)
//! - [`reader`]: The forward-only entry reader
//!
//! ## Why not read the central directory?
//!
//! A ZIP file carries its authoritative index, the Central Directory, at the
//! end. Random-access tools seek there first. This crate instead walks the
//! local file headers front to back, because the archives it descends into
//! exist only as in-memory buffers produced while their enclosing entry is
//! still open - there is no file to seek in. The walk stops as soon as a
//! central directory record is seen.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 size extensions in local headers and data descriptors
//! - STORED (no compression) method
//! - DEFLATE compression method
//! - Trailing data descriptors (general purpose flag bit 3)
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods; such entries are listed
//!   and skipped, but their contents cannot be read

pub mod reader;
pub mod structures;

pub use reader::ZipStreamReader;
pub use structures::{CompressionMethod, LocalFileHeader, ZipFileEntry};

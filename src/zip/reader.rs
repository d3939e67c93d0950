//! Forward-only ZIP entry reader
//!
//! ## Reading Strategy
//!
//! The reader walks the stream front to back, parsing each Local File
//! Header as it comes and decompressing entry data on demand. It hands out
//! one entry at a time:
//!
//! - [`ZipStreamReader::next_entry`] parses the next header and returns the
//!   entry's metadata, closing the previous entry if the caller left it open
//! - the reader implements [`Read`], yielding the decompressed bytes of the
//!   current entry until the entry ends
//! - [`ZipStreamReader::close_entry`] discards whatever remains of the
//!   current entry and leaves the stream positioned at the next record
//!
//! A central directory signature ends the walk; whatever follows it is left
//! unread.
//!
//! ## Entry boundaries
//!
//! Headers usually declare the compressed size, and skipping an entry is a
//! bounded raw read. Entries written by streaming producers instead set
//! general purpose flag bit 3 and defer their sizes to a data descriptor
//! behind the data; for those the only way to find the boundary is to run
//! the deflate stream to its end. The decompressor may pull input past that
//! end, so over-read bytes are handed back to a small pending buffer that
//! raw reads drain first.

use std::io::{self, Read};

use anyhow::{Result, bail};
use flate2::{Decompress, FlushDecompress, Status};

use super::structures::{
    CDFH_SIGNATURE, CompressionMethod, DATA_DESCRIPTOR_SIGNATURE, DataDescriptor, EOCD_SIGNATURE,
    LocalFileHeader, ZIP64_EOCD_SIGNATURE, ZIP64_LOCATOR_SIGNATURE, ZipFileEntry,
};

/// Chunk size for compressed input reads and skip loops.
const CHUNK_SIZE: usize = 4096;

/// Decompression state of an open deflated entry.
struct DeflateState {
    decomp: Decompress,
    /// Compressed input pulled from the stream but not yet consumed.
    input: Vec<u8>,
    input_pos: usize,
    /// Compressed bytes still to be pulled from the stream; `None` when the
    /// entry defers its sizes to a data descriptor.
    compressed_remaining: Option<u64>,
    finished: bool,
}

enum EntryData {
    Stored { remaining: u64 },
    Deflated(DeflateState),
    Unsupported { method: u16, remaining: u64 },
}

struct ActiveEntry {
    data: EntryData,
    has_descriptor: bool,
    zip64: bool,
    declared_size: Option<u64>,
}

/// Streaming reader over the local entries of a ZIP archive.
pub struct ZipStreamReader<R: Read> {
    inner: R,
    /// Bytes over-read from `inner`, served before `inner` on subsequent
    /// raw reads.
    pending: Vec<u8>,
    pending_pos: usize,
    current: Option<ActiveEntry>,
    finished: bool,
}

impl<R: Read> ZipStreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: Vec::new(),
            pending_pos: 0,
            current: None,
            finished: false,
        }
    }

    /// Advance to the next entry and return its metadata, or `None` once
    /// the local entry sequence ends (central directory or end of stream).
    ///
    /// Any entry still open is closed first, discarding unread data.
    pub fn next_entry(&mut self) -> Result<Option<ZipFileEntry>> {
        if self.current.is_some() {
            self.close_entry()?;
        }
        if self.finished {
            return Ok(None);
        }

        let mut signature = [0u8; 4];
        let mut filled = 0;
        while filled < signature.len() {
            let read = self.read_raw(&mut signature[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        if filled == 0 {
            // Clean end of stream with no trailing records.
            self.finished = true;
            return Ok(None);
        }
        if filled < signature.len() {
            bail!("Unexpected end of archive stream");
        }

        if signature != LocalFileHeader::SIGNATURE {
            if signature == CDFH_SIGNATURE
                || signature == EOCD_SIGNATURE
                || signature == ZIP64_EOCD_SIGNATURE
                || signature == ZIP64_LOCATOR_SIGNATURE
            {
                // The central directory marks the end of the entry walk.
                self.finished = true;
                return Ok(None);
            }
            bail!("Invalid local file header signature");
        }

        let mut fixed = [0u8; LocalFileHeader::FIXED_SIZE];
        self.read_exact_raw(&mut fixed)?;
        let mut header = LocalFileHeader::from_bytes(&fixed)?;

        let mut name_bytes = vec![0u8; header.file_name_length as usize];
        self.read_exact_raw(&mut name_bytes)?;
        let file_name = String::from_utf8_lossy(&name_bytes).into_owned();

        let mut extra = vec![0u8; header.extra_field_length as usize];
        self.read_exact_raw(&mut extra)?;
        header.apply_extra_field(&extra);

        if header.is_encrypted() {
            bail!("Encrypted entry {file_name:?} is not supported");
        }

        let method = header.method();
        let has_descriptor = header.has_data_descriptor();

        let data = match method {
            CompressionMethod::Deflate => EntryData::Deflated(DeflateState {
                decomp: Decompress::new(false),
                input: Vec::new(),
                input_pos: 0,
                compressed_remaining: (!has_descriptor).then_some(header.compressed_size),
                finished: false,
            }),
            CompressionMethod::Stored => {
                // A stored entry with deferred sizes has no findable boundary.
                if has_descriptor {
                    bail!("Stored entry {file_name:?} defers its sizes to a data descriptor");
                }
                if header.compressed_size != header.uncompressed_size {
                    bail!("Stored entry {file_name:?} declares inconsistent sizes");
                }
                EntryData::Stored {
                    remaining: header.compressed_size,
                }
            }
            CompressionMethod::Unknown(value) => {
                if has_descriptor {
                    bail!("Unsupported compression method {value} in streamed entry {file_name:?}");
                }
                EntryData::Unsupported {
                    method: value,
                    remaining: header.compressed_size,
                }
            }
        };

        let declared_size = (!has_descriptor).then_some(header.uncompressed_size);
        let compressed_size = (!has_descriptor).then_some(header.compressed_size);

        self.current = Some(ActiveEntry {
            data,
            has_descriptor,
            zip64: header.zip64,
            declared_size,
        });

        Ok(Some(ZipFileEntry {
            is_directory: file_name.ends_with('/'),
            file_name,
            compression_method: method,
            declared_size,
            compressed_size,
            crc32: header.crc32,
        }))
    }

    /// Discard the rest of the current entry, consume its data descriptor if
    /// it has one, and leave the stream at the next record.
    ///
    /// Closing a streamed entry validates its data descriptor against the
    /// bytes actually seen.
    pub fn close_entry(&mut self) -> Result<()> {
        let Some(entry) = self.current.take() else {
            return Ok(());
        };

        match entry.data {
            EntryData::Stored { remaining } | EntryData::Unsupported { remaining, .. } => {
                self.skip_raw(remaining)?;
            }
            EntryData::Deflated(mut state) => {
                if !state.finished && state.compressed_remaining.is_none() {
                    // Without a declared size the entry boundary can only be
                    // found by running the deflate stream to its end.
                    let mut scratch = [0u8; CHUNK_SIZE];
                    while self.inflate_into(&mut state, &mut scratch)? > 0 {}
                }
                if let Some(remaining) = state.compressed_remaining {
                    self.skip_raw(remaining)?;
                }
                if entry.has_descriptor {
                    let descriptor = self.read_data_descriptor(entry.zip64)?;
                    if descriptor.compressed_size != state.decomp.total_in()
                        || descriptor.uncompressed_size != state.decomp.total_out()
                    {
                        bail!("Data descriptor does not match entry data");
                    }
                }
            }
        }

        Ok(())
    }

    fn read_entry_data(&mut self, entry: &mut ActiveEntry, out: &mut [u8]) -> io::Result<usize> {
        match &mut entry.data {
            EntryData::Stored { remaining } => {
                if *remaining == 0 || out.is_empty() {
                    return Ok(0);
                }
                let want = (*remaining).min(out.len() as u64) as usize;
                let read = self.read_raw(&mut out[..want])?;
                if read == 0 {
                    return Err(unexpected_eof());
                }
                *remaining -= read as u64;
                Ok(read)
            }
            EntryData::Deflated(state) => {
                if !state.finished {
                    if out.is_empty() {
                        return Ok(0);
                    }
                    let produced = self.inflate_into(state, out)?;
                    if produced > 0 {
                        return Ok(produced);
                    }
                }
                // At the entry boundary a lying size field surfaces. Entries
                // that are skipped instead of read are never held to their
                // declared size.
                if let Some(declared) = entry.declared_size {
                    if state.decomp.total_out() != declared {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!(
                                "entry is {} bytes but declared {declared}",
                                state.decomp.total_out()
                            ),
                        ));
                    }
                }
                Ok(0)
            }
            EntryData::Unsupported { method, .. } => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported compression method {method}"),
            )),
        }
    }

    /// Inflate into `out`, pulling compressed input as needed. Returns 0
    /// only at the end of the deflate stream.
    fn inflate_into(&mut self, state: &mut DeflateState, out: &mut [u8]) -> io::Result<usize> {
        if state.finished || out.is_empty() {
            return Ok(0);
        }

        loop {
            // The decompressor can defer reporting the stream end to a call
            // after the one that consumed the final input byte, holding any
            // pending output with it. Once a bounded entry's declared input
            // is spent, feed it an empty slice instead of refilling.
            let drained = state.compressed_remaining == Some(0);
            if state.input_pos == state.input.len() && !drained {
                self.refill_deflate_input(state)?;
            }

            let before_in = state.decomp.total_in();
            let before_out = state.decomp.total_out();
            let status = state
                .decomp
                .decompress(&state.input[state.input_pos..], out, FlushDecompress::None)
                .map_err(|err| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("corrupt deflate stream: {err}"),
                    )
                })?;
            let consumed = (state.decomp.total_in() - before_in) as usize;
            let produced = (state.decomp.total_out() - before_out) as usize;
            state.input_pos += consumed;

            match status {
                Status::StreamEnd => {
                    state.finished = true;
                    let leftover = state.input.len() - state.input_pos;
                    if leftover > 0 {
                        // Input pulled past the end of the deflate stream
                        // belongs to whatever follows the entry.
                        self.push_back(&state.input[state.input_pos..]);
                        if let Some(remaining) = &mut state.compressed_remaining {
                            *remaining += leftover as u64;
                        }
                        state.input_pos = state.input.len();
                    }
                    return Ok(produced);
                }
                Status::Ok | Status::BufError => {
                    if produced > 0 {
                        return Ok(produced);
                    }
                    if consumed == 0 {
                        if state.input_pos < state.input.len() {
                            return Err(io::Error::new(
                                io::ErrorKind::InvalidData,
                                "corrupt deflate stream",
                            ));
                        }
                        if drained {
                            // Declared compressed data ran out before the
                            // stream ended.
                            return Err(io::Error::new(
                                io::ErrorKind::InvalidData,
                                "truncated deflate stream",
                            ));
                        }
                    }
                    // Need more input.
                }
            }
        }
    }

    /// Pull the next compressed chunk, bounded by the declared compressed
    /// size when the header carries one.
    fn refill_deflate_input(&mut self, state: &mut DeflateState) -> io::Result<()> {
        let cap = match state.compressed_remaining {
            Some(remaining) => remaining.min(CHUNK_SIZE as u64) as usize,
            None => CHUNK_SIZE,
        };

        state.input.resize(cap, 0);
        let read = self.read_raw(&mut state.input[..cap])?;
        if read == 0 {
            return Err(unexpected_eof());
        }
        state.input.truncate(read);
        state.input_pos = 0;
        if let Some(remaining) = &mut state.compressed_remaining {
            *remaining -= read as u64;
        }
        Ok(())
    }

    /// Read the data descriptor behind a streamed entry. The leading
    /// signature is optional; when absent, the first four bytes are already
    /// the CRC.
    fn read_data_descriptor(&mut self, zip64: bool) -> Result<DataDescriptor> {
        let body_len = if zip64 { 20 } else { 12 };
        let mut body = [0u8; 20];

        let mut head = [0u8; 4];
        self.read_exact_raw(&mut head)?;
        if head == DATA_DESCRIPTOR_SIGNATURE {
            self.read_exact_raw(&mut body[..body_len])?;
        } else {
            body[..4].copy_from_slice(&head);
            self.read_exact_raw(&mut body[4..body_len])?;
        }

        DataDescriptor::from_bytes(&body[..body_len], zip64)
    }

    /// Discard `count` raw bytes.
    fn skip_raw(&mut self, mut count: u64) -> Result<()> {
        let mut scratch = [0u8; CHUNK_SIZE];
        while count > 0 {
            let want = count.min(scratch.len() as u64) as usize;
            let read = self.read_raw(&mut scratch[..want])?;
            if read == 0 {
                bail!("Unexpected end of archive stream");
            }
            count -= read as u64;
        }
        Ok(())
    }

    /// Raw read serving the pending buffer before the underlying stream.
    fn read_raw(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending_pos < self.pending.len() {
            let available = &self.pending[self.pending_pos..];
            let n = available.len().min(buf.len());
            buf[..n].copy_from_slice(&available[..n]);
            self.pending_pos += n;
            if self.pending_pos == self.pending.len() {
                self.pending.clear();
                self.pending_pos = 0;
            }
            return Ok(n);
        }
        self.inner.read(buf)
    }

    fn read_exact_raw(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            let read = self.read_raw(&mut buf[filled..])?;
            if read == 0 {
                return Err(unexpected_eof());
            }
            filled += read;
        }
        Ok(())
    }

    /// Return over-read bytes to the stream, ahead of anything already
    /// pending.
    fn push_back(&mut self, bytes: &[u8]) {
        if self.pending_pos < self.pending.len() {
            let mut rebuilt = bytes.to_vec();
            rebuilt.extend_from_slice(&self.pending[self.pending_pos..]);
            self.pending = rebuilt;
        } else {
            self.pending.clear();
            self.pending.extend_from_slice(bytes);
        }
        self.pending_pos = 0;
    }
}

impl<R: Read> Read for ZipStreamReader<R> {
    /// Decompressed bytes of the current entry; 0 at the entry boundary or
    /// when no entry is open.
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let Some(mut entry) = self.current.take() else {
            return Ok(0);
        };
        let result = self.read_entry_data(&mut entry, out);
        self.current = Some(entry);
        result
    }
}

fn unexpected_eof() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "unexpected end of archive stream",
    )
}

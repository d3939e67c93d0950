//! # deepjarlist
//!
//! Recursively list the contents of nested JAR/ZIP archives.
//!
//! Java applications routinely ship archives inside archives: an EAR holding
//! WARs holding JARs. This library walks such files in a single forward
//! pass, printing an indented tree of every entry at every depth. Nested
//! archives are recognized by their leading magic bytes, buffered in memory
//! and descended into without ever touching the filesystem.
//!
//! ## Features
//!
//! - Arbitrary nesting depth, detected by content instead of file name
//! - Inline display of manifest, XML, or any chosen file extensions
//! - Per-entry size and MD5 annotations computed from the bytes read
//! - Whole-name regex filtering of the listing
//! - Streaming ZIP reader supporting data descriptors and ZIP64 sizes
//!
//! ## Example
//!
//! ```no_run
//! use std::io;
//! use std::path::Path;
//! use deepjarlist::{ArchiveWalker, WalkContext};
//!
//! fn main() -> anyhow::Result<()> {
//!     let ctx = WalkContext::default();
//!     let mut walker = ArchiveWalker::new(ctx, io::stdout().lock());
//!     walker.walk_file(Path::new("app.jar"))?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod walker;
pub mod zip;

pub use cli::{Cli, ColorMode};
pub use walker::{ArchiveWalker, MAX_BUFFERED_BYTES, WalkContext};
pub use zip::{CompressionMethod, ZipFileEntry, ZipStreamReader};

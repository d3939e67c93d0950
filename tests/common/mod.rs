//! Shared helpers for the CLI integration tests.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use zip::result::ZipResult;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Invocation of the built binary with color environment noise removed, so
/// piped output is deterministic regardless of the host shell setup.
pub fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_djl"));
    cmd.env_remove("NO_COLOR")
        .env_remove("CLICOLOR")
        .env_remove("CLICOLOR_FORCE");
    cmd
}

/// Build an in-memory ZIP archive with a writer callback.
pub fn zip_archive<F>(build: F) -> Vec<u8>
where
    F: FnOnce(&mut ZipWriter<Cursor<Vec<u8>>>) -> ZipResult<()>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    build(&mut writer).expect("build fixture archive");
    writer
        .finish()
        .expect("finish fixture archive")
        .into_inner()
}

pub fn stored() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored)
}

pub fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

/// Write fixture bytes into `dir` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("write fixture file");
    path
}

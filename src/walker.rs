//! Recursive archive walking and listing
//!
//! [`ArchiveWalker`] drives a [`ZipStreamReader`] over each command-line
//! archive, printing one line per entry and descending into entries that are
//! themselves archives. Nested archives never touch the filesystem: the
//! entry's bytes are buffered once and re-read as an in-memory stream.
//!
//! Whether an entry is an archive is decided by its first four content
//! bytes, not its name, so a renamed `.jar` is still descended into and a
//! text file named `inner.zip` is not.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use regex::Regex;

use crate::cli::Cli;
use crate::zip::{LocalFileHeader, ZipFileEntry, ZipStreamReader};

/// Largest declared entry size that will be buffered for display or
/// descent. Entries past the limit are announced and skipped.
pub const MAX_BUFFERED_BYTES: u64 = 128 * 1024 * 1024;

/// Manifest files are matched by this suffix, case-insensitively, wherever
/// they sit in the archive.
const MANIFEST_SUFFIX: &str = "manifest.mf";

/// One nesting level of output indentation.
const INDENT: &str = "    ";

/// Display options shared by every level of the walk, resolved once from
/// the command line.
#[derive(Debug, Clone, Default)]
pub struct WalkContext {
    /// Lowercased extensions whose file contents are printed.
    pub extensions: HashSet<String>,
    pub show_manifest: bool,
    pub line_numbers: bool,
    pub show_size: bool,
    pub show_hash: bool,
    /// Whole-name filter for metadata-only entries and directories.
    pub filter: Option<Regex>,
}

impl WalkContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut extensions: HashSet<String> = cli
            .extensions
            .iter()
            .map(|ext| ext.to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if cli.show_xml {
            extensions.insert("xml".to_string());
        }

        let filter = match &cli.filter {
            Some(pattern) => Some(compile_filter(pattern)?),
            None => None,
        };

        Ok(Self {
            extensions,
            show_manifest: cli.show_manifest,
            line_numbers: cli.line_numbers,
            show_size: cli.show_size,
            show_hash: cli.show_hash,
            filter,
        })
    }

    /// Whether the filter admits `name`. Everything is admitted when no
    /// filter is configured. The filter only gates metadata-only lines;
    /// content display and archive descent are never suppressed.
    fn admits(&self, name: &str) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.is_match(name))
    }

    /// Whether this entry's contents should be printed.
    fn selects_content(&self, name: &str) -> bool {
        if let Some(extension) = content_extension(name) {
            if self.extensions.contains(&extension) {
                return true;
            }
        }
        self.show_manifest && name.to_lowercase().ends_with(MANIFEST_SUFFIX)
    }

    fn wants_suffix(&self) -> bool {
        self.show_size || self.show_hash
    }

    /// Size and hash annotations for an entry line, built from the bytes
    /// actually buffered. Empty unless `-z` or `-5` is set.
    fn entry_suffix_if_requested(&self, bytes: &[u8]) -> String {
        if self.wants_suffix() {
            self.entry_suffix(bytes)
        } else {
            String::new()
        }
    }

    fn entry_suffix(&self, bytes: &[u8]) -> String {
        let mut suffix = String::new();
        if self.show_size {
            suffix.push_str(&format!("  ({} bytes)", bytes.len()));
        }
        if self.show_hash {
            suffix.push_str("  ");
            match md5_hex(bytes) {
                Some(digest) => suffix.push_str(&digest),
                None => suffix.push_str("[?]"),
            }
        }
        suffix
    }
}

/// Recursive lister writing the indented entry tree to `out`.
pub struct ArchiveWalker<W: Write> {
    ctx: WalkContext,
    out: W,
}

impl<W: Write> ArchiveWalker<W> {
    pub fn new(ctx: WalkContext, out: W) -> Self {
        Self { ctx, out }
    }

    /// List one archive named on the command line. A missing file is a
    /// warning, not an error; anything else unreadable is fatal.
    pub fn walk_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            writeln!(
                self.out,
                "warning: file {} does not exist, skipping",
                path.display()
            )?;
            return Ok(());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => path.display().to_string(),
        };

        writeln!(self.out, "{} = [", name.bright_blue())?;
        self.walk(BufReader::new(file), 1)?;
        writeln!(self.out, "]")?;
        Ok(())
    }

    /// Walk one archive stream at the given nesting depth, listing entries
    /// in the order they appear.
    pub fn walk<R: Read>(&mut self, source: R, depth: usize) -> Result<()> {
        let mut archive = ZipStreamReader::new(source);
        let padding = INDENT.repeat(depth);
        let mut excluded_by_filter = 0usize;

        while let Some(entry) = archive.next_entry()? {
            if entry.is_directory {
                // Directories are names only; excluded ones are not counted.
                if self.ctx.admits(&entry.file_name) {
                    writeln!(self.out, "{padding}{}", entry.file_name)?;
                }
                continue;
            }

            // Sniff the first content bytes for a nested archive before any
            // size or display decision.
            let mut magic = [0u8; 4];
            let sniffed = read_up_to(&mut archive, &mut magic)?;
            let is_nested = sniffed == magic.len() && magic == LocalFileHeader::SIGNATURE;

            if is_nested || self.ctx.selects_content(&entry.file_name) {
                self.emit_buffered(&mut archive, &entry, &magic[..sniffed], is_nested, depth)?;
            } else if self.ctx.admits(&entry.file_name) {
                let suffix = if self.ctx.wants_suffix() {
                    let bytes = buffer_entry(&mut archive, &entry, &magic[..sniffed])?;
                    self.ctx.entry_suffix(&bytes)
                } else {
                    String::new()
                };
                writeln!(self.out, "{padding}{}{suffix}", entry.file_name)?;
            } else {
                excluded_by_filter += 1;
            }

            archive.close_entry()?;
        }

        if excluded_by_filter > 0 {
            writeln!(self.out, "{padding}({excluded_by_filter} files excluded by filter)")?;
        }
        Ok(())
    }

    /// Print an entry whose bytes are wanted in full: either a nested
    /// archive to descend into or a file whose contents are displayed.
    fn emit_buffered<R: Read>(
        &mut self,
        archive: &mut ZipStreamReader<R>,
        entry: &ZipFileEntry,
        prefix: &[u8],
        is_nested: bool,
        depth: usize,
    ) -> Result<()> {
        let padding = INDENT.repeat(depth);
        let name = if is_nested {
            entry.file_name.bright_blue()
        } else {
            entry.file_name.green()
        };

        if matches!(entry.declared_size, Some(size) if size > MAX_BUFFERED_BYTES) {
            writeln!(self.out, "{padding}{name} = [ Skipping file -- too large. ]")?;
            return Ok(());
        }

        let bytes = buffer_entry(archive, entry, prefix)?;
        let suffix = self.ctx.entry_suffix_if_requested(&bytes);

        writeln!(self.out, "{padding}{name}{suffix} = [")?;
        if is_nested {
            self.walk(Cursor::new(bytes), depth + 1)?;
        } else {
            self.render_content(&bytes, &padding)?;
        }
        writeln!(self.out, "{padding}]")?;
        Ok(())
    }

    /// Print file contents line by line, one indent level deeper than the
    /// entry name.
    fn render_content(&mut self, bytes: &[u8], padding: &str) -> Result<()> {
        let text = String::from_utf8_lossy(bytes);
        if self.ctx.line_numbers {
            let total = text.lines().count();
            let width = digit_count(total).min(4);
            for (index, line) in text.lines().enumerate() {
                writeln!(self.out, "{padding}{:>width$} {line}", index + 1)?;
            }
        } else {
            for line in text.lines() {
                writeln!(self.out, "{padding}{INDENT}{line}")?;
            }
        }
        Ok(())
    }
}

/// Buffer the rest of the current entry, re-attaching the already-sniffed
/// prefix.
fn buffer_entry<R: Read>(
    archive: &mut ZipStreamReader<R>,
    entry: &ZipFileEntry,
    prefix: &[u8],
) -> Result<Vec<u8>> {
    // The declared size seeds the allocation; the true length is however
    // many bytes come out.
    let hint = entry.declared_size.unwrap_or(64 * 1024).min(MAX_BUFFERED_BYTES) as usize;
    let mut bytes = Vec::with_capacity(hint.max(prefix.len()));
    bytes.extend_from_slice(prefix);
    archive
        .read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read entry {:?}", entry.file_name))?;
    Ok(bytes)
}

/// Fill as much of `buf` as the current entry provides; a short count means
/// the entry ended first.
fn read_up_to<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let read = source.read(&mut buf[filled..])?;
        if read == 0 {
            break;
        }
        filled += read;
    }
    Ok(filled)
}

/// Anchor a user-supplied pattern so it must cover the whole entry name.
fn compile_filter(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})$"))
        .with_context(|| format!("Invalid filter pattern {pattern:?}"))
}

/// Lowercased extension of `name`, taken after the last dot of the full
/// entry name. A name whose only dot is its first byte has no extension.
fn content_extension(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(position) if position > 0 => Some(name[position + 1..].to_lowercase()),
        _ => None,
    }
}

/// Lowercase hex MD5 of the buffered bytes, or `None` when no digest could
/// be produced; callers print a placeholder instead of failing the walk.
fn md5_hex(bytes: &[u8]) -> Option<String> {
    Some(format!("{:x}", md5::compute(bytes)))
}

fn digit_count(mut n: usize) -> usize {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ColorMode;
    use crate::zip::testutil::{
        archive, crc32, deflate, deflated_entry, directory_entry, local_header, stored_entry,
        streamed_entry,
    };

    fn run(ctx: WalkContext, bytes: &[u8]) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let mut walker = ArchiveWalker::new(ctx, &mut out);
        walker.walk(Cursor::new(bytes.to_vec()), 1).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn ctx_with_extensions(list: &[&str]) -> WalkContext {
        WalkContext {
            extensions: list.iter().map(|ext| ext.to_string()).collect(),
            ..WalkContext::default()
        }
    }

    fn cli_with_defaults() -> Cli {
        Cli {
            show_manifest: false,
            show_xml: false,
            extensions: Vec::new(),
            line_numbers: false,
            show_size: false,
            show_hash: false,
            filter: None,
            color: ColorMode::Auto,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_lists_names_with_indent() {
        let bytes = archive(&[
            directory_entry("docs/"),
            stored_entry("docs/readme.bin", b"data"),
            stored_entry("app.bin", b"123"),
        ]);
        let output = run(WalkContext::default(), &bytes);
        assert_eq!(output, "    docs/\n    docs/readme.bin\n    app.bin\n");
    }

    #[test]
    fn test_descends_into_nested_archives() {
        let inner = archive(&[stored_entry("inner.txt", b"hello")]);
        let outer = archive(&[
            stored_entry("lib/inner.jar", &inner),
            stored_entry("top.bin", b"t"),
        ]);
        let output = run(WalkContext::default(), &outer);
        assert_eq!(
            output,
            "    lib/inner.jar = [\n        inner.txt\n    ]\n    top.bin\n"
        );
    }

    #[test]
    fn test_indents_once_per_nesting_level() {
        let level3 = archive(&[stored_entry("leaf.txt", b"x")]);
        let level2 = archive(&[stored_entry("mid.jar", &level3)]);
        let level1 = archive(&[stored_entry("outer.jar", &level2)]);
        let output = run(WalkContext::default(), &level1);
        let expected = "    outer.jar = [\n\
                        \x20       mid.jar = [\n\
                        \x20           leaf.txt\n\
                        \x20       ]\n\
                        \x20   ]\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_descent_is_by_content_not_name() {
        // Starts with the wrong bytes: listed as a plain file even though
        // it is named like an archive.
        let bytes = archive(&[
            stored_entry("fake.jar", b"PKXY not an archive"),
            stored_entry("short.jar", b"PK"),
        ]);
        let output = run(WalkContext::default(), &bytes);
        assert_eq!(output, "    fake.jar\n    short.jar\n");
    }

    #[test]
    fn test_extension_selection_prints_content() {
        let bytes = archive(&[
            stored_entry("a.txt", b"alpha\nbeta"),
            stored_entry("b.bin", b"ignored"),
        ]);
        let output = run(ctx_with_extensions(&["txt"]), &bytes);
        assert_eq!(
            output,
            "    a.txt = [\n        alpha\n        beta\n    ]\n    b.bin\n"
        );
    }

    #[test]
    fn test_deflated_content_is_displayed() {
        // Buffering allocates exactly the declared size, so the read that
        // fills it lands on the end of the deflate stream.
        let bytes = archive(&[deflated_entry("w.txt", b"wwwwwwwwwwwwwwwwwwww")]);
        let output = run(ctx_with_extensions(&["txt"]), &bytes);
        assert_eq!(output, "    w.txt = [\n        wwwwwwwwwwwwwwwwwwww\n    ]\n");
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let bytes = archive(&[stored_entry("NOTES.TXT", b"shouty")]);
        let output = run(ctx_with_extensions(&["txt"]), &bytes);
        assert_eq!(output, "    NOTES.TXT = [\n        shouty\n    ]\n");
    }

    #[test]
    fn test_content_extension_rules() {
        assert_eq!(content_extension("a.txt").as_deref(), Some("txt"));
        assert_eq!(content_extension("dir/file.XML").as_deref(), Some("xml"));
        assert_eq!(content_extension("a.b.txt").as_deref(), Some("txt"));
        assert_eq!(content_extension("noext"), None);
        // A leading dot is a hidden-file marker, not an extension separator.
        assert_eq!(content_extension(".gitignore"), None);
        // The last dot of the whole name decides, directory segments included.
        assert_eq!(content_extension("dir.d/noext").as_deref(), Some("d/noext"));
    }

    #[test]
    fn test_manifest_contents_shown() {
        let manifest = b"Manifest-Version: 1.0\nMain-Class: app.Main";
        let bytes = archive(&[
            stored_entry("META-INF/MANIFEST.MF", manifest),
            stored_entry("meta-inf/Manifest.mf", b"second"),
        ]);
        let ctx = WalkContext {
            show_manifest: true,
            ..WalkContext::default()
        };
        let output = run(ctx, &bytes);
        let expected = "    META-INF/MANIFEST.MF = [\n\
                        \x20       Manifest-Version: 1.0\n\
                        \x20       Main-Class: app.Main\n\
                        \x20   ]\n\
                        \x20   meta-inf/Manifest.mf = [\n\
                        \x20       second\n\
                        \x20   ]\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_context_from_cli() {
        let mut cli = cli_with_defaults();
        cli.show_xml = true;
        cli.extensions = vec!["TXT".to_string(), String::new(), "Properties".to_string()];
        let ctx = WalkContext::from_cli(&cli).unwrap();
        assert!(ctx.extensions.contains("xml"));
        assert!(ctx.extensions.contains("txt"));
        assert!(ctx.extensions.contains("properties"));
        // Empty segments from stray commas are dropped.
        assert_eq!(ctx.extensions.len(), 3);
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let mut cli = cli_with_defaults();
        cli.filter = Some("*invalid".to_string());
        assert!(WalkContext::from_cli(&cli).is_err());
    }

    #[test]
    fn test_filter_limits_metadata_listing() {
        let mut cli = cli_with_defaults();
        cli.filter = Some(r".*\.txt".to_string());
        let ctx = WalkContext::from_cli(&cli).unwrap();
        let bytes = archive(&[
            directory_entry("docs/"),
            stored_entry("a.txt", b"a"),
            stored_entry("b.bin", b"b"),
            stored_entry("c.bin", b"c"),
        ]);
        let output = run(ctx, &bytes);
        assert_eq!(output, "    a.txt\n    (2 files excluded by filter)\n");
    }

    #[test]
    fn test_filter_is_whole_name_match() {
        let mut cli = cli_with_defaults();
        cli.filter = Some("app".to_string());
        let ctx = WalkContext::from_cli(&cli).unwrap();
        let bytes = archive(&[stored_entry("app.txt", b"x")]);
        let output = run(ctx, &bytes);
        assert_eq!(output, "    (1 files excluded by filter)\n");

        let mut cli = cli_with_defaults();
        cli.filter = Some(r"app\..*".to_string());
        let ctx = WalkContext::from_cli(&cli).unwrap();
        let output = run(ctx, &archive(&[stored_entry("app.txt", b"x")]));
        assert_eq!(output, "    app.txt\n");
    }

    #[test]
    fn test_filter_never_suppresses_content_or_descent() {
        let inner = archive(&[stored_entry("data.bin", b"d")]);
        let bytes = archive(&[
            stored_entry("shown.txt", b"text"),
            stored_entry("inner.jar", &inner),
            stored_entry("plain.bin", b"p"),
        ]);
        let mut cli = cli_with_defaults();
        cli.extensions = vec!["txt".to_string()];
        cli.filter = Some("zzz".to_string());
        let ctx = WalkContext::from_cli(&cli).unwrap();
        let output = run(ctx, &bytes);
        let expected = "    shown.txt = [\n\
                        \x20       text\n\
                        \x20   ]\n\
                        \x20   inner.jar = [\n\
                        \x20       (1 files excluded by filter)\n\
                        \x20   ]\n\
                        \x20   (1 files excluded by filter)\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_size_suffix_counts_buffered_bytes() {
        let ctx = WalkContext {
            show_size: true,
            ..WalkContext::default()
        };
        let bytes = archive(&[
            stored_entry("a.bin", b"hello"),
            stored_entry("b.bin", b"ab"),
            stored_entry("c.bin", b""),
        ]);
        let output = run(ctx, &bytes);
        assert_eq!(
            output,
            "    a.bin  (5 bytes)\n    b.bin  (2 bytes)\n    c.bin  (0 bytes)\n"
        );
    }

    #[test]
    fn test_hash_suffix_is_lowercase_md5() {
        let ctx = WalkContext {
            show_hash: true,
            ..WalkContext::default()
        };
        let bytes = archive(&[stored_entry("h.bin", b"hello"), stored_entry("e.bin", b"")]);
        let output = run(ctx, &bytes);
        assert_eq!(
            output,
            "    h.bin  5d41402abc4b2a76b9719d911017c592\n\
             \x20   e.bin  d41d8cd98f00b204e9800998ecf8427e\n"
        );
    }

    #[test]
    fn test_size_and_hash_suffixes_combine() {
        let ctx = WalkContext {
            show_size: true,
            show_hash: true,
            ..WalkContext::default()
        };
        let bytes = archive(&[stored_entry("h.bin", b"hello")]);
        let output = run(ctx, &bytes);
        assert_eq!(
            output,
            "    h.bin  (5 bytes)  5d41402abc4b2a76b9719d911017c592\n"
        );
    }

    #[test]
    fn test_suffix_on_displayed_entries() {
        let ctx = WalkContext {
            show_size: true,
            extensions: ["txt".to_string()].into_iter().collect(),
            ..WalkContext::default()
        };
        let bytes = archive(&[stored_entry("a.txt", b"alpha")]);
        let output = run(ctx, &bytes);
        assert_eq!(output, "    a.txt  (5 bytes) = [\n        alpha\n    ]\n");
    }

    #[test]
    fn test_streamed_entry_sizes_come_from_buffered_bytes() {
        let ctx = WalkContext {
            show_size: true,
            ..WalkContext::default()
        };
        let bytes = archive(&[streamed_entry("s.bin", b"stream me please")]);
        let output = run(ctx, &bytes);
        assert_eq!(output, "    s.bin  (16 bytes)\n");
    }

    #[test]
    fn test_line_numbers_small_file() {
        let ctx = WalkContext {
            line_numbers: true,
            extensions: ["txt".to_string()].into_iter().collect(),
            ..WalkContext::default()
        };
        let bytes = archive(&[stored_entry("n.txt", b"one\ntwo\nthree")]);
        let output = run(ctx, &bytes);
        assert_eq!(
            output,
            "    n.txt = [\n    1 one\n    2 two\n    3 three\n    ]\n"
        );
    }

    #[test]
    fn test_line_numbers_width_follows_line_count() {
        let ctx = WalkContext {
            line_numbers: true,
            extensions: ["txt".to_string()].into_iter().collect(),
            ..WalkContext::default()
        };
        let content = (1..=10).map(|i| format!("l{i}")).collect::<Vec<_>>().join("\n");
        let bytes = archive(&[stored_entry("n.txt", content.as_bytes())]);
        let output = run(ctx, &bytes);

        let mut expected = String::from("    n.txt = [\n");
        for i in 1..=10 {
            expected.push_str(&format!("    {i:>2} l{i}\n"));
        }
        expected.push_str("    ]\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_line_number_width_caps_at_four_digits() {
        let ctx = WalkContext {
            line_numbers: true,
            extensions: ["txt".to_string()].into_iter().collect(),
            ..WalkContext::default()
        };
        let content = (1..=10001)
            .map(|i| format!("x{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let bytes = archive(&[stored_entry("big.txt", content.as_bytes())]);
        let output = run(ctx, &bytes);

        assert!(output.contains("\n       1 x1\n"));
        assert!(output.contains("\n    9999 x9999\n"));
        // Five-digit numbers overflow the field instead of widening it.
        assert!(output.contains("\n    10000 x10000\n"));
        assert!(output.contains("\n    10001 x10001\n"));
    }

    #[test]
    fn test_oversized_entry_is_announced_and_skipped() {
        let data = b"tiny";
        let packed = deflate(data);
        let mut oversized = local_header(
            "big.txt",
            0,
            8,
            crc32(data),
            packed.len() as u32,
            200 * 1024 * 1024,
        );
        oversized.extend_from_slice(&packed);
        let bytes = archive(&[oversized, stored_entry("after.bin", b"ok")]);
        let output = run(ctx_with_extensions(&["txt"]), &bytes);
        assert_eq!(
            output,
            "    big.txt = [ Skipping file -- too large. ]\n    after.bin\n"
        );
    }

    #[test]
    fn test_empty_archive_lists_nothing() {
        let output = run(WalkContext::default(), &archive(&[]));
        assert_eq!(output, "");
    }

    #[test]
    fn test_walk_file_warns_on_missing_path() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let mut walker = ArchiveWalker::new(WalkContext::default(), &mut out);
        walker.walk_file(Path::new("no/such/file.jar")).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "warning: file no/such/file.jar does not exist, skipping\n"
        );
    }

    #[test]
    fn test_walk_file_brackets_archive_name() {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.jar");
        std::fs::write(&path, archive(&[stored_entry("a.bin", b"a")])).unwrap();

        let mut out = Vec::new();
        let mut walker = ArchiveWalker::new(WalkContext::default(), &mut out);
        walker.walk_file(&path).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "demo.jar = [\n    a.bin\n]\n"
        );
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(9999), 4);
        assert_eq!(digit_count(10000), 5);
    }
}

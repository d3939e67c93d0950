//! Main entry point for the djl command-line tool.
//!
//! This binary recursively lists the contents of JAR/ZIP archives,
//! descending into archives nested inside them to any depth.

use std::io;
use std::process;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;

use deepjarlist::{ArchiveWalker, Cli, WalkContext};

/// Application entry point.
///
/// Parses command-line arguments, then walks each named archive in order.
/// A missing file only produces a warning; a malformed archive aborts the
/// run with an error.
fn main() -> Result<()> {
    let cli = parse_args();
    cli.configure_color();

    let ctx = WalkContext::from_cli(&cli)?;
    let stdout = io::stdout().lock();
    let mut walker = ArchiveWalker::new(ctx, stdout);

    for path in &cli.files {
        walker.walk_file(path)?;
    }

    Ok(())
}

/// Parse arguments, sending usage problems to stdout with exit status 1.
/// Help and version requests keep clap's usual successful exit.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            print!("{}", err.render());
            process::exit(1);
        }
    }
}

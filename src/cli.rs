use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "djl")]
#[command(version)]
#[command(about = "Display contents of nested JAR/ZIP files", long_about = None)]
#[command(after_help = "Examples:\n  \
  djl app.jar                      list every entry, descending into nested archives\n  \
  djl -m -x app.war                also print manifest and XML file contents\n  \
  djl -z -5 app.jar                annotate each file with its size and MD5 hash\n  \
  djl -f '.*\\.class' app.jar       only list entries whose whole name matches")]
pub struct Cli {
    /// Show contents of manifest files
    #[arg(short = 'm', long = "manifest")]
    pub show_manifest: bool,

    /// Show contents of XML files (same as -e xml)
    #[arg(short = 'x', long = "xml")]
    pub show_xml: bool,

    /// Show contents of files with these comma-delimited extensions
    #[arg(
        short = 'e',
        long = "extensions",
        value_name = "LIST",
        value_delimiter = ','
    )]
    pub extensions: Vec<String>,

    /// Show line numbers in displayed file contents
    #[arg(short = 'l', long = "line-numbers")]
    pub line_numbers: bool,

    /// Show the size in bytes of each file
    #[arg(short = 'z', long = "size")]
    pub show_size: bool,

    /// Show the MD5 hash of each file
    #[arg(short = '5', long = "md5")]
    pub show_hash: bool,

    /// Only list files whose whole name matches the regex
    #[arg(short = 'f', long = "filter", value_name = "REGEX")]
    pub filter: Option<String>,

    /// When to color entry names
    #[arg(long = "color", value_name = "WHEN", value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Archive files to inspect
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when stdout is a terminal
    Auto,
    /// Always emit colors
    Always,
    /// Never emit colors
    Never,
}

impl Cli {
    /// Apply the requested color mode process-wide. `Auto` colors only when
    /// stdout is a terminal.
    pub fn configure_color(&self) {
        match self.color {
            ColorMode::Always => colored::control::set_override(true),
            ColorMode::Never => colored::control::set_override(false),
            ColorMode::Auto => {
                if !std::io::stdout().is_terminal() {
                    colored::control::set_override(false);
                }
            }
        }
    }
}

//! CLI for rendering a file's overview to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use glance::{Config, MapSession};
use std::path::PathBuf;
use tracing::info;

/// Command-line interface configuration
#[derive(Debug, Parser)]
#[command(author, version, about = "Render a compact symbol overview of a text file")]
pub struct Cli {
    /// File to render
    pub file: PathBuf,

    /// Maximum overview width in symbol columns (0 = indicator-only)
    #[arg(long)]
    pub width: Option<usize>,

    /// Maximum overview height in symbol rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Symbol preset: block-1x2, block-2x1, block-2x2, block-3x2, dot-3x2,
    /// dot-4x2
    #[arg(long)]
    pub symbols: Option<String>,

    /// Tab stop width for occupancy classification
    #[arg(long)]
    pub tab_width: Option<usize>,

    /// Config file path (TOML); defaults to glance/glance.toml under the
    /// platform config directory when present
    #[arg(long, env = "GLANCE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mark the overview row containing this 1-based source line
    #[arg(long)]
    pub cursor: Option<usize>,

    /// Log file path (or directory for the default filename)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Render the overview described by `cli` to stdout.
///
/// Configuration errors (unknown preset, malformed table) abort before any
/// rendering with a single diagnostic; a missing file is an I/O error with
/// the path attached.
pub fn run(cli: &Cli) -> Result<()> {
    let discovered = discovered_config();
    let mut config = Config::load_with_overrides(cli.config.as_deref(), discovered.as_deref())?;
    if let Some(width) = cli.width {
        config.max_cols = Some(width);
    }
    if let Some(rows) = cli.rows {
        config.max_rows = Some(rows);
    }
    if let Some(symbols) = &cli.symbols {
        config.symbols = symbols.clone();
    }
    if let Some(tab_width) = cli.tab_width {
        config.tab_width = tab_width;
    }
    let options = config.encode_options()?;

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let lines = byte_lines(&bytes);

    let mut session = MapSession::new(options);
    session.rerasterize_bytes(&lines);
    let cursor_row = cli.cursor.map(|line| session.source_to_rendered(line));

    info!(
        source_rows = session.scale().source_rows,
        rendered_rows = session.scale().rendered_rows,
        "rendered overview"
    );

    for (i, row) in session.rendered().rows.iter().enumerate() {
        if cursor_row == Some(i + 1) {
            println!("{row} ◀");
        } else {
            println!("{row}");
        }
    }

    Ok(())
}

/// Default config location: `<config_dir>/glance/glance.toml`, used when
/// `--config` is not given and the file exists.
fn discovered_config() -> Option<PathBuf> {
    config_file_in(&dirs::config_dir()?)
}

fn config_file_in(base: &std::path::Path) -> Option<PathBuf> {
    let path = base.join("glance").join("glance.toml");
    path.exists().then_some(path)
}

/// Split file contents into lines, tolerating a trailing newline and CRLF
/// endings. Invalid UTF-8 is handled downstream by the byte mask path.
fn byte_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines.pop();
    }
    lines
}

//! Command-line interface definitions for darter.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A fast concurrent TCP connect port prober.
#[derive(Parser, Debug)]
#[command(name = "darter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Probe TCP port reachability across hosts and CIDR blocks", long_about = None)]
pub struct Cli {
    /// Target to scan: IP address, hostname, or CIDR block (e.g. 192.168.1.0/24)
    #[arg(value_name = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Ports to probe (e.g. "80", "80,443", "1-1000", "22,80,1000-2000")
    #[arg(short, long, value_name = "SPEC")]
    pub range: Option<String>,

    /// Maximum number of concurrent probes
    #[arg(short, long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-probe connection timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// File with one target per line (overrides HOST)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose output (scan progress and debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the banner and per-target markers
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Read target tokens from a line-oriented file.
///
/// One host, IP, or CIDR block per line; blank lines are skipped and
/// surrounding whitespace is trimmed. An unreadable file is fatal to the
/// whole invocation, before any scanning begins.
pub fn read_target_file(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::parse_from(["darter"]);
        assert_eq!(cli.host, "127.0.0.1");
        assert!(cli.range.is_none());
        assert!(cli.file.is_none());
    }

    #[test]
    fn target_file_skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "192.168.1.1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  10.0.0.0/30  ").unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "example.com").unwrap();

        let targets = read_target_file(file.path()).unwrap();
        assert_eq!(targets, vec!["192.168.1.1", "10.0.0.0/30", "example.com"]);
    }

    #[test]
    fn unreadable_target_file_is_an_error() {
        assert!(read_target_file(Path::new("/nonexistent/targets.txt")).is_err());
    }
}

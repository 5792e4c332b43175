//! `lsseq` - condense long listings of numbered file names.
//!
//! Reads lines from the given files (or stdin) and prints the condensed
//! report to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use lsseq::{lines, Condenser};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lsseq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Condense listings of duplicate and sequentially numbered lines", long_about = None)]
struct Cli {
    /// Input files, read in order as one listing ("-" or none for stdin)
    inputs: Vec<PathBuf>,

    /// Drop the blank line that precedes the first block
    #[arg(long, env = "LSSEQ_TRIM_LEADING")]
    trim_leading: bool,

    /// Print line and block counts to stderr
    #[arg(long)]
    stats: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

/// Sets up the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`.
fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(io::stderr).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()
            .ok();
    }
}

fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_tracing(cli.json, level);

    let inputs = if cli.inputs.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.inputs
    };

    let mut condenser = Condenser::new();
    let mut report = String::new();

    for path in &inputs {
        debug!(input = %path.display(), "reading");
        for line in lines(open(path)?) {
            let line = line.with_context(|| format!("failed to read {}", path.display()))?;
            if let Some(block) = condenser.push(line) {
                block.append_to(&mut report);
            }
        }
    }
    if let Some(block) = condenser.finish() {
        block.append_to(&mut report);
    }

    let text = if cli.trim_leading {
        report.strip_prefix('\n').unwrap_or(&report)
    } else {
        report.as_str()
    };

    if !report.is_empty() {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}").context("failed to write report")?;
    }

    let stats = condenser.stats();
    info!(lines = stats.input_lines, blocks = stats.blocks, "done");
    if cli.stats {
        eprintln!("{stats}");
    }

    Ok(())
}

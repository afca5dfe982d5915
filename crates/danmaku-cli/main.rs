//! danmaku: convert a JSON comment list into an ASS subtitle script
//!
//! Usage:
//!   danmaku comments.json                 Write comments.ass next to the input
//!   danmaku comments.json -o - -s 1280x720 Write to stdout for a 720p canvas
//!   danmaku comments.json --reduce        Drop comments that do not fit

use std::{fs, io::Write};

use anyhow::{Context, Result};
use clap::Parser;
use danmaku_core::{Converter, RawComment};

mod args;
mod logging;

use args::{Cli, Output};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let input = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let comments: Vec<RawComment> = serde_json::from_str(&input)
        .with_context(|| format!("{} is not a JSON array of comments", cli.file.display()))?;
    tracing::debug!(count = comments.len(), path = %cli.file.display(), "loaded comments");

    let mut converter = Converter::new(cli.layout()).context("invalid layout")?;
    if let Some(pattern) = &cli.filter {
        converter = converter.with_filter(pattern).context("invalid --filter")?;
    }

    let (script, stats) = converter.to_ass(&comments)?;

    match cli.output() {
        Output::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(script.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
        Output::File(path) => {
            fs::write(&path, &script)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote subtitle script");
        }
    }

    if stats.emitted() == 0 && !comments.is_empty() {
        tracing::warn!("no comments were emitted");
    }
    Ok(())
}

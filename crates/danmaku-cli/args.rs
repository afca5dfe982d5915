//! Command-line arguments

use std::path::{Path, PathBuf};

use clap::Parser;
use danmaku_core::{LayoutConfig, PoolPolicy, RowUnit};

#[derive(Debug, Parser)]
#[command(
    name = "danmaku",
    about = "Convert timed video comments into collision-free ASS subtitles",
    version
)]
pub struct Cli {
    /// JSON file holding an array of comment records
    pub file: PathBuf,

    /// Output file, `-` for stdout [default: input with an .ass extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Canvas size
    #[arg(short = 's', long = "size", default_value = "1920x1080", value_parser = parse_size)]
    pub size: (u32, u32),

    /// Rows at the bottom of the canvas kept free of comments
    #[arg(long, default_value = "0")]
    pub reserve_blank: u32,

    /// Font face
    #[arg(long, default_value = "sans-serif")]
    pub font: String,

    /// Baseline font size in pixels
    #[arg(long = "fontsize", default_value = "25.0")]
    pub font_size: f64,

    /// Text opacity in [0, 1]
    #[arg(long, default_value = "1.0")]
    pub alpha: f64,

    /// Seconds a scrolling comment takes to cross the screen
    #[arg(long = "duration-marquee", default_value = "5.0")]
    pub duration_marquee: f64,

    /// Seconds a stationary comment stays on screen
    #[arg(long = "duration-still", default_value = "5.0")]
    pub duration_still: f64,

    /// Drop comments whose text matches this regular expression
    #[arg(long)]
    pub filter: Option<String>,

    /// Drop comments that do not fit instead of overlapping them
    #[arg(long)]
    pub reduce: bool,

    /// Row granularity: pixel or line
    #[arg(long, default_value = "pixel")]
    pub row_unit: RowUnit,

    /// Give owner comments their own rows
    #[arg(long)]
    pub separate_pools: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the script goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Standard output
    Stdout,
    /// A file
    File(PathBuf),
}

impl Cli {
    /// Layout described by the arguments
    pub fn layout(&self) -> LayoutConfig {
        let (width, height) = self.size;
        LayoutConfig::new(width, height)
            .with_reserve_blank(self.reserve_blank)
            .with_font(self.font.clone(), self.font_size)
            .with_alpha(self.alpha)
            .with_durations(self.duration_marquee, self.duration_still)
            .with_reduced(self.reduce)
            .with_row_unit(self.row_unit)
            .with_pool_policy(if self.separate_pools {
                PoolPolicy::Independent
            } else {
                PoolPolicy::Shared
            })
    }

    /// Resolved output destination
    pub fn output(&self) -> Output {
        match &self.output {
            Some(path) if path.as_os_str() == "-" => Output::Stdout,
            Some(path) => Output::File(path.clone()),
            None => Output::File(default_output(&self.file)),
        }
    }
}

/// Input path with its extension replaced by `.ass`
pub fn default_output(input: &Path) -> PathBuf {
    input.with_extension("ass")
}

/// Parse `WIDTHxHEIGHT`
pub fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| format!("invalid dimension '{part}' in '{value}'"))
    };
    Ok((parse(width)?, parse(height)?))
}

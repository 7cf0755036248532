//! CLI definition using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use codescan_frame::Region;

#[derive(Parser)]
#[command(name = "codescan", about = "Read a 6-digit code from live video by consensus")]
pub struct Cli {
    /// TOML config file ([consensus], [region], [scan] tables)
    #[arg(long, short = 'c', global = true, env = "CODESCAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sample frames until the readings converge on one code
    Scan(ScanOpts),
    /// Replay recognizer output lines from stdin through the decider
    Decide(DecideOpts),
}

/// Threshold overrides shared by `scan` and `decide`.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct PolicyOpts {
    /// Sightings needed when only one code has been read
    #[arg(long)]
    pub min_single: Option<u32>,

    /// Count a contested leader must reach; it must also lead by half of this
    #[arg(long)]
    pub saturated: Option<u32>,
}

#[derive(clap::Args, Debug, Default)]
pub struct ScanOpts {
    /// Capture command writing one encoded frame to stdout per call
    #[arg(long, conflicts_with = "source_dir")]
    pub source_cmd: Option<String>,

    /// Directory of frame images to replay in lexical order
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Loop over --source-dir instead of stopping at the last frame
    #[arg(long, requires = "source_dir")]
    pub repeat: bool,

    /// tesseract binary
    #[arg(long)]
    pub tesseract_bin: Option<String>,

    /// Recognizer language
    #[arg(long)]
    pub lang: Option<String>,

    /// tesseract page segmentation mode
    #[arg(long)]
    pub psm: Option<u8>,

    /// Region of interest as left,top,width,height (default: centered 300x200)
    #[arg(long)]
    pub region: Option<Region>,

    /// Surface width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Surface height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    #[command(flatten)]
    pub policy: PolicyOpts,

    /// Pause between frames in milliseconds
    #[arg(long)]
    pub frame_interval_ms: Option<u64>,

    /// Treat a recognition slower than this as a failed frame
    #[arg(long)]
    pub recognize_timeout_ms: Option<u64>,

    /// Stop without a result after this many frames
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Write the marked frame to this PNG after each undecided frame
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not copy the result to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Start a new session on a fresh source after each accepted code
    #[arg(long)]
    pub continuous: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct DecideOpts {
    #[command(flatten)]
    pub policy: PolicyOpts,

    /// Print the evaluation as JSON
    #[arg(long)]
    pub json: bool,
}

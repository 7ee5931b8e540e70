//! CLI argument definitions for the ad composer.

use std::path::PathBuf;

use adforge_cli::escape::unescape;
use adforge_output::ExportKind;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "adforge",
    version,
    about = "Compose ad variations from interchangeable lines",
    long_about = "Compose ad variations from interchangeable lines.\n\n\
                  Each slot holds candidate lines; every combination of one line per \
                  active slot is an ad. Ads are numbered from 1 and can be edited, \
                  searched and exported without listing the whole space."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Session file (defaults to the settings value, then the data folder).
    #[arg(long = "store", value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List slots with their candidates and state.
    Slots,

    /// Print the number of ads.
    Count,

    /// Show one ad and the lines it was built from.
    Show {
        #[arg(value_name = "AD")]
        ad: u64,
    },

    /// Show the first ads in order.
    Preview {
        /// Number of ads to show (defaults to the configured preview cap).
        #[arg(long = "limit", value_name = "N")]
        limit: Option<u64>,
    },

    /// Find the next ad containing TERM, ignoring case.
    Find {
        #[arg(value_name = "TERM")]
        term: String,

        /// Start searching after this ad (wraps around).
        #[arg(long = "from", value_name = "AD")]
        from: Option<u64>,
    },

    /// Replace the whole text of one ad.
    SetText {
        #[arg(value_name = "AD")]
        ad: u64,
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: String,
    },

    /// Toggle whether a slot's line is left out of one ad.
    Exclude {
        #[arg(value_name = "AD")]
        ad: u64,
        #[arg(value_name = "SLOT")]
        slot: String,
    },

    /// Drop the edits made to one ad.
    ClearOverride {
        #[arg(value_name = "AD")]
        ad: u64,
    },

    /// Drop every per-ad edit.
    ClearOverrides,

    /// Append an empty slot.
    AddSlot {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Delete a slot and its candidates.
    RemoveSlot {
        #[arg(value_name = "SLOT")]
        slot: String,
    },

    /// Rename a slot. Per-ad edits are kept.
    RenameSlot {
        #[arg(value_name = "SLOT")]
        slot: String,
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Move a slot to a new position (1-based).
    MoveSlot {
        #[arg(value_name = "SLOT")]
        slot: String,
        #[arg(value_name = "POSITION")]
        position: usize,
    },

    /// Include a slot in the combinations.
    Enable {
        #[arg(value_name = "SLOT")]
        slot: String,
    },

    /// Leave a slot out of every combination.
    Disable {
        #[arg(value_name = "SLOT")]
        slot: String,
    },

    /// Append a candidate line to a slot.
    AddCandidate {
        #[arg(value_name = "SLOT")]
        slot: String,
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: String,
    },

    /// Replace the text of one candidate (1-based position).
    EditCandidate {
        #[arg(value_name = "SLOT")]
        slot: String,
        #[arg(value_name = "POSITION")]
        position: usize,
        #[arg(value_name = "TEXT", allow_hyphen_values = true)]
        text: String,
    },

    /// Delete one candidate (1-based position).
    RemoveCandidate {
        #[arg(value_name = "SLOT")]
        slot: String,
        #[arg(value_name = "POSITION")]
        position: usize,
    },

    /// Turn slot headings in composed ads on or off.
    Headings {
        #[arg(value_enum, value_name = "STATE")]
        state: Toggle,
    },

    /// Set the text placed between slots (accepts \n and \t).
    Separator {
        #[arg(value_name = "TEXT", value_parser = parse_separator, allow_hyphen_values = true)]
        text: String,
    },

    /// Write every ad out.
    Export(ExportArgs),
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_enum, value_name = "SHAPE")]
    pub shape: ShapeArg,

    /// Output directory.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out: PathBuf,

    /// Answer yes to every confirmation.
    #[arg(long = "yes", short = 'y')]
    pub yes: bool,

    /// Override the configured safety cap.
    #[arg(long = "safety-cap", value_name = "N")]
    pub safety_cap: Option<u64>,

    /// Override the pause between individual files, in milliseconds.
    #[arg(long = "delay-ms", value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShapeArg {
    /// One zip archive with one entry per ad.
    Archive,
    /// One markdown document with every ad.
    Document,
    /// One file per ad.
    Files,
}

impl From<ShapeArg> for ExportKind {
    fn from(shape: ShapeArg) -> Self {
        match shape {
            ShapeArg::Archive => Self::Archive,
            ShapeArg::Document => Self::Document,
            ShapeArg::Files => Self::Files,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_separator(raw: &str) -> Result<String, String> {
    Ok(unescape(raw))
}

//! CLI argument definitions for the Seek demo shell.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "seek-demo",
    version,
    about = "Seek demo shell - drive activity lifecycles headlessly",
    long_about = "Run scripted navigation sessions against the Seek demo application.\n\n\
                  Every step prints the visible activity and the back-stack; the run\n\
                  ends with the state of each registered activity and fragment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for transitions, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags and settings).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (overrides settings).
    #[arg(long = "log-format", value_enum, global = true)]
    pub log_format: Option<LogFormatArg>,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a scripted navigation session.
    Tour(TourArgs),

    /// List the registered demo activities.
    Activities,

    /// Print the effective settings and where they are stored.
    Config,
}

#[derive(Parser)]
pub struct TourArgs {
    /// Steps to run: main, next, settings, back, home, toast, fragment:<name>.
    /// Runs a default tour when omitted.
    #[arg(value_name = "STEP")]
    pub steps: Vec<String>,

    /// Main window title.
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Main window width.
    #[arg(long = "width")]
    pub width: Option<f64>,

    /// Main window height.
    #[arg(long = "height")]
    pub height: Option<f64>,

    /// Start the main window maximized.
    #[arg(long = "maximized")]
    pub maximized: bool,

    /// Which fragments a fragment manager stops with its activity.
    #[arg(long = "stop-broadcast", value_enum)]
    pub stop_broadcast: Option<StopBroadcastArg>,

    /// Skip the summary tables.
    #[arg(long = "no-summary")]
    pub no_summary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StopBroadcastArg {
    /// Stop fragments that are neither stopped nor destroyed.
    Guarded,
    /// Stop every registered fragment.
    Unconditional,
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

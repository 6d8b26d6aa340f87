//! Seek demo shell.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use seek_demo::logging::{LogConfig, LogFormat, init_logging, timestamped_log_path};
use seek_demo::settings::{LogLevel, Settings};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_activities, run_config, run_tour_command};
use crate::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    let settings = Settings::load_from(&config_path);
    let log_config = log_config_from_cli(&cli, &settings);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Tour(args) => match run_tour_command(&args, &settings) {
            Ok(report) => {
                if !args.no_summary {
                    print_summary(&report);
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Activities => match run_activities() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Config => match run_config(&settings, &config_path) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration with consistent precedence:
/// `--log-level`, then `-v`/`-q`, then the settings file.
fn log_config_from_cli(cli: &Cli, settings: &Settings) -> LogConfig {
    let mut config = LogConfig {
        level_filter: level_from_settings(settings.logging.level),
        ..LogConfig::default()
    };
    if cli.verbosity.is_present() {
        config.level_filter = cli.verbosity.tracing_level_filter();
    }
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Compact) => LogFormat::Compact,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => settings.logging.format,
    };
    config.log_file = cli.log_file.clone().or_else(|| {
        settings
            .logging
            .to_file
            .then(|| timestamped_log_path(&settings.logging.directory))
    });
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => config.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

fn level_from_settings(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

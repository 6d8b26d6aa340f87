use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use seek_core::StopBroadcast;
use seek_demo::demo;
use seek_demo::settings::Settings;
use seek_demo::tour::{TourReport, parse_steps, run_tour};

use crate::cli::{StopBroadcastArg, TourArgs};
use crate::summary::{apply_table_style, header_cell};

pub fn run_tour_command(args: &TourArgs, settings: &Settings) -> Result<TourReport> {
    let steps = parse_steps(&args.steps)?;
    let settings = tour_settings(args, settings);
    tracing::info!(
        steps = steps.len(),
        title = %settings.window.title,
        stop_broadcast = ?settings.lifecycle.stop_broadcast,
        "Starting tour"
    );
    run_tour(&steps, &settings)
}

/// Apply command-line overrides on top of the loaded settings.
fn tour_settings(args: &TourArgs, settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if let Some(title) = &args.title {
        settings.window.title.clone_from(title);
    }
    if let Some(width) = args.width {
        settings.window.width = width;
    }
    if let Some(height) = args.height {
        settings.window.height = height;
    }
    if args.maximized {
        settings.window.maximized = true;
    }
    if let Some(policy) = args.stop_broadcast {
        settings.lifecycle.stop_broadcast = match policy {
            StopBroadcastArg::Guarded => StopBroadcast::Guarded,
            StopBroadcastArg::Unconditional => StopBroadcast::Unconditional,
        };
    }
    settings
}

pub fn run_activities() -> Result<()> {
    let registry = demo::registry();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Activity"), header_cell("Description")]);
    apply_table_style(&mut table);
    for key in registry.keys() {
        table.add_row(vec![Cell::new(key), Cell::new(demo::describe(key))]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_config(settings: &Settings, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    println!("# {}", path.display());
    if !path.exists() {
        println!("# (file not found, showing defaults)");
    }
    println!("{content}");
    Ok(())
}

//! sangocui - declarative terminal panels driven by keybinding files
//!
//! Usage:
//!   sangocui [OPTIONS]
//!
//! Examples:
//!   sangocui                                  # Bundled demo from ./assets
//!   sangocui --views my/panels.json --keybinds my/keys.json --focus side
//!   sangocui --log-level debug

mod demo;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use sangocui_app::Sangocui;
use sangocui_config::Settings;
use sangocui_gui::{terminal, EventHandler};
use sangocui_logger::LogLevel;

/// Command line arguments; each one overrides the settings file
#[derive(Parser)]
#[command(name = "sangocui")]
#[command(about = "Declarative terminal panels driven by keybinding files")]
#[command(version)]
struct Args {
    /// Panel declaration file (JSON)
    #[arg(long)]
    views: Option<PathBuf>,

    /// Keybinding declaration file (JSON)
    #[arg(long)]
    keybinds: Option<PathBuf>,

    /// View focused at startup
    #[arg(long)]
    focus: Option<String>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = Settings::load().unwrap_or_default();

    let level_name = args
        .log_level
        .as_deref()
        .unwrap_or(&settings.logging.min_level);
    let min_level = LogLevel::from_str(level_name).unwrap_or(LogLevel::Info);
    sangocui_logger::init(
        settings.log_file_path(),
        settings.logging.max_entries,
        min_level,
    );
    sangocui_logger::info("Application started");

    // Initialize terminal
    let (terminal, keyboard_enhanced) = terminal::init()?;

    let result = run(terminal, &args, &settings);

    // Restore terminal
    terminal::restore(keyboard_enhanced)?;

    if let Err(err) = result {
        sangocui_logger::error(format!("Fatal: {:#}", err));
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    sangocui_logger::info("Application stopped");
    Ok(())
}

fn run(terminal: terminal::CrosstermTerminal, args: &Args, settings: &Settings) -> Result<()> {
    let views = args
        .views
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.ui.views_path));
    let keybinds = args
        .keybinds
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.ui.keybinds_path));
    let focus = args.focus.as_deref().unwrap_or(&settings.ui.default_focus);

    let events = EventHandler::new(Duration::from_millis(settings.ui.tick_rate_ms));
    let mut app = Sangocui::new(terminal, Box::new(events))?;
    app.configure(&views, &keybinds, focus)?;
    app.register_subscribers(demo::subscribers());
    demo::spawn_clock(app.updater());

    app.boot()
}

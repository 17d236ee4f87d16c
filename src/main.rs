//! # Baker CLI Entry Point
//!
//! Baker shows a fixed list of build actions on the left and the output of
//! the last runs on the right. Selecting an action runs it to completion and
//! appends everything it printed to the output pane.
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard in the current directory
//! baker
//!
//! # Print the available actions and exit
//! baker --list
//!
//! # Keep at most 2000 lines of output and log to a file
//! baker --history-limit 2000 --log-file baker.log
//! ```
//!
//! ## Key Bindings
//!
//! - `Up` / `Down` - Move selection (wraps around)
//! - `Enter` - Run the selected action
//! - `PgUp` / `PgDn` - Scroll the output pane by one page
//! - `q` / `Esc` - Quit
//!
//! Commands run in baker's working directory with its environment. The UI is
//! blocked until the command exits.

use baker::command::{Registry, SystemRunner};
use baker::ui::{self, App, CrosstermEventReader, TerminalGuard};

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Baker - run build actions from a two-pane terminal dashboard
#[derive(Parser, Debug)]
#[command(name = "baker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for running build commands", long_about = None)]
struct Args {
    /// Print the available actions and exit
    #[arg(long)]
    list: bool,

    /// Maximum number of output lines kept; older lines are dropped
    #[arg(
        long,
        value_name = "LINES",
        default_value_t = ui::buffer::DEFAULT_HISTORY_LIMIT,
        value_parser = parse_history_limit
    )]
    history_limit: usize,

    /// Write a debug log to FILE
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn parse_history_limit(value: &str) -> Result<usize, String> {
    let limit: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if limit == 0 {
        return Err("history limit must be at least 1".to_string());
    }
    Ok(limit)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let registry = Registry::builtin();

    if args.list {
        print!("{}", format_registry(&registry));
        return Ok(());
    }

    run_application(registry, args.history_limit)
}

fn init_logging(path: &Path) -> Result<()> {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    WriteLogger::init(LevelFilter::Debug, log_config, log_file)
        .context("Failed to initialize logger")?;

    log::info!("Baker starting up");
    Ok(())
}

fn run_application(registry: Registry, history_limit: usize) -> Result<()> {
    ui::terminal::install_panic_hook();
    ui::terminal::install_signal_handler()?;

    // Nothing has been drawn yet if this fails
    let mut guard = TerminalGuard::acquire()?;

    let mut app = App::new(registry, history_limit);
    let run_result = ui::run_app(
        guard.terminal_mut(),
        &mut app,
        &mut CrosstermEventReader,
        &mut SystemRunner,
    );

    // Restore terminal (always runs, even if run_app failed)
    let cleanup_result = guard.restore();

    // Return the first error that occurred, or Ok if both succeeded
    run_result?;
    cleanup_result?;

    log::info!("Baker exiting");
    Ok(())
}

fn format_registry(registry: &Registry) -> String {
    let width = registry
        .commands()
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    registry
        .commands()
        .iter()
        .map(|c| {
            let action = match &c.action {
                Some(action) => action.to_string(),
                None => "(not implemented)".to_string(),
            };
            format!("{:width$}  {}\n", c.name, action, width = width)
        })
        .collect()
}

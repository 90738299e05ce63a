//! Hexlens - A terminal binary file inspector.
//!
//! # Usage
//!
//! ```bash
//! hexlens firmware.bin
//! hexlens --view text notes.dat
//! hexlens --writable image.raw
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexlens::app::{App, MIN_HEIGHT, MIN_WIDTH};
use hexlens::config::{
    ConfigFlags, StartView, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};

/// A terminal binary file inspector with hex/text views and an expression calculator
#[derive(Parser, Debug)]
#[command(name = "hexlens", version, about, long_about = None)]
struct Cli {
    /// File to inspect
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// View to start in
    #[arg(long, value_enum)]
    view: Option<StartView>,

    /// Open the file read-write at startup instead of read-only
    #[arg(long)]
    writable: bool,

    /// Write log events to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let log_file = effective
        .log_file
        .clone()
        .or_else(|| std::env::var_os("HEXLENS_LOG").map(PathBuf::from));
    init_logging(log_file.as_deref())?;

    let (width, height) = crossterm::terminal::size().context("cannot query terminal size")?;
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        anyhow::bail!("screen must be >={MIN_WIDTH}x{MIN_HEIGHT}, found {width}x{height}");
    }

    let mut app = App::new(cli.file)
        .with_writable(effective.writable)
        .with_start_view(effective.view.unwrap_or(StartView::Hex).into());

    app.run().context("Application error")
}

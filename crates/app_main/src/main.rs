//! Image Viewer - natural-order image list with shuffle mode
//!
//! Main entry point.

mod app;

use anyhow::Result;
use app_core::{SeededShuffle, Settings, ViewerSession};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "image_viewer", version, about = "Simple Image Viewer")]
struct Cli {
    /// Image files or directories
    files: Vec<PathBuf>,

    /// Search subdirectories too
    #[arg(short, long)]
    recursive: bool,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Seed for reproducible shuffle order
    #[arg(long)]
    seed: Option<u64>,

    /// Start in shuffle mode
    #[arg(long)]
    shuffle: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging and panic hook first
    app_log::init()?;

    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Image Viewer starting...");

    let settings_path = cli.settings.clone().unwrap_or_else(Settings::settings_path);
    let settings = Settings::load_from(&settings_path);

    let mut session = match cli.seed {
        Some(seed) => ViewerSession::with_shuffle_source(settings, Box::new(SeededShuffle::new(seed))),
        None => ViewerSession::new(settings),
    };

    if cli.files.is_empty() {
        session.restore_recent();
    } else {
        session.open_inputs(&cli.files, cli.recursive);
    }

    if cli.shuffle {
        session.start_shuffled();
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app::run(&mut session, stdin.lock(), stdout.lock())?;

    let settings = session.into_settings();
    if let Err(e) = settings.save_to(&settings_path) {
        tracing::error!("Failed to save settings: {}", e);
        eprintln!("{}", e.user_message());
    }

    tracing::info!("Image Viewer exiting");
    Ok(())
}

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

mod app;
mod audio;
mod config;
mod game;
mod input;
mod store;
mod ui;

pub use config::{
    BOARD_H, BOARD_W, BUTTON_ROW_H, CELL_W, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W,
    SIDEBAR_W,
};
pub use game::Game;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(name = "blockfall", version)]
struct Args {
    /// Seed for the piece generator; omit for a fresh random game each launch.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Where the best score is kept. Defaults to $BLOCKFALL_BEST_PATH or the user config dir.
    #[arg(long, value_name = "FILE")]
    best_file: Option<PathBuf>,

    /// Append logs to this file (filter with RUST_LOG). Logging is off otherwise.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Disable the terminal bell.
    #[arg(long)]
    mute: bool,

    /// Frame length in milliseconds.
    #[arg(long, default_value_t = config::DEFAULT_FRAME_MS, value_name = "MS")]
    frame_ms: u64,
}

impl Args {
    fn into_settings(self) -> config::Settings {
        config::Settings {
            seed: self.seed,
            best_path: self.best_file.unwrap_or_else(config::default_best_path),
            log_file: self.log_file,
            mute: self.mute,
            frame_ms: self.frame_ms,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}

fn main() -> Result<()> {
    let settings = Args::parse().into_settings();
    if let Some(path) = &settings.log_file {
        init_logging(path)?;
    }
    app::run(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_fold_into_settings() {
        let args = Args::try_parse_from([
            "blockfall",
            "--seed",
            "9",
            "--best-file",
            "/tmp/b.json",
            "--mute",
            "--frame-ms",
            "33",
        ])
        .expect("valid args");
        let settings = args.into_settings();
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.best_path, PathBuf::from("/tmp/b.json"));
        assert!(settings.mute);
        assert_eq!(settings.frame_ms, 33);
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn defaults_are_sane() {
        let settings = Args::try_parse_from(["blockfall"])
            .expect("no args")
            .into_settings();
        assert_eq!(settings.seed, None);
        assert!(!settings.mute);
        assert_eq!(settings.frame_ms, config::DEFAULT_FRAME_MS);
        assert!(settings.best_path.ends_with("best.json"));
    }
}

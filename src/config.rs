use std::path::PathBuf;

// Shared game UI/constants.
pub const BOARD_W: usize = 10;
pub const BOARD_H: usize = 20;
pub const CELL_W: usize = 2; // render each block two characters wide
pub const PLAY_W: usize = BOARD_W * CELL_W + 2; // inner width plus side walls
pub const PLAY_H: usize = BOARD_H + 2; // inner height plus ceiling/floor
pub const SIDEBAR_W: u16 = 24;
pub const BUTTON_ROW_H: u16 = 3;
// Minimal pane width to fit the well, the sidebar and the cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + SIDEBAR_W + 2;
pub const MIN_PANE_HEIGHT: u16 = (PLAY_H as u16) + BUTTON_ROW_H + 2;

// Gravity: interval = max(MIN_DROP_MS, BASE_DROP_MS - (level - 1) * DROP_STEP_MS).
pub const BASE_DROP_MS: u64 = 1000;
pub const DROP_STEP_MS: u64 = 100;
pub const MIN_DROP_MS: u64 = 100;
pub const LINES_PER_LEVEL: u64 = 10;
pub const LINE_POINTS: [u64; 4] = [40, 100, 300, 1200];
pub const HARD_DROP_COOLDOWN_MS: u64 = 300;

pub const LOCK_FLASH_MS: u64 = 120;
pub const CLEAR_FLASH_MS: u64 = 250;

pub const DEFAULT_FRAME_MS: u64 = 16;
pub const BEST_PATH_ENV: &str = "BLOCKFALL_BEST_PATH";

/// Runtime options resolved from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    pub seed: Option<u64>,
    pub best_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub mute: bool,
    pub frame_ms: u64,
}

/// Where the best score lives when no explicit path is given.
pub fn default_best_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os(BEST_PATH_ENV) {
        return PathBuf::from(explicit);
    }

    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        });

    match base {
        Some(mut path) => {
            path.push("blockfall");
            path.push("best.json");
            path
        }
        None => PathBuf::from("best.json"),
    }
}

//! Line-clear scoring and gravity speed.

use crate::config::{BASE_DROP_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_POINTS, MIN_DROP_MS};

/// Points for clearing `cleared` rows in one lock at `level`. Zero rows score nothing.
pub fn line_points(cleared: usize, level: u64) -> u64 {
    match cleared {
        1..=4 => LINE_POINTS[cleared - 1] * level,
        _ => 0,
    }
}

pub fn level_for_lines(lines: u64) -> u64 {
    lines / LINES_PER_LEVEL + 1
}

/// Milliseconds between automatic descents. Never drops below `MIN_DROP_MS`.
pub fn drop_interval_ms(level: u64) -> u64 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(reduction).max(MIN_DROP_MS)
}

mod render;

use ratatui::prelude::*;

use crate::input::{Command, TOUCH_BUTTONS};
use crate::{BUTTON_ROW_H, PLAY_H, PLAY_W, SIDEBAR_W};

pub use render::draw_game;

/// Screen regions for one frame. Shared by the renderer and the mouse hit test
/// so both agree on where the buttons are.
pub struct Regions {
    pub cabinet: Rect,
    pub well: Rect,
    pub info: Rect,
    pub next: Rect,
    pub controls: Rect,
    pub buttons: Vec<(Rect, Command)>,
}

pub fn layout(area: Rect) -> Regions {
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    // Split into play area (left) and sidebar (right).
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(PLAY_W as u16), Constraint::Length(SIDEBAR_W)])
        .split(inner);

    // Centre the fixed-size well with the button row under it.
    let v_center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(PLAY_H as u16),
            Constraint::Length(BUTTON_ROW_H),
            Constraint::Min(0),
        ])
        .split(cols[0]);
    let h_center = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(PLAY_W as u16),
                Constraint::Min(0),
            ])
            .split(row)[1]
    };
    let well = h_center(v_center[1]);
    let button_row = h_center(v_center[2]);

    let n = TOUCH_BUTTONS.len();
    let button_cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(button_row);
    let buttons = button_cells
        .iter()
        .zip(TOUCH_BUTTONS.iter())
        .map(|(rect, (_, cmd))| (*rect, *cmd))
        .collect();

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(cols[1]);

    Regions {
        cabinet: area,
        well,
        info: side[0],
        next: side[1],
        controls: side[2],
        buttons,
    }
}

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::Game;

/// Everything the player can ask for, whichever device it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Start,
    Restart,
    Menu,
    Quit,
}

/// On-screen buttons, left to right.
pub const TOUCH_BUTTONS: [(&str, Command); 6] = [
    ("◀", Command::MoveLeft),
    ("▶", Command::MoveRight),
    ("▼", Command::SoftDrop),
    ("⤓", Command::HardDrop),
    ("⟳", Command::Rotate),
    ("⏸", Command::TogglePause),
];

pub fn from_key(key: KeyEvent) -> Option<Command> {
    // one action per physical press
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    let cmd = match key.code {
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char(' ') => Command::HardDrop,
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Command::TogglePause,
        KeyCode::Enter | KeyCode::Char('s') => Command::Start,
        KeyCode::Char('r') => Command::Restart,
        KeyCode::Char('m') => Command::Menu,
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Left-button presses inside a button rectangle. Drags and releases are ignored.
pub fn from_mouse(mouse: MouseEvent, buttons: &[(Rect, Command)]) -> Option<Command> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }
    buttons
        .iter()
        .find(|(rect, _)| contains(*rect, mouse.column, mouse.row))
        .map(|(_, cmd)| *cmd)
}

fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Routes a command to the controller. `Quit` is the host's business and is ignored here.
pub fn apply(cmd: Command, game: &mut Game) {
    match cmd {
        Command::MoveLeft => {
            let _ = game.move_left();
        }
        Command::MoveRight => {
            let _ = game.move_right();
        }
        Command::SoftDrop => {
            let _ = game.soft_drop();
        }
        Command::Rotate => {
            let _ = game.rotate();
        }
        Command::HardDrop => {
            let _ = game.hard_drop();
        }
        Command::TogglePause => game.toggle_pause(),
        Command::Start => game.start(),
        Command::Restart => game.restart(),
        Command::Menu => game.back_to_menu(),
        Command::Quit => {}
    }
}

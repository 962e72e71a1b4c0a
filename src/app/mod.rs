use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::info;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::Game;
use crate::audio::{AudioSink, Bell, Silent};
use crate::config::Settings;
use crate::game::RandomSource;
use crate::input::{self, Command};
use crate::store::JsonFileStore;
use crate::ui::{draw_game, layout};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(settings: Settings) -> Result<()> {
    let audio: Box<dyn AudioSink> = if settings.mute {
        Box::new(Silent)
    } else {
        Box::new(Bell)
    };
    let store = JsonFileStore::new(&settings.best_path);
    info!("best score file: {}", store.path().display());
    let game = Game::new(Box::new(RandomSource::new(settings.seed)), audio, Box::new(store));

    let mut tui = TuiGuard::new().context("failed to set up the terminal")?;
    run_loop(tui.terminal_mut(), game, Duration::from_millis(settings.frame_ms.max(1)))
}

fn run_loop(terminal: &mut Term, mut game: Game, frame: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw_game(f, &game.snapshot()))?;

        // Input is applied between ticks, never in the middle of one.
        if event::poll(frame)? {
            let cmd = match event::read()? {
                Event::Key(key) => input::from_key(key),
                Event::Mouse(mouse) => {
                    let area = terminal.size()?;
                    input::from_mouse(mouse, &layout(area).buttons)
                }
                _ => None,
            };
            match cmd {
                Some(Command::Quit) => break,
                Some(cmd) => input::apply(cmd, &mut game),
                None => {}
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed = last_tick.elapsed().as_millis() as u64;
        last_tick += Duration::from_millis(elapsed);
        game.tick(elapsed);
    }

    game.dispose();
    info!("quit");
    Ok(())
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

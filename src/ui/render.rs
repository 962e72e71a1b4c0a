use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::game::piece::matrix_cells;
use crate::game::{Cell, Phase, Piece, Shape, Snapshot};
use crate::input::{Command, TOUCH_BUTTONS};
use crate::ui::layout;
use crate::{CELL_W, MIN_PANE_HEIGHT, MIN_PANE_WIDTH, PLAY_H, PLAY_W};

type Glyph = (char, Style);

pub fn draw_game(frame: &mut Frame, snap: &Snapshot) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE PANE (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("BLOCKFALL"));
        frame.render_widget(msg, area);
        return;
    }

    let regions = layout(area);

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .title("BLOCKFALL")
        .border_type(BorderType::Thick)
        .borders(Borders::ALL)
        .title_alignment(Alignment::Left);
    frame.render_widget(cabinet, regions.cabinet);

    draw_playfield(frame, snap, regions.well);
    draw_buttons(frame, &regions.buttons);
    draw_info(frame, snap, regions.info);
    draw_next(frame, snap.next, regions.next);
    draw_controls(frame, snap.notice, regions.controls);
}

fn shape_style(shape: Shape) -> Style {
    let (r, g, b) = shape.rgb();
    Style::default().fg(Color::Rgb(r, g, b))
}

fn draw_playfield(frame: &mut Frame, snap: &Snapshot, play_rect: Rect) {
    let wall = Style::default().fg(Color::DarkGray);
    let mut grid: Vec<Vec<Glyph>> = vec![vec![(' ', Style::default()); PLAY_W]; PLAY_H];

    // Border: top/ceiling, sides, heavy floor.
    grid[0][0] = ('┌', wall);
    grid[0][PLAY_W - 1] = ('┐', wall);
    for x in 1..PLAY_W - 1 {
        grid[0][x] = ('─', wall);
    }
    for row in grid.iter_mut().take(PLAY_H - 1).skip(1) {
        row[0] = ('│', wall);
        row[PLAY_W - 1] = ('│', wall);
    }
    grid[PLAY_H - 1][0] = ('└', wall);
    grid[PLAY_H - 1][PLAY_W - 1] = ('┘', wall);
    for x in 1..PLAY_W - 1 {
        grid[PLAY_H - 1][x] = ('═', wall);
    }

    // Blocks are two characters wide inside the walls.
    let plot = |grid: &mut [Vec<Glyph>], bx: i32, by: i32, ch: char, style: Style| {
        if bx < 0 || by < 0 {
            return;
        }
        let gx = 1 + bx as usize * CELL_W;
        let gy = 1 + by as usize;
        if gy < PLAY_H - 1 && gx + 1 < PLAY_W - 1 {
            grid[gy][gx] = (ch, style);
            grid[gy][gx + 1] = (ch, style);
        }
    };

    let fx = snap.effects;
    let flash = Style::default().fg(Color::White);
    for y in 0..snap.board.height {
        for x in 0..snap.board.width {
            if let Cell::Filled(shape) = snap.board.get(x, y) {
                if fx.lock_flash_cells.contains(&(x, y)) {
                    plot(&mut grid, x as i32, y as i32, '▓', flash);
                } else {
                    plot(&mut grid, x as i32, y as i32, '█', shape_style(shape));
                }
            }
        }
    }

    // The falling piece is hidden while paused.
    if snap.phase == Phase::Running {
        if let Some(ghost) = &snap.ghost {
            for (x, y) in ghost.cells() {
                plot(&mut grid, x, y, '·', wall);
            }
        }
        if let Some(current) = snap.current {
            let style = shape_style(current.shape);
            for (x, y) in current.cells() {
                plot(&mut grid, x, y, '█', style);
            }
        }
    }

    // Line clear flash overrides everything in the row.
    for &row in &fx.clear_flash_rows {
        for x in 0..snap.board.width {
            plot(&mut grid, x as i32, row as i32, '█', flash);
        }
    }

    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(ch, style)| Span::styled(ch.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), play_rect);

    let overlay = match snap.phase {
        Phase::Idle => Some(vec!["BLOCKFALL".to_string(), "Enter to start".to_string()]),
        Phase::Paused => Some(vec!["PAUSED".to_string(), "p to resume".to_string()]),
        Phase::GameOver => {
            let mut text = vec!["GAME OVER".to_string(), format!("score {}", snap.score)];
            if snap.new_record {
                text.push("NEW RECORD!".to_string());
            }
            text.push("Enter to play".to_string());
            Some(text)
        }
        Phase::Running => None,
    };
    if let Some(text) = overlay {
        draw_overlay(frame, play_rect, text);
    }
}

fn draw_overlay(frame: &mut Frame, play_rect: Rect, text: Vec<String>) {
    let overlay_w = (PLAY_W as u16).saturating_sub(4).max(8);
    let overlay_h = text.len() as u16 + 2;
    let popup = Rect {
        x: play_rect.x + (play_rect.width.saturating_sub(overlay_w)) / 2,
        y: play_rect.y + (play_rect.height.saturating_sub(overlay_h)) / 2,
        width: overlay_w,
        height: overlay_h,
    };
    let lines: Vec<Line> = text.into_iter().map(Line::raw).collect();
    let overlay = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(overlay, popup);
}

fn draw_buttons(frame: &mut Frame, buttons: &[(Rect, Command)]) {
    for ((rect, _), (label, _)) in buttons.iter().zip(TOUCH_BUTTONS.iter()) {
        let button = Paragraph::new(*label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
        frame.render_widget(button, *rect);
    }
}

fn draw_info(frame: &mut Frame, snap: &Snapshot, area: Rect) {
    let status = match snap.phase {
        Phase::Idle => "IDLE",
        Phase::Running => "PLAYING",
        Phase::Paused => "PAUSED",
        Phase::GameOver => "OVER",
    };

    let info = Paragraph::new(vec![
        Line::raw(format!("{:<7} {}", "SCORE:", snap.score)),
        Line::raw(format!("{:<7} {}", "LEVEL:", snap.level)),
        Line::raw(format!("{:<7} {}", "LINES:", snap.lines)),
        Line::raw(format!("{:<7} {}", "BEST:", snap.best)),
        Line::raw(""),
        Line::raw(format!("{:<7} {}", "STATUS:", status)),
    ])
    .block(Block::default().title("INFO").borders(Borders::ALL));
    frame.render_widget(info, area);
}

fn draw_next(frame: &mut Frame, next: Option<&Piece>, area: Rect) {
    let block = Block::default().title("NEXT").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(piece) = next else {
        return;
    };
    let size = piece.matrix.len();
    let mut rows = vec![vec![' '; size * CELL_W]; size];
    for (c, r) in matrix_cells(&piece.matrix) {
        let gx = c as usize * CELL_W;
        rows[r as usize][gx] = '█';
        rows[r as usize][gx + 1] = '█';
    }
    let style = shape_style(piece.shape);
    let lines: Vec<Line> = rows
        .iter()
        // skip blank rows so the preview hugs the top
        .filter(|row| row.iter().any(|ch| *ch != ' '))
        .map(|row| Line::styled(row.iter().collect::<String>(), style))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_controls(frame: &mut Frame, notice: Option<&str>, area: Rect) {
    let mut lines = vec![
        Line::raw("←/→ move"),
        Line::raw("↑ rotate"),
        Line::raw("↓ soft drop"),
        Line::raw("space slam"),
        Line::raw("p/esc pause"),
        Line::raw("enter start"),
        Line::raw("r restart  m menu"),
        Line::raw("q quit"),
    ];
    if let Some(notice) = notice {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let controls = Paragraph::new(lines)
        .block(Block::default().title("CONTROLS").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::Game;
    use crate::audio::Silent;
    use crate::game::SequenceSource;
    use crate::store::MemoryStore;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn game() -> Game {
        Game::new(
            Box::new(SequenceSource::new(vec![Shape::T])),
            Box::new(Silent),
            Box::new(MemoryStore::with_best(4321)),
        )
    }

    #[test]
    fn idle_screen_invites_a_start() {
        let mut terminal =
            Terminal::new(TestBackend::new(MIN_PANE_WIDTH + 4, MIN_PANE_HEIGHT + 2))
                .expect("terminal");
        let game = game();
        terminal
            .draw(|frame| draw_game(frame, &game.snapshot()))
            .expect("draw");
        let text = buffer_text(&terminal);
        assert!(text.contains("Enter to start"));
        assert!(text.contains("4321"));
    }

    #[test]
    fn paused_screen_says_so() {
        let mut terminal =
            Terminal::new(TestBackend::new(MIN_PANE_WIDTH + 4, MIN_PANE_HEIGHT + 2))
                .expect("terminal");
        let mut game = game();
        game.start();
        game.pause();
        terminal
            .draw(|frame| draw_game(frame, &game.snapshot()))
            .expect("draw");
        assert!(buffer_text(&terminal).contains("PAUSED"));
    }

    #[test]
    fn tiny_pane_asks_for_resize() {
        let mut terminal = Terminal::new(TestBackend::new(30, 10)).expect("terminal");
        let game = game();
        terminal
            .draw(|frame| draw_game(frame, &game.snapshot()))
            .expect("draw");
        assert!(buffer_text(&terminal).contains("RESIZE"));
    }
}

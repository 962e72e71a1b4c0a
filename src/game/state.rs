use log::{debug, info, warn};

use crate::audio::{AudioSink, SoundEvent};
use crate::config::HARD_DROP_COOLDOWN_MS;
use crate::game::effects::Effects;
use crate::game::scoring::{drop_interval_ms, level_for_lines, line_points};
use crate::game::{Board, Piece, PieceSource};
use crate::store::ScoreStore;
use crate::{BOARD_H, BOARD_W};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Read-only view handed to the renderer once per frame.
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub current: Option<&'a Piece>,
    pub ghost: Option<Piece>,
    pub next: Option<&'a Piece>,
    pub score: u64,
    pub level: u64,
    pub lines: u64,
    pub best: u64,
    pub phase: Phase,
    pub new_record: bool,
    pub notice: Option<&'a str>,
    pub effects: &'a Effects,
}

pub struct Game {
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    phase: Phase,
    score: u64,
    level: u64,
    lines_cleared: u64,
    best: u64,
    new_record: bool,
    drop_interval_ms: u64,
    drop_acc_ms: u64,
    hard_drop_cooldown_ms: u64,
    effects: Effects,
    notice: Option<String>,
    source: Box<dyn PieceSource>,
    audio: Box<dyn AudioSink>,
    store: Box<dyn ScoreStore>,
}

impl Game {
    pub fn new(
        source: Box<dyn PieceSource>,
        audio: Box<dyn AudioSink>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let mut notice = None;
        let best = match store.load_best() {
            Ok(best) => best,
            Err(e) => {
                warn!("could not load best score: {e}");
                notice = Some(format!("best score unavailable: {e}"));
                0
            }
        };
        Self {
            board: Board::new(BOARD_W, BOARD_H),
            current: None,
            next: None,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            lines_cleared: 0,
            best,
            new_record: false,
            drop_interval_ms: drop_interval_ms(1),
            drop_acc_ms: 0,
            hard_drop_cooldown_ms: 0,
            effects: Effects::default(),
            notice,
            source,
            audio,
            store,
        }
    }

    /// Begins a run. While paused this resumes instead; while running it restarts.
    pub fn start(&mut self) {
        if self.phase == Phase::Paused {
            self.resume();
            return;
        }
        self.restart();
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.new_record = false;
        self.drop_interval_ms = drop_interval_ms(1);
        self.drop_acc_ms = 0;
        self.hard_drop_cooldown_ms = 0;
        self.effects.clear();
        self.notice = None;
        let current = self.draw_piece();
        self.next = Some(self.draw_piece());
        self.current = Some(current);
        self.phase = Phase::Running;
        info!("run started (best {})", self.best);
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            info!("paused");
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
            info!("resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Idle | Phase::GameOver => {}
        }
    }

    /// Abandons whatever is on the board and returns to the menu.
    pub fn back_to_menu(&mut self) {
        if self.phase != Phase::Idle {
            info!("back to menu (score {} abandoned)", self.score);
        }
        self.dispose();
    }

    pub fn dispose(&mut self) {
        self.board.reset();
        self.current = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.new_record = false;
        self.drop_interval_ms = drop_interval_ms(1);
        self.drop_acc_ms = 0;
        self.hard_drop_cooldown_ms = 0;
        self.effects.clear();
        self.phase = Phase::Idle;
    }

    /// Advances time. Gravity only accumulates while running; a descent happens once
    /// the accumulator passes the interval, at most one per call.
    pub fn tick(&mut self, delta_ms: u64) {
        self.effects.advance(delta_ms);
        self.hard_drop_cooldown_ms = self.hard_drop_cooldown_ms.saturating_sub(delta_ms);
        if self.phase != Phase::Running {
            return;
        }
        self.drop_acc_ms = self.drop_acc_ms.saturating_add(delta_ms);
        if self.drop_acc_ms > self.drop_interval_ms {
            self.drop_acc_ms = 0;
            self.step_down();
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.move_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.move_horizontal(1)
    }

    pub fn move_horizontal(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let moved = self.try_replace(|p| p.shifted(dx, 0));
        if moved {
            self.audio.play(SoundEvent::Move);
        }
        moved
    }

    /// Rotates clockwise in place. No wall kicks: a rotation that would collide is dropped.
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let rotated = self.try_replace(Piece::rotated);
        if rotated {
            self.audio.play(SoundEvent::Rotate);
        }
        rotated
    }

    /// One row down; locks the piece if it cannot descend. Returns true if it moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.step_down()
    }

    /// Drops straight to the floor and locks. Ignored while the cooldown runs.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Running || self.hard_drop_cooldown_ms > 0 {
            return false;
        }
        self.hard_drop_cooldown_ms = HARD_DROP_COOLDOWN_MS;
        while self.try_replace(|p| p.shifted(0, 1)) {}
        self.lock_current();
        true
    }

    /// Lowest position the current piece could fall to.
    pub fn ghost(&self) -> Option<Piece> {
        let mut ghost = self.current.clone()?;
        while !self.board.collides(&ghost.matrix, ghost.x, ghost.y + 1) {
            ghost.y += 1;
        }
        Some(ghost)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let live = matches!(self.phase, Phase::Running | Phase::Paused);
        Snapshot {
            board: &self.board,
            current: self.current.as_ref(),
            ghost: if live { self.ghost() } else { None },
            next: self.next.as_ref(),
            score: self.score,
            level: self.level,
            lines: self.lines_cleared,
            best: self.best,
            phase: self.phase,
            new_record: self.new_record,
            notice: self.notice.as_deref(),
            effects: &self.effects,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn drop_interval_ms(&self) -> u64 {
        self.drop_interval_ms
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn draw_piece(&mut self) -> Piece {
        Piece::spawn(self.source.next_shape(), self.board.width)
    }

    /// Swaps in `f(current)` if it fits on the board.
    fn try_replace(&mut self, f: impl FnOnce(&Piece) -> Piece) -> bool {
        let Some(current) = self.current.as_ref() else {
            return false;
        };
        let candidate = f(current);
        if self.board.collides(&candidate.matrix, candidate.x, candidate.y) {
            return false;
        }
        self.current = Some(candidate);
        true
    }

    fn step_down(&mut self) -> bool {
        if self.try_replace(|p| p.shifted(0, 1)) {
            return true;
        }
        self.lock_current();
        false
    }

    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };
        let written = self.board.lock(&piece);
        self.effects.note_lock(written);
        self.audio.play(SoundEvent::Lock);
        debug!("locked {:?} at ({}, {})", piece.shape, piece.x, piece.y);

        let full = self.board.full_rows();
        let cleared = self.board.clear_full_rows();
        if cleared > 0 {
            self.effects.note_clear(full);
            self.audio.play(SoundEvent::LineClear);
            self.score += line_points(cleared, self.level);
            self.lines_cleared += cleared as u64;
            let level = level_for_lines(self.lines_cleared);
            if level != self.level {
                info!("level {level}");
            }
            self.level = level;
            self.drop_interval_ms = drop_interval_ms(level);
            debug!("cleared {cleared} rows, score {}", self.score);
        }

        let promoted = match self.next.take() {
            Some(next) => next,
            None => self.draw_piece(),
        };
        self.next = Some(self.draw_piece());
        let blocked = self.board.collides(&promoted.matrix, promoted.x, promoted.y);
        self.current = Some(promoted);
        if blocked {
            self.finish_run();
        }
    }

    fn finish_run(&mut self) {
        self.phase = Phase::GameOver;
        self.audio.play(SoundEvent::GameOver);
        info!(
            "game over: score {} level {} lines {}",
            self.score, self.level, self.lines_cleared
        );
        if self.score > self.best {
            self.best = self.score;
            self.new_record = true;
            if let Err(e) = self.store.save_best(self.best) {
                warn!("could not save best score: {e}");
                self.notice = Some(format!("best score not saved: {e}"));
            }
        }
    }
}

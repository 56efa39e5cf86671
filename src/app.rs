//! Interactive puzzle session: event loop, input translation, animation
//! queue, and move-history bookkeeping.

use std::collections::VecDeque;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use rand::rngs::ThreadRng;
use ratatui::layout::{Position, Rect};
use ratatui::DefaultTerminal;

use crate::config::Config;
use crate::puzzle::{invert_sequence, Board, Move};
use crate::ui::{self, Theme};

/// Why a queued slide is being played; decides its pacing and which history
/// it lands in once applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayKind {
    Player,
    Shuffle,
    Reset,
    Solve,
}

/// A tile mid-slide. `mv` is the blank's travel direction, so the tile at
/// the blank's target cell is gliding the opposite way. The board mutates
/// only once the animation completes.
#[derive(Clone, Copy, Debug)]
pub struct SlideAnimation {
    pub mv: Move,
    pub kind: ReplayKind,
    pub frame: u16,
    pub total: u16,
}

/// Screen rectangles captured during the last draw, for mouse hit-testing.
#[derive(Clone, Copy, Debug, Default)]
pub struct HitAreas {
    pub board: Rect,
    pub tile_w: u16,
    pub tile_h: u16,
    pub reset: Rect,
    pub new: Rect,
    pub solve: Rect,
}

pub struct App {
    pub(crate) config: Config,
    pub(crate) board: Board,
    /// The shuffle walk that produced the current scramble.
    pub(crate) solution_seq: Vec<Move>,
    /// Player moves since the last shuffle or replay.
    pub(crate) all_moves: Vec<Move>,
    pub(crate) pending: VecDeque<(Move, ReplayKind)>,
    pub(crate) animation: Option<SlideAnimation>,
    pub(crate) theme: Theme,
    pub(crate) hit: HitAreas,
    exit: bool,
    rng: ThreadRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            config,
            board: Board::solved(config.size),
            solution_seq: Vec::new(),
            all_moves: Vec::new(),
            pending: VecDeque::new(),
            animation: None,
            theme: Theme::default(),
            hit: HitAreas::default(),
            exit: false,
            rng: rand::thread_rng(),
        };
        app.start_new_puzzle();
        app
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        while !self.exit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = self.config.frame.saturating_sub(last_frame.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
                    Event::Mouse(mouse) => self.on_mouse(mouse),
                    _ => {}
                }
            }

            if last_frame.elapsed() >= self.config.frame {
                self.tick();
                last_frame = Instant::now();
            }
        }

        Ok(())
    }

    /// Status banner for the current frame, if any.
    pub fn status(&self) -> Option<&'static str> {
        match self.active_kind() {
            Some(ReplayKind::Shuffle) => Some("Shuffling..."),
            Some(ReplayKind::Reset) => Some("Resetting..."),
            Some(ReplayKind::Solve) => Some("Solving..."),
            _ => {
                if self.board.is_solved() {
                    Some("Solved!")
                } else {
                    None
                }
            }
        }
    }

    fn active_kind(&self) -> Option<ReplayKind> {
        self.animation
            .map(|anim| anim.kind)
            .or_else(|| self.pending.front().map(|&(_, kind)| kind))
    }

    /// A slide is animating or queued. Direction input and the control
    /// buttons are ignored until the queue drains, so replays are modal.
    pub fn busy(&self) -> bool {
        self.animation.is_some() || !self.pending.is_empty()
    }

    fn on_key(&mut self, key: KeyEvent) {
        if let Some(mv) = key_move(key.code) {
            self.try_slide(mv);
            return;
        }
        match key.code {
            KeyCode::Char('n') | KeyCode::Char('r') => self.start_new_puzzle(),
            KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.hit.reset.contains(pos) {
            self.start_reset();
        } else if self.hit.new.contains(pos) {
            self.start_new_puzzle();
        } else if self.hit.solve.contains(pos) {
            self.start_solve();
        } else if let Some(spot) = self.spot_clicked(mouse.column, mouse.row) {
            if let Some(mv) = click_to_move(self.board.blank(), spot) {
                self.try_slide(mv);
            }
        }
    }

    /// Map a screen position to board (col, row) using the rectangles from
    /// the last draw.
    fn spot_clicked(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let hit = self.hit;
        if hit.tile_w == 0 || hit.tile_h == 0 || !hit.board.contains(Position::new(column, row)) {
            return None;
        }
        let x = ((column - hit.board.x) / hit.tile_w) as usize;
        let y = ((row - hit.board.y) / hit.tile_h) as usize;
        if x < self.board.size() && y < self.board.size() {
            Some((x, y))
        } else {
            None
        }
    }

    /// Queue a player slide if legal and nothing else is in flight.
    fn try_slide(&mut self, mv: Move) {
        if self.busy() || !self.board.can_slide(mv) {
            return;
        }
        tracing::debug!(direction = %mv, "player slide");
        self.pending.push_back((mv, ReplayKind::Player));
    }

    /// Scramble a fresh board and play the walk onto the screen. The walk
    /// accumulates into `solution_seq` as each slide lands.
    pub(crate) fn start_new_puzzle(&mut self) {
        if self.busy() {
            return;
        }
        let (_, walk) = Board::scrambled(self.config.size, self.config.shuffle_moves, &mut self.rng);
        tracing::info!(size = self.config.size, moves = walk.len(), "new puzzle");

        self.board = Board::solved(self.config.size);
        self.solution_seq.clear();
        self.all_moves.clear();
        self.pending.clear();
        self.animation = None;
        self.pending
            .extend(walk.into_iter().map(|mv| (mv, ReplayKind::Shuffle)));
    }

    /// Undo the player's moves with an animated replay, back to the
    /// post-shuffle board.
    pub(crate) fn start_reset(&mut self) {
        if self.busy() {
            return;
        }
        tracing::info!(moves = self.all_moves.len(), "reset");
        let replay = invert_sequence(&self.all_moves);
        self.all_moves.clear();
        self.pending
            .extend(replay.into_iter().map(|mv| (mv, ReplayKind::Reset)));
    }

    /// Walk the board back to solved by replaying the inversion of
    /// everything that has happened since: the shuffle walk plus the
    /// player's moves. Both histories clear; there is nothing left to undo.
    pub(crate) fn start_solve(&mut self) {
        if self.busy() {
            return;
        }
        tracing::info!(
            shuffle = self.solution_seq.len(),
            moves = self.all_moves.len(),
            "solve"
        );
        let mut walked = std::mem::take(&mut self.solution_seq);
        walked.append(&mut self.all_moves);
        self.pending.extend(
            invert_sequence(&walked)
                .into_iter()
                .map(|mv| (mv, ReplayKind::Solve)),
        );
    }

    /// Advance the animation one frame; apply the slide when it completes
    /// and pull the next queued slide into flight.
    pub(crate) fn tick(&mut self) {
        let finished = match &mut self.animation {
            Some(anim) => {
                anim.frame += 1;
                anim.frame >= anim.total
            }
            None => false,
        };
        if finished {
            if let Some(anim) = self.animation.take() {
                self.finish_slide(anim.mv, anim.kind);
            }
        }

        if self.animation.is_none() {
            if let Some((mv, kind)) = self.pending.pop_front() {
                self.animation = Some(SlideAnimation {
                    mv,
                    kind,
                    frame: 0,
                    total: self.frames_for(kind).max(1),
                });
            }
        }
    }

    fn finish_slide(&mut self, mv: Move, kind: ReplayKind) {
        if self.board.slide(mv).is_err() {
            tracing::warn!(direction = %mv, "queued slide hit the edge, dropping");
            return;
        }
        match kind {
            ReplayKind::Player => {
                self.all_moves.push(mv);
                if self.board.is_solved() {
                    tracing::info!(moves = self.all_moves.len(), "puzzle solved");
                }
            }
            ReplayKind::Shuffle => self.solution_seq.push(mv),
            ReplayKind::Reset | ReplayKind::Solve => {}
        }
    }

    fn frames_for(&self, kind: ReplayKind) -> u16 {
        match kind {
            ReplayKind::Player => self.config.player_frames,
            ReplayKind::Shuffle => self.config.shuffle_frames,
            ReplayKind::Reset | ReplayKind::Solve => self.config.replay_frames,
        }
    }
}

/// Keyboard mapping. Arrows and WASD name the direction a *tile* slides,
/// so the blank travels the opposite way.
fn key_move(code: KeyCode) -> Option<Move> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Move::Right),
        KeyCode::Right | KeyCode::Char('d') => Some(Move::Left),
        KeyCode::Up | KeyCode::Char('w') => Some(Move::Down),
        KeyCode::Down | KeyCode::Char('s') => Some(Move::Up),
        _ => None,
    }
}

/// A clicked tile slides only if it is orthogonally adjacent to the blank;
/// the resulting move is the blank's travel toward the clicked cell.
fn click_to_move(blank: (usize, usize), spot: (usize, usize)) -> Option<Move> {
    let dx = spot.0 as isize - blank.0 as isize;
    let dy = spot.1 as isize - blank.1 as isize;
    match (dx, dy) {
        (1, 0) => Some(Move::Right),
        (-1, 0) => Some(Move::Left),
        (0, 1) => Some(Move::Down),
        (0, -1) => Some(Move::Up),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drained(app: &mut App) -> &mut App {
        while app.busy() {
            app.tick();
        }
        app
    }

    fn test_app() -> App {
        let config = Config {
            shuffle_moves: 30,
            ..Config::default()
        };
        let mut app = App::new(config);
        drained(&mut app);
        app
    }

    #[test]
    fn shuffle_walk_lands_in_solution_seq() {
        let app = test_app();
        assert_eq!(app.solution_seq.len(), 30);
        assert!(app.all_moves.is_empty());

        // Replaying the recorded walk from solved reproduces the board.
        let mut replay = Board::solved(app.config.size);
        for &mv in &app.solution_seq {
            replay.slide(mv).unwrap();
        }
        assert_eq!(replay, app.board);
    }

    #[test]
    fn player_slides_are_recorded_after_animation() {
        let mut app = test_app();
        let mv = Move::ALL
            .into_iter()
            .find(|&mv| app.board.can_slide(mv))
            .unwrap();

        app.try_slide(mv);
        assert!(app.busy());
        assert!(app.all_moves.is_empty());

        drained(&mut app);
        assert_eq!(app.all_moves, vec![mv]);
    }

    #[test]
    fn input_is_ignored_while_replaying() {
        let mut app = test_app();
        app.start_solve();
        let queued = app.pending.len();

        app.try_slide(Move::Up);
        app.start_reset();
        assert_eq!(app.pending.len(), queued);
    }

    #[test]
    fn reset_returns_to_post_shuffle_board() {
        let mut app = test_app();
        let scrambled = app.board.clone();

        for _ in 0..5 {
            let mv = Move::ALL
                .into_iter()
                .find(|&mv| app.board.can_slide(mv))
                .unwrap();
            app.try_slide(mv);
            drained(&mut app);
        }
        assert_eq!(app.all_moves.len(), 5);

        app.start_reset();
        drained(&mut app);
        assert_eq!(app.board, scrambled);
        assert!(app.all_moves.is_empty());
        // The shuffle walk survives a reset, so Solve still works.
        assert_eq!(app.solution_seq.len(), 30);
    }

    #[test]
    fn solve_replays_back_to_solved_and_clears_history() {
        let mut app = test_app();
        let mv = Move::ALL
            .into_iter()
            .find(|&mv| app.board.can_slide(mv))
            .unwrap();
        app.try_slide(mv);
        drained(&mut app);

        app.start_solve();
        drained(&mut app);
        assert!(app.board.is_solved());
        assert!(app.solution_seq.is_empty());
        assert!(app.all_moves.is_empty());
        assert_eq!(app.status(), Some("Solved!"));
    }

    #[test]
    fn keys_name_the_tile_direction() {
        assert_eq!(key_move(KeyCode::Left), Some(Move::Right));
        assert_eq!(key_move(KeyCode::Right), Some(Move::Left));
        assert_eq!(key_move(KeyCode::Up), Some(Move::Down));
        assert_eq!(key_move(KeyCode::Down), Some(Move::Up));
        assert_eq!(key_move(KeyCode::Char('a')), Some(Move::Right));
        assert_eq!(key_move(KeyCode::Char('x')), None);
    }

    #[test]
    fn clicks_map_to_blank_travel() {
        let blank = (1, 1);
        assert_eq!(click_to_move(blank, (2, 1)), Some(Move::Right));
        assert_eq!(click_to_move(blank, (0, 1)), Some(Move::Left));
        assert_eq!(click_to_move(blank, (1, 2)), Some(Move::Down));
        assert_eq!(click_to_move(blank, (1, 0)), Some(Move::Up));
        // Diagonal or distant cells are not slidable.
        assert_eq!(click_to_move(blank, (2, 2)), None);
        assert_eq!(click_to_move(blank, (1, 1)), None);
        assert_eq!(click_to_move(blank, (3, 1)), None);
    }
}

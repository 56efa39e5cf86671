//! Puzzle state engine: board, moves, shuffle walks, solved detection.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

/// A slide, named after the direction the blank travels. The tile it swaps
/// with glides the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Offset the blank travels, in (col, row) with rows growing downward.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Move::Up => (0, -1),
            Move::Down => (0, 1),
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SlideError {
    #[error("blank cannot travel {0}: already at that edge")]
    Blocked(Move),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("grid is not square")]
    NotSquare,

    #[error("expected exactly one blank cell, found {0}")]
    BlankCount(usize),

    #[error("tile {0} is out of range for this board")]
    BadTile(u8),

    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

/// N×N grid of tiles `1..N²-1` plus one blank, stored row-major with 0 as
/// the blank. The blank's (col, row) position is cached and kept in sync by
/// every mutation. Tile ids are `u8`, which holds up to N = 15.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Vec<u8>>,
    blank: (usize, usize),
}

impl Board {
    /// The canonical solved configuration: `1, 2, ...` filled row by row,
    /// blank in the bottom-right corner.
    pub fn solved(size: usize) -> Self {
        let mut cells = Vec::with_capacity(size);
        let mut value = 1u8;

        for y in 0..size {
            let mut row = Vec::with_capacity(size);
            for x in 0..size {
                if y == size - 1 && x == size - 1 {
                    row.push(0); // the blank is represented by 0
                } else {
                    row.push(value);
                    value += 1;
                }
            }
            cells.push(row);
        }

        Self {
            size,
            cells,
            blank: (size - 1, size - 1),
        }
    }

    /// Build a board from raw rows, validating the permutation invariant:
    /// square grid, exactly one blank, each tile id `1..N²-1` exactly once.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(BoardError::NotSquare);
        }

        let mut blanks = 0;
        let mut blank = (0, 0);
        let mut seen = vec![false; size * size];
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    blanks += 1;
                    blank = (x, y);
                    continue;
                }
                let id = cell as usize;
                if id >= size * size {
                    return Err(BoardError::BadTile(cell));
                }
                if seen[id] {
                    return Err(BoardError::DuplicateTile(cell));
                }
                seen[id] = true;
            }
        }
        if blanks != 1 {
            return Err(BoardError::BlankCount(blanks));
        }

        Ok(Self {
            size,
            cells: rows,
            blank,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Current (col, row) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        self.blank
    }

    /// Tile at (col, row), or `None` for the blank.
    pub fn tile(&self, x: usize, y: usize) -> Option<u8> {
        match self.cells[y][x] {
            0 => None,
            tile => Some(tile),
        }
    }

    fn slide_target(&self, mv: Move) -> Option<(usize, usize)> {
        let (dx, dy) = mv.delta();
        let x = self.blank.0 as isize + dx;
        let y = self.blank.1 as isize + dy;

        if x >= 0 && x < self.size as isize && y >= 0 && y < self.size as isize {
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// A slide is legal iff the blank has a neighbor in that direction.
    pub fn can_slide(&self, mv: Move) -> bool {
        self.slide_target(mv).is_some()
    }

    /// Swap the blank with its neighbor in the move's direction. Exactly two
    /// cells change; callers are expected to guard with [`can_slide`].
    ///
    /// [`can_slide`]: Board::can_slide
    pub fn slide(&mut self, mv: Move) -> Result<(), SlideError> {
        let (x, y) = self.slide_target(mv).ok_or(SlideError::Blocked(mv))?;
        let (bx, by) = self.blank;

        self.cells[by][bx] = self.cells[y][x];
        self.cells[y][x] = 0;
        self.blank = (x, y);
        Ok(())
    }

    /// Uniform pick among the legal moves, excluding the direct reverse of
    /// `last` so a walk never immediately undoes itself. `None` only when no
    /// candidate survives, which cannot happen for N >= 2.
    pub fn random_move<R: Rng + ?Sized>(&self, rng: &mut R, last: Option<Move>) -> Option<Move> {
        let banned = last.map(Move::opposite);
        let candidates: Vec<Move> = Move::ALL
            .iter()
            .copied()
            .filter(|&mv| Some(mv) != banned && self.can_slide(mv))
            .collect();

        candidates.choose(rng).copied()
    }

    /// Scramble a solved board with a random non-backtracking walk of
    /// `num_moves` slides, returning the board and the exact walk taken.
    /// Iterations that yield no move are skipped, not retried.
    pub fn scrambled<R: Rng + ?Sized>(
        size: usize,
        num_moves: usize,
        rng: &mut R,
    ) -> (Self, Vec<Move>) {
        let mut board = Self::solved(size);
        let mut walk = Vec::with_capacity(num_moves);
        let mut last = None;

        for _ in 0..num_moves {
            let Some(mv) = board.random_move(rng, last) else {
                continue;
            };
            if board.slide(mv).is_ok() {
                walk.push(mv);
                last = Some(mv);
            }
        }

        (board, walk)
    }

    /// Cell-by-cell comparison against the canonical solved configuration.
    pub fn is_solved(&self) -> bool {
        *self == Self::solved(self.size)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board({}x{})", self.size, self.size)?;
        fmt::Display::fmt(self, f)
    }
}

/// Reverse the order and flip each move. Applying `seq` and then
/// `invert_sequence(seq)` restores the starting board exactly; this is the
/// only return-to-solved mechanism, no solver is involved.
pub fn invert_sequence(seq: &[Move]) -> Vec<Move> {
    seq.iter().rev().map(|mv| mv.opposite()).collect()
}

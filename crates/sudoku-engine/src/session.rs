use crate::board::Board;
use crate::error::SudokuError;
use crate::point::Point;
use crate::puzzle::Carved;

/// One user-visible board mutation, recorded for undo. The move's
/// sequence number is its position in the session history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub point: Point,
    pub previous: u8,
    pub value: u8,
}

/// How the front end currently interprets digit keys. Purely
/// UI-facing; the engine only stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Navigate,
    Edit,
}

/// One play-through of one puzzle: the board, the given mask, the
/// undo history, and the cursor the front end steers.
pub struct Session {
    board: Board,
    givens: [bool; 81],
    history: Vec<Move>,
    cursor: Point,
    mode: InputMode,
}

impl Session {
    pub fn new(carved: Carved) -> Self {
        Self {
            board: carved.board,
            givens: carved.givens,
            history: Vec::new(),
            cursor: Point::new(4, 4),
            mode: InputMode::Navigate,
        }
    }

    /// Rebuild a session from loaded state, with a fresh history.
    pub(crate) fn from_parts(board: Board, givens: [bool; 81]) -> Self {
        Self {
            board,
            givens,
            history: Vec::new(),
            cursor: Point::new(4, 4),
            mode: InputMode::Navigate,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_given(&self, point: Point) -> bool {
        self.givens[point.index()]
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Move the cursor, wrapping at the edges.
    pub fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let row = (self.cursor.row as i32 + drow).rem_euclid(9) as usize;
        let col = (self.cursor.col as i32 + dcol).rem_euclid(9) as usize;
        self.cursor = Point::new(row, col);
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Write `value` at `point` (0 erases), recording the move.
    /// Returns the previous value so the caller can show what changed.
    pub fn set_value(&mut self, point: Point, value: u8) -> Result<u8, SudokuError> {
        if self.is_given(point) {
            return Err(SudokuError::ReadOnlyCell(point));
        }
        let previous = self.board.get(point);
        self.board.try_write(point, value)?;
        if previous != value {
            self.history.push(Move {
                point,
                previous,
                value,
            });
        }
        Ok(previous)
    }

    /// Cursor-relative write.
    pub fn set_cursor_value(&mut self, value: u8) -> Result<u8, SudokuError> {
        self.set_value(self.cursor, value)
    }

    pub fn erase(&mut self, point: Point) -> Result<u8, SudokuError> {
        self.set_value(point, 0)
    }

    /// Take back the most recent move. Restores a formerly legal
    /// state, so the underlying write cannot be rejected.
    pub fn undo(&mut self) -> Result<Move, SudokuError> {
        let mv = self.history.pop().ok_or(SudokuError::EmptyHistory)?;
        self.board.try_write(mv.point, mv.previous)?;
        Ok(mv)
    }

    pub fn moves_made(&self) -> usize {
        self.history.len()
    }

    /// Fullness is enough: legality holds for every reachable state.
    pub fn is_complete(&self) -> bool {
        self.board.is_full()
    }

    /// Read-only view for rendering: (point, value, is_given).
    pub fn cells(&self) -> impl Iterator<Item = (Point, u8, bool)> + '_ {
        self.board.iter().map(|(p, v)| (p, v, self.is_given(p)))
    }
}

pub mod block;
pub mod board;
pub mod error;
pub mod point;
pub mod puzzle;
pub mod save;
pub mod session;
pub mod solver;

pub use block::{Block, UnitKind};
pub use board::Board;
pub use error::SudokuError;
pub use point::Point;
pub use puzzle::{Carved, Difficulty, MAX_REMOVALS, MIN_GIVENS};
pub use session::{InputMode, Move, Session};

use thiserror::Error;

use crate::block::UnitKind;
use crate::point::Point;

#[derive(Debug, Error)]
pub enum SudokuError {
    #[error("value {value} already used in this {unit}")]
    ConstraintViolation { unit: UnitKind, value: u8 },
    #[error("cell value out of range: {0} (expected 0-9)")]
    ValueOutOfRange(u8),
    #[error("cell r{}c{} is a given and cannot be edited", .0.row + 1, .0.col + 1)]
    ReadOnlyCell(Point),
    #[error("nothing to undo")]
    EmptyHistory,
    #[error("corrupt save data: {0}")]
    CorruptData(String),
    #[error("asked to remove {requested} cells, but at most {max} can go")]
    CapacityExceeded { requested: usize, max: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

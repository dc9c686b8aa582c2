use crate::block::{Block, UnitKind};
use crate::error::SudokuError;
use crate::point::Point;

/// The 81-cell grid plus its 27 constraint units.
///
/// Every cell belongs to exactly one row block, one column block, and
/// one box block. `try_write` is the only mutating entry point besides
/// `clear`, and both keep the block masks in lockstep with the cells,
/// so no unit ever holds a duplicate nonzero value.
#[derive(Clone, Debug)]
pub struct Board {
    cells: [u8; 81],
    rows: [Block; 9],
    cols: [Block; 9],
    boxes: [Block; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [0; 81],
            rows: [Block::new(UnitKind::Row); 9],
            cols: [Block::new(UnitKind::Column); 9],
            boxes: [Block::new(UnitKind::Box); 9],
        }
    }

    /// Current value at `point`, 0 if empty.
    pub fn get(&self, point: Point) -> u8 {
        self.cells[point.index()]
    }

    /// Write `value` (0 clears) at `point`, all-or-nothing.
    ///
    /// A nonzero write is checked against the row, column, and box
    /// units *before* any state changes, so a rejected write leaves
    /// the board exactly as it was. An occupied cell is logically
    /// cleared first; writing the value a cell already holds is a
    /// no-op.
    pub fn try_write(&mut self, point: Point, value: u8) -> Result<(), SudokuError> {
        if value > 9 {
            return Err(SudokuError::ValueOutOfRange(value));
        }

        let old = self.cells[point.index()];
        if old == value {
            return Ok(());
        }

        if value != 0 {
            // old != value, so removing old cannot free up `value`;
            // checking freedom up front is equivalent to the
            // clear-then-place transaction.
            for (unit, free) in [
                (UnitKind::Row, self.rows[point.row].is_free(value)),
                (UnitKind::Column, self.cols[point.col].is_free(value)),
                (UnitKind::Box, self.boxes[point.box_index()].is_free(value)),
            ] {
                if !free {
                    return Err(SudokuError::ConstraintViolation { unit, value });
                }
            }
        }

        if old != 0 {
            self.remove_from_units(point, old);
        }
        if value != 0 {
            self.rows[point.row].place(value)?;
            self.cols[point.col].place(value)?;
            self.boxes[point.box_index()].place(value)?;
        }
        self.cells[point.index()] = value;

        debug_assert!(self.units_consistent());
        Ok(())
    }

    /// Clear the cell at `point`, returning the value it held.
    pub fn clear(&mut self, point: Point) -> u8 {
        let old = self.cells[point.index()];
        if old != 0 {
            self.remove_from_units(point, old);
            self.cells[point.index()] = 0;
        }
        old
    }

    fn remove_from_units(&mut self, point: Point, value: u8) {
        self.rows[point.row].remove(value);
        self.cols[point.col].remove(value);
        self.boxes[point.box_index()].remove(value);
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Recheck legality from the cell contents alone, without trusting
    /// the block masks. Always true for boards mutated only through
    /// `try_write`; exposed for validating externally sourced state.
    pub fn is_legal(&self) -> bool {
        let mut rows = [0u16; 9];
        let mut cols = [0u16; 9];
        let mut boxes = [0u16; 9];
        for point in Point::all() {
            let v = self.get(point);
            if v == 0 {
                continue;
            }
            let bit = 1u16 << (v - 1);
            for seen in [
                &mut rows[point.row],
                &mut cols[point.col],
                &mut boxes[point.box_index()],
            ] {
                if *seen & bit != 0 {
                    return false;
                }
                *seen |= bit;
            }
        }
        true
    }

    /// Values that `try_write` would accept at `point` right now.
    /// Empty for an occupied cell with no legal alternative only when
    /// every value is blocked; an occupied cell's own value is always
    /// a candidate (rewriting it is a no-op).
    pub fn candidates(&self, point: Point) -> Vec<u8> {
        let own = self.get(point);
        (1..=9)
            .filter(|&v| {
                v == own
                    || (self.rows[point.row].is_free(v)
                        && self.cols[point.col].is_free(v)
                        && self.boxes[point.box_index()].is_free(v))
            })
            .collect()
    }

    /// First empty cell in row-major order.
    pub fn first_empty(&self) -> Option<Point> {
        Point::all().find(|&p| self.get(p) == 0)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u8)> + '_ {
        Point::all().map(|p| (p, self.get(p)))
    }

    /// Invariant I3: each block's mask equals the set of nonzero
    /// values stored at its member cells.
    fn units_consistent(&self) -> bool {
        let mut rows = [0u16; 9];
        let mut cols = [0u16; 9];
        let mut boxes = [0u16; 9];
        for point in Point::all() {
            let v = self.get(point);
            if v != 0 {
                let bit = 1u16 << (v - 1);
                rows[point.row] |= bit;
                cols[point.col] |= bit;
                boxes[point.box_index()] |= bit;
            }
        }
        (0..9).all(|i| {
            self.rows[i].used_mask() == rows[i]
                && self.cols[i].used_mask() == cols[i]
                && self.boxes[i].used_mask() == boxes[i]
        })
    }
}

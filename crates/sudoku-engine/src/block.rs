use std::fmt;

use crate::error::SudokuError;

/// Which kind of constraint unit a block is. Carried in errors so the
/// UI can say "already used in this row" rather than just "illegal".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Row,
    Column,
    Box,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Row => write!(f, "row"),
            UnitKind::Column => write!(f, "column"),
            UnitKind::Box => write!(f, "box"),
        }
    }
}

/// Presence mask for one constraint unit (a row, a column, or a 3x3 box).
/// Bit v-1 is set iff value v is used by one of the unit's nine cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    kind: UnitKind,
    used: u16,
}

impl Block {
    pub fn new(kind: UnitKind) -> Self {
        Self { kind, used: 0 }
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    /// True iff `value` (1..=9) is not yet used in this unit.
    pub fn is_free(&self, value: u8) -> bool {
        debug_assert!((1..=9).contains(&value));
        self.used & bit(value) == 0
    }

    /// Mark `value` as used. Fails if the unit already contains it.
    pub fn place(&mut self, value: u8) -> Result<(), SudokuError> {
        if !self.is_free(value) {
            return Err(SudokuError::ConstraintViolation {
                unit: self.kind,
                value,
            });
        }
        self.used |= bit(value);
        Ok(())
    }

    /// Clear `value`. Removing a value that is not present means the
    /// block and the cells it tracks have diverged, which is a logic
    /// defect, not a recoverable condition.
    pub fn remove(&mut self, value: u8) {
        assert!(
            !self.is_free(value),
            "removing {value} from a {} that does not contain it",
            self.kind
        );
        self.used &= !bit(value);
    }

    pub fn used_mask(&self) -> u16 {
        self.used
    }
}

fn bit(value: u8) -> u16 {
    1 << (value - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let block = Block::new(UnitKind::Row);
        for v in 1..=9 {
            assert!(block.is_free(v));
        }
    }

    #[test]
    fn place_then_remove() {
        let mut block = Block::new(UnitKind::Column);
        block.place(5).unwrap();
        assert!(!block.is_free(5));
        assert!(block.is_free(4));
        block.remove(5);
        assert!(block.is_free(5));
    }

    #[test]
    fn duplicate_place_is_rejected() {
        let mut block = Block::new(UnitKind::Box);
        block.place(3).unwrap();
        let err = block.place(3).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::ConstraintViolation {
                unit: UnitKind::Box,
                value: 3
            }
        ));
        // The mask is unchanged by the failed place.
        assert_eq!(block.used_mask(), 1 << 2);
    }

    #[test]
    #[should_panic(expected = "does not contain it")]
    fn remove_of_absent_value_panics() {
        let mut block = Block::new(UnitKind::Row);
        block.remove(7);
    }

    #[test]
    fn full_block_rejects_everything() {
        let mut block = Block::new(UnitKind::Row);
        for v in 1..=9 {
            block.place(v).unwrap();
        }
        for v in 1..=9 {
            assert!(block.place(v).is_err());
        }
    }
}

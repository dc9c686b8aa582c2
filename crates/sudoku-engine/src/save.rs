use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::SudokuError;
use crate::point::Point;
use crate::session::Session;

/// On-disk layout: 81 cell values in row-major order, then the 81
/// given flags in the same order. Undo history is deliberately not
/// persisted; it resets on reload.
#[derive(Serialize, Deserialize)]
struct SaveGame {
    cells: Vec<u8>,
    givens: Vec<bool>,
}

/// Serialize the session's board and given mask to `writer`.
pub fn save<W: Write>(session: &Session, writer: W) -> Result<(), SudokuError> {
    let mut cells = Vec::with_capacity(81);
    let mut givens = Vec::with_capacity(81);
    for (_, value, is_given) in session.cells() {
        cells.push(value);
        givens.push(is_given);
    }
    let doc = SaveGame { cells, givens };
    serde_json::to_writer(writer, &doc).map_err(io::Error::from)?;
    Ok(())
}

/// Reconstruct a session from `reader`, re-validating every invariant.
///
/// Values are replayed through `Board::try_write`, so a duplicate
/// within any unit is caught the same way a bad interactive move is;
/// structural damage, out-of-range values, and a given flag on an
/// empty cell are all reported as `CorruptData`.
pub fn load<R: Read>(reader: R) -> Result<Session, SudokuError> {
    let doc: SaveGame =
        serde_json::from_reader(reader).map_err(|e| SudokuError::CorruptData(e.to_string()))?;
    if doc.cells.len() != 81 || doc.givens.len() != 81 {
        return Err(SudokuError::CorruptData(format!(
            "expected 81 cells and 81 flags, got {} and {}",
            doc.cells.len(),
            doc.givens.len()
        )));
    }

    let mut board = Board::new();
    let mut givens = [false; 81];
    for point in Point::all() {
        let i = point.index();
        let value = doc.cells[i];
        board.try_write(point, value).map_err(|e| {
            SudokuError::CorruptData(format!("cell r{}c{}: {e}", point.row + 1, point.col + 1))
        })?;
        if doc.givens[i] && value == 0 {
            return Err(SudokuError::CorruptData(format!(
                "cell r{}c{} is flagged as a given but empty",
                point.row + 1,
                point.col + 1
            )));
        }
        givens[i] = doc.givens[i];
    }

    Ok(Session::from_parts(board, givens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn sample_session(seed: u64) -> Session {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let solved = puzzle::generate_solved(&mut rng);
        let mut session = Session::new(puzzle::carve(&solved, 35, &mut rng).unwrap());
        // A couple of user moves so saved state differs from the puzzle.
        for p in Point::all() {
            if !session.is_given(p) {
                session.set_value(p, solved.get(p)).unwrap();
                break;
            }
        }
        session
    }

    #[test]
    fn round_trip_preserves_values_and_mask() {
        let session = sample_session(101);
        let mut buf = Vec::new();
        save(&session, &mut buf).unwrap();
        let restored = load(buf.as_slice()).unwrap();
        for (point, value, is_given) in session.cells() {
            assert_eq!(restored.board().get(point), value);
            assert_eq!(restored.is_given(point), is_given);
        }
    }

    #[test]
    fn loaded_session_has_a_fresh_history() {
        let session = sample_session(7);
        assert!(session.moves_made() > 0);
        let mut buf = Vec::new();
        save(&session, &mut buf).unwrap();
        let mut restored = load(buf.as_slice()).unwrap();
        assert_eq!(restored.moves_made(), 0);
        assert!(matches!(restored.undo(), Err(SudokuError::EmptyHistory)));
    }

    #[test]
    fn truncated_input_is_corrupt() {
        let session = sample_session(3);
        let mut buf = Vec::new();
        save(&session, &mut buf).unwrap();
        buf.truncate(buf.len() / 2);
        assert!(matches!(
            load(buf.as_slice()),
            Err(SudokuError::CorruptData(_))
        ));
    }

    #[test]
    fn wrong_length_is_corrupt() {
        let doc = r#"{"cells":[1,2,3],"givens":[true,false,true]}"#;
        assert!(matches!(
            load(doc.as_bytes()),
            Err(SudokuError::CorruptData(_))
        ));
    }

    #[test]
    fn duplicate_in_a_unit_is_corrupt() {
        let mut cells = vec![0u8; 81];
        cells[0] = 5;
        cells[1] = 5; // same row
        let doc = serde_json::json!({ "cells": cells, "givens": vec![false; 81] });
        assert!(matches!(
            load(doc.to_string().as_bytes()),
            Err(SudokuError::CorruptData(_))
        ));
    }

    #[test]
    fn out_of_range_value_is_corrupt() {
        let mut cells = vec![0u8; 81];
        cells[40] = 12;
        let doc = serde_json::json!({ "cells": cells, "givens": vec![false; 81] });
        assert!(matches!(
            load(doc.to_string().as_bytes()),
            Err(SudokuError::CorruptData(_))
        ));
    }

    #[test]
    fn given_flag_on_empty_cell_is_corrupt() {
        let mut givens = vec![false; 81];
        givens[10] = true;
        let doc = serde_json::json!({ "cells": vec![0u8; 81], "givens": givens });
        assert!(matches!(
            load(doc.to_string().as_bytes()),
            Err(SudokuError::CorruptData(_))
        ));
    }
}

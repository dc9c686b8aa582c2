use rand::RngExt;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::board::Board;
use crate::error::SudokuError;
use crate::point::Point;
use crate::solver;

/// Known minimum number of givens for a uniquely solvable 9x9 puzzle.
pub const MIN_GIVENS: usize = 17;
/// Most cells the carver may ever be asked to remove.
pub const MAX_REMOVALS: usize = 81 - MIN_GIVENS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn givens_range(&self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (40, 45),
            Difficulty::Medium => (32, 39),
            Difficulty::Hard => (27, 31),
            Difficulty::Expert => (22, 26),
        }
    }

    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Easy,
        }
    }

    pub fn prev(&self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Expert,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Expert => Difficulty::Hard,
        }
    }
}

/// A carved puzzle: the playable board, which cells are givens, and
/// how many removals the carver actually managed.
#[derive(Clone, Debug)]
pub struct Carved {
    pub board: Board,
    pub givens: [bool; 81],
    pub removed: usize,
}

impl Carved {
    pub fn is_given(&self, point: Point) -> bool {
        self.givens[point.index()]
    }
}

/// Produce a fully filled, legal board.
///
/// Backtracking over an empty 9x9 grid always succeeds; running out of
/// candidates at the root would mean the candidate computation itself
/// is broken.
pub fn generate_solved<R: RngExt>(rng: &mut R) -> Board {
    let mut board = Board::new();
    let filled = solver::fill_random(&mut board, rng);
    assert!(filled, "backtracking exhausted on an empty board");
    debug!("generated solved board");
    board
}

/// Remove up to `removals` cells from a solved board while keeping the
/// puzzle uniquely solvable.
///
/// Cells are attempted in uniformly random order; a removal that lets
/// a second solution appear is put back and never retried. Fewer than
/// `removals` successes is not an error -- `Carved::removed` reports
/// what was achieved.
pub fn carve<R: RngExt>(
    solved: &Board,
    removals: usize,
    rng: &mut R,
) -> Result<Carved, SudokuError> {
    if removals > MAX_REMOVALS {
        return Err(SudokuError::CapacityExceeded {
            requested: removals,
            max: MAX_REMOVALS,
        });
    }

    let mut board = solved.clone();
    let mut order: Vec<Point> = Point::all().collect();
    order.shuffle(rng);

    let mut removed = 0;
    for point in order {
        if removed >= removals {
            break;
        }
        if board.get(point) == 0 {
            continue;
        }
        let backup = board.clear(point);
        if solver::count_solutions(&mut board, 2) == 1 {
            removed += 1;
        } else {
            board
                .try_write(point, backup)
                .expect("restoring a value that was just cleared");
        }
    }
    debug!(requested = removals, removed, "carved puzzle");

    let mut givens = [false; 81];
    for (point, value) in board.iter() {
        givens[point.index()] = value != 0;
    }
    Ok(Carved {
        board,
        givens,
        removed,
    })
}

/// Generate a fresh puzzle at the given difficulty.
pub fn generate_puzzle<R: RngExt>(difficulty: Difficulty, rng: &mut R) -> Carved {
    let solved = generate_solved(rng);
    let (min_givens, max_givens) = difficulty.givens_range();
    let target_givens = rng.random_range(min_givens..=max_givens);
    // givens_range stays far above MIN_GIVENS, so carve cannot reject.
    carve(&solved, 81 - target_givens, rng).expect("difficulty removal count within the carving cap")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn generate_solved_is_full_and_legal() {
        let board = generate_solved(&mut Pcg64Mcg::seed_from_u64(9));
        assert!(board.is_full());
        assert!(board.is_legal());
    }

    #[test]
    fn carve_keeps_a_unique_solution() {
        let mut rng = Pcg64Mcg::seed_from_u64(21);
        let solved = generate_solved(&mut rng);
        let carved = carve(&solved, 40, &mut rng).unwrap();
        assert_eq!(carved.removed, 81 - carved.board.filled_count());
        assert!(carved.removed <= 40);
        let mut probe = carved.board.clone();
        assert_eq!(solver::count_solutions(&mut probe, 2), 1);
    }

    #[test]
    fn carved_givens_match_filled_cells() {
        let mut rng = Pcg64Mcg::seed_from_u64(5);
        let solved = generate_solved(&mut rng);
        let carved = carve(&solved, 30, &mut rng).unwrap();
        for (point, value) in carved.board.iter() {
            assert_eq!(carved.is_given(point), value != 0);
        }
    }

    #[test]
    fn carve_preserves_the_solved_grid_values() {
        let mut rng = Pcg64Mcg::seed_from_u64(13);
        let solved = generate_solved(&mut rng);
        let carved = carve(&solved, 25, &mut rng).unwrap();
        for (point, value) in carved.board.iter() {
            if value != 0 {
                assert_eq!(value, solved.get(point));
            }
        }
    }

    #[test]
    fn carve_rejects_excess_removals() {
        let mut rng = Pcg64Mcg::seed_from_u64(2);
        let solved = generate_solved(&mut rng);
        let err = carve(&solved, MAX_REMOVALS + 1, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SudokuError::CapacityExceeded { requested, max }
                if requested == MAX_REMOVALS + 1 && max == MAX_REMOVALS
        ));
    }

    #[test]
    fn carve_zero_removes_nothing() {
        let mut rng = Pcg64Mcg::seed_from_u64(8);
        let solved = generate_solved(&mut rng);
        let carved = carve(&solved, 0, &mut rng).unwrap();
        assert_eq!(carved.removed, 0);
        assert!(carved.board.is_full());
    }

    #[test]
    fn generate_puzzle_respects_difficulty_band() {
        let mut rng = Pcg64Mcg::seed_from_u64(17);
        let carved = generate_puzzle(Difficulty::Easy, &mut rng);
        let givens = carved.board.filled_count();
        let (min, _) = Difficulty::Easy.givens_range();
        // The carver may fall short of the removal target, never past it.
        assert!(givens >= min, "too few givens: {givens}");
        assert!(carved.board.is_legal());
    }
}

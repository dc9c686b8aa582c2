use rand::RngExt;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::board::Board;

/// Fill every empty cell with a randomized backtracking search.
///
/// Candidates are shuffled with `rng`, so a fixed seed gives a fixed
/// grid. Returns false only when the current contents admit no
/// completion; the board is then restored to its initial state.
pub fn fill_random<R: RngExt>(board: &mut Board, rng: &mut R) -> bool {
    let Some(point) = board.first_empty() else {
        return true;
    };

    let mut candidates = board.candidates(point);
    candidates.shuffle(rng);
    trace!(?point, n = candidates.len(), "descend");

    for value in candidates {
        if board.try_write(point, value).is_err() {
            continue;
        }
        if fill_random(board, rng) {
            return true;
        }
        board.clear(point);
    }
    trace!(?point, "backtrack");
    false
}

/// Count completions of the current board, stopping early at `limit`.
///
/// Deterministic row-major search; the board is left as it was found.
/// `count_solutions(b, 2)` distinguishes unsolvable (0), uniquely
/// solvable (1), and ambiguous (2) without enumerating everything.
pub fn count_solutions(board: &mut Board, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let Some(point) = board.first_empty() else {
        return 1;
    };

    let mut count = 0;
    for value in board.candidates(point) {
        if board.try_write(point, value).is_err() {
            continue;
        }
        count += count_solutions(board, limit - count);
        board.clear(point);
        if count >= limit {
            return count;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn fill_random_completes_an_empty_board() {
        let mut board = Board::new();
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        assert!(fill_random(&mut board, &mut rng));
        assert!(board.is_full());
        assert!(board.is_legal());
    }

    #[test]
    fn fill_random_is_deterministic_under_a_fixed_seed() {
        let mut a = Board::new();
        let mut b = Board::new();
        fill_random(&mut a, &mut Pcg64Mcg::seed_from_u64(42));
        fill_random(&mut b, &mut Pcg64Mcg::seed_from_u64(42));
        for p in Point::all() {
            assert_eq!(a.get(p), b.get(p));
        }
    }

    #[test]
    fn fill_random_respects_existing_values() {
        let mut board = Board::new();
        board.try_write(Point::new(0, 0), 5).unwrap();
        board.try_write(Point::new(8, 8), 2).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        assert!(fill_random(&mut board, &mut rng));
        assert_eq!(board.get(Point::new(0, 0)), 5);
        assert_eq!(board.get(Point::new(8, 8)), 2);
        assert!(board.is_legal());
    }

    #[test]
    fn unsolvable_board_reports_failure_and_restores_state() {
        let mut board = Board::new();
        // Box 0 holds 1..=8; row 2 and column 2 outside the box both
        // hold a 9, so (2,2) has no candidate at all.
        let mut v = 1;
        for r in 0..3 {
            for c in 0..3 {
                if (r, c) == (2, 2) {
                    continue;
                }
                board.try_write(Point::new(r, c), v).unwrap();
                v += 1;
            }
        }
        board.try_write(Point::new(2, 5), 9).unwrap();
        board.try_write(Point::new(5, 2), 9).unwrap();
        assert!(board.candidates(Point::new(2, 2)).is_empty());

        let before = board.filled_count();
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        assert!(!fill_random(&mut board, &mut rng));
        assert_eq!(board.filled_count(), before);
        assert_eq!(count_solutions(&mut board, 2), 0);
    }

    #[test]
    fn full_board_counts_as_one_solution() {
        let mut board = Board::new();
        fill_random(&mut board, &mut Pcg64Mcg::seed_from_u64(11));
        assert_eq!(count_solutions(&mut board, 2), 1);
    }

    #[test]
    fn empty_board_is_ambiguous() {
        let mut board = Board::new();
        assert_eq!(count_solutions(&mut board, 2), 2);
    }

    #[test]
    fn count_solutions_restores_the_board() {
        let mut board = Board::new();
        board.try_write(Point::new(0, 0), 5).unwrap();
        count_solutions(&mut board, 2);
        assert_eq!(board.get(Point::new(0, 0)), 5);
        assert_eq!(board.filled_count(), 1);
    }
}

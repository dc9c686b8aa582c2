use serde::{Deserialize, Serialize};

/// A cell coordinate: row and column, both in 0..9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9, "point ({row}, {col}) out of range");
        Self { row, col }
    }

    /// Dense index into a row-major 81-cell array.
    pub fn index(self) -> usize {
        self.row * 9 + self.col
    }

    /// Which of the nine 3x3 boxes this point belongs to (0..9, row-major).
    pub fn box_index(self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// All 81 points in row-major order.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..81).map(|i| Point::new(i / 9, i % 9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_row_major() {
        assert_eq!(Point::new(0, 0).index(), 0);
        assert_eq!(Point::new(0, 8).index(), 8);
        assert_eq!(Point::new(1, 0).index(), 9);
        assert_eq!(Point::new(8, 8).index(), 80);
    }

    #[test]
    fn box_index_covers_all_nine_boxes() {
        assert_eq!(Point::new(0, 0).box_index(), 0);
        assert_eq!(Point::new(2, 2).box_index(), 0);
        assert_eq!(Point::new(0, 3).box_index(), 1);
        assert_eq!(Point::new(4, 4).box_index(), 4);
        assert_eq!(Point::new(8, 8).box_index(), 8);
        assert_eq!(Point::new(6, 0).box_index(), 6);
    }

    #[test]
    fn all_visits_81_distinct_points() {
        let points: Vec<Point> = Point::all().collect();
        assert_eq!(points.len(), 81);
        assert_eq!(points[0], Point::new(0, 0));
        assert_eq!(points[80], Point::new(8, 8));
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }
}

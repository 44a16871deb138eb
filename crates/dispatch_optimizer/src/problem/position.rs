use serde::Serialize;

/// A point in time, measured in simulation steps.
pub type Time = i64;

/// A grid distance, which is also the number of steps it takes to travel it.
pub type Distance = i64;

/// An intersection on the grid, addressed by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    row: i64,
    col: i64,
}

impl Position {
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: i64, col: i64) -> Self {
        Position { row, col }
    }

    pub fn row(&self) -> i64 {
        self.row
    }

    pub fn col(&self) -> i64 {
        self.col
    }

    #[inline]
    pub fn manhattan_distance(&self, to: &Position) -> Distance {
        manhattan_distance(*self, *to)
    }

    pub fn is_inside_grid(&self, rows: i64, cols: i64) -> bool {
        (0..rows).contains(&self.row) && (0..cols).contains(&self.col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i64, i64)> for Position {
    fn from((row, col): (i64, i64)) -> Self {
        Position::new(row, col)
    }
}

#[inline]
pub fn manhattan_distance(from: Position, to: Position) -> Distance {
    let rows = from.row.abs_diff(to.row);
    let cols = from.col.abs_diff(to.col);

    Distance::try_from(rows.saturating_add(cols)).unwrap_or(Distance::MAX)
}

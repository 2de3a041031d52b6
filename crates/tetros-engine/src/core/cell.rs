use serde::{Deserialize, Serialize};

/// A grid cell coordinate.
///
/// - (0, 0) is the top-left cell of the visible board
/// - `column` increases rightward, `row` increases downward
/// - `row` is negative for cells above the visible board (spawn area)
///
/// A cell spans one grid unit: its bottom edge is `row + 1` and its right
/// edge is `column + 1`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({column}, {row})")]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self::new(self.column + columns, self.row + rows)
    }

    #[must_use]
    pub const fn below(self) -> Self {
        self.offset(0, 1)
    }

    #[must_use]
    pub const fn bottom_edge(self) -> i32 {
        self.row + 1
    }

    #[must_use]
    pub const fn right_edge(self) -> i32 {
        self.column + 1
    }
}

/// Horizontal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta of one step in this direction.
    #[must_use]
    pub const fn columns(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

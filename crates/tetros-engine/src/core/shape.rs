use serde::{Deserialize, Serialize};

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Shape {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Shape {
    /// Number of shapes (7).
    pub const LEN: usize = 7;

    /// Every shape once, in canonical order.
    pub const ALL: [Shape; Shape::LEN] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::S,
        Shape::Z,
        Shape::J,
        Shape::L,
    ];

    /// Returns the spawn orientation of this shape.
    #[must_use]
    pub const fn occupancy(self) -> Occupancy {
        CANONICAL_OCCUPANCY[self as usize]
    }
}

/// Square occupancy matrix of a piece in its current rotation.
///
/// The matrix is `size`×`size` (4 for I and O, 3 for the others) and is
/// indexed `[row][column]`. Storage is always 4×4; cells outside `size` stay
/// empty. Rotating keeps `size` unchanged and turns the matrix about its
/// top-left corner, so the piece's anchor never moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    size: u8,
    rows: [[bool; 4]; 4],
}

impl Occupancy {
    const fn new(size: u8, rows: [[bool; 4]; 4]) -> Self {
        Self { size, rows }
    }

    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn is_occupied(&self, column: u8, row: u8) -> bool {
        column < self.size && row < self.size && self.rows[usize::from(row)][usize::from(column)]
    }

    /// Returns the matrix turned 90° clockwise.
    ///
    /// `new[x][y] = old[N-1-y][x]`
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let n = usize::from(self.size);
        let mut rows = [[false; 4]; 4];
        for (x, new_row) in rows.iter_mut().enumerate().take(n) {
            for (y, cell) in new_row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - y][x];
            }
        }
        Self::new(self.size, rows)
    }

    /// Returns the matrix turned 90° counterclockwise.
    ///
    /// `new[x][y] = old[y][N-1-x]`
    #[must_use]
    pub fn rotated_counter_clockwise(&self) -> Self {
        let n = usize::from(self.size);
        let mut rows = [[false; 4]; 4];
        for (x, new_row) in rows.iter_mut().enumerate().take(n) {
            for (y, cell) in new_row.iter_mut().enumerate().take(n) {
                *cell = self.rows[y][n - 1 - x];
            }
        }
        Self::new(self.size, rows)
    }

    /// Returns `(column, row)` offsets of the occupied cells, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size)
                .filter(move |&column| self.is_occupied(column, row))
                .map(move |column| (i32::from(column), i32::from(row)))
        })
    }

    /// Iterates over the rows of the matrix, each `size` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        let n = usize::from(self.size);
        self.rows[..n].iter().map(move |row| &row[..n])
    }
}

const CANONICAL_OCCUPANCY: [Occupancy; Shape::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        Occupancy::new(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        Occupancy::new(4, [EEEE, [E, C, C, E], [E, C, C, E], EEEE]),
        // T-piece
        Occupancy::new(3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        Occupancy::new(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        Occupancy::new(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        Occupancy::new(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        Occupancy::new(3, [EEEE, [C, C, C, E], [C, E, E, E], EEEE]),
    ]
};

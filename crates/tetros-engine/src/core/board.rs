use crate::config::Color;

use super::{cell::Cell, piece::Piece};

/// The settled blocks: a mapping from occupied cell to color.
///
/// Storage is a dense row-major arena of `width × height` slots, so a cell
/// can hold at most one block and every block lies on the visible board.
/// Only two operations mutate it: [`merge`](Self::merge) when a piece locks
/// and [`check_lines`](Self::check_lines) when rows are cleared. Both apply
/// their changes as one batch.
///
/// # Example
///
/// ```
/// use tetros_engine::{Board, Cell, Color};
///
/// let mut board = Board::new(12, 22);
/// for column in 0..12 {
///     board.fill(Cell::new(column, 21), Color::rgb(255, 0, 0));
/// }
/// board.fill(Cell::new(3, 20), Color::rgb(0, 0, 255));
///
/// assert_eq!(board.check_lines(), 1);
/// assert_eq!(board.len(), 1);
/// assert!(board.is_occupied(Cell::new(3, 21)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    slots: Vec<Option<Color>>,
}

impl Board {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
            slots: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns `true` if the cell lies on the visible board.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.column) && (0..self.height).contains(&cell.row)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        usize::try_from(cell.row * self.width + cell.column).ok()
    }

    fn cell_at(&self, index: usize) -> Cell {
        // `index < width * height`, which fits in `i32` by construction.
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        Cell::new(index % self.width, index / self.width)
    }

    /// Returns the color of the block at `cell`, if any.
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<Color> {
        self.index(cell).and_then(|index| self.slots[index])
    }

    /// Returns `true` if a settled block occupies `cell`.
    ///
    /// Cells off the board are never occupied.
    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Number of settled blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over the settled blocks, top row first.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Color)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|color| (self.cell_at(index), color)))
    }

    /// Places a single block.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the board.
    pub fn fill(&mut self, cell: Cell, color: Color) {
        let index = self
            .index(cell)
            .unwrap_or_else(|| panic!("cell {cell} is outside the board"));
        self.slots[index] = Some(color);
    }

    /// Copies every cell of a locked piece onto the board.
    ///
    /// A cell that already holds a block takes the piece's color.
    ///
    /// # Panics
    ///
    /// Panics if any cell of the piece is outside the board.
    pub fn merge(&mut self, piece: &Piece) {
        for &cell in piece.cells() {
            self.fill(cell, piece.color());
        }
    }

    /// Returns `true` if every column of `row` is occupied.
    #[must_use]
    pub fn is_row_complete(&self, row: i32) -> bool {
        (0..self.width).all(|column| self.is_occupied(Cell::new(column, row)))
    }

    /// Clears complete rows and compacts the board.
    ///
    /// Rows are scanned bottom to top. Blocks in complete rows are removed;
    /// every other block moves down by the number of complete rows below it.
    /// Removal and shifting are computed over all complete rows before being
    /// applied, so a multi-row clear lands in one pass.
    ///
    /// Returns the number of rows cleared.
    pub fn check_lines(&mut self) -> usize {
        let complete_rows = (0..self.height)
            .rev()
            .filter(|&row| self.is_row_complete(row))
            .collect::<Vec<_>>();
        if complete_rows.is_empty() {
            return 0;
        }

        let mut slots = vec![None; self.slots.len()];
        for (cell, color) in self.iter() {
            if complete_rows.contains(&cell.row) {
                continue;
            }
            let shift = complete_rows
                .iter()
                .map(|&row| i32::from(row > cell.row))
                .sum();
            if let Some(index) = self.index(cell.offset(0, shift)) {
                slots[index] = Some(color);
            }
        }
        self.slots = slots;
        complete_rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: u16 = 12;
    const HEIGHT: u16 = 22;
    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn fill_row(board: &mut Board, row: i32, color: Color) {
        for column in 0..board.width() {
            board.fill(Cell::new(column, row), color);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(WIDTH, HEIGHT);
        assert!(board.is_empty());
        assert_eq!(board.len(), 0);
        assert_eq!((board.width(), board.height()), (12, 22));
        assert_eq!(board.iter().count(), 0);
    }

    #[test]
    fn test_fill_and_get() {
        let mut board = Board::new(WIDTH, HEIGHT);
        let cell = Cell::new(3, 7);
        board.fill(cell, RED);
        assert_eq!(board.get(cell), Some(RED));
        assert!(board.is_occupied(cell));
        assert_eq!(board.iter().collect::<Vec<_>>(), [(cell, RED)]);

        // Same cell keeps a single entry.
        board.fill(cell, BLUE);
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(cell), Some(BLUE));
    }

    #[test]
    fn test_off_board_cells_are_never_occupied() {
        let board = Board::new(WIDTH, HEIGHT);
        for cell in [
            Cell::new(-1, 0),
            Cell::new(12, 0),
            Cell::new(0, -1),
            Cell::new(0, 22),
        ] {
            assert!(!board.contains(cell));
            assert!(!board.is_occupied(cell));
        }
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_fill_above_board_panics() {
        let mut board = Board::new(WIDTH, HEIGHT);
        board.fill(Cell::new(0, -1), RED);
    }

    #[test]
    fn test_check_lines_nothing_complete() {
        let mut board = Board::new(WIDTH, HEIGHT);
        for column in 0..11 {
            board.fill(Cell::new(column, 21), RED);
        }
        let before = board.clone();
        assert_eq!(board.check_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_check_lines_single_row() {
        let mut board = Board::new(WIDTH, HEIGHT);
        // Complete row 18, with blocks above and below it.
        fill_row(&mut board, 18, RED);
        board.fill(Cell::new(0, 21), BLUE);
        board.fill(Cell::new(5, 19), BLUE);
        board.fill(Cell::new(2, 17), BLUE);
        board.fill(Cell::new(7, 3), BLUE);

        assert_eq!(board.check_lines(), 1);
        assert_eq!(board.len(), 4);
        // Below the cleared row: untouched.
        assert_eq!(board.get(Cell::new(0, 21)), Some(BLUE));
        assert_eq!(board.get(Cell::new(5, 19)), Some(BLUE));
        // Above: one row down.
        assert_eq!(board.get(Cell::new(2, 18)), Some(BLUE));
        assert_eq!(board.get(Cell::new(7, 4)), Some(BLUE));
        assert!(!board.is_occupied(Cell::new(2, 17)));
        assert!(!board.is_occupied(Cell::new(7, 3)));
    }

    #[test]
    fn test_check_lines_four_rows_at_once() {
        let mut board = Board::new(WIDTH, HEIGHT);
        for row in 18..22 {
            fill_row(&mut board, row, RED);
        }
        board.fill(Cell::new(4, 17), BLUE);
        board.fill(Cell::new(4, 16), BLUE);
        board.fill(Cell::new(9, 10), BLUE);

        assert_eq!(board.check_lines(), 4);
        assert_eq!(board.len(), 3);
        assert_eq!(board.get(Cell::new(4, 21)), Some(BLUE));
        assert_eq!(board.get(Cell::new(4, 20)), Some(BLUE));
        assert_eq!(board.get(Cell::new(9, 14)), Some(BLUE));
    }

    #[test]
    fn test_check_lines_non_adjacent_rows() {
        let mut board = Board::new(WIDTH, HEIGHT);
        fill_row(&mut board, 21, RED);
        fill_row(&mut board, 19, RED);
        board.fill(Cell::new(1, 20), BLUE); // between the two cleared rows
        board.fill(Cell::new(2, 18), BLUE); // above both

        assert_eq!(board.check_lines(), 2);
        assert_eq!(
            board.iter().collect::<Vec<_>>(),
            [(Cell::new(2, 20), BLUE), (Cell::new(1, 21), BLUE)]
        );
    }

    #[test]
    fn test_check_lines_full_board() {
        let mut board = Board::new(WIDTH, HEIGHT);
        for row in 0..board.height() {
            fill_row(&mut board, row, RED);
        }
        assert_eq!(board.check_lines(), 22);
        assert!(board.is_empty());
    }
}

use arrayvec::ArrayVec;

use crate::config::{Color, EngineConfig, Gravity};

use super::{
    board::Board,
    cell::{Cell, Direction},
    shape::{Occupancy, Shape},
};

/// Anchor row of a 4×4 piece when it spawns.
const SPAWN_ROW_LARGE: i32 = -3;
/// Anchor row of a 3×3 piece when it spawns.
const SPAWN_ROW_SMALL: i32 = -5;

/// The active, falling tetromino.
///
/// A piece is a shape with a current rotation (its [`Occupancy`]), the grid
/// cell of its top-left anchor, and its gravity state. The occupied grid
/// cells are recomputed each time the occupancy or the anchor changes.
///
/// Rotation is not collision-checked. Horizontal shifts are checked against
/// the walls and the settled blocks of a [`Board`].
///
/// # Example
///
/// ```
/// use tetros_engine::{Board, Direction, EngineConfig, Piece, Shape};
///
/// let config = EngineConfig::default();
/// let board = Board::new(config.width, config.height);
/// let mut piece = Piece::spawn(Shape::T, &config);
///
/// assert!(piece.shift(Direction::Left, &board));
/// piece.rotate_clockwise();
/// assert_eq!(piece.cells().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    shape: Shape,
    color: Color,
    occupancy: Occupancy,
    origin: Cell,
    falling: bool,
    fall_accumulator: f64,
    drop_rate_override: Option<f64>,
    gravity: Gravity,
    cells: ArrayVec<Cell, 4>,
}

impl Piece {
    /// Creates a piece in its spawn orientation and position.
    ///
    /// The anchor is horizontally centered and placed above the visible
    /// board, so the piece falls into view.
    #[must_use]
    pub fn spawn(shape: Shape, config: &EngineConfig) -> Self {
        let occupancy = shape.occupancy();
        let size = i32::from(occupancy.size());
        let column = i32::from(config.width) / 2 - size / 2;
        let row = if size == 4 {
            SPAWN_ROW_LARGE
        } else {
            SPAWN_ROW_SMALL
        };
        Self::with_origin(shape, config, Cell::new(column, row))
    }

    /// Creates a piece in its spawn orientation at the given anchor.
    #[must_use]
    pub fn with_origin(shape: Shape, config: &EngineConfig, origin: Cell) -> Self {
        let mut piece = Self {
            shape,
            color: config.palette.color(shape),
            occupancy: shape.occupancy(),
            origin,
            falling: true,
            fall_accumulator: 0.0,
            drop_rate_override: None,
            gravity: config.gravity,
            cells: ArrayVec::new(),
        };
        piece.refresh_cells();
        piece
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    #[must_use]
    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Returns `true` under normal gravity, `false` while soft drop is held.
    #[must_use]
    pub fn is_falling(&self) -> bool {
        self.falling
    }

    #[must_use]
    pub fn fall_accumulator(&self) -> f64 {
        self.fall_accumulator
    }

    /// Absolute grid cells covered by the piece.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns `true` if any cell is above the visible board.
    #[must_use]
    pub fn is_above_board(&self) -> bool {
        self.cells.iter().any(|cell| cell.row < 0)
    }

    pub fn rotate_clockwise(&mut self) {
        self.occupancy = self.occupancy.rotated_clockwise();
        self.refresh_cells();
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.occupancy = self.occupancy.rotated_counter_clockwise();
        self.refresh_cells();
    }

    /// Moves the piece one column if nothing is in the way.
    ///
    /// The move is refused when any occupied cell would cross a wall or land
    /// on a settled block. Every cell is checked, not only the cells on the
    /// piece's leading edge, so the piece cannot slide into a block that sits
    /// in a notch of its outline. Returns whether the piece moved.
    pub fn shift(&mut self, direction: Direction, board: &Board) -> bool {
        let columns = direction.columns();
        let blocked = self.cells.iter().any(|cell| {
            let target = cell.offset(columns, 0);
            target.column < 0 || target.column >= board.width() || board.is_occupied(target)
        });
        if blocked {
            return false;
        }
        self.translate(columns, 0);
        true
    }

    /// Advances gravity by one tick.
    ///
    /// Adds `level / divisor` to the accumulator; once it exceeds the active
    /// threshold the piece moves down one row and the accumulator resets.
    /// Returns whether the piece moved.
    pub fn fall(&mut self, level: u32) -> bool {
        self.fall_accumulator += f64::from(level) / self.gravity.divisor;
        if self.fall_accumulator <= self.drop_threshold() {
            return false;
        }
        self.fall_accumulator = 0.0;
        self.translate(0, 1);
        true
    }

    /// Switches to the fast threshold for the rest of this piece's life.
    pub fn drop(&mut self) {
        self.drop_rate_override = Some(self.gravity.fast_drop_threshold);
    }

    /// Sets normal gravity (`true`) or held soft drop (`false`).
    pub fn set_falling(&mut self, falling: bool) {
        self.falling = falling;
    }

    /// Threshold the accumulator must exceed before the piece moves down.
    #[must_use]
    pub fn drop_threshold(&self) -> f64 {
        if !self.falling {
            return self.gravity.fast_drop_threshold;
        }
        self.drop_rate_override
            .unwrap_or(self.gravity.drop_threshold)
    }

    /// Moves the piece back inside the grid after a rotation pushed it out.
    ///
    /// Only walls and floor are considered, never settled blocks: the piece
    /// may end up overlapping the board, and a later
    /// [`Board::merge`] overwrites the blocks it covers.
    pub fn nudge_inside(&mut self, width: i32, height: i32) {
        let Some(min_column) = self.cells.iter().map(|cell| cell.column).min() else {
            return;
        };
        let max_column = self.cells.iter().map(|cell| cell.column).max().unwrap_or(min_column);
        let max_row = self.cells.iter().map(|cell| cell.row).max().unwrap_or(0);

        let columns = if min_column < 0 {
            -min_column
        } else if max_column >= width {
            width - 1 - max_column
        } else {
            0
        };
        let rows = (height - 1 - max_row).min(0);
        if columns != 0 || rows != 0 {
            self.translate(columns, rows);
        }
    }

    /// Returns `true` if a settled block sits directly under any cell.
    #[must_use]
    pub fn rests_on_blocks(&self, board: &Board) -> bool {
        !board.is_empty() && self.cells.iter().any(|cell| board.is_occupied(cell.below()))
    }

    /// Returns `true` if any cell's bottom edge reached the floor.
    #[must_use]
    pub fn touches_floor(&self, height: i32) -> bool {
        self.cells.iter().any(|cell| cell.bottom_edge() >= height)
    }

    fn translate(&mut self, columns: i32, rows: i32) {
        self.origin = self.origin.offset(columns, rows);
        self.refresh_cells();
    }

    fn refresh_cells(&mut self) {
        let origin = self.origin;
        self.cells.clear();
        self.cells.extend(
            self.occupancy
                .occupied_offsets()
                .map(|(dx, dy)| origin.offset(dx, dy)),
        );
    }
}

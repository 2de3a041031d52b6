use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetros_engine::NextPiece;

use crate::view::widgets::BlockDisplay;

/// Preview of the next piece, cropped to its occupied cells.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<NextPiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new(piece: Option<NextPiece>) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Bounding box `(column, row, width, height)` of the occupied cells.
fn bounds(piece: &NextPiece) -> (i32, i32, u16, u16) {
    let offsets = piece.occupancy.occupied_offsets().collect::<Vec<_>>();
    let min_column = offsets.iter().map(|&(c, _)| c).min().unwrap_or(0);
    let max_column = offsets.iter().map(|&(c, _)| c).max().unwrap_or(-1);
    let min_row = offsets.iter().map(|&(_, r)| r).min().unwrap_or(0);
    let max_row = offsets.iter().map(|&(_, r)| r).max().unwrap_or(-1);
    let width = u16::try_from(max_column - min_column + 1).unwrap_or(0);
    let height = u16::try_from(max_row - min_row + 1).unwrap_or(0);
    (min_column, min_row, width, height)
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let (left, top, width, height) = bounds(&piece);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied = BlockDisplay::filled(piece.color);
        let empty = BlockDisplay::empty(false);
        for (row, grid_row) in (top..).zip(grid_rows) {
            for (column, grid_cell) in (left..).zip(grid_row) {
                let is_occupied = u8::try_from(column)
                    .ok()
                    .zip(u8::try_from(row).ok())
                    .is_some_and(|(c, r)| piece.occupancy.is_occupied(c, r));
                let display = if is_occupied { occupied } else { empty };
                display.render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tetros_engine::{EngineConfig, Shape};

    use super::*;

    fn next(shape: Shape) -> NextPiece {
        NextPiece {
            shape,
            color: EngineConfig::default().palette.color(shape),
            occupancy: shape.occupancy(),
        }
    }

    #[test]
    fn test_bounds_crop_empty_rows_and_columns() {
        assert_eq!(bounds(&next(Shape::I)), (0, 1, 4, 1));
        assert_eq!(bounds(&next(Shape::O)), (1, 1, 2, 2));
        assert_eq!(bounds(&next(Shape::T)), (0, 0, 3, 2));
        assert_eq!(bounds(&next(Shape::L)), (0, 1, 3, 2));
    }
}

use std::iter;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetros_engine::{Cell, Color, Snapshot};

use crate::view::widgets::BlockDisplay;

/// The playfield: settled blocks with the active piece drawn on top.
///
/// Cells of the active piece that are still above the board are not drawn.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a Snapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn columns(&self) -> u16 {
        u16::try_from(self.snapshot.width).unwrap_or(0)
    }

    fn rows(&self) -> u16 {
        u16::try_from(self.snapshot.height).unwrap_or(0)
    }

    pub fn width(&self) -> u16 {
        self.columns() * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.rows() * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Row-major colors of every visible cell.
    fn slots(&self) -> Vec<Option<Color>> {
        let width = usize::from(self.columns());
        let mut slots = vec![None; width * usize::from(self.rows())];
        let index = |cell: Cell| {
            let column = usize::try_from(cell.column).ok()?;
            let row = usize::try_from(cell.row).ok()?;
            (column < width).then(|| row * width + column)
        };

        let active = self
            .snapshot
            .active
            .iter()
            .flat_map(|piece| piece.cells.iter().map(|&cell| (cell, piece.color)));
        for (cell, color) in self.snapshot.board.iter().copied().chain(active) {
            if let Some(slot) = index(cell).and_then(|i| slots.get_mut(i)) {
                *slot = Some(color);
            }
        }
        slots
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.columns()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..self.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .flat_map(|row| row.layout_vec(&horizontal));
        for (grid_cell, slot) in iter::zip(grid_cells, self.slots()) {
            BlockDisplay::from_slot(slot).render(grid_cell, buf);
        }
    }
}

use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::{color, style};

/// One grid cell, drawn two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    /// An empty cell, optionally marked with a dot.
    pub const fn empty(show_dots: bool) -> Self {
        if show_dots {
            Self::new(style::EMPTY_DOT, ".")
        } else {
            Self::new(style::EMPTY, "")
        }
    }

    /// A filled cell of the given block color.
    pub const fn filled(color: tetros_engine::Color) -> Self {
        Self::new(style::bg_only(color::from_engine(color)), "")
    }

    /// A cell holding `color` if any, otherwise an empty dotted cell.
    pub const fn from_slot(slot: Option<tetros_engine::Color>) -> Self {
        match slot {
            Some(color) => Self::filled(color),
            None => Self::empty(true),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill the whole area, not just the cells under the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetros_engine::{GameStats, Snapshot};

use crate::view::widgets::{BoardDisplay, PieceDisplay, SessionStatsDisplay, color, style};

/// The whole game screen: stats on the left, the board in the middle and
/// the next piece on the right, with a popup while paused or game over.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a Snapshot,
    stats: &'a GameStats,
    tick_rate: f64,
    horizontal_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a Snapshot, stats: &'a GameStats, tick_rate: f64) -> Self {
        Self {
            snapshot,
            stats,
            tick_rate,
            horizontal_padding: 1,
        }
    }

    fn border_style(&self) -> Style {
        let color = if self.snapshot.game_over {
            color::RED
        } else if self.snapshot.paused {
            color::YELLOW
        } else {
            color::WHITE
        };
        Style::new().fg(color)
    }

    fn board(&self) -> BoardDisplay<'a> {
        BoardDisplay::new(self.snapshot).block(
            Block::bordered()
                .border_style(self.border_style())
                .style(style::DEFAULT),
        )
    }

    fn panel(&self, title: &'static str) -> Block<'a> {
        Block::bordered()
            .title(Line::from(title).centered())
            .padding(Padding::horizontal(self.horizontal_padding))
            .border_style(self.border_style())
            .style(style::DEFAULT)
    }

    pub fn height(&self) -> u16 {
        self.board().height()
    }

    fn popup(&self) -> Option<(&'static str, Style)> {
        if self.snapshot.game_over {
            Some(("GAME OVER", style::GAME_OVER_POPUP))
        } else if self.snapshot.paused {
            Some(("PAUSED", style::PAUSED_POPUP))
        } else {
            None
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let game_board = self.board();
        let next_panel = PieceDisplay::new(self.snapshot.next).block(self.panel("NEXT"));
        let session_stats =
            SessionStatsDisplay::new(self.stats, self.tick_rate).block(self.panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(session_stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(session_stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        session_stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

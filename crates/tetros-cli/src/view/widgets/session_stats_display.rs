use std::{iter, time::Duration};

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetros_engine::GameStats;

use crate::view::widgets::style;

pub struct SessionStatsDisplay<'a> {
    stats: &'a GameStats,
    tick_rate: f64,
    block: Option<BlockWidget<'a>>,
}

impl<'a> SessionStatsDisplay<'a> {
    pub fn new(stats: &'a GameStats, tick_rate: f64) -> Self {
        Self {
            stats,
            tick_rate,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        20 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        u16::try_from(ROWS.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

type Value = &'static dyn Fn(&GameStats, f64) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    FullLabel(&'static str),
    FullValue(Value),
    LabelValue(&'static str, Value),
}

#[expect(clippy::cast_precision_loss)]
fn play_time(stats: &GameStats, tick_rate: f64) -> Duration {
    Duration::try_from_secs_f64(stats.play_ticks() as f64 / tick_rate).unwrap_or_default()
}

const ROWS: &[Row] = &[
    Row::FullLabel("SCORE:"),
    Row::FullValue(&|stats, _| stats.score().to_string()),
    Row::FullLabel("TIME:"),
    Row::FullValue(&|stats, tick_rate| {
        let dur = play_time(stats, tick_rate);
        format!(
            "{:0}:{:0>2}.{:0>2}",
            dur.as_secs() / 60,
            dur.as_secs() % 60,
            dur.subsec_millis() / 10
        )
    }),
    Row::Empty,
    Row::LabelValue("LEVEL:", &|stats, _| stats.level().to_string()),
    Row::LabelValue("NEXT LV:", &|stats, _| {
        format!("{}/{}", stats.level_progress(), stats.lines_per_level())
    }),
    Row::LabelValue("LINES:", &|stats, _| stats.total_cleared_lines().to_string()),
    Row::Empty,
    Row::LabelValue("PIECES:", &|stats, _| stats.completed_pieces().to_string()),
    Row::LabelValue("SINGLES:", &|stats, _| {
        stats.line_cleared_counter()[1].to_string()
    }),
    Row::LabelValue("DOUBLES:", &|stats, _| {
        stats.line_cleared_counter()[2].to_string()
    }),
    Row::LabelValue("TRIPLES:", &|stats, _| {
        stats.line_cleared_counter()[3].to_string()
    }),
    Row::LabelValue("TETRIS:", &|stats, _| {
        stats.line_cleared_counter()[4].to_string()
    }),
];

impl Widget for SessionStatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = style::DEFAULT;
        let rows_areas =
            Layout::vertical((0..ROWS.len()).map(|_| Constraint::Length(1))).split(area);

        for (row, area) in iter::zip(ROWS.iter().copied(), rows_areas.iter().copied()) {
            match row {
                Row::Empty => {}
                Row::FullLabel(label) => {
                    Line::styled(label, style).left_aligned().render(area, buf);
                }
                Row::FullValue(value) => {
                    Line::styled(value(self.stats, self.tick_rate), style)
                        .right_aligned()
                        .render(area, buf);
                }
                Row::LabelValue(label, value) => {
                    let [label_area, value_area] = area.layout(&Layout::horizontal([
                        Constraint::Fill(1),
                        Constraint::Fill(1),
                    ]));
                    Line::styled(label, style)
                        .left_aligned()
                        .render(label_area, buf);
                    Line::styled(value(self.stats, self.tick_rate), style)
                        .right_aligned()
                        .render(value_area, buf);
                }
            }
        }
    }
}

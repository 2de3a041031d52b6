use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::view::widgets::color;

/// Keys that trigger an action, and the action's label.
pub type KeyBinding<'a> = (&'a [&'a str], &'a str);

/// One-line help bar listing the active key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding<'a>],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding<'a>]) -> Self {
        Self { bindings }
    }
}

const KEY_STYLE: Style = Style::new().fg(color::CYAN);
const SEPARATOR_STYLE: Style = Style::new().fg(color::GRAY);
const DESCRIPTION_STYLE: Style = Style::new().fg(color::WHITE);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, &(keys, desc)) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, &key) in keys.iter().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::raw(" "));
            spans.push(Span::styled(desc, DESCRIPTION_STYLE));
        }
        Line::from(spans).centered().render(area, buf);
    }
}

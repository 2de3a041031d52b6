use crossterm::event::{Event, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};
use tetros_engine::{Command, Phase, Session, TickEvent};

use crate::{
    command::play::input::KeyMap,
    tui::{App, Runtime},
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑", "X"], "Rotate"),
    (&["Z"], "Rotate CCW"),
    (&["C"], "Soft Drop"),
    (&["↓", "Space"], "Drop"),
    (&["P", "Esc"], "Pause"),
    (&["Q"], "Quit"),
];
const PAUSED_KEYS: &[KeyBinding] = &[(&["P", "Esc"], "Resume"), (&["Q"], "Quit")];
const GAME_OVER_KEYS: &[KeyBinding] = &[
    (&["Any"], "Play Again"),
    (&["Esc", "F1", "P", "Q"], "Quit"),
];

#[derive(Debug)]
pub struct PlayApp {
    session: Session,
    keys: KeyMap,
    pending: Vec<Command>,
    tick_rate: f64,
}

impl PlayApp {
    pub fn new(session: Session, tick_rate: f64) -> Self {
        Self {
            session,
            keys: KeyMap::new(false),
            pending: vec![],
            tick_rate,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(self.tick_rate);
        runtime.request_key_release_events();
    }

    fn should_exit(&self) -> bool {
        self.session.should_quit()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        self.keys.set_release_events(runtime.reports_key_release());
        let Some(key) = event.as_key_event() else {
            return;
        };
        // Only a fresh key press starts a new game.
        if key.kind == KeyEventKind::Repeat && self.session.phase().is_game_over() {
            return;
        }
        if let Some(command) = self.keys.map(&key) {
            self.pending.push(command);
        }
    }

    fn update(&mut self, _runtime: &mut Runtime) -> anyhow::Result<()> {
        for command in self.pending.drain(..) {
            self.session.apply(command)?;
            if self.session.should_quit() {
                return Ok(());
            }
        }
        match self.session.tick()? {
            TickEvent::Locked(_) => {
                if let Some(command) = self.keys.piece_locked() {
                    self.session.apply(command)?;
                }
            }
            TickEvent::GameOver => self.keys.game_over(),
            TickEvent::Paused | TickEvent::Idle | TickEvent::Falling => {}
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let bindings = match self.session.phase() {
            Phase::Paused => PAUSED_KEYS,
            Phase::GameOver => GAME_OVER_KEYS,
            Phase::Spawning | Phase::Falling | Phase::Locking => PLAYING_KEYS,
        };

        let session_display = SessionDisplay::new(&snapshot, self.session.stats(), self.tick_rate);
        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(session_display.height()),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }
}

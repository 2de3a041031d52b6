use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tetros_engine::Command;

/// Translates key events into engine commands.
///
/// Soft drop lasts while its key is held. Terminals that cannot report key
/// releases get a toggle instead: one press starts it, the next ends it.
#[derive(Debug, Clone)]
pub struct KeyMap {
    release_events: bool,
    soft_drop_held: bool,
}

impl KeyMap {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            soft_drop_held: false,
        }
    }

    pub fn set_release_events(&mut self, release_events: bool) {
        self.release_events = release_events;
    }

    pub fn map(&mut self, key: &KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return (key.kind == KeyEventKind::Press).then_some(Command::Quit);
        }
        match key.kind {
            KeyEventKind::Release => self.map_release(key.code),
            KeyEventKind::Repeat => Self::map_repeat(key.code),
            KeyEventKind::Press => self.map_press(key.code),
        }
    }

    fn map_press(&mut self, code: KeyCode) -> Option<Command> {
        let command = match code {
            KeyCode::Up | KeyCode::Char('x' | 'X') => Command::RotateCw,
            KeyCode::Char('z' | 'Z') => Command::RotateCcw,
            KeyCode::Left => Command::ShiftLeft,
            KeyCode::Right => Command::ShiftRight,
            KeyCode::Down | KeyCode::Char(' ') => Command::HardDrop,
            KeyCode::Char('c' | 'C') => {
                if self.release_events || !self.soft_drop_held {
                    self.soft_drop_held = true;
                    Command::SoftDropOn
                } else {
                    self.soft_drop_held = false;
                    Command::SoftDropOff
                }
            }
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('p' | 'P') => Command::TogglePause,
            KeyCode::Char('q' | 'Q') => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn map_repeat(code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Up | KeyCode::Char('x' | 'X') => Some(Command::RotateCw),
            KeyCode::Char('z' | 'Z') => Some(Command::RotateCcw),
            KeyCode::Left => Some(Command::ShiftLeft),
            KeyCode::Right => Some(Command::ShiftRight),
            _ => None,
        }
    }

    fn map_release(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('c' | 'C') if self.soft_drop_held => {
                self.soft_drop_held = false;
                Some(Command::SoftDropOff)
            }
            _ => None,
        }
    }

    /// Called when the active piece locked and a fresh one took its place.
    ///
    /// A held soft drop key keeps acting on the new piece. A toggled soft
    /// drop ends with the piece it was started on.
    pub fn piece_locked(&mut self) -> Option<Command> {
        if !self.soft_drop_held {
            return None;
        }
        if self.release_events {
            Some(Command::SoftDropOn)
        } else {
            self.soft_drop_held = false;
            None
        }
    }

    /// Called when the game ends. Any soft drop in progress is over.
    pub fn game_over(&mut self) {
        self.soft_drop_held = false;
    }
}

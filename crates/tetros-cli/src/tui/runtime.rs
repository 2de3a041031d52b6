use std::{io, time::Duration};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::supports_keyboard_enhancement,
};
use ratatui::DefaultTerminal;

use crate::tui::{App, event::TuiEvent, event_loop::EventLoop};

const DEFAULT_TICK_RATE: f64 = 30.0;

/// Runs an [`App`] on the terminal.
#[derive(Debug)]
pub struct Runtime {
    events: EventLoop,
    key_release_requested: bool,
    key_release_reported: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: EventLoop::new(Duration::from_secs_f64(1.0 / DEFAULT_TICK_RATE)),
            key_release_requested: false,
            key_release_reported: false,
        }
    }

    /// Sets the tick rate (Hz, ticks per second).
    pub fn set_tick_rate(&mut self, rate: f64) {
        self.events
            .set_tick_interval(Duration::from_secs_f64(1.0 / rate));
    }

    /// Asks the terminal to report key releases, if it can.
    ///
    /// Takes effect when called from [`App::init`].
    pub fn request_key_release_events(&mut self) {
        self.key_release_requested = true;
    }

    /// Returns `true` if key release events will be delivered.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.key_release_reported
    }

    /// Runs the application until [`App::should_exit`] returns `true`.
    ///
    /// - tick: `app.update()`
    /// - render: `app.draw()`
    /// - terminal event: `app.handle_event()`
    ///
    /// The terminal is restored before returning, also on error.
    pub fn run<A>(mut self, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        ratatui::run(|terminal| {
            app.init(&mut self);
            if self.key_release_requested {
                self.key_release_reported = supports_keyboard_enhancement().unwrap_or(false);
            }
            if self.key_release_reported {
                execute!(
                    io::stdout(),
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
            }

            let result = self.drive(terminal, app);

            if self.key_release_reported {
                execute!(io::stdout(), PopKeyboardEnhancementFlags)?;
            }
            result
        })
    }

    fn drive<A>(&mut self, terminal: &mut DefaultTerminal, app: &mut A) -> anyhow::Result<()>
    where
        A: App,
    {
        while !app.should_exit() {
            match self.events.next()? {
                TuiEvent::Tick => app.update(self)?,
                TuiEvent::Render => {
                    terminal.draw(|frame| app.draw(frame))?;
                }
                TuiEvent::Crossterm(event) => app.handle_event(self, &event),
            }
        }
        Ok(())
    }
}

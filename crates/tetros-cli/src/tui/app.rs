use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Runtime;

/// An application driven by [`Runtime::run`].
pub trait App {
    /// Called once the terminal is set up, before the first event.
    ///
    /// Configure the tick rate and key release reporting here.
    fn init(&mut self, runtime: &mut Runtime);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, ...).
    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event);

    /// Advances the application by one tick.
    ///
    /// An error stops the runtime and is returned from [`Runtime::run`].
    fn update(&mut self, runtime: &mut Runtime) -> anyhow::Result<()>;

    fn draw(&self, frame: &mut Frame);
}

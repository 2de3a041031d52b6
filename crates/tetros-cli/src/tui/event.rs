use crossterm::event::Event as CrosstermEvent;

/// Events produced by the event loop.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Time for a game logic update.
    Tick,
    /// State changed since the last frame.
    Render,
    /// Key input, resize and other terminal events.
    Crossterm(CrosstermEvent),
}

/// Player input understood by a [`Session`](super::Session).
///
/// Commands are device independent; mapping keys to commands is the
/// frontend's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Command {
    /// Rotate the active piece 90° clockwise.
    RotateCw,
    /// Rotate the active piece 90° counterclockwise.
    RotateCcw,
    ShiftLeft,
    ShiftRight,
    /// Start holding soft drop.
    SoftDropOn,
    /// Release soft drop.
    SoftDropOff,
    /// Switch the active piece to the fast threshold until it locks.
    HardDrop,
    TogglePause,
    Quit,
}

use arrayvec::ArrayVec;

use crate::{
    config::Color,
    core::{Cell, Occupancy, Shape},
};

/// The active piece as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceView {
    pub shape: Shape,
    pub color: Color,
    pub cells: ArrayVec<Cell, 4>,
}

/// The upcoming piece, in its spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub shape: Shape,
    pub color: Color,
    pub occupancy: Occupancy,
}

/// Read-only view of a session, taken after a tick.
///
/// Holds everything a frontend needs to draw a frame. It owns its data, so
/// the session can keep running while the snapshot is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    /// `None` once the game is over.
    pub active: Option<PieceView>,
    /// Settled blocks, top row first.
    pub board: Vec<(Cell, Color)>,
    pub score: u64,
    pub level: u32,
    pub level_progress: u32,
    pub lines_per_level: u32,
    pub next: Option<NextPiece>,
    pub paused: bool,
    pub game_over: bool,
}

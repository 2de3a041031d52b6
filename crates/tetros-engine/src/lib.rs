//! Simulation core of a falling-block puzzle game.
//!
//! The crate is split in two layers:
//!
//! - [`core`] - the grid model: cells, shapes, pieces and the settled board
//! - [`engine`] - the game rules built on top: 7-bag queue, scoring, the
//!   tick-driven [`Session`] and the read-only [`Snapshot`] handed to renderers
//!
//! Everything runs on discrete grid cells and discrete ticks. Rendering and
//! input devices live outside this crate; they send [`Command`]s and call
//! [`Session::tick`] at a fixed rate.
//!
//! # Example
//!
//! ```
//! use tetros_engine::{Command, EngineConfig, PieceSeed, Session};
//!
//! let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut session = Session::with_seed(EngineConfig::default(), seed).unwrap();
//!
//! session.apply(Command::ShiftLeft).unwrap();
//! session.apply(Command::RotateCw).unwrap();
//! for _ in 0..30 {
//!     session.tick().unwrap();
//! }
//!
//! let snapshot = session.snapshot();
//! assert_eq!(snapshot.level, 1);
//! assert!(!snapshot.game_over);
//! ```

pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

/// Errors raised by scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ScoreError {
    #[display("cannot score {rows_cleared} cleared rows (expected 0-4)")]
    InvalidRowClearCount { rows_cleared: usize },
}

/// Invariant violations detected while running a session.
///
/// None of these are recoverable: they indicate a bug in the engine and the
/// caller is expected to stop the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    #[display("piece queue is empty")]
    EmptyQueue,
    #[display("scoring failed: {_0}")]
    Score(ScoreError),
}

impl From<ScoreError> for EngineError {
    fn from(err: ScoreError) -> Self {
        Self::Score(err)
    }
}

//! Game rules on top of the grid model.
//!
//! - [`Session`] - a running game: phases, ticks, locking and restart
//! - [`Command`] - device independent player input
//! - [`PieceQueue`] - 7-bag piece queue, seeded by a [`PieceSeed`]
//! - [`GameStats`] - score, level and counters
//! - [`Snapshot`] - read-only view handed to renderers
//!
//! # Game Flow
//!
//! 1. A [`Session`] is created from an [`EngineConfig`](crate::EngineConfig)
//! 2. The frontend applies buffered commands, then calls [`Session::tick`]
//! 3. A grounded piece locks; complete rows are cleared and scored
//! 4. The next queued piece spawns above the board and falls into view
//! 5. A piece that locks above the board ends the game

pub use self::{command::*, piece_queue::*, scoring::*, session::*, snapshot::*};

mod command;
mod piece_queue;
mod scoring;
mod session;
mod snapshot;

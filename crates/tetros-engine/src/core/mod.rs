//! Grid-level data structures: cells, shapes, the active piece and the board.

pub use self::{board::*, cell::*, piece::*, shape::*};

mod board;
mod cell;
mod piece;
mod shape;

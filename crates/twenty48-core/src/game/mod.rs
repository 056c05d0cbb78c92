//! Game module: grid state, pure line algorithms, and the move engine.
//!
//! - `state` holds the `Tile`/`Board` data model. No game rules live there.
//! - `ops` holds the direction-independent line algorithms (compaction,
//!   merging, the terminal-state predicate).
//! - `engine` drives moves, random spawning, and change notification.

mod engine;
mod ops;
pub mod state;

pub use engine::{ChangeObserver, GameEngine};
pub use state::{Board, Direction, Tile, BOARD_SIZE, WIN_VALUE};

//! twenty48-core: the rule engine of a 4x4 sliding-tile merge puzzle.
//!
//! This crate provides:
//! - A `Board` grid of `Tile`s with score and terminal-state flags
//! - A `GameEngine` that resolves moves (compact, merge, spawn, win/loss)
//!   and notifies registered observers after every successful mutation
//!
//! Quick start:
//! ```
//! use twenty48_core::{Direction, GameEngine};
//!
//! // Deterministic engine; a fresh game opens with two random tiles.
//! let mut engine = GameEngine::from_seed(42);
//! assert_eq!(engine.board().empty_count(), 14);
//!
//! // `make_move` reports whether the board changed; a `false` return means
//! // nothing mutated and no notification fired.
//! let moved = engine.make_move(Direction::Left);
//! if moved {
//!     assert!(engine.board().empty_count() <= 14);
//! }
//! ```
//!
//! The engine owns the board exclusively; external readers get `&Board`
//! views or independent `snapshot()` copies, never mutable access.

pub mod game;

pub use game::{Board, ChangeObserver, Direction, GameEngine, Tile, BOARD_SIZE, WIN_VALUE};

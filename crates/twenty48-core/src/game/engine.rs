use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ops;
use super::state::{Board, Direction, WIN_VALUE};

/// Callback invoked with the updated board after every successful mutation.
pub type ChangeObserver = Box<dyn FnMut(&Board)>;

/// The move engine: owns the board, the RNG, and the change observers.
///
/// Every operation runs to completion synchronously. Observers fire in
/// registration order at the end of each state-changing operation and are
/// expected to only read the board they are handed.
pub struct GameEngine {
    board: Board,
    rng: StdRng,
    observers: Vec<ChangeObserver>,
}

impl GameEngine {
    /// Engine with an entropy-seeded RNG and a freshly started game.
    pub fn new() -> Self {
        GameEngine::with_rng(StdRng::from_entropy())
    }

    /// Deterministic engine for reproducible games and tests.
    ///
    /// ```
    /// use twenty48_core::GameEngine;
    ///
    /// let a = GameEngine::from_seed(7);
    /// let b = GameEngine::from_seed(7);
    /// assert_eq!(a.board(), b.board());
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        GameEngine::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut engine = GameEngine {
            board: Board::new(),
            rng,
            observers: Vec::new(),
        };
        engine.start_new_game();
        engine
    }

    /// Read-only view of the current board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Independent value copy of the current board.
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// Register a change observer.
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    /// use twenty48_core::GameEngine;
    ///
    /// let mut engine = GameEngine::from_seed(3);
    /// let fired = Rc::new(Cell::new(0));
    /// let probe = Rc::clone(&fired);
    /// engine.subscribe(move |_| probe.set(probe.get() + 1));
    /// engine.start_new_game();
    /// assert_eq!(fired.get(), 1);
    /// ```
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&Board) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Reset the board, spawn the two opening tiles, and notify. Always
    /// succeeds.
    pub fn start_new_game(&mut self) {
        self.board.reset();
        self.spawn_random_tile();
        self.spawn_random_tile();
        self.notify();
    }

    /// True if any empty cell exists or two adjacent cells share a value.
    pub fn can_move(&self) -> bool {
        ops::has_moves(&self.board)
    }

    /// Compact and merge every line toward `direction`, then spawn a tile
    /// and re-evaluate the terminal state if anything moved.
    ///
    /// Returns whether the move changed the board. On a `false` return the
    /// board is left byte-for-byte untouched and no notification fires;
    /// callers must check the flag rather than assume success.
    pub fn make_move(&mut self, direction: Direction) -> bool {
        if self.board.is_game_over() {
            return false;
        }

        // Resolve the move on a working copy so a no-effect move discards
        // everything, including transient-flag churn and merge bookkeeping.
        let mut next = self.board.clone();
        next.clear_transient_flags();
        let size = next.size();
        let mut moved = false;

        for line in 0..size {
            let current: Vec<u32> = (0..size)
                .map(|offset| {
                    let (row, column) = ops::line_cell(size, direction, line, offset);
                    next.tile(row, column).value
                })
                .collect();

            let outcome = ops::merge_line(&current, WIN_VALUE);
            next.update_score(outcome.points);
            if outcome.won {
                next.set_won(true);
            }

            for offset in 0..size {
                let (row, column) = ops::line_cell(size, direction, line, offset);
                let tile = next.tile_mut(row, column);
                if tile.value != outcome.values[offset] {
                    tile.value = outcome.values[offset];
                    moved = true;
                }
                if outcome.merged[offset] {
                    tile.is_merged = true;
                }
            }
        }

        if !moved {
            return false;
        }

        self.board = next;
        self.spawn_random_tile();
        if !self.can_move() {
            self.board.set_game_over(true);
        }
        self.notify();
        true
    }

    /// Place a 2 (90%) or 4 (10%) on a uniformly random empty cell. No-op on
    /// a full board.
    fn spawn_random_tile(&mut self) {
        let empty: Vec<(usize, usize)> = self
            .board
            .tiles()
            .filter(|t| t.is_empty())
            .map(|t| (t.row, t.column))
            .collect();
        if empty.is_empty() {
            return;
        }

        let (row, column) = empty[self.rng.gen_range(0..empty.len())];
        let value = if self.rng.gen_range(0..10) < 9 { 2 } else { 4 };
        let tile = self.board.tile_mut(row, column);
        tile.value = value;
        tile.is_new = true;
    }

    fn notify(&mut self) {
        let board = &self.board;
        for observer in self.observers.iter_mut() {
            observer(board);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        GameEngine::new()
    }
}

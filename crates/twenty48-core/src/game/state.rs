use std::fmt;

use serde::{Deserialize, Serialize};

/// Edge length of the standard grid.
pub const BOARD_SIZE: usize = 4;

/// Tile value that counts as a win when produced by a merge.
pub const WIN_VALUE: u32 = 2048;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A single cell of the grid.
///
/// `value == 0` marks an empty cell; any other value is a power of two >= 2.
/// `is_new` and `is_merged` are presentation hints describing the most recent
/// successful mutation; game logic never reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub value: u32,
    pub row: usize,
    pub column: usize,
    pub is_new: bool,
    pub is_merged: bool,
}

impl Tile {
    /// Construct a tile.
    ///
    /// Panics when `value` is neither 0 nor a power of two >= 2; out-of-range
    /// values are a contract violation, not a runtime condition.
    pub fn new(row: usize, column: usize, value: u32) -> Self {
        assert!(
            value == 0 || (value >= 2 && value.is_power_of_two()),
            "tile value must be 0 or a power of two >= 2, got {value}"
        );
        Tile {
            value,
            row,
            column,
            is_new: value > 0,
            is_merged: false,
        }
    }

    /// An empty cell at the given position.
    pub fn empty(row: usize, column: usize) -> Self {
        Tile::new(row, column, 0)
    }

    /// True if the cell holds no tile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }
}

/// The N x N grid plus score and terminal-state flags.
///
/// `Board` is a dumb container: it enforces nothing beyond what the engine
/// writes into it. Cloning yields a fully independent deep copy (tiles are
/// `Copy`), which the engine relies on for its pre-move working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
    size: usize,
    score: u32,
    game_over: bool,
    won: bool,
}

impl Board {
    /// A fresh standard board: all cells empty, score 0, flags false.
    pub fn new() -> Self {
        Board::with_size(BOARD_SIZE)
    }

    /// A fresh board with a custom edge length.
    pub fn with_size(size: usize) -> Self {
        assert!(size >= 2, "board size must be at least 2, got {size}");
        let mut tiles = Vec::with_capacity(size * size);
        for row in 0..size {
            for column in 0..size {
                tiles.push(Tile::empty(row, column));
            }
        }
        Board {
            tiles,
            size,
            score: 0,
            game_over: false,
            won: false,
        }
    }

    /// Edge length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current score.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True once no legal move remains.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True once any merge has produced the winning tile this game.
    #[inline]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// The tile at `(row, column)`. Panics when out of bounds.
    #[inline]
    pub fn tile(&self, row: usize, column: usize) -> &Tile {
        &self.tiles[row * self.size + column]
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, row: usize, column: usize) -> &mut Tile {
        let idx = row * self.size + column;
        &mut self.tiles[idx]
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_empty()).count()
    }

    /// Highest tile value on the board (0 when empty).
    pub fn highest_tile(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn total(&self) -> u32 {
        self.tiles.iter().map(|t| t.value).sum()
    }

    /// Set every cell back to empty, score to 0, and both flags to false.
    pub fn reset(&mut self) {
        for tile in self.tiles.iter_mut() {
            *tile = Tile::empty(tile.row, tile.column);
        }
        self.score = 0;
        self.game_over = false;
        self.won = false;
    }

    /// Add merge points to the score.
    pub(crate) fn update_score(&mut self, points: u32) {
        self.score += points;
    }

    pub(crate) fn set_game_over(&mut self, flag: bool) {
        self.game_over = flag;
    }

    pub(crate) fn set_won(&mut self, flag: bool) {
        self.won = flag;
    }

    /// Drop the `is_new`/`is_merged` hints from every tile.
    pub(crate) fn clear_transient_flags(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.is_new = false;
            tile.is_merged = false;
        }
    }

    /// Build a standard board with the given cell values (tests only).
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[[u32; BOARD_SIZE]; BOARD_SIZE]) -> Board {
        let mut board = Board::new();
        for (row, values) in rows.iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                board.tile_mut(row, column).value = value;
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in 0..self.size {
            if row > 0 {
                writeln!(f, "{}", "-".repeat(self.size * 8 - 1))?;
            }
            let cells: Vec<String> = (0..self.size)
                .map(|column| format_val(self.tile(row, column).value))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(value: u32) -> String {
    match value {
        0 => String::from("       "),
        v => format!("{v:^7}"),
    }
}

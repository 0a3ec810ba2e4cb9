//! Core domain types for the territory game.

use serde::{Deserialize, Serialize};

/// Identifies a seat at the table.
///
/// Ids are assigned in seating order starting at zero, so the id doubles
/// as the index of the seat in the turn rotation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("P{}", _0)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Creates an id for the seat at `index`.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the seat index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A cell on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has claimed the cell yet.
    #[default]
    Empty,
    /// Cell claimed by a player. Never reverts to `Empty`.
    OwnedBy(PlayerId),
}

impl Cell {
    /// Returns the owner, if any.
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::OwnedBy(player) => Some(player),
        }
    }

    /// Checks if the cell is unclaimed.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A `(row, col)` address on the grid, zero-indexed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{},{}", row, col)]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A successful claim: domain event recorded in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Claim {
    /// The player who claimed the cell.
    pub player: PlayerId,
    /// The claimed cell.
    pub coord: Coord,
}

impl std::fmt::Display for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coord)
    }
}

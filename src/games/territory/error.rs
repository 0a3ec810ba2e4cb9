//! Error types for the territory game.

use super::types::{Coord, PlayerId};
use derive_more::{Display, Error};

/// Errors raised by grid construction and claims.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A dimension was zero or the grid is too large to allocate.
    #[display("Invalid grid dimensions ({rows}, {cols})")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Coordinate lies outside the grid.
    #[display("Invalid position ({coord}) for board with dimensions ({rows}, {cols})")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// Cell already has an owner.
    #[display("Cell ({coord}) is already owned by {owner}")]
    AlreadyOwned {
        /// The contested cell.
        coord: Coord,
        /// Its current owner.
        owner: PlayerId,
    },
}

/// Errors that end a game or prevent it from starting.
///
/// Move-time failures never surface here: the turn controller turns them
/// into feedback for the next attempt.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// The board could not be built.
    #[display("Cannot create board: {source}")]
    InvalidDimensions {
        /// Underlying board error.
        source: BoardError,
    },

    /// Fewer than two seats were supplied.
    #[display("At least two players are required, got {count}")]
    TooFewPlayers {
        /// Number of seats supplied.
        count: usize,
    },

    /// Two seats share a marker, so the rendered board would be ambiguous.
    #[display("Marker '{marker}' is used by more than one player")]
    DuplicateMarker {
        /// The repeated marker.
        marker: char,
    },

    /// An automated player kept failing past its retry bound.
    #[display("Player {player} failed {attempts} consecutive attempts:{feedback}")]
    RetryBudgetExceeded {
        /// Display name of the player.
        player: String,
        /// Total attempts made this turn.
        attempts: usize,
        /// Accumulated failure log.
        feedback: String,
    },

    /// A player's input source closed mid-game.
    #[display("Player {player} disconnected")]
    MoverDisconnected {
        /// Display name of the player.
        player: String,
    },

    /// The game is finished or aborted and accepts no further moves.
    #[display("Game is no longer accepting moves")]
    NotInProgress,
}

//! The capability that proposes moves on behalf of a player.
//!
//! The turn controller does not care whether a move came from a keyboard
//! or a language model. It hands the mover a read-only view of the board
//! plus the failure log from earlier attempts this turn, and validates
//! whatever comes back.

use super::position::ParseCoordError;
use super::seats::BoardView;
use super::types::Coord;
use derive_more::{Display, Error};

/// How a mover is driven, which decides its retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum MoverKind {
    /// A person at the keyboard. May retry without limit.
    Interactive,
    /// A program or remote model. Retries are bounded so it cannot stall the game.
    Automated,
}

/// Failure to produce a move at all.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoverError {
    /// The response could not be read as a move.
    #[display("Could not read move: {source}")]
    Malformed {
        /// Parse failure detail.
        source: ParseCoordError,
    },

    /// The backing service failed (network, API, empty response).
    #[display("Move generation failed: {message}")]
    Unavailable {
        /// Failure detail.
        message: String,
    },

    /// The input source is exhausted; no move will ever arrive.
    #[display("Input closed")]
    InputClosed,
}

impl From<ParseCoordError> for MoverError {
    fn from(source: ParseCoordError) -> Self {
        MoverError::Malformed { source }
    }
}

/// Proposes moves for one seat.
#[async_trait::async_trait]
pub trait Mover: Send {
    /// Proposes the next cell to claim.
    ///
    /// `feedback` is `None` on the first attempt of a turn and otherwise
    /// holds one line per earlier failed attempt.
    async fn propose_move(
        &mut self,
        view: &BoardView<'_>,
        feedback: Option<&str>,
    ) -> Result<Coord, MoverError>;

    /// Returns how this mover is driven.
    fn kind(&self) -> MoverKind;
}

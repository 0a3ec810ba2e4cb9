//! Territory: claim cells on a grid, score your largest connected region.

mod board;
mod controller;
mod error;
mod mover;
mod outcome;
mod position;
mod scoring;
mod seats;
mod types;

pub use board::Board;
pub use controller::{
    Contestant, DEFAULT_MAX_RETRIES, TurnController, TurnEvent, TurnPhase, TurnSettings,
};
pub use error::{BoardError, GameError};
pub use mover::{Mover, MoverError, MoverKind};
pub use outcome::GameOutcome;
pub use position::ParseCoordError;
pub use scoring::{ScoringMode, Territory, score_all, territories};
pub use seats::{BoardView, Roster, Seat};
pub use types::{Cell, Claim, Coord, PlayerId};

//! Seats at the table and the read-only view handed to movers.

use super::board::Board;
use super::mover::MoverKind;
use super::types::{Coord, PlayerId};
use derive_getters::Getters;
use tracing::instrument;

/// One participant: identity, display marker and how it is driven.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Seat {
    /// Seat id, also its position in the rotation.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Single character drawn in owned cells.
    marker: char,
    /// Whether the seat's mover is interactive or automated.
    kind: MoverKind,
}

impl Seat {
    /// Creates a seat.
    pub fn new(id: PlayerId, name: impl Into<String>, marker: char, kind: MoverKind) -> Self {
        Self {
            id,
            name: name.into(),
            marker,
            kind,
        }
    }
}

/// The ordered list of seats. Turn order is seating order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    seats: Vec<Seat>,
}

impl Roster {
    /// Creates a roster from seats whose ids match their positions.
    pub(crate) fn new(seats: Vec<Seat>) -> Self {
        debug_assert!(seats.iter().enumerate().all(|(i, s)| s.id.index() == i));
        Self { seats }
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Checks if there are no seats.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Looks up a seat.
    pub fn get(&self, id: PlayerId) -> Option<&Seat> {
        self.seats.get(id.index())
    }

    /// Iterates seats in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// The seat after `id`, wrapping from the last back to the first.
    pub fn next_after(&self, id: PlayerId) -> PlayerId {
        PlayerId::new((id.index() + 1) % self.seats.len().max(1))
    }

    /// Marker for `id`, or `?` for an unknown id.
    pub fn marker(&self, id: PlayerId) -> char {
        self.get(id).map(|s| s.marker).unwrap_or('?')
    }

    /// Display name for `id`, falling back to the id itself.
    pub fn name(&self, id: PlayerId) -> String {
        self.get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Renders `board` using this roster's markers.
    pub fn render(&self, board: &Board) -> String {
        board.render_with(|id| self.marker(id))
    }
}

/// Snapshot of the game handed to a mover when it is asked for a move.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    roster: &'a Roster,
    active: PlayerId,
}

impl<'a> BoardView<'a> {
    /// Creates a view for the seat about to move.
    pub fn new(board: &'a Board, roster: &'a Roster, active: PlayerId) -> Self {
        Self {
            board,
            roster,
            active,
        }
    }

    /// The board as it stands.
    pub fn board(&self) -> &'a Board {
        self.board
    }

    /// All seats.
    pub fn roster(&self) -> &'a Roster {
        self.roster
    }

    /// Id of the seat to move.
    pub fn active(&self) -> PlayerId {
        self.active
    }

    /// The seat to move.
    pub fn active_seat(&self) -> Option<&'a Seat> {
        self.roster.get(self.active)
    }

    /// The framed board text.
    #[instrument(skip(self))]
    pub fn render(&self) -> String {
        self.roster.render(self.board)
    }

    /// Cells still open, in row-major order.
    pub fn open_cells(&self) -> Vec<Coord> {
        self.board.open_cells()
    }

    /// Open cells formatted as `(row,col)` entries separated by spaces.
    pub fn open_cells_text(&self) -> String {
        self.open_cells()
            .iter()
            .map(|c| format!("({c})"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

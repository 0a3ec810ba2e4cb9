//! Connected-component scoring.
//!
//! Two cells belong to the same territory when they share an owner and are
//! linked by a chain of orthogonally adjacent cells with that owner. A
//! player's score is the size of their largest territory by default; see
//! [`ScoringMode`] for the alternative.

use super::board::Board;
use super::types::{Cell, Coord, PlayerId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Which figure of a player's territory counts as their score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ScoringMode {
    /// Size of the single largest connected component.
    #[default]
    LargestComponent,
    /// Number of cells owned, regardless of connectivity.
    TotalArea,
}

impl ScoringMode {
    /// Extracts the score this mode reports from a territory summary.
    pub fn score(self, territory: &Territory) -> usize {
        match self {
            ScoringMode::LargestComponent => territory.largest,
            ScoringMode::TotalArea => territory.total,
        }
    }
}

/// Summary of one player's holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct Territory {
    /// Size of the largest component.
    largest: usize,
    /// Cells owned across all components.
    total: usize,
    /// Number of separate components.
    components: usize,
}

impl Territory {
    fn record(&mut self, size: usize) {
        self.largest = self.largest.max(size);
        self.total += size;
        self.components += 1;
    }
}

/// Partitions the board into components and summarizes them per owner.
///
/// Players owning no cells are absent from the map. Every cell is visited
/// once, so this runs in time and space linear in the board size.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn territories(board: &Board) -> BTreeMap<PlayerId, Territory> {
    let mut assigned = vec![false; board.len()];
    let mut result: BTreeMap<PlayerId, Territory> = BTreeMap::new();
    let index = |c: Coord| c.row * board.cols() + c.col;

    for seed in board.coords() {
        if assigned[index(seed)] {
            continue;
        }
        assigned[index(seed)] = true;

        // Unowned seeds are consumed without a traversal.
        let Ok(Cell::OwnedBy(owner)) = board.cell_at(seed) else {
            continue;
        };

        let mut size = 0;
        let mut stack = vec![seed];
        while let Some(coord) = stack.pop() {
            size += 1;
            for next in board.adjacent(coord) {
                if !assigned[index(next)] && board.cell_at(next) == Ok(Cell::OwnedBy(owner)) {
                    assigned[index(next)] = true;
                    stack.push(next);
                }
            }
        }

        debug!(%owner, %seed, size, "Component measured");
        result.entry(owner).or_default().record(size);
    }

    result
}

/// Largest component size per player.
///
/// Every player in `players` gets an entry, scoring 0 when they own no cells.
/// Owners found on the board but missing from `players` are still reported.
#[instrument(skip_all)]
pub fn score_all(
    board: &Board,
    players: impl IntoIterator<Item = PlayerId>,
) -> BTreeMap<PlayerId, usize> {
    let mut scores: BTreeMap<PlayerId, usize> =
        players.into_iter().map(|player| (player, 0)).collect();
    for (player, territory) in territories(board) {
        scores.insert(player, territory.largest);
    }
    scores
}
